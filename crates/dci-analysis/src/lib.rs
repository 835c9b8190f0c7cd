//! Analysis of computed DCI results.
//!
//! This crate provides:
//! - Descriptive statistics and status classification of DCI tables
//! - Comparison against reference (MCI) coupling data
//! - CSV schemas for loading and writing the tables
//! - Text and JSON validation reports

pub mod analyzer;
pub mod comparator;
pub mod metrics;
pub mod report;
pub mod table;

pub use analyzer::Analyzer;
pub use comparator::{Comparator, Comparison, DEFAULT_DIFFERENCE_THRESHOLD};
pub use metrics::{pearson, DciSummary, StatusDistribution};
pub use report::Report;
