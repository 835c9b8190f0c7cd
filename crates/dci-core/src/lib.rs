//! Core types for the Dependency Coupling Index (DCI) toolkit.
//!
//! This crate defines the value types shared by trace synthesis and result
//! analysis: architecture templates, Zipkin-style trace records, coupling
//! statuses, the tabular row types, and the error taxonomy. It contains no
//! sampling or statistics logic.

pub mod error;
pub mod rows;
pub mod status;
pub mod template;
pub mod trace;

pub use error::{Error, Result};
pub use rows::{ComparisonRow, DciRow, ReferenceRow, TemplateRow};
pub use status::{
    CouplingStatus, HIGH_COUPLING_THRESHOLD, MODERATE_COUPLING_THRESHOLD, SCORE_ROUNDING_TOLERANCE,
};
pub use template::{ArchitectureTemplate, CallPattern, Service};
pub use trace::{Endpoint, TraceRecord};
