//! Synthetic trace generation for DCI testing.
//!
//! This crate provides:
//!
//! - `PatternCatalog`: the built-in microservice topologies, looked up by name
//! - `TraceSynthesizer`: weighted roulette-wheel sampling of call records
//! - `expected_dci`: the structural coupling each template should produce
//!
//! # Example
//!
//! ```
//! use dci_synth::{PatternCatalog, TraceSynthesizer};
//!
//! let catalog = PatternCatalog::builtin()?;
//! let template = catalog.get("simple_chain")?;
//!
//! let mut synthesizer = TraceSynthesizer::seeded(42);
//! let traces = synthesizer.generate(template, 10)?;
//! assert_eq!(traces.len(), 10);
//! # Ok::<(), dci_core::Error>(())
//! ```

pub mod catalog;
pub mod estimator;
pub mod synthesizer;

pub use catalog::PatternCatalog;
pub use estimator::{expected_dci, ExpectedCoupling};
pub use synthesizer::{PatternSampler, TraceSynthesizer};
