//! Cross-metric comparison of DCI scores with reference (MCI) afferent coupling.

use crate::metrics::pearson;
use dci_core::{ComparisonRow, DciRow, Error, ReferenceRow, Result, TemplateRow};
use serde::Serialize;
use std::collections::HashMap;
use tracing::debug;

/// Differences strictly above this value are reported as significant.
pub const DEFAULT_DIFFERENCE_THRESHOLD: f64 = 0.3;

/// Result of a full comparison run.
#[derive(Debug, Clone, Serialize)]
pub struct Comparison {
    pub rows: Vec<ComparisonRow>,
    /// Pearson correlation of DCI against MCI afferent, when defined.
    pub correlation: Option<f64>,
    /// Why the correlation is undefined, if it is.
    pub correlation_note: Option<String>,
    pub threshold: f64,
    pub significant_differences: Vec<ComparisonRow>,
}

/// Joins DCI results with reference data and measures their agreement.
#[derive(Debug, Clone, Copy)]
pub struct Comparator {
    threshold: f64,
}

impl Default for Comparator {
    fn default() -> Self {
        Self::new(DEFAULT_DIFFERENCE_THRESHOLD)
    }
}

impl Comparator {
    pub fn new(threshold: f64) -> Self {
        Self { threshold }
    }

    /// Inner join on service name, in DCI table order.
    ///
    /// Services present on only one side are dropped, as are reference rows
    /// without an afferent value.
    pub fn join(dci_rows: &[DciRow], reference_rows: &[ReferenceRow]) -> Vec<ComparisonRow> {
        let mut afferent: HashMap<&str, f64> = HashMap::with_capacity(reference_rows.len());
        for row in reference_rows {
            match row.mci_afferent {
                Some(value) => {
                    afferent.insert(row.service.as_str(), value);
                }
                None => debug!(service = %row.service, "skipping reference row without MCI_Afferent"),
            }
        }

        dci_rows
            .iter()
            .filter_map(|row| {
                afferent
                    .get(row.service.as_str())
                    .map(|&mci| ComparisonRow::new(row.service.clone(), row.dci, mci))
            })
            .collect()
    }

    /// Pearson correlation between the `dci` and `mci_afferent` columns.
    pub fn correlation(rows: &[ComparisonRow]) -> Result<f64> {
        let dci: Vec<f64> = rows.iter().map(|r| r.dci).collect();
        let mci: Vec<f64> = rows.iter().map(|r| r.mci_afferent).collect();
        pearson(&dci, &mci)
    }

    /// Rows whose difference exceeds the threshold.
    pub fn significant_differences<'r>(&self, rows: &'r [ComparisonRow]) -> Vec<&'r ComparisonRow> {
        rows.iter().filter(|r| r.difference > self.threshold).collect()
    }

    /// Skeleton table for filling in reference values by hand.
    pub fn build_template(dci_rows: &[DciRow]) -> Vec<TemplateRow> {
        dci_rows.iter().map(TemplateRow::from).collect()
    }

    /// Join, correlate and flag differences in one pass.
    ///
    /// Returns `JoinMismatch` when no service survives the join. An undefined
    /// correlation is not an error here; it is recorded in the result.
    pub fn compare(&self, dci_rows: &[DciRow], reference_rows: &[ReferenceRow]) -> Result<Comparison> {
        let rows = Self::join(dci_rows, reference_rows);
        if rows.is_empty() {
            return Err(Error::JoinMismatch {
                dci_rows: dci_rows.len(),
                reference_rows: reference_rows.len(),
            });
        }

        let (correlation, correlation_note) = match Self::correlation(&rows) {
            Ok(value) => (Some(value), None),
            Err(e) => (None, Some(e.to_string())),
        };

        let significant_differences = self
            .significant_differences(&rows)
            .into_iter()
            .cloned()
            .collect();

        Ok(Comparison {
            rows,
            correlation,
            correlation_note,
            threshold: self.threshold,
            significant_differences,
        })
    }
}
