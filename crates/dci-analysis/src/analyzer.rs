use crate::metrics::{DciSummary, StatusDistribution};
use dci_core::{DciRow, Result, HIGH_COUPLING_THRESHOLD};

/// Summarizes a table of DCI results.
///
/// All operations are read-only views over the borrowed rows; filtered
/// results keep the table's original order.
pub struct Analyzer<'a> {
    rows: &'a [DciRow],
}

impl<'a> Analyzer<'a> {
    pub fn new(rows: &'a [DciRow]) -> Self {
        Self { rows }
    }

    pub fn rows(&self) -> &'a [DciRow] {
        self.rows
    }

    /// Count, mean, min, max and standard deviation of the scores.
    ///
    /// Fails with `EmptyRows` on an empty table.
    pub fn summarize(&self) -> Result<DciSummary> {
        let values: Vec<f64> = self.rows.iter().map(|r| r.dci).collect();
        DciSummary::from_values(&values)
    }

    /// Counts of the declared statuses, all four present.
    pub fn status_distribution(&self) -> StatusDistribution {
        let mut distribution = StatusDistribution::default();
        for row in self.rows {
            distribution.record(row.status);
        }
        distribution
    }

    /// Rows with `dci >= 0.7`.
    pub fn high_coupling(&self) -> Vec<&'a DciRow> {
        self.rows
            .iter()
            .filter(|r| r.dci >= HIGH_COUPLING_THRESHOLD)
            .collect()
    }

    /// Rows whose score is exactly zero.
    pub fn isolated(&self) -> Vec<&'a DciRow> {
        self.rows.iter().filter(|r| r.dci == 0.0).collect()
    }

    /// Rows whose declared status cannot be explained by their score, even
    /// allowing for the producer's three-decimal rounding.
    pub fn status_mismatches(&self) -> Vec<&'a DciRow> {
        self.rows
            .iter()
            .filter(|r| !r.has_consistent_status())
            .collect()
    }
}
