use crate::analyzer::Analyzer;
use crate::comparator::Comparison;
use crate::metrics::{DciSummary, StatusDistribution};
use dci_core::{DciRow, Result};
use serde::Serialize;
use std::fmt;

/// Human-readable and machine-readable validation report.
#[derive(Debug, Clone, Serialize)]
pub struct Report {
    pub summary: DciSummary,
    pub status_distribution: StatusDistribution,
    pub high_coupling: Vec<DciRow>,
    pub isolated: Vec<DciRow>,
    pub status_mismatches: Vec<DciRow>,
    pub comparison: Option<Comparison>,
    /// Set when reference data was supplied but no service matched.
    pub join_mismatch: Option<String>,
}

impl Report {
    /// Analyze a DCI table. Fails on an empty table.
    pub fn from_rows(rows: &[DciRow]) -> Result<Self> {
        let analyzer = Analyzer::new(rows);
        Ok(Self {
            summary: analyzer.summarize()?,
            status_distribution: analyzer.status_distribution(),
            high_coupling: analyzer.high_coupling().into_iter().cloned().collect(),
            isolated: analyzer.isolated().into_iter().cloned().collect(),
            status_mismatches: analyzer.status_mismatches().into_iter().cloned().collect(),
            comparison: None,
            join_mismatch: None,
        })
    }

    pub fn with_comparison(mut self, comparison: Comparison) -> Self {
        self.comparison = Some(comparison);
        self
    }

    pub fn with_join_mismatch(mut self, message: impl Into<String>) -> Self {
        self.join_mismatch = Some(message.into());
        self
    }

    /// Generate a human-readable text report.
    pub fn to_text(&self) -> String {
        self.to_string()
    }

    /// Generate a JSON report.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "=== DCI Analysis ===")?;
        writeln!(f, "Status Distribution:")?;
        for (status, count) in self.status_distribution.iter() {
            writeln!(f, "  {}: {} services", status, count)?;
        }

        writeln!(f)?;
        writeln!(f, "Score Statistics:")?;
        writeln!(f, "  Min: {:.3}", self.summary.min)?;
        writeln!(f, "  Max: {:.3}", self.summary.max)?;
        writeln!(f, "  Mean: {:.3}", self.summary.mean)?;
        writeln!(f, "  Std: {:.3}", self.summary.std_dev)?;

        if !self.high_coupling.is_empty() {
            writeln!(f)?;
            writeln!(f, "High Coupling Services ({}):", self.high_coupling.len())?;
            for row in &self.high_coupling {
                writeln!(f, "  {}: {:.3}", row.service, row.dci)?;
            }
        }

        if !self.isolated.is_empty() {
            writeln!(f)?;
            writeln!(f, "Isolated Services ({}):", self.isolated.len())?;
            for row in &self.isolated {
                writeln!(f, "  {}", row.service)?;
            }
        }

        if !self.status_mismatches.is_empty() {
            writeln!(f)?;
            writeln!(f, "Status Mismatches ({}):", self.status_mismatches.len())?;
            for row in &self.status_mismatches {
                writeln!(
                    f,
                    "  {}: declared {}, score {:.3} implies {}",
                    row.service,
                    row.status,
                    row.dci,
                    row.derived_status()
                )?;
            }
        }

        if let Some(message) = &self.join_mismatch {
            writeln!(f)?;
            writeln!(f, "=== MCI Comparison ===")?;
            writeln!(f, "{}", message)?;
        }

        if let Some(comparison) = &self.comparison {
            writeln!(f)?;
            writeln!(f, "=== MCI Comparison ===")?;
            writeln!(f, "Matched services: {}", comparison.rows.len())?;
            match (comparison.correlation, &comparison.correlation_note) {
                (Some(r), _) => writeln!(f, "Correlation (DCI vs MCI_Afferent): {:.3}", r)?,
                (None, Some(note)) => {
                    writeln!(f, "Correlation (DCI vs MCI_Afferent): undefined ({})", note)?
                }
                (None, None) => writeln!(f, "Correlation (DCI vs MCI_Afferent): undefined")?,
            }
            writeln!(
                f,
                "Services with significant differences (>{}): {}",
                comparison.threshold,
                comparison.significant_differences.len()
            )?;
            if !comparison.significant_differences.is_empty() {
                writeln!(f, "Services to investigate:")?;
                for row in &comparison.significant_differences {
                    writeln!(
                        f,
                        "  {}: DCI={:.3}, MCI={:.3}",
                        row.service, row.dci, row.mci_afferent
                    )?;
                }
            }
        }

        Ok(())
    }
}
