//! Row types for the DCI results table, the reference (MCI) table, and their join.

use crate::status::{CouplingStatus, SCORE_ROUNDING_TOLERANCE};
use crate::template::Service;
use serde::{Deserialize, Serialize};

/// One service's externally computed coupling score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DciRow {
    pub service: Service,
    pub dci: f64,
    pub status: CouplingStatus,
}

impl DciRow {
    pub fn new(service: impl Into<Service>, dci: f64, status: CouplingStatus) -> Self {
        Self {
            service: service.into(),
            dci,
            status,
        }
    }

    /// Row whose status is derived from the score.
    pub fn classified(service: impl Into<Service>, dci: f64) -> Self {
        Self::new(service, dci, CouplingStatus::from_score(dci))
    }

    /// Status implied by the score under the shared thresholds.
    pub fn derived_status(&self) -> CouplingStatus {
        CouplingStatus::from_score(self.dci)
    }

    /// Whether the declared status fits the score once three-decimal
    /// rounding by the producer is allowed for.
    pub fn has_consistent_status(&self) -> bool {
        self.status.admits(self.dci, SCORE_ROUNDING_TOLERANCE)
    }
}

/// One service's reference coupling values from the literature.
///
/// A blank afferent cell is `None`; such rows take no part in the join.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReferenceRow {
    pub service: Service,
    pub mci_afferent: Option<f64>,
    pub mci_efferent: Option<f64>,
}

impl ReferenceRow {
    pub fn new(service: impl Into<Service>, mci_afferent: f64) -> Self {
        Self {
            service: service.into(),
            mci_afferent: Some(mci_afferent),
            mci_efferent: None,
        }
    }
}

/// A DCI score joined with its reference afferent coupling.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparisonRow {
    pub service: Service,
    pub dci: f64,
    pub mci_afferent: f64,
    /// Always `|dci - mci_afferent|`.
    pub difference: f64,
}

impl ComparisonRow {
    pub fn new(service: Service, dci: f64, mci_afferent: f64) -> Self {
        Self {
            service,
            dci,
            mci_afferent,
            difference: (dci - mci_afferent).abs(),
        }
    }
}

/// A row of the comparison template handed out for manual completion.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TemplateRow {
    #[serde(rename = "Service")]
    pub service: Service,
    #[serde(rename = "DCI")]
    pub dci: f64,
    #[serde(rename = "MCI_Afferent")]
    pub mci_afferent: String,
    #[serde(rename = "MCI_Efferent")]
    pub mci_efferent: String,
    #[serde(rename = "Notes")]
    pub notes: String,
}

impl From<&DciRow> for TemplateRow {
    fn from(row: &DciRow) -> Self {
        Self {
            service: row.service.clone(),
            dci: row.dci,
            mci_afferent: String::new(),
            mci_efferent: String::new(),
            notes: String::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_comparison_difference_is_absolute() {
        let row = ComparisonRow::new(Service::from("svc"), 0.2, 0.5);
        assert!((row.difference - 0.3).abs() < 1e-12);
    }

    #[test]
    fn test_classified_row() {
        let row = DciRow::classified("svc", 0.5);
        assert_eq!(row.status, CouplingStatus::Moderate);
        assert_eq!(row.derived_status(), CouplingStatus::Moderate);
    }

    #[test]
    fn test_consistent_status_allows_rounding() {
        assert!(DciRow::new("edge", 0.7, CouplingStatus::Moderate).has_consistent_status());
        assert!(DciRow::new("tiny", 0.0, CouplingStatus::Low).has_consistent_status());
        assert!(!DciRow::new("stale", 0.2, CouplingStatus::Moderate).has_consistent_status());
    }

    #[test]
    fn test_template_row_blanks() {
        let row = TemplateRow::from(&DciRow::classified("svc", 0.25));
        assert_eq!(row.dci, 0.25);
        assert!(row.mci_afferent.is_empty() && row.mci_efferent.is_empty() && row.notes.is_empty());
    }
}
