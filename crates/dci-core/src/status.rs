//! Coupling status buckets shared by the estimator and the analyzer.

use crate::Error;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Scores at or above this value are classified as high coupling.
pub const HIGH_COUPLING_THRESHOLD: f64 = 0.7;

/// Scores at or above this value (and below [`HIGH_COUPLING_THRESHOLD`]) are moderate.
pub const MODERATE_COUPLING_THRESHOLD: f64 = 0.4;

/// Half a unit in the last place of a score written with three decimals.
///
/// The DCI producer classifies the exact score and then rounds it, so a
/// written score can sit up to this far on the wrong side of a threshold.
pub const SCORE_ROUNDING_TOLERANCE: f64 = 0.0005;

/// Four-bucket classification of a DCI score.
///
/// Variants are declared from strongest to weakest coupling, which is also
/// the report order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum CouplingStatus {
    High,
    Moderate,
    Low,
    No,
}

impl CouplingStatus {
    pub const ALL: [CouplingStatus; 4] = [
        CouplingStatus::High,
        CouplingStatus::Moderate,
        CouplingStatus::Low,
        CouplingStatus::No,
    ];

    /// Classify a score.
    ///
    /// Only an exact zero is `No`; any positive score below the moderate
    /// threshold is `Low`.
    pub fn from_score(dci: f64) -> Self {
        if dci >= HIGH_COUPLING_THRESHOLD {
            CouplingStatus::High
        } else if dci >= MODERATE_COUPLING_THRESHOLD {
            CouplingStatus::Moderate
        } else if dci > 0.0 {
            CouplingStatus::Low
        } else {
            CouplingStatus::No
        }
    }

    /// Whether a score rounded by at most `tolerance` could have come from
    /// an exact score in this bucket.
    pub fn admits(&self, dci: f64, tolerance: f64) -> bool {
        match self {
            CouplingStatus::High => dci >= HIGH_COUPLING_THRESHOLD - tolerance,
            CouplingStatus::Moderate => {
                dci >= MODERATE_COUPLING_THRESHOLD - tolerance
                    && dci <= HIGH_COUPLING_THRESHOLD + tolerance
            }
            CouplingStatus::Low => dci <= MODERATE_COUPLING_THRESHOLD + tolerance,
            CouplingStatus::No => dci <= tolerance,
        }
    }

    /// Short label, e.g. `High`.
    pub fn label(&self) -> &'static str {
        match self {
            CouplingStatus::High => "High",
            CouplingStatus::Moderate => "Moderate",
            CouplingStatus::Low => "Low",
            CouplingStatus::No => "No",
        }
    }
}

/// Long label as written by the DCI producer, e.g. `High Coupling`.
impl fmt::Display for CouplingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} Coupling", self.label())
    }
}

impl FromStr for CouplingStatus {
    type Err = Error;

    /// Accepts the short and the long label, case-insensitively.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase();
        let short = normalized
            .strip_suffix("coupling")
            .map(str::trim_end)
            .unwrap_or(&normalized);

        CouplingStatus::ALL
            .into_iter()
            .find(|status| status.label().eq_ignore_ascii_case(short))
            .ok_or_else(|| Error::Input(format!("unknown coupling status '{}'", s.trim())))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_score_boundaries() {
        assert_eq!(CouplingStatus::from_score(0.8), CouplingStatus::High);
        assert_eq!(CouplingStatus::from_score(0.7), CouplingStatus::High);
        assert_eq!(CouplingStatus::from_score(0.6), CouplingStatus::Moderate);
        assert_eq!(CouplingStatus::from_score(0.4), CouplingStatus::Moderate);
        assert_eq!(CouplingStatus::from_score(0.3), CouplingStatus::Low);
        assert_eq!(CouplingStatus::from_score(1e-9), CouplingStatus::Low);
        assert_eq!(CouplingStatus::from_score(0.0), CouplingStatus::No);
    }

    #[test]
    fn test_admits_rounded_scores_near_thresholds() {
        let t = SCORE_ROUNDING_TOLERANCE;
        // 0.6994.. classified Moderate, written as 0.700
        assert!(CouplingStatus::Moderate.admits(0.700, t));
        // 0.0004 classified Low, written as 0.000
        assert!(CouplingStatus::Low.admits(0.000, t));
        assert!(CouplingStatus::High.admits(0.7, t));
        assert!(CouplingStatus::No.admits(0.0, t));

        assert!(!CouplingStatus::High.admits(0.699, t));
        assert!(!CouplingStatus::Moderate.admits(0.2, t));
        assert!(!CouplingStatus::Low.admits(0.401, t));
        assert!(!CouplingStatus::No.admits(0.001, t));
    }

    #[test]
    fn test_parse_short_and_long_labels() {
        assert_eq!("High".parse::<CouplingStatus>().unwrap(), CouplingStatus::High);
        assert_eq!(
            "Moderate Coupling".parse::<CouplingStatus>().unwrap(),
            CouplingStatus::Moderate
        );
        assert_eq!(" low coupling ".parse::<CouplingStatus>().unwrap(), CouplingStatus::Low);
        assert_eq!("NO".parse::<CouplingStatus>().unwrap(), CouplingStatus::No);
    }

    #[test]
    fn test_parse_unknown_label_fails() {
        let err = "Extreme".parse::<CouplingStatus>().unwrap_err();
        assert!(matches!(err, Error::Input(_)));
    }

    #[test]
    fn test_display_round_trips_through_parse() {
        for status in CouplingStatus::ALL {
            assert_eq!(status.to_string().parse::<CouplingStatus>().unwrap(), status);
        }
        assert_eq!(CouplingStatus::No.to_string(), "No Coupling");
    }
}
