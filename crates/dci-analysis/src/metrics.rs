use dci_core::{CouplingStatus, Error, Result};
use serde::{Deserialize, Serialize};

/// Descriptive statistics over a set of DCI scores.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DciSummary {
    pub count: usize,
    pub mean: f64,
    pub min: f64,
    pub max: f64,
    /// Sample standard deviation (n - 1 denominator); 0 for a single value.
    pub std_dev: f64,
}

impl DciSummary {
    /// Fails with `EmptyRows` when there are no values.
    pub fn from_values(values: &[f64]) -> Result<Self> {
        if values.is_empty() {
            return Err(Error::EmptyRows);
        }

        let mean = mean(values);
        let min = values.iter().copied().fold(f64::INFINITY, f64::min);
        let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);

        Ok(Self {
            count: values.len(),
            mean,
            min,
            max,
            std_dev: sample_std_dev(values, mean),
        })
    }
}

/// Number of services per coupling status. All four statuses are always present.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusDistribution {
    pub high: usize,
    pub moderate: usize,
    pub low: usize,
    pub no: usize,
}

impl StatusDistribution {
    pub fn record(&mut self, status: CouplingStatus) {
        *self.slot(status) += 1;
    }

    pub fn get(&self, status: CouplingStatus) -> usize {
        match status {
            CouplingStatus::High => self.high,
            CouplingStatus::Moderate => self.moderate,
            CouplingStatus::Low => self.low,
            CouplingStatus::No => self.no,
        }
    }

    /// `(status, count)` pairs from high to no coupling, zeros included.
    pub fn iter(&self) -> impl Iterator<Item = (CouplingStatus, usize)> + '_ {
        CouplingStatus::ALL.into_iter().map(|s| (s, self.get(s)))
    }

    pub fn total(&self) -> usize {
        self.high + self.moderate + self.low + self.no
    }

    fn slot(&mut self, status: CouplingStatus) -> &mut usize {
        match status {
            CouplingStatus::High => &mut self.high,
            CouplingStatus::Moderate => &mut self.moderate,
            CouplingStatus::Low => &mut self.low,
            CouplingStatus::No => &mut self.no,
        }
    }
}

pub(crate) fn mean(values: &[f64]) -> f64 {
    values.iter().sum::<f64>() / values.len() as f64
}

fn sample_std_dev(values: &[f64], mean: f64) -> f64 {
    if values.len() < 2 || is_constant(values) {
        return 0.0;
    }
    let sum_sq: f64 = values.iter().map(|v| (v - mean).powi(2)).sum();
    (sum_sq / (values.len() - 1) as f64).sqrt()
}

fn is_constant(values: &[f64]) -> bool {
    values.windows(2).all(|w| w[0] == w[1])
}

/// Pearson correlation coefficient of two equally long columns.
///
/// Needs at least two pairs, and neither column may be constant.
pub fn pearson(xs: &[f64], ys: &[f64]) -> Result<f64> {
    let n = xs.len().min(ys.len());
    if n < 2 {
        return Err(Error::InsufficientData {
            required: 2,
            actual: n,
        });
    }
    let (xs, ys) = (&xs[..n], &ys[..n]);

    if is_constant(xs) {
        return Err(Error::ZeroVariance("DCI"));
    }
    if is_constant(ys) {
        return Err(Error::ZeroVariance("MCI_Afferent"));
    }

    let mean_x = mean(xs);
    let mean_y = mean(ys);

    let mut cov = 0.0;
    let mut var_x = 0.0;
    let mut var_y = 0.0;
    for (x, y) in xs.iter().zip(ys) {
        let dx = x - mean_x;
        let dy = y - mean_y;
        cov += dx * dy;
        var_x += dx * dx;
        var_y += dy * dy;
    }

    // Clamp rounding noise so perfectly linear inputs never exceed |1|.
    Ok((cov / (var_x.sqrt() * var_y.sqrt())).clamp(-1.0, 1.0))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summary_of_constant_values() {
        let summary = DciSummary::from_values(&[0.5, 0.5, 0.5]).unwrap();
        assert_eq!(summary.count, 3);
        assert_eq!(summary.mean, 0.5);
        assert_eq!(summary.min, 0.5);
        assert_eq!(summary.max, 0.5);
        assert_eq!(summary.std_dev, 0.0);
    }

    #[test]
    fn test_summary_sample_std_dev() {
        let summary = DciSummary::from_values(&[0.0, 0.5, 1.0]).unwrap();
        assert!((summary.mean - 0.5).abs() < 1e-12);
        assert_eq!(summary.min, 0.0);
        assert_eq!(summary.max, 1.0);
        assert!((summary.std_dev - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_summary_single_value() {
        let summary = DciSummary::from_values(&[0.25]).unwrap();
        assert_eq!(summary.std_dev, 0.0);
    }

    #[test]
    fn test_summary_empty_fails() {
        assert!(matches!(DciSummary::from_values(&[]), Err(Error::EmptyRows)));
    }

    #[test]
    fn test_distribution_keeps_zero_counts() {
        let mut dist = StatusDistribution::default();
        dist.record(CouplingStatus::Low);
        dist.record(CouplingStatus::Low);
        let pairs: Vec<_> = dist.iter().collect();
        assert_eq!(
            pairs,
            vec![
                (CouplingStatus::High, 0),
                (CouplingStatus::Moderate, 0),
                (CouplingStatus::Low, 2),
                (CouplingStatus::No, 0),
            ]
        );
        assert_eq!(dist.total(), 2);
    }

    #[test]
    fn test_pearson_perfect_linear() {
        let xs = [0.1, 0.2, 0.3, 0.4];
        let ys: Vec<f64> = xs.iter().map(|x| 2.0 * x + 0.1).collect();
        assert!((pearson(&xs, &ys).unwrap() - 1.0).abs() < 1e-9);

        let inverse: Vec<f64> = xs.iter().map(|x| 1.0 - x).collect();
        assert!((pearson(&xs, &inverse).unwrap() + 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_pearson_constant_columns_fail() {
        assert!(matches!(
            pearson(&[0.3, 0.3, 0.3], &[0.1, 0.2, 0.3]),
            Err(Error::ZeroVariance("DCI"))
        ));
        assert!(matches!(
            pearson(&[0.1, 0.2], &[0.5, 0.5]),
            Err(Error::ZeroVariance("MCI_Afferent"))
        ));
    }

    #[test]
    fn test_pearson_needs_two_rows() {
        assert!(matches!(
            pearson(&[0.1], &[0.2]),
            Err(Error::InsufficientData { required: 2, actual: 1 })
        ));
    }
}
