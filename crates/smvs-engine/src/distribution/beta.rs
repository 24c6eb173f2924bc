//! Beta distribution arithmetic.
//!
//! Mean: α / (α + β).
//! Variance: αβ / ((α+β)² (α+β+1)).
//! 95% credible interval: normal approximation `mean ± 1.96·sd`, clamped to [0, 1].
//! The approximation degrades when α or β < ~5; callers tolerate the wider,
//! less accurate interval for weak priors. `exact_credible_interval` exists
//! for diagnostics only and is never substituted.

use serde::{Deserialize, Serialize};
use smvs_core::errors::InputError;
use statrs::distribution::{Beta, ContinuousCDF};

/// Two-sided 95% normal quantile.
pub const Z_95: f64 = 1.96;

/// Belief over a probability in [0, 1]. Invariant: both parameters finite and > 0.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BetaDistribution {
    pub alpha: f64,
    pub beta: f64,
}

impl BetaDistribution {
    /// Construct a distribution, rejecting non-positive or non-finite parameters.
    pub fn new(alpha: f64, beta: f64) -> Result<Self, InputError> {
        if !(alpha.is_finite() && beta.is_finite() && alpha > 0.0 && beta > 0.0) {
            return Err(InputError::InvalidDistribution { alpha, beta });
        }
        Ok(Self { alpha, beta })
    }

    /// Uniform Beta(1, 1).
    pub fn uniform() -> Self {
        Self {
            alpha: 1.0,
            beta: 1.0,
        }
    }

    /// Total pseudo-observations, α + β.
    pub fn concentration(&self) -> f64 {
        self.alpha + self.beta
    }

    pub fn mean(&self) -> f64 {
        (self.alpha / self.concentration()).clamp(0.0, 1.0)
    }

    pub fn variance(&self) -> f64 {
        let sum = self.concentration();
        let var = (self.alpha * self.beta) / (sum * sum * (sum + 1.0));
        if var.is_finite() {
            var.max(0.0)
        } else {
            0.0
        }
    }

    pub fn std_dev(&self) -> f64 {
        self.variance().sqrt()
    }

    /// Standard deviation normalized by the Bernoulli spread at the mean,
    /// `sd / sqrt(mean·(1−mean))`, which reduces to `1 / sqrt(α+β+1)`.
    pub fn relative_std_dev(&self) -> f64 {
        1.0 / (self.concentration() + 1.0).sqrt()
    }

    /// 95% credible interval via normal approximation.
    pub fn credible_interval_95(&self) -> (f64, f64) {
        credible_interval_95(self.mean(), self.std_dev())
    }

    /// Conjugate update with binomial evidence.
    ///
    /// Posterior: Beta(α + k, β + n − k). Rejects `successes > trials`.
    pub fn conjugate_update(&self, trials: u64, successes: u64) -> Result<Self, InputError> {
        if successes > trials {
            return Err(InputError::InvalidObservation {
                trials: trials as f64,
                successes: successes as f64,
            });
        }
        Ok(Self {
            alpha: self.alpha + successes as f64,
            beta: self.beta + (trials - successes) as f64,
        })
    }

    /// True when either parameter is small enough that the normal
    /// approximation is known to be inaccurate.
    pub fn is_weak(&self, threshold: f64) -> bool {
        self.alpha < threshold || self.beta < threshold
    }
}

/// `mean ± 1.96·sd`, clamped to [0, 1].
pub fn credible_interval_95(mean: f64, std_dev: f64) -> (f64, f64) {
    let half = Z_95 * std_dev;
    let low = (mean - half).clamp(0.0, 1.0);
    let high = (mean + half).clamp(0.0, 1.0);
    (low, high)
}

/// Equal-tailed credible interval from the Beta inverse CDF.
///
/// Returns `(0, 1)` when `statrs` rejects the parameters and clamps
/// non-finite quantiles.
pub fn exact_credible_interval(dist: &BetaDistribution, level: f64) -> (f64, f64) {
    let tail = (1.0 - level) / 2.0;
    match Beta::new(dist.alpha, dist.beta) {
        Ok(beta) => {
            let low = beta.inverse_cdf(tail);
            let high = beta.inverse_cdf(1.0 - tail);
            let low = if low.is_finite() { low.clamp(0.0, 1.0) } else { 0.0 };
            let high = if high.is_finite() { high.clamp(0.0, 1.0) } else { 1.0 };
            (low, high)
        }
        Err(_) => (0.0, 1.0),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_non_positive_parameters() {
        assert!(BetaDistribution::new(0.0, 1.0).is_err());
        assert!(BetaDistribution::new(1.0, -2.0).is_err());
        assert!(BetaDistribution::new(f64::NAN, 1.0).is_err());
        assert!(BetaDistribution::new(f64::INFINITY, 1.0).is_err());
        assert!(BetaDistribution::new(0.5, 0.5).is_ok());
    }

    #[test]
    fn test_mean_and_variance() {
        let d = BetaDistribution::new(2.0, 2.0).unwrap();
        assert!((d.mean() - 0.5).abs() < 1e-12);
        // 4 / (16 * 5)
        assert!((d.variance() - 0.05).abs() < 1e-12);
    }

    #[test]
    fn test_relative_std_dev_matches_definition() {
        let d = BetaDistribution::new(3.0, 7.0).unwrap();
        let m = d.mean();
        let expected = d.std_dev() / (m * (1.0 - m)).sqrt();
        assert!((d.relative_std_dev() - expected).abs() < 1e-12);
    }

    #[test]
    fn test_interval_contains_mean_and_is_clamped() {
        let d = BetaDistribution::new(1.0, 30.0).unwrap();
        let (low, high) = d.credible_interval_95();
        assert_eq!(low, 0.0);
        assert!(low <= d.mean() && d.mean() <= high);
        assert!(high <= 1.0);
    }

    #[test]
    fn test_conjugate_update() {
        let prior = BetaDistribution::new(2.0, 2.0).unwrap();
        let post = prior.conjugate_update(200, 140).unwrap();
        assert_eq!(post.alpha, 142.0);
        assert_eq!(post.beta, 62.0);
    }

    #[test]
    fn test_conjugate_update_rejects_excess_successes() {
        let prior = BetaDistribution::uniform();
        let err = prior.conjugate_update(5, 6).unwrap_err();
        assert!(matches!(err, InputError::InvalidObservation { .. }));
    }

    #[test]
    fn test_conjugate_update_zero_trials_is_identity() {
        let prior = BetaDistribution::new(4.0, 6.0).unwrap();
        assert_eq!(prior.conjugate_update(0, 0).unwrap(), prior);
    }

    #[test]
    fn test_exact_interval_narrows_with_evidence() {
        let weak = BetaDistribution::new(2.0, 2.0).unwrap();
        let strong = BetaDistribution::new(20.0, 20.0).unwrap();
        let (l1, h1) = exact_credible_interval(&weak, 0.95);
        let (l2, h2) = exact_credible_interval(&strong, 0.95);
        assert!(h2 - l2 < h1 - l1);
    }

    #[test]
    fn test_normal_approximation_close_for_strong_prior() {
        let d = BetaDistribution::new(60.0, 40.0).unwrap();
        let (al, ah) = d.credible_interval_95();
        let (el, eh) = exact_credible_interval(&d, 0.95);
        assert!((al - el).abs() < 0.01);
        assert!((ah - eh).abs() < 0.01);
    }

    #[test]
    fn test_is_weak() {
        assert!(BetaDistribution::new(2.0, 10.0).unwrap().is_weak(5.0));
        assert!(!BetaDistribution::new(6.0, 10.0).unwrap().is_weak(5.0));
    }
}
