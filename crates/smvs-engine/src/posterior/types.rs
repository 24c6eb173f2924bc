//! Posterior feature type.

use serde::{Deserialize, Serialize};

use crate::calibration::TrackedFeature;
use crate::distribution::BetaDistribution;
use crate::priors::DataTier;

/// Posterior belief about one tracked feature. Recomputed per build,
/// never mutated in place.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PosteriorFeature {
    pub feature: TrackedFeature,
    /// Posterior mean in [0, 1].
    pub mean: f64,
    /// 95% credible interval, `0 <= low <= high <= 1`.
    pub credible_interval_95: (f64, f64),
    /// Confidence in [0, 1].
    pub sharpness: f64,
    pub alpha: f64,
    pub beta: f64,
    /// Calibration trials absorbed into this posterior.
    pub calibration_count: u64,
    pub tier: DataTier,
}

impl PosteriorFeature {
    pub fn distribution(&self) -> BetaDistribution {
        BetaDistribution {
            alpha: self.alpha,
            beta: self.beta,
        }
    }

    pub fn interval_width(&self) -> f64 {
        self.credible_interval_95.1 - self.credible_interval_95.0
    }

    pub fn is_calibrated(&self) -> bool {
        self.calibration_count > 0
    }
}
