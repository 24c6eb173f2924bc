//! Sharpness: how much belief about a feature has been tightened.
//!
//! Prior only: `floor + (ceiling − floor)·(1 − exp(−(α+β)/scale))`, a
//! saturating curve in prior strength kept inside [floor, ceiling].
//!
//! With calibration: `baseline + (1 − baseline)·shrinkage` where
//! `shrinkage = 1 − rsd_post / rsd_prior` and `rsd` is the standard
//! deviation normalized by `sqrt(mean·(1−mean))`. Normalizing removes the
//! dependence on where the observed rate lands, so sharpness never drops as
//! more trials arrive.

use smvs_core::config::SharpnessConfig;

use crate::distribution::BetaDistribution;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SharpnessModel {
    floor: f64,
    ceiling: f64,
    scale: f64,
}

impl SharpnessModel {
    pub fn new(config: &SharpnessConfig) -> Self {
        Self {
            floor: config.effective_baseline_floor(),
            ceiling: config.effective_baseline_ceiling(),
            scale: config.effective_baseline_scale(),
        }
    }

    /// Sharpness of a prior with no calibration data.
    pub fn baseline(&self, prior: &BetaDistribution) -> f64 {
        let strength = prior.concentration().max(0.0);
        let saturation = 1.0 - (-strength / self.scale).exp();
        let value = self.floor + (self.ceiling - self.floor) * saturation;
        if value.is_finite() {
            value.max(self.floor).min(self.ceiling)
        } else {
            self.floor
        }
    }

    /// Fraction by which the normalized standard deviation shrank, in [0, 1].
    pub fn shrinkage(prior: &BetaDistribution, posterior: &BetaDistribution) -> f64 {
        let before = prior.relative_std_dev();
        let after = posterior.relative_std_dev();
        if !(before.is_finite() && after.is_finite()) || before <= 0.0 {
            return 0.0;
        }
        (1.0 - after / before).clamp(0.0, 1.0)
    }

    /// Sharpness of a calibrated posterior, clamped to [0, 1].
    pub fn calibrated(&self, prior: &BetaDistribution, posterior: &BetaDistribution) -> f64 {
        let base = self.baseline(prior);
        let value = base + (1.0 - base) * Self::shrinkage(prior, posterior);
        if value.is_finite() {
            value.clamp(0.0, 1.0)
        } else {
            base
        }
    }
}

impl Default for SharpnessModel {
    fn default() -> Self {
        Self::new(&SharpnessConfig::default())
    }
}
