//! Posterior calculator.
//!
//! No observation (absent or zero trials): the prior's own mean and interval,
//! tier ESTIMATED, baseline sharpness.
//! Observation: conjugate update, tier REAL when the data carried a named
//! external source (else ESTIMATED), sharpness from shrinkage.

use smvs_core::config::SharpnessConfig;
use smvs_core::errors::InputError;

use super::sharpness::SharpnessModel;
use super::types::PosteriorFeature;
use crate::calibration::{AggregatedCalibration, TrackedFeature};
use crate::distribution::BetaDistribution;
use crate::priors::DataTier;

#[derive(Debug, Clone, Copy, Default)]
pub struct PosteriorCalculator {
    sharpness: SharpnessModel,
}

impl PosteriorCalculator {
    pub fn new(config: &SharpnessConfig) -> Self {
        Self {
            sharpness: SharpnessModel::new(config),
        }
    }

    pub fn sharpness_model(&self) -> &SharpnessModel {
        &self.sharpness
    }

    /// Update one feature's prior with whatever calibration exists for it.
    pub fn update_feature(
        &self,
        feature: TrackedFeature,
        prior: &BetaDistribution,
        calibration: &AggregatedCalibration,
    ) -> Result<PosteriorFeature, InputError> {
        let observation = calibration.get(feature).filter(|d| d.trials > 0);

        let Some(obs) = observation else {
            let sharpness = self.sharpness.baseline(prior);
            tracing::debug!(%feature, sharpness, "posterior from prior only");
            return Ok(PosteriorFeature {
                feature,
                mean: prior.mean(),
                credible_interval_95: prior.credible_interval_95(),
                sharpness,
                alpha: prior.alpha,
                beta: prior.beta,
                calibration_count: 0,
                tier: DataTier::Estimated,
            });
        };

        let posterior = prior.conjugate_update(obs.trials, obs.successes)?;
        let sharpness = self.sharpness.calibrated(prior, &posterior);
        let tier = if obs.source.is_named_external() {
            DataTier::Real
        } else {
            DataTier::Estimated
        };
        tracing::debug!(
            %feature,
            trials = obs.trials,
            successes = obs.successes,
            source = %obs.source,
            sharpness,
            "posterior from calibration"
        );

        Ok(PosteriorFeature {
            feature,
            mean: posterior.mean(),
            credible_interval_95: posterior.credible_interval_95(),
            sharpness,
            alpha: posterior.alpha,
            beta: posterior.beta,
            calibration_count: obs.trials,
            tier,
        })
    }
}
