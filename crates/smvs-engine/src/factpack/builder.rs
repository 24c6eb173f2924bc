//! FactPackBuilder: the single orchestration entry point.
//!
//! priors → pooled priors → calibration → three posteriors → identity
//! adjustment → overall confidence → verdict → pricing → integrity stamp.
//! Upstream failures propagate; a pack is either complete or not returned.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use smvs_core::constants::FACT_PACK_VERSION;
use smvs_core::errors::{EngineResult, InputError};
use smvs_core::EngineConfig;
use tracing::{debug, info, warn};

use super::decision::{overall_confidence, DecisionPolicy, Verdict};
use super::integrity::{classification_code, fact_pack_hash, report_id};
use super::pricing::Pricing;
use super::types::{
    BayesianFactPack, FactPackMeta, IdentityBlock, InferenceMode, Integrity, Posteriors, Summary,
};
use crate::calibration::{
    aggregate, normalize_batches, AggregatedCalibration, CalibrationBatch, TrackedFeature,
};
use crate::identity::{IdentityAdjustment, IdentityProfile, IdentitySignals};
use crate::posterior::{PosteriorCalculator, PosteriorFeature};
use crate::priors::{PooledPriors, PriorRepository, Region};

/// Inputs of one build.
#[derive(Debug, Clone)]
pub struct BuildRequest {
    pub category: String,
    pub regions: Vec<Region>,
    /// Optional pooling weights, echoed back in the pack.
    pub region_weights: Option<BTreeMap<Region, f64>>,
    pub target_price: f64,
    /// `None` falls back to the pooled regional identity weights.
    pub identity: Option<IdentitySignals>,
    pub calibration: Vec<CalibrationBatch>,
    pub mode: InferenceMode,
    /// Fixed timestamp for reproducible ids and hashes; `None` uses now.
    pub generated_at: Option<DateTime<Utc>>,
}

impl BuildRequest {
    pub fn new(category: impl Into<String>, regions: Vec<Region>, target_price: f64) -> Self {
        Self {
            category: category.into(),
            regions,
            region_weights: None,
            target_price,
            identity: None,
            calibration: Vec::new(),
            mode: InferenceMode::PriorsOnly,
            generated_at: None,
        }
    }

    pub fn with_region_weights(mut self, weights: BTreeMap<Region, f64>) -> Self {
        self.region_weights = Some(weights);
        self
    }

    pub fn with_identity(mut self, identity: IdentitySignals) -> Self {
        self.identity = Some(identity);
        self
    }

    /// Attach calibration batches. Switches a PRIORS_ONLY request to CALIBRATED.
    pub fn with_calibration(mut self, batches: Vec<CalibrationBatch>) -> Self {
        self.calibration.extend(batches);
        if self.mode == InferenceMode::PriorsOnly {
            self.mode = InferenceMode::Calibrated;
        }
        self
    }

    pub fn with_mode(mut self, mode: InferenceMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn generated_at(mut self, at: DateTime<Utc>) -> Self {
        self.generated_at = Some(at);
        self
    }
}

/// Stateless across calls; one builder can serve any number of builds.
#[derive(Debug, Clone)]
pub struct FactPackBuilder {
    config: EngineConfig,
    repository: PriorRepository,
    calculator: PosteriorCalculator,
    decision: DecisionPolicy,
}

impl FactPackBuilder {
    /// Builder over the built-in prior sets.
    pub fn new(config: EngineConfig) -> EngineResult<Self> {
        let repository = PriorRepository::builtin()?;
        Ok(Self::with_repository(config, repository))
    }

    pub fn with_repository(config: EngineConfig, repository: PriorRepository) -> Self {
        let calculator = PosteriorCalculator::new(&config.sharpness);
        let decision = DecisionPolicy::new(&config.decision);
        Self {
            config,
            repository,
            calculator,
            decision,
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn repository(&self) -> &PriorRepository {
        &self.repository
    }

    pub fn decision_policy(&self) -> &DecisionPolicy {
        &self.decision
    }

    pub fn build(&self, request: &BuildRequest) -> EngineResult<BayesianFactPack> {
        let target_price = request.target_price;
        if !target_price.is_finite() || target_price <= 0.0 {
            return Err(InputError::InvalidTargetPrice {
                price: target_price,
            }
            .into());
        }

        let set = self.repository.load_priors(&request.category)?;
        let pooled = PooledPriors::pool(set, &request.regions, request.region_weights.as_ref())?;
        let profile =
            IdentityProfile::resolve(request.identity, pooled.identity, &self.config.identity)?;
        let (calibration, mode) = self.resolve_observations(set.category(), request);

        let posteriors = Posteriors {
            demand_trial: self.posterior(TrackedFeature::DemandTrial, &pooled, &calibration)?,
            premium_accept: self.posterior(TrackedFeature::PremiumAccept, &pooled, &calibration)?,
            online_share: self.posterior(TrackedFeature::OnlineShare, &pooled, &calibration)?,
        };

        // Only demand-trial is identity-weighted.
        let raw_demand = posteriors.demand_trial.mean;
        let identity = IdentityBlock {
            profile,
            adjustment_factor: IdentityAdjustment::factor(&profile),
            raw_demand,
            adjusted_demand: IdentityAdjustment::adjust(raw_demand, &profile),
        };

        let confidence = overall_confidence(posteriors.sharpness_scores());
        let verdict = self.decision.decide(confidence);
        let summary = Summary {
            actionable: verdict == Verdict::Go,
            overall_confidence: confidence,
            recommended_action: verdict,
            reasoning: format!(
                "{} Overall confidence {:.2}.",
                DecisionPolicy::reasoning(verdict),
                confidence
            ),
        };

        let pricing = Pricing::compute(target_price, posteriors.premium_accept.mean);

        let prior_tier = TrackedFeature::ALL
            .iter()
            .map(|f| pooled.priors.get(*f).tier)
            .fold(set.tier, |acc, t| acc.min(t));
        let regions: Vec<Region> = pooled.regions.iter().map(|(r, _)| *r).collect();
        let generated_at = request.generated_at.unwrap_or_else(Utc::now);

        let meta = FactPackMeta {
            version: FACT_PACK_VERSION.to_string(),
            report_id: report_id(set.category(), &regions, target_price, &generated_at),
            category: set.category().to_string(),
            regions,
            generated_at,
            inference_mode: mode,
            prior_version: set.version.clone(),
            prior_source: set.source.clone(),
            prior_tier,
        };

        let mut pack = BayesianFactPack {
            meta,
            identity,
            posteriors,
            summary,
            pricing,
            integrity: Integrity {
                content_hash: String::new(),
                classification_code: classification_code(
                    prior_tier,
                    self.decision.grade(confidence),
                ),
            },
            region_weights: request.region_weights.clone(),
        };
        pack.integrity.content_hash = fact_pack_hash(&pack)?;

        info!(
            category = %pack.meta.category,
            mode = %mode,
            confidence,
            verdict = %verdict,
            "fact pack built"
        );
        Ok(pack)
    }

    fn posterior(
        &self,
        feature: TrackedFeature,
        pooled: &PooledPriors,
        calibration: &AggregatedCalibration,
    ) -> Result<PosteriorFeature, InputError> {
        let prior = pooled.priors.get(feature).distribution;
        self.calculator.update_feature(feature, &prior, calibration)
    }

    /// Normalize and aggregate batches for the requested mode, degrading to
    /// PRIORS_ONLY when nothing usable survives.
    fn resolve_observations(
        &self,
        category: &str,
        request: &BuildRequest,
    ) -> (AggregatedCalibration, InferenceMode) {
        if !request.mode.uses_observations() {
            if !request.calibration.is_empty() {
                debug!(
                    category,
                    batches = request.calibration.len(),
                    "PRIORS_ONLY build ignores calibration batches"
                );
            }
            return (AggregatedCalibration::default(), InferenceMode::PriorsOnly);
        }

        let normalized = normalize_batches(&request.calibration);
        if !normalized.is_clean() {
            debug!(category, dropped = normalized.dropped.len(), "calibration rows dropped");
        }
        let calibration = aggregate(&normalized.data);
        if calibration.total_trials() == 0 {
            warn!(
                category,
                mode = %request.mode,
                "no usable calibration observations, using PRIORS_ONLY"
            );
            return (AggregatedCalibration::default(), InferenceMode::PriorsOnly);
        }
        (calibration, request.mode)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calibration::{CalibrationSource, ColumnMapping};
    use crate::priors::DataTier;
    use chrono::TimeZone;
    use smvs_core::EngineError;

    fn builder() -> FactPackBuilder {
        FactPackBuilder::new(EngineConfig::default()).unwrap()
    }

    fn fixed_time() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 3, 1, 12, 0, 0).unwrap()
    }

    fn demand_batch(trials: u64, successes: u64) -> CalibrationBatch {
        CalibrationBatch::new(ColumnMapping {
            trials_column: "n".to_string(),
            successes_column: "k".to_string(),
            feature: TrackedFeature::DemandTrial,
            source: CalibrationSource::Survey,
        })
        .with_counts(trials, successes)
    }

    #[test]
    fn test_priors_only_build() {
        let req = BuildRequest::new("HEALTH_SUPPLEMENTS", vec![Region::SaudiArabia], 300.0)
            .generated_at(fixed_time());
        let pack = builder().build(&req).unwrap();
        assert_eq!(pack.meta.inference_mode, InferenceMode::PriorsOnly);
        assert_eq!(pack.meta.version, "bfp/1.0");
        assert!(pack.posteriors.iter().all(|p| p.tier == DataTier::Estimated));
        assert!(pack.verify_integrity());
    }

    #[test]
    fn test_calibrated_without_data_degrades() {
        let req = BuildRequest::new("HEALTH_SUPPLEMENTS", vec![Region::Kuwait], 200.0)
            .with_mode(InferenceMode::Calibrated)
            .with_calibration(vec![demand_batch(10, 20)]);
        let pack = builder().build(&req).unwrap();
        assert_eq!(pack.meta.inference_mode, InferenceMode::PriorsOnly);
        assert_eq!(pack.posteriors.demand_trial.calibration_count, 0);
    }

    #[test]
    fn test_priors_only_ignores_batches() {
        let req = BuildRequest::new("HEALTH_SUPPLEMENTS", vec![Region::Kuwait], 200.0)
            .with_calibration(vec![demand_batch(100, 40)])
            .with_mode(InferenceMode::PriorsOnly);
        let pack = builder().build(&req).unwrap();
        assert_eq!(pack.posteriors.demand_trial.calibration_count, 0);
    }

    #[test]
    fn test_calibration_absorbed() {
        let req = BuildRequest::new("HEALTH_SUPPLEMENTS", vec![Region::Kuwait], 200.0)
            .with_calibration(vec![demand_batch(100, 40)]);
        let pack = builder().build(&req).unwrap();
        assert_eq!(pack.meta.inference_mode, InferenceMode::Calibrated);
        assert_eq!(pack.posteriors.demand_trial.calibration_count, 100);
        assert_eq!(pack.posteriors.demand_trial.tier, DataTier::Real);
        assert_eq!(pack.posteriors.premium_accept.calibration_count, 0);
    }

    #[test]
    fn test_fixed_timestamp_reproducible() {
        let req = BuildRequest::new("FOOD_BEVERAGE", vec![Region::Oman, Region::Qatar], 45.0)
            .generated_at(fixed_time());
        let b = builder();
        let first = b.build(&req).unwrap();
        let second = b.build(&req).unwrap();
        assert_eq!(first, second);
        assert_eq!(first.integrity.content_hash, second.integrity.content_hash);
    }

    #[test]
    fn test_hash_covers_classification_code() {
        let req = BuildRequest::new("HEALTH_SUPPLEMENTS", vec![Region::SaudiArabia], 300.0)
            .generated_at(fixed_time());
        let mut pack = builder().build(&req).unwrap();
        assert!(pack.verify_integrity());
        pack.integrity.classification_code = "R-A".to_string();
        assert!(!pack.verify_integrity());
    }

    #[test]
    fn test_invalid_target_price() {
        let req = BuildRequest::new("HEALTH_SUPPLEMENTS", vec![Region::Kuwait], 0.0);
        assert!(matches!(
            builder().build(&req),
            Err(EngineError::Input(InputError::InvalidTargetPrice { .. }))
        ));
    }

    #[test]
    fn test_identity_fallback_to_region() {
        let req = BuildRequest::new("HEALTH_SUPPLEMENTS", vec![Region::Bahrain], 120.0);
        let pack = builder().build(&req).unwrap();
        assert_eq!(
            pack.identity.profile.blend_method,
            crate::identity::BlendMethod::RegionalPrior
        );
        assert!(pack.identity.adjusted_demand >= pack.identity.raw_demand);
    }

    #[test]
    fn test_classification_code_matches_tier_and_grade() {
        let req = BuildRequest::new("SAAS_B2B", vec![Region::UnitedArabEmirates], 900.0);
        let b = builder();
        let pack = b.build(&req).unwrap();
        let grade = b.decision_policy().grade(pack.summary.overall_confidence);
        assert_eq!(pack.integrity.classification_code, format!("I-{grade}"));
    }
}
