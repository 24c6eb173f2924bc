//! ReportAdapter: pure transformation into `ReportPayload`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use smvs_core::config::ReportConfig;
use smvs_core::constants::{INTERVAL_DIVERGENCE_TOLERANCE, REPORT_VERSION, WEAK_PRIOR_PARAMETER};
use smvs_core::errors::{EngineResult, InputError};

use super::narrative::{
    fact_pack_assumptions, fact_pack_limitations, legacy_assumptions, legacy_limitations, recommend,
};
use super::payload::{
    CalibrationBlock, IntervalCheck, ReportMetadata, ReportParams, ReportPayload, ReportResults,
};
use crate::distribution::exact_credible_interval;
use crate::factpack::integrity::report_id;
use crate::factpack::BayesianFactPack;
use crate::pipeline::SmvsResult;
use crate::priors::Region;

/// Pre-engine score pair: demand in [0, 1], confidence on 0-100.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LegacyScores {
    pub category: String,
    pub regions: Vec<Region>,
    pub demand_probability: f64,
    pub confidence: f64,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub target_price: Option<f64>,
}

impl LegacyScores {
    fn checked(&self) -> Result<(), InputError> {
        let invalid = |field: &str, value: f64, max: f64| InputError::InvalidScore {
            field: field.to_string(),
            value,
            max,
        };
        if !(0.0..=1.0).contains(&self.demand_probability) {
            return Err(invalid("demand_probability", self.demand_probability, 1.0));
        }
        if !(0.0..=100.0).contains(&self.confidence) {
            return Err(invalid("confidence", self.confidence, 100.0));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Default)]
pub struct ReportAdapter {
    config: ReportConfig,
}

impl ReportAdapter {
    pub fn new(config: &ReportConfig) -> Self {
        Self {
            config: config.clone(),
        }
    }

    pub fn from_fact_pack(&self, pack: &BayesianFactPack) -> EngineResult<ReportPayload> {
        let checks: Vec<IntervalCheck> = pack
            .posteriors
            .iter()
            .map(|p| {
                let approximate = p.credible_interval_95;
                let exact = exact_credible_interval(&p.distribution(), 0.95);
                IntervalCheck {
                    feature: p.feature,
                    approximate,
                    exact,
                    divergence: (approximate.0 - exact.0)
                        .abs()
                        .max((approximate.1 - exact.1).abs()),
                }
            })
            .collect();

        let confidence = pack.summary.overall_confidence;
        let demand = pack.adjusted_demand();

        let payload = ReportPayload {
            metadata: ReportMetadata {
                report_id: pack.meta.report_id,
                created_at: pack.meta.generated_at,
                version: REPORT_VERSION.to_string(),
                region: pack.meta.regions.clone(),
                category: pack.meta.category.clone(),
                hash: String::new(),
            },
            params: ReportParams {
                target_price: Some(pack.pricing.target_price),
                inference_mode: Some(pack.meta.inference_mode),
                prior_version: Some(pack.meta.prior_version.clone()),
                prior_tier: Some(pack.meta.prior_tier),
            },
            results: ReportResults {
                demand_probability: demand,
                dispersion: Some(pack.posteriors.demand_trial.distribution().std_dev()),
                confidence_score: confidence_score(confidence),
                sharpness: pack.posteriors.demand_trial.sharpness,
                optimal_price: Some(pack.pricing.optimal_price),
                price_curve: None,
                segments: None,
            },
            calibration: CalibrationBlock {
                limitations: fact_pack_limitations(
                    pack,
                    &checks,
                    WEAK_PRIOR_PARAMETER,
                    INTERVAL_DIVERGENCE_TOLERANCE,
                ),
                assumptions: fact_pack_assumptions(pack),
                interval_checks: checks,
                recommendation: recommend(confidence, demand, &self.config),
            },
        };
        stamp(payload)
    }

    /// Fact-pack payload plus the pipeline's curve and regional segments.
    pub fn from_result(&self, result: &SmvsResult) -> EngineResult<ReportPayload> {
        let mut payload = self.from_fact_pack(&result.fact_pack)?;
        payload.results.price_curve = Some(result.price_curve.clone());
        payload.results.segments = Some(result.regional.clone());
        stamp(payload)
    }

    pub fn from_legacy(&self, legacy: &LegacyScores) -> EngineResult<ReportPayload> {
        legacy.checked()?;
        let confidence = legacy.confidence / 100.0;
        let demand = legacy.demand_probability;

        let payload = ReportPayload {
            metadata: ReportMetadata {
                report_id: report_id(
                    &legacy.category,
                    &legacy.regions,
                    legacy.target_price.unwrap_or(0.0),
                    &legacy.created_at,
                ),
                created_at: legacy.created_at,
                version: REPORT_VERSION.to_string(),
                region: legacy.regions.clone(),
                category: legacy.category.clone(),
                hash: String::new(),
            },
            params: ReportParams {
                target_price: legacy.target_price,
                inference_mode: None,
                prior_version: None,
                prior_tier: None,
            },
            results: ReportResults {
                demand_probability: demand,
                dispersion: None,
                confidence_score: confidence_score(confidence),
                sharpness: confidence,
                optimal_price: None,
                price_curve: None,
                segments: None,
            },
            calibration: CalibrationBlock {
                limitations: legacy_limitations(),
                assumptions: legacy_assumptions(),
                interval_checks: Vec::new(),
                recommendation: recommend(confidence, demand, &self.config),
            },
        };
        stamp(payload)
    }
}

fn confidence_score(confidence: f64) -> u8 {
    if confidence.is_nan() {
        return 0;
    }
    (confidence.clamp(0.0, 1.0) * 100.0).round() as u8
}

fn stamp(mut payload: ReportPayload) -> EngineResult<ReportPayload> {
    payload.metadata.hash = payload.compute_hash()?;
    tracing::debug!(
        category = %payload.metadata.category,
        verdict = %payload.calibration.recommendation.verdict,
        hash = %payload.metadata.hash,
        "report payload stamped"
    );
    Ok(payload)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::factpack::{BuildRequest, FactPackBuilder, Verdict};
    use chrono::TimeZone;
    use smvs_core::EngineConfig;

    fn ts() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 5, 4, 8, 0, 0).unwrap()
    }

    fn pack() -> BayesianFactPack {
        FactPackBuilder::new(EngineConfig::default())
            .unwrap()
            .build(
                &BuildRequest::new("HEALTH_SUPPLEMENTS", vec![Region::SaudiArabia], 300.0)
                    .generated_at(ts()),
            )
            .unwrap()
    }

    #[test]
    fn test_hash_repeatable() {
        let adapter = ReportAdapter::default();
        let p = pack();
        let a = adapter.from_fact_pack(&p).unwrap();
        let b = adapter.from_fact_pack(&p).unwrap();
        assert_eq!(a.metadata.hash, b.metadata.hash);
        assert!(a.verify_hash());
        assert_eq!(a.metadata.version, "smvs-report/1.0");
    }

    #[test]
    fn test_priors_only_limitation() {
        let payload = ReportAdapter::default().from_fact_pack(&pack()).unwrap();
        assert!(payload
            .calibration
            .limitations
            .iter()
            .any(|l| l.contains("No calibration data")));
        assert_eq!(payload.calibration.interval_checks.len(), 3);
    }

    #[test]
    fn test_legacy_normalizes_confidence() {
        let legacy = LegacyScores {
            category: "HEALTH_SUPPLEMENTS".to_string(),
            regions: vec![Region::Qatar],
            demand_probability: 0.55,
            confidence: 82.0,
            created_at: ts(),
            target_price: None,
        };
        let payload = ReportAdapter::default().from_legacy(&legacy).unwrap();
        assert_eq!(payload.results.confidence_score, 82);
        assert_eq!(payload.calibration.recommendation.verdict, Verdict::Go);
        assert!(payload.verify_hash());
    }

    #[test]
    fn test_legacy_out_of_range_rejected() {
        let legacy = LegacyScores {
            category: "HEALTH_SUPPLEMENTS".to_string(),
            regions: vec![Region::Qatar],
            demand_probability: 0.55,
            confidence: 140.0,
            created_at: ts(),
            target_price: None,
        };
        assert!(ReportAdapter::default().from_legacy(&legacy).is_err());
    }

    #[test]
    fn test_tampered_payload_fails_verification() {
        let mut payload = ReportAdapter::default().from_fact_pack(&pack()).unwrap();
        payload.results.demand_probability += 0.01;
        assert!(!payload.verify_hash());
    }
}
