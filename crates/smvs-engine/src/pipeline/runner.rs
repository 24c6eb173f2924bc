//! SmvsPipeline: end-to-end run over one `SmvsInput`.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use smvs_core::errors::{EngineResult, InputError};
use smvs_core::EngineConfig;
use tracing::debug;

use super::input::SmvsInput;
use super::views::{
    feature_importance, price_curve, regional_breakdown, FeatureWeight, PricePoint, RegionalView,
};
use crate::factpack::{BayesianFactPack, BuildRequest, FactPackBuilder};
use crate::priors::{PriorRepository, Region};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SmvsResult {
    pub fact_pack: BayesianFactPack,
    pub regional: Vec<RegionalView>,
    pub feature_importance: Vec<FeatureWeight>,
    pub price_curve: Vec<PricePoint>,
}

#[derive(Debug, Clone)]
pub struct SmvsPipeline {
    builder: FactPackBuilder,
}

impl SmvsPipeline {
    pub fn new(config: EngineConfig) -> EngineResult<Self> {
        Ok(Self {
            builder: FactPackBuilder::new(config)?,
        })
    }

    pub fn with_repository(config: EngineConfig, repository: PriorRepository) -> Self {
        Self {
            builder: FactPackBuilder::with_repository(config, repository),
        }
    }

    pub fn builder(&self) -> &FactPackBuilder {
        &self.builder
    }

    /// Validate the input, build the fact pack once, then derive the views.
    pub fn run(&self, input: &SmvsInput) -> EngineResult<SmvsResult> {
        let band = input.price_band.checked()?;

        let weights = parse_region_weights(&input.region_weights)?;
        let weight_map: BTreeMap<Region, f64> = weights.iter().copied().collect();

        let mut request = BuildRequest::new(
            input.category.clone(),
            weights.iter().map(|(r, _)| *r).collect(),
            band.target,
        )
        .with_region_weights(weight_map)
        .with_calibration(input.calibration.clone());
        if let Some(mode) = input.mode {
            request = request.with_mode(mode);
        }
        if let Some(identity) = input.identity {
            request = request.with_identity(identity);
        }
        if let Some(at) = input.generated_at {
            request = request.generated_at(at);
        }

        let fact_pack = self.builder.build(&request)?;

        let pipeline = &self.builder.config().pipeline;
        let demand = fact_pack.adjusted_demand();
        let regional = regional_breakdown(&weights, demand, fact_pack.pricing.optimal_price);
        if let Some(view) = regional.iter().find(|v| !v.optimal_price.is_finite()) {
            return Err(InputError::InvalidRegionWeight {
                region: view.region.code().to_string(),
                value: view.weight,
            }
            .into());
        }
        let feature_importance = feature_importance(
            &input.features,
            pipeline.effective_feature_decay(),
            pipeline.effective_feature_floor(),
        );
        let price_curve = price_curve(&band, demand, pipeline.effective_curve_points());

        debug!(
            category = %fact_pack.meta.category,
            regions = regional.len(),
            features = feature_importance.len(),
            "pipeline views derived"
        );

        Ok(SmvsResult {
            fact_pack,
            regional,
            feature_importance,
            price_curve,
        })
    }
}

/// Parse region codes, rejecting two codes that name the same region.
fn parse_region_weights(raw: &BTreeMap<String, f64>) -> EngineResult<Vec<(Region, f64)>> {
    let mut weights: Vec<(Region, f64)> = Vec::with_capacity(raw.len());
    for (code, w) in raw {
        let region = code.parse::<Region>()?;
        if weights.iter().any(|(r, _)| *r == region) {
            return Err(InputError::DuplicateRegion {
                region: region.code().to_string(),
                code: code.clone(),
            }
            .into());
        }
        weights.push((region, *w));
    }
    Ok(weights)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::PriceBand;
    use smvs_core::errors::{InputError, PriorError};
    use smvs_core::EngineError;

    fn pipeline() -> SmvsPipeline {
        SmvsPipeline::new(EngineConfig::default()).unwrap()
    }

    #[test]
    fn test_run_produces_views() {
        let input = SmvsInput::new("BEAUTY_PERSONAL_CARE", PriceBand::new(80.0, 120.0, 160.0))
            .with_region("SA", 0.6)
            .with_region("AE", 0.4)
            .with_features(["serum", "packaging", "scent"]);
        let result = pipeline().run(&input).unwrap();
        assert_eq!(result.regional.len(), 2);
        assert_eq!(result.feature_importance.len(), 3);
        assert_eq!(result.price_curve.len(), 11);
        assert_eq!(result.fact_pack.region_weights.as_ref().map(|w| w.len()), Some(2));
    }

    #[test]
    fn test_bad_region_code() {
        let input = SmvsInput::new("BEAUTY_PERSONAL_CARE", PriceBand::new(80.0, 120.0, 160.0))
            .with_region("EG", 1.0);
        assert!(matches!(
            pipeline().run(&input),
            Err(EngineError::Prior(PriorError::InvalidRegion { .. }))
        ));
    }

    #[test]
    fn test_empty_regions() {
        let input = SmvsInput::new("BEAUTY_PERSONAL_CARE", PriceBand::new(80.0, 120.0, 160.0));
        assert!(matches!(
            pipeline().run(&input),
            Err(EngineError::Input(InputError::NoRegions))
        ));
    }

    #[test]
    fn test_region_codes_differing_in_case_rejected() {
        let input = SmvsInput::new("HEALTH_SUPPLEMENTS", PriceBand::new(100.0, 150.0, 200.0))
            .with_region("SA", 0.9)
            .with_region("sa", 0.1);
        let err = pipeline().run(&input).unwrap_err();
        assert!(matches!(
            &err,
            EngineError::Input(InputError::DuplicateRegion { region, .. }) if region == "SA"
        ));
    }

    #[test]
    fn test_huge_region_weights_rejected_not_nan() {
        let input = SmvsInput::new("HEALTH_SUPPLEMENTS", PriceBand::new(100.0, 150.0, 200.0))
            .with_region("SA", 1e308)
            .with_region("AE", 1e308);
        match pipeline().run(&input) {
            Err(EngineError::Input(InputError::InvalidRegionWeight { value, .. })) => {
                assert_eq!(value, 1e308);
            }
            other => panic!("expected InvalidRegionWeight, got {other:?}"),
        }
    }

    #[test]
    fn test_large_equal_weights_pool_like_unit_weights() {
        let build = |w: f64| {
            let regions = vec![Region::SaudiArabia, Region::UnitedArabEmirates];
            let weights = regions.iter().map(|r| (*r, w)).collect();
            let request = BuildRequest::new("HEALTH_SUPPLEMENTS", regions, 150.0)
                .with_region_weights(weights);
            pipeline().builder().build(&request).unwrap()
        };
        let huge = build(1e308);
        let unit = build(1.0);
        let (a, b) = (&huge.posteriors.demand_trial, &unit.posteriors.demand_trial);
        assert!((a.mean - b.mean).abs() < 1e-12);
        assert!(a.credible_interval_95.0 <= a.credible_interval_95.1);
        assert!(huge.pricing.optimal_price.is_finite());
    }

    #[test]
    fn test_curve_points_from_config() {
        let config = EngineConfig::from_toml("[pipeline]\ncurve_points = 5\n").unwrap();
        let p = SmvsPipeline::new(config).unwrap();
        let input = SmvsInput::new("SAAS_B2B", PriceBand::new(500.0, 800.0, 1200.0))
            .with_region("KW", 1.0);
        assert_eq!(p.run(&input).unwrap().price_curve.len(), 5);
    }
}
