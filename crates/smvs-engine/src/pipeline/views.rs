//! Derived chart views. Pure functions of the fact pack and caller inputs.

use serde::{Deserialize, Serialize};
use smvs_core::constants::{CURVE_DECAY_BASE, CURVE_DECAY_RATE};

use super::input::PriceBand;
use crate::priors::Region;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureWeight {
    pub feature: String,
    pub weight: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RegionalView {
    pub region: Region,
    /// Caller weight as supplied.
    pub weight: f64,
    pub demand: f64,
    pub optimal_price: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PricePoint {
    pub price: f64,
    pub demand: f64,
}

/// Geometric decay over the ordered feature list: 1, decay, decay², …,
/// never below `floor`. Independent of the posteriors.
pub fn feature_importance(features: &[String], decay: f64, floor: f64) -> Vec<FeatureWeight> {
    let mut weight = 1.0_f64;
    features
        .iter()
        .map(|feature| {
            let w = weight.max(floor);
            weight *= decay;
            FeatureWeight {
                feature: feature.clone(),
                weight: w,
            }
        })
        .collect()
}

/// Scale demand by `0.8 + 0.4·w` (clamped to [0, 1]) and price by `0.9 + 0.2·w`.
pub fn regional_breakdown(
    weights: &[(Region, f64)],
    demand: f64,
    optimal_price: f64,
) -> Vec<RegionalView> {
    weights
        .iter()
        .map(|(region, w)| RegionalView {
            region: *region,
            weight: *w,
            demand: (demand * (0.8 + 0.4 * w)).clamp(0.0, 1.0),
            optimal_price: optimal_price * (0.9 + 0.2 * w),
        })
        .collect()
}

/// `points` equally spaced prices over `[min, max]`; demand decays as
/// `base·0.9^(5·(price/target − 1))`, clamped to [0, 1].
pub fn price_curve(band: &PriceBand, base_demand: f64, points: usize) -> Vec<PricePoint> {
    let points = points.max(2);
    let step = (band.max - band.min) / (points - 1) as f64;
    (0..points)
        .map(|i| {
            let price = if i == points - 1 {
                band.max
            } else {
                band.min + step * i as f64
            };
            PricePoint {
                price,
                demand: demand_at(price, band.target, base_demand),
            }
        })
        .collect()
}

fn demand_at(price: f64, target: f64, base_demand: f64) -> f64 {
    let exponent = CURVE_DECAY_RATE * (price / target - 1.0);
    (base_demand * CURVE_DECAY_BASE.powf(exponent)).clamp(0.0, 1.0)
}
