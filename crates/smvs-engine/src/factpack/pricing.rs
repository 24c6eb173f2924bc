//! Pricing recommendation from premium tolerance.
//!
//! `optimal = target × (0.9 + 0.3·tolerance)`, acceptable range
//! `[0.85×target, 1.20×target]`, elasticity bucketed from tolerance.

use std::fmt;

use serde::{Deserialize, Serialize};
use smvs_core::constants::{
    ACCEPTABLE_RANGE_HIGH, ACCEPTABLE_RANGE_LOW, ELASTICITY_LOW_TOLERANCE,
    ELASTICITY_MEDIUM_TOLERANCE, PRICE_MULTIPLIER_HIGH, PRICE_MULTIPLIER_LOW,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Elasticity {
    Low,
    Medium,
    High,
}

impl Elasticity {
    /// High tolerance means buyers barely react to price: low elasticity.
    pub fn from_tolerance(tolerance: f64) -> Self {
        if tolerance >= ELASTICITY_LOW_TOLERANCE {
            Self::Low
        } else if tolerance >= ELASTICITY_MEDIUM_TOLERANCE {
            Self::Medium
        } else {
            Self::High
        }
    }
}

impl fmt::Display for Elasticity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Pricing {
    pub target_price: f64,
    pub optimal_price: f64,
    pub acceptable_range: (f64, f64),
    /// Premium-acceptance posterior mean, in [0, 1].
    pub premium_tolerance: f64,
    pub elasticity: Elasticity,
}

impl Pricing {
    pub fn compute(target_price: f64, premium_tolerance: f64) -> Self {
        let tolerance = premium_tolerance.clamp(0.0, 1.0);
        Self {
            target_price,
            optimal_price: target_price * price_multiplier(tolerance),
            acceptable_range: (
                target_price * ACCEPTABLE_RANGE_LOW,
                target_price * ACCEPTABLE_RANGE_HIGH,
            ),
            premium_tolerance: tolerance,
            elasticity: Elasticity::from_tolerance(tolerance),
        }
    }
}

/// Linear from 0.9× at zero tolerance to 1.2× at full tolerance.
pub fn price_multiplier(tolerance: f64) -> f64 {
    PRICE_MULTIPLIER_LOW + (PRICE_MULTIPLIER_HIGH - PRICE_MULTIPLIER_LOW) * tolerance.clamp(0.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_multiplier_endpoints() {
        assert!((price_multiplier(0.0) - 0.9).abs() < 1e-12);
        assert!((price_multiplier(1.0) - 1.2).abs() < 1e-12);
        assert!((price_multiplier(0.5) - 1.05).abs() < 1e-12);
    }

    #[test]
    fn test_compute() {
        let p = Pricing::compute(300.0, 0.4);
        assert!((p.optimal_price - 300.0 * 1.02).abs() < 1e-9);
        assert!((p.acceptable_range.0 - 255.0).abs() < 1e-9);
        assert!((p.acceptable_range.1 - 360.0).abs() < 1e-9);
        assert_eq!(p.elasticity, Elasticity::Medium);
    }

    #[test]
    fn test_elasticity_buckets() {
        assert_eq!(Elasticity::from_tolerance(0.9), Elasticity::Low);
        assert_eq!(Elasticity::from_tolerance(0.35), Elasticity::Medium);
        assert_eq!(Elasticity::from_tolerance(0.1), Elasticity::High);
    }
}
