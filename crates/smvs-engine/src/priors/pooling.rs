//! Multi-region pooling of priors.
//!
//! The pooled prior of a feature is the weight-averaged (α, β) across the
//! requested regions, which preserves the average pseudo-observation count.
//! Without caller weights every region counts equally.

use std::collections::BTreeMap;

use serde::Serialize;
use smvs_core::errors::{EngineResult, InputError, PriorError};

use super::types::{DataTier, FeaturePrior, IdentityWeights, PriorSet, Region, RegionPriors};
use crate::calibration::TrackedFeature;
use crate::distribution::BetaDistribution;

/// Priors and identity weights pooled over the requested regions.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PooledPriors {
    pub priors: RegionPriors,
    pub identity: IdentityWeights,
    /// Requested regions with their normalized pooling weights, in request order.
    pub regions: Vec<(Region, f64)>,
}

impl PooledPriors {
    /// Pool `set` over `regions`.
    ///
    /// Duplicate regions are collapsed. Weights must be finite and
    /// non-negative; regions without a weight count as zero, and an all-zero
    /// (or absent) weighting falls back to equal weights.
    pub fn pool(
        set: &PriorSet,
        regions: &[Region],
        weights: Option<&BTreeMap<Region, f64>>,
    ) -> EngineResult<Self> {
        let mut requested: Vec<Region> = Vec::with_capacity(regions.len());
        for r in regions {
            if !requested.contains(r) {
                requested.push(*r);
            }
        }
        if requested.is_empty() {
            return Err(InputError::NoRegions.into());
        }

        let normalized = normalize_weights(&requested, weights)?;

        let mut sources = Vec::with_capacity(normalized.len());
        for (region, _) in &normalized {
            let missing = || PriorError::Malformed {
                category: set.category().to_string(),
                reasons: vec![format!("regions.{region} is missing")],
            };
            let priors = set.region(*region).ok_or_else(missing)?;
            let identity = set
                .identity_weights
                .get(region)
                .copied()
                .ok_or_else(missing)?;
            sources.push((priors, identity));
        }

        let pool_feature = |feature: TrackedFeature| -> Result<FeaturePrior, InputError> {
            let parts: Vec<(&FeaturePrior, f64)> = sources
                .iter()
                .zip(&normalized)
                .map(|((p, _), (_, w))| (p.get(feature), *w))
                .collect();
            pool_feature_prior(&parts)
        };

        let priors = RegionPriors {
            demand_trial: pool_feature(TrackedFeature::DemandTrial)?,
            premium_accept: pool_feature(TrackedFeature::PremiumAccept)?,
            online_share: pool_feature(TrackedFeature::OnlineShare)?,
        };

        let identity = sources.iter().zip(&normalized).fold(
            IdentityWeights {
                status: 0.0,
                trust: 0.0,
                upgrade: 0.0,
            },
            |acc, ((_, id), (_, w))| IdentityWeights {
                status: acc.status + w * id.status,
                trust: acc.trust + w * id.trust,
                upgrade: acc.upgrade + w * id.upgrade,
            },
        );

        Ok(Self {
            priors,
            identity,
            regions: normalized,
        })
    }
}

fn normalize_weights(
    regions: &[Region],
    weights: Option<&BTreeMap<Region, f64>>,
) -> Result<Vec<(Region, f64)>, InputError> {
    let mut raw = Vec::with_capacity(regions.len());
    for region in regions {
        let w = weights.and_then(|m| m.get(region)).copied().unwrap_or(0.0);
        if !w.is_finite() || w < 0.0 {
            return Err(InputError::InvalidRegionWeight {
                region: region.code().to_string(),
                value: w,
            });
        }
        raw.push((*region, w));
    }
    // Scale by the largest weight first so the sum cannot overflow.
    let largest = raw.iter().map(|(_, w)| *w).fold(0.0, f64::max);
    if largest <= 0.0 {
        let equal = 1.0 / raw.len() as f64;
        return Ok(raw.into_iter().map(|(r, _)| (r, equal)).collect());
    }
    let total: f64 = raw.iter().map(|(_, w)| w / largest).sum();
    Ok(raw
        .into_iter()
        .map(|(r, w)| (r, (w / largest) / total))
        .collect())
}

fn pool_feature_prior(parts: &[(&FeaturePrior, f64)]) -> Result<FeaturePrior, InputError> {
    let mut alpha = 0.0;
    let mut beta = 0.0;
    let mut min = 0.0;
    let mut max = 0.0;
    let mut provenance: Vec<&str> = Vec::new();
    for (p, w) in parts {
        if *w <= 0.0 {
            continue;
        }
        alpha += w * p.distribution.alpha;
        beta += w * p.distribution.beta;
        min += w * p.bounds.0;
        max += w * p.bounds.1;
        if !p.provenance.is_empty() && !provenance.contains(&p.provenance.as_str()) {
            provenance.push(&p.provenance);
        }
    }
    let tier = parts
        .iter()
        .filter(|(_, w)| *w > 0.0)
        .map(|(p, _)| p.tier)
        .min()
        .unwrap_or(DataTier::Inferred);

    Ok(FeaturePrior {
        distribution: BetaDistribution::new(alpha, beta)?,
        bounds: (min, max),
        tier,
        provenance: provenance.join("; "),
    })
}
