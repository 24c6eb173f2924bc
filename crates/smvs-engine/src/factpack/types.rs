//! The Bayesian fact pack: the single output artifact of one build.

use std::collections::BTreeMap;
use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::decision::Verdict;
use super::integrity;
use super::pricing::Pricing;
use crate::calibration::TrackedFeature;
use crate::identity::IdentityProfile;
use crate::posterior::PosteriorFeature;
use crate::priors::{DataTier, Region};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum InferenceMode {
    PriorsOnly,
    Calibrated,
    Historical,
}

impl InferenceMode {
    pub fn name(&self) -> &'static str {
        match self {
            Self::PriorsOnly => "PRIORS_ONLY",
            Self::Calibrated => "CALIBRATED",
            Self::Historical => "HISTORICAL",
        }
    }

    /// Whether the mode consumes calibration batches at all.
    pub fn uses_observations(&self) -> bool {
        !matches!(self, Self::PriorsOnly)
    }
}

impl fmt::Display for InferenceMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FactPackMeta {
    /// Closed schema tag, `bfp/1.0`.
    pub version: String,
    pub report_id: Uuid,
    pub category: String,
    pub regions: Vec<Region>,
    pub generated_at: DateTime<Utc>,
    /// Mode actually applied, after degradation.
    pub inference_mode: InferenceMode,
    pub prior_version: String,
    pub prior_source: String,
    /// Weakest tier among the pooled priors.
    pub prior_tier: DataTier,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IdentityBlock {
    pub profile: IdentityProfile,
    pub adjustment_factor: f64,
    /// Demand-trial posterior mean before adjustment.
    pub raw_demand: f64,
    pub adjusted_demand: f64,
}

/// Exactly the three tracked features.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Posteriors {
    pub demand_trial: PosteriorFeature,
    pub premium_accept: PosteriorFeature,
    pub online_share: PosteriorFeature,
}

impl Posteriors {
    pub fn get(&self, feature: TrackedFeature) -> &PosteriorFeature {
        match feature {
            TrackedFeature::DemandTrial => &self.demand_trial,
            TrackedFeature::PremiumAccept => &self.premium_accept,
            TrackedFeature::OnlineShare => &self.online_share,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &PosteriorFeature> {
        [&self.demand_trial, &self.premium_accept, &self.online_share].into_iter()
    }

    /// `(feature, sharpness)` pairs for overall confidence.
    pub fn sharpness_scores(&self) -> impl Iterator<Item = (TrackedFeature, f64)> + '_ {
        self.iter().map(|p| (p.feature, p.sharpness))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Summary {
    pub actionable: bool,
    pub overall_confidence: f64,
    pub recommended_action: Verdict,
    pub reasoning: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Integrity {
    /// xxh3-64 of the canonical pack without this field, lowercase hex.
    pub content_hash: String,
    /// `<tier letter>-<grade>`, e.g. `E-B`.
    pub classification_code: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BayesianFactPack {
    pub meta: FactPackMeta,
    pub identity: IdentityBlock,
    pub posteriors: Posteriors,
    pub summary: Summary,
    pub pricing: Pricing,
    pub integrity: Integrity,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub region_weights: Option<BTreeMap<Region, f64>>,
}

impl BayesianFactPack {
    /// Identity-adjusted demand-trial mean.
    pub fn adjusted_demand(&self) -> f64 {
        self.identity.adjusted_demand
    }

    pub fn verdict(&self) -> Verdict {
        self.summary.recommended_action
    }

    /// Recompute the content hash and compare it with the stamped one.
    pub fn verify_integrity(&self) -> bool {
        integrity::fact_pack_hash(self)
            .map(|h| h == self.integrity.content_hash)
            .unwrap_or(false)
    }
}
