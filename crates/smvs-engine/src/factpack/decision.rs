//! Overall confidence and the GO / REVISE / NO-GO decision rule.

use std::fmt;

use serde::{Deserialize, Serialize};
use smvs_core::config::DecisionConfig;
use smvs_core::constants::{WEIGHT_DEMAND_TRIAL, WEIGHT_ONLINE_SHARE, WEIGHT_PREMIUM_ACCEPT};

use crate::calibration::TrackedFeature;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Verdict {
    #[serde(rename = "GO")]
    Go,
    #[serde(rename = "REVISE")]
    Revise,
    #[serde(rename = "NO-GO")]
    NoGo,
}

impl Verdict {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Go => "GO",
            Self::Revise => "REVISE",
            Self::NoGo => "NO-GO",
        }
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Fixed weight of a feature in overall confidence.
pub fn feature_weight(feature: TrackedFeature) -> f64 {
    match feature {
        TrackedFeature::DemandTrial => WEIGHT_DEMAND_TRIAL,
        TrackedFeature::PremiumAccept => WEIGHT_PREMIUM_ACCEPT,
        TrackedFeature::OnlineShare => WEIGHT_ONLINE_SHARE,
    }
}

/// Convex combination of per-feature sharpness: 50% demand-trial,
/// 30% premium-acceptance, 20% online-share. Order of the input is irrelevant.
pub fn overall_confidence(scores: impl IntoIterator<Item = (TrackedFeature, f64)>) -> f64 {
    scores
        .into_iter()
        .map(|(feature, sharpness)| feature_weight(feature) * sharpness)
        .sum::<f64>()
        .clamp(0.0, 1.0)
}

/// Terminal, stateless decision rule.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DecisionPolicy {
    strong: f64,
    revise: f64,
}

impl DecisionPolicy {
    pub fn new(config: &DecisionConfig) -> Self {
        Self {
            strong: config.effective_strong_threshold(),
            revise: config.effective_revise_threshold(),
        }
    }

    pub fn strong_threshold(&self) -> f64 {
        self.strong
    }

    pub fn revise_threshold(&self) -> f64 {
        self.revise
    }

    /// Total over every `f64`: NaN and anything below the revise threshold is NO-GO.
    pub fn decide(&self, confidence: f64) -> Verdict {
        if confidence >= self.strong {
            Verdict::Go
        } else if confidence >= self.revise {
            Verdict::Revise
        } else {
            Verdict::NoGo
        }
    }

    pub fn reasoning(verdict: Verdict) -> &'static str {
        match verdict {
            Verdict::Go => "Confidence sufficient for a controlled market test.",
            Verdict::Revise => "Directional insights available but not yet actionable.",
            Verdict::NoGo => "Insufficient confidence for go-to-market decisions.",
        }
    }

    /// Letter grade of a confidence value: A (GO band), B (REVISE band), C.
    pub fn grade(&self, confidence: f64) -> char {
        match self.decide(confidence) {
            Verdict::Go => 'A',
            Verdict::Revise => 'B',
            Verdict::NoGo => 'C',
        }
    }
}

impl Default for DecisionPolicy {
    fn default() -> Self {
        Self::new(&DecisionConfig::default())
    }
}
