//! Decision thresholds for the GO/REVISE/NO-GO verdict.

use serde::{Deserialize, Serialize};

use crate::constants;

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct DecisionConfig {
    /// Overall confidence at or above which the verdict is GO. Default: 0.70.
    pub strong_threshold: Option<f64>,
    /// Overall confidence at or above which the verdict is REVISE. Default: 0.40.
    pub revise_threshold: Option<f64>,
}

impl DecisionConfig {
    pub fn effective_strong_threshold(&self) -> f64 {
        self.strong_threshold
            .unwrap_or(constants::DEFAULT_STRONG_THRESHOLD)
    }

    pub fn effective_revise_threshold(&self) -> f64 {
        self.revise_threshold
            .unwrap_or(constants::DEFAULT_REVISE_THRESHOLD)
    }
}
