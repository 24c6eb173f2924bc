//! Report payload recommendation thresholds.

use serde::{Deserialize, Serialize};

use crate::constants;

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct ReportConfig {
    /// Confidence below this is REVISE regardless of demand. Default: 0.35.
    pub min_confidence: Option<f64>,
    /// Demand below this is NO-GO regardless of confidence. Default: 0.30.
    pub min_demand: Option<f64>,
    /// Confidence at or above this is GO. Default: 0.70.
    pub strong_confidence: Option<f64>,
}

impl ReportConfig {
    pub fn effective_min_confidence(&self) -> f64 {
        self.min_confidence
            .unwrap_or(constants::DEFAULT_REPORT_MIN_CONFIDENCE)
    }

    pub fn effective_min_demand(&self) -> f64 {
        self.min_demand.unwrap_or(constants::DEFAULT_REPORT_MIN_DEMAND)
    }

    pub fn effective_strong_confidence(&self) -> f64 {
        self.strong_confidence
            .unwrap_or(constants::DEFAULT_REPORT_STRONG_CONFIDENCE)
    }
}
