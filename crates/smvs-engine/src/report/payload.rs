//! External report schema, tagged by `metadata.version`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::narrative::Recommendation;
use crate::calibration::TrackedFeature;
use crate::factpack::integrity::canonical_hash;
use crate::factpack::InferenceMode;
use crate::pipeline::{PricePoint, RegionalView};
use crate::priors::{DataTier, Region};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportMetadata {
    pub report_id: Uuid,
    pub created_at: DateTime<Utc>,
    /// `smvs-report/1.0`.
    pub version: String,
    pub region: Vec<Region>,
    pub category: String,
    /// Canonical xxh3-64 over the payload without this field.
    pub hash: String,
}

/// Caller parameters echoed back.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportParams {
    pub target_price: Option<f64>,
    pub inference_mode: Option<InferenceMode>,
    pub prior_version: Option<String>,
    pub prior_tier: Option<DataTier>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportResults {
    pub demand_probability: f64,
    /// Posterior standard deviation of demand, when known.
    pub dispersion: Option<f64>,
    /// Overall confidence rendered on 0-100 for display.
    pub confidence_score: u8,
    pub sharpness: f64,
    pub optimal_price: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price_curve: Option<Vec<PricePoint>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub segments: Option<Vec<RegionalView>>,
}

/// Normal-approximation vs exact Beta quantile interval for one feature.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct IntervalCheck {
    pub feature: TrackedFeature,
    pub approximate: (f64, f64),
    pub exact: (f64, f64),
    /// Largest endpoint difference.
    pub divergence: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalibrationBlock {
    pub limitations: Vec<String>,
    pub assumptions: Vec<String>,
    pub interval_checks: Vec<IntervalCheck>,
    pub recommendation: Recommendation,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportPayload {
    pub metadata: ReportMetadata,
    pub params: ReportParams,
    pub results: ReportResults,
    pub calibration: CalibrationBlock,
}

impl ReportPayload {
    pub fn compute_hash(&self) -> Result<String, serde_json::Error> {
        canonical_hash(self, &["metadata", "hash"])
    }

    pub fn verify_hash(&self) -> bool {
        self.compute_hash()
            .map(|h| h == self.metadata.hash)
            .unwrap_or(false)
    }
}
