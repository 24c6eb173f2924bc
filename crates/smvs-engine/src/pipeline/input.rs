//! Inbound configuration object of the pipeline.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use smvs_core::errors::InputError;
use smvs_core::Validation;

use crate::calibration::CalibrationBatch;
use crate::factpack::InferenceMode;
use crate::identity::IdentitySignals;

/// Caller price band; requires `min < target < max`, all finite and positive.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PriceBand {
    pub min: f64,
    pub target: f64,
    pub max: f64,
}

impl PriceBand {
    pub fn new(min: f64, target: f64, max: f64) -> Self {
        Self { min, target, max }
    }

    pub fn validate(&self) -> Validation<PriceBand> {
        let mut reasons = Vec::new();
        for (name, v) in [("min", self.min), ("target", self.target), ("max", self.max)] {
            if !v.is_finite() || v <= 0.0 {
                reasons.push(format!("{name} must be finite and > 0, got {v}"));
            }
        }
        if reasons.is_empty() {
            if self.min >= self.target {
                reasons.push("min must be below target".to_string());
            }
            if self.target >= self.max {
                reasons.push("target must be below max".to_string());
            }
        }
        Validation::from_reasons(*self, reasons)
    }

    pub fn checked(&self) -> Result<PriceBand, InputError> {
        self.validate().into_result(|message| InputError::InvalidPriceBand {
            min: self.min,
            target: self.target,
            max: self.max,
            message,
        })
    }
}

/// Everything a collaborator supplies for one run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SmvsInput {
    pub category: String,
    /// Region code → weight. Weights need not sum to 1.
    pub region_weights: BTreeMap<String, f64>,
    #[serde(default)]
    pub identity: Option<IdentitySignals>,
    pub price_band: PriceBand,
    /// Product features, most important first.
    #[serde(default)]
    pub features: Vec<String>,
    #[serde(default)]
    pub calibration: Vec<CalibrationBatch>,
    /// Defaults to CALIBRATED when batches are supplied, else PRIORS_ONLY.
    #[serde(default)]
    pub mode: Option<InferenceMode>,
    #[serde(default)]
    pub generated_at: Option<DateTime<Utc>>,
}

impl SmvsInput {
    pub fn new(category: impl Into<String>, price_band: PriceBand) -> Self {
        Self {
            category: category.into(),
            region_weights: BTreeMap::new(),
            identity: None,
            price_band,
            features: Vec::new(),
            calibration: Vec::new(),
            mode: None,
            generated_at: None,
        }
    }

    pub fn with_region(mut self, code: impl Into<String>, weight: f64) -> Self {
        self.region_weights.insert(code.into(), weight);
        self
    }

    pub fn with_identity(mut self, identity: IdentitySignals) -> Self {
        self.identity = Some(identity);
        self
    }

    pub fn with_features<S: Into<String>>(mut self, features: impl IntoIterator<Item = S>) -> Self {
        self.features = features.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_calibration(mut self, batches: Vec<CalibrationBatch>) -> Self {
        self.calibration = batches;
        self
    }

    pub fn with_mode(mut self, mode: InferenceMode) -> Self {
        self.mode = Some(mode);
        self
    }

    pub fn generated_at(mut self, at: DateTime<Utc>) -> Self {
        self.generated_at = Some(at);
        self
    }
}
