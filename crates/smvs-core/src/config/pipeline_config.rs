//! Derived-view configuration for the SMVS pipeline.

use serde::{Deserialize, Serialize};

use crate::constants;

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct PipelineConfig {
    /// Samples on the price/demand curve. Default: 11.
    pub curve_points: Option<usize>,
    /// Geometric decay between consecutive feature weights. Default: 0.85.
    pub feature_decay: Option<f64>,
    /// Lowest feature weight. Default: 0.10.
    pub feature_floor: Option<f64>,
}

impl PipelineConfig {
    pub fn effective_curve_points(&self) -> usize {
        self.curve_points.unwrap_or(constants::DEFAULT_CURVE_POINTS)
    }

    pub fn effective_feature_decay(&self) -> f64 {
        self.feature_decay.unwrap_or(constants::DEFAULT_FEATURE_DECAY)
    }

    pub fn effective_feature_floor(&self) -> f64 {
        self.feature_floor.unwrap_or(constants::DEFAULT_FEATURE_FLOOR)
    }
}
