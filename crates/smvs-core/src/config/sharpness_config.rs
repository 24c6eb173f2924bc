//! Baseline sharpness curve used when a feature has no calibration data.

use serde::{Deserialize, Serialize};

use crate::constants;

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct SharpnessConfig {
    /// Lowest sharpness a prior alone can report. Default: 0.15.
    pub baseline_floor: Option<f64>,
    /// Highest sharpness a prior alone can report. Default: 0.60.
    pub baseline_ceiling: Option<f64>,
    /// Pseudo-observation scale of the saturation curve. Default: 20.0.
    pub baseline_scale: Option<f64>,
}

impl SharpnessConfig {
    pub fn effective_baseline_floor(&self) -> f64 {
        self.baseline_floor.unwrap_or(constants::DEFAULT_BASELINE_FLOOR)
    }

    pub fn effective_baseline_ceiling(&self) -> f64 {
        self.baseline_ceiling
            .unwrap_or(constants::DEFAULT_BASELINE_CEILING)
    }

    pub fn effective_baseline_scale(&self) -> f64 {
        self.baseline_scale.unwrap_or(constants::DEFAULT_BASELINE_SCALE)
    }
}
