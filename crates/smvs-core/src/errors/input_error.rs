//! Input validation errors for top-level engine parameters.

use super::error_code::{self, SmvsErrorCode};

#[derive(Debug, thiserror::Error)]
pub enum InputError {
    #[error("Invalid Beta parameters alpha={alpha}, beta={beta}: both must be finite and > 0")]
    InvalidDistribution { alpha: f64, beta: f64 },

    #[error("Invalid observation: {successes} successes out of {trials} trials")]
    InvalidObservation { trials: f64, successes: f64 },

    #[error("Invalid identity signal {field}={value}: must be in [0, 1]")]
    InvalidIdentity { field: String, value: f64 },

    #[error("Invalid price band min={min}, target={target}, max={max}: {message}")]
    InvalidPriceBand {
        min: f64,
        target: f64,
        max: f64,
        message: String,
    },

    #[error("Invalid target price {price}: must be finite and > 0")]
    InvalidTargetPrice { price: f64 },

    #[error("Invalid region weight for {region}: {value}")]
    InvalidRegionWeight { region: String, value: f64 },

    #[error("Invalid score {field}={value}: must be within [0, {max}]")]
    InvalidScore { field: String, value: f64, max: f64 },

    #[error("Region {region} given more than once (as {code})")]
    DuplicateRegion { region: String, code: String },

    #[error("At least one region is required")]
    NoRegions,
}

impl SmvsErrorCode for InputError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidDistribution { .. } => error_code::INVALID_DISTRIBUTION,
            Self::InvalidObservation { .. } => error_code::INVALID_OBSERVATION,
            _ => error_code::INVALID_INPUT,
        }
    }
}
