//! Top-level engine error. Aggregates subsystem errors via `From`.

use super::error_code::SmvsErrorCode;
use super::{ConfigError, InputError, PriorError};

#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Prior error: {0}")]
    Prior(#[from] PriorError),

    #[error("Input error: {0}")]
    Input(#[from] InputError),

    #[error("Serialization error: {message}")]
    Serialization { message: String },
}

impl From<serde_json::Error> for EngineError {
    fn from(e: serde_json::Error) -> Self {
        Self::Serialization {
            message: e.to_string(),
        }
    }
}

impl SmvsErrorCode for EngineError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::Config(e) => e.error_code(),
            Self::Prior(e) => e.error_code(),
            Self::Input(e) => e.error_code(),
            Self::Serialization { .. } => super::error_code::SERIALIZATION_ERROR,
        }
    }
}

pub type EngineResult<T> = Result<T, EngineError>;
