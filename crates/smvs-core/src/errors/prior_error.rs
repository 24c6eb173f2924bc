//! Prior repository errors. All of them are configuration errors: fail fast,
//! never retried, surfaced with the offending value named.

use super::error_code::{self, SmvsErrorCode};

#[derive(Debug, thiserror::Error)]
pub enum PriorError {
    #[error("Unsupported category '{category}'; supported categories: {}", supported.join(", "))]
    UnsupportedCategory {
        category: String,
        supported: Vec<String>,
    },

    #[error("Malformed priors for {category}: {}", reasons.join("; "))]
    Malformed {
        category: String,
        reasons: Vec<String>,
    },

    #[error("Invalid region code '{code}'; supported regions: {}", supported.join(", "))]
    InvalidRegion { code: String, supported: Vec<String> },

    #[error("Prior set parse error for {category}: {message}")]
    Parse { category: String, message: String },
}

impl SmvsErrorCode for PriorError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::UnsupportedCategory { .. } => error_code::UNSUPPORTED_CATEGORY,
            Self::Malformed { .. } | Self::Parse { .. } => error_code::MALFORMED_PRIORS,
            Self::InvalidRegion { .. } => error_code::INVALID_REGION,
        }
    }
}
