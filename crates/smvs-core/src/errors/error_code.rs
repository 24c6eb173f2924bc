//! SmvsErrorCode trait for collaborator-facing error codes.

/// Every error enum implements this to expose a stable code string
/// that callers can match on without parsing messages.
pub trait SmvsErrorCode {
    /// Returns the error code string (e.g., "UNSUPPORTED_CATEGORY").
    fn error_code(&self) -> &'static str;

    /// Returns the formatted boundary string: `[ERROR_CODE] message`.
    fn coded_string(&self) -> String
    where
        Self: std::fmt::Display,
    {
        format!("[{}] {}", self.error_code(), self)
    }
}

pub const CONFIG_ERROR: &str = "CONFIG_ERROR";
pub const UNSUPPORTED_CATEGORY: &str = "UNSUPPORTED_CATEGORY";
pub const MALFORMED_PRIORS: &str = "MALFORMED_PRIORS";
pub const INVALID_REGION: &str = "INVALID_REGION";
pub const INVALID_INPUT: &str = "INVALID_INPUT";
pub const INVALID_DISTRIBUTION: &str = "INVALID_DISTRIBUTION";
pub const INVALID_OBSERVATION: &str = "INVALID_OBSERVATION";
pub const SERIALIZATION_ERROR: &str = "SERIALIZATION_ERROR";
