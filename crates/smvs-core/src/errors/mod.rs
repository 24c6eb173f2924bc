//! Error handling for SMVS.
//! One error enum per concern, `thiserror` only.

pub mod config_error;
pub mod engine_error;
pub mod error_code;
pub mod input_error;
pub mod prior_error;

pub use config_error::ConfigError;
pub use engine_error::{EngineError, EngineResult};
pub use error_code::SmvsErrorCode;
pub use input_error::InputError;
pub use prior_error::PriorError;
