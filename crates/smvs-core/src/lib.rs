//! smvs-core: shared foundation for the SMVS market validation engine.
//!
//! - Errors: one `thiserror` enum per concern, stable error codes
//! - Config: TOML-backed `EngineConfig` with env overrides
//! - Validation: `Validation<T>` boundary result
//! - Tracing: `EnvFilter` setup driven by `SMVS_LOG`
//! - Constants: compiled defaults shared by config and engine

pub mod config;
pub mod constants;
pub mod errors;
pub mod tracing;
pub mod validation;

pub use config::EngineConfig;
pub use errors::{EngineError, EngineResult, SmvsErrorCode};
pub use validation::Validation;
