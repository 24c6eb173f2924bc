//! Observability for SMVS.
//! `tracing` crate with `EnvFilter`, per-crate log levels.

pub mod setup;

pub use setup::{init_tracing, init_tracing_with, DEFAULT_DIRECTIVE, LOG_ENV};
