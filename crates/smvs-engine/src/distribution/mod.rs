//! Distribution arithmetic: closed-form Beta operations.
//!
//! Every belief in the engine is a `BetaDistribution` over a probability
//! in [0, 1]; the calibration path updates it conjugately.

pub mod beta;

pub use beta::{credible_interval_95, exact_credible_interval, BetaDistribution, Z_95};
