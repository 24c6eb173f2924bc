//! Posterior calculator: prior + optional aggregated calibration →
//! posterior feature with a bounded sharpness score.

pub mod calculator;
pub mod sharpness;
pub mod types;

pub use calculator::PosteriorCalculator;
pub use sharpness::SharpnessModel;
pub use types::PosteriorFeature;
