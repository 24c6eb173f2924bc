//! Identity adjustment: reweights raw demand by the founder-supplied
//! status / trust / upgrade signal strengths.

pub mod adjustment;
pub mod profile;

pub use adjustment::IdentityAdjustment;
pub use profile::{BlendMethod, DominantSignal, IdentityProfile, IdentitySignals};
