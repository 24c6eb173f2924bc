//! Fact pack builder: orchestrates priors, calibration, posteriors and
//! identity adjustment into one immutable `BayesianFactPack`.

pub mod builder;
pub mod decision;
pub mod integrity;
pub mod pricing;
pub mod types;

pub use builder::{BuildRequest, FactPackBuilder};
pub use decision::{overall_confidence, DecisionPolicy, Verdict};
pub use pricing::{Elasticity, Pricing};
pub use types::{
    BayesianFactPack, FactPackMeta, IdentityBlock, InferenceMode, Integrity, Posteriors, Summary,
};
