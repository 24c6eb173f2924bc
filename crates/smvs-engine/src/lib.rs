//! # smvs-engine
//!
//! Bayesian market validation: category Beta priors → calibration →
//! posteriors → identity adjustment → fact pack with a GO / REVISE / NO-GO verdict.
//! The pipeline adds regional, feature-importance and price-curve views; the
//! report adapter maps packs into the external, hash-stamped payload.

pub mod calibration;
pub mod distribution;
pub mod factpack;
pub mod identity;
pub mod pipeline;
pub mod posterior;
pub mod priors;
pub mod report;

pub use distribution::BetaDistribution;
pub use factpack::{BayesianFactPack, BuildRequest, FactPackBuilder, InferenceMode, Verdict};
pub use pipeline::{PriceBand, SmvsInput, SmvsPipeline, SmvsResult};
pub use priors::{PriorRepository, Region};
pub use report::{ReportAdapter, ReportPayload};
