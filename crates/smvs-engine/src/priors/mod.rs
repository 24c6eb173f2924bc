//! Prior repository: per-category Beta priors, category metadata and
//! regional identity weights, validated on load.

pub mod pooling;
pub mod repository;
pub mod types;

pub use pooling::PooledPriors;
pub use repository::PriorRepository;
pub use types::{
    BusinessModel, CategoryMeta, DataTier, FeaturePrior, IdentityWeights, PriorSet, Region,
    RegionPriors,
};
