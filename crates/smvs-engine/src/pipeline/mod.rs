//! SMVS pipeline: one fact-pack build plus deterministic derived views
//! (regional breakdown, feature importance, price/demand curve).
//!
//! Views never feed back into the fact pack.

pub mod input;
pub mod runner;
pub mod views;

pub use input::{PriceBand, SmvsInput};
pub use runner::{SmvsPipeline, SmvsResult};
pub use views::{FeatureWeight, PricePoint, RegionalView};
