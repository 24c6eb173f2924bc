//! Calibration normalizer: turns heterogeneous observation batches into
//! validated per-feature trial/success counts.
//!
//! Rows failing validation are dropped, never fatal to the batch.
//! Aggregation sums trials and successes per feature.

pub mod aggregate;
pub mod normalizer;
pub mod types;

pub use aggregate::{aggregate, AggregatedCalibration};
pub use normalizer::{normalize_batch, normalize_batches, DroppedRow, NormalizedBatch};
pub use types::{CalibrationBatch, CalibrationDatum, CalibrationSource, ColumnMapping, TrackedFeature};
