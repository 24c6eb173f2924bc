//! Report payload adapter: maps a fact pack (or legacy score pair) into
//! the versioned, hash-stamped external wire shape.

pub mod adapter;
pub mod narrative;
pub mod payload;

pub use adapter::{LegacyScores, ReportAdapter};
pub use narrative::{recommend, Recommendation};
pub use payload::{
    CalibrationBlock, IntervalCheck, ReportMetadata, ReportParams, ReportPayload, ReportResults,
};
