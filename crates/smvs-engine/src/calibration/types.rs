//! Calibration data types.

use std::fmt;

use serde::{Deserialize, Serialize};
use smvs_core::Validation;

/// The three features every fact pack tracks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrackedFeature {
    /// Probability a target buyer trials the product.
    DemandTrial,
    /// Probability a buyer accepts a premium price.
    PremiumAccept,
    /// Share of purchases expected through online channels.
    OnlineShare,
}

impl TrackedFeature {
    /// All variants in canonical order.
    pub const ALL: [TrackedFeature; 3] = [
        TrackedFeature::DemandTrial,
        TrackedFeature::PremiumAccept,
        TrackedFeature::OnlineShare,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Self::DemandTrial => "demand_trial",
            Self::PremiumAccept => "premium_accept",
            Self::OnlineShare => "online_share",
        }
    }
}

impl fmt::Display for TrackedFeature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Where an observation came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CalibrationSource {
    Survey,
    Sales,
    Ads,
    Analytics,
    Custom,
}

impl CalibrationSource {
    /// Named external sources qualify a posterior as REAL.
    pub fn is_named_external(&self) -> bool {
        !matches!(self, Self::Custom)
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Survey => "survey",
            Self::Sales => "sales",
            Self::Ads => "ads",
            Self::Analytics => "analytics",
            Self::Custom => "custom",
        }
    }
}

impl fmt::Display for CalibrationSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One validated observation. Invariant: `successes <= trials`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalibrationDatum {
    pub feature: TrackedFeature,
    pub trials: u64,
    pub successes: u64,
    pub source: CalibrationSource,
}

impl CalibrationDatum {
    /// Validate raw counts. Counts must be finite, non-negative whole numbers
    /// with `successes <= trials`.
    pub fn validate(
        feature: TrackedFeature,
        source: CalibrationSource,
        trials: f64,
        successes: f64,
    ) -> Validation<CalibrationDatum> {
        let mut reasons = Vec::new();
        for (name, value) in [("trials", trials), ("successes", successes)] {
            if !value.is_finite() {
                reasons.push(format!("{name} is not finite: {value}"));
            } else if value < 0.0 {
                reasons.push(format!("{name} is negative: {value}"));
            } else if value.fract() != 0.0 {
                reasons.push(format!("{name} is not a whole number: {value}"));
            } else if value >= u64::MAX as f64 {
                reasons.push(format!("{name} is out of range: {value}"));
            }
        }
        if reasons.is_empty() && successes > trials {
            reasons.push(format!("successes ({successes}) exceed trials ({trials})"));
        }
        if !reasons.is_empty() {
            return Validation::Invalid(reasons);
        }
        Validation::Valid(CalibrationDatum {
            feature,
            trials: trials as u64,
            successes: successes as u64,
            source,
        })
    }

    /// Observed success rate, or `None` for zero trials.
    pub fn rate(&self) -> Option<f64> {
        (self.trials > 0).then(|| self.successes as f64 / self.trials as f64)
    }
}

/// Which columns of a raw batch hold the counts, and what they represent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnMapping {
    pub trials_column: String,
    pub successes_column: String,
    pub feature: TrackedFeature,
    pub source: CalibrationSource,
}

/// A batch of raw rows supplied by a collaborator, e.g. a survey export.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalibrationBatch {
    pub mapping: ColumnMapping,
    pub rows: Vec<serde_json::Map<String, serde_json::Value>>,
}

impl CalibrationBatch {
    pub fn new(mapping: ColumnMapping) -> Self {
        Self {
            mapping,
            rows: Vec::new(),
        }
    }

    /// Append one row with the mapped trial and success columns set.
    pub fn with_counts(mut self, trials: impl Into<serde_json::Value>, successes: impl Into<serde_json::Value>) -> Self {
        let mut row = serde_json::Map::new();
        row.insert(self.mapping.trials_column.clone(), trials.into());
        row.insert(self.mapping.successes_column.clone(), successes.into());
        self.rows.push(row);
        self
    }
}
