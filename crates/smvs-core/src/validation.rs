//! Boundary validation result.
//!
//! Each guarded entity exposes a `validate` that returns `Validation<T>`.
//! Batch boundaries drop `Invalid` items; top-level parameters convert
//! them into errors with `into_result`.

use serde::{Deserialize, Serialize};

/// Outcome of validating an untrusted value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", content = "detail", rename_all = "snake_case")]
pub enum Validation<T> {
    Valid(T),
    Invalid(Vec<String>),
}

impl<T> Validation<T> {
    /// Build from accumulated reasons: `Valid(value)` only when `reasons` is empty.
    pub fn from_reasons(value: T, reasons: Vec<String>) -> Self {
        if reasons.is_empty() {
            Self::Valid(value)
        } else {
            Self::Invalid(reasons)
        }
    }

    pub fn is_valid(&self) -> bool {
        matches!(self, Self::Valid(_))
    }

    /// Reasons for rejection; empty when valid.
    pub fn reasons(&self) -> &[String] {
        match self {
            Self::Valid(_) => &[],
            Self::Invalid(reasons) => reasons,
        }
    }

    /// Keep the valid value, discarding the reasons.
    pub fn ok(self) -> Option<T> {
        match self {
            Self::Valid(v) => Some(v),
            Self::Invalid(_) => None,
        }
    }

    /// Convert into a `Result`, mapping the joined reasons through `f`.
    pub fn into_result<E>(self, f: impl FnOnce(String) -> E) -> Result<T, E> {
        match self {
            Self::Valid(v) => Ok(v),
            Self::Invalid(reasons) => Err(f(reasons.join("; "))),
        }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Validation<U> {
        match self {
            Self::Valid(v) => Validation::Valid(f(v)),
            Self::Invalid(reasons) => Validation::Invalid(reasons),
        }
    }
}
