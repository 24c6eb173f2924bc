//! Row-level normalization of raw calibration batches.

use serde::Serialize;
use serde_json::Value;
use smvs_core::Validation;

use super::types::{CalibrationBatch, CalibrationDatum, ColumnMapping};

/// A row rejected at the normalizer boundary.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DroppedRow {
    pub index: usize,
    pub reasons: Vec<String>,
}

/// Result of normalizing one or more batches. Dropped rows are reported
/// for diagnostics but never abort the batch.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct NormalizedBatch {
    pub data: Vec<CalibrationDatum>,
    pub dropped: Vec<DroppedRow>,
}

impl NormalizedBatch {
    pub fn is_clean(&self) -> bool {
        self.dropped.is_empty()
    }
}

/// Normalize a single batch.
pub fn normalize_batch(batch: &CalibrationBatch) -> NormalizedBatch {
    let mut out = NormalizedBatch::default();
    for (index, row) in batch.rows.iter().enumerate() {
        match validate_row(&batch.mapping, row) {
            Validation::Valid(datum) => out.data.push(datum),
            Validation::Invalid(reasons) => {
                tracing::debug!(
                    index,
                    feature = %batch.mapping.feature,
                    source = %batch.mapping.source,
                    reasons = ?reasons,
                    "dropping calibration row"
                );
                out.dropped.push(DroppedRow { index, reasons });
            }
        }
    }
    out
}

/// Normalize several batches into one result. Row indices in `dropped`
/// are relative to their own batch.
pub fn normalize_batches(batches: &[CalibrationBatch]) -> NormalizedBatch {
    batches
        .iter()
        .map(normalize_batch)
        .fold(NormalizedBatch::default(), |mut acc, b| {
            acc.data.extend(b.data);
            acc.dropped.extend(b.dropped);
            acc
        })
}

fn validate_row(
    mapping: &ColumnMapping,
    row: &serde_json::Map<String, Value>,
) -> Validation<CalibrationDatum> {
    let trials = read_count(row, &mapping.trials_column);
    let successes = read_count(row, &mapping.successes_column);
    match (trials, successes) {
        (Ok(t), Ok(s)) => CalibrationDatum::validate(mapping.feature, mapping.source, t, s),
        (t, s) => Validation::Invalid(
            [t.err(), s.err()].into_iter().flatten().collect(),
        ),
    }
}

/// Read a numeric cell. Numbers and numeric strings are accepted.
fn read_count(row: &serde_json::Map<String, Value>, column: &str) -> Result<f64, String> {
    match row.get(column) {
        None | Some(Value::Null) => Err(format!("column '{column}' is missing")),
        Some(Value::Number(n)) => n
            .as_f64()
            .ok_or_else(|| format!("column '{column}' is not representable: {n}")),
        Some(Value::String(s)) => s
            .trim()
            .parse::<f64>()
            .map_err(|_| format!("column '{column}' is not numeric: '{s}'")),
        Some(other) => Err(format!("column '{column}' has unsupported type: {other}")),
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::calibration::types::{CalibrationSource, TrackedFeature};

    fn mapping() -> ColumnMapping {
        ColumnMapping {
            trials_column: "shown".to_string(),
            successes_column: "clicked".to_string(),
            feature: TrackedFeature::DemandTrial,
            source: CalibrationSource::Ads,
        }
    }

    fn row(value: Value) -> serde_json::Map<String, Value> {
        value.as_object().cloned().unwrap()
    }

    #[test]
    fn test_valid_rows_pass_through() {
        let batch = CalibrationBatch {
            mapping: mapping(),
            rows: vec![
                row(json!({"shown": 100, "clicked": 12})),
                row(json!({"shown": "50", "clicked": " 5 "})),
            ],
        };
        let out = normalize_batch(&batch);
        assert!(out.is_clean());
        assert_eq!(out.data.len(), 2);
        assert_eq!(out.data[1].trials, 50);
        assert_eq!(out.data[1].successes, 5);
        assert_eq!(out.data[0].source, CalibrationSource::Ads);
    }

    #[test]
    fn test_invalid_rows_are_dropped_not_fatal() {
        let batch = CalibrationBatch {
            mapping: mapping(),
            rows: vec![
                row(json!({"shown": -5, "clicked": 1})),
                row(json!({"shown": 10, "clicked": 20})),
                row(json!({"shown": "n/a", "clicked": 1})),
                row(json!({"clicked": 1})),
                row(json!({"shown": true, "clicked": 1})),
                row(json!({"shown": 40, "clicked": 10})),
            ],
        };
        let out = normalize_batch(&batch);
        assert_eq!(out.data.len(), 1);
        assert_eq!(out.data[0].trials, 40);
        let dropped: Vec<usize> = out.dropped.iter().map(|d| d.index).collect();
        assert_eq!(dropped, vec![0, 1, 2, 3, 4]);
    }

    #[test]
    fn test_missing_both_columns_reports_both() {
        let batch = CalibrationBatch {
            mapping: mapping(),
            rows: vec![row(json!({"other": 1}))],
        };
        let out = normalize_batch(&batch);
        assert_eq!(out.dropped[0].reasons.len(), 2);
    }

    #[test]
    fn test_normalize_batches_concatenates() {
        let a = CalibrationBatch::new(mapping()).with_counts(10, 3);
        let b = CalibrationBatch::new(mapping()).with_counts(20, 4).with_counts(5, 9);
        let out = normalize_batches(&[a, b]);
        assert_eq!(out.data.len(), 2);
        assert_eq!(out.dropped.len(), 1);
        assert_eq!(out.dropped[0].index, 1);
    }
}
