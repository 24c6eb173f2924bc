//! Per-feature aggregation of calibration data.

use serde::Serialize;

use super::types::{CalibrationDatum, CalibrationSource, TrackedFeature};

/// At most one aggregate observation per tracked feature, in canonical order.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct AggregatedCalibration {
    data: Vec<CalibrationDatum>,
}

impl AggregatedCalibration {
    pub fn get(&self, feature: TrackedFeature) -> Option<&CalibrationDatum> {
        self.data.iter().find(|d| d.feature == feature)
    }

    pub fn iter(&self) -> impl Iterator<Item = &CalibrationDatum> {
        self.data.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Sum of trials across all features.
    pub fn total_trials(&self) -> u64 {
        self.data.iter().fold(0u64, |acc, d| acc.saturating_add(d.trials))
    }

    pub fn into_vec(self) -> Vec<CalibrationDatum> {
        self.data
    }
}

/// Merge data points per feature by summing trials and successes.
///
/// Source of a merged observation: the shared source when all points agree,
/// else the first named external source in input order, else `Custom`.
/// Aggregating a single datum returns it unchanged.
pub fn aggregate(data: &[CalibrationDatum]) -> AggregatedCalibration {
    let merged = TrackedFeature::ALL
        .iter()
        .filter_map(|&feature| {
            let mut points = data.iter().filter(|d| d.feature == feature);
            let first = *points.next()?;
            Some(points.fold(first, |acc, d| CalibrationDatum {
                feature,
                trials: acc.trials.saturating_add(d.trials),
                successes: acc.successes.saturating_add(d.successes),
                source: merge_source(acc.source, d.source),
            }))
        })
        .collect();
    AggregatedCalibration { data: merged }
}

fn merge_source(acc: CalibrationSource, next: CalibrationSource) -> CalibrationSource {
    if acc == next || acc.is_named_external() {
        acc
    } else {
        next
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn datum(
        feature: TrackedFeature,
        trials: u64,
        successes: u64,
        source: CalibrationSource,
    ) -> CalibrationDatum {
        CalibrationDatum {
            feature,
            trials,
            successes,
            source,
        }
    }

    #[test]
    fn test_sums_per_feature() {
        let agg = aggregate(&[
            datum(TrackedFeature::DemandTrial, 100, 40, CalibrationSource::Survey),
            datum(TrackedFeature::OnlineShare, 50, 30, CalibrationSource::Analytics),
            datum(TrackedFeature::DemandTrial, 60, 20, CalibrationSource::Survey),
        ]);
        let dt = agg.get(TrackedFeature::DemandTrial).unwrap();
        assert_eq!((dt.trials, dt.successes), (160, 60));
        assert!(agg.get(TrackedFeature::PremiumAccept).is_none());
        assert_eq!(agg.total_trials(), 210);
    }

    #[test]
    fn test_single_datum_is_noop() {
        let d = datum(TrackedFeature::PremiumAccept, 80, 25, CalibrationSource::Sales);
        let agg = aggregate(&[d]);
        assert_eq!(agg.clone().into_vec(), vec![d]);
        assert_eq!(aggregate(&agg.into_vec()).into_vec(), vec![d]);
    }

    #[test]
    fn test_mixed_sources_prefer_named() {
        let agg = aggregate(&[
            datum(TrackedFeature::DemandTrial, 10, 1, CalibrationSource::Custom),
            datum(TrackedFeature::DemandTrial, 10, 2, CalibrationSource::Ads),
            datum(TrackedFeature::DemandTrial, 10, 3, CalibrationSource::Survey),
        ]);
        assert_eq!(
            agg.get(TrackedFeature::DemandTrial).unwrap().source,
            CalibrationSource::Ads
        );
    }

    #[test]
    fn test_canonical_order() {
        let agg = aggregate(&[
            datum(TrackedFeature::OnlineShare, 1, 1, CalibrationSource::Custom),
            datum(TrackedFeature::DemandTrial, 1, 0, CalibrationSource::Custom),
        ]);
        let order: Vec<TrackedFeature> = agg.iter().map(|d| d.feature).collect();
        assert_eq!(order, vec![TrackedFeature::DemandTrial, TrackedFeature::OnlineShare]);
    }

    #[test]
    fn test_empty_input() {
        assert!(aggregate(&[]).is_empty());
    }
}
