//! Template-based recommendation, limitations and assumptions.

use serde::{Deserialize, Serialize};
use smvs_core::config::ReportConfig;

use super::payload::IntervalCheck;
use crate::factpack::{BayesianFactPack, InferenceMode, Verdict};
use crate::priors::DataTier;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    pub verdict: Verdict,
    pub rationale: String,
}

/// Report-level recommendation over confidence and demand, both in [0, 1].
///
/// Low confidence is REVISE regardless of demand; low demand is NO-GO even
/// at high confidence.
pub fn recommend(confidence: f64, demand: f64, config: &ReportConfig) -> Recommendation {
    let min_confidence = config.effective_min_confidence();
    let min_demand = config.effective_min_demand();
    let strong = config.effective_strong_confidence();

    if confidence.is_nan() || confidence < min_confidence {
        return Recommendation {
            verdict: Verdict::Revise,
            rationale: format!(
                "Confidence {:.0}% is below {:.0}%; gather calibration data before deciding.",
                confidence * 100.0,
                min_confidence * 100.0
            ),
        };
    }
    if demand.is_nan() || demand < min_demand {
        return Recommendation {
            verdict: Verdict::NoGo,
            rationale: format!(
                "Demand probability {:.0}% is below the {:.0}% viability floor.",
                demand * 100.0,
                min_demand * 100.0
            ),
        };
    }
    if confidence >= strong {
        Recommendation {
            verdict: Verdict::Go,
            rationale: format!(
                "Demand {:.0}% at {:.0}% confidence supports a controlled market test.",
                demand * 100.0,
                confidence * 100.0
            ),
        }
    } else {
        Recommendation {
            verdict: Verdict::Revise,
            rationale: format!(
                "Demand {:.0}% looks viable but confidence {:.0}% is short of {:.0}%.",
                demand * 100.0,
                confidence * 100.0,
                strong * 100.0
            ),
        }
    }
}

pub(crate) fn fact_pack_limitations(
    pack: &BayesianFactPack,
    checks: &[IntervalCheck],
    weak_threshold: f64,
    tolerance: f64,
) -> Vec<String> {
    let mut out = Vec::new();
    if pack.meta.inference_mode == InferenceMode::PriorsOnly {
        out.push("No calibration data was applied; estimates rest on category priors.".to_string());
    }
    if pack.meta.prior_tier == DataTier::Inferred {
        out.push("Some priors are inferred from adjacent categories.".to_string());
    }
    for p in pack.posteriors.iter() {
        if p.distribution().is_weak(weak_threshold) {
            out.push(format!(
                "{} rests on a weak prior (alpha={:.2}, beta={:.2}); its interval is approximate.",
                p.feature, p.alpha, p.beta
            ));
        }
    }
    for c in checks.iter().filter(|c| c.divergence > tolerance) {
        out.push(format!(
            "{} normal-approximation interval differs from exact Beta quantiles by {:.3}.",
            c.feature, c.divergence
        ));
    }
    out
}

pub(crate) fn fact_pack_assumptions(pack: &BayesianFactPack) -> Vec<String> {
    let mut out = vec![
        "Identity adjustment applies to demand-trial only.".to_string(),
        "Optimal price scales linearly with premium tolerance.".to_string(),
    ];
    if pack.meta.regions.len() > 1 {
        out.push("Regional priors are pooled by weighted Beta parameters.".to_string());
    }
    out
}

pub(crate) fn legacy_limitations() -> Vec<String> {
    vec!["Legacy score input; no posterior distributions are available.".to_string()]
}

pub(crate) fn legacy_assumptions() -> Vec<String> {
    vec!["Confidence was normalized from a 0-100 scale.".to_string()]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_low_confidence_revise_regardless_of_demand() {
        let r = recommend(0.2, 0.9, &ReportConfig::default());
        assert_eq!(r.verdict, Verdict::Revise);
        let r = recommend(0.2, 0.05, &ReportConfig::default());
        assert_eq!(r.verdict, Verdict::Revise);
    }

    #[test]
    fn test_low_demand_no_go_at_high_confidence() {
        let r = recommend(0.95, 0.2, &ReportConfig::default());
        assert_eq!(r.verdict, Verdict::NoGo);
    }

    #[test]
    fn test_go_and_revise_bands() {
        assert_eq!(recommend(0.8, 0.5, &ReportConfig::default()).verdict, Verdict::Go);
        assert_eq!(recommend(0.5, 0.5, &ReportConfig::default()).verdict, Verdict::Revise);
    }

    #[test]
    fn test_nan_is_revise() {
        assert_eq!(recommend(f64::NAN, 0.5, &ReportConfig::default()).verdict, Verdict::Revise);
    }
}
