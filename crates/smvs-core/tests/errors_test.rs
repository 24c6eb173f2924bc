//! Error code and message tests.

use smvs_core::errors::{EngineError, InputError, PriorError, SmvsErrorCode};

#[test]
fn test_unsupported_category_names_attempt_and_supported_set() {
    let err = PriorError::UnsupportedCategory {
        category: "PET_FOOD".to_string(),
        supported: vec!["HEALTH_SUPPLEMENTS".to_string(), "SAAS_B2B".to_string()],
    };
    let msg = err.to_string();
    assert!(msg.contains("PET_FOOD"));
    assert!(msg.contains("HEALTH_SUPPLEMENTS, SAAS_B2B"));
    assert_eq!(err.error_code(), "UNSUPPORTED_CATEGORY");
}

#[test]
fn test_engine_error_delegates_code() {
    let err: EngineError = InputError::InvalidTargetPrice { price: -1.0 }.into();
    assert_eq!(err.error_code(), "INVALID_INPUT");
    assert!(err.coded_string().starts_with("[INVALID_INPUT] Input error:"));

    let err: EngineError = PriorError::Malformed {
        category: "X".into(),
        reasons: vec![
            "regions.SA.demand_trial.alpha must be > 0, got 0".into(),
            "regions.QA is missing".into(),
        ],
    }
    .into();
    assert_eq!(err.error_code(), "MALFORMED_PRIORS");
    assert!(err
        .to_string()
        .contains("regions.SA.demand_trial.alpha must be > 0, got 0; regions.QA is missing"));
}

#[test]
fn test_observation_error_code() {
    let err = InputError::InvalidObservation {
        trials: 10.0,
        successes: 12.0,
    };
    assert_eq!(err.error_code(), "INVALID_OBSERVATION");
    assert!(err.to_string().contains("12 successes out of 10 trials"));
}

#[test]
fn test_serialization_error_from_serde_json() {
    let json_err = serde_json::from_str::<f64>("not a number").unwrap_err();
    let err: EngineError = json_err.into();
    assert_eq!(err.error_code(), "SERIALIZATION_ERROR");
    assert!(err.to_string().starts_with("Serialization error:"));
}

#[test]
fn test_invalid_score_message() {
    let err = InputError::InvalidScore {
        field: "confidence".into(),
        value: 140.0,
        max: 100.0,
    };
    assert_eq!(err.error_code(), "INVALID_INPUT");
    assert_eq!(
        err.to_string(),
        "Invalid score confidence=140: must be within [0, 100]"
    );
}

#[test]
fn test_duplicate_region_names_both_spellings() {
    let err = InputError::DuplicateRegion {
        region: "SA".into(),
        code: "sa".into(),
    };
    assert_eq!(err.error_code(), "INVALID_INPUT");
    assert_eq!(err.to_string(), "Region SA given more than once (as sa)");
}
