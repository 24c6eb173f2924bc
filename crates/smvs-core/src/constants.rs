//! Shared constants for the SMVS engine.

/// Engine version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Version tag stamped into every fact pack (`meta.version`).
pub const FACT_PACK_VERSION: &str = "bfp/1.0";

/// Version tag stamped into every report payload (`metadata.version`).
pub const REPORT_VERSION: &str = "smvs-report/1.0";

/// Project config file name, looked up in the config root.
pub const CONFIG_FILE_NAME: &str = "smvs.toml";

// ---- Decision ----

/// Default overall confidence at or above which the verdict is GO.
pub const DEFAULT_STRONG_THRESHOLD: f64 = 0.70;

/// Default overall confidence at or above which the verdict is REVISE.
pub const DEFAULT_REVISE_THRESHOLD: f64 = 0.40;

/// Weights of the three tracked features in overall confidence.
pub const WEIGHT_DEMAND_TRIAL: f64 = 0.50;
pub const WEIGHT_PREMIUM_ACCEPT: f64 = 0.30;
pub const WEIGHT_ONLINE_SHARE: f64 = 0.20;

// ---- Sharpness ----

/// Lowest sharpness a prior alone can report.
pub const DEFAULT_BASELINE_FLOOR: f64 = 0.15;

/// Highest sharpness a prior alone can report.
pub const DEFAULT_BASELINE_CEILING: f64 = 0.60;

/// Pseudo-observation scale of the baseline saturation curve.
pub const DEFAULT_BASELINE_SCALE: f64 = 20.0;

// ---- Identity ----

/// Relative influence of each identity signal on demand.
pub const IDENTITY_WEIGHT_STATUS: f64 = 0.15;
pub const IDENTITY_WEIGHT_TRUST: f64 = 0.10;
pub const IDENTITY_WEIGHT_UPGRADE: f64 = 0.08;

/// Max-min spread below which an identity profile is BALANCED.
pub const DEFAULT_BALANCED_SPREAD: f64 = 0.10;

/// Share of the user-supplied identity profile when blending with regional priors.
pub const DEFAULT_IDENTITY_USER_WEIGHT: f64 = 1.0;

// ---- Pricing ----

/// Optimal-price multiplier at zero premium tolerance.
pub const PRICE_MULTIPLIER_LOW: f64 = 0.90;

/// Optimal-price multiplier at full premium tolerance.
pub const PRICE_MULTIPLIER_HIGH: f64 = 1.20;

/// Acceptable price range as multiples of the target price.
pub const ACCEPTABLE_RANGE_LOW: f64 = 0.85;
pub const ACCEPTABLE_RANGE_HIGH: f64 = 1.20;

/// Premium tolerance at or above which elasticity is low.
pub const ELASTICITY_LOW_TOLERANCE: f64 = 0.60;

/// Premium tolerance at or above which elasticity is medium.
pub const ELASTICITY_MEDIUM_TOLERANCE: f64 = 0.35;

// ---- Pipeline views ----

/// Number of samples on the price/demand curve.
pub const DEFAULT_CURVE_POINTS: usize = 11;

/// Geometric decay between consecutive feature-importance weights.
pub const DEFAULT_FEATURE_DECAY: f64 = 0.85;

/// Lowest feature-importance weight.
pub const DEFAULT_FEATURE_FLOOR: f64 = 0.10;

/// Base of the exponential elasticity decay on the price curve.
pub const CURVE_DECAY_BASE: f64 = 0.9;

/// Exponent multiplier of the price curve decay.
pub const CURVE_DECAY_RATE: f64 = 5.0;

// ---- Report ----

/// Report: confidence below this is REVISE regardless of demand.
pub const DEFAULT_REPORT_MIN_CONFIDENCE: f64 = 0.35;

/// Report: demand below this is NO-GO regardless of confidence.
pub const DEFAULT_REPORT_MIN_DEMAND: f64 = 0.30;

/// Report: confidence at or above this (with adequate demand) is GO.
pub const DEFAULT_REPORT_STRONG_CONFIDENCE: f64 = 0.70;

/// Report: exact and approximate interval bounds further apart than this
/// produce a limitation note.
pub const INTERVAL_DIVERGENCE_TOLERANCE: f64 = 0.02;

/// Beta parameters below this make the normal-approximation interval unreliable.
pub const WEAK_PRIOR_PARAMETER: f64 = 5.0;
