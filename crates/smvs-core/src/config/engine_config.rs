//! Top-level engine configuration with layered resolution.

use std::path::Path;

use serde::{Deserialize, Serialize};

use super::{DecisionConfig, IdentityConfig, PipelineConfig, ReportConfig, SharpnessConfig};
use crate::constants;
use crate::errors::ConfigError;

/// Top-level configuration aggregating all sub-configs.
///
/// Resolution order (highest priority first):
/// 1. Environment variables (`SMVS_*`)
/// 2. Project config (`smvs.toml` in the config root)
/// 3. Compiled defaults
///
/// The resolved config is passed explicitly into the builder and pipeline.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct EngineConfig {
    pub decision: DecisionConfig,
    pub sharpness: SharpnessConfig,
    pub identity: IdentityConfig,
    pub pipeline: PipelineConfig,
    pub report: ReportConfig,
}

impl EngineConfig {
    /// Load configuration from `root/smvs.toml` (optional) and `SMVS_*` env vars.
    pub fn load(root: &Path) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        let project_config_path = root.join(constants::CONFIG_FILE_NAME);
        if project_config_path.exists() {
            Self::merge_toml_file(&mut config, &project_config_path)?;
            ::tracing::debug!(path = %project_config_path.display(), "merged project config");
        }

        Self::apply_env_overrides(&mut config);

        Self::validate(&config)?;
        Ok(config)
    }

    /// Load configuration from a TOML string.
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(toml_str).map_err(|e| ConfigError::ParseError {
            path: "<string>".to_string(),
            message: e.to_string(),
        })?;
        Self::validate(&config)?;
        Ok(config)
    }

    /// Validate the configuration values.
    pub fn validate(config: &EngineConfig) -> Result<(), ConfigError> {
        let unit_fields = [
            ("decision.strong_threshold", config.decision.strong_threshold),
            ("decision.revise_threshold", config.decision.revise_threshold),
            ("sharpness.baseline_floor", config.sharpness.baseline_floor),
            ("sharpness.baseline_ceiling", config.sharpness.baseline_ceiling),
            ("identity.balanced_spread", config.identity.balanced_spread),
            ("identity.user_weight", config.identity.user_weight),
            ("pipeline.feature_floor", config.pipeline.feature_floor),
            ("report.min_confidence", config.report.min_confidence),
            ("report.min_demand", config.report.min_demand),
            ("report.strong_confidence", config.report.strong_confidence),
        ];
        for (field, value) in unit_fields {
            if let Some(v) = value {
                if !(0.0..=1.0).contains(&v) {
                    return Err(validation_failed(field, "must be between 0.0 and 1.0"));
                }
            }
        }

        if config.decision.effective_revise_threshold()
            >= config.decision.effective_strong_threshold()
        {
            return Err(validation_failed(
                "decision.revise_threshold",
                "must be below decision.strong_threshold",
            ));
        }
        if config.sharpness.effective_baseline_floor()
            >= config.sharpness.effective_baseline_ceiling()
        {
            return Err(validation_failed(
                "sharpness.baseline_floor",
                "must be below sharpness.baseline_ceiling",
            ));
        }
        let scale = config.sharpness.effective_baseline_scale();
        if !scale.is_finite() || scale <= 0.0 {
            return Err(validation_failed(
                "sharpness.baseline_scale",
                "must be greater than 0",
            ));
        }
        if config.pipeline.effective_curve_points() < 2 {
            return Err(validation_failed("pipeline.curve_points", "must be at least 2"));
        }
        let decay = config.pipeline.effective_feature_decay();
        if !(decay > 0.0 && decay <= 1.0) {
            return Err(validation_failed(
                "pipeline.feature_decay",
                "must be in (0.0, 1.0]",
            ));
        }
        if config.report.effective_min_confidence() > config.report.effective_strong_confidence() {
            return Err(validation_failed(
                "report.min_confidence",
                "must not exceed report.strong_confidence",
            ));
        }
        Ok(())
    }

    /// Merge a TOML file into the existing config.
    /// Unknown keys are silently ignored (forward-compatible).
    fn merge_toml_file(config: &mut EngineConfig, path: &Path) -> Result<(), ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|_| ConfigError::FileNotFound {
            path: path.display().to_string(),
        })?;

        let file_config: EngineConfig =
            toml::from_str(&content).map_err(|e| ConfigError::ParseError {
                path: path.display().to_string(),
                message: e.to_string(),
            })?;

        Self::merge(config, &file_config);
        Ok(())
    }

    /// Merge `other` into `base`; `other` wins only where it has a `Some` value.
    fn merge(base: &mut EngineConfig, other: &EngineConfig) {
        fn take<T: Clone>(base: &mut Option<T>, other: &Option<T>) {
            if other.is_some() {
                base.clone_from(other);
            }
        }

        take(&mut base.decision.strong_threshold, &other.decision.strong_threshold);
        take(&mut base.decision.revise_threshold, &other.decision.revise_threshold);

        take(&mut base.sharpness.baseline_floor, &other.sharpness.baseline_floor);
        take(&mut base.sharpness.baseline_ceiling, &other.sharpness.baseline_ceiling);
        take(&mut base.sharpness.baseline_scale, &other.sharpness.baseline_scale);

        take(&mut base.identity.balanced_spread, &other.identity.balanced_spread);
        take(&mut base.identity.user_weight, &other.identity.user_weight);

        take(&mut base.pipeline.curve_points, &other.pipeline.curve_points);
        take(&mut base.pipeline.feature_decay, &other.pipeline.feature_decay);
        take(&mut base.pipeline.feature_floor, &other.pipeline.feature_floor);

        take(&mut base.report.min_confidence, &other.report.min_confidence);
        take(&mut base.report.min_demand, &other.report.min_demand);
        take(&mut base.report.strong_confidence, &other.report.strong_confidence);
    }

    /// Apply environment variable overrides.
    /// Pattern: `SMVS_DECISION_STRONG_THRESHOLD`, `SMVS_PIPELINE_CURVE_POINTS`, etc.
    /// Unparseable values are ignored.
    fn apply_env_overrides(config: &mut EngineConfig) {
        fn env_f64(key: &str) -> Option<f64> {
            std::env::var(key).ok().and_then(|v| v.parse::<f64>().ok())
        }

        if let Some(v) = env_f64("SMVS_DECISION_STRONG_THRESHOLD") {
            config.decision.strong_threshold = Some(v);
        }
        if let Some(v) = env_f64("SMVS_DECISION_REVISE_THRESHOLD") {
            config.decision.revise_threshold = Some(v);
        }
        if let Some(v) = env_f64("SMVS_SHARPNESS_BASELINE_SCALE") {
            config.sharpness.baseline_scale = Some(v);
        }
        if let Some(v) = env_f64("SMVS_IDENTITY_USER_WEIGHT") {
            config.identity.user_weight = Some(v);
        }
        if let Ok(val) = std::env::var("SMVS_PIPELINE_CURVE_POINTS") {
            if let Ok(v) = val.parse::<usize>() {
                config.pipeline.curve_points = Some(v);
            }
        }
        if let Some(v) = env_f64("SMVS_REPORT_MIN_CONFIDENCE") {
            config.report.min_confidence = Some(v);
        }
        if let Some(v) = env_f64("SMVS_REPORT_MIN_DEMAND") {
            config.report.min_demand = Some(v);
        }
    }

    /// Serialize the config back to TOML.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::ParseError {
            path: "<serialization>".to_string(),
            message: e.to_string(),
        })
    }
}

fn validation_failed(field: &str, message: &str) -> ConfigError {
    ConfigError::ValidationFailed {
        field: field.to_string(),
        message: message.to_string(),
    }
}
