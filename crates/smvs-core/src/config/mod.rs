//! Configuration system for SMVS.
//! TOML-based, 3-layer resolution: env > project file > defaults.

pub mod decision_config;
pub mod engine_config;
pub mod identity_config;
pub mod pipeline_config;
pub mod report_config;
pub mod sharpness_config;

pub use decision_config::DecisionConfig;
pub use engine_config::EngineConfig;
pub use identity_config::IdentityConfig;
pub use pipeline_config::PipelineConfig;
pub use report_config::ReportConfig;
pub use sharpness_config::SharpnessConfig;
