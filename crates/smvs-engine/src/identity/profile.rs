//! Identity signal profile.

use std::fmt;

use serde::{Deserialize, Serialize};
use smvs_core::config::IdentityConfig;
use smvs_core::errors::InputError;
use smvs_core::Validation;

use crate::priors::IdentityWeights;

/// Raw signal strengths, each in [0, 1]. Ideally they sum to about 1.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct IdentitySignals {
    pub status: f64,
    pub trust: f64,
    pub upgrade: f64,
}

impl IdentitySignals {
    pub fn new(status: f64, trust: f64, upgrade: f64) -> Self {
        Self {
            status,
            trust,
            upgrade,
        }
    }

    fn fields(&self) -> [(&'static str, f64); 3] {
        [
            ("status", self.status),
            ("trust", self.trust),
            ("upgrade", self.upgrade),
        ]
    }

    /// Collect every out-of-range signal.
    pub fn validate(&self) -> Validation<IdentitySignals> {
        let reasons = self
            .fields()
            .into_iter()
            .filter(|(_, v)| !(0.0..=1.0).contains(v))
            .map(|(name, v)| format!("identity.{name} must be in [0, 1], got {v}"))
            .collect();
        Validation::from_reasons(*self, reasons)
    }

    /// Reject the first out-of-range signal.
    fn checked(self) -> Result<Self, InputError> {
        match self.fields().into_iter().find(|(_, v)| !(0.0..=1.0).contains(v)) {
            Some((field, value)) => Err(InputError::InvalidIdentity {
                field: field.to_string(),
                value,
            }),
            None => Ok(self),
        }
    }
}

impl From<IdentityWeights> for IdentitySignals {
    fn from(w: IdentityWeights) -> Self {
        Self::new(w.status, w.trust, w.upgrade)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum DominantSignal {
    Status,
    Trust,
    Upgrade,
    Balanced,
}

impl fmt::Display for DominantSignal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Status => "STATUS",
            Self::Trust => "TRUST",
            Self::Upgrade => "UPGRADE",
            Self::Balanced => "BALANCED",
        })
    }
}

/// How the profile's signal strengths were obtained.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BlendMethod {
    /// Taken from the caller as is.
    UserInput,
    /// Taken from the regional identity prior.
    RegionalPrior,
    /// Caller input blended with the regional identity prior.
    Calibrated,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct IdentityProfile {
    pub status: f64,
    pub trust: f64,
    pub upgrade: f64,
    pub dominant: DominantSignal,
    pub blend_method: BlendMethod,
}

impl IdentityProfile {
    /// Build a profile from validated signals.
    pub fn new(
        signals: IdentitySignals,
        blend_method: BlendMethod,
        balanced_spread: f64,
    ) -> Result<Self, InputError> {
        let s = signals.checked()?;
        Ok(Self {
            status: s.status,
            trust: s.trust,
            upgrade: s.upgrade,
            dominant: dominant_signal(&s, balanced_spread),
            blend_method,
        })
    }

    /// Resolve the profile for a build.
    ///
    /// No user signals: regional prior. `user_weight >= 1`: user input.
    /// `0 < user_weight < 1`: linear blend of the two (calibrated).
    pub fn resolve(
        user: Option<IdentitySignals>,
        regional: IdentityWeights,
        config: &IdentityConfig,
    ) -> Result<Self, InputError> {
        let spread = config.effective_balanced_spread();
        let regional = IdentitySignals::from(regional);
        let w = config.effective_user_weight().clamp(0.0, 1.0);
        match user {
            None => Self::new(regional, BlendMethod::RegionalPrior, spread),
            Some(u) if w >= 1.0 => Self::new(u, BlendMethod::UserInput, spread),
            Some(u) if w <= 0.0 => {
                u.checked()?;
                Self::new(regional, BlendMethod::RegionalPrior, spread)
            }
            Some(u) => {
                let u = u.checked()?;
                let blended = IdentitySignals::new(
                    w * u.status + (1.0 - w) * regional.status,
                    w * u.trust + (1.0 - w) * regional.trust,
                    w * u.upgrade + (1.0 - w) * regional.upgrade,
                );
                Self::new(blended, BlendMethod::Calibrated, spread)
            }
        }
    }

    pub fn signals(&self) -> IdentitySignals {
        IdentitySignals::new(self.status, self.trust, self.upgrade)
    }
}

/// BALANCED when max − min is below `balanced_spread`, else the strongest
/// signal (ties resolve status, then trust, then upgrade).
fn dominant_signal(s: &IdentitySignals, balanced_spread: f64) -> DominantSignal {
    let max = s.status.max(s.trust).max(s.upgrade);
    let min = s.status.min(s.trust).min(s.upgrade);
    if max - min < balanced_spread {
        DominantSignal::Balanced
    } else if s.status >= max {
        DominantSignal::Status
    } else if s.trust >= max {
        DominantSignal::Trust
    } else {
        DominantSignal::Upgrade
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn regional() -> IdentityWeights {
        IdentityWeights {
            status: 0.2,
            trust: 0.6,
            upgrade: 0.2,
        }
    }

    #[test]
    fn test_status_dominant() {
        let p = IdentityProfile::new(
            IdentitySignals::new(0.8, 0.1, 0.1),
            BlendMethod::UserInput,
            0.10,
        )
        .unwrap();
        assert_eq!(p.dominant, DominantSignal::Status);
    }

    #[test]
    fn test_balanced_below_spread() {
        let p = IdentityProfile::new(
            IdentitySignals::new(0.36, 0.33, 0.31),
            BlendMethod::UserInput,
            0.10,
        )
        .unwrap();
        assert_eq!(p.dominant, DominantSignal::Balanced);
    }

    #[test]
    fn test_spread_at_threshold_is_not_balanced() {
        let p = IdentityProfile::new(
            IdentitySignals::new(0.25, 0.5, 0.25),
            BlendMethod::UserInput,
            0.10,
        )
        .unwrap();
        assert_eq!(p.dominant, DominantSignal::Trust);
    }

    #[test]
    fn test_out_of_range_rejected() {
        let err = IdentityProfile::new(
            IdentitySignals::new(0.5, 1.2, 0.1),
            BlendMethod::UserInput,
            0.10,
        )
        .unwrap_err();
        match err {
            InputError::InvalidIdentity { field, value } => {
                assert_eq!(field, "trust");
                assert_eq!(value, 1.2);
            }
            other => panic!("expected InvalidIdentity, got {other:?}"),
        }
    }

    #[test]
    fn test_validate_collects_all() {
        let v = IdentitySignals::new(-0.1, f64::NAN, 2.0).validate();
        assert_eq!(v.reasons().len(), 3);
    }

    #[test]
    fn test_resolve_without_user_uses_region() {
        let p = IdentityProfile::resolve(None, regional(), &IdentityConfig::default()).unwrap();
        assert_eq!(p.blend_method, BlendMethod::RegionalPrior);
        assert_eq!(p.dominant, DominantSignal::Trust);
    }

    #[test]
    fn test_resolve_default_keeps_user_input() {
        let user = IdentitySignals::new(0.7, 0.2, 0.1);
        let p = IdentityProfile::resolve(Some(user), regional(), &IdentityConfig::default())
            .unwrap();
        assert_eq!(p.blend_method, BlendMethod::UserInput);
        assert_eq!(p.signals(), user);
    }

    #[test]
    fn test_resolve_blends() {
        let config = IdentityConfig {
            user_weight: Some(0.5),
            ..Default::default()
        };
        let p = IdentityProfile::resolve(
            Some(IdentitySignals::new(0.8, 0.0, 0.2)),
            regional(),
            &config,
        )
        .unwrap();
        assert_eq!(p.blend_method, BlendMethod::Calibrated);
        assert!((p.status - 0.5).abs() < 1e-12);
        assert!((p.trust - 0.3).abs() < 1e-12);
    }

    #[test]
    fn test_resolve_rejects_invalid_user_even_when_ignored() {
        let config = IdentityConfig {
            user_weight: Some(0.0),
            ..Default::default()
        };
        assert!(IdentityProfile::resolve(
            Some(IdentitySignals::new(1.5, 0.0, 0.0)),
            regional(),
            &config
        )
        .is_err());
    }
}
