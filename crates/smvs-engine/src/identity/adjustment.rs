//! Identity adjustment of raw demand.
//!
//! `factor = 1 + 0.15·status + 0.10·trust + 0.08·upgrade`
//! `adjusted = min(1, raw·factor)`, never below raw.

use smvs_core::constants::{
    IDENTITY_WEIGHT_STATUS, IDENTITY_WEIGHT_TRUST, IDENTITY_WEIGHT_UPGRADE,
};

use super::profile::IdentityProfile;

pub struct IdentityAdjustment;

impl IdentityAdjustment {
    /// Multiplicative demand factor, `>= 1` for any valid profile.
    pub fn factor(profile: &IdentityProfile) -> f64 {
        1.0 + IDENTITY_WEIGHT_STATUS * profile.status
            + IDENTITY_WEIGHT_TRUST * profile.trust
            + IDENTITY_WEIGHT_UPGRADE * profile.upgrade
    }

    /// Identity-adjusted demand. `raw_demand` is clamped into [0, 1] first.
    pub fn adjust(raw_demand: f64, profile: &IdentityProfile) -> f64 {
        let raw = if raw_demand.is_finite() {
            raw_demand.clamp(0.0, 1.0)
        } else {
            0.0
        };
        (raw * Self::factor(profile)).clamp(raw, 1.0)
    }
}
