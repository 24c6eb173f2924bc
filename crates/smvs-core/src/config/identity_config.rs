//! Identity profile configuration.

use serde::{Deserialize, Serialize};

use crate::constants;

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct IdentityConfig {
    /// Max-min spread below which a profile is BALANCED. Default: 0.10.
    pub balanced_spread: Option<f64>,
    /// Share of the user-supplied profile when blending with the regional
    /// identity prior. 1.0 keeps the user profile as is. Default: 1.0.
    pub user_weight: Option<f64>,
}

impl IdentityConfig {
    pub fn effective_balanced_spread(&self) -> f64 {
        self.balanced_spread
            .unwrap_or(constants::DEFAULT_BALANCED_SPREAD)
    }

    pub fn effective_user_weight(&self) -> f64 {
        self.user_weight
            .unwrap_or(constants::DEFAULT_IDENTITY_USER_WEIGHT)
    }
}
