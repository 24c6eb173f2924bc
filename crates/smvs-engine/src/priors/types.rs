//! Prior set types.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use smvs_core::errors::PriorError;

use crate::calibration::TrackedFeature;
use crate::distribution::BetaDistribution;

/// Supported market regions (GCC).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Region {
    #[serde(rename = "SA")]
    SaudiArabia,
    #[serde(rename = "AE")]
    UnitedArabEmirates,
    #[serde(rename = "KW")]
    Kuwait,
    #[serde(rename = "QA")]
    Qatar,
    #[serde(rename = "BH")]
    Bahrain,
    #[serde(rename = "OM")]
    Oman,
}

impl Region {
    pub const ALL: [Region; 6] = [
        Region::SaudiArabia,
        Region::UnitedArabEmirates,
        Region::Kuwait,
        Region::Qatar,
        Region::Bahrain,
        Region::Oman,
    ];

    /// ISO 3166-1 alpha-2 code.
    pub fn code(&self) -> &'static str {
        match self {
            Self::SaudiArabia => "SA",
            Self::UnitedArabEmirates => "AE",
            Self::Kuwait => "KW",
            Self::Qatar => "QA",
            Self::Bahrain => "BH",
            Self::Oman => "OM",
        }
    }

    pub fn supported_codes() -> Vec<String> {
        Self::ALL.iter().map(|r| r.code().to_string()).collect()
    }
}

impl FromStr for Region {
    type Err = PriorError;

    /// Parse a region code, case-insensitively.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let code = s.trim().to_ascii_uppercase();
        Self::ALL
            .into_iter()
            .find(|r| r.code() == code)
            .ok_or_else(|| PriorError::InvalidRegion {
                code: s.to_string(),
                supported: Self::supported_codes(),
            })
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Provenance label. Ordered weakest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum DataTier {
    /// Cross-category inference.
    Inferred,
    /// Domain-expert estimate.
    Estimated,
    /// Observed real-world data.
    Real,
}

impl DataTier {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Inferred => "INFERRED",
            Self::Estimated => "ESTIMATED",
            Self::Real => "REAL",
        }
    }

    /// Single-letter code used in classification codes.
    pub fn letter(&self) -> char {
        match self {
            Self::Inferred => 'I',
            Self::Estimated => 'E',
            Self::Real => 'R',
        }
    }
}

impl fmt::Display for DataTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BusinessModel {
    B2B,
    B2C,
}

/// Category-level metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryMeta {
    pub category: String,
    pub display_name: String,
    /// Typical ticket size in `currency`.
    pub avg_ticket: f64,
    pub currency: String,
    pub sales_cycle_days: u32,
    pub model: BusinessModel,
}

/// Prior for one feature in one region.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeaturePrior {
    pub distribution: BetaDistribution,
    /// Plausible range of the mean, `min <= max` inside [0, 1].
    pub bounds: (f64, f64),
    pub tier: DataTier,
    pub provenance: String,
}

/// One prior per tracked feature.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegionPriors {
    pub demand_trial: FeaturePrior,
    pub premium_accept: FeaturePrior,
    pub online_share: FeaturePrior,
}

impl RegionPriors {
    pub fn get(&self, feature: TrackedFeature) -> &FeaturePrior {
        match feature {
            TrackedFeature::DemandTrial => &self.demand_trial,
            TrackedFeature::PremiumAccept => &self.premium_accept,
            TrackedFeature::OnlineShare => &self.online_share,
        }
    }
}

/// Relative strength of identity drivers in a region.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct IdentityWeights {
    pub status: f64,
    pub trust: f64,
    pub upgrade: f64,
}

/// A validated prior set for one category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriorSet {
    pub meta: CategoryMeta,
    pub version: String,
    pub source: String,
    pub tier: DataTier,
    pub priors: BTreeMap<Region, RegionPriors>,
    pub identity_weights: BTreeMap<Region, IdentityWeights>,
}

impl PriorSet {
    pub fn category(&self) -> &str {
        &self.meta.category
    }

    pub fn region(&self, region: Region) -> Option<&RegionPriors> {
        self.priors.get(&region)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_region_parse_case_insensitive() {
        assert_eq!("ae".parse::<Region>().unwrap(), Region::UnitedArabEmirates);
        assert_eq!(" SA ".parse::<Region>().unwrap(), Region::SaudiArabia);
    }

    #[test]
    fn test_region_parse_rejects_unknown() {
        let err = "EG".parse::<Region>().unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("'EG'"));
        assert!(msg.contains("SA, AE, KW, QA, BH, OM"));
    }

    #[test]
    fn test_tier_order_weakest_first() {
        assert!(DataTier::Inferred < DataTier::Estimated);
        assert!(DataTier::Estimated < DataTier::Real);
    }

    #[test]
    fn test_region_serde_uses_code() {
        assert_eq!(serde_json::to_string(&Region::Qatar).unwrap(), "\"QA\"");
    }
}
