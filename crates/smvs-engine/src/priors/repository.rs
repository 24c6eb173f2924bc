//! Prior repository: parses, validates and serves prior sets by category.
//!
//! Built-in sets are embedded TOML. Malformed data is rejected outright;
//! there is no fallback to a default category.

use std::collections::BTreeMap;

use serde::Deserialize;
use smvs_core::errors::PriorError;
use smvs_core::Validation;

use super::types::{
    BusinessModel, CategoryMeta, DataTier, FeaturePrior, IdentityWeights, PriorSet, Region,
    RegionPriors,
};
use crate::distribution::BetaDistribution;

const BUILTIN_SETS: [&str; 4] = [
    include_str!("data/health_supplements.toml"),
    include_str!("data/beauty_personal_care.toml"),
    include_str!("data/food_beverage.toml"),
    include_str!("data/saas_b2b.toml"),
];

/// Validated prior sets keyed by category.
#[derive(Debug, Clone, Default)]
pub struct PriorRepository {
    sets: BTreeMap<String, PriorSet>,
}

impl PriorRepository {
    /// Repository of the embedded category prior sets.
    pub fn builtin() -> Result<Self, PriorError> {
        Self::from_toml_sources(BUILTIN_SETS)
    }

    /// Build a repository from TOML documents, one prior set each.
    pub fn from_toml_sources<'a>(
        sources: impl IntoIterator<Item = &'a str>,
    ) -> Result<Self, PriorError> {
        let mut repo = Self::default();
        for source in sources {
            let set = parse_prior_set(source)?;
            repo.sets.insert(set.meta.category.clone(), set);
        }
        Ok(repo)
    }

    /// Supported categories, sorted.
    pub fn supported_categories(&self) -> Vec<String> {
        self.sets.keys().cloned().collect()
    }

    /// Look up the prior set for a category. Matching ignores surrounding
    /// whitespace and ASCII case.
    pub fn load_priors(&self, category: &str) -> Result<&PriorSet, PriorError> {
        let key = normalize_category(category);
        self.sets
            .get(&key)
            .ok_or_else(|| PriorError::UnsupportedCategory {
                category: category.to_string(),
                supported: self.supported_categories(),
            })
    }
}

fn normalize_category(category: &str) -> String {
    category.trim().to_ascii_uppercase()
}

/// Parse and validate one prior set document.
pub fn parse_prior_set(source: &str) -> Result<PriorSet, PriorError> {
    let raw: RawPriorSet = toml::from_str(source).map_err(|e| PriorError::Parse {
        category: peek_category(source),
        message: e.to_string(),
    })?;
    match raw.validate() {
        Validation::Valid(set) => Ok(set),
        Validation::Invalid(reasons) => Err(PriorError::Malformed {
            category: raw.category,
            reasons,
        }),
    }
}

/// Best-effort category name for parse errors.
fn peek_category(source: &str) -> String {
    #[derive(Deserialize)]
    struct Peek {
        category: Option<String>,
    }
    toml::from_str::<Peek>(source)
        .ok()
        .and_then(|p| p.category)
        .unwrap_or_else(|| "<unknown>".to_string())
}

#[derive(Debug, Deserialize)]
struct RawPriorSet {
    category: String,
    version: String,
    source: String,
    tier: DataTier,
    meta: RawMeta,
    #[serde(default)]
    regions: BTreeMap<String, RawRegion>,
}

#[derive(Debug, Deserialize)]
struct RawMeta {
    display_name: String,
    avg_ticket: f64,
    currency: String,
    sales_cycle_days: u32,
    model: BusinessModel,
}

#[derive(Debug, Deserialize)]
struct RawRegion {
    demand_trial: Option<RawFeaturePrior>,
    premium_accept: Option<RawFeaturePrior>,
    online_share: Option<RawFeaturePrior>,
    identity: Option<IdentityWeights>,
}

#[derive(Debug, Clone, Deserialize)]
struct RawFeaturePrior {
    alpha: f64,
    beta: f64,
    min: f64,
    max: f64,
    tier: DataTier,
    #[serde(default)]
    provenance: String,
}

impl RawPriorSet {
    fn validate(&self) -> Validation<PriorSet> {
        let mut reasons = Vec::new();

        if self.category.trim().is_empty() {
            reasons.push("category must not be empty".to_string());
        }
        if normalize_category(&self.category) != self.category {
            reasons.push(format!(
                "category '{}' must be upper-case without surrounding whitespace",
                self.category
            ));
        }
        if !(self.meta.avg_ticket.is_finite() && self.meta.avg_ticket > 0.0) {
            reasons.push(format!(
                "meta.avg_ticket must be > 0, got {}",
                self.meta.avg_ticket
            ));
        }

        let mut priors = BTreeMap::new();
        let mut identity_weights = BTreeMap::new();

        for code in self.regions.keys() {
            if code.parse::<Region>().is_err() || code.to_ascii_uppercase() != *code {
                reasons.push(format!(
                    "regions.{code} is not a supported region code ({})",
                    Region::supported_codes().join(", ")
                ));
            }
        }

        for region in Region::ALL {
            let Some(raw) = self.regions.get(region.code()) else {
                reasons.push(format!("regions.{region} is missing"));
                continue;
            };

            let dt = validate_feature(&mut reasons, region, "demand_trial", &raw.demand_trial);
            let pa = validate_feature(&mut reasons, region, "premium_accept", &raw.premium_accept);
            let os = validate_feature(&mut reasons, region, "online_share", &raw.online_share);
            if let (Some(demand_trial), Some(premium_accept), Some(online_share)) = (dt, pa, os) {
                priors.insert(
                    region,
                    RegionPriors {
                        demand_trial,
                        premium_accept,
                        online_share,
                    },
                );
            }

            match raw.identity {
                None => reasons.push(format!("regions.{region}.identity is missing")),
                Some(w) => {
                    let mut ok = true;
                    for (name, v) in [("status", w.status), ("trust", w.trust), ("upgrade", w.upgrade)] {
                        if !(0.0..=1.0).contains(&v) {
                            reasons.push(format!(
                                "regions.{region}.identity.{name} must be in [0, 1], got {v}"
                            ));
                            ok = false;
                        }
                    }
                    if ok {
                        identity_weights.insert(region, w);
                    }
                }
            }
        }

        let set = PriorSet {
            meta: CategoryMeta {
                category: self.category.clone(),
                display_name: self.meta.display_name.clone(),
                avg_ticket: self.meta.avg_ticket,
                currency: self.meta.currency.clone(),
                sales_cycle_days: self.meta.sales_cycle_days,
                model: self.meta.model,
            },
            version: self.version.clone(),
            source: self.source.clone(),
            tier: self.tier,
            priors,
            identity_weights,
        };
        Validation::from_reasons(set, reasons)
    }
}

fn validate_feature(
    reasons: &mut Vec<String>,
    region: Region,
    name: &str,
    raw: &Option<RawFeaturePrior>,
) -> Option<FeaturePrior> {
    let Some(raw) = raw else {
        reasons.push(format!("regions.{region}.{name} is missing"));
        return None;
    };
    let before = reasons.len();
    let path = format!("regions.{region}.{name}");

    let distribution = match BetaDistribution::new(raw.alpha, raw.beta) {
        Ok(d) => Some(d),
        Err(_) => {
            reasons.push(format!(
                "{path} requires alpha > 0 and beta > 0, got alpha={}, beta={}",
                raw.alpha, raw.beta
            ));
            None
        }
    };
    for (bound, v) in [("min", raw.min), ("max", raw.max)] {
        if !(0.0..=1.0).contains(&v) {
            reasons.push(format!("{path}.{bound} must be in [0, 1], got {v}"));
        }
    }
    if raw.min > raw.max {
        reasons.push(format!(
            "{path} bounds are inverted: min={} > max={}",
            raw.min, raw.max
        ));
    }

    if reasons.len() > before {
        return None;
    }
    distribution.map(|distribution| FeaturePrior {
        distribution,
        bounds: (raw.min, raw.max),
        tier: raw.tier,
        provenance: raw.provenance.clone(),
    })
}
