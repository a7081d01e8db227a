//! Engine assumptions and industry factors
//!
//! Numeric constants of the formulas, kept as data so a deployment can
//! override them without touching calculation code.

use crate::error::{NacError, NacResult};
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Constants used by the cost and benefit formulas
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EngineAssumptions {
    // === Cost side ===

    /// Consultant cost per deployment day when no services quote exists
    pub consultant_day_rate: f64,
    /// Support rate when the profile has none
    pub default_support_rate: f64,
    /// Flat annual compliance overhead
    pub compliance_base_annual: f64,
    /// Annual compliance overhead per device
    pub compliance_per_device_annual: f64,

    // === Benefit side ===

    /// Breach cost when the industry table has none
    pub breach_cost: f64,
    /// Annual breach probability without NAC
    pub breach_probability_base: f64,
    /// Upper bound of the breach risk a vendor can remove
    pub max_risk_reduction: f64,
    pub annual_audit_cost: f64,
    /// Share of one FTE recovered at 100% automation
    pub automation_value_share: f64,
    /// Share of audit cost recovered at 100% compliance automation
    pub compliance_automation_share: f64,
    pub insurance_premium_per_device: f64,

    // === Baselines ===

    pub baseline_fte: f64,
    pub baseline_deployment_days: f64,
}

impl Default for EngineAssumptions {
    fn default() -> Self {
        Self {
            consultant_day_rate: 1_600.0,
            default_support_rate: 0.18,
            compliance_base_annual: 5_000.0,
            compliance_per_device_annual: 5.0,
            breach_cost: 1_000_000.0,
            breach_probability_base: 0.10,
            max_risk_reduction: 0.85,
            annual_audit_cost: 50_000.0,
            automation_value_share: 0.2,
            compliance_automation_share: 0.5,
            insurance_premium_per_device: 25.0,
            baseline_fte: 2.0,
            baseline_deployment_days: 30.0,
        }
    }
}

impl EngineAssumptions {
    pub fn from_yaml(yaml: &str) -> NacResult<Self> {
        serde_yaml::from_str(yaml).map_err(|e| NacError::AssumptionsError(e.to_string()))
    }

    pub fn from_json(json: &str) -> NacResult<Self> {
        serde_json::from_str(json).map_err(|e| NacError::AssumptionsError(e.to_string()))
    }
}

/// Per-industry multipliers and cost references
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct IndustryFactors {
    /// Scales compliance overhead, roughly 0.9-1.3
    pub compliance_multiplier: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub average_breach_cost: Option<f64>,
    pub downtime_cost_per_hour: f64,
}

impl Default for IndustryFactors {
    fn default() -> Self {
        Self {
            compliance_multiplier: 1.0,
            average_breach_cost: None,
            downtime_cost_per_hour: 5_000.0,
        }
    }
}

impl IndustryFactors {
    fn new(compliance_multiplier: f64, average_breach_cost: f64, downtime_cost_per_hour: f64) -> Self {
        Self {
            compliance_multiplier,
            average_breach_cost: Some(average_breach_cost),
            downtime_cost_per_hour,
        }
    }
}

static BUILTIN_INDUSTRIES: Lazy<IndustryTable> = Lazy::new(|| {
    let mut industries = BTreeMap::new();
    industries.insert("technology".to_string(), IndustryFactors::new(1.0, 5_040_000.0, 9_000.0));
    industries.insert("healthcare".to_string(), IndustryFactors::new(1.3, 10_930_000.0, 11_000.0));
    industries.insert("financial".to_string(), IndustryFactors::new(1.3, 5_850_000.0, 18_000.0));
    industries.insert("government".to_string(), IndustryFactors::new(1.25, 4_910_000.0, 8_000.0));
    industries.insert("energy".to_string(), IndustryFactors::new(1.2, 6_720_000.0, 20_000.0));
    industries.insert("retail".to_string(), IndustryFactors::new(1.15, 3_280_000.0, 6_500.0));
    industries.insert("manufacturing".to_string(), IndustryFactors::new(1.05, 4_990_000.0, 22_000.0));
    industries.insert("education".to_string(), IndustryFactors::new(0.9, 3_790_000.0, 3_500.0));
    IndustryTable { industries }
});

/// Lookup table keyed by industry id
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct IndustryTable {
    industries: BTreeMap<String, IndustryFactors>,
}

impl IndustryTable {
    /// Shared built-in table
    pub fn builtin() -> &'static IndustryTable {
        &BUILTIN_INDUSTRIES
    }

    pub fn from_yaml(yaml: &str) -> NacResult<Self> {
        serde_yaml::from_str(yaml).map_err(|e| NacError::AssumptionsError(e.to_string()))
    }

    pub fn insert(&mut self, industry: impl Into<String>, factors: IndustryFactors) {
        self.industries.insert(industry.into(), factors);
    }

    pub fn get(&self, industry: &str) -> Option<&IndustryFactors> {
        self.industries.get(industry)
    }

    /// Factors for `industry`; unknown industries get neutral defaults
    pub fn resolve(&self, industry: &str) -> IndustryFactors {
        self.get(industry).cloned().unwrap_or_default()
    }

    pub fn len(&self) -> usize {
        self.industries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.industries.is_empty()
    }
}
