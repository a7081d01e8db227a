//! Vendor profiles
//!
//! Cost, deployment, operations, feature and compliance record for one NAC
//! vendor. Owned by the vendor catalog and read-only to the engine. Absent
//! fields resolve to documented defaults (mostly `0`), never to an error.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// Where the product runs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum DeploymentModel {
    #[default]
    #[serde(rename = "Cloud", alias = "cloud", alias = "SaaS", alias = "saas")]
    Cloud,
    #[serde(
        rename = "On-Premises",
        alias = "on-premises",
        alias = "On-Prem",
        alias = "onprem"
    )]
    OnPremises,
    #[serde(rename = "Hybrid", alias = "hybrid")]
    Hybrid,
}

impl DeploymentModel {
    pub fn is_cloud(&self) -> bool {
        matches!(self, DeploymentModel::Cloud)
    }
}

impl std::fmt::Display for DeploymentModel {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            DeploymentModel::Cloud => write!(f, "Cloud"),
            DeploymentModel::OnPremises => write!(f, "On-Premises"),
            DeploymentModel::Hybrid => write!(f, "Hybrid"),
        }
    }
}

/// Licensing and hardware price points
///
/// Software is resolved from the first present field in the order
/// `per_device_monthly`, `per_device_annual`, `per_user_annual`, `flat_license`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Pricing {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub per_device_monthly: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub per_device_annual: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub per_user_annual: Option<f64>,
    /// One-time perpetual licence
    #[serde(skip_serializing_if = "Option::is_none")]
    pub flat_license: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hardware_per_device: Option<f64>,
    /// Fixed appliance/server cost independent of device count
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hardware_base: Option<f64>,
    /// Annual support as a fraction of software + hardware (0.18 = 18%)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub support_rate: Option<f64>,
    /// Fixed annual support fee; wins over `support_rate`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub support_annual: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Deployment {
    pub model: DeploymentModel,
    /// Deployment duration in days
    #[serde(alias = "time")]
    pub time_days: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub professional_services_cost: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Training {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub admin_cost: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub per_user_cost: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Operations {
    /// FTEs needed to run the product
    pub fte: f64,
    /// FTEs the organization spends without it; falls back to the engine baseline
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fte_baseline: Option<f64>,
    pub training: Training,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ZeroTrust {
    /// Zero-trust maturity, 0-100
    pub score: f64,
}

/// Threat detection capability tier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ThreatDetection {
    AiBased,
    RuleBased,
    None,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SecurityFeatures {
    /// Mean time to remediate, minutes
    #[serde(alias = "mttrMinutes", skip_serializing_if = "Option::is_none")]
    pub mttr: Option<f64>,
    pub ai_threat_detection: bool,
    #[serde(alias = "basicThreatDetection")]
    pub rule_based_threat_detection: bool,
}

impl SecurityFeatures {
    /// Unknown MTTR is treated as four hours
    pub const DEFAULT_MTTR_MINUTES: f64 = 240.0;

    pub fn mttr_minutes(&self) -> f64 {
        self.mttr.unwrap_or(Self::DEFAULT_MTTR_MINUTES)
    }

    pub fn threat_detection(&self) -> ThreatDetection {
        if self.ai_threat_detection {
            ThreatDetection::AiBased
        } else if self.rule_based_threat_detection {
            ThreatDetection::RuleBased
        } else {
            ThreatDetection::None
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ComplianceFeatures {
    /// Compliance automation level, 0-100. `None` means not assessed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub automation: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Features {
    pub zero_trust: ZeroTrust,
    /// Operational automation level, 0-100
    pub automation: f64,
    pub security: SecurityFeatures,
    pub compliance: ComplianceFeatures,
}

/// Declared compliance support
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ComplianceCapabilities {
    /// Frameworks the vendor claims to support
    pub frameworks: BTreeSet<String>,
    /// Vendor-specific requirement ratings (0-10): framework -> requirement -> rating
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub ratings: BTreeMap<String, BTreeMap<String, f64>>,
}

impl ComplianceCapabilities {
    pub fn supports(&self, framework: &str) -> bool {
        self.frameworks.contains(framework)
    }
}

/// Benefit inputs for the optional ROI terms
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Savings {
    /// Cyber-insurance premium discount the vendor enables, percent
    #[serde(skip_serializing_if = "Option::is_none")]
    pub insurance_discount_percent: Option<f64>,
    /// Downtime hours avoided per year
    #[serde(skip_serializing_if = "Option::is_none")]
    pub downtime_hours_avoided: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct HiddenCosts {
    /// Annual hidden-cost estimate
    #[serde(alias = "total", skip_serializing_if = "Option::is_none")]
    pub annual: Option<f64>,
}

/// Complete vendor record
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct VendorProfile {
    pub id: String,
    pub name: String,
    pub pricing: Pricing,
    pub deployment: Deployment,
    pub operations: Operations,
    pub features: Features,
    pub compliance: ComplianceCapabilities,
    pub savings: Savings,
    pub hidden_costs: HiddenCosts,
}

impl VendorProfile {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn with_model(mut self, model: DeploymentModel) -> Self {
        self.deployment.model = model;
        self
    }

    pub fn with_pricing(mut self, pricing: Pricing) -> Self {
        self.pricing = pricing;
        self
    }

    pub fn with_fte(mut self, fte: f64) -> Self {
        self.operations.fte = fte;
        self
    }

    pub fn with_zero_trust(mut self, score: f64) -> Self {
        self.features.zero_trust.score = score;
        self
    }

    pub fn with_automation(mut self, automation: f64) -> Self {
        self.features.automation = automation;
        self
    }

    pub fn with_compliance_automation(mut self, automation: f64) -> Self {
        self.features.compliance.automation = Some(automation);
        self
    }

    pub fn with_framework(mut self, framework: impl Into<String>) -> Self {
        self.compliance.frameworks.insert(framework.into());
        self
    }

    /// Display name, falling back to the id
    pub fn display_name(&self) -> &str {
        if self.name.is_empty() {
            &self.id
        } else {
            &self.name
        }
    }
}
