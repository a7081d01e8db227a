//! Organization configuration
//!
//! Supplied by the caller once per calculation pass and treated as
//! immutable input. Every field carries a documented default, so a partial
//! JSON object deserializes cleanly and gaps are filled here rather than at
//! each use site.

use crate::error::{NacError, NacResult};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Storage key under which the UI persists the selected vendor ids
pub const SELECTED_VENDORS_KEY: &str = "selected-vendors";

pub const DEFAULT_DEVICES: u32 = 2500;
pub const DEFAULT_USERS: u32 = 1500;
pub const DEFAULT_LOCATIONS: u32 = 1;
pub const DEFAULT_YEARS: u32 = 3;
/// Longest analysis horizon accepted; longer requests are clamped
pub const MAX_YEARS: u32 = 50;
pub const DEFAULT_INDUSTRY: &str = "technology";
pub const DEFAULT_FTE_COST: f64 = 120_000.0;

/// Optional benefit terms of the ROI model
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FeatureToggles {
    /// Count breach-risk avoidance as a benefit
    pub include_risk: bool,
    /// Count cyber-insurance premium reduction as a benefit
    pub include_insurance: bool,
    /// Count avoided downtime as a benefit
    pub include_downtime: bool,
}

impl Default for FeatureToggles {
    fn default() -> Self {
        Self {
            include_risk: true,
            include_insurance: false,
            include_downtime: false,
        }
    }
}

/// Organization profile driving one calculation pass
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct OrganizationConfig {
    /// Managed endpoints
    pub devices: u32,
    /// Named users
    pub users: u32,
    /// Physical sites
    pub locations: u32,
    /// Analysis horizon in years (>= 1 once normalized)
    pub years: u32,
    /// Industry id, key into the industry factor table
    pub industry: String,
    /// Fully loaded annual cost of one IT FTE
    pub fte_cost: f64,
    /// Compliance frameworks the organization must satisfy
    pub compliance_frameworks: BTreeSet<String>,
    pub toggles: FeatureToggles,
    /// The organization's own/primary vendor, if any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub primary_vendor: Option<String>,
}

impl Default for OrganizationConfig {
    fn default() -> Self {
        Self {
            devices: DEFAULT_DEVICES,
            users: DEFAULT_USERS,
            locations: DEFAULT_LOCATIONS,
            years: DEFAULT_YEARS,
            industry: DEFAULT_INDUSTRY.to_string(),
            fte_cost: DEFAULT_FTE_COST,
            compliance_frameworks: BTreeSet::new(),
            toggles: FeatureToggles::default(),
            primary_vendor: None,
        }
    }
}

impl OrganizationConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a (possibly partial) JSON object and normalize it
    pub fn from_json(json: &str) -> NacResult<Self> {
        let config: Self =
            serde_json::from_str(json).map_err(|e| NacError::ConfigError(e.to_string()))?;
        Ok(config.normalized())
    }

    /// Same as [`from_json`](Self::from_json) for an already parsed value
    pub fn from_value(value: serde_json::Value) -> NacResult<Self> {
        let config: Self =
            serde_json::from_value(value).map_err(|e| NacError::ConfigError(e.to_string()))?;
        Ok(config.normalized())
    }

    /// Enforce the invariants once, at the boundary.
    ///
    /// `years` is kept within `1..=MAX_YEARS` and an unusable `fte_cost`
    /// reverts to the default. Each correction is logged.
    pub fn normalized(mut self) -> Self {
        if self.years < 1 {
            tracing::warn!(years = self.years, "analysis horizon below one year, using 1");
            self.years = 1;
        }
        if self.years > MAX_YEARS {
            tracing::warn!(years = self.years, max = MAX_YEARS, "analysis horizon too long, clamping");
            self.years = MAX_YEARS;
        }
        if !self.fte_cost.is_finite() || self.fte_cost < 0.0 {
            tracing::warn!(fte_cost = self.fte_cost, "invalid FTE cost, using default");
            self.fte_cost = DEFAULT_FTE_COST;
        }
        if self.industry.trim().is_empty() {
            self.industry = DEFAULT_INDUSTRY.to_string();
        }
        self
    }

    pub fn with_devices(mut self, devices: u32) -> Self {
        self.devices = devices;
        self
    }

    pub fn with_users(mut self, users: u32) -> Self {
        self.users = users;
        self
    }

    pub fn with_years(mut self, years: u32) -> Self {
        self.years = years;
        self
    }

    pub fn with_industry(mut self, industry: impl Into<String>) -> Self {
        self.industry = industry.into();
        self
    }

    pub fn with_fte_cost(mut self, fte_cost: f64) -> Self {
        self.fte_cost = fte_cost;
        self
    }

    pub fn with_framework(mut self, framework: impl Into<String>) -> Self {
        self.compliance_frameworks.insert(framework.into());
        self
    }

    pub fn with_toggles(mut self, toggles: FeatureToggles) -> Self {
        self.toggles = toggles;
        self
    }

    pub fn with_primary_vendor(mut self, vendor_id: impl Into<String>) -> Self {
        self.primary_vendor = Some(vendor_id.into());
        self
    }

    /// Whether `vendor_id` is the organization's primary vendor
    pub fn is_primary(&self, vendor_id: &str) -> bool {
        self.primary_vendor.as_deref() == Some(vendor_id)
    }

    /// Horizon in years within `1..=MAX_YEARS`, whether or not the config
    /// went through [`normalized`](Self::normalized)
    pub fn horizon_years(&self) -> u32 {
        self.years.clamp(1, MAX_YEARS)
    }

    /// Horizon in months
    pub fn months(&self) -> u32 {
        self.horizon_years() * 12
    }
}

/// Parse the persisted `"selected-vendors"` value.
///
/// Non-string entries and duplicates are dropped, order is preserved.
/// Anything that is not a JSON array yields an empty selection.
pub fn parse_selected_vendors(json: &str) -> Vec<String> {
    let value: serde_json::Value = match serde_json::from_str(json) {
        Ok(value) => value,
        Err(e) => {
            tracing::warn!(error = %e, key = SELECTED_VENDORS_KEY, "unreadable vendor selection");
            return Vec::new();
        }
    };

    let Some(items) = value.as_array() else {
        tracing::warn!(key = SELECTED_VENDORS_KEY, "vendor selection is not an array");
        return Vec::new();
    };

    let mut selected: Vec<String> = Vec::with_capacity(items.len());
    for id in items.iter().filter_map(|v| v.as_str()) {
        if !selected.iter().any(|s| s == id) {
            selected.push(id.to_string());
        }
    }
    selected
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = OrganizationConfig::default();
        assert_eq!(config.devices, 2500);
        assert_eq!(config.years, 3);
        assert_eq!(config.fte_cost, 120_000.0);
        assert_eq!(config.industry, "technology");
        assert!(config.toggles.include_risk);
        assert!(!config.toggles.include_insurance);
    }

    #[test]
    fn test_partial_json_fills_defaults() {
        let config = OrganizationConfig::from_json(r#"{"devices": 500, "industry": "healthcare"}"#).unwrap();
        assert_eq!(config.devices, 500);
        assert_eq!(config.industry, "healthcare");
        assert_eq!(config.years, 3);
        assert_eq!(config.users, 1500);
        assert_eq!(config.fte_cost, 120_000.0);
    }

    #[test]
    fn test_camel_case_fields() {
        let config = OrganizationConfig::from_json(
            r#"{"fteCost": 90000, "complianceFrameworks": ["HIPAA", "PCI-DSS"], "toggles": {"includeDowntime": true}}"#,
        )
        .unwrap();
        assert_eq!(config.fte_cost, 90_000.0);
        assert!(config.compliance_frameworks.contains("HIPAA"));
        assert!(config.toggles.include_downtime);
        assert!(config.toggles.include_risk);
    }

    #[test]
    fn test_normalize_years_and_fte() {
        let config = OrganizationConfig::new()
            .with_years(0)
            .with_fte_cost(-5.0)
            .normalized();
        assert_eq!(config.years, 1);
        assert_eq!(config.fte_cost, DEFAULT_FTE_COST);
    }

    #[test]
    fn test_normalize_clamps_long_horizon() {
        let config = OrganizationConfig::from_json(r#"{"years": 1100000000}"#).unwrap();
        assert_eq!(config.years, MAX_YEARS);
        assert_eq!(config.months(), MAX_YEARS * 12);

        let config = OrganizationConfig::new().with_years(MAX_YEARS).normalized();
        assert_eq!(config.years, MAX_YEARS);
    }

    #[test]
    fn test_horizon_without_normalizing() {
        let config = OrganizationConfig::new().with_years(u32::MAX);
        assert_eq!(config.horizon_years(), MAX_YEARS);
        assert_eq!(config.months(), 600);
        assert_eq!(OrganizationConfig::new().with_years(0).horizon_years(), 1);
    }

    #[test]
    fn test_malformed_config() {
        assert!(OrganizationConfig::from_json("{not json").is_err());
        assert!(OrganizationConfig::from_json(r#"{"devices": -3}"#).is_err());
    }

    #[test]
    fn test_primary_vendor() {
        let config = OrganizationConfig::new().with_primary_vendor("portnox");
        assert!(config.is_primary("portnox"));
        assert!(!config.is_primary("cisco"));
    }

    #[test]
    fn test_parse_selected_vendors() {
        let ids = parse_selected_vendors(r#"["portnox", "cisco", 42, "portnox", "aruba"]"#);
        assert_eq!(ids, vec!["portnox", "cisco", "aruba"]);

        assert!(parse_selected_vendors(r#"{"portnox": true}"#).is_empty());
        assert!(parse_selected_vendors("not json").is_empty());
    }
}
