//! Data Model: TCO, cash flow, ROI, risk, compliance and ranking results
//!
//! Every result is recomputed in full on each pass and replaced, never
//! patched in place.
use crate::safe_div;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

// =============================================================================
// Total cost of ownership
// =============================================================================

/// TCO breakdown over the analysis horizon
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TcoResult {
    pub software: f64,
    pub hardware: f64,
    pub implementation: f64,
    pub support: f64,
    pub training: f64,
    pub operations: f64,
    pub hidden: f64,
    pub compliance: f64,
    /// Exact sum of the eight components
    pub total: f64,
    pub per_device_per_month: f64,
    /// Part of `software` paid up front (perpetual licence)
    pub software_upfront: f64,
}

impl TcoResult {
    /// Set `total` and `per_device_per_month` from the components.
    pub fn finalize(mut self, devices: u32, years: u32) -> Self {
        self.total = self.component_sum();
        let denominator = devices as f64 * years as f64 * 12.0;
        self.per_device_per_month = safe_div(self.total, denominator);
        self
    }

    pub fn component_sum(&self) -> f64 {
        self.software
            + self.hardware
            + self.implementation
            + self.support
            + self.training
            + self.operations
            + self.hidden
            + self.compliance
    }

    pub fn components(&self) -> [(&'static str, f64); 8] {
        [
            ("software", self.software),
            ("hardware", self.hardware),
            ("implementation", self.implementation),
            ("support", self.support),
            ("training", self.training),
            ("operations", self.operations),
            ("hidden", self.hidden),
            ("compliance", self.compliance),
        ]
    }

    /// One-time cost paid at period 0
    pub fn initial_investment(&self) -> f64 {
        self.implementation + self.software_upfront + self.hardware + self.training
    }

    /// Cost spread across the horizon
    pub fn recurring_total(&self) -> f64 {
        (self.total - self.initial_investment()).max(0.0)
    }
}

// =============================================================================
// Cash flow
// =============================================================================

/// Period length of a projected series
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Granularity {
    #[default]
    Quarterly,
    Monthly,
}

impl Granularity {
    pub fn periods_per_year(&self) -> u32 {
        match self {
            Granularity::Quarterly => 4,
            Granularity::Monthly => 12,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CashFlowPoint {
    pub period: u32,
    pub cumulative_value: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LifecycleEventKind {
    HardwareRefresh,
}

/// One-off cost injected into a series
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LifecycleEvent {
    pub period: u32,
    pub kind: LifecycleEventKind,
    pub amount: f64,
}

/// Cumulative cost series, one point per period including period 0
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CashFlowSeries {
    pub granularity: Granularity,
    pub points: Vec<CashFlowPoint>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub events: Vec<LifecycleEvent>,
}

impl CashFlowSeries {
    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn values(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.cumulative_value).collect()
    }

    pub fn final_value(&self) -> f64 {
        self.points.last().map(|p| p.cumulative_value).unwrap_or(0.0)
    }

    /// Sum of injected lifecycle costs
    pub fn events_total(&self) -> f64 {
        self.events.iter().map(|e| e.amount).sum()
    }

    pub fn is_non_decreasing(&self) -> bool {
        self.points
            .windows(2)
            .all(|w| w[1].cumulative_value >= w[0].cumulative_value)
    }
}

/// Cost attributed to one year (year 0 = initial investment)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct YearlyCost {
    pub year: u32,
    pub cost: f64,
}

// =============================================================================
// ROI
// =============================================================================

/// ROI percentage, with a distinguished value for zero investment
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "camelCase")]
pub enum RoiPercentage {
    Finite(f64),
    /// Positive benefits on zero investment
    Unbounded,
}

impl Default for RoiPercentage {
    fn default() -> Self {
        RoiPercentage::Finite(0.0)
    }
}

impl RoiPercentage {
    pub fn is_unbounded(&self) -> bool {
        matches!(self, RoiPercentage::Unbounded)
    }

    pub fn finite(&self) -> Option<f64> {
        match self {
            RoiPercentage::Finite(value) => Some(*value),
            RoiPercentage::Unbounded => None,
        }
    }

    /// Numeric view clamped to `[0, cap]`; unbounded maps to `cap`
    pub fn capped(&self, cap: f64) -> f64 {
        match self {
            RoiPercentage::Finite(value) => value.clamp(0.0, cap.max(0.0)),
            RoiPercentage::Unbounded => cap.max(0.0),
        }
    }
}

impl std::fmt::Display for RoiPercentage {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            RoiPercentage::Finite(value) => write!(f, "{:.0}%", value),
            RoiPercentage::Unbounded => write!(f, "unbounded"),
        }
    }
}

/// Annual benefit by source
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BenefitBreakdown {
    pub fte_savings: f64,
    pub automation_value: f64,
    pub risk_avoidance: f64,
    pub compliance_automation: f64,
    pub insurance: f64,
    pub downtime: f64,
}

impl BenefitBreakdown {
    pub fn total(&self) -> f64 {
        self.fte_savings
            + self.automation_value
            + self.risk_avoidance
            + self.compliance_automation
            + self.insurance
            + self.downtime
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoiResult {
    pub percentage: RoiPercentage,
    /// Month index of breakeven; `None` when it never breaks even
    pub payback_periods: Option<u32>,
    pub total_benefits: f64,
    pub net_value: f64,
    pub annual_benefits: f64,
    pub benefits: BenefitBreakdown,
    /// Comparison vendor TCO minus this vendor's TCO
    #[serde(skip_serializing_if = "Option::is_none")]
    pub savings_vs_comparison: Option<f64>,
}

// =============================================================================
// Risk
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Serialize, Deserialize)]
pub enum RiskLevel {
    /// 0-33
    #[default]
    Low,
    /// 34-66
    Medium,
    /// 67-100
    High,
}

impl RiskLevel {
    pub fn from_score(score: u32) -> Self {
        match score {
            0..=33 => RiskLevel::Low,
            34..=66 => RiskLevel::Medium,
            _ => RiskLevel::High,
        }
    }
}

impl std::fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            RiskLevel::Low => write!(f, "Low"),
            RiskLevel::Medium => write!(f, "Medium"),
            RiskLevel::High => write!(f, "High"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RiskScore {
    /// Composite 0-100, lower is safer
    pub score: u32,
    pub level: RiskLevel,
    /// Weighted contribution of each factor
    pub factors: BTreeMap<String, f64>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub recommendations: Vec<String>,
}

// =============================================================================
// Compliance
// =============================================================================

/// Framework the vendor does not declare, with representative missing controls
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComplianceGap {
    pub framework: String,
    pub missing_controls: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComplianceScore {
    /// Unweighted mean of `per_framework`
    pub overall: f64,
    pub per_framework: BTreeMap<String, f64>,
    pub gaps: Vec<ComplianceGap>,
}

// =============================================================================
// Operations and ranking
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OperationalImpact {
    pub fte_savings: f64,
    pub deployment_time_reduction_days: f64,
    pub automation_level: f64,
    /// Composite 0-100
    pub efficiency_gain: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecommendationTier {
    Excellent,
    Good,
    Adequate,
    #[default]
    NotRecommended,
    /// The organization's own/primary vendor
    Primary,
}

/// Normalized 0-100 inputs of the overall score
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubScores {
    pub cost: f64,
    pub roi: f64,
    pub risk: f64,
    pub compliance: f64,
    pub operational: f64,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RankingResult {
    pub overall_score: u32,
    pub recommendation: String,
    pub tier: RecommendationTier,
    pub sub_scores: SubScores,
}

// =============================================================================
// Pass output
// =============================================================================

/// Everything computed for one vendor
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VendorResults {
    pub vendor_id: String,
    pub vendor_name: String,
    pub tco: TcoResult,
    pub cash_flow: CashFlowSeries,
    pub yearly: Vec<YearlyCost>,
    pub roi: RoiResult,
    pub risk: RiskScore,
    pub compliance: ComplianceScore,
    pub operational: OperationalImpact,
    pub ranking: RankingResult,
}

/// Output of one calculation pass, keyed by vendor id
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResultSet {
    pub results: BTreeMap<String, VendorResults>,
    /// Requested ids that had no profile
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub skipped: Vec<String>,
    /// `blake3:` digest of the inputs
    pub input_hash: String,
}

impl ResultSet {
    pub fn get(&self, vendor_id: &str) -> Option<&VendorResults> {
        self.results.get(vendor_id)
    }

    pub fn len(&self) -> usize {
        self.results.len()
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    /// Vendor ids by descending overall score, ties broken by id
    pub fn ranked(&self) -> Vec<&str> {
        let mut ids: Vec<&VendorResults> = self.results.values().collect();
        ids.sort_by(|a, b| {
            b.ranking
                .overall_score
                .cmp(&a.ranking.overall_score)
                .then_with(|| a.vendor_id.cmp(&b.vendor_id))
        });
        ids.into_iter().map(|r| r.vendor_id.as_str()).collect()
    }
}
