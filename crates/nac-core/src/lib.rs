//! NAC Core: Data Model, Assumptions and Calculation Context
//!
//! Shared vocabulary of the vendor economic model. Every component crate
//! consumes these types; none of them holds state between calculation passes.

pub mod assumptions;
pub mod config;
pub mod context;
pub mod data_model;
pub mod error;
pub mod vendor;

pub use assumptions::{EngineAssumptions, IndustryFactors, IndustryTable};
pub use config::{
    parse_selected_vendors, FeatureToggles, OrganizationConfig, MAX_YEARS, SELECTED_VENDORS_KEY,
};
pub use context::CalculationContext;
pub use data_model::{
    BenefitBreakdown, CashFlowPoint, CashFlowSeries, ComplianceGap, ComplianceScore, Granularity,
    LifecycleEvent, LifecycleEventKind, OperationalImpact, RankingResult, RecommendationTier,
    ResultSet, RiskLevel, RiskScore, RoiPercentage, RoiResult, SubScores, TcoResult, VendorResults,
    YearlyCost,
};
pub use error::{NacError, NacResult};
pub use vendor::{
    ComplianceCapabilities, Deployment, DeploymentModel, Features, HiddenCosts, Operations, Pricing,
    Savings, ThreatDetection, VendorProfile,
};

/// Version of the economic model formulas
pub const MODEL_VERSION: &str = "1.0.0";

/// Guarded division: degenerate denominators yield `0` instead of NaN/Infinity.
pub fn safe_div(numerator: f64, denominator: f64) -> f64 {
    if denominator == 0.0 || !denominator.is_finite() {
        0.0
    } else {
        numerator / denominator
    }
}
