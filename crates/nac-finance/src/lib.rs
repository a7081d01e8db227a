//! NAC Finance: cost, cash flow and return
//!
//! ```text
//! (OrganizationConfig, VendorProfile) → CostAggregator → TcoResult
//!                                                          │
//!                       ┌──────────────────────────────────┤
//!                       ↓                                  ↓
//!              TimeSeriesProjector                     RoiEngine
//!                       ↓                                  ↓
//!                CashFlowSeries                        RoiResult
//!
//! SensitivityAnalyzer: one input varied ±range% → (TCO, ROI) per step
//! ```
//!
//! # Example
//!
//! ```
//! use nac_core::{CalculationContext, OrganizationConfig, VendorProfile, Pricing};
//! use nac_finance::{CostAggregator, RoiEngine};
//!
//! let ctx = CalculationContext::new(OrganizationConfig::new().with_devices(1000));
//! let vendor = VendorProfile::new("acme", "Acme NAC").with_pricing(Pricing {
//!     per_device_monthly: Some(3.0),
//!     ..Default::default()
//! });
//!
//! let tco = CostAggregator::new(&ctx).aggregate(&vendor);
//! let roi = RoiEngine::new(&ctx).evaluate(&tco, &vendor, None);
//! println!("TCO {:.0}, ROI {}", tco.total, roi.percentage);
//! ```

pub mod operations;
pub mod projection;
pub mod roi;
pub mod sensitivity;
pub mod tco;

pub use operations::{operational_impact, OperationalAnalyzer};
pub use projection::{refresh_period, TimeSeriesProjector, HARDWARE_REFRESH_FRACTION};
pub use roi::{breakeven_period, cumulative_cash_flow, RoiEngine};
pub use sensitivity::{
    SensitivityAnalyzer, SensitivityLevel, SensitivityParameter, SensitivityPoint, SensitivityRequest,
    SensitivityResult,
};
pub use tco::{calculate_tco, compliance_automation_multiplier, CostAggregator, SoftwareBasis};

/// Clamp a resolved cost input to a usable, non-negative amount
pub(crate) fn non_negative(value: f64) -> f64 {
    if value.is_finite() && value > 0.0 {
        value
    } else {
        0.0
    }
}
