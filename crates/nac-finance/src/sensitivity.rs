//! Sensitivity analysis
//!
//! Varies one input around its current value, reruns cost and ROI for each
//! variation and reports how strongly TCO follows the input. The caller's
//! context and profile are never modified; every step works on copies.

use crate::non_negative;
use crate::roi::RoiEngine;
use crate::tco::CostAggregator;
use nac_core::{safe_div, CalculationContext, RoiPercentage, VendorProfile};
use serde::{Deserialize, Serialize};

pub const DEFAULT_RANGE_PERCENT: f64 = 20.0;
pub const DEFAULT_STEPS: u32 = 5;
pub const MAX_STEPS: u32 = 25;
/// ROI a price point must beat to count as the price threshold
pub const PRICE_THRESHOLD_ROI: f64 = 100.0;

/// Input varied by an analysis
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SensitivityParameter {
    DeviceCount,
    /// The vendor's per-device price, monthly or annual, whichever it quotes
    PricePerDevice,
    FteCost,
    /// FTEs the vendor needs
    FteAllocation,
    /// Annual support as a fraction of software and hardware
    SupportRate,
    /// Upper bound of breach risk a vendor can remove
    RiskReduction,
    AnalysisYears,
}

impl SensitivityParameter {
    pub const ALL: [SensitivityParameter; 7] = [
        SensitivityParameter::DeviceCount,
        SensitivityParameter::PricePerDevice,
        SensitivityParameter::FteCost,
        SensitivityParameter::FteAllocation,
        SensitivityParameter::SupportRate,
        SensitivityParameter::RiskReduction,
        SensitivityParameter::AnalysisYears,
    ];

    /// Current value of the parameter
    pub fn base_value(&self, ctx: &CalculationContext, profile: &VendorProfile) -> f64 {
        match self {
            SensitivityParameter::DeviceCount => ctx.config.devices as f64,
            SensitivityParameter::PricePerDevice => profile
                .pricing
                .per_device_monthly
                .or(profile.pricing.per_device_annual)
                .map(non_negative)
                .unwrap_or(0.0),
            SensitivityParameter::FteCost => ctx.config.fte_cost,
            SensitivityParameter::FteAllocation => profile.operations.fte,
            SensitivityParameter::SupportRate => profile
                .pricing
                .support_rate
                .unwrap_or(ctx.assumptions.default_support_rate),
            SensitivityParameter::RiskReduction => ctx.assumptions.max_risk_reduction,
            SensitivityParameter::AnalysisYears => ctx.config.horizon_years() as f64,
        }
    }

    /// Round a varied value the way the input is expressed
    fn round(&self, value: f64) -> f64 {
        match self {
            SensitivityParameter::DeviceCount => value.round().max(0.0),
            SensitivityParameter::AnalysisYears => value.round().max(1.0),
            SensitivityParameter::PricePerDevice => (value * 100.0).round() / 100.0,
            _ => value,
        }
    }

    /// Write `value` into copies of the context and profile
    fn apply(&self, ctx: &mut CalculationContext, profile: &mut VendorProfile, value: f64) {
        match self {
            SensitivityParameter::DeviceCount => ctx.config.devices = value as u32,
            SensitivityParameter::PricePerDevice => {
                let pricing = &mut profile.pricing;
                if pricing.per_device_monthly.is_some() {
                    pricing.per_device_monthly = Some(value);
                } else if pricing.per_device_annual.is_some() {
                    pricing.per_device_annual = Some(value);
                }
            }
            SensitivityParameter::FteCost => ctx.config.fte_cost = value,
            SensitivityParameter::FteAllocation => profile.operations.fte = value,
            SensitivityParameter::SupportRate => profile.pricing.support_rate = Some(value),
            SensitivityParameter::RiskReduction => ctx.assumptions.max_risk_reduction = value,
            SensitivityParameter::AnalysisYears => ctx.config.years = value as u32,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SensitivityRequest {
    pub parameter: SensitivityParameter,
    /// Variation either side of the base value, in percent (0-100)
    pub range_percent: f64,
    /// Points in the variation grid, at least 2
    pub steps: u32,
}

impl Default for SensitivityRequest {
    fn default() -> Self {
        Self::new(SensitivityParameter::DeviceCount)
    }
}

impl SensitivityRequest {
    pub fn new(parameter: SensitivityParameter) -> Self {
        Self {
            parameter,
            range_percent: DEFAULT_RANGE_PERCENT,
            steps: DEFAULT_STEPS,
        }
    }

    pub fn with_range(mut self, range_percent: f64) -> Self {
        self.range_percent = range_percent;
        self
    }

    pub fn with_steps(mut self, steps: u32) -> Self {
        self.steps = steps;
        self
    }

    /// Percent changes of the grid, ascending from `-range` to `+range`
    pub fn percent_changes(&self) -> Vec<f64> {
        let range = if self.range_percent.is_finite() {
            self.range_percent.clamp(0.0, 100.0)
        } else {
            DEFAULT_RANGE_PERCENT
        };
        let steps = self.steps.clamp(2, MAX_STEPS);
        let step_size = 2.0 * range / (steps - 1) as f64;
        (0..steps).map(|i| -range + i as f64 * step_size).collect()
    }
}

/// How strongly TCO follows the varied input
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SensitivityLevel {
    Low,
    MediumLow,
    Medium,
    MediumHigh,
    High,
}

impl SensitivityLevel {
    pub fn from_elasticity(elasticity: f64) -> Self {
        if elasticity < 0.5 {
            SensitivityLevel::Low
        } else if elasticity < 1.0 {
            SensitivityLevel::MediumLow
        } else if elasticity < 1.5 {
            SensitivityLevel::Medium
        } else if elasticity < 2.0 {
            SensitivityLevel::MediumHigh
        } else {
            SensitivityLevel::High
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SensitivityPoint {
    pub percent_change: f64,
    pub value: f64,
    pub tco: f64,
    pub roi: RoiPercentage,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payback_periods: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SensitivityResult {
    pub vendor_id: String,
    pub parameter: SensitivityParameter,
    pub base_value: f64,
    pub base_tco: f64,
    pub points: Vec<SensitivityPoint>,
    /// |relative TCO change / relative input change| between the grid ends
    pub elasticity: f64,
    pub level: SensitivityLevel,
    /// Smallest device count with positive ROI, or the highest price with
    /// ROI above 100%; other parameters have none
    #[serde(skip_serializing_if = "Option::is_none")]
    pub breakeven_value: Option<f64>,
}

pub struct SensitivityAnalyzer<'a> {
    ctx: &'a CalculationContext,
}

impl<'a> SensitivityAnalyzer<'a> {
    pub fn new(ctx: &'a CalculationContext) -> Self {
        Self { ctx }
    }

    pub fn analyze(&self, profile: &VendorProfile, request: &SensitivityRequest) -> SensitivityResult {
        let parameter = request.parameter;
        let base_value = parameter.base_value(self.ctx, profile);
        let base_tco = CostAggregator::new(self.ctx).aggregate(profile).total;

        let points: Vec<SensitivityPoint> = request
            .percent_changes()
            .into_iter()
            .map(|percent_change| {
                let value = parameter.round(base_value * (1.0 + percent_change / 100.0));
                self.evaluate_at(profile, parameter, percent_change, value)
            })
            .collect();

        let elasticity = elasticity(&points);
        let level = SensitivityLevel::from_elasticity(elasticity);
        let breakeven_value = breakeven_value(parameter, &points);

        tracing::debug!(
            vendor = %profile.id,
            parameter = ?parameter,
            points = points.len(),
            elasticity,
            level = ?level,
            "sensitivity analyzed"
        );

        SensitivityResult {
            vendor_id: profile.id.clone(),
            parameter,
            base_value,
            base_tco,
            points,
            elasticity,
            level,
            breakeven_value,
        }
    }

    fn evaluate_at(
        &self,
        profile: &VendorProfile,
        parameter: SensitivityParameter,
        percent_change: f64,
        value: f64,
    ) -> SensitivityPoint {
        let mut ctx = self.ctx.clone();
        let mut varied = profile.clone();
        parameter.apply(&mut ctx, &mut varied, value);

        let tco = CostAggregator::new(&ctx).aggregate(&varied);
        let roi = RoiEngine::new(&ctx).evaluate(&tco, &varied, None);

        SensitivityPoint {
            percent_change,
            value,
            tco: tco.total,
            roi: roi.percentage,
            payback_periods: roi.payback_periods,
        }
    }
}

/// Midpoint (arc) elasticity of TCO between the first and last grid points
pub fn elasticity(points: &[SensitivityPoint]) -> f64 {
    let (Some(low), Some(high)) = (points.first(), points.last()) else {
        return 0.0;
    };
    let value_change = safe_div(high.value - low.value, (high.value + low.value) / 2.0);
    let tco_change = safe_div(high.tco - low.tco, (high.tco + low.tco) / 2.0);
    safe_div(tco_change, value_change).abs()
}

fn breakeven_value(parameter: SensitivityParameter, points: &[SensitivityPoint]) -> Option<f64> {
    let roi_above = |point: &SensitivityPoint, threshold: f64| match point.roi {
        RoiPercentage::Finite(roi) => roi > threshold,
        RoiPercentage::Unbounded => true,
    };
    match parameter {
        SensitivityParameter::DeviceCount => points
            .iter()
            .find(|p| roi_above(p, 0.0))
            .map(|p| p.value),
        SensitivityParameter::PricePerDevice => points
            .iter()
            .rev()
            .find(|p| roi_above(p, PRICE_THRESHOLD_ROI))
            .map(|p| p.value),
        _ => None,
    }
}
