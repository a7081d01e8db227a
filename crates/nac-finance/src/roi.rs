//! ROI Engine
//!
//! Annual benefit estimate, ROI percentage, net value and breakeven search.

use crate::non_negative;
use nac_core::{
    BenefitBreakdown, CalculationContext, RoiPercentage, RoiResult, TcoResult, VendorProfile,
};

/// Monthly cumulative cash flow: `-initial` at index 0, then `+monthly` per month.
///
/// Has `horizon + 1` entries.
pub fn cumulative_cash_flow(initial_investment: f64, monthly_savings: f64, horizon: u32) -> Vec<f64> {
    let mut flow = Vec::with_capacity(horizon as usize + 1);
    let mut cumulative = -initial_investment;
    flow.push(cumulative);
    for _ in 0..horizon {
        cumulative += monthly_savings;
        flow.push(cumulative);
    }
    flow
}

/// First month whose cumulative cash flow is non-negative.
///
/// Linear scan without interpolation, stopping at the first match. `None`
/// when savings are not positive or the horizon runs out first.
pub fn breakeven_period(initial_investment: f64, monthly_savings: f64, horizon: u32) -> Option<u32> {
    if monthly_savings.is_nan() || monthly_savings <= 0.0 {
        return None;
    }
    // Months needed, give or take one for accumulated rounding
    let estimate = (initial_investment / monthly_savings).ceil();
    if estimate.is_nan() || estimate > horizon as f64 + 1.0 {
        return None;
    }

    let mut cumulative = -initial_investment;
    for month in 0..=horizon {
        if cumulative >= 0.0 {
            return Some(month);
        }
        cumulative += monthly_savings;
    }
    None
}

pub struct RoiEngine<'a> {
    ctx: &'a CalculationContext,
}

impl<'a> RoiEngine<'a> {
    pub fn new(ctx: &'a CalculationContext) -> Self {
        Self { ctx }
    }

    /// Benefit per year by source; toggled-off sources stay `0`
    pub fn annual_benefits(&self, profile: &VendorProfile) -> BenefitBreakdown {
        let config = &self.ctx.config;
        let assumptions = &self.ctx.assumptions;
        let features = &profile.features;
        let fte_cost = non_negative(config.fte_cost);
        let automation = non_negative(features.automation);

        let baseline_fte = profile
            .operations
            .fte_baseline
            .unwrap_or(assumptions.baseline_fte);
        let fte_savings = (non_negative(baseline_fte) - non_negative(profile.operations.fte)) * fte_cost;

        let automation_value = automation / 100.0 * fte_cost * assumptions.automation_value_share;

        let risk_avoidance = if config.toggles.include_risk {
            let cap = non_negative(assumptions.max_risk_reduction);
            let reduction = (non_negative(features.zero_trust.score) / 100.0 * cap).clamp(0.0, cap);
            non_negative(self.ctx.breach_cost()) * non_negative(assumptions.breach_probability_base) * reduction
        } else {
            0.0
        };

        let compliance_automation = non_negative(assumptions.annual_audit_cost)
            * non_negative(features.compliance.automation.unwrap_or(0.0))
            / 100.0
            * assumptions.compliance_automation_share;

        let insurance = if config.toggles.include_insurance {
            config.devices as f64
                * non_negative(assumptions.insurance_premium_per_device)
                * non_negative(profile.savings.insurance_discount_percent.unwrap_or(0.0))
                / 100.0
        } else {
            0.0
        };

        let downtime = if config.toggles.include_downtime {
            non_negative(profile.savings.downtime_hours_avoided.unwrap_or(0.0))
                * non_negative(self.ctx.industry().downtime_cost_per_hour)
        } else {
            0.0
        };

        BenefitBreakdown {
            fte_savings,
            automation_value,
            risk_avoidance,
            compliance_automation,
            insurance,
            downtime,
        }
    }

    /// ROI of `tco` for `profile`, optionally against a comparison vendor's TCO
    pub fn evaluate(
        &self,
        tco: &TcoResult,
        profile: &VendorProfile,
        comparison: Option<&TcoResult>,
    ) -> RoiResult {
        let config = &self.ctx.config;
        let benefits = self.annual_benefits(profile);
        let annual_benefits = benefits.total();
        let total_benefits = annual_benefits * config.horizon_years() as f64;
        let net_value = total_benefits - tco.total;

        let percentage = if tco.total > 0.0 {
            RoiPercentage::Finite(net_value / tco.total * 100.0)
        } else if total_benefits > 0.0 {
            RoiPercentage::Unbounded
        } else {
            RoiPercentage::Finite(0.0)
        };

        let payback_periods = if annual_benefits > 0.0 {
            breakeven_period(tco.initial_investment(), annual_benefits / 12.0, config.months())
        } else {
            None
        };

        tracing::debug!(
            vendor = %profile.id,
            annual_benefits,
            roi = %percentage,
            payback = ?payback_periods,
            "roi evaluated"
        );

        RoiResult {
            percentage,
            payback_periods,
            total_benefits,
            net_value,
            annual_benefits,
            benefits,
            savings_vs_comparison: comparison.map(|c| c.total - tco.total),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nac_core::{FeatureToggles, OrganizationConfig};

    #[test]
    fn test_breakeven_scenario() {
        assert_eq!(breakeven_period(15_000.0, 4_166.67, 36), Some(4));
    }

    #[test]
    fn test_breakeven_first_match() {
        let flow = cumulative_cash_flow(1_000.0, 250.0, 12);
        assert_eq!(flow.len(), 13);
        assert_eq!(flow[0], -1_000.0);
        assert_eq!(flow[4], 0.0);
        assert!(flow.windows(2).all(|w| w[1] > w[0]));
        assert_eq!(breakeven_period(1_000.0, 250.0, 12), Some(4));
    }

    #[test]
    fn test_breakeven_never() {
        assert_eq!(breakeven_period(100_000.0, 10.0, 36), None);
        assert_eq!(breakeven_period(100_000.0, 0.0, 36), None);
        assert_eq!(breakeven_period(100_000.0, -50.0, 36), None);
    }

    #[test]
    fn test_breakeven_with_unbounded_horizon() {
        assert_eq!(breakeven_period(1_000.0, 250.0, u32::MAX), Some(4));
        assert_eq!(breakeven_period(f64::MAX, 1e-300, u32::MAX), None);
    }

    #[test]
    fn test_breakeven_without_investment() {
        assert_eq!(breakeven_period(0.0, 100.0, 12), Some(0));
    }

    #[test]
    fn test_benefit_terms() {
        let config = OrganizationConfig::new()
            .with_fte_cost(100_000.0)
            .with_industry("unknown");
        let ctx = CalculationContext::new(config);
        let vendor = VendorProfile::new("v", "V")
            .with_fte(0.5)
            .with_automation(50.0)
            .with_zero_trust(100.0)
            .with_compliance_automation(40.0);

        let b = RoiEngine::new(&ctx).annual_benefits(&vendor);
        assert_eq!(b.fte_savings, 150_000.0);
        assert_eq!(b.automation_value, 10_000.0);
        // 1M * 10% * 85%
        assert!((b.risk_avoidance - 85_000.0).abs() < 1e-6);
        assert_eq!(b.compliance_automation, 10_000.0);
        assert_eq!(b.insurance, 0.0);
        assert_eq!(b.downtime, 0.0);
    }

    #[test]
    fn test_risk_reduction_is_capped() {
        let ctx = CalculationContext::new(OrganizationConfig::new().with_industry("unknown"));
        let vendor = VendorProfile::new("v", "V").with_zero_trust(400.0);
        let b = RoiEngine::new(&ctx).annual_benefits(&vendor);
        assert!((b.risk_avoidance - 85_000.0).abs() < 1e-6);
    }

    #[test]
    fn test_toggles() {
        let toggles = FeatureToggles {
            include_risk: false,
            include_insurance: true,
            include_downtime: true,
        };
        let config = OrganizationConfig::new()
            .with_devices(1_000)
            .with_industry("retail")
            .with_toggles(toggles);
        let ctx = CalculationContext::new(config);
        let mut vendor = VendorProfile::new("v", "V").with_zero_trust(90.0);
        vendor.savings.insurance_discount_percent = Some(10.0);
        vendor.savings.downtime_hours_avoided = Some(4.0);

        let b = RoiEngine::new(&ctx).annual_benefits(&vendor);
        assert_eq!(b.risk_avoidance, 0.0);
        assert_eq!(b.insurance, 2_500.0);
        assert_eq!(b.downtime, 26_000.0);
    }

    #[test]
    fn test_zero_investment_is_unbounded() {
        let ctx = CalculationContext::new(OrganizationConfig::new());
        let vendor = VendorProfile::new("v", "V").with_automation(80.0);
        let roi = RoiEngine::new(&ctx).evaluate(&TcoResult::default(), &vendor, None);
        assert!(roi.percentage.is_unbounded());
        assert_eq!(roi.payback_periods, Some(0));
    }

    #[test]
    fn test_no_benefits_means_no_payback() {
        let toggles = FeatureToggles {
            include_risk: false,
            ..Default::default()
        };
        let ctx = CalculationContext::new(OrganizationConfig::new().with_toggles(toggles));
        let vendor = VendorProfile::new("v", "V").with_fte(3.0);
        let tco = TcoResult {
            implementation: 50_000.0,
            ..Default::default()
        }
        .finalize(10, 3);

        let roi = RoiEngine::new(&ctx).evaluate(&tco, &vendor, None);
        assert!(roi.annual_benefits <= 0.0);
        assert_eq!(roi.payback_periods, None);
        assert!(roi.percentage.finite().is_some_and(|p| p < 0.0));
    }

    #[test]
    fn test_net_value_and_comparison() {
        let config = OrganizationConfig::new().with_years(3).with_fte_cost(100_000.0);
        let toggles = FeatureToggles {
            include_risk: false,
            ..Default::default()
        };
        let ctx = CalculationContext::new(config.with_toggles(toggles));
        let vendor = VendorProfile::new("v", "V").with_fte(1.0);
        let tco = TcoResult {
            implementation: 60_000.0,
            operations: 240_000.0,
            ..Default::default()
        }
        .finalize(100, 3);
        let rival = TcoResult {
            software: 500_000.0,
            ..Default::default()
        }
        .finalize(100, 3);

        let roi = RoiEngine::new(&ctx).evaluate(&tco, &vendor, Some(&rival));
        assert_eq!(roi.annual_benefits, 100_000.0);
        assert_eq!(roi.total_benefits, 300_000.0);
        assert_eq!(roi.net_value, 0.0);
        assert_eq!(roi.percentage, RoiPercentage::Finite(0.0));
        assert_eq!(roi.savings_vs_comparison, Some(200_000.0));
        // 60_000 up front at 8_333.33 a month
        assert_eq!(roi.payback_periods, Some(8));
    }
}
