//! Operational impact of a vendor versus the organization's baseline

use crate::non_negative;
use nac_core::{safe_div, CalculationContext, OperationalImpact, VendorProfile};

const AUTOMATION_WEIGHT: f64 = 0.4;
const FTE_WEIGHT: f64 = 30.0;
const DEPLOYMENT_WEIGHT: f64 = 30.0;

pub struct OperationalAnalyzer<'a> {
    ctx: &'a CalculationContext,
}

impl<'a> OperationalAnalyzer<'a> {
    pub fn new(ctx: &'a CalculationContext) -> Self {
        Self { ctx }
    }

    pub fn analyze(&self, profile: &VendorProfile) -> OperationalImpact {
        let assumptions = &self.ctx.assumptions;

        let baseline_fte = non_negative(
            profile
                .operations
                .fte_baseline
                .unwrap_or(assumptions.baseline_fte),
        );
        let fte = non_negative(profile.operations.fte);
        let fte_savings = baseline_fte - fte;

        let baseline_days = non_negative(assumptions.baseline_deployment_days);
        // unknown deployment time counts as the baseline
        let days = match non_negative(profile.deployment.time_days) {
            d if d > 0.0 => d,
            _ => baseline_days,
        };
        let deployment_time_reduction_days = (baseline_days - days).max(0.0);

        let automation_level = non_negative(profile.features.automation).min(100.0);
        let fte_ratio = safe_div(fte_savings, baseline_fte).clamp(0.0, 1.0);
        let deployment_ratio = safe_div(deployment_time_reduction_days, baseline_days).clamp(0.0, 1.0);

        let efficiency_gain = (automation_level * AUTOMATION_WEIGHT
            + fte_ratio * FTE_WEIGHT
            + deployment_ratio * DEPLOYMENT_WEIGHT)
            .clamp(0.0, 100.0)
            .round();

        OperationalImpact {
            fte_savings,
            deployment_time_reduction_days,
            automation_level,
            efficiency_gain,
        }
    }
}

pub fn operational_impact(ctx: &CalculationContext, profile: &VendorProfile) -> OperationalImpact {
    OperationalAnalyzer::new(ctx).analyze(profile)
}
