//! Cost aggregation
//!
//! Resolves every TCO component of one vendor from its profile. Absent
//! profile fields count as `0`; nothing here can fail.

use crate::non_negative;
use nac_core::{CalculationContext, OrganizationConfig, TcoResult, VendorProfile};
use serde::{Deserialize, Serialize};

/// Which price point the software cost was derived from
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "basis", content = "price", rename_all = "snake_case")]
pub enum SoftwareBasis {
    PerDeviceMonthly(f64),
    PerDeviceAnnual(f64),
    PerUserAnnual(f64),
    /// One-time licence
    Flat(f64),
    None,
}

impl SoftwareBasis {
    /// First present price point in precedence order
    pub fn resolve(profile: &VendorProfile) -> Self {
        let pricing = &profile.pricing;
        if let Some(price) = pricing.per_device_monthly {
            SoftwareBasis::PerDeviceMonthly(non_negative(price))
        } else if let Some(price) = pricing.per_device_annual {
            SoftwareBasis::PerDeviceAnnual(non_negative(price))
        } else if let Some(price) = pricing.per_user_annual {
            SoftwareBasis::PerUserAnnual(non_negative(price))
        } else if let Some(price) = pricing.flat_license {
            SoftwareBasis::Flat(non_negative(price))
        } else {
            SoftwareBasis::None
        }
    }

    /// Software cost over the horizon and its upfront part
    pub fn cost(&self, config: &OrganizationConfig) -> (f64, f64) {
        let devices = config.devices as f64;
        let users = config.users as f64;
        let years = config.horizon_years() as f64;
        match *self {
            SoftwareBasis::PerDeviceMonthly(price) => (price * devices * 12.0 * years, 0.0),
            SoftwareBasis::PerDeviceAnnual(price) => (price * devices * years, 0.0),
            SoftwareBasis::PerUserAnnual(price) => (price * users * years, 0.0),
            SoftwareBasis::Flat(price) => (price, price),
            SoftwareBasis::None => (0.0, 0.0),
        }
    }
}

/// Compliance overhead multiplier from the vendor's compliance automation.
///
/// Not assessed counts as neutral.
pub fn compliance_automation_multiplier(automation: Option<f64>) -> f64 {
    match automation {
        Some(level) if level < 25.0 => 2.0,
        Some(level) if level < 50.0 => 1.5,
        _ => 1.0,
    }
}

/// Computes [`TcoResult`]s for one calculation context
pub struct CostAggregator<'a> {
    ctx: &'a CalculationContext,
}

impl<'a> CostAggregator<'a> {
    pub fn new(ctx: &'a CalculationContext) -> Self {
        Self { ctx }
    }

    pub fn aggregate(&self, profile: &VendorProfile) -> TcoResult {
        let config = &self.ctx.config;
        let assumptions = &self.ctx.assumptions;
        let devices = config.devices as f64;
        let users = config.users as f64;
        let years = config.horizon_years() as f64;
        let pricing = &profile.pricing;

        // === Software ===
        let (software, software_upfront) = SoftwareBasis::resolve(profile).cost(config);

        // === Hardware ===
        let hardware = non_negative(pricing.hardware_per_device.unwrap_or(0.0)) * devices
            + non_negative(pricing.hardware_base.unwrap_or(0.0));

        // === Implementation ===
        let implementation = match profile.deployment.professional_services_cost {
            Some(cost) => non_negative(cost),
            None => {
                non_negative(profile.deployment.time_days)
                    * non_negative(assumptions.consultant_day_rate)
            }
        };

        // === Support ===
        let support = match pricing.support_annual {
            Some(annual) => non_negative(annual) * years,
            None => {
                let rate = non_negative(pricing.support_rate.unwrap_or(assumptions.default_support_rate));
                (software + hardware) * rate * years
            }
        };

        // === Training ===
        let training_info = &profile.operations.training;
        let training = non_negative(training_info.admin_cost.unwrap_or(0.0))
            + non_negative(training_info.per_user_cost.unwrap_or(0.0)) * users;

        // === Operations ===
        let operations = non_negative(profile.operations.fte) * non_negative(config.fte_cost) * years;

        // === Hidden ===
        let hidden = non_negative(profile.hidden_costs.annual.unwrap_or(0.0)) * years;

        // === Compliance ===
        let industry = self.ctx.industry();
        let base_annual = non_negative(assumptions.compliance_base_annual)
            + non_negative(assumptions.compliance_per_device_annual) * devices;
        let compliance = base_annual
            * non_negative(industry.compliance_multiplier)
            * compliance_automation_multiplier(profile.features.compliance.automation)
            * years;

        let tco = TcoResult {
            software,
            hardware,
            implementation,
            support,
            training,
            operations,
            hidden,
            compliance,
            software_upfront,
            ..Default::default()
        }
        .finalize(config.devices, config.horizon_years());

        tracing::debug!(
            vendor = %profile.id,
            total = tco.total,
            per_device_per_month = tco.per_device_per_month,
            "tco aggregated"
        );
        tco
    }
}

/// Convenience function with default assumptions and the built-in industry table
pub fn calculate_tco(config: &OrganizationConfig, profile: &VendorProfile) -> TcoResult {
    let ctx = CalculationContext::new(config.clone());
    CostAggregator::new(&ctx).aggregate(profile)
}
