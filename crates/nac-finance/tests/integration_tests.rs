//! Integration tests for nac-finance.
//!
//! Runs cost aggregation, projection and ROI together on hand-built
//! vendor profiles.

use nac_core::{
    CalculationContext, DeploymentModel, EngineAssumptions, Granularity, OrganizationConfig,
    Pricing, RoiPercentage, VendorProfile,
};
use nac_finance::{
    breakeven_period, operational_impact, CostAggregator, RoiEngine, TimeSeriesProjector,
};

fn appliance_vendor() -> VendorProfile {
    let mut vendor = VendorProfile::new("legacy", "Legacy Appliance NAC")
        .with_model(DeploymentModel::OnPremises)
        .with_pricing(Pricing {
            per_device_annual: Some(20.0),
            hardware_per_device: Some(10.0),
            hardware_base: Some(25_000.0),
            ..Default::default()
        })
        .with_fte(1.5)
        .with_zero_trust(40.0)
        .with_automation(30.0);
    vendor.deployment.time_days = 90.0;
    vendor
}

fn cloud_vendor() -> VendorProfile {
    let mut vendor = VendorProfile::new("cloud", "Cloud NAC")
        .with_pricing(Pricing {
            per_device_monthly: Some(3.0),
            ..Default::default()
        })
        .with_fte(0.25)
        .with_zero_trust(95.0)
        .with_automation(90.0)
        .with_compliance_automation(85.0);
    vendor.deployment.time_days = 7.0;
    vendor
}

// =============================================================================
// Cost and projection
// =============================================================================

#[test]
fn test_subscription_scenario_end_to_end() {
    let config = OrganizationConfig::new()
        .with_devices(2500)
        .with_years(3)
        .with_fte_cost(100_000.0);
    let assumptions = EngineAssumptions {
        compliance_base_annual: 0.0,
        compliance_per_device_annual: 0.0,
        ..Default::default()
    };
    let ctx = CalculationContext::new(config.clone()).with_assumptions(assumptions);
    let mut vendor = VendorProfile::new("acme", "Acme")
        .with_fte(0.25)
        .with_pricing(Pricing {
            per_device_monthly: Some(1.5),
            support_rate: Some(0.0),
            ..Default::default()
        });
    vendor.deployment.professional_services_cost = Some(15_000.0);

    let tco = CostAggregator::new(&ctx).aggregate(&vendor);
    assert_eq!(tco.total, 225_000.0);

    let series = TimeSeriesProjector::quarterly().project(&tco, &config, vendor.deployment.model);
    assert_eq!(series.len(), 13);
    assert_eq!(series.points[0].cumulative_value, 15_000.0);
    assert!((series.final_value() - 225_000.0).abs() < 1e-6);
}

#[test]
fn test_on_prem_series_includes_refresh() {
    let config = OrganizationConfig::new().with_devices(1000).with_years(5);
    let ctx = CalculationContext::new(config.clone()).with_granularity(Granularity::Monthly);
    let vendor = appliance_vendor();

    let tco = CostAggregator::new(&ctx).aggregate(&vendor);
    assert_eq!(tco.hardware, 35_000.0);

    let series = TimeSeriesProjector::new(ctx.granularity).project(&tco, &config, vendor.deployment.model);
    assert_eq!(series.len(), 61);
    assert_eq!(series.events.len(), 1);
    assert_eq!(series.events[0].period, 24);
    assert!(series.is_non_decreasing());
    assert!((series.final_value() - (tco.total + 17_500.0)).abs() < 1e-6);

    let yearly = TimeSeriesProjector::yearly(&series);
    assert_eq!(yearly.len(), 6);
    let yearly_sum: f64 = yearly.iter().map(|y| y.cost).sum();
    assert!((yearly_sum - series.final_value()).abs() < 1e-6);
}

// =============================================================================
// ROI
// =============================================================================

#[test]
fn test_cloud_beats_appliance() {
    let config = OrganizationConfig::new().with_devices(2500).with_years(3);
    let ctx = CalculationContext::new(config);
    let aggregator = CostAggregator::new(&ctx);
    let roi_engine = RoiEngine::new(&ctx);

    let legacy = appliance_vendor();
    let cloud = cloud_vendor();
    let legacy_tco = aggregator.aggregate(&legacy);
    let cloud_tco = aggregator.aggregate(&cloud);

    let cloud_roi = roi_engine.evaluate(&cloud_tco, &cloud, Some(&legacy_tco));
    let legacy_roi = roi_engine.evaluate(&legacy_tco, &legacy, None);

    assert!(cloud_roi.annual_benefits > legacy_roi.annual_benefits);
    assert_eq!(
        cloud_roi.savings_vs_comparison,
        Some(legacy_tco.total - cloud_tco.total)
    );
    assert!(legacy_roi.savings_vs_comparison.is_none());
    assert!(cloud_roi.payback_periods.is_some());
    assert_eq!(
        cloud_roi.total_benefits,
        cloud_roi.annual_benefits * 3.0
    );
    assert_eq!(cloud_roi.net_value, cloud_roi.total_benefits - cloud_tco.total);
}

#[test]
fn test_payback_matches_breakeven_search() {
    let config = OrganizationConfig::new().with_years(3);
    let ctx = CalculationContext::new(config.clone());
    let vendor = appliance_vendor();

    let tco = CostAggregator::new(&ctx).aggregate(&vendor);
    let roi = RoiEngine::new(&ctx).evaluate(&tco, &vendor, None);
    let expected = breakeven_period(tco.initial_investment(), roi.annual_benefits / 12.0, config.months());
    assert_eq!(roi.payback_periods, expected);
}

#[test]
fn test_zero_cost_vendor_is_unbounded() {
    let ctx = CalculationContext::new(OrganizationConfig::new().with_devices(0));
    let no_overhead = EngineAssumptions {
        compliance_base_annual: 0.0,
        ..Default::default()
    };
    let ctx = ctx.with_assumptions(no_overhead);
    let vendor = VendorProfile::new("free", "Free").with_zero_trust(50.0);

    let tco = CostAggregator::new(&ctx).aggregate(&vendor);
    assert_eq!(tco.total, 0.0);
    let roi = RoiEngine::new(&ctx).evaluate(&tco, &vendor, None);
    assert_eq!(roi.percentage, RoiPercentage::Unbounded);
    assert_eq!(roi.percentage.to_string(), "unbounded");
}

// =============================================================================
// Operations
// =============================================================================

#[test]
fn test_operational_impact_orders_vendors() {
    let ctx = CalculationContext::new(OrganizationConfig::new());
    let cloud = operational_impact(&ctx, &cloud_vendor());
    let legacy = operational_impact(&ctx, &appliance_vendor());
    assert!(cloud.efficiency_gain > legacy.efficiency_gain);
    assert_eq!(legacy.deployment_time_reduction_days, 0.0);
}
