//! Integration tests for nac-engine with the real data files.
//!
//! These tests run full calculation passes over the catalogs in `data/`.

use nac_core::{
    parse_selected_vendors, DeploymentModel, FeatureToggles, OrganizationConfig, RecommendationTier,
};
use nac_engine::{calculate, ComparisonEngine};
use nac_registry::{Registry, VendorCatalog};

/// Data directory relative to the workspace root
const DATA_DIR: &str = "data";

fn data_dir() -> std::path::PathBuf {
    let manifest_dir = std::env::var("CARGO_MANIFEST_DIR").unwrap();
    let workspace_root = std::path::Path::new(&manifest_dir).parent().unwrap().parent().unwrap();
    workspace_root.join(DATA_DIR)
}

fn engine() -> ComparisonEngine {
    ComparisonEngine::load_dir(data_dir()).unwrap()
}

fn all_vendor_ids(engine: &ComparisonEngine) -> Vec<String> {
    engine.registry().vendors.ids().map(|s| s.to_string()).collect()
}

fn healthcare_config() -> OrganizationConfig {
    OrganizationConfig::new()
        .with_devices(2500)
        .with_users(1500)
        .with_years(3)
        .with_industry("healthcare")
        .with_framework("HIPAA")
        .with_framework("PCI-DSS")
        .with_framework("SOC2")
}

// =============================================================================
// Full pass
// =============================================================================

#[test]
fn test_full_pass_over_catalog() {
    let engine = engine();
    let ids = all_vendor_ids(&engine);
    let ctx = engine.context(healthcare_config());
    let results = engine.run(&ctx, &ids);

    assert_eq!(results.len(), ids.len());
    assert!(results.skipped.is_empty());

    for (id, r) in &results.results {
        assert_eq!(&r.vendor_id, id);
        assert_eq!(r.tco.total, r.tco.component_sum(), "{}", id);
        for (name, value) in r.tco.components() {
            assert!(value.is_finite() && value >= 0.0, "{}.{} = {}", id, name, value);
        }
        assert!(r.tco.per_device_per_month.is_finite());

        assert_eq!(r.cash_flow.len(), 13, "{}", id);
        assert!(r.cash_flow.is_non_decreasing(), "{}", id);
        assert_eq!(r.yearly.len(), 4);

        assert!(r.risk.score <= 100);
        assert!((0.0..=100.0).contains(&r.compliance.overall));
        assert_eq!(r.compliance.per_framework.len(), 3);
        assert!((0.0..=100.0).contains(&r.operational.efficiency_gain));
        assert!(r.ranking.overall_score <= 100);
        if r.roi.annual_benefits <= 0.0 {
            assert!(r.roi.payback_periods.is_none());
        }
    }
}

#[test]
fn test_on_prem_vendors_carry_refresh() {
    let engine = engine();
    let ctx = engine.context(healthcare_config());
    let results = engine.run(&ctx, &all_vendor_ids(&engine));

    for r in results.results.values() {
        let profile = engine.registry().vendors.get(&r.vendor_id).unwrap();
        let refresh = r.cash_flow.events_total();
        if profile.deployment.model == DeploymentModel::OnPremises && r.tco.hardware > 0.0 {
            assert_eq!(refresh, r.tco.hardware * 0.5, "{}", r.vendor_id);
        } else {
            assert_eq!(refresh, 0.0, "{}", r.vendor_id);
        }
        assert!((r.cash_flow.final_value() - (r.tco.total + refresh)).abs() < 1e-6);
    }
}

#[test]
fn test_cloud_vendor_ranks_above_appliance() {
    let engine = engine();
    let ctx = engine.context(healthcare_config());
    let results = engine.run(&ctx, &parse_selected_vendors(r#"["portnox", "cisco", "aruba"]"#));

    let ranked = results.ranked();
    assert_eq!(ranked[0], "portnox");

    let portnox = results.get("portnox").unwrap();
    let cisco = results.get("cisco").unwrap();
    assert!(portnox.tco.total < cisco.tco.total);
    assert!(portnox.risk.score < cisco.risk.score);
    assert!(portnox.ranking.overall_score > cisco.ranking.overall_score);
}

#[test]
fn test_primary_vendor_against_others() {
    let engine = engine();
    let config = healthcare_config().with_primary_vendor("portnox");
    let ctx = engine.context(config);
    let results = engine.run(&ctx, &parse_selected_vendors(r#"["cisco", "portnox"]"#));

    let portnox = results.get("portnox").unwrap();
    let cisco = results.get("cisco").unwrap();
    assert_eq!(portnox.ranking.tier, RecommendationTier::Primary);
    assert!(portnox.roi.savings_vs_comparison.is_none());
    let savings = cisco.roi.savings_vs_comparison.unwrap();
    assert!(savings < 0.0, "cisco should cost more than the primary vendor");
}

// =============================================================================
// Tolerance
// =============================================================================

#[test]
fn test_malformed_vendor_is_skipped() {
    let vendors = VendorCatalog::from_json(
        r#"{
            "good": {"name": "Good NAC", "pricing": {"perDeviceMonthly": 3}, "operations": {"fte": 0.5}},
            "broken": "not a profile",
            "other": {"name": "Other NAC", "pricing": {"perDeviceAnnual": 30}, "operations": {"fte": 1}}
        }"#,
    )
    .unwrap();
    let registry = Registry {
        vendors,
        ..Registry::default()
    };

    let selected = parse_selected_vendors(r#"["good", "broken", "other"]"#);
    let results = calculate(registry, OrganizationConfig::new(), &selected);

    assert_eq!(results.len(), 2);
    assert!(results.get("good").is_some());
    assert!(results.get("other").is_some());
    assert_eq!(results.skipped, vec!["broken"]);
}

#[test]
fn test_unreadable_selection_is_empty_pass() {
    let engine = engine();
    let ctx = engine.context(OrganizationConfig::new());
    let results = engine.run(&ctx, &parse_selected_vendors("{oops"));
    assert!(results.is_empty());
}

#[test]
fn test_partial_config_uses_defaults() {
    let engine = engine();
    let config = OrganizationConfig::from_json(r#"{"devices": 800}"#).unwrap();
    let ctx = engine.context(config);
    let results = engine.run(&ctx, &parse_selected_vendors(r#"["portnox"]"#));
    let portnox = results.get("portnox").unwrap();
    // 4.00 per device per month over the default 3 years
    assert_eq!(portnox.tco.software, 4.0 * 800.0 * 12.0 * 3.0);
}

// =============================================================================
// Purity
// =============================================================================

#[test]
fn test_pass_is_deterministic() {
    let engine = engine();
    let ids = all_vendor_ids(&engine);

    let a = engine.run(&engine.context(healthcare_config()), &ids);
    let b = engine.run(&engine.context(healthcare_config()), &ids);

    assert_eq!(a, b);
    assert_eq!(
        serde_json::to_string(&a).unwrap(),
        serde_json::to_string(&b).unwrap()
    );
}

#[test]
fn test_input_hash_tracks_inputs() {
    let engine = engine();
    let ids = parse_selected_vendors(r#"["portnox", "cisco"]"#);

    let base = engine.run(&engine.context(healthcare_config()), &ids);
    let toggled = engine.run(
        &engine.context(healthcare_config().with_toggles(FeatureToggles {
            include_insurance: true,
            ..Default::default()
        })),
        &ids,
    );
    let fewer = engine.run(&engine.context(healthcare_config()), &ids[..1]);

    assert_ne!(base.input_hash, toggled.input_hash);
    assert_ne!(base.input_hash, fewer.input_hash);
    assert!(toggled.get("portnox").unwrap().roi.benefits.insurance > 0.0);
}
