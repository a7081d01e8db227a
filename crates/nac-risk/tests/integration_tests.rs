//! Integration tests for nac-risk with hand-built catalogs.

use nac_core::{DeploymentModel, RiskLevel, VendorProfile};
use nac_registry::FrameworkCatalog;
use nac_risk::{calculate_risk, ComplianceScorer, RiskScorer, RiskWeights};
use std::collections::BTreeSet;

const FRAMEWORKS_YAML: &str = r#"
HIPAA:
  name: HIPAA
  requirements:
    - { name: Access Control, primaryRating: 10, averageRating: 7 }
    - { name: Audit Controls, primaryRating: 9, averageRating: 7 }
    - { name: Integrity, primaryRating: 8, averageRating: 6 }
    - { name: Transmission Security, primaryRating: 9, averageRating: 6 }
PCI-DSS:
  name: PCI DSS
  requirements:
    - { name: Network Segmentation, primaryRating: 9, averageRating: 7 }
    - { name: Access Control, primaryRating: 10, averageRating: 7 }
SOC2:
  name: SOC 2
"#;

fn vendors() -> (VendorProfile, VendorProfile) {
    let mut cloud = VendorProfile::new("cloud", "Cloud NAC")
        .with_zero_trust(95.0)
        .with_automation(90.0)
        .with_compliance_automation(90.0)
        .with_framework("HIPAA")
        .with_framework("PCI-DSS")
        .with_framework("SOC2");
    cloud.features.security.ai_threat_detection = true;
    cloud.features.security.mttr = Some(10.0);

    let mut legacy = VendorProfile::new("legacy", "Legacy NAC")
        .with_model(DeploymentModel::OnPremises)
        .with_zero_trust(60.0)
        .with_automation(45.0)
        .with_framework("PCI-DSS");
    legacy.features.security.rule_based_threat_detection = true;
    legacy.features.security.mttr = Some(480.0);

    (cloud, legacy)
}

#[test]
fn test_risk_orders_vendors() {
    let (cloud, legacy) = vendors();
    let cloud_risk = calculate_risk(&cloud);
    let legacy_risk = calculate_risk(&legacy);

    assert!(cloud_risk.score < legacy_risk.score);
    assert_eq!(cloud_risk.level, RiskLevel::Low);
    // 14 + 12.5 + 18 + 10 + 5.5
    assert_eq!(legacy_risk.score, 60);
    assert_eq!(legacy_risk.level, RiskLevel::Medium);
    assert!(!legacy_risk.recommendations.is_empty());
}

#[test]
fn test_custom_weights() {
    let (_, legacy) = vendors();
    let zero_trust_only = RiskScorer::new(RiskWeights {
        zero_trust: 1.0,
        threat_detection: 0.0,
        mttr: 0.0,
        deployment: 0.0,
        automation: 0.0,
    });
    assert_eq!(zero_trust_only.score(&legacy).score, 40);
}

#[test]
fn test_compliance_across_frameworks() {
    let catalog = FrameworkCatalog::from_yaml(FRAMEWORKS_YAML).unwrap();
    let scorer = ComplianceScorer::new(&catalog);
    let (cloud, legacy) = vendors();
    let required: BTreeSet<String> = ["HIPAA", "PCI-DSS", "SOC2"].iter().map(|s| s.to_string()).collect();

    let primary = scorer.score(&cloud, &required, true);
    assert_eq!(primary.per_framework["HIPAA"], 90.0);
    assert_eq!(primary.per_framework["PCI-DSS"], 95.0);
    assert_eq!(primary.per_framework["SOC2"], 90.0);
    assert!(primary.gaps.is_empty());

    let other = scorer.score(&legacy, &required, false);
    assert_eq!(other.per_framework["HIPAA"], 30.0);
    assert_eq!(other.per_framework["PCI-DSS"], 70.0);
    assert_eq!(other.per_framework["SOC2"], 30.0);
    assert!((other.overall - 130.0 / 3.0).abs() < 1e-9);

    let gap_frameworks: Vec<&str> = other.gaps.iter().map(|g| g.framework.as_str()).collect();
    assert_eq!(gap_frameworks, vec!["HIPAA", "SOC2"]);
    assert_eq!(other.gaps[0].missing_controls.len(), 3);
    assert!(other.gaps[1].missing_controls.is_empty());
}
