//! Risk scoring for vendors
//!
//! Composite 0-100 security exposure score. Every factor is a 0-100 "badness"
//! value multiplied by its weight, so the weighted contributions add up to the
//! score directly.

use nac_core::{RiskLevel, RiskScore, ThreatDetection, VendorProfile};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

pub const FACTOR_ZERO_TRUST: &str = "zero_trust";
pub const FACTOR_THREAT_DETECTION: &str = "threat_detection";
pub const FACTOR_MTTR: &str = "mttr";
pub const FACTOR_DEPLOYMENT: &str = "deployment";
pub const FACTOR_AUTOMATION: &str = "automation";

/// Contributions below this many points get no recommendation
const RECOMMENDATION_THRESHOLD: f64 = 10.0;

/// Factor weights; the defaults sum to 1.0
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RiskWeights {
    pub zero_trust: f64,
    pub threat_detection: f64,
    pub mttr: f64,
    /// Applied to a fixed 100-point penalty for non-cloud deployments
    pub deployment: f64,
    pub automation: f64,
}

impl Default for RiskWeights {
    fn default() -> Self {
        Self {
            zero_trust: 0.35,
            threat_detection: 0.25,
            mttr: 0.2,
            deployment: 0.1,
            automation: 0.1,
        }
    }
}

impl RiskWeights {
    pub fn total(&self) -> f64 {
        self.zero_trust + self.threat_detection + self.mttr + self.deployment + self.automation
    }
}

/// Raw risk of a threat detection tier
pub fn threat_detection_risk(detection: ThreatDetection) -> f64 {
    match detection {
        ThreatDetection::AiBased => 10.0,
        ThreatDetection::RuleBased => 50.0,
        ThreatDetection::None => 90.0,
    }
}

/// Raw risk of a mean time to remediate, in minutes
pub fn mttr_risk(minutes: f64) -> f64 {
    if minutes <= 15.0 {
        10.0
    } else if minutes <= 60.0 {
        30.0
    } else if minutes <= 240.0 {
        60.0
    } else {
        // NaN lands here as well
        90.0
    }
}

fn deficit(value: f64) -> f64 {
    if value.is_finite() {
        100.0 - value.clamp(0.0, 100.0)
    } else {
        100.0
    }
}

#[derive(Debug, Clone, Default)]
pub struct RiskScorer {
    pub weights: RiskWeights,
}

impl RiskScorer {
    pub fn new(weights: RiskWeights) -> Self {
        Self { weights }
    }

    pub fn score(&self, profile: &VendorProfile) -> RiskScore {
        let features = &profile.features;
        let w = &self.weights;

        let mut factors = BTreeMap::new();
        factors.insert(
            FACTOR_ZERO_TRUST.to_string(),
            deficit(features.zero_trust.score) * w.zero_trust,
        );
        factors.insert(
            FACTOR_THREAT_DETECTION.to_string(),
            threat_detection_risk(features.security.threat_detection()) * w.threat_detection,
        );
        factors.insert(
            FACTOR_MTTR.to_string(),
            mttr_risk(features.security.mttr_minutes()) * w.mttr,
        );
        let deployment_penalty = if profile.deployment.model.is_cloud() { 0.0 } else { 100.0 };
        factors.insert(FACTOR_DEPLOYMENT.to_string(), deployment_penalty * w.deployment);
        factors.insert(
            FACTOR_AUTOMATION.to_string(),
            deficit(features.automation) * w.automation,
        );

        let raw: f64 = factors.values().sum();
        let score = raw.round().clamp(0.0, 100.0) as u32;
        let level = RiskLevel::from_score(score);
        let recommendations = recommendations(&factors, level);

        tracing::debug!(vendor = %profile.id, score, level = %level, "risk scored");

        RiskScore {
            score,
            level,
            factors,
            recommendations,
        }
    }
}

fn factor_recommendation(factor: &str) -> Option<&'static str> {
    match factor {
        FACTOR_ZERO_TRUST => Some("Strengthen zero-trust controls: continuous verification and least-privilege access"),
        FACTOR_THREAT_DETECTION => Some("Add behavioural or AI-assisted threat detection"),
        FACTOR_MTTR => Some("Automate remediation to bring mean time to remediate under one hour"),
        FACTOR_DEPLOYMENT => Some("Plan for appliance patching and refresh cycles, or evaluate a cloud-native option"),
        FACTOR_AUTOMATION => Some("Increase policy automation to cut manual enforcement gaps"),
        _ => None,
    }
}

/// Hints for the dominant factors, largest contribution first
fn recommendations(factors: &BTreeMap<String, f64>, level: RiskLevel) -> Vec<String> {
    let mut recs = Vec::new();
    if level == RiskLevel::High {
        recs.push("High residual risk: pair this vendor with compensating controls".to_string());
    }

    let mut dominant: Vec<(&String, &f64)> = factors
        .iter()
        .filter(|(_, contribution)| **contribution >= RECOMMENDATION_THRESHOLD)
        .collect();
    dominant.sort_by(|a, b| b.1.total_cmp(a.1).then_with(|| a.0.cmp(b.0)));

    for (name, _) in dominant {
        if let Some(rec) = factor_recommendation(name) {
            recs.push(rec.to_string());
        }
    }
    recs
}

/// Convenience function with default weights
pub fn calculate_risk(profile: &VendorProfile) -> RiskScore {
    RiskScorer::default().score(profile)
}
