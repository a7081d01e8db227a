//! Compliance coverage scoring
//!
//! Scores a vendor against each framework the organization must satisfy.
//! Requirement ratings are 0-10 and reported on a 0-100 scale.

use nac_core::{ComplianceGap, ComplianceScore, VendorProfile};
use nac_registry::{FrameworkCatalog, FrameworkDefinition};
use std::collections::{BTreeMap, BTreeSet};

/// Score of a framework the vendor does not declare
pub const UNDECLARED_SCORE: f64 = 30.0;
/// Coarse score of a declared framework with strong compliance automation
pub const DECLARED_AUTOMATED_SCORE: f64 = 90.0;
/// Coarse score of a declared framework otherwise
pub const DECLARED_SCORE: f64 = 70.0;
/// Compliance automation from which a declared framework scores high
const AUTOMATION_THRESHOLD: f64 = 75.0;
/// Assumed compliance automation when the vendor has not been assessed
const UNASSESSED_AUTOMATION: f64 = 50.0;
const MAX_GAP_CONTROLS: usize = 3;

pub struct ComplianceScorer<'a> {
    catalog: &'a FrameworkCatalog,
}

impl<'a> ComplianceScorer<'a> {
    pub fn new(catalog: &'a FrameworkCatalog) -> Self {
        Self { catalog }
    }

    /// Score `profile` against `frameworks`.
    ///
    /// `is_primary` selects the reference rating column for requirements the
    /// vendor has no own rating for.
    pub fn score(
        &self,
        profile: &VendorProfile,
        frameworks: &BTreeSet<String>,
        is_primary: bool,
    ) -> ComplianceScore {
        let mut per_framework = BTreeMap::new();
        let mut gaps = Vec::new();

        for framework in frameworks {
            let definition = self.catalog.get(framework).filter(|d| d.has_requirements());
            let score = match definition {
                Some(definition) => self.rated_score(profile, framework, definition, is_primary),
                None => coarse_score(profile, framework),
            };
            per_framework.insert(framework.clone(), score);

            if !profile.compliance.supports(framework) {
                gaps.push(ComplianceGap {
                    framework: framework.clone(),
                    missing_controls: definition
                        .map(|d| {
                            d.requirements
                                .iter()
                                .take(MAX_GAP_CONTROLS)
                                .map(|r| r.name.clone())
                                .collect()
                        })
                        .unwrap_or_default(),
                });
            }
        }

        let overall = if per_framework.is_empty() {
            0.0
        } else {
            per_framework.values().sum::<f64>() / per_framework.len() as f64
        };

        tracing::debug!(
            vendor = %profile.id,
            frameworks = per_framework.len(),
            overall,
            gaps = gaps.len(),
            "compliance scored"
        );

        ComplianceScore {
            overall,
            per_framework,
            gaps,
        }
    }

    fn rated_score(
        &self,
        profile: &VendorProfile,
        framework: &str,
        definition: &FrameworkDefinition,
        is_primary: bool,
    ) -> f64 {
        let own = profile
            .compliance
            .ratings
            .get(framework)
            .filter(|ratings| !ratings.is_empty());
        if own.is_none() && !profile.compliance.supports(framework) {
            return UNDECLARED_SCORE;
        }

        let total: f64 = definition
            .requirements
            .iter()
            .map(|requirement| {
                let rating = own
                    .and_then(|ratings| ratings.get(&requirement.name).copied())
                    .unwrap_or(if is_primary {
                        requirement.primary_rating
                    } else {
                        requirement.average_rating
                    });
                clamp_rating(rating)
            })
            .sum();
        total / definition.requirements.len() as f64 * 10.0
    }
}

fn clamp_rating(rating: f64) -> f64 {
    if rating.is_finite() {
        rating.clamp(0.0, 10.0)
    } else {
        0.0
    }
}

/// Binary fallback when the framework has no requirement list
fn coarse_score(profile: &VendorProfile, framework: &str) -> f64 {
    if !profile.compliance.supports(framework) {
        return UNDECLARED_SCORE;
    }
    let automation = profile
        .features
        .compliance
        .automation
        .unwrap_or(UNASSESSED_AUTOMATION);
    if automation >= AUTOMATION_THRESHOLD {
        DECLARED_AUTOMATED_SCORE
    } else {
        DECLARED_SCORE
    }
}

/// Convenience function for a one-off score
pub fn calculate_compliance(
    catalog: &FrameworkCatalog,
    profile: &VendorProfile,
    frameworks: &BTreeSet<String>,
    is_primary: bool,
) -> ComplianceScore {
    ComplianceScorer::new(catalog).score(profile, frameworks, is_primary)
}
