//! Ranking Engine
//!
//! Normalizes the per-vendor results to 0-100 sub-scores and combines them
//! with the profile weights into an overall score and recommendation.

use super::profile::RankingProfile;
use nac_core::{
    safe_div, ComplianceScore, OperationalImpact, RankingResult, RecommendationTier, RiskScore,
    RoiResult, SubScores, TcoResult,
};

/// Recommendation shown for the organization's own vendor
pub const PRIMARY_RECOMMENDATION: &str = "Current solution: baseline for comparison";

/// All results of one vendor the ranking reads
#[derive(Debug, Clone, Copy)]
pub struct RankingInput<'a> {
    pub tco: &'a TcoResult,
    pub roi: &'a RoiResult,
    pub risk: &'a RiskScore,
    pub compliance: &'a ComplianceScore,
    pub operational: &'a OperationalImpact,
    pub is_primary: bool,
}

fn percent(value: f64) -> f64 {
    if value.is_finite() {
        value.clamp(0.0, 100.0)
    } else {
        0.0
    }
}

pub struct RankingEngine {
    profile: RankingProfile,
}

impl RankingEngine {
    pub fn new(profile: RankingProfile) -> Self {
        Self { profile }
    }

    pub fn profile(&self) -> &RankingProfile {
        &self.profile
    }

    pub fn sub_scores(&self, input: &RankingInput) -> SubScores {
        let ceiling = self.profile.tco_ceiling;
        let cost = if ceiling > 0.0 {
            percent(safe_div(ceiling - input.tco.total, ceiling) * 100.0)
        } else {
            0.0
        };

        let cap = self.profile.roi_cap;
        let roi = percent(safe_div(input.roi.percentage.capped(cap), cap) * 100.0);

        SubScores {
            cost,
            roi,
            risk: percent(100.0 - input.risk.score as f64),
            compliance: percent(input.compliance.overall),
            operational: percent(input.operational.efficiency_gain),
        }
    }

    pub fn rank(&self, input: &RankingInput) -> RankingResult {
        let sub_scores = self.sub_scores(input);
        let w = &self.profile.weights;

        let weighted = sub_scores.cost * w.cost
            + sub_scores.roi * w.roi
            + sub_scores.risk * w.risk
            + sub_scores.compliance * w.compliance
            + sub_scores.operational * w.operational;
        let overall_score = percent(weighted.round()) as u32;

        let (tier, recommendation) = if input.is_primary {
            (RecommendationTier::Primary, PRIMARY_RECOMMENDATION.to_string())
        } else {
            let tier = self.tier_for(overall_score);
            (tier, tier_label(tier).to_string())
        };

        tracing::trace!(overall_score, ?tier, "vendor ranked");

        RankingResult {
            overall_score,
            recommendation,
            tier,
            sub_scores,
        }
    }

    pub fn tier_for(&self, score: u32) -> RecommendationTier {
        let t = &self.profile.thresholds;
        if score >= t.excellent {
            RecommendationTier::Excellent
        } else if score >= t.good {
            RecommendationTier::Good
        } else if score >= t.adequate {
            RecommendationTier::Adequate
        } else {
            RecommendationTier::NotRecommended
        }
    }
}

impl Default for RankingEngine {
    fn default() -> Self {
        Self::new(RankingProfile::default())
    }
}

pub fn tier_label(tier: RecommendationTier) -> &'static str {
    match tier {
        RecommendationTier::Excellent => "Excellent choice",
        RecommendationTier::Good => "Good fit",
        RecommendationTier::Adequate => "Adequate",
        RecommendationTier::NotRecommended => "Not recommended",
        RecommendationTier::Primary => PRIMARY_RECOMMENDATION,
    }
}
