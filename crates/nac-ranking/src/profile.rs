//! Ranking profiles
//!
//! Weights and normalization bounds of the overall vendor score.

use nac_core::{NacError, NacResult};
use serde::{Deserialize, Serialize};

/// Share of each sub-score in the overall score
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RankingWeights {
    pub cost: f64,
    pub roi: f64,
    /// Applied to the inverted risk score
    pub risk: f64,
    pub compliance: f64,
    pub operational: f64,
}

impl Default for RankingWeights {
    fn default() -> Self {
        Self {
            cost: 0.25,
            roi: 0.20,
            risk: 0.20,
            compliance: 0.20,
            operational: 0.15,
        }
    }
}

impl RankingWeights {
    pub fn total(&self) -> f64 {
        self.cost + self.roi + self.risk + self.compliance + self.operational
    }
}

/// Minimum overall score of each recommendation tier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TierThresholds {
    pub excellent: u32,
    pub good: u32,
    pub adequate: u32,
}

impl Default for TierThresholds {
    fn default() -> Self {
        Self {
            excellent: 80,
            good: 60,
            adequate: 40,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RankingProfile {
    /// Profile name (e.g., "balanced@1.0")
    pub name: String,

    pub weights: RankingWeights,

    // === Normalization ===

    /// TCO at or above which the cost sub-score is 0
    pub tco_ceiling: f64,

    /// ROI percentage that earns the full ROI sub-score
    pub roi_cap: f64,

    pub thresholds: TierThresholds,
}

impl RankingProfile {
    /// Even-handed weighting
    pub fn balanced() -> Self {
        Self {
            name: "balanced@1.0".to_string(),
            weights: RankingWeights::default(),
            tco_ceiling: 2_000_000.0,
            roi_cap: 300.0,
            thresholds: TierThresholds::default(),
        }
    }

    /// Weighting for budget-driven evaluations
    pub fn cost_focused() -> Self {
        Self {
            name: "cost-focused@1.0".to_string(),
            weights: RankingWeights {
                cost: 0.30,
                roi: 0.25,
                risk: 0.20,
                compliance: 0.15,
                operational: 0.10,
            },
            ..Self::balanced()
        }
    }

    pub fn from_yaml(yaml: &str) -> NacResult<Self> {
        serde_yaml::from_str(yaml).map_err(|e| NacError::ConfigError(e.to_string()))
    }

    /// Get profile by name
    pub fn for_name(name: &str) -> Self {
        match name {
            "cost-focused" | "cost" => Self::cost_focused(),
            _ => Self::balanced(),
        }
    }
}

impl Default for RankingProfile {
    fn default() -> Self {
        Self::balanced()
    }
}
