//! NAC Ranking: composite vendor score
//!
//! Combines cost, ROI, risk, compliance and operational results into one
//! 0-100 score per vendor, weighted by a configurable profile.
//!
//! # Example
//!
//! ```ignore
//! use nac_ranking::{RankingEngine, RankingInput, RankingProfile};
//!
//! let engine = RankingEngine::new(RankingProfile::for_name("cost"));
//! let ranking = engine.rank(&RankingInput {
//!     tco: &tco,
//!     roi: &roi,
//!     risk: &risk,
//!     compliance: &compliance,
//!     operational: &operational,
//!     is_primary: false,
//! });
//! println!("{} ({})", ranking.overall_score, ranking.recommendation);
//! ```

pub mod profile;
pub mod ranking;

pub use profile::{RankingProfile, RankingWeights, TierThresholds};
pub use ranking::{tier_label, RankingEngine, RankingInput, PRIMARY_RECOMMENDATION};
