//! NAC Engine: Vendor Comparison Pass
//!
//! ```text
//! (OrganizationConfig, selected ids)
//!        ↓
//!  CalculationContext ── Registry (vendors, frameworks, industries)
//!        ↓
//!  per vendor: TCO → CashFlow → ROI → Risk → Compliance → Operations → Ranking
//!        ↓
//!    ResultSet (vendorId → VendorResults, skipped ids, input hash)
//! ```
//!
//! A pass is a pure function of its inputs. Nothing is cached between
//! passes and each result set replaces the previous one whole.
//!
//! # Example
//!
//! ```ignore
//! use nac_core::{parse_selected_vendors, OrganizationConfig};
//! use nac_engine::ComparisonEngine;
//!
//! let engine = ComparisonEngine::load_dir("data")?;
//! let ctx = engine.context(OrganizationConfig::new().with_devices(1200));
//! let results = engine.run(&ctx, &parse_selected_vendors(r#"["portnox", "cisco"]"#));
//! for id in results.ranked() {
//!     println!("{id}: {}", results.get(id).unwrap().ranking.overall_score);
//! }
//! ```

pub mod runner;

pub use runner::ComparisonEngine;

use nac_core::{NacResult, OrganizationConfig, ResultSet};
use nac_registry::Registry;
use std::path::Path;

impl ComparisonEngine {
    /// Engine over the catalogs found in `dir`
    pub fn load_dir(dir: impl AsRef<Path>) -> NacResult<Self> {
        Ok(Self::new(Registry::load_dir(dir)?))
    }
}

/// One-shot pass with default weights and profiles
pub fn calculate(registry: Registry, config: OrganizationConfig, selected: &[String]) -> ResultSet {
    let engine = ComparisonEngine::new(registry);
    let ctx = engine.context(config);
    engine.run(&ctx, selected)
}
