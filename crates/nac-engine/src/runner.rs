//! Comparison Runner: one full calculation pass over the selected vendors
use nac_core::{CalculationContext, ResultSet, TcoResult, VendorProfile, VendorResults};
use nac_finance::{
    CostAggregator, OperationalAnalyzer, RoiEngine, SensitivityAnalyzer, SensitivityRequest,
    SensitivityResult, TimeSeriesProjector,
};
use nac_ranking::{RankingEngine, RankingInput, RankingProfile};
use nac_registry::Registry;
use nac_risk::{ComplianceScorer, RiskScorer, RiskWeights};
use std::time::Instant;

pub struct ComparisonEngine {
    registry: Registry,
    risk: RiskScorer,
    ranking: RankingEngine,
}

impl ComparisonEngine {
    pub fn new(registry: Registry) -> Self {
        Self {
            registry,
            risk: RiskScorer::default(),
            ranking: RankingEngine::default(),
        }
    }

    pub fn with_risk_weights(mut self, weights: RiskWeights) -> Self {
        self.risk = RiskScorer::new(weights);
        self
    }

    pub fn with_ranking_profile(mut self, profile: RankingProfile) -> Self {
        self.ranking = RankingEngine::new(profile);
        self
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    pub fn ranking_profile(&self) -> &RankingProfile {
        self.ranking.profile()
    }

    /// Context for `config` using the registry's industry table
    pub fn context(&self, config: nac_core::OrganizationConfig) -> CalculationContext {
        CalculationContext::new(config.normalized()).with_industries(self.registry.industries.clone())
    }

    /// Run every component for each selected vendor.
    ///
    /// Ids without a profile are skipped and listed in `skipped`; duplicates
    /// are evaluated once. The result set replaces any previous one in full.
    pub fn run(&self, ctx: &CalculationContext, selected: &[String]) -> ResultSet {
        let start = Instant::now();

        let mut profiles: Vec<&VendorProfile> = Vec::with_capacity(selected.len());
        let mut skipped = Vec::new();
        for id in selected {
            if profiles.iter().any(|p| &p.id == id) || skipped.contains(id) {
                continue;
            }
            match self.registry.vendors.get(id) {
                Some(profile) => profiles.push(profile),
                None => {
                    tracing::warn!(trace_id = %ctx.trace_id, vendor = %id, "unknown vendor, skipping");
                    skipped.push(id.clone());
                }
            }
        }

        let input_hash = ctx.fingerprint(&profiles);

        // The primary vendor's TCO is what every other vendor is compared against
        let comparison: Option<(String, TcoResult)> = ctx
            .config
            .primary_vendor
            .as_deref()
            .and_then(|primary| profiles.iter().find(|p| p.id == primary))
            .map(|p| (p.id.clone(), CostAggregator::new(ctx).aggregate(p)));

        let mut result_set = ResultSet {
            input_hash,
            skipped,
            ..Default::default()
        };

        for profile in profiles {
            let against = comparison
                .as_ref()
                .filter(|(primary, _)| primary != &profile.id)
                .map(|(_, tco)| tco);
            let results = self.evaluate_vendor(ctx, profile, against);
            result_set.results.insert(profile.id.clone(), results);
        }

        tracing::debug!(
            trace_id = %ctx.trace_id,
            vendors = result_set.len(),
            skipped = result_set.skipped.len(),
            input_hash = %result_set.input_hash,
            elapsed_us = start.elapsed().as_micros() as u64,
            "calculation pass complete"
        );

        result_set
    }

    /// Vary one input for a single vendor; `None` for an unknown id
    pub fn sensitivity(
        &self,
        ctx: &CalculationContext,
        vendor_id: &str,
        request: &SensitivityRequest,
    ) -> Option<SensitivityResult> {
        let Some(profile) = self.registry.vendors.get(vendor_id) else {
            tracing::warn!(trace_id = %ctx.trace_id, vendor = %vendor_id, "unknown vendor for sensitivity analysis");
            return None;
        };
        Some(SensitivityAnalyzer::new(ctx).analyze(profile, request))
    }

    /// All results for one vendor
    pub fn evaluate_vendor(
        &self,
        ctx: &CalculationContext,
        profile: &VendorProfile,
        comparison: Option<&TcoResult>,
    ) -> VendorResults {
        let config = &ctx.config;
        let is_primary = config.is_primary(&profile.id);

        let tco = CostAggregator::new(ctx).aggregate(profile);
        let cash_flow = TimeSeriesProjector::new(ctx.granularity).project(&tco, config, profile.deployment.model);
        let yearly = TimeSeriesProjector::yearly(&cash_flow);
        let roi = RoiEngine::new(ctx).evaluate(&tco, profile, comparison);
        let risk = self.risk.score(profile);
        let compliance = ComplianceScorer::new(&self.registry.frameworks).score(
            profile,
            &config.compliance_frameworks,
            is_primary,
        );
        let operational = OperationalAnalyzer::new(ctx).analyze(profile);

        let ranking = self.ranking.rank(&RankingInput {
            tco: &tco,
            roi: &roi,
            risk: &risk,
            compliance: &compliance,
            operational: &operational,
            is_primary,
        });

        tracing::debug!(
            trace_id = %ctx.trace_id,
            vendor = %profile.id,
            tco = tco.total,
            roi = %roi.percentage,
            risk = risk.score,
            score = ranking.overall_score,
            "vendor evaluated"
        );

        VendorResults {
            vendor_id: profile.id.clone(),
            vendor_name: profile.display_name().to_string(),
            tco,
            cash_flow,
            yearly,
            roi,
            risk,
            compliance,
            operational,
            ranking,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nac_core::{OrganizationConfig, RecommendationTier};
    use nac_registry::VendorCatalog;

    fn engine() -> ComparisonEngine {
        let mut cheap = VendorProfile::new("cheap", "Cheap NAC").with_fte(0.5);
        cheap.pricing.per_device_monthly = Some(2.0);
        let mut pricey = VendorProfile::new("pricey", "Pricey NAC").with_fte(1.5);
        pricey.pricing.per_device_annual = Some(60.0);
        pricey.pricing.hardware_base = Some(80_000.0);

        let registry = Registry {
            vendors: VendorCatalog::from_iter([cheap, pricey]),
            ..Default::default()
        };
        ComparisonEngine::new(registry)
    }

    fn ids(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_unknown_ids_are_skipped() {
        let engine = engine();
        let ctx = engine.context(OrganizationConfig::new());
        let results = engine.run(&ctx, &ids(&["cheap", "ghost", "pricey", "ghost"]));

        assert_eq!(results.len(), 2);
        assert_eq!(results.skipped, vec!["ghost"]);
        assert!(results.get("ghost").is_none());
    }

    #[test]
    fn test_duplicates_evaluated_once() {
        let engine = engine();
        let ctx = engine.context(OrganizationConfig::new());
        let results = engine.run(&ctx, &ids(&["cheap", "cheap"]));
        assert_eq!(results.len(), 1);
        assert!(results.skipped.is_empty());
    }

    #[test]
    fn test_primary_vendor_is_comparison() {
        let engine = engine();
        let ctx = engine.context(OrganizationConfig::new().with_primary_vendor("pricey"));
        let results = engine.run(&ctx, &ids(&["cheap", "pricey"]));

        let cheap = results.get("cheap").unwrap();
        let pricey = results.get("pricey").unwrap();
        assert_eq!(pricey.ranking.tier, RecommendationTier::Primary);
        assert!(pricey.roi.savings_vs_comparison.is_none());
        assert_eq!(
            cheap.roi.savings_vs_comparison,
            Some(pricey.tco.total - cheap.tco.total)
        );
    }

    #[test]
    fn test_empty_selection() {
        let engine = engine();
        let ctx = engine.context(OrganizationConfig::new());
        let results = engine.run(&ctx, &[]);
        assert!(results.is_empty());
        assert!(results.input_hash.starts_with("blake3:"));
    }

    #[test]
    fn test_sensitivity_for_catalog_vendor() {
        use nac_finance::SensitivityParameter;

        let engine = engine();
        let ctx = engine.context(OrganizationConfig::new());
        let request = SensitivityRequest::new(SensitivityParameter::FteCost);

        let result = engine.sensitivity(&ctx, "pricey", &request).unwrap();
        assert_eq!(result.vendor_id, "pricey");
        assert_eq!(result.points.len(), 5);
        assert!(result.points.windows(2).all(|w| w[1].tco > w[0].tco));
        assert!(engine.sensitivity(&ctx, "ghost", &request).is_none());
    }

    #[test]
    fn test_context_clamps_long_horizon() {
        let engine = engine();
        let ctx = engine.context(OrganizationConfig::new().with_years(1_100_000_000));
        assert_eq!(ctx.config.years, nac_core::MAX_YEARS);

        let results = engine.run(&ctx, &ids(&["cheap"]));
        let cheap = results.get("cheap").unwrap();
        assert_eq!(cheap.cash_flow.len(), (nac_core::MAX_YEARS * 4 + 1) as usize);
    }

    #[test]
    fn test_context_normalizes_config() {
        let engine = engine();
        let ctx = engine.context(OrganizationConfig::new().with_years(0));
        assert_eq!(ctx.config.years, 1);
    }
}
