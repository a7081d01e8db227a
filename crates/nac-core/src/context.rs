//! Calculation Context: caller-owned inputs of one pass
//!
//! Replaces module-level state: the caller builds a context, hands it to the
//! engine, and nothing survives the call.
use crate::assumptions::{EngineAssumptions, IndustryFactors, IndustryTable};
use crate::config::OrganizationConfig;
use crate::data_model::Granularity;
use crate::vendor::VendorProfile;
use serde::Serialize;

#[derive(Debug, Clone)]
pub struct CalculationContext {
    pub config: OrganizationConfig,
    pub assumptions: EngineAssumptions,
    pub industries: IndustryTable,
    /// Period length of projected cost series
    pub granularity: Granularity,
    /// Correlates log lines of one pass; not part of any result
    pub trace_id: String,
}

#[derive(Serialize)]
struct FingerprintInput<'a> {
    config: &'a OrganizationConfig,
    assumptions: &'a EngineAssumptions,
    industry: &'a IndustryFactors,
    granularity: Granularity,
    profiles: &'a [&'a VendorProfile],
}

impl CalculationContext {
    pub fn new(config: OrganizationConfig) -> Self {
        Self {
            config,
            assumptions: EngineAssumptions::default(),
            industries: IndustryTable::builtin().clone(),
            granularity: Granularity::default(),
            trace_id: uuid::Uuid::new_v4().to_string(),
        }
    }

    pub fn with_assumptions(mut self, assumptions: EngineAssumptions) -> Self {
        self.assumptions = assumptions;
        self
    }

    pub fn with_industries(mut self, industries: IndustryTable) -> Self {
        self.industries = industries;
        self
    }

    pub fn with_granularity(mut self, granularity: Granularity) -> Self {
        self.granularity = granularity;
        self
    }

    /// Factors of the configured industry
    pub fn industry(&self) -> IndustryFactors {
        self.industries.resolve(&self.config.industry)
    }

    /// Breach cost reference: industry average, else the assumption
    pub fn breach_cost(&self) -> f64 {
        self.industry()
            .average_breach_cost
            .unwrap_or(self.assumptions.breach_cost)
    }

    /// Digest of everything that determines the results of a pass
    pub fn fingerprint(&self, profiles: &[&VendorProfile]) -> String {
        let industry = self.industry();
        let input = FingerprintInput {
            config: &self.config,
            assumptions: &self.assumptions,
            industry: &industry,
            granularity: self.granularity,
            profiles,
        };
        let bytes = serde_json::to_vec(&input).unwrap_or_default();
        format!("blake3:{}", blake3::hash(&bytes))
    }
}
