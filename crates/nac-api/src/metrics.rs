//! Prometheus counters served on `/metrics`.
use prometheus::{Encoder, IntCounter, Registry, TextEncoder};

pub struct ApiMetrics {
    registry: Registry,
    pub calculations: IntCounter,
    pub vendors_evaluated: IntCounter,
    pub skipped_vendors: IntCounter,
}

impl ApiMetrics {
    pub fn new() -> Result<Self, prometheus::Error> {
        let registry = Registry::new();
        let calculations = IntCounter::new("nac_calculations_total", "Calculation passes run")?;
        let vendors_evaluated =
            IntCounter::new("nac_vendors_evaluated_total", "Vendors evaluated across all passes")?;
        let skipped_vendors =
            IntCounter::new("nac_skipped_vendors_total", "Requested vendors without a usable profile")?;

        registry.register(Box::new(calculations.clone()))?;
        registry.register(Box::new(vendors_evaluated.clone()))?;
        registry.register(Box::new(skipped_vendors.clone()))?;

        Ok(Self {
            registry,
            calculations,
            vendors_evaluated,
            skipped_vendors,
        })
    }

    pub fn encode(&self) -> Result<String, prometheus::Error> {
        let encoder = TextEncoder::new();
        let mut buffer = Vec::new();
        encoder.encode(&self.registry.gather(), &mut buffer)?;
        Ok(String::from_utf8_lossy(&buffer).to_string())
    }
}
