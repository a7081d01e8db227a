//! Binary entrypoint for the NAC comparison API.
use nac_api::{config::ServerConfig, run};
use tracing_subscriber::EnvFilter;

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();
    // NAC_ADDR, NAC_DATA_DIR and NAC_RANKING_PROFILE override the defaults
    let config = ServerConfig::from_env()?;
    run(config).await
}
