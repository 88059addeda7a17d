//! Payment gateway server
//!
//! Configuration is read from the file named by `PAYMENT_GATEWAY_CONFIG` or
//! the first command-line argument, then overridden by `PAYMENT_GATEWAY_*`
//! environment variables. Without a file, defaults are used.

use anyhow::{Context, Result};
use payment_gateway::config::GatewayConfig;
use payment_gateway::server::ServerBuilder;
use tracing_subscriber::EnvFilter;

const DEFAULT_LOG_FILTER: &str = "payment_gateway=info,tower_http=info";

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER)),
        )
        .init();

    let config_path = std::env::var("PAYMENT_GATEWAY_CONFIG")
        .ok()
        .or_else(|| std::env::args().nth(1));

    let config = match config_path {
        Some(path) => {
            tracing::info!(path = %path, "Loading configuration");
            GatewayConfig::from_yaml_file(&path)?
        }
        None => GatewayConfig::default(),
    }
    .apply_env_overrides()?;

    config.validate().context("invalid gateway configuration")?;

    let addr = config.bind_address();
    ServerBuilder::new().with_config(config).serve(&addr).await
}
