//! Entry point for the Parking Engine binary.
//!
//! Running this binary starts an HTTP server in front of a single
//! parking facility.  The lot size comes from `PARKING_CAPACITY` and
//! the bind address from `PARKING_BIND_ADDR`; a JSON file named by
//! `PARKING_CONFIG_FILE` may supply either.  Log verbosity follows
//! `RUST_LOG` and defaults to `info`.

use anyhow::{Context, Result};
use parking_engine::config::FacilityConfig;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = FacilityConfig::from_env().context("failed to load configuration")?;
    parking_engine::api::serve(config).await
}
