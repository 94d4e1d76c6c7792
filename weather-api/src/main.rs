//! Binary crate for the `tw-weather` service.
//!
//! This crate focuses on:
//! - Parsing CLI arguments and interactive configuration
//! - Serving the JSON HTTP API
//! - Mapping library errors onto HTTP responses

use clap::Parser;
use tracing_subscriber::EnvFilter;

mod cli;
mod error;
mod routes;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,tw_weather_core=debug"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let cmd = cli::Cli::parse();
    cmd.run().await
}
