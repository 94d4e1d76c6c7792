use anyhow::Context;
use clap::{Parser, Subcommand};
use serde::Serialize;
use tw_weather_core::{Config, build_advisory, build_forecast, provider_from_config};

use crate::routes;

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(
    name = "tw-weather",
    version,
    about = "Weather, temperature-difference advisories and astronomy data for Taiwan"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Run the HTTP API.
    Serve {
        /// Listen address; overrides `bind` from the config file and BIND_ADDR.
        #[arg(long)]
        bind: Option<String>,
    },

    /// Store the open-data API key in the config file.
    Configure,

    /// Print the 36-hour forecast for a city as JSON.
    Forecast {
        /// City code, e.g. "taipei" or "kaohsiung".
        city: String,
    },

    /// Print the temperature-difference clothing advisory for a city as JSON.
    Advise {
        /// City code, e.g. "taipei" or "kaohsiung".
        city: String,
    },
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        match self.command {
            Command::Configure => configure(),
            Command::Serve { bind } => {
                let config = Config::load_or_default()?.apply_env();
                if config.api_key().is_none() {
                    tracing::warn!("no API key configured; data endpoints will answer 500");
                }
                let bind = bind.unwrap_or_else(|| config.bind.clone());
                let provider = provider_from_config(&config)?;
                routes::serve(&bind, provider).await
            }
            Command::Forecast { city } => {
                let provider = provider_from_config(&Config::load_or_default()?.apply_env())?;
                let report = build_forecast(provider.as_ref(), &city).await?;
                print_json(&report)
            }
            Command::Advise { city } => {
                let provider = provider_from_config(&Config::load_or_default()?.apply_env())?;
                let advisory = build_advisory(provider.as_ref(), &city).await?;
                print_json(&advisory)
            }
        }
    }
}

fn configure() -> anyhow::Result<()> {
    let mut config = Config::load()?;

    let api_key = inquire::Password::new("CWA open-data API key:")
        .without_confirmation()
        .with_display_mode(inquire::PasswordDisplayMode::Masked)
        .prompt()
        .context("Failed to read API key")?;

    config.set_api_key(api_key);
    config.save()?;

    println!("Saved to {}", Config::config_file_path()?.display());
    Ok(())
}

fn print_json(value: &impl Serialize) -> anyhow::Result<()> {
    let text = serde_json::to_string_pretty(value).context("Failed to serialize output")?;
    println!("{text}");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_serve_with_bind() {
        let cli = Cli::try_parse_from(["tw-weather", "serve", "--bind", "127.0.0.1:8080"]).unwrap();
        match cli.command {
            Command::Serve { bind } => assert_eq!(bind.as_deref(), Some("127.0.0.1:8080")),
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn advise_requires_a_city() {
        assert!(Cli::try_parse_from(["tw-weather", "advise"]).is_err());

        let cli = Cli::try_parse_from(["tw-weather", "advise", "Taipei"]).unwrap();
        assert!(matches!(cli.command, Command::Advise { city } if city == "Taipei"));
    }
}
