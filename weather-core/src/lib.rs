//! Core library for the Taiwan weather service.
//!
//! This crate defines:
//! - Configuration & credential handling
//! - The gateway to the national meteorological open-data service
//! - Forecast normalization and temperature-difference extraction
//! - The bilingual clothing advisory cascade
//!
//! It is used by `tw-weather-api`, but can also be reused by other binaries or services.

pub mod advisory;
pub mod aggregate;
pub mod config;
pub mod error;
pub mod forecast;
pub mod locality;
pub mod model;
pub mod provider;
pub mod tempdiff;

pub use advisory::advise;
pub use aggregate::{build_advisory, build_forecast};
pub use config::Config;
pub use error::{UpstreamFailure, WeatherError};
pub use locality::{Locality, resolve};
pub use model::{AggregatedAdvisory, ClothingAdvice, ForecastReport, ForecastWindow, PeakTempDiff};
pub use provider::{WeatherProvider, provider_from_config};
