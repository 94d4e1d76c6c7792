//! Request-level use cases composed from the gateway and the pure stages.

use chrono::{NaiveDate, Utc};

use crate::{
    WeatherError, WeatherProvider,
    advisory::{self, NO_DATA},
    forecast::{normalize, today_bounds},
    locality::resolve,
    model::{AggregatedAdvisory, ForecastReport},
    tempdiff::{extract_peak, taiwan_today},
};

/// Normalized 36-hour forecast for a city key.
pub async fn build_forecast(
    provider: &dyn WeatherProvider,
    city_key: &str,
) -> Result<ForecastReport, WeatherError> {
    let locality = resolve(city_key)?;
    let payload = provider.fetch_forecast(locality.canonical_name).await?;
    let forecast = normalize(&payload, locality.canonical_name)?;

    Ok(ForecastReport {
        city: forecast.location_name,
        city_key: locality.key.to_string(),
        update_time: Utc::now().fixed_offset(),
        forecasts: forecast.windows,
    })
}

/// Temperature-difference advisory for a city key, using Taiwan's current date.
pub async fn build_advisory(
    provider: &dyn WeatherProvider,
    city_key: &str,
) -> Result<AggregatedAdvisory, WeatherError> {
    build_advisory_on(provider, city_key, taiwan_today()).await
}

/// Temperature-difference advisory for a city key as of `today`.
///
/// Only locality resolution and the temperature-difference fetch can fail the
/// request. The forecast fetch that refines the advice is best-effort: if it
/// fails, the advice is derived from the index alone.
pub async fn build_advisory_on(
    provider: &dyn WeatherProvider,
    city_key: &str,
    today: NaiveDate,
) -> Result<AggregatedAdvisory, WeatherError> {
    let locality = resolve(city_key)?;
    let payload = provider.fetch_temp_diff(locality.canonical_name).await?;
    let peak = extract_peak(&payload, today);

    if !peak.found {
        tracing::info!(locality = locality.key, "no temperature difference records");
        return Ok(AggregatedAdvisory {
            temp_diff_index: None,
            temp_diff_warning: String::new(),
            location_name: locality.canonical_name.to_string(),
            clothing_advice: NO_DATA.into(),
            summary: format!("{} 目前查無溫差提醒資料", locality.canonical_name),
        });
    }

    let bounds = match temperature_bounds(provider, locality.canonical_name).await {
        Ok(bounds) => bounds,
        Err(err) => {
            tracing::warn!(
                locality = locality.key,
                error = %err,
                "forecast unavailable, advising from index only"
            );
            None
        }
    };
    let (max_temp, min_temp) = bounds.unzip();

    Ok(AggregatedAdvisory {
        temp_diff_index: Some(peak.index),
        temp_diff_warning: peak.warning_text,
        location_name: locality.canonical_name.to_string(),
        clothing_advice: advisory::advise(peak.index, max_temp, min_temp),
        summary: format!(
            "{} 今日溫差提醒指數為 {}",
            locality.canonical_name, peak.index
        ),
    })
}

async fn temperature_bounds(
    provider: &dyn WeatherProvider,
    locality: &str,
) -> Result<Option<(f64, f64)>, WeatherError> {
    let payload = provider.fetch_forecast(locality).await?;
    let forecast = normalize(&payload, locality)?;
    Ok(today_bounds(&forecast))
}
