use chrono::{DateTime, FixedOffset};
use serde::Serialize;

/// One time-bounded slot of the 36-hour forecast.
///
/// Readings the upstream omitted for this slot are empty strings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ForecastWindow {
    pub start_time: String,
    pub end_time: String,
    pub weather: String,
    pub rain: String,
    pub min_temp: String,
    pub max_temp: String,
    pub comfort: String,
    pub wind_speed: String,
}

/// Forecast for one locality, windows in chronological order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedForecast {
    pub location_name: String,
    pub windows: Vec<ForecastWindow>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ForecastReport {
    pub city: String,
    pub city_key: String,
    pub update_time: DateTime<FixedOffset>,
    pub forecasts: Vec<ForecastWindow>,
}

/// A single advisory reading from the temperature-difference dataset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TempDiffRecord {
    pub issue_time: String,
    pub index: i64,
    pub warning_text: String,
}

/// Highest advisory index found for a request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PeakTempDiff {
    pub index: i64,
    pub warning_text: String,
    pub found: bool,
}

impl PeakTempDiff {
    pub fn not_found() -> Self {
        Self::default()
    }
}

impl From<&TempDiffRecord> for PeakTempDiff {
    fn from(record: &TempDiffRecord) -> Self {
        Self {
            index: record.index,
            warning_text: record.warning_text.clone(),
            found: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClothingAdvice {
    pub zh: String,
    pub en: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AggregatedAdvisory {
    pub temp_diff_index: Option<i64>,
    pub temp_diff_warning: String,
    pub location_name: String,
    pub clothing_advice: ClothingAdvice,
    #[serde(rename = "desc")]
    pub summary: String,
}
