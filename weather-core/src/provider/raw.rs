//! Upstream payload shapes.
//!
//! The datasets are inconsistent about field casing (`Locations` vs
//! `locations`, ...). Aliases here fold both spellings into one structure so
//! nothing past the gateway needs to care.

use serde::Deserialize;
use serde_json::Value;

use crate::UpstreamFailure;

/// Wrapper shared by every dataset response.
#[derive(Debug, Deserialize)]
pub(crate) struct Envelope<T> {
    #[serde(default)]
    success: Value,
    #[serde(default)]
    message: Option<String>,
    records: Option<T>,
}

/// Cap an upstream message at 200 characters, cutting on char boundaries.
pub(crate) fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    if body.chars().count() > MAX {
        format!("{}...", body.chars().take(MAX).collect::<String>())
    } else {
        body.to_string()
    }
}

impl<T> Envelope<T> {
    pub(crate) fn into_records(self, status: u16) -> Result<T, UpstreamFailure> {
        let rejected = matches!(&self.success, Value::Bool(false))
            || matches!(&self.success, Value::String(s) if s == "false");

        if rejected {
            return Err(UpstreamFailure::Status {
                status,
                message: self.message.as_deref().map_or_else(
                    || "upstream reported success=false".to_string(),
                    truncate_body,
                ),
            });
        }

        self.records
            .ok_or_else(|| UpstreamFailure::Decode("response has no records".to_string()))
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawForecastPayload {
    #[serde(default, alias = "Location")]
    pub location: Vec<RawForecastLocation>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawForecastLocation {
    #[serde(default, alias = "LocationName")]
    pub location_name: String,
    #[serde(default, alias = "WeatherElement")]
    pub weather_element: Vec<RawWeatherElement>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawWeatherElement {
    #[serde(default, alias = "ElementName")]
    pub element_name: String,
    #[serde(default, alias = "Time")]
    pub time: Vec<RawElementSlot>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawElementSlot {
    #[serde(default, alias = "StartTime")]
    pub start_time: String,
    #[serde(default, alias = "EndTime")]
    pub end_time: String,
    #[serde(default, alias = "Parameter")]
    pub parameter: RawParameter,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawParameter {
    #[serde(default, alias = "ParameterName")]
    pub parameter_name: Option<String>,
    #[serde(default, alias = "ParameterValue")]
    pub parameter_value: Option<String>,
    #[serde(default, alias = "ParameterUnit")]
    pub parameter_unit: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct RawTempDiffPayload {
    #[serde(default, alias = "locations")]
    pub locations: Vec<RawTempDiffArea>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct RawTempDiffArea {
    #[serde(default, alias = "countyName")]
    pub county_name: String,
    #[serde(default, alias = "location")]
    pub location: Vec<RawTempDiffTown>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct RawTempDiffTown {
    #[serde(default, alias = "locationName")]
    pub location_name: String,
    #[serde(default, alias = "time")]
    pub time: Vec<RawTempDiffSlot>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct RawTempDiffSlot {
    #[serde(default, alias = "issueTime")]
    pub issue_time: String,
    #[serde(default, alias = "weatherElements")]
    pub weather_elements: RawTempDiffElements,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct RawTempDiffElements {
    /// Number or numeric string upstream; anything else is unusable.
    #[serde(default, alias = "temperatureDifferenceIndex")]
    pub temperature_difference_index: Value,
    #[serde(default, alias = "temperatureDifferenceWarning")]
    pub temperature_difference_warning: Option<String>,
}

impl RawTempDiffElements {
    pub fn index(&self) -> Option<i64> {
        match &self.temperature_difference_index {
            Value::Number(n) => n.as_i64().or_else(|| n.as_f64().and_then(whole)),
            Value::String(s) => {
                let s = s.trim();
                s.parse::<i64>()
                    .ok()
                    .or_else(|| s.parse::<f64>().ok().and_then(whole))
            }
            _ => None,
        }
    }
}

/// `7.0` counts as 7; anything with a fractional part does not.
fn whole(f: f64) -> Option<i64> {
    (f.is_finite() && f.fract() == 0.0).then_some(f as i64)
}
