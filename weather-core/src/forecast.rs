//! Merges the per-element series of the 36-hour forecast into one record per window.

use crate::{
    WeatherError,
    model::{ForecastWindow, NormalizedForecast},
    provider::raw::{RawElementSlot, RawForecastPayload},
};

/// Fields of [`ForecastWindow`] fed by an upstream weather element.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Field {
    Weather,
    Rain,
    MinTemp,
    MaxTemp,
    Comfort,
    WindSpeed,
}

impl Field {
    fn from_element_name(name: &str) -> Option<Self> {
        match name {
            "Wx" => Some(Field::Weather),
            "PoP" => Some(Field::Rain),
            "MinT" => Some(Field::MinTemp),
            "MaxT" => Some(Field::MaxTemp),
            "CI" => Some(Field::Comfort),
            "WS" => Some(Field::WindSpeed),
            _ => None,
        }
    }

    fn slot<'a>(&self, window: &'a mut ForecastWindow) -> &'a mut String {
        match self {
            Field::Weather => &mut window.weather,
            Field::Rain => &mut window.rain,
            Field::MinTemp => &mut window.min_temp,
            Field::MaxTemp => &mut window.max_temp,
            Field::Comfort => &mut window.comfort,
            Field::WindSpeed => &mut window.wind_speed,
        }
    }
}

/// Build one [`ForecastWindow`] per time slot of the first weather element.
///
/// The first element's series length is the window count. Other elements
/// contribute where they have a slot at the same index; longer series are
/// cut, shorter ones leave the remaining fields empty.
///
/// # Errors
///
/// [`WeatherError::EmptyLocation`] when the payload has no location at all.
pub fn normalize(
    payload: &RawForecastPayload,
    locality: &str,
) -> Result<NormalizedForecast, WeatherError> {
    let location = payload
        .location
        .first()
        .ok_or_else(|| WeatherError::EmptyLocation {
            locality: locality.to_string(),
        })?;

    let axis: &[RawElementSlot] = location
        .weather_element
        .first()
        .map(|el| el.time.as_slice())
        .unwrap_or_default();

    let mut windows: Vec<ForecastWindow> = axis
        .iter()
        .map(|slot| ForecastWindow {
            start_time: slot.start_time.clone(),
            end_time: slot.end_time.clone(),
            ..ForecastWindow::default()
        })
        .collect();

    for element in &location.weather_element {
        let Some(field) = Field::from_element_name(&element.element_name) else {
            continue;
        };

        for (window, slot) in windows.iter_mut().zip(&element.time) {
            *field.slot(window) = slot.parameter.parameter_name.clone().unwrap_or_default();
        }
    }

    let location_name = if location.location_name.is_empty() {
        locality.to_string()
    } else {
        location.location_name.clone()
    };

    Ok(NormalizedForecast {
        location_name,
        windows,
    })
}

/// Today's `(max, min)` temperature in °C, read from the first window.
///
/// `None` unless both bounds are present and numeric.
pub fn today_bounds(forecast: &NormalizedForecast) -> Option<(f64, f64)> {
    let first = forecast.windows.first()?;
    let max = first.max_temp.trim().parse::<f64>().ok()?;
    let min = first.min_temp.trim().parse::<f64>().ok()?;
    Some((max, min))
}
