// src/catalog/weather.rs
use serde_json::Value;

use crate::fetch::error::ShapeError;
use crate::fetch::extract::{first, number, text};
use crate::fetch::types::{CredentialPlacement, EndpointDescriptor, Fact};

pub fn entries() -> Vec<EndpointDescriptor> {
    vec![
        EndpointDescriptor::json(
            "weather_current",
            "https://api.openweathermap.org/data/2.5/weather?q={city}&appid={api_key}&units={units}",
            openweather_current,
        )
        .summary("Current conditions for a city (OpenWeatherMap)")
        .with_credential("OPENWEATHER_API_KEY", CredentialPlacement::Url)
        .with_default("units", "metric"),
        EndpointDescriptor::json(
            "weather_open_meteo",
            "https://api.open-meteo.com/v1/forecast?latitude={lat}&longitude={lon}&current_weather=true",
            open_meteo_current,
        )
        .summary("Current temperature and wind at coordinates (Open-Meteo)"),
    ]
}

pub(crate) fn openweather_current(v: &Value) -> Result<Fact, ShapeError> {
    let condition = first(v, "/weather")?;
    Ok(Fact::record([
        ("city", Fact::Text(text(v, "/name")?)),
        ("temperature", Fact::Number(number(v, "/main/temp")?)),
        ("humidity", Fact::Number(number(v, "/main/humidity")?)),
        ("description", Fact::Text(text(condition, "/description")?)),
    ]))
}

pub(crate) fn open_meteo_current(v: &Value) -> Result<Fact, ShapeError> {
    Ok(Fact::record([
        (
            "temperature_c",
            Fact::Number(number(v, "/current_weather/temperature")?),
        ),
        (
            "wind_kmh",
            Fact::Number(number(v, "/current_weather/windspeed")?),
        ),
    ]))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn openweather_sample() {
        let body = json!({
            "name": "London",
            "weather": [{"main": "Clouds", "description": "broken clouds"}],
            "main": {"temp": 14.2, "humidity": 81}
        });
        let f = openweather_current(&body).unwrap();
        assert_eq!(f.get("city").and_then(Fact::as_text), Some("London"));
        assert_eq!(f.get("temperature").and_then(Fact::as_number), Some(14.2));
        assert_eq!(
            f.get("description").and_then(Fact::as_text),
            Some("broken clouds")
        );
    }

    #[test]
    fn openweather_without_conditions_is_shape_error() {
        let body = json!({"name": "X", "weather": [], "main": {"temp": 1, "humidity": 2}});
        assert!(openweather_current(&body)
            .unwrap_err()
            .0
            .contains("was empty"));
    }

    #[test]
    fn open_meteo_sample() {
        let body = json!({"current_weather": {"temperature": 21.5, "windspeed": 9.0}});
        let f = open_meteo_current(&body).unwrap();
        assert_eq!(f.get("wind_kmh").and_then(Fact::as_number), Some(9.0));
    }
}
