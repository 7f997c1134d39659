//! Shared fixtures for the integration tests.

#![allow(dead_code)]

use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Helper to create one daily entry as the weather service sends it
pub fn test_day(time: &str, temperature_max: f64, weather_code_max: i64) -> serde_json::Value {
    serde_json::json!({
        "time": time,
        "values": {
            "temperatureMax": temperature_max,
            "temperatureMin": temperature_max - 8.0,
            "humidityAvg": 55.4,
            "windSpeedAvg": 4.6,
            "visibilityAvg": 15.99,
            "uvIndexMax": 5,
            "precipitationProbabilityAvg": 10.5,
            "rainAccumulationSum": 0,
            "weatherCodeMax": weather_code_max
        }
    })
}

/// Helper to create a full forecast body with a given number of days
pub fn test_forecast(name: &str, lat: f64, lon: f64, days: usize) -> serde_json::Value {
    let daily: Vec<_> = (0..days)
        .map(|i| test_day(&format!("2024-01-{:02}T06:00:00Z", 15 + i), 20.0 + i as f64, 1000))
        .collect();

    serde_json::json!({
        "location": { "name": name, "lat": lat, "lon": lon, "type": "administrative" },
        "timelines": { "daily": daily }
    })
}

/// Mount a successful daily forecast for `location`
pub async fn mount_forecast(server: &MockServer, location: &str, body: serde_json::Value) {
    Mock::given(method("GET"))
        .and(path("/weather"))
        .and(query_param("location", location))
        .and(query_param("timestep", "1d"))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(server)
        .await;
}
