use std::collections::HashSet;

use chrono::{DateTime, FixedOffset, NaiveDate};
use serde::{Deserialize, Deserializer, Serialize};
use thiserror::Error;

/// Full forecast envelope returned by the weather service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastResponse {
    pub location: ForecastLocation,
    pub timelines: Timelines,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastLocation {
    pub name: String,
    pub lat: f64,
    pub lon: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Timelines {
    /// Chronologically ascending; the first entry is "today".
    pub daily: Vec<DayRecord>,
}

/// One day's aggregated metrics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DayRecord {
    #[serde(deserialize_with = "deserialize_time")]
    pub time: DateTime<FixedOffset>,
    pub values: DayValues,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DayValues {
    pub temperature_max: f64,
    pub temperature_min: f64,
    pub humidity_avg: f64,
    pub wind_speed_avg: f64,
    pub visibility_avg: f64,
    pub uv_index_max: f64,
    pub precipitation_probability_avg: f64,
    pub rain_accumulation_sum: f64,
    pub weather_code_max: i64,
}

/// Structural mismatch between a response body and the forecast envelope.
#[derive(Debug, Error)]
pub enum SchemaError {
    #[error("malformed forecast JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("duplicate daily entry for {0}")]
    DuplicateTime(String),
}

impl ForecastResponse {
    /// Parse a response body and check it against the expected shape.
    pub fn from_json(body: &str) -> Result<Self, SchemaError> {
        let parsed: ForecastResponse = serde_json::from_str(body)?;
        parsed.validate()?;
        Ok(parsed)
    }

    /// `time` is the identity key of a daily entry and must not repeat.
    pub fn validate(&self) -> Result<(), SchemaError> {
        let mut seen = HashSet::with_capacity(self.timelines.daily.len());
        for day in &self.timelines.daily {
            if !seen.insert(day.time) {
                return Err(SchemaError::DuplicateTime(day.time.to_rfc3339()));
            }
        }
        Ok(())
    }

    pub fn days(&self) -> &[DayRecord] {
        &self.timelines.daily
    }
}

/// Accepts an RFC 3339 timestamp or a bare `YYYY-MM-DD` date (read as UTC midnight).
pub fn parse_time(raw: &str) -> Option<DateTime<FixedOffset>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt);
    }

    let date = NaiveDate::parse_from_str(raw, "%Y-%m-%d").ok()?;
    let utc = FixedOffset::east_opt(0)?;
    date.and_hms_opt(0, 0, 0)?.and_local_timezone(utc).single()
}

fn deserialize_time<'de, D>(deserializer: D) -> Result<DateTime<FixedOffset>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse_time(&raw).ok_or_else(|| {
        serde::de::Error::custom(format!("invalid ISO-8601 time '{raw}'"))
    })
}
