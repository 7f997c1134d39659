//! Turns a raw [`DayRecord`] into the values a forecast card displays.
//!
//! Everything here is pure: the same record and index always produce the same
//! [`CardView`]. Values are not validated; a negative humidity or an unknown
//! weather code flows through banding and rounding unchanged.

use chrono::{DateTime, FixedOffset};
use serde::Serialize;

use crate::model::DayRecord;

/// Icon shown for a day, derived from its peak weather code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum IconCategory {
    Clear,
    Snow,
    Cloud,
    Rain,
    PrecipitationHeavy,
}

impl IconCategory {
    /// Thresholds are checked highest first; anything below 1000 is clear.
    pub fn from_code(code: i64) -> Self {
        match code {
            c if c >= 4000 => Self::PrecipitationHeavy,
            c if c >= 3000 => Self::Rain,
            c if c >= 2000 => Self::Cloud,
            c if c >= 1000 => Self::Snow,
            _ => Self::Clear,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Clear => "clear",
            Self::Snow => "snow",
            Self::Cloud => "cloud",
            Self::Rain => "rain",
            Self::PrecipitationHeavy => "precipitation-heavy",
        }
    }
}

/// Color band for the daily maximum temperature.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TempBand {
    Cold,
    Cool,
    Mild,
    Warm,
    Hot,
}

impl TempBand {
    pub fn from_temperature(temp: f64) -> Self {
        if temp >= 30.0 {
            Self::Hot
        } else if temp >= 20.0 {
            Self::Warm
        } else if temp >= 10.0 {
            Self::Mild
        } else if temp >= 0.0 {
            Self::Cool
        } else {
            Self::Cold
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Cold => "cold",
            Self::Cool => "cool",
            Self::Mild => "mild",
            Self::Warm => "warm",
            Self::Hot => "hot",
        }
    }
}

/// Heading of a card: "Today", or weekday over the full date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DateLabel {
    pub primary: String,
    pub secondary: Option<String>,
}

impl DateLabel {
    pub const TODAY: &'static str = "Today";

    pub fn for_day(time: &DateTime<FixedOffset>, index: usize) -> Self {
        if index == 0 {
            return Self {
                primary: Self::TODAY.to_string(),
                secondary: None,
            };
        }

        let long = format_long_date(time);
        match long.split_once(',') {
            Some((weekday, rest)) => Self {
                primary: weekday.to_string(),
                secondary: Some(rest.trim().to_string()),
            },
            None => Self {
                primary: long,
                secondary: None,
            },
        }
    }
}

/// Display-ready representation of one day.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CardView {
    /// Identity key, unique within one forecast.
    pub key: String,
    pub label: DateLabel,
    pub icon: IconCategory,
    pub temperature_band: TempBand,
    pub temperature_max: i64,
    pub temperature_min: i64,
    /// Width of the temperature bar, in percent.
    pub bar_fill_percent: f64,
    pub humidity_pct: i64,
    pub wind_speed_mps: i64,
    pub visibility_km: i64,
    pub uv_index: i64,
    pub precipitation_probability_pct: i64,
    /// Present only when some rain is expected, e.g. `"0.3 mm"`.
    pub rain_accumulation: Option<String>,
}

/// Resolve every display field for the day at position `index`.
pub fn present(day: &DayRecord, index: usize) -> CardView {
    let v = &day.values;

    CardView {
        key: day.time.to_rfc3339(),
        label: DateLabel::for_day(&day.time, index),
        icon: IconCategory::from_code(v.weather_code_max),
        temperature_band: TempBand::from_temperature(v.temperature_max),
        temperature_max: round_half_up(v.temperature_max),
        temperature_min: round_half_up(v.temperature_min),
        bar_fill_percent: bar_fill(v.temperature_max),
        humidity_pct: round_half_up(v.humidity_avg),
        wind_speed_mps: round_half_up(v.wind_speed_avg),
        visibility_km: round_half_up(v.visibility_avg),
        uv_index: round_half_up(v.uv_index_max),
        precipitation_probability_pct: round_half_up(v.precipitation_probability_avg),
        rain_accumulation: rain_accumulation(v.rain_accumulation_sum),
    }
}

/// Present a whole timeline, preserving order.
pub fn present_all(days: &[DayRecord]) -> Vec<CardView> {
    days.iter().enumerate().map(|(i, day)| present(day, i)).collect()
}

/// Heuristic bar width; saturates at 100 for anything at or above 40 degrees.
pub fn bar_fill(temperature_max: f64) -> f64 {
    ((temperature_max + 10.0) * 2.0).min(100.0)
}

pub fn rain_accumulation(sum: f64) -> Option<String> {
    (sum > 0.0).then(|| format!("{sum:.1} mm"))
}

/// Nearest integer, with exact halves going toward positive infinity.
pub fn round_half_up(value: f64) -> i64 {
    let floor = value.floor();
    let rounded = if value - floor >= 0.5 {
        floor + 1.0
    } else {
        floor
    };
    rounded as i64
}

/// en-US long form, e.g. "Monday, January 15, 2024".
fn format_long_date(time: &DateTime<FixedOffset>) -> String {
    time.format("%A, %B %-d, %Y").to_string()
}
