//! What the display layer draws for a given controller state.

use chrono::{DateTime, TimeZone};
use serde::Serialize;

use crate::{
    controller::{QueryController, Status},
    model::ForecastResponse,
    presenter::{CardView, present_all},
};

pub const TITLE: &str = "Weather Dashboard";
pub const SUBTITLE: &str = "Get detailed weather forecasts for any location";
pub const PLACEHOLDER: &str = "Enter location (e.g., New York, London)";
pub const DATA_SOURCE: &str = "Tomorrow.io API";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardView {
    pub title: &'static str,
    pub subtitle: &'static str,
    pub search: SearchView,
    pub body: BodyView,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchView {
    pub text: String,
    pub placeholder: &'static str,
    pub button_label: &'static str,
    pub button_enabled: bool,
}

/// The one region shown below the search bar.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum BodyView {
    Empty,
    Loading,
    Error { message: String },
    Results(ResultsView),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResultsView {
    pub location_name: String,
    /// `"lat, lon"` with four decimals each.
    pub coordinates: String,
    pub cards: Vec<CardView>,
    pub data_source: &'static str,
    pub last_updated: String,
}

impl ResultsView {
    pub fn new<Tz>(data: &ForecastResponse, now: &DateTime<Tz>) -> Self
    where
        Tz: TimeZone,
        Tz::Offset: std::fmt::Display,
    {
        Self {
            location_name: data.location.name.clone(),
            coordinates: format!("{:.4}, {:.4}", data.location.lat, data.location.lon),
            cards: present_all(data.days()),
            data_source: DATA_SOURCE,
            last_updated: format_timestamp(now),
        }
    }
}

impl DashboardView {
    /// Build the view; `now` only feeds the "last updated" line.
    pub fn render<Tz>(controller: &QueryController, now: &DateTime<Tz>) -> Self
    where
        Tz: TimeZone,
        Tz::Offset: std::fmt::Display,
    {
        let loading = controller.is_loading();

        let body = match controller.status() {
            Status::Idle => BodyView::Empty,
            Status::Loading => BodyView::Loading,
            Status::Error(message) => BodyView::Error {
                message: message.clone(),
            },
            Status::Success(data) => BodyView::Results(ResultsView::new(data, now)),
        };

        Self {
            title: TITLE,
            subtitle: SUBTITLE,
            search: SearchView {
                text: controller.location().to_string(),
                placeholder: PLACEHOLDER,
                button_label: if loading { "Searching..." } else { "Search" },
                button_enabled: !loading,
            },
            body,
        }
    }

    pub fn cards(&self) -> &[CardView] {
        match &self.body {
            BodyView::Results(results) => &results.cards,
            _ => &[],
        }
    }
}

/// en-US style local timestamp, e.g. "1/15/2024, 3:45:12 PM".
fn format_timestamp<Tz>(now: &DateTime<Tz>) -> String
where
    Tz: TimeZone,
    Tz::Offset: std::fmt::Display,
{
    now.format("%-m/%-d/%Y, %-I:%M:%S %p").to_string()
}
