//! Core library for the `forecast` dashboard.
//!
//! This crate defines:
//! - Configuration (service endpoint, default location)
//! - The forecast fetcher and the data model it returns
//! - The query controller that drives the fetch lifecycle
//! - Card presentation and the dashboard view built from controller state
//!
//! It is used by `forecast-cli`, but can also back any other display layer.

pub mod config;
pub mod controller;
pub mod error;
pub mod fetcher;
pub mod model;
pub mod presenter;
pub mod view;

pub use config::Config;
pub use controller::{Event, FetchTicket, QueryController, Status};
pub use error::{FetchError, FetchErrorKind, LocationError};
pub use fetcher::{ForecastSource, HttpForecastFetcher};
pub use model::{DayRecord, DayValues, ForecastLocation, ForecastResponse};
pub use presenter::{CardView, DateLabel, IconCategory, TempBand, present};
pub use view::{BodyView, DashboardView};
