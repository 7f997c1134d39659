//! Query lifecycle: which location is being looked at and where its fetch stands.
//!
//! The controller never performs I/O itself. Starting a fetch hands back a
//! [`FetchTicket`]; the caller runs it against a [`ForecastSource`] and feeds the
//! outcome back as an [`Event`].
//!
//! Every ticket carries a generation number and only the newest generation may
//! complete. A slow response for an older query is dropped instead of replacing
//! the results of a newer one, so the display always matches the most recently
//! *requested* location rather than whichever response arrived last.

use std::sync::Arc;

use crate::{error::LocationError, fetcher::ForecastSource, model::ForecastResponse};

#[derive(Debug, Clone, PartialEq, Default)]
pub enum Status {
    #[default]
    Idle,
    Loading,
    Success(Arc<ForecastResponse>),
    Error(String),
}

/// Everything that can happen to the controller.
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    /// First activation of the surface.
    Initialize,
    /// The user pressed search with this text.
    Submit(String),
    FetchSucceeded {
        generation: u64,
        data: ForecastResponse,
    },
    FetchFailed {
        generation: u64,
        message: String,
    },
}

/// A fetch the controller wants performed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchTicket {
    pub generation: u64,
    pub location: String,
}

impl FetchTicket {
    /// Run the fetch and turn its outcome into the completion event.
    pub async fn execute(self, source: &dyn ForecastSource) -> Event {
        match source.fetch(&self.location).await {
            Ok(data) => Event::FetchSucceeded {
                generation: self.generation,
                data,
            },
            Err(err) => {
                tracing::warn!(location = %self.location, error = %err, "forecast fetch failed");
                Event::FetchFailed {
                    generation: self.generation,
                    message: err.user_message(),
                }
            }
        }
    }
}

/// Accept a search text if it has something besides whitespace.
pub fn validate_location(input: &str) -> Result<&str, LocationError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        Err(LocationError::EmptyInput)
    } else {
        Ok(trimmed)
    }
}

#[derive(Debug, Clone)]
pub struct QueryController {
    location: String,
    status: Status,
    /// Last good forecast, held while a newer one loads.
    retained: Option<Arc<ForecastResponse>>,
    initialized: bool,
    generation: u64,
}

impl QueryController {
    pub fn new(default_location: impl Into<String>) -> Self {
        Self {
            location: default_location.into(),
            status: Status::Idle,
            retained: None,
            initialized: false,
            generation: 0,
        }
    }

    pub fn location(&self) -> &str {
        &self.location
    }

    /// Edit the search text without submitting it.
    pub fn set_location(&mut self, text: impl Into<String>) {
        self.location = text.into();
    }

    pub fn status(&self) -> &Status {
        &self.status
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.status, Status::Loading)
    }

    /// Forecast currently on display, if any.
    pub fn data(&self) -> Option<&ForecastResponse> {
        match &self.status {
            Status::Success(data) => Some(data),
            _ => None,
        }
    }

    /// Forecast from the last success, kept until the in-flight fetch settles.
    pub fn retained(&self) -> Option<&ForecastResponse> {
        self.retained.as_deref()
    }

    pub fn error(&self) -> Option<&str> {
        match &self.status {
            Status::Error(message) => Some(message),
            _ => None,
        }
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Single entry point for every state change.
    pub fn dispatch(&mut self, event: Event) -> Option<FetchTicket> {
        match event {
            Event::Initialize => self.initialize(),
            Event::Submit(text) => self.submit(&text),
            Event::FetchSucceeded { generation, data } => {
                self.on_fetch_success(generation, data);
                None
            }
            Event::FetchFailed { generation, message } => {
                self.on_fetch_failure(generation, message);
                None
            }
        }
    }

    /// Fetch the pre-filled location. Only the first call does anything.
    pub fn initialize(&mut self) -> Option<FetchTicket> {
        if self.initialized {
            return None;
        }
        self.initialized = true;
        Some(self.on_fetch_start())
    }

    /// Start a fetch for `text`, unless it is blank.
    pub fn submit(&mut self, text: &str) -> Option<FetchTicket> {
        if let Err(err) = validate_location(text) {
            tracing::debug!(error = %err, "ignoring search");
            return None;
        }
        self.location = text.to_string();
        Some(self.on_fetch_start())
    }

    /// Enter Loading for the current location and hand out the ticket for it.
    ///
    /// Any previous error is cleared. A previous success is retained, not shown.
    pub fn on_fetch_start(&mut self) -> FetchTicket {
        self.generation += 1;

        let previous = std::mem::replace(&mut self.status, Status::Loading);
        if let Status::Success(data) = previous {
            self.retained = Some(data);
        }

        tracing::debug!(location = %self.location, generation = self.generation, "fetch started");
        FetchTicket {
            generation: self.generation,
            location: self.location.clone(),
        }
    }

    /// Returns false when the completion belongs to a superseded fetch.
    pub fn on_fetch_success(&mut self, generation: u64, data: ForecastResponse) -> bool {
        if !self.accepts(generation) {
            return false;
        }

        self.retained = None;
        self.status = Status::Success(Arc::new(data));
        true
    }

    /// Returns false when the completion belongs to a superseded fetch.
    pub fn on_fetch_failure(&mut self, generation: u64, message: impl Into<String>) -> bool {
        if !self.accepts(generation) {
            return false;
        }

        self.retained = None;
        self.status = Status::Error(message.into());
        true
    }

    /// Dispatch `event` and, if it starts a fetch, run that fetch to completion.
    pub async fn handle(&mut self, source: &dyn ForecastSource, event: Event) {
        if let Some(ticket) = self.dispatch(event) {
            let outcome = ticket.execute(source).await;
            self.dispatch(outcome);
        }
    }

    fn accepts(&self, generation: u64) -> bool {
        let current = generation == self.generation && self.is_loading();
        if !current {
            tracing::debug!(
                generation,
                latest = self.generation,
                "discarding stale fetch result"
            );
        }
        current
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{DayRecord, DayValues, ForecastLocation, Timelines, parse_time};

    fn forecast(name: &str) -> ForecastResponse {
        ForecastResponse {
            location: ForecastLocation {
                name: name.to_string(),
                lat: 1.0,
                lon: 2.0,
            },
            timelines: Timelines {
                daily: vec![DayRecord {
                    time: parse_time("2024-01-15").expect("valid"),
                    values: DayValues {
                        temperature_max: 20.0,
                        temperature_min: 10.0,
                        humidity_avg: 50.0,
                        wind_speed_avg: 2.0,
                        visibility_avg: 10.0,
                        uv_index_max: 3.0,
                        precipitation_probability_avg: 0.0,
                        rain_accumulation_sum: 0.0,
                        weather_code_max: 1000,
                    },
                }],
            },
        }
    }

    #[test]
    fn starts_idle_with_default_location() {
        let ctl = QueryController::new("Ayodhya");

        assert_eq!(ctl.status(), &Status::Idle);
        assert_eq!(ctl.location(), "Ayodhya");
        assert!(ctl.data().is_none());
    }

    #[test]
    fn initialize_fetches_once() {
        let mut ctl = QueryController::new("Ayodhya");

        let ticket = ctl.dispatch(Event::Initialize).expect("first activation fetches");
        assert_eq!(
            ticket,
            FetchTicket {
                generation: 1,
                location: "Ayodhya".into(),
            }
        );
        assert!(ctl.is_loading());

        ctl.on_fetch_success(1, forecast("Ayodhya"));
        assert!(ctl.dispatch(Event::Initialize).is_none());
        assert_eq!(ctl.generation(), 1);
    }

    #[test]
    fn blank_submit_is_ignored() {
        let mut ctl = QueryController::new("Tokyo");
        let ticket = ctl.initialize().expect("ticket");
        ctl.on_fetch_success(ticket.generation, forecast("Tokyo"));

        assert!(ctl.dispatch(Event::Submit("   \t".into())).is_none());
        assert!(ctl.dispatch(Event::Submit(String::new())).is_none());

        assert_eq!(ctl.location(), "Tokyo");
        assert_eq!(ctl.data().map(|d| d.location.name.as_str()), Some("Tokyo"));
        assert_eq!(ctl.generation(), 1);
    }

    #[test]
    fn submit_replaces_previous_success() {
        let mut ctl = QueryController::new("Tokyo");
        let first = ctl.initialize().expect("ticket");
        ctl.on_fetch_success(first.generation, forecast("Tokyo"));

        let second = ctl.dispatch(Event::Submit("Paris".into())).expect("ticket");
        assert_eq!(second.location, "Paris");
        assert!(ctl.is_loading());
        assert!(ctl.data().is_none());
        assert_eq!(ctl.retained().map(|d| d.location.name.as_str()), Some("Tokyo"));

        ctl.dispatch(Event::FetchSucceeded {
            generation: second.generation,
            data: forecast("Paris"),
        });
        assert_eq!(ctl.data().map(|d| d.location.name.as_str()), Some("Paris"));
        assert!(ctl.retained().is_none());
    }

    #[test]
    fn failure_drops_previous_results() {
        let mut ctl = QueryController::new("Tokyo");
        let first = ctl.initialize().expect("ticket");
        ctl.on_fetch_success(first.generation, forecast("Tokyo"));

        let second = ctl.submit("Atlantis").expect("ticket");
        ctl.dispatch(Event::FetchFailed {
            generation: second.generation,
            message: "Failed to fetch weather data: HTTP error! status: 404".into(),
        });

        assert!(!ctl.is_loading());
        assert!(ctl.data().is_none());
        assert!(ctl.retained().is_none());
        assert_eq!(ctl.error(), Some("Failed to fetch weather data: HTTP error! status: 404"));
    }

    #[test]
    fn new_fetch_clears_error() {
        let mut ctl = QueryController::new("Tokyo");
        let first = ctl.initialize().expect("ticket");
        ctl.on_fetch_failure(first.generation, "boom");
        assert_eq!(ctl.error(), Some("boom"));

        ctl.submit("Tokyo").expect("ticket");
        assert!(ctl.error().is_none());
        assert!(ctl.is_loading());
    }

    #[test]
    fn stale_completion_is_discarded() {
        let mut ctl = QueryController::new("Tokyo");
        let tokyo = ctl.initialize().expect("ticket");
        let paris = ctl.submit("Paris").expect("ticket");

        assert!(!ctl.on_fetch_success(tokyo.generation, forecast("Tokyo")));
        assert!(ctl.is_loading());

        assert!(ctl.on_fetch_success(paris.generation, forecast("Paris")));
        assert!(!ctl.on_fetch_failure(tokyo.generation, "late failure"));
        assert_eq!(ctl.data().map(|d| d.location.name.as_str()), Some("Paris"));
    }

    #[test]
    fn duplicate_completion_is_discarded() {
        let mut ctl = QueryController::new("Tokyo");
        let ticket = ctl.initialize().expect("ticket");

        assert!(ctl.on_fetch_success(ticket.generation, forecast("Tokyo")));
        assert!(!ctl.on_fetch_failure(ticket.generation, "again"));
        assert!(ctl.data().is_some());
    }

    #[test]
    fn set_location_does_not_fetch() {
        let mut ctl = QueryController::new("Tokyo");
        ctl.set_location("Par");

        assert_eq!(ctl.location(), "Par");
        assert_eq!(ctl.status(), &Status::Idle);
        assert_eq!(ctl.generation(), 0);
    }

    #[test]
    fn validate_location_trims() {
        assert_eq!(validate_location("  Oslo "), Ok("Oslo"));
        assert_eq!(validate_location(" \n "), Err(LocationError::EmptyInput));
    }
}
