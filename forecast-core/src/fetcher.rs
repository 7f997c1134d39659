use std::fmt::Debug;

use async_trait::async_trait;
use reqwest::Client;

use crate::{Config, error::FetchError, model::ForecastResponse};

/// Granularity requested from the weather service.
pub const DAILY_TIMESTEP: &str = "1d";

/// Anything that can produce a daily forecast for a free-text location.
#[async_trait]
pub trait ForecastSource: Send + Sync + Debug {
    async fn fetch(&self, location: &str) -> Result<ForecastResponse, FetchError>;
}

/// Fetches forecasts from `GET {endpoint}/weather`.
///
/// One request per call, no retries, and no timeout beyond the transport defaults.
#[derive(Debug, Clone)]
pub struct HttpForecastFetcher {
    endpoint: String,
    http: Client,
}

impl HttpForecastFetcher {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self::with_client(endpoint, Client::new())
    }

    pub fn with_client(endpoint: impl Into<String>, http: Client) -> Self {
        let endpoint = endpoint.into().trim_end_matches('/').to_string();
        Self { endpoint, http }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.endpoint())
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    fn weather_url(&self) -> String {
        format!("{}/weather", self.endpoint)
    }
}

#[async_trait]
impl ForecastSource for HttpForecastFetcher {
    async fn fetch(&self, location: &str) -> Result<ForecastResponse, FetchError> {
        tracing::debug!(%location, endpoint = %self.endpoint, "requesting daily forecast");

        let res = self
            .http
            .get(self.weather_url())
            .query(&[("location", location), ("timestep", DAILY_TIMESTEP)])
            .send()
            .await
            .map_err(FetchError::NetworkFailure)?;

        let status = res.status();
        let body = res.text().await.map_err(FetchError::NetworkFailure)?;

        if !status.is_success() {
            tracing::warn!(
                %status,
                body = %truncate_body(&body),
                "weather service returned an error"
            );
            return Err(FetchError::HttpStatus { status });
        }

        let parsed = ForecastResponse::from_json(&body).inspect_err(|err| {
            tracing::warn!(
                error = %err,
                body = %truncate_body(&body),
                "unexpected forecast payload"
            );
        })?;

        tracing::debug!(
            location = %parsed.location.name,
            days = parsed.days().len(),
            "forecast received"
        );

        Ok(parsed)
    }
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    match body.char_indices().nth(MAX) {
        Some((idx, _)) => format!("{}...", &body[..idx]),
        None => body.to_string(),
    }
}
