use reqwest::StatusCode;
use thiserror::Error;

use crate::model::SchemaError;

/// Why a forecast could not be obtained.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("HTTP error! status: {}", .status.as_u16())]
    HttpStatus { status: StatusCode },

    #[error("invalid forecast response: {0}")]
    ParseFailure(#[from] SchemaError),

    #[error("network error: {0}")]
    NetworkFailure(#[source] reqwest::Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchErrorKind {
    HttpStatus,
    ParseFailure,
    NetworkFailure,
}

impl FetchError {
    pub fn kind(&self) -> FetchErrorKind {
        match self {
            Self::HttpStatus { .. } => FetchErrorKind::HttpStatus,
            Self::ParseFailure(_) => FetchErrorKind::ParseFailure,
            Self::NetworkFailure(_) => FetchErrorKind::NetworkFailure,
        }
    }

    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Self::HttpStatus { status } => Some(*status),
            _ => None,
        }
    }

    /// The single line shown to the user in place of the results.
    pub fn user_message(&self) -> String {
        format!("Failed to fetch weather data: {self}")
    }
}

/// Rejected search input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum LocationError {
    #[error("location is empty")]
    EmptyInput,
}
