//! Error types and handling for the weather log application

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for the weather log application
#[derive(Error, Debug)]
pub enum WeatherLogError {
    /// Configuration-related errors
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// User input that could not be interpreted (temperature, date, range)
    #[error("Invalid input: {message}")]
    InvalidInput { message: String },

    /// The log file exists but does not hold a list of entries
    #[error("Malformed weather log '{}': {source}", .path.display())]
    MalformedLog {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// Transport, status or decoding failure talking to the forecast provider
    #[error("Fetch error: {message}")]
    Fetch { message: String },

    /// The provider document lacks a field the model needs
    #[error("Missing field in forecast response: {field}")]
    MissingField { field: String },

    /// I/O operation errors
    #[error("I/O error: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },
}

impl WeatherLogError {
    /// Create a new configuration error
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a new invalid input error
    pub fn invalid_input<S: Into<String>>(message: S) -> Self {
        Self::InvalidInput {
            message: message.into(),
        }
    }

    /// Create a new fetch error
    pub fn fetch<S: Into<String>>(message: S) -> Self {
        Self::Fetch {
            message: message.into(),
        }
    }

    /// Create a new missing field error
    pub fn missing_field<S: Into<String>>(field: S) -> Self {
        Self::MissingField {
            field: field.into(),
        }
    }

    /// Whether the failure came from the forecast provider side
    #[must_use]
    pub fn is_fetch_failure(&self) -> bool {
        matches!(self, Self::Fetch { .. } | Self::MissingField { .. })
    }

    /// Get a user-friendly error message
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            WeatherLogError::Config { message } => {
                format!("Configuration error: {message}. Please check your config file.")
            }
            WeatherLogError::InvalidInput { message } => message.clone(),
            WeatherLogError::MalformedLog { path, source } => {
                format!(
                    "The weather log at {} could not be read ({source}). The file was left unchanged.",
                    path.display()
                )
            }
            WeatherLogError::Fetch { message } => {
                format!("Failed to fetch weather data from the API: {message}")
            }
            WeatherLogError::MissingField { field } => {
                format!("The weather service returned an incomplete response (missing {field}).")
            }
            WeatherLogError::Io { source } => {
                format!("File operation failed: {source}. Please check file permissions.")
            }
        }
    }
}
