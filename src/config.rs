//! Configuration management for the weather log application
//!
//! Handles loading configuration from files, environment variables,
//! and provides validation for all configuration settings.

use crate::WeatherLogError;
use crate::models::Location;
use anyhow::{Context, Result};
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Root configuration structure for the weather log application
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WeatherLogConfig {
    /// Log file configuration
    #[serde(default)]
    pub storage: StorageConfig,
    /// Forecast API configuration
    #[serde(default)]
    pub weather: WeatherConfig,
    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Where manually logged readings are kept
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Path of the JSON weather log
    #[serde(default = "default_log_file")]
    pub log_file: PathBuf,
}

/// Forecast API configuration settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeatherConfig {
    /// Base URL of the `locationforecast/2.0` API
    #[serde(default = "default_weather_base_url")]
    pub base_url: String,
    /// User agent sent with every request; the provider requires one
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
    /// Request timeout in seconds
    #[serde(default = "default_weather_timeout")]
    pub timeout_seconds: u32,
    /// Latitude of the forecast point
    #[serde(default = "default_latitude")]
    pub latitude: f64,
    /// Longitude of the forecast point
    #[serde(default = "default_longitude")]
    pub longitude: f64,
    /// Altitude of the forecast point in metres
    #[serde(default = "default_altitude")]
    pub altitude: Option<i32>,
}

/// Logging configuration settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (error, warn, info, debug, trace)
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Log format (pretty or compact)
    #[serde(default = "default_log_format")]
    pub format: String,
}

// Default value functions
fn default_log_file() -> PathBuf {
    PathBuf::from("Weatherlog.json")
}

fn default_weather_base_url() -> String {
    "https://api.met.no/weatherapi/locationforecast/2.0".to_string()
}

fn default_user_agent() -> String {
    format!("weatherlog/{}", crate::VERSION)
}

fn default_weather_timeout() -> u32 {
    30
}

fn default_latitude() -> f64 {
    59.93
}

fn default_longitude() -> f64 {
    10.72
}

fn default_altitude() -> Option<i32> {
    Some(90)
}

fn default_log_level() -> String {
    "warn".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            log_file: default_log_file(),
        }
    }
}

impl Default for WeatherConfig {
    fn default() -> Self {
        Self {
            base_url: default_weather_base_url(),
            user_agent: default_user_agent(),
            timeout_seconds: default_weather_timeout(),
            latitude: default_latitude(),
            longitude: default_longitude(),
            altitude: default_altitude(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

impl WeatherConfig {
    /// The configured forecast point
    #[must_use]
    pub fn location(&self) -> Location {
        Location {
            latitude: self.latitude,
            longitude: self.longitude,
            altitude: self.altitude,
        }
    }
}

impl WeatherLogConfig {
    /// Load configuration from the default file and environment variables
    pub fn load() -> Result<Self> {
        Self::load_from_path(None)
    }

    /// Load configuration from specified path.
    ///
    /// An explicit path must exist; the default location is optional.
    /// `WEATHERLOG_` environment variables override file values, with `__`
    /// separating sections (`WEATHERLOG_STORAGE__LOG_FILE`).
    pub fn load_from_path(config_path: Option<PathBuf>) -> Result<Self> {
        let mut builder = Config::builder();

        match config_path {
            Some(path) => {
                builder = builder.add_source(
                    File::from(path)
                        .required(true)
                        .format(config::FileFormat::Toml),
                );
            }
            None => {
                if let Some(default_path) = Self::get_config_path() {
                    builder = builder.add_source(
                        File::from(default_path)
                            .required(false)
                            .format(config::FileFormat::Toml),
                    );
                }
            }
        }

        builder = builder.add_source(
            Environment::with_prefix("WEATHERLOG")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let settings = builder
            .build()
            .with_context(|| "Failed to build configuration")?;

        let mut config: WeatherLogConfig = settings
            .try_deserialize()
            .with_context(|| "Failed to deserialize configuration")?;

        config.apply_defaults();
        config.validate()?;

        Ok(config)
    }

    /// Get the default configuration file path
    #[must_use]
    pub fn get_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("weatherlog").join("config.toml"))
    }

    /// Apply default values to empty configuration fields
    pub fn apply_defaults(&mut self) {
        if self.storage.log_file.as_os_str().is_empty() {
            self.storage.log_file = default_log_file();
        }
        if self.weather.base_url.is_empty() {
            self.weather.base_url = default_weather_base_url();
        }
        if self.weather.user_agent.trim().is_empty() {
            self.weather.user_agent = default_user_agent();
        }
        if self.weather.timeout_seconds == 0 {
            self.weather.timeout_seconds = default_weather_timeout();
        }
        if self.logging.level.is_empty() {
            self.logging.level = default_log_level();
        }
        if self.logging.format.is_empty() {
            self.logging.format = default_log_format();
        }
    }

    /// Validate all configuration settings
    pub fn validate(&self) -> Result<()> {
        self.validate_numeric_ranges()?;
        self.validate_string_values()?;
        Ok(())
    }

    fn validate_numeric_ranges(&self) -> Result<()> {
        if self.weather.timeout_seconds > 300 {
            return Err(
                WeatherLogError::config("Weather API timeout cannot exceed 300 seconds").into(),
            );
        }

        if !(-90.0..=90.0).contains(&self.weather.latitude) {
            return Err(WeatherLogError::config(format!(
                "Latitude must be between -90 and 90, got: {}",
                self.weather.latitude
            ))
            .into());
        }

        if !(-180.0..=180.0).contains(&self.weather.longitude) {
            return Err(WeatherLogError::config(format!(
                "Longitude must be between -180 and 180, got: {}",
                self.weather.longitude
            ))
            .into());
        }

        Ok(())
    }

    fn validate_string_values(&self) -> Result<()> {
        let valid_log_levels = ["error", "warn", "info", "debug", "trace"];
        if !valid_log_levels.contains(&self.logging.level.as_str()) {
            return Err(WeatherLogError::config(format!(
                "Invalid log level '{}'. Must be one of: {}",
                self.logging.level,
                valid_log_levels.join(", ")
            ))
            .into());
        }

        let valid_log_formats = ["pretty", "compact"];
        if !valid_log_formats.contains(&self.logging.format.as_str()) {
            return Err(WeatherLogError::config(format!(
                "Invalid log format '{}'. Must be one of: {}",
                self.logging.format,
                valid_log_formats.join(", ")
            ))
            .into());
        }

        if !self.weather.base_url.starts_with("http://")
            && !self.weather.base_url.starts_with("https://")
        {
            return Err(WeatherLogError::config(
                "Weather API base URL must be a valid HTTP or HTTPS URL",
            )
            .into());
        }

        Ok(())
    }
}
