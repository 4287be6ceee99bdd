//! `weatherlog` - personal weather logging
//!
//! This library records daily temperature readings in a local JSON log,
//! fetches forecasts from the MET Norway `locationforecast` API, and renders
//! simple reports over them.

pub mod aggregate;
pub mod app;
pub mod config;
pub mod error;
pub mod models;
pub mod report;
pub mod shell;
pub mod store;
pub mod weather;

// Re-export core types for public API
pub use app::WeatherLogApp;
pub use config::WeatherLogConfig;
pub use error::WeatherLogError;
pub use models::{ForecastDataPoint, ForecastDocument, Location, WeatherEntry};
pub use report::{DayReport, ForecastSummary, ReportGenerator, ReportOutcome, ReportPeriod};
pub use store::{InMemoryStore, JsonFileStore, LogStore};
pub use weather::{ForecastProvider, MetNoClient};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Core result type used throughout the library
pub type Result<T> = std::result::Result<T, WeatherLogError>;
