//! Data models for the weather log application
//!
//! This module contains the core domain models organized by concern:
//! - Entry: manually logged daily temperature readings
//! - Forecast: provider forecast documents and their readings
//! - Location: the point forecasts are requested for

pub mod entry;
pub mod forecast;
pub mod location;

// Re-export all public types for convenient access
pub use entry::WeatherEntry;
pub use forecast::{ForecastDataPoint, ForecastDocument};
pub use location::Location;
