//! Manually logged temperature readings

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

/// One `{date, temperature}` record in the weather log.
///
/// Field names are capitalised on disk so existing `Weatherlog.json` files
/// keep loading.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct WeatherEntry {
    /// Calendar day the reading was logged on, stored as `YYYY-MM-DD`
    #[serde(rename = "Date")]
    pub date: NaiveDate,
    /// Temperature in Celsius
    #[serde(rename = "Temperature")]
    pub temperature: f64,
}

impl WeatherEntry {
    #[must_use]
    pub fn new(date: NaiveDate, temperature: f64) -> Self {
        Self { date, temperature }
    }
}

impl fmt::Display for WeatherEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Date: {}, Temperature: {} °C",
            self.date.format("%Y-%m-%d"),
            self.temperature
        )
    }
}
