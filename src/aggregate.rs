//! Temperature aggregates over forecast readings
//!
//! All functions are total: an empty series yields `0.0`. That makes a day
//! without data indistinguishable from a day at exactly 0 °C; callers that
//! care should check [`TemperatureSummary::count`].

use crate::models::ForecastDataPoint;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Arithmetic mean of the air temperature, `0.0` for an empty series
#[must_use]
pub fn average(points: &[ForecastDataPoint]) -> f64 {
    if points.is_empty() {
        return 0.0;
    }
    let sum: f64 = points.iter().map(|p| p.air_temperature).sum();
    sum / points.len() as f64
}

/// Highest air temperature, `0.0` for an empty series
#[must_use]
pub fn max(points: &[ForecastDataPoint]) -> f64 {
    points
        .iter()
        .map(|p| p.air_temperature)
        .reduce(f64::max)
        .unwrap_or(0.0)
}

/// Lowest air temperature, `0.0` for an empty series
#[must_use]
pub fn min(points: &[ForecastDataPoint]) -> f64 {
    points
        .iter()
        .map(|p| p.air_temperature)
        .reduce(f64::min)
        .unwrap_or(0.0)
}

/// All three aggregates plus the number of readings they cover
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TemperatureSummary {
    pub count: usize,
    pub average: f64,
    pub min: f64,
    pub max: f64,
}

/// Compute every aggregate in one go
#[must_use]
pub fn summarize(points: &[ForecastDataPoint]) -> TemperatureSummary {
    TemperatureSummary {
        count: points.len(),
        average: average(points),
        min: min(points),
        max: max(points),
    }
}

impl fmt::Display for TemperatureSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Readings: {}", self.count)?;
        writeln!(f, "Average temperature: {:.1} °C", self.average)?;
        writeln!(f, "Minimum temperature: {:.1} °C", self.min)?;
        write!(f, "Maximum temperature: {:.1} °C", self.max)
    }
}
