//! Forecast document returned by the MET Norway `locationforecast` API
//!
//! The provider schema is described by the `raw` structs below, where every
//! field is optional. [`ForecastDocument`] is the validated model the rest of
//! the crate works with; converting into it reports absent fields by their
//! path in the response.

use crate::error::WeatherLogError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single instantaneous reading
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct ForecastDataPoint {
    /// Instant the reading is valid from
    pub timestamp: DateTime<Utc>,
    /// Air temperature in Celsius
    pub air_temperature: f64,
}

impl ForecastDataPoint {
    #[must_use]
    pub fn new(timestamp: DateTime<Utc>, air_temperature: f64) -> Self {
        Self {
            timestamp,
            air_temperature,
        }
    }
}

/// Time series of readings in the order the provider delivered them
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
pub struct ForecastDocument {
    pub points: Vec<ForecastDataPoint>,
}

impl ForecastDocument {
    #[must_use]
    pub fn new(points: Vec<ForecastDataPoint>) -> Self {
        Self { points }
    }

    /// Parse a provider response body
    pub fn from_json(body: &str) -> crate::Result<Self> {
        let response: raw::ForecastResponse = serde_json::from_str(body)
            .map_err(|e| WeatherLogError::fetch(format!("Invalid forecast document: {e}")))?;
        Self::try_from(response)
    }

    #[must_use]
    pub fn first(&self) -> Option<&ForecastDataPoint> {
        self.points.first()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Convert keeping the complete steps at the head of the series
    ///
    /// Only the first step must be complete; conversion stops at the first
    /// incomplete step after it. An empty series is still valid.
    pub fn from_leading_steps(response: raw::ForecastResponse) -> crate::Result<Self> {
        let mut points = Vec::new();
        for (i, step) in timeseries(response)?.into_iter().enumerate() {
            match data_point(i, step) {
                Ok(point) => points.push(point),
                Err(e) if i == 0 => return Err(e),
                Err(_) => break,
            }
        }
        Ok(Self { points })
    }
}

impl TryFrom<raw::ForecastResponse> for ForecastDocument {
    type Error = WeatherLogError;

    fn try_from(response: raw::ForecastResponse) -> Result<Self, Self::Error> {
        let points = timeseries(response)?
            .into_iter()
            .enumerate()
            .map(|(i, step)| data_point(i, step))
            .collect::<Result<Vec<_>, WeatherLogError>>()?;

        Ok(Self { points })
    }
}

fn timeseries(response: raw::ForecastResponse) -> crate::Result<Vec<raw::TimeStep>> {
    response
        .properties
        .ok_or_else(|| WeatherLogError::missing_field("properties"))?
        .timeseries
        .ok_or_else(|| WeatherLogError::missing_field("properties.timeseries"))
}

fn data_point(i: usize, step: raw::TimeStep) -> crate::Result<ForecastDataPoint> {
    let timestamp = step.time.ok_or_else(|| {
        WeatherLogError::missing_field(format!("properties.timeseries[{i}].time"))
    })?;
    let air_temperature = step
        .data
        .and_then(|data| data.instant)
        .and_then(|instant| instant.details)
        .and_then(|details| details.air_temperature)
        .ok_or_else(|| {
            WeatherLogError::missing_field(format!(
                "properties.timeseries[{i}].data.instant.details.air_temperature"
            ))
        })?;
    Ok(ForecastDataPoint::new(timestamp, air_temperature))
}

/// `locationforecast/2.0` response structures
pub mod raw {
    use chrono::{DateTime, Utc};
    use serde::Deserialize;

    /// GeoJSON feature wrapping the forecast
    #[derive(Debug, Deserialize)]
    pub struct ForecastResponse {
        pub properties: Option<ForecastProperties>,
    }

    #[derive(Debug, Deserialize)]
    pub struct ForecastProperties {
        pub timeseries: Option<Vec<TimeStep>>,
    }

    #[derive(Debug, Deserialize)]
    pub struct TimeStep {
        pub time: Option<DateTime<Utc>>,
        pub data: Option<TimeStepData>,
    }

    #[derive(Debug, Deserialize)]
    pub struct TimeStepData {
        pub instant: Option<InstantData>,
    }

    #[derive(Debug, Deserialize)]
    pub struct InstantData {
        pub details: Option<InstantDetails>,
    }

    /// Only the fields this crate reads; the rest are ignored
    #[derive(Debug, Deserialize)]
    pub struct InstantDetails {
        pub air_temperature: Option<f64>,
    }
}
