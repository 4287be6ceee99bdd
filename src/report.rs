//! Day, week and month reports built on the forecast provider

use crate::aggregate::{self, TemperatureSummary};
use crate::error::WeatherLogError;
use crate::models::ForecastDataPoint;
use crate::weather::ForecastProvider;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::{debug, warn};

/// Span a report covers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReportPeriod {
    Day,
    Week,
    Month,
}

impl fmt::Display for ReportPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ReportPeriod::Day => "Day",
            ReportPeriod::Week => "Week",
            ReportPeriod::Month => "Month",
        };
        f.write_str(name)
    }
}

/// A rendered single-day report
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DayReport {
    /// Date the user asked for
    pub date: NaiveDate,
    /// Temperature of the first reading in the provider's series
    pub temperature: f64,
}

/// Result of asking for a report
#[derive(Debug, Clone, PartialEq)]
pub enum ReportOutcome {
    Day(DayReport),
    /// The provider failed or returned an empty series
    NoData { date: NaiveDate },
    /// The period has no report implementation
    NotSupported { period: ReportPeriod },
}

impl ReportOutcome {
    /// Whether the outcome carries report content
    #[must_use]
    pub fn is_rendered(&self) -> bool {
        matches!(self, ReportOutcome::Day(_))
    }
}

impl fmt::Display for ReportOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReportOutcome::Day(report) => {
                writeln!(f, "Day Report for {}:", report.date.format("%Y-%m-%d"))?;
                write!(f, "Temperature: {} °C", report.temperature)
            }
            ReportOutcome::NoData { .. } => {
                write!(f, "No weather data available for the specified date.")
            }
            ReportOutcome::NotSupported { period } => {
                write!(f, "{period} report is not implemented.")
            }
        }
    }
}

/// Aggregates over a fetched forecast
#[derive(Debug, Clone, PartialEq)]
pub struct ForecastSummary {
    /// Requested range, `None` for the provider's default forecast
    pub range: Option<(NaiveDate, NaiveDate)>,
    pub first: Option<ForecastDataPoint>,
    pub last: Option<ForecastDataPoint>,
    pub temperatures: TemperatureSummary,
}

impl fmt::Display for ForecastSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.range {
            Some((start, end)) => writeln!(f, "Forecast summary for {start} to {end}:")?,
            None => writeln!(f, "Forecast summary:")?,
        }
        if let (Some(first), Some(last)) = (&self.first, &self.last) {
            writeln!(
                f,
                "Covering {} to {}",
                first.timestamp.format("%Y-%m-%d %H:%M UTC"),
                last.timestamp.format("%Y-%m-%d %H:%M UTC")
            )?;
        }
        write!(f, "{}", self.temperatures)
    }
}

/// Builds reports from a [`ForecastProvider`]
pub struct ReportGenerator<P> {
    provider: P,
}

impl<P: ForecastProvider> ReportGenerator<P> {
    #[must_use]
    pub fn new(provider: P) -> Self {
        Self { provider }
    }

    #[must_use]
    pub fn provider(&self) -> &P {
        &self.provider
    }

    /// Temperature for `date`, taken from the first reading of the forecast
    /// anchored at that date. Fetch failures degrade to [`ReportOutcome::NoData`].
    /// Incomplete steps after the first one do not affect the report.
    pub async fn day_report(&self, date: NaiveDate) -> ReportOutcome {
        let document = match self.provider.fetch_for_date(date).await {
            Ok(document) => document,
            Err(e) => {
                warn!("Day report for {} has no data: {}", date, e);
                return ReportOutcome::NoData { date };
            }
        };

        // Only index 0 is read, whatever timestamp it carries.
        match document.first() {
            Some(point) => {
                debug!("Day report for {} uses reading at {}", date, point.timestamp);
                ReportOutcome::Day(DayReport {
                    date,
                    temperature: point.air_temperature,
                })
            }
            None => {
                warn!("Forecast for {} has an empty time series", date);
                ReportOutcome::NoData { date }
            }
        }
    }

    /// Week reports have no aggregation policy yet
    #[must_use]
    pub fn week_report(&self) -> ReportOutcome {
        ReportOutcome::NotSupported {
            period: ReportPeriod::Week,
        }
    }

    /// Month reports have no aggregation policy yet
    #[must_use]
    pub fn month_report(&self) -> ReportOutcome {
        ReportOutcome::NotSupported {
            period: ReportPeriod::Month,
        }
    }

    /// Average, minimum and maximum over the default forecast, or over the
    /// forecast for `range` when given
    pub async fn forecast_summary(
        &self,
        range: Option<(NaiveDate, NaiveDate)>,
    ) -> crate::Result<ForecastSummary> {
        let document = match range {
            Some((start, end)) => {
                if start > end {
                    return Err(WeatherLogError::invalid_input(format!(
                        "Start date {start} is after end date {end}."
                    )));
                }
                self.provider.fetch_for_period(start, end).await?
            }
            None => self.provider.fetch_current().await?,
        };

        Ok(ForecastSummary {
            range,
            first: document.points.first().cloned(),
            last: document.points.last().cloned(),
            temperatures: aggregate::summarize(&document.points),
        })
    }
}
