//! User-facing operations shared by the interactive menu and subcommands

use crate::error::WeatherLogError;
use crate::models::WeatherEntry;
use crate::report::{ForecastSummary, ReportGenerator, ReportOutcome};
use crate::store::LogStore;
use crate::weather::ForecastProvider;
use chrono::{Local, NaiveDate};
use tracing::info;

/// Date format accepted for report input
pub const DATE_FORMAT: &str = "%Y-%m-%d";

fn local_today() -> NaiveDate {
    Local::now().date_naive()
}

/// Parse a `YYYY-MM-DD` date typed by the user
pub fn parse_date(input: &str) -> crate::Result<NaiveDate> {
    let input = input.trim();
    NaiveDate::parse_from_str(input, DATE_FORMAT).map_err(|_| {
        WeatherLogError::invalid_input(format!(
            "Invalid date '{input}'. Please use the format yyyy-MM-dd."
        ))
    })
}

/// Parse a temperature in Celsius typed by the user
pub fn parse_temperature(input: &str) -> crate::Result<f64> {
    let invalid = || {
        WeatherLogError::invalid_input("Invalid temperature input. Please enter a valid number.")
    };
    let temperature: f64 = input.trim().parse().map_err(|_| invalid())?;
    // JSON has no encoding for NaN or infinity
    if !temperature.is_finite() {
        return Err(invalid());
    }
    Ok(temperature)
}

/// The weather log application: a log store plus a report generator
pub struct WeatherLogApp<S, P> {
    store: S,
    reports: ReportGenerator<P>,
    today: fn() -> NaiveDate,
}

impl<S: LogStore, P: ForecastProvider> WeatherLogApp<S, P> {
    #[must_use]
    pub fn new(store: S, provider: P) -> Self {
        Self {
            store,
            reports: ReportGenerator::new(provider),
            today: local_today,
        }
    }

    /// Replace the clock used to date new entries
    #[must_use]
    pub fn with_today(mut self, today: fn() -> NaiveDate) -> Self {
        self.today = today;
        self
    }

    #[must_use]
    pub fn store(&self) -> &S {
        &self.store
    }

    #[must_use]
    pub fn reports(&self) -> &ReportGenerator<P> {
        &self.reports
    }

    /// Record `raw` as today's temperature
    pub fn log_temperature(&self, raw: &str) -> crate::Result<WeatherEntry> {
        let temperature = parse_temperature(raw)?;
        let entry = WeatherEntry::new((self.today)(), temperature);
        self.store.append(entry.clone())?;
        info!("Logged {} °C for {}", entry.temperature, entry.date);
        Ok(entry)
    }

    /// Every logged entry in append order
    pub fn history(&self) -> crate::Result<Vec<WeatherEntry>> {
        self.store.view_all()
    }

    /// Day report for a date typed by the user
    pub async fn day_report(&self, raw_date: &str) -> crate::Result<ReportOutcome> {
        let date = parse_date(raw_date)?;
        Ok(self.reports.day_report(date).await)
    }

    #[must_use]
    pub fn week_report(&self) -> ReportOutcome {
        self.reports.week_report()
    }

    #[must_use]
    pub fn month_report(&self) -> ReportOutcome {
        self.reports.month_report()
    }

    /// Summary of the default forecast, or of `start..=end` when both are given
    pub async fn forecast_summary(
        &self,
        start: Option<&str>,
        end: Option<&str>,
    ) -> crate::Result<ForecastSummary> {
        let range = match (start, end) {
            (Some(start), Some(end)) => Some((parse_date(start)?, parse_date(end)?)),
            (None, None) => None,
            _ => {
                return Err(WeatherLogError::invalid_input(
                    "Both a start and an end date are needed for a period forecast.",
                ));
            }
        };
        self.reports.forecast_summary(range).await
    }
}
