//! Integration tests for the weather log: file-backed store, reports and the menu

use async_trait::async_trait;
use chrono::NaiveDate;
use std::sync::Mutex;
use tempfile::TempDir;
use weatherlog::{
    ForecastDocument, ForecastProvider, JsonFileStore, LogStore, ReportOutcome, WeatherEntry,
    WeatherLogApp, WeatherLogError, shell,
};

const FORECAST_BODY: &str = r#"{
    "type": "Feature",
    "properties": {
        "timeseries": [
            {"time": "2024-01-15T12:00:00Z", "data": {"instant": {"details": {"air_temperature": -1.5}}}},
            {"time": "2024-01-15T13:00:00Z", "data": {"instant": {"details": {"air_temperature": 0.5}}}},
            {"time": "2024-01-15T14:00:00Z", "data": {"instant": {"details": {"air_temperature": 2.5}}}}
        ]
    }
}"#;

/// Provider serving a fixed response body and recording what was asked for
struct RecordedProvider {
    body: Option<&'static str>,
    requests: Mutex<Vec<String>>,
}

impl RecordedProvider {
    fn serving(body: &'static str) -> Self {
        Self {
            body: Some(body),
            requests: Mutex::new(Vec::new()),
        }
    }

    fn offline() -> Self {
        Self {
            body: None,
            requests: Mutex::new(Vec::new()),
        }
    }

    fn respond(&self, request: String) -> weatherlog::Result<ForecastDocument> {
        self.requests.lock().unwrap().push(request);
        match self.body {
            Some(body) => ForecastDocument::from_json(body),
            None => Err(WeatherLogError::fetch("connection refused")),
        }
    }
}

#[async_trait]
impl ForecastProvider for RecordedProvider {
    async fn fetch_current(&self) -> weatherlog::Result<ForecastDocument> {
        self.respond("current".to_string())
    }

    async fn fetch_for_date(&self, date: NaiveDate) -> weatherlog::Result<ForecastDocument> {
        self.respond(format!("date {date}"))
    }

    async fn fetch_for_period(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> weatherlog::Result<ForecastDocument> {
        self.respond(format!("period {start} {end}"))
    }
}

fn jan(day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 1, day).unwrap()
}

fn jan_15() -> NaiveDate {
    jan(15)
}

fn app_in(
    dir: &TempDir,
    provider: RecordedProvider,
) -> WeatherLogApp<JsonFileStore, RecordedProvider> {
    let store = JsonFileStore::new(dir.path().join("Weatherlog.json"));
    WeatherLogApp::new(store, provider).with_today(jan_15)
}

#[test]
fn test_logged_entries_survive_a_new_store() {
    let dir = TempDir::new().unwrap();
    let app = app_in(&dir, RecordedProvider::offline());

    app.log_temperature("-3.5").unwrap();
    app.log_temperature("-3.5").unwrap();
    app.log_temperature("1").unwrap();

    let reopened = JsonFileStore::new(dir.path().join("Weatherlog.json"));
    assert_eq!(
        reopened.load().unwrap(),
        vec![
            WeatherEntry::new(jan_15(), -3.5),
            WeatherEntry::new(jan_15(), -3.5),
            WeatherEntry::new(jan_15(), 1.0),
        ]
    );
}

#[test]
fn test_malformed_log_blocks_logging_but_keeps_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("Weatherlog.json");
    std::fs::write(&path, "[{\"Date\": \"2024-01-15\"").unwrap();
    let app = app_in(&dir, RecordedProvider::offline());

    let err = app.log_temperature("4").unwrap_err();
    assert!(matches!(err, WeatherLogError::MalformedLog { .. }));
    assert!(app.history().is_err());
    assert_eq!(
        std::fs::read_to_string(&path).unwrap(),
        "[{\"Date\": \"2024-01-15\""
    );
}

#[tokio::test]
async fn test_day_report_reads_first_entry_of_anchored_forecast() {
    let dir = TempDir::new().unwrap();
    let app = app_in(&dir, RecordedProvider::serving(FORECAST_BODY));

    let outcome = app.day_report("2024-01-15").await.unwrap();

    assert_eq!(
        outcome.to_string(),
        "Day Report for 2024-01-15:\nTemperature: -1.5 °C"
    );
    let requests = app.reports().provider().requests.lock().unwrap().clone();
    assert_eq!(requests, vec!["date 2024-01-15".to_string()]);
}

#[tokio::test]
async fn test_day_report_on_empty_series_has_no_data() {
    let dir = TempDir::new().unwrap();
    let app = app_in(
        &dir,
        RecordedProvider::serving(r#"{"properties": {"timeseries": []}}"#),
    );

    let outcome = app.day_report("2024-01-15").await.unwrap();
    assert_eq!(outcome, ReportOutcome::NoData { date: jan_15() });
}

#[tokio::test]
async fn test_day_report_on_incomplete_response_has_no_data() {
    let dir = TempDir::new().unwrap();
    let app = app_in(
        &dir,
        RecordedProvider::serving(r#"{"properties": {"timeseries": [{"time": "2024-01-15T12:00:00Z"}]}}"#),
    );

    let outcome = app.day_report("2024-01-15").await.unwrap();
    assert!(matches!(outcome, ReportOutcome::NoData { .. }));
}

#[tokio::test]
async fn test_period_forecast_summary() {
    let dir = TempDir::new().unwrap();
    let app = app_in(&dir, RecordedProvider::serving(FORECAST_BODY));

    let summary = app
        .forecast_summary(Some("2024-01-15"), Some("2024-01-21"))
        .await
        .unwrap();

    assert_eq!(summary.range, Some((jan(15), jan(21))));
    assert_eq!(summary.temperatures.count, 3);
    assert!((summary.temperatures.average - 0.5).abs() < 1e-9);
    assert_eq!(summary.temperatures.min, -1.5);
    assert_eq!(summary.temperatures.max, 2.5);
    let requests = app.reports().provider().requests.lock().unwrap().clone();
    assert_eq!(requests, vec!["period 2024-01-15 2024-01-21".to_string()]);
}

#[tokio::test]
async fn test_menu_session_against_file_store() {
    let dir = TempDir::new().unwrap();
    let app = app_in(&dir, RecordedProvider::offline());
    let script = "1\n12.5\n1\nnot a number\n2\n1\n2024-01-15\n2\n2\n3\n4\n";

    let mut output = Vec::new();
    shell::run(&app, script.as_bytes(), &mut output)
        .await
        .unwrap();
    let output = String::from_utf8(output).unwrap();

    assert!(output.contains("Weather data logged successfully."));
    assert!(output.contains("Error logging weather data: Invalid temperature input."));
    assert!(output.contains("No weather data available for the specified date."));
    assert!(output.contains("Week report is not implemented."));
    assert!(output.contains("Date: 2024-01-15, Temperature: 12.5 °C"));
    assert_eq!(
        app.store().load().unwrap(),
        vec![WeatherEntry::new(jan_15(), 12.5)]
    );
}

#[tokio::test]
async fn test_menu_reports_malformed_log_and_carries_on() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("Weatherlog.json");
    std::fs::write(&path, "not json at all").unwrap();
    let app = app_in(&dir, RecordedProvider::offline());

    let mut output = Vec::new();
    shell::run(&app, "3\n1\n5\n4\n".as_bytes(), &mut output)
        .await
        .unwrap();
    let output = String::from_utf8(output).unwrap();

    assert!(output.contains("Error viewing log history: The weather log at"));
    assert!(output.contains("Error logging weather data: The weather log at"));
    assert_eq!(output.matches("Enter your choice:").count(), 3);
    assert_eq!(std::fs::read_to_string(&path).unwrap(), "not json at all");
}
