//! Forecast client for the MET Norway `locationforecast` API
//!
//! [`ForecastProvider`] is the seam the report generator depends on;
//! [`MetNoClient`] is the HTTP implementation.

use crate::config::WeatherConfig;
use crate::error::WeatherLogError;
use crate::models::forecast::raw;
use crate::models::{ForecastDocument, Location};
use async_trait::async_trait;
use chrono::NaiveDate;
use reqwest::Client;
use std::time::{Duration, Instant};
use tracing::{debug, error, info, instrument, warn};

/// Source of forecast documents
#[async_trait]
pub trait ForecastProvider: Send + Sync {
    /// Default forecast for the configured point
    async fn fetch_current(&self) -> crate::Result<ForecastDocument>;

    /// Forecast anchored at noon UTC of `date`
    ///
    /// Only the leading step has to be complete; the series may be cut short
    /// at the first incomplete step after it.
    async fn fetch_for_date(&self, date: NaiveDate) -> crate::Result<ForecastDocument>;

    /// Forecast covering `start` 00:00:00Z through `end` 23:59:59Z
    async fn fetch_for_period(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> crate::Result<ForecastDocument>;
}

/// HTTP client for `locationforecast/2.0/compact`
pub struct MetNoClient {
    client: Client,
    base_url: String,
    location: Location,
}

impl MetNoClient {
    /// Create a new client; the user agent and timeout apply to every request
    pub fn new(config: &WeatherConfig) -> crate::Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds.into()))
            .user_agent(config.user_agent.clone())
            .build()
            .map_err(|e| WeatherLogError::config(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            location: config.location(),
        })
    }

    fn compact_url(&self) -> String {
        format!("{}/compact?{}", self.base_url, self.location.query())
    }

    #[must_use]
    pub fn current_url(&self) -> String {
        self.compact_url()
    }

    #[must_use]
    pub fn date_url(&self, date: NaiveDate) -> String {
        format!("{}&time={}T12:00:00Z", self.compact_url(), date.format("%Y-%m-%d"))
    }

    #[must_use]
    pub fn period_url(&self, start: NaiveDate, end: NaiveDate) -> String {
        format!(
            "{}&start={}T00:00:00Z&end={}T23:59:59Z",
            self.compact_url(),
            start.format("%Y-%m-%d"),
            end.format("%Y-%m-%d")
        )
    }

    #[instrument(name = "fetch_forecast", skip(self, convert), fields(location = %self.location.format_coordinates()))]
    async fn fetch(
        &self,
        url: &str,
        convert: fn(raw::ForecastResponse) -> crate::Result<ForecastDocument>,
    ) -> crate::Result<ForecastDocument> {
        let start_time = Instant::now();
        debug!("Forecast request URL: {}", url);

        let response = self.client.get(url).send().await.map_err(|e| {
            warn!("Network error requesting forecast: {}", e);
            WeatherLogError::fetch(format!("Network error: {e}"))
        })?;

        let status = response.status();
        if !status.is_success() {
            error!("Forecast request failed with status {}", status);
            return Err(WeatherLogError::fetch(format!(
                "API request failed with status: {} - {}",
                status,
                status.canonical_reason().unwrap_or("Unknown error")
            )));
        }

        let body: raw::ForecastResponse = response.json().await.map_err(|e| {
            error!("Failed to parse forecast response: {}", e);
            WeatherLogError::fetch(format!("Invalid forecast document: {e}"))
        })?;
        let document = convert(body)?;

        let total_duration = start_time.elapsed();
        info!(
            "Retrieved forecast with {} data points in {:.3}s",
            document.len(),
            total_duration.as_secs_f64()
        );
        if total_duration.as_secs() > 5 {
            warn!(
                "Slow forecast API response: {:.3}s",
                total_duration.as_secs_f64()
            );
        }

        Ok(document)
    }
}

#[async_trait]
impl ForecastProvider for MetNoClient {
    async fn fetch_current(&self) -> crate::Result<ForecastDocument> {
        self.fetch(&self.current_url(), ForecastDocument::try_from).await
    }

    async fn fetch_for_date(&self, date: NaiveDate) -> crate::Result<ForecastDocument> {
        self.fetch(&self.date_url(date), ForecastDocument::from_leading_steps).await
    }

    async fn fetch_for_period(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> crate::Result<ForecastDocument> {
        if start > end {
            return Err(WeatherLogError::invalid_input(format!(
                "Start date {start} is after end date {end}."
            )));
        }
        self.fetch(&self.period_url(start, end), ForecastDocument::try_from).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const USER_AGENT: &str = "weatherlog-tests/1.0 contact@example.com";

    const PARTIAL_BODY: &str = r#"{"type": "Feature", "properties": {"timeseries": [
        {"time": "2024-01-15T12:00:00Z", "data": {"instant": {"details": {"air_temperature": -3.5}}}},
        {"time": "2024-01-15T13:00:00Z", "data": {"instant": {"details": {"air_temperature": -2.0}}}},
        {"time": "2024-01-15T18:00:00Z", "data": {"next_6_hours": {}}}
    ]}}"#;

    fn client_for(server: &MockServer) -> MetNoClient {
        let config = WeatherConfig {
            base_url: server.uri(),
            user_agent: USER_AGENT.to_string(),
            timeout_seconds: 5,
            ..WeatherConfig::default()
        };
        MetNoClient::new(&config).unwrap()
    }

    fn client() -> MetNoClient {
        let config = WeatherConfig {
            base_url: "https://api.met.no/weatherapi/locationforecast/2.0/".to_string(),
            ..WeatherConfig::default()
        };
        MetNoClient::new(&config).unwrap()
    }

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_current_url() {
        assert_eq!(
            client().current_url(),
            "https://api.met.no/weatherapi/locationforecast/2.0/compact?lat=59.93&lon=10.72&altitude=90"
        );
    }

    #[test]
    fn test_date_url_anchors_at_noon() {
        let url = client().date_url(day(2024, 1, 15));
        assert!(url.ends_with("&altitude=90&time=2024-01-15T12:00:00Z"));
    }

    #[test]
    fn test_period_url_covers_whole_days() {
        let url = client().period_url(day(2024, 1, 15), day(2024, 1, 21));
        assert!(url.ends_with("&start=2024-01-15T00:00:00Z&end=2024-01-21T23:59:59Z"));
    }

    #[tokio::test]
    async fn test_reversed_period_is_rejected_before_any_request() {
        let err = client()
            .fetch_for_period(day(2024, 1, 21), day(2024, 1, 15))
            .await
            .unwrap_err();
        assert!(matches!(err, WeatherLogError::InvalidInput { .. }));
    }

    #[tokio::test]
    async fn test_unreachable_host_is_fetch_failure() {
        let config = WeatherConfig {
            base_url: "http://127.0.0.1:9".to_string(),
            timeout_seconds: 2,
            ..WeatherConfig::default()
        };
        let client = MetNoClient::new(&config).unwrap();
        let err = client.fetch_current().await.unwrap_err();
        assert!(err.is_fetch_failure());
    }

    #[tokio::test]
    async fn test_date_request_identifies_itself_and_reads_leading_steps() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/compact"))
            .and(header("user-agent", USER_AGENT))
            .and(query_param("lat", "59.93"))
            .and(query_param("time", "2024-01-15T12:00:00Z"))
            .respond_with(ResponseTemplate::new(200).set_body_string(PARTIAL_BODY))
            .expect(1)
            .mount(&server)
            .await;

        let document = client_for(&server)
            .fetch_for_date(day(2024, 1, 15))
            .await
            .unwrap();

        assert_eq!(document.len(), 2);
        assert_eq!(document.first().unwrap().air_temperature, -3.5);
    }

    #[tokio::test]
    async fn test_period_request_needs_every_step_complete() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/compact"))
            .and(header("user-agent", USER_AGENT))
            .and(query_param("start", "2024-01-15T00:00:00Z"))
            .and(query_param("end", "2024-01-21T23:59:59Z"))
            .respond_with(ResponseTemplate::new(200).set_body_string(PARTIAL_BODY))
            .expect(1)
            .mount(&server)
            .await;

        let err = client_for(&server)
            .fetch_for_period(day(2024, 1, 15), day(2024, 1, 21))
            .await
            .unwrap_err();

        assert!(matches!(err, WeatherLogError::MissingField { .. }));
    }

    #[tokio::test]
    async fn test_error_status_is_fetch_failure() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/compact"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&server)
            .await;

        let err = client_for(&server).fetch_current().await.unwrap_err();

        assert!(err.is_fetch_failure());
        assert!(err.to_string().contains("503"));
    }

    #[tokio::test]
    async fn test_non_json_body_is_fetch_failure() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/compact"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>maintenance</html>"))
            .mount(&server)
            .await;

        let err = client_for(&server).fetch_current().await.unwrap_err();

        assert!(matches!(err, WeatherLogError::Fetch { .. }));
    }
}
