//! Location model for the forecast point

use serde::{Deserialize, Serialize};

/// Geographic point the forecast is requested for
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Location {
    /// Latitude in decimal degrees
    pub latitude: f64,
    /// Longitude in decimal degrees
    pub longitude: f64,
    /// Height above sea level in metres
    pub altitude: Option<i32>,
}

impl Location {
    /// Create a new location without altitude
    #[must_use]
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
            altitude: None,
        }
    }

    /// Create location with altitude
    #[must_use]
    pub fn with_altitude(latitude: f64, longitude: f64, altitude: i32) -> Self {
        Self {
            latitude,
            longitude,
            altitude: Some(altitude),
        }
    }

    /// Format location as coordinates string
    #[must_use]
    pub fn format_coordinates(&self) -> String {
        format!("{:.4}, {:.4}", self.latitude, self.longitude)
    }

    /// Query string fragment identifying this point, e.g. `lat=59.93&lon=10.72&altitude=90`
    #[must_use]
    pub fn query(&self) -> String {
        // The provider rejects more than four decimals.
        let mut query = format!(
            "lat={}&lon={}",
            round4(self.latitude),
            round4(self.longitude)
        );
        if let Some(altitude) = self.altitude {
            query.push_str(&format!("&altitude={altitude}"));
        }
        query
    }
}

fn round4(value: f64) -> f64 {
    (value * 10_000.0).round() / 10_000.0
}
