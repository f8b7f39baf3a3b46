//! Geographic observation locations

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A persisted location row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeographicLocation {
    pub id: i64,
    pub latitude: f64,
    pub longitude: f64,
    pub location_name: String,
    pub source: Option<String>,
    pub observation_date: Option<DateTime<Utc>>,
}

impl GeographicLocation {
    /// `(lat, lon)` as printed in reports
    pub fn coordinates(&self) -> String {
        format!("({}, {})", self.latitude, self.longitude)
    }
}

/// A location candidate waiting to be inserted.
///
/// The location name is the natural key used when seeding.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewLocation {
    pub latitude: f64,
    pub longitude: f64,
    pub location_name: String,
    #[serde(default)]
    pub source: Option<String>,
    #[serde(default)]
    pub observation_date: Option<DateTime<Utc>>,
}

impl NewLocation {
    pub fn new(location_name: impl Into<String>, latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
            location_name: location_name.into(),
            source: None,
            observation_date: None,
        }
    }

    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }

    pub fn observed_at(mut self, date: Option<DateTime<Utc>>) -> Self {
        self.observation_date = date;
        self
    }
}
