use chrono::{DateTime, Datelike, NaiveDate, NaiveTime, Timelike, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{ProcessingError, Result};
use crate::models::calendar::{Month, Season};

/// A row of the filtered artifact: one observation with its temporal
/// features split out and humidity rescaled to percent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnrichedRecord {
    pub date: NaiveDate,
    pub time: NaiveTime,
    pub year: String,
    pub month: Month,
    pub hour: u32,
    pub season: Season,

    #[serde(rename = "Summary")]
    pub summary: Option<String>,

    #[serde(rename = "Precip Type")]
    pub precip_type: Option<String>,

    #[serde(rename = "Temperature (C)")]
    pub temperature: Option<f64>,

    #[serde(rename = "Wind Speed (km/h)")]
    pub wind_speed: Option<f64>,

    #[serde(rename = "Pressure (millibars)")]
    pub pressure: Option<f64>,

    #[serde(rename = "Humidity(%)")]
    pub humidity_percent: Option<f64>,
}

impl EnrichedRecord {
    pub fn builder() -> EnrichedRecordBuilder {
        EnrichedRecordBuilder::new()
    }

    /// Season must always be the one the month maps to
    pub fn is_consistent(&self) -> bool {
        self.season == self.month.season()
    }

    pub fn validate_consistency(&self) -> Result<()> {
        if !self.is_consistent() {
            return Err(ProcessingError::Transform(format!(
                "Season {} does not match month {} on {} {}",
                self.season, self.month, self.date, self.time
            )));
        }
        Ok(())
    }

    pub fn has_missing_values(&self) -> bool {
        self.precip_type.is_none()
            || self.temperature.is_none()
            || self.wind_speed.is_none()
            || self.pressure.is_none()
            || self.humidity_percent.is_none()
    }
}

pub struct EnrichedRecordBuilder {
    timestamp: Option<DateTime<Utc>>,
    summary: Option<String>,
    precip_type: Option<String>,
    temperature: Option<f64>,
    wind_speed: Option<f64>,
    pressure: Option<f64>,
    humidity: Option<f64>,
}

impl Default for EnrichedRecordBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl EnrichedRecordBuilder {
    pub fn new() -> Self {
        Self {
            timestamp: None,
            summary: None,
            precip_type: None,
            temperature: None,
            wind_speed: None,
            pressure: None,
            humidity: None,
        }
    }

    pub fn timestamp(mut self, timestamp: DateTime<Utc>) -> Self {
        self.timestamp = Some(timestamp);
        self
    }

    pub fn summary(mut self, summary: impl Into<Option<String>>) -> Self {
        self.summary = summary.into();
        self
    }

    pub fn precip_type(mut self, precip_type: impl Into<Option<String>>) -> Self {
        self.precip_type = precip_type.into();
        self
    }

    pub fn temperature(mut self, temperature: impl Into<Option<f64>>) -> Self {
        self.temperature = temperature.into();
        self
    }

    pub fn wind_speed(mut self, wind_speed: impl Into<Option<f64>>) -> Self {
        self.wind_speed = wind_speed.into();
        self
    }

    pub fn pressure(mut self, pressure: impl Into<Option<f64>>) -> Self {
        self.pressure = pressure.into();
        self
    }

    /// Humidity as a fraction in [0, 1]; stored as percent
    pub fn humidity(mut self, humidity: impl Into<Option<f64>>) -> Self {
        self.humidity = humidity.into();
        self
    }

    pub fn build(self) -> Result<EnrichedRecord> {
        let timestamp = self.timestamp.ok_or_else(|| {
            ProcessingError::Transform("timestamp is required to derive temporal features".into())
        })?;

        let month = Month::from_ordinal(timestamp.month()).ok_or_else(|| {
            ProcessingError::Transform(format!("Invalid month ordinal {}", timestamp.month()))
        })?;

        Ok(EnrichedRecord {
            date: timestamp.date_naive(),
            time: timestamp.time(),
            year: timestamp.year().to_string(),
            month,
            hour: timestamp.hour(),
            season: month.season(),
            summary: self.summary,
            precip_type: self.precip_type,
            temperature: self.temperature,
            wind_speed: self.wind_speed,
            pressure: self.pressure,
            humidity_percent: self.humidity.map(|fraction| fraction * 100.0),
        })
    }
}
