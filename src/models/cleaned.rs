use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::models::calendar::{Month, Season};
use crate::models::enriched::EnrichedRecord;
use crate::utils::constants::{COL_HUMIDITY_PERCENT, COL_PRESSURE, COL_TEMPERATURE, COL_WIND_SPEED};

/// A row of the filled artifact. Same columns as [`EnrichedRecord`], but
/// the imputed columns can no longer be missing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CleanedRecord {
    pub date: NaiveDate,
    pub time: NaiveTime,
    pub year: String,
    pub month: Month,
    pub hour: u32,
    pub season: Season,

    #[serde(rename = "Summary")]
    pub summary: Option<String>,

    #[serde(rename = "Precip Type")]
    pub precip_type: String,

    #[serde(rename = "Temperature (C)")]
    pub temperature: f64,

    #[serde(rename = "Wind Speed (km/h)")]
    pub wind_speed: f64,

    #[serde(rename = "Pressure (millibars)")]
    pub pressure: f64,

    #[serde(rename = "Humidity(%)")]
    pub humidity_percent: f64,
}

impl CleanedRecord {
    /// Value of a numeric column by its artifact name
    pub fn numeric(&self, column: &str) -> Option<f64> {
        match column {
            COL_TEMPERATURE => Some(self.temperature),
            COL_WIND_SPEED => Some(self.wind_speed),
            COL_PRESSURE => Some(self.pressure),
            COL_HUMIDITY_PERCENT => Some(self.humidity_percent),
            _ => None,
        }
    }

    pub fn summary_label(&self) -> &str {
        self.summary.as_deref().unwrap_or("")
    }
}

impl From<CleanedRecord> for EnrichedRecord {
    fn from(record: CleanedRecord) -> Self {
        EnrichedRecord {
            date: record.date,
            time: record.time,
            year: record.year,
            month: record.month,
            hour: record.hour,
            season: record.season,
            summary: record.summary,
            precip_type: Some(record.precip_type),
            temperature: Some(record.temperature),
            wind_speed: Some(record.wind_speed),
            pressure: Some(record.pressure),
            humidity_percent: Some(record.humidity_percent),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cleaned() -> CleanedRecord {
        CleanedRecord {
            date: NaiveDate::from_ymd_opt(2015, 3, 15).unwrap(),
            time: NaiveTime::from_hms_opt(10, 0, 0).unwrap(),
            year: "2015".to_string(),
            month: Month::March,
            hour: 10,
            season: Season::Spring,
            summary: Some("Clear".to_string()),
            precip_type: "rain".to_string(),
            temperature: 10.0,
            wind_speed: 5.0,
            pressure: 1012.0,
            humidity_percent: 50.0,
        }
    }

    #[test]
    fn test_numeric_lookup() {
        let record = cleaned();
        assert_eq!(record.numeric("Temperature (C)"), Some(10.0));
        assert_eq!(record.numeric("Humidity(%)"), Some(50.0));
        assert_eq!(record.numeric("Summary"), None);
    }

    #[test]
    fn test_into_enriched_has_no_missing_values() {
        let enriched: EnrichedRecord = cleaned().into();
        assert!(!enriched.has_missing_values());
        assert_eq!(enriched.precip_type.as_deref(), Some("rain"));
        assert!(enriched.is_consistent());
    }
}
