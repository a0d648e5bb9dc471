use serde::{Deserialize, Serialize};
use validator::Validate;

/// One hourly observation as it appears in the input file.
///
/// Every field is optional here; the feature deriver decides which
/// absences are fatal.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
pub struct RawWeatherRecord {
    pub formatted_date: Option<String>,
    pub summary: Option<String>,
    pub precip_type: Option<String>,
    pub temperature: Option<f64>,
    pub wind_speed: Option<f64>,
    pub pressure: Option<f64>,

    // Fraction, not percent
    #[validate(range(min = 0.0, max = 1.0))]
    pub humidity: Option<f64>,
}

impl RawWeatherRecord {
    pub fn new(formatted_date: impl Into<String>) -> Self {
        Self {
            formatted_date: Some(formatted_date.into()),
            ..Self::default()
        }
    }

    pub fn with_summary(mut self, summary: impl Into<String>) -> Self {
        self.summary = Some(summary.into());
        self
    }

    pub fn with_precip_type(mut self, precip_type: impl Into<String>) -> Self {
        self.precip_type = Some(precip_type.into());
        self
    }

    pub fn with_measurements(
        mut self,
        temperature: f64,
        wind_speed: f64,
        pressure: f64,
        humidity: f64,
    ) -> Self {
        self.temperature = Some(temperature);
        self.wind_speed = Some(wind_speed);
        self.pressure = Some(pressure);
        self.humidity = Some(humidity);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_humidity_range_validation() {
        let valid = RawWeatherRecord::new("2015-03-15T10:00:00+00:00")
            .with_measurements(10.0, 5.0, 1012.0, 0.5);
        assert!(valid.validate().is_ok());

        let invalid = RawWeatherRecord::new("2015-03-15T10:00:00+00:00")
            .with_measurements(10.0, 5.0, 1012.0, 85.0);
        assert!(invalid.validate().is_err());

        // Absent humidity is not a range violation
        let absent = RawWeatherRecord::new("2015-03-15T10:00:00+00:00");
        assert!(absent.validate().is_ok());
    }
}
