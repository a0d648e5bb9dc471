use crate::config::PipelineConfig;
use crate::error::{ProcessingError, Result};
use crate::models::{EnrichedRecord, RawWeatherRecord};
use crate::utils::constants::COL_FORMATTED_DATE;
use crate::writers::ArtifactWriter;
use chrono::{DateTime, NaiveDateTime, TimeZone, Utc};
use tracing::{debug, info, warn};
use validator::Validate;

/// Offset-carrying layouts accepted besides RFC 3339
const TIMESTAMP_FORMATS: [&str; 4] = [
    "%Y-%m-%d %H:%M:%S%.f %z",
    "%Y-%m-%d %H:%M:%S%.f%z",
    "%Y-%m-%dT%H:%M:%S%.f%z",
    "%Y-%m-%dT%H:%M:%S%.f %z",
];

/// Layouts without an offset; read as UTC
const NAIVE_TIMESTAMP_FORMATS: [&str; 2] = ["%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S%.f"];

/// Parse a timestamp and normalise it to UTC. A value without an offset is taken to be UTC.
pub fn parse_timestamp(value: &str) -> Option<DateTime<Utc>> {
    let value = value.trim();
    DateTime::parse_from_rfc3339(value)
        .ok()
        .or_else(|| {
            TIMESTAMP_FORMATS
                .iter()
                .find_map(|format| DateTime::parse_from_str(value, format).ok())
        })
        .map(|timestamp| timestamp.with_timezone(&Utc))
        .or_else(|| {
            NAIVE_TIMESTAMP_FORMATS
                .iter()
                .find_map(|format| NaiveDateTime::parse_from_str(value, format).ok())
                .map(|naive| Utc.from_utc_datetime(&naive))
        })
}

/// Turns raw observations into the time-ordered, feature-enriched table.
pub struct FeatureDeriver {
    writer: ArtifactWriter,
}

impl FeatureDeriver {
    pub fn new() -> Self {
        Self {
            writer: ArtifactWriter::new(),
        }
    }

    /// Derive temporal features for every record.
    ///
    /// All-or-nothing: a single unparseable timestamp fails the batch.
    /// Output is sorted by UTC timestamp; equal timestamps keep their
    /// input order.
    pub fn derive(&self, raw: &[RawWeatherRecord]) -> Result<Vec<EnrichedRecord>> {
        let mut stamped = Vec::with_capacity(raw.len());
        for (index, record) in raw.iter().enumerate() {
            stamped.push((record_timestamp(record, index)?, record));
        }

        // sort_by_key is stable
        stamped.sort_by_key(|(timestamp, _)| *timestamp);

        let out_of_range = raw.iter().filter(|r| r.validate().is_err()).count();
        if out_of_range > 0 {
            warn!(
                "{} records have humidity outside [0, 1]; rescaled as-is",
                out_of_range
            );
        }

        let enriched = stamped
            .into_iter()
            .map(|(timestamp, record)| {
                EnrichedRecord::builder()
                    .timestamp(timestamp)
                    .summary(record.summary.clone())
                    .precip_type(record.precip_type.clone())
                    .temperature(record.temperature)
                    .wind_speed(record.wind_speed)
                    .pressure(record.pressure)
                    .humidity(record.humidity)
                    .build()
            })
            .collect::<Result<Vec<_>>>()?;

        debug!("Derived features for {} records", enriched.len());
        Ok(enriched)
    }

    /// Derive, then store the result as the filtered artifact
    pub fn derive_and_persist(
        &self,
        raw: &[RawWeatherRecord],
        config: &PipelineConfig,
    ) -> Result<Vec<EnrichedRecord>> {
        let enriched = self.derive(raw)?;
        self.writer.write_enriched(&enriched, &config.filtered_file)?;
        info!(
            "Data filtered and stored in {}",
            config.filtered_file.display()
        );
        Ok(enriched)
    }
}

impl Default for FeatureDeriver {
    fn default() -> Self {
        Self::new()
    }
}

fn record_timestamp(record: &RawWeatherRecord, index: usize) -> Result<DateTime<Utc>> {
    let value = record.formatted_date.as_deref().ok_or_else(|| {
        ProcessingError::schema(
            COL_FORMATTED_DATE,
            format!("value missing in record {}", index + 1),
        )
    })?;

    parse_timestamp(value).ok_or_else(|| {
        ProcessingError::schema(
            COL_FORMATTED_DATE,
            format!("cannot parse '{}' in record {}", value, index + 1),
        )
    })
}
