use crate::config::PipelineConfig;
use crate::error::{ProcessingError, Result};
use crate::models::{CleanedRecord, EnrichedRecord};
use crate::readers::ArtifactReader;
use crate::utils::constants::{
    COL_HUMIDITY_PERCENT, COL_PRECIP_TYPE, COL_PRESSURE, COL_SUMMARY, COL_TEMPERATURE,
    COL_WIND_SPEED, DEFAULT_PRECIP_TYPE,
};
use crate::writers::ArtifactWriter;
use serde::Serialize;
use tracing::{debug, info};

/// Per-column missing value counts of a derived table
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MissingValueReport {
    pub columns: Vec<(String, usize)>,
    /// Rows with at least one imputed column missing
    pub incomplete_rows: usize,
}

impl MissingValueReport {
    pub fn total(&self) -> usize {
        self.columns.iter().map(|(_, count)| count).sum()
    }

    pub fn count(&self, column: &str) -> Option<usize> {
        self.columns
            .iter()
            .find(|(name, _)| name == column)
            .map(|(_, count)| *count)
    }

    pub fn summary(&self) -> String {
        let mut output = format!(
            "Found {} missing values in {} rows\n",
            self.total(),
            self.incomplete_rows
        );
        for (column, count) in &self.columns {
            output.push_str(&format!("{:<25}{:>10}\n", column, count));
        }
        output
    }
}

/// Fill values for the numeric columns, computed before any substitution.
///
/// `None` means the column has nothing to fill.
#[derive(Debug, Clone, Copy, PartialEq)]
struct ColumnMeans {
    temperature: Option<f64>,
    wind_speed: Option<f64>,
    pressure: Option<f64>,
    humidity_percent: Option<f64>,
}

impl ColumnMeans {
    fn compute(records: &[EnrichedRecord]) -> Result<Self> {
        Ok(Self {
            temperature: fill_mean(COL_TEMPERATURE, records.iter().map(|r| r.temperature))?,
            wind_speed: fill_mean(COL_WIND_SPEED, records.iter().map(|r| r.wind_speed))?,
            pressure: fill_mean(COL_PRESSURE, records.iter().map(|r| r.pressure))?,
            humidity_percent: fill_mean(
                COL_HUMIDITY_PERCENT,
                records.iter().map(|r| r.humidity_percent),
            )?,
        })
    }
}

/// Mean of the present values, needed only when something is missing
fn fill_mean(column: &str, values: impl Iterator<Item = Option<f64>>) -> Result<Option<f64>> {
    let mut sum = 0.0;
    let mut present = 0usize;
    let mut missing = 0usize;

    for value in values {
        match value {
            Some(v) => {
                sum += v;
                present += 1;
            }
            None => missing += 1,
        }
    }

    if missing == 0 {
        return Ok(None);
    }
    if present == 0 {
        return Err(ProcessingError::EmptyColumn {
            column: column.to_string(),
        });
    }

    let mean = sum / present as f64;
    debug!("Filling {} missing '{}' values with mean {:.4}", missing, column, mean);
    Ok(Some(mean))
}

fn filled(value: Option<f64>, mean: Option<f64>, column: &str) -> Result<f64> {
    value.or(mean).ok_or_else(|| ProcessingError::EmptyColumn {
        column: column.to_string(),
    })
}

/// Fills gaps in the derived table.
///
/// `Precip Type` gets the fixed category "rain"; each numeric column gets
/// the mean of its own present values over the whole table. Columns are
/// imputed independently of each other.
pub struct Imputer {
    reader: ArtifactReader,
    writer: ArtifactWriter,
}

impl Imputer {
    pub fn new() -> Self {
        Self {
            reader: ArtifactReader::new(),
            writer: ArtifactWriter::new(),
        }
    }

    pub fn impute(&self, enriched: &[EnrichedRecord]) -> Result<Vec<CleanedRecord>> {
        let means = ColumnMeans::compute(enriched)?;

        enriched
            .iter()
            .map(|record| {
                Ok(CleanedRecord {
                    date: record.date,
                    time: record.time,
                    year: record.year.clone(),
                    month: record.month,
                    hour: record.hour,
                    season: record.season,
                    summary: record.summary.clone(),
                    precip_type: record
                        .precip_type
                        .clone()
                        .unwrap_or_else(|| DEFAULT_PRECIP_TYPE.to_string()),
                    temperature: filled(record.temperature, means.temperature, COL_TEMPERATURE)?,
                    wind_speed: filled(record.wind_speed, means.wind_speed, COL_WIND_SPEED)?,
                    pressure: filled(record.pressure, means.pressure, COL_PRESSURE)?,
                    humidity_percent: filled(
                        record.humidity_percent,
                        means.humidity_percent,
                        COL_HUMIDITY_PERCENT,
                    )?,
                })
            })
            .collect()
    }

    /// Impute, then store the result as the filled artifact
    pub fn impute_and_persist(
        &self,
        enriched: &[EnrichedRecord],
        config: &PipelineConfig,
    ) -> Result<Vec<CleanedRecord>> {
        let report = self.missing_report(enriched);
        if report.total() > 0 {
            info!("{}", report.summary().trim_end());
        }

        let cleaned = self.impute(enriched)?;
        self.writer.write_cleaned(&cleaned, &config.filled_file)?;
        info!(
            "Missing values filled and stored in {}",
            config.filled_file.display()
        );
        Ok(cleaned)
    }

    /// Resume from the filtered artifact instead of an in-memory table
    pub fn impute_from_artifact(&self, config: &PipelineConfig) -> Result<Vec<CleanedRecord>> {
        let enriched = self.reader.read_enriched(&config.filtered_file)?;
        self.impute_and_persist(&enriched, config)
    }

    pub fn missing_report(&self, enriched: &[EnrichedRecord]) -> MissingValueReport {
        let count = |missing: fn(&EnrichedRecord) -> bool| enriched.iter().filter(|r| missing(r)).count();

        MissingValueReport {
            columns: vec![
                (COL_SUMMARY.to_string(), count(|r| r.summary.is_none())),
                (COL_PRECIP_TYPE.to_string(), count(|r| r.precip_type.is_none())),
                (COL_TEMPERATURE.to_string(), count(|r| r.temperature.is_none())),
                (COL_WIND_SPEED.to_string(), count(|r| r.wind_speed.is_none())),
                (COL_PRESSURE.to_string(), count(|r| r.pressure.is_none())),
                (COL_HUMIDITY_PERCENT.to_string(), count(|r| r.humidity_percent.is_none())),
            ],
            incomplete_rows: count(EnrichedRecord::has_missing_values),
        }
    }
}

impl Default for Imputer {
    fn default() -> Self {
        Self::new()
    }
}
