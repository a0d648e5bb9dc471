use crate::error::{ProcessingError, Result};
use crate::models::RawWeatherRecord;
use crate::utils::constants::{
    COL_FORMATTED_DATE, COL_HUMIDITY, COL_PRECIP_TYPE, COL_PRESSURE, COL_SUMMARY,
    COL_TEMPERATURE, COL_WIND_SPEED, DEFAULT_BUFFER_SIZE, NA_TOKENS,
};
use csv::{ReaderBuilder, StringRecord};
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;
use tracing::{debug, info};

/// Reads the raw hourly observation table.
pub struct WeatherReader;

impl WeatherReader {
    pub fn new() -> Self {
        Self
    }

    /// Read every observation from a CSV file
    pub fn read_records(&self, path: &Path) -> Result<Vec<RawWeatherRecord>> {
        if !path.exists() {
            return Err(ProcessingError::not_found(path));
        }

        let file = File::open(path)?;
        let records = self.read_from(BufReader::with_capacity(DEFAULT_BUFFER_SIZE, file))?;
        info!("Loaded {} raw records from {}", records.len(), path.display());
        Ok(records)
    }

    /// Read observations from any CSV source
    pub fn read_from<R: Read>(&self, source: R) -> Result<Vec<RawWeatherRecord>> {
        let mut reader = ReaderBuilder::new().from_reader(source);

        let columns = ColumnIndex::locate(reader.headers()?)?;
        let mut records = Vec::new();

        for (index, row) in reader.records().enumerate() {
            let row = row?;
            // Header occupies line 1
            records.push(columns.parse_row(&row, index + 2)?);
        }

        debug!("Parsed {} rows", records.len());
        Ok(records)
    }
}

impl Default for WeatherReader {
    fn default() -> Self {
        Self::new()
    }
}

/// Positions of the required columns within the header
struct ColumnIndex {
    formatted_date: usize,
    summary: usize,
    precip_type: usize,
    temperature: usize,
    wind_speed: usize,
    pressure: usize,
    humidity: usize,
}

impl ColumnIndex {
    fn locate(headers: &StringRecord) -> Result<Self> {
        let find = |name: &str| {
            headers
                .iter()
                .position(|header| header.trim_start_matches('\u{feff}').trim() == name)
                .ok_or_else(|| {
                    ProcessingError::schema(name, "required column is missing from the input")
                })
        };

        Ok(Self {
            formatted_date: find(COL_FORMATTED_DATE)?,
            summary: find(COL_SUMMARY)?,
            precip_type: find(COL_PRECIP_TYPE)?,
            temperature: find(COL_TEMPERATURE)?,
            wind_speed: find(COL_WIND_SPEED)?,
            pressure: find(COL_PRESSURE)?,
            humidity: find(COL_HUMIDITY)?,
        })
    }

    fn parse_row(&self, row: &StringRecord, line: usize) -> Result<RawWeatherRecord> {
        Ok(RawWeatherRecord {
            formatted_date: text(row, self.formatted_date),
            summary: text(row, self.summary),
            precip_type: text(row, self.precip_type),
            temperature: number(row, self.temperature, COL_TEMPERATURE, line)?,
            wind_speed: number(row, self.wind_speed, COL_WIND_SPEED, line)?,
            pressure: number(row, self.pressure, COL_PRESSURE, line)?,
            humidity: number(row, self.humidity, COL_HUMIDITY, line)?,
        })
    }
}

fn is_missing(value: &str) -> bool {
    NA_TOKENS.contains(&value)
}

fn text(row: &StringRecord, index: usize) -> Option<String> {
    row.get(index)
        .map(str::trim)
        .filter(|value| !is_missing(value))
        .map(str::to_string)
}

fn number(row: &StringRecord, index: usize, column: &str, line: usize) -> Result<Option<f64>> {
    match text(row, index) {
        None => Ok(None),
        Some(value) => value.parse::<f64>().map(Some).map_err(|_| {
            ProcessingError::Transform(format!(
                "Line {}: cannot convert '{}' in column '{}' to a number",
                line, value, column
            ))
        }),
    }
}
