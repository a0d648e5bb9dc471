use crate::error::{ProcessingError, Result};
use crate::models::{CleanedRecord, EnrichedRecord};
use crate::utils::constants::{ARTIFACT_COLUMNS, COL_PRECIP_TYPE};
use csv::ReaderBuilder;
use serde::de::DeserializeOwned;
use std::path::Path;
use tracing::info;

/// Reads the tables persisted between pipeline stages.
pub struct ArtifactReader;

impl ArtifactReader {
    pub fn new() -> Self {
        Self
    }

    /// Read the derived table
    pub fn read_enriched(&self, path: &Path) -> Result<Vec<EnrichedRecord>> {
        let records: Vec<EnrichedRecord> = self.read_table(path)?;
        for record in &records {
            record.validate_consistency()?;
        }

        info!("Loaded {} derived records from {}", records.len(), path.display());
        Ok(records)
    }

    /// Read the imputed table
    pub fn read_cleaned(&self, path: &Path) -> Result<Vec<CleanedRecord>> {
        let records: Vec<CleanedRecord> = self.read_table(path)?;
        for (index, record) in records.iter().enumerate() {
            if record.season != record.month.season() {
                return Err(ProcessingError::Transform(format!(
                    "Row {}: season {} does not match month {}",
                    index + 2,
                    record.season,
                    record.month
                )));
            }
            if record.precip_type.is_empty() {
                return Err(ProcessingError::Transform(format!(
                    "Row {}: '{}' is missing in an imputed table",
                    index + 2,
                    COL_PRECIP_TYPE
                )));
            }
        }

        info!("Loaded {} cleaned records from {}", records.len(), path.display());
        Ok(records)
    }

    fn read_table<T: DeserializeOwned>(&self, path: &Path) -> Result<Vec<T>> {
        if !path.exists() {
            return Err(ProcessingError::not_found(path));
        }

        let mut reader = ReaderBuilder::new().from_path(path)?;

        let headers = reader.headers()?;
        for expected in ARTIFACT_COLUMNS {
            if !headers.iter().any(|header| header == expected) {
                return Err(ProcessingError::schema(
                    expected,
                    format!("column is missing from {}", path.display()),
                ));
            }
        }

        reader
            .deserialize()
            .enumerate()
            .map(|(index, row)| {
                row.map_err(|e| ProcessingError::Transform(format!("Row {}: {}", index + 2, e)))
            })
            .collect()
    }
}

impl Default for ArtifactReader {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Month, Season};
    use std::io::Write;
    use tempfile::NamedTempFile;

    const HEADER: &str = "date,time,year,month,hour,season,Summary,Precip Type,Temperature (C),Wind Speed (km/h),Pressure (millibars),Humidity(%)";

    fn artifact(rows: &[&str]) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "{}", HEADER).unwrap();
        for row in rows {
            writeln!(file, "{}", row).unwrap();
        }
        file
    }

    #[test]
    fn test_read_enriched_with_gaps() -> Result<()> {
        let file = artifact(&["2015-03-15,10:00:00,2015,March,10,Spring,Clear,,10.0,5.0,,50.0"]);

        let records = ArtifactReader::new().read_enriched(file.path())?;

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].month, Month::March);
        assert_eq!(records[0].season, Season::Spring);
        assert_eq!(records[0].hour, 10);
        assert_eq!(records[0].summary.as_deref(), Some("Clear"));
        assert_eq!(records[0].precip_type, None);
        assert_eq!(records[0].pressure, None);
        assert_eq!(records[0].humidity_percent, Some(50.0));
        Ok(())
    }

    #[test]
    fn test_missing_artifact_is_not_found() {
        let err = ArtifactReader::new()
            .read_enriched(Path::new("missing/filtered_data.csv"))
            .unwrap_err();
        assert!(matches!(err, ProcessingError::NotFound { .. }));
    }

    #[test]
    fn test_missing_column_is_schema_error() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "date,time,year,month,hour,season").unwrap();

        let err = ArtifactReader::new().read_enriched(file.path()).unwrap_err();
        assert!(matches!(err, ProcessingError::Schema { .. }));
    }

    #[test]
    fn test_season_month_disagreement_is_rejected() {
        let file = artifact(&["2015-03-15,10:00:00,2015,March,10,Winter,Clear,rain,10.0,5.0,1012.0,50.0"]);

        let err = ArtifactReader::new().read_enriched(file.path()).unwrap_err();
        assert!(matches!(err, ProcessingError::Transform(_)));
    }

    #[test]
    fn test_cleaned_table_requires_values() {
        let file = artifact(&["2015-03-15,10:00:00,2015,March,10,Spring,Clear,rain,,5.0,1012.0,50.0"]);

        let err = ArtifactReader::new().read_cleaned(file.path()).unwrap_err();
        assert!(matches!(err, ProcessingError::Transform(_)));
    }

    #[test]
    fn test_read_cleaned() -> Result<()> {
        let file = artifact(&["2015-03-15,10:00:00,2015,March,10,Spring,,rain,10.0,5.0,1012.0,50.0"]);

        let records = ArtifactReader::new().read_cleaned(file.path())?;

        assert_eq!(records[0].precip_type, "rain");
        assert_eq!(records[0].summary, None);
        assert_eq!(records[0].temperature, 10.0);
        Ok(())
    }
}
