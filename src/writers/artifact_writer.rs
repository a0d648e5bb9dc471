use crate::analyzers::YearBreakdown;
use crate::error::Result;
use crate::models::{CleanedRecord, EnrichedRecord};
use crate::utils::constants::ARTIFACT_COLUMNS;
use csv::WriterBuilder;
use serde::Serialize;
use std::fs;
use std::io::Write;
use std::path::Path;
use tempfile::NamedTempFile;
use tracing::{debug, info};

/// Persists tables to the storage boundary between stages.
///
/// Files are written to a temporary sibling first and renamed into place,
/// so a failed stage never leaves a truncated artifact behind.
pub struct ArtifactWriter;

impl ArtifactWriter {
    pub fn new() -> Self {
        Self
    }

    pub fn write_enriched(&self, records: &[EnrichedRecord], path: &Path) -> Result<()> {
        self.write_table(records, path)?;
        info!("Derived table ({} rows) stored in {}", records.len(), path.display());
        Ok(())
    }

    pub fn write_cleaned(&self, records: &[CleanedRecord], path: &Path) -> Result<()> {
        self.write_table(records, path)?;
        info!("Imputed table ({} rows) stored in {}", records.len(), path.display());
        Ok(())
    }

    pub fn write_breakdown(&self, breakdown: &YearBreakdown, path: &Path) -> Result<()> {
        self.write_atomic(path, |file| {
            let mut writer = WriterBuilder::new().from_writer(file);

            let mut header = vec![breakdown.row_label.as_str()];
            header.extend(breakdown.columns.iter().map(String::as_str));
            writer.write_record(&header)?;

            for row in &breakdown.rows {
                let mut fields = vec![row.label.clone()];
                fields.extend(row.counts.iter().map(|count| count.to_string()));
                writer.write_record(&fields)?;
            }

            writer.flush()?;
            Ok(())
        })?;

        info!("{} stored in {}", breakdown.title, path.display());
        Ok(())
    }

    /// Store a rendered text report
    pub fn write_report(&self, text: &str, path: &Path) -> Result<()> {
        self.write_atomic(path, |file| {
            file.write_all(text.as_bytes())?;
            Ok(())
        })?;

        info!("Analysis report stored in {}", path.display());
        Ok(())
    }

    fn write_table<T: Serialize>(&self, records: &[T], path: &Path) -> Result<()> {
        self.write_atomic(path, |file| {
            // Header written by hand so an empty table still carries it
            let mut writer = WriterBuilder::new().has_headers(false).from_writer(file);
            writer.write_record(ARTIFACT_COLUMNS)?;

            for record in records {
                writer.serialize(record)?;
            }

            writer.flush()?;
            Ok(())
        })
    }

    fn write_atomic<F>(&self, path: &Path, write: F) -> Result<()>
    where
        F: FnOnce(&mut NamedTempFile) -> Result<()>,
    {
        let parent = match path.parent() {
            Some(dir) if !dir.as_os_str().is_empty() => dir,
            _ => Path::new("."),
        };
        fs::create_dir_all(parent)?;

        let mut temp = NamedTempFile::new_in(parent)?;
        write(&mut temp)?;
        temp.persist(path).map_err(|e| e.error)?;

        debug!("Wrote {}", path.display());
        Ok(())
    }
}

impl Default for ArtifactWriter {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzers::BreakdownRow;
    use crate::readers::ArtifactReader;
    use chrono::{TimeZone, Utc};
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    fn enriched(hour: u32, temperature: Option<f64>) -> EnrichedRecord {
        EnrichedRecord::builder()
            .timestamp(Utc.with_ymd_and_hms(2015, 3, 15, hour, 0, 0).unwrap())
            .summary("Clear".to_string())
            .temperature(temperature)
            .wind_speed(5.0)
            .pressure(1012.0)
            .humidity(0.5)
            .build()
            .unwrap()
    }

    #[test]
    fn test_header_order() -> Result<()> {
        let dir = TempDir::new()?;
        let path = dir.path().join("filtered_data.csv");

        ArtifactWriter::new().write_enriched(&[enriched(10, Some(10.0))], &path)?;

        let content = fs::read_to_string(&path)?;
        let mut lines = content.lines();
        assert_eq!(
            lines.next(),
            Some("date,time,year,month,hour,season,Summary,Precip Type,Temperature (C),Wind Speed (km/h),Pressure (millibars),Humidity(%)")
        );
        assert_eq!(
            lines.next(),
            Some("2015-03-15,10:00:00,2015,March,10,Spring,Clear,,10.0,5.0,1012.0,50.0")
        );
        Ok(())
    }

    #[test]
    fn test_empty_table_keeps_header() -> Result<()> {
        let dir = TempDir::new()?;
        let path = dir.path().join("filtered_data.csv");

        ArtifactWriter::new().write_enriched(&[], &path)?;

        let records = ArtifactReader::new().read_enriched(&path)?;
        assert!(records.is_empty());
        Ok(())
    }

    #[test]
    fn test_enriched_survives_reload() -> Result<()> {
        let dir = TempDir::new()?;
        let path = dir.path().join("nested").join("filtered_data.csv");
        let records = vec![enriched(9, Some(-3.25)), enriched(10, None)];

        ArtifactWriter::new().write_enriched(&records, &path)?;
        let reloaded = ArtifactReader::new().read_enriched(&path)?;

        assert_eq!(reloaded, records);
        Ok(())
    }

    #[test]
    fn test_write_breakdown() -> Result<()> {
        let dir = TempDir::new()?;
        let path = dir.path().join("precipitation_2015.csv");
        let breakdown = YearBreakdown {
            title: "Precipitation Types by Month (2015)".to_string(),
            year: "2015".to_string(),
            row_label: "month".to_string(),
            columns: vec!["rain".to_string(), "snow".to_string()],
            rows: vec![BreakdownRow {
                label: "January".to_string(),
                counts: vec![3, 1],
            }],
        };

        ArtifactWriter::new().write_breakdown(&breakdown, &path)?;

        let content = fs::read_to_string(&path)?;
        assert_eq!(content, "month,rain,snow\nJanuary,3,1\n");
        Ok(())
    }

    #[test]
    fn test_write_report_replaces_previous() -> Result<()> {
        let dir = TempDir::new()?;
        let path = dir.path().join("analysis_report.txt");
        let writer = ArtifactWriter::new();

        writer.write_report("first run\n", &path)?;
        writer.write_report("second run\n", &path)?;

        assert_eq!(fs::read_to_string(&path)?, "second run\n");
        Ok(())
    }
}
