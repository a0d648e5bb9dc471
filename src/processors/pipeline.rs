use crate::config::PipelineConfig;
use crate::error::Result;
use crate::models::CleanedRecord;
use crate::processors::imputer::MissingValueReport;
use crate::processors::{FeatureDeriver, Imputer};
use crate::readers::WeatherReader;
use crate::utils::progress::ProgressReporter;
use tracing::info;

/// Outcome of a full preprocessing run
#[derive(Debug)]
pub struct PipelineSummary {
    pub raw_records: usize,
    pub derived_records: usize,
    pub missing_values: MissingValueReport,
    pub cleaned: Vec<CleanedRecord>,
}

impl PipelineSummary {
    pub fn summary(&self) -> String {
        format!(
            "Raw records: {}\n\
            Derived records: {}\n\
            Missing values filled: {}\n\
            Cleaned records: {}",
            self.raw_records,
            self.derived_records,
            self.missing_values.total(),
            self.cleaned.len()
        )
    }
}

/// Runs load → derive → impute, persisting both intermediate tables.
pub struct Pipeline {
    config: PipelineConfig,
    reader: WeatherReader,
    deriver: FeatureDeriver,
    imputer: Imputer,
}

impl Pipeline {
    pub fn new(config: PipelineConfig) -> Self {
        Self {
            config,
            reader: WeatherReader::new(),
            deriver: FeatureDeriver::new(),
            imputer: Imputer::new(),
        }
    }

    pub fn run(&self, progress: Option<&ProgressReporter>) -> Result<PipelineSummary> {
        let step = |message: &str| {
            if let Some(progress) = progress {
                progress.set_message(message);
            }
        };

        step("Loading raw observations...");
        let raw = self.reader.read_records(&self.config.input_file)?;

        step("Deriving temporal features...");
        let derived = self.deriver.derive_and_persist(&raw, &self.config)?;
        let missing_values = self.imputer.missing_report(&derived);

        // The imputer reads the persisted table, as a resumed run would
        step("Filling missing values...");
        let cleaned = self.imputer.impute_from_artifact(&self.config)?;

        info!(
            "Preprocessing complete: {} raw records, {} cleaned",
            raw.len(),
            cleaned.len()
        );

        Ok(PipelineSummary {
            raw_records: raw.len(),
            derived_records: derived.len(),
            missing_values,
            cleaned,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ProcessingError;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_run_end_to_end() -> Result<()> {
        let dir = TempDir::new()?;
        let config = PipelineConfig::in_dir(dir.path());
        fs::write(
            &config.input_file,
            "Formatted Date,Summary,Precip Type,Temperature (C),Wind Speed (km/h),Pressure (millibars),Humidity\n\
             2015-03-15T11:00:00+00:00,Clear,,30.0,5.0,1012.0,0.5\n\
             2015-03-15T10:00:00+00:00,Clear,snow,10.0,,1010.0,0.7\n\
             2015-03-15T12:00:00+00:00,Foggy,rain,,7.0,1014.0,0.9\n",
        )?;

        let summary = Pipeline::new(config.clone()).run(None)?;

        assert_eq!(summary.raw_records, 3);
        assert_eq!(summary.derived_records, 3);
        assert_eq!(summary.missing_values.total(), 3);
        assert!(config.filtered_file.exists());
        assert!(config.filled_file.exists());

        let cleaned = &summary.cleaned;
        assert_eq!(cleaned[0].hour, 10);
        assert_eq!(cleaned[0].precip_type, "snow");
        assert_eq!(cleaned[0].wind_speed, 6.0);
        assert_eq!(cleaned[1].precip_type, "rain");
        assert_eq!(cleaned[2].temperature, 20.0);
        Ok(())
    }

    #[test]
    fn test_missing_input_is_not_found() {
        let dir = TempDir::new().unwrap();
        let config = PipelineConfig::in_dir(dir.path());

        let err = Pipeline::new(config.clone()).run(None).unwrap_err();

        assert!(matches!(err, ProcessingError::NotFound { .. }));
        assert!(!config.filtered_file.exists());
    }
}
