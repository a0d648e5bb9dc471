//! Pipeline configuration.
//!
//! Every stage receives a [`PipelineConfig`] instead of reading fixed file
//! names, so stages can be pointed at a scratch directory in tests.

use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;
use validator::Validate;

use crate::error::Result;
use crate::utils::constants::{
    DEFAULT_FILLED_FILE, DEFAULT_FILTERED_FILE, DEFAULT_INPUT_FILE, DEFAULT_OUTPUT_DIR,
    DEFAULT_PREVIEW_ROWS, DEFAULT_REPORT_FILE, ENV_PREFIX,
};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct PipelineConfig {
    /// Raw weather observations
    pub input_file: PathBuf,

    /// Derived table written by the feature deriver
    pub filtered_file: PathBuf,

    /// Imputed table written by the imputer
    pub filled_file: PathBuf,

    /// Directory for year breakdown tables
    pub output_dir: PathBuf,

    /// Analysis report destination
    #[serde(default)]
    pub report_file: Option<PathBuf>,

    #[validate(range(min = 1, max = 1000))]
    pub preview_rows: usize,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            input_file: PathBuf::from(DEFAULT_INPUT_FILE),
            filtered_file: PathBuf::from(DEFAULT_FILTERED_FILE),
            filled_file: PathBuf::from(DEFAULT_FILLED_FILE),
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            report_file: None,
            preview_rows: DEFAULT_PREVIEW_ROWS,
        }
    }
}

impl PipelineConfig {
    /// Load defaults, then an optional settings file, then `WEATHER_*`
    /// environment variables.
    pub fn load(settings_file: Option<&Path>) -> Result<Self> {
        let mut builder = Config::builder()
            .set_default("input_file", DEFAULT_INPUT_FILE)?
            .set_default("filtered_file", DEFAULT_FILTERED_FILE)?
            .set_default("filled_file", DEFAULT_FILLED_FILE)?
            .set_default("output_dir", DEFAULT_OUTPUT_DIR)?
            .set_default("preview_rows", DEFAULT_PREVIEW_ROWS as u64)?;

        if let Some(path) = settings_file {
            debug!("Reading settings from {}", path.display());
            builder = builder.add_source(File::from(path).required(true));
        }

        let config: PipelineConfig = builder
            .add_source(Environment::with_prefix(ENV_PREFIX))
            .build()?
            .try_deserialize()?;

        config.validated()
    }

    /// Re-check the field rules, e.g. after command line overrides
    pub fn validated(self) -> Result<Self> {
        self.validate()?;
        Ok(self)
    }

    /// Same file names as the defaults, rooted in `dir`
    pub fn in_dir(dir: &Path) -> Self {
        let defaults = Self::default();
        Self {
            input_file: dir.join(defaults.input_file),
            filtered_file: dir.join(defaults.filtered_file),
            filled_file: dir.join(defaults.filled_file),
            output_dir: dir.join(defaults.output_dir),
            report_file: Some(dir.join(DEFAULT_REPORT_FILE)),
            preview_rows: defaults.preview_rows,
        }
    }

    pub fn with_input_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.input_file = path.into();
        self
    }

    pub fn with_filtered_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.filtered_file = path.into();
        self
    }

    pub fn with_filled_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.filled_file = path.into();
        self
    }

    pub fn with_report_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.report_file = Some(path.into());
        self
    }

    pub fn with_preview_rows(mut self, rows: usize) -> Self {
        self.preview_rows = rows;
        self
    }

    pub fn report_path(&self) -> PathBuf {
        self.report_file
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_REPORT_FILE))
    }
}
