use std::fs::File;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use tracing::{debug, error, info};

use crate::analyzers::{AnalysisReport, BreakdownKind, DataPreview, WeatherAnalyzer, YearQuery};
use crate::cli::args::{Cli, Commands};
use crate::cli::menu::Menu;
use crate::config::PipelineConfig;
use crate::error::{ProcessingError, Result};
use crate::models::CleanedRecord;
use crate::processors::{FeatureDeriver, Imputer, Pipeline};
use crate::readers::{ArtifactReader, WeatherReader};
use crate::utils::filename::{breakdown_filename, generate_dated_report_filename};
use crate::utils::progress::ProgressReporter;
use crate::writers::ArtifactWriter;

pub fn run(cli: Cli) -> Result<()> {
    init_logging(&cli)?;

    let result = execute(cli);
    if let Err(ref e) = result {
        error!("{}", e);
    }
    result
}

fn init_logging(cli: &Cli) -> Result<()> {
    use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

    let log_level = cli.get_log_level();
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("weather_report={}", log_level)));

    let initialized = match &cli.log_file {
        Some(path) => {
            let file = File::create(path)?;
            tracing_subscriber::registry()
                .with(filter)
                .with(
                    fmt::layer()
                        .with_target(false)
                        .with_ansi(false)
                        .with_writer(Mutex::new(file)),
                )
                .try_init()
        }
        None => tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_level(true)
                    .with_writer(std::io::stderr)
                    .compact(),
            )
            .try_init(),
    };
    initialized.map_err(|e| ProcessingError::Config(format!("Logging setup failed: {}", e)))?;

    debug!("Logging initialized at level: {}", log_level);
    Ok(())
}

fn execute(cli: Cli) -> Result<()> {
    let config = PipelineConfig::load(cli.config.as_deref())?;
    let quiet = cli.quiet;

    match cli.command {
        Commands::Run {
            input_file,
            no_menu,
        } => {
            let config = match input_file {
                Some(path) => config.with_input_file(path),
                None => config,
            };
            println!("Preprocessing {}...", config.input_file.display());

            let progress = ProgressReporter::new_spinner("Preprocessing...", quiet);
            let summary = Pipeline::new(config.clone()).run(Some(&progress))?;
            progress.finish_with_message(&format!(
                "Preprocessed {} records",
                summary.cleaned.len()
            ));

            println!("\nMissing values before filling:");
            print!("{}", summary.missing_values.summary());
            println!("\n{}", summary.summary());

            if !no_menu {
                Menu::new(&config, &summary.cleaned).run()?;
            }
        }

        Commands::Derive {
            input_file,
            output_file,
        } => {
            let mut config = config;
            if let Some(path) = input_file {
                config = config.with_input_file(path);
            }
            if let Some(path) = output_file {
                config = config.with_filtered_file(path);
            }

            let progress = ProgressReporter::new_spinner("Deriving temporal features...", quiet);
            let raw = WeatherReader::new().read_records(&config.input_file)?;
            let derived = FeatureDeriver::new().derive_and_persist(&raw, &config)?;
            progress.finish_with_message(&format!(
                "Derived {} records into {}",
                derived.len(),
                config.filtered_file.display()
            ));
        }

        Commands::Impute {
            input_file,
            output_file,
        } => {
            let mut config = config;
            if let Some(path) = input_file {
                config = config.with_filtered_file(path);
            }
            if let Some(path) = output_file {
                config = config.with_filled_file(path);
            }

            let progress = ProgressReporter::new_spinner("Filling missing values...", quiet);
            let cleaned = Imputer::new().impute_from_artifact(&config)?;
            progress.finish_with_message(&format!(
                "Filled {} records into {}",
                cleaned.len(),
                config.filled_file.display()
            ));
        }

        Commands::Analyze {
            input_file,
            report_file,
            dated,
            json,
        } => {
            let mut config = config;
            if let Some(path) = input_file {
                config = config.with_filled_file(path);
            }
            if let Some(path) = report_file {
                config = config.with_report_file(path);
            } else if dated {
                let path = generate_dated_report_filename(&config.output_dir);
                config = config.with_report_file(path);
            }

            let records = load_cleaned(&config.filled_file, quiet)?;
            let report = analyze(&config, &records)?;

            if json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                println!("{}", report.render());
            }
        }

        Commands::Preview { input_file, rows } => {
            let config = preview_overrides(config, input_file, rows)?;
            let records = load_cleaned(&config.filled_file, quiet)?;
            println!("{}", preview(&config, &records));
        }

        Commands::Breakdown {
            year,
            kind,
            input_file,
            output_dir,
        } => {
            let mut config = config;
            if let Some(path) = input_file {
                config = config.with_filled_file(path);
            }
            if let Some(dir) = output_dir {
                config.output_dir = dir;
            }

            let records = load_cleaned(&config.filled_file, quiet)?;
            match YearQuery::resolve(&year, &records) {
                YearQuery::Found(year) => {
                    for text in breakdown(&config, &records, &year, &kind.kinds())? {
                        println!("{}", text);
                    }
                }
                YearQuery::Skip => info!("Year breakdown skipped"),
                other => return Err(ProcessingError::MissingData(other.to_string())),
            }
        }
    }

    Ok(())
}

fn preview_overrides(
    config: PipelineConfig,
    input_file: Option<PathBuf>,
    rows: Option<usize>,
) -> Result<PipelineConfig> {
    let mut config = config;
    if let Some(path) = input_file {
        config = config.with_filled_file(path);
    }
    if let Some(rows) = rows {
        config = config.with_preview_rows(rows);
    }
    config.validated()
}

fn load_cleaned(path: &Path, quiet: bool) -> Result<Vec<CleanedRecord>> {
    let progress = ProgressReporter::new_spinner("Loading filled table...", quiet);
    let records = ArtifactReader::new().read_cleaned(path)?;
    progress.finish_with_message(&format!("Loaded {} records", records.len()));
    Ok(records)
}

/// Build the analysis report and store its text form
pub(crate) fn analyze(config: &PipelineConfig, records: &[CleanedRecord]) -> Result<AnalysisReport> {
    let dataset = config.filled_file.display().to_string();
    let report = WeatherAnalyzer::new().analyze(records, &dataset)?;

    ArtifactWriter::new().write_report(&report.render(), &config.report_path())?;
    Ok(report)
}

/// Tabulate `year` for each kind, writing one CSV per table. Returns the printable tables.
pub(crate) fn breakdown(
    config: &PipelineConfig,
    records: &[CleanedRecord],
    year: &str,
    kinds: &[BreakdownKind],
) -> Result<Vec<String>> {
    let writer = ArtifactWriter::new();

    kinds
        .iter()
        .map(|kind| {
            let table = kind.build(records, year);
            let path = breakdown_filename(&config.output_dir, kind.file_stem(), year);
            writer.write_breakdown(&table, &path)?;
            Ok(table.render())
        })
        .collect()
}

pub(crate) fn preview(config: &PipelineConfig, records: &[CleanedRecord]) -> String {
    DataPreview::new(records, config.preview_rows).render()
}
