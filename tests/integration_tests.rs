use std::fs;

use pretty_assertions::assert_eq;
use tempfile::TempDir;
use weather_report::analyzers::{BreakdownKind, WeatherAnalyzer, YearQuery};
use weather_report::config::PipelineConfig;
use weather_report::models::{EnrichedRecord, Month, Season};
use weather_report::processors::{FeatureDeriver, Imputer, Pipeline};
use weather_report::readers::{ArtifactReader, WeatherReader};
use weather_report::writers::ArtifactWriter;
use weather_report::{ProcessingError, Result};

const HEADER: &str = "Formatted Date,Summary,Precip Type,Temperature (C),Apparent Temperature (C),Humidity,Wind Speed (km/h),Wind Bearing (degrees),Visibility (km),Pressure (millibars),Daily Summary";

fn write_input(dir: &TempDir, rows: &[&str]) -> PipelineConfig {
    let config = PipelineConfig::in_dir(dir.path());
    let mut content = format!("{}\n", HEADER);
    for row in rows {
        content.push_str(row);
        content.push('\n');
    }
    fs::write(&config.input_file, content).expect("write input");
    config
}

fn sample_rows() -> Vec<&'static str> {
    vec![
        "2006-04-01 00:00:00.000 +0200,Partly Cloudy,rain,9.47,7.38,0.89,14.11,251,15.82,1015.13,Partly cloudy throughout the day.",
        "2006-03-31 23:00:00.000 +0200,Mostly Cloudy,,,7.22,0.86,14.26,259,15.82,1015.63,Partly cloudy throughout the day.",
        "2006-12-31 22:00:00.000 +0100,Overcast,snow,-1.0,-4.0,0.95,,200,5.0,,Foggy overnight.",
        "2007-07-15 12:00:00.000 +0200,Clear,rain,21.5,21.5,0.40,8.0,180,16.1,1020.0,Clear throughout the day.",
    ]
}

#[test]
fn test_pipeline_end_to_end() -> Result<()> {
    let dir = TempDir::new()?;
    let config = write_input(&dir, &sample_rows());

    let summary = Pipeline::new(config.clone()).run(None)?;

    assert_eq!(summary.raw_records, 4);
    assert_eq!(summary.cleaned.len(), 4);
    assert_eq!(summary.missing_values.count("Precip Type"), Some(1));
    assert!(config.filtered_file.exists());
    assert!(config.filled_file.exists());

    // Sorted by UTC instant: 21:00, 22:00 on 2006-03-31, then December, then July
    let hours: Vec<u32> = summary.cleaned.iter().map(|r| r.hour).collect();
    assert_eq!(hours, vec![21, 22, 21, 10]);
    assert_eq!(summary.cleaned[0].month, Month::March);
    assert_eq!(summary.cleaned[2].season, Season::Winter);

    // Missing temperature filled with the mean of the three present values
    let mean = (9.47 + -1.0 + 21.5) / 3.0;
    assert!((summary.cleaned[0].temperature - mean).abs() < 1e-9);
    assert_eq!(summary.cleaned[0].precip_type, "rain");

    let reloaded = ArtifactReader::new().read_cleaned(&config.filled_file)?;
    assert_eq!(reloaded, summary.cleaned);
    Ok(())
}

#[test]
fn test_reference_observation() -> Result<()> {
    let dir = TempDir::new()?;
    let config = PipelineConfig::in_dir(dir.path());
    fs::write(
        &config.input_file,
        "Formatted Date,Summary,Precip Type,Temperature (C),Wind Speed (km/h),Pressure (millibars),Humidity\n\
         2015-03-15T10:00:00+00:00,Clear,,10.0,5.0,1012.0,0.5\n",
    )?;

    let raw = WeatherReader::new().read_records(&config.input_file)?;
    let derived = FeatureDeriver::new().derive(&raw)?;

    assert_eq!(derived[0].month, Month::March);
    assert_eq!(derived[0].season, Season::Spring);
    assert_eq!(derived[0].hour, 10);
    assert_eq!(derived[0].humidity_percent, Some(50.0));

    let cleaned = Imputer::new().impute(&derived)?;
    assert_eq!(cleaned[0].precip_type, "rain");
    Ok(())
}

#[test]
fn test_artifact_round_trip_matches_in_memory() -> Result<()> {
    let dir = TempDir::new()?;
    let config = write_input(&dir, &sample_rows());

    let raw = WeatherReader::new().read_records(&config.input_file)?;
    let derived = FeatureDeriver::new().derive(&raw)?;
    let in_memory = Imputer::new().impute(&derived)?;

    ArtifactWriter::new().write_enriched(&derived, &config.filtered_file)?;
    let reloaded = ArtifactReader::new().read_enriched(&config.filtered_file)?;
    assert_eq!(reloaded, derived);
    assert_eq!(Imputer::new().impute(&reloaded)?, in_memory);
    Ok(())
}

#[test]
fn test_imputing_a_clean_table_is_identity() -> Result<()> {
    let dir = TempDir::new()?;
    let config = write_input(&dir, &sample_rows());

    let cleaned = Pipeline::new(config).run(None)?.cleaned;
    let again: Vec<EnrichedRecord> = cleaned.iter().cloned().map(EnrichedRecord::from).collect();

    assert_eq!(Imputer::new().impute(&again)?, cleaned);
    Ok(())
}

#[test]
fn test_missing_input_is_not_found() -> Result<()> {
    let dir = TempDir::new()?;
    let config = PipelineConfig::in_dir(dir.path());

    let err = Pipeline::new(config.clone()).run(None).unwrap_err();

    assert!(matches!(err, ProcessingError::NotFound { .. }));
    assert!(!config.filtered_file.exists());
    Ok(())
}

#[test]
fn test_impute_without_filtered_table_is_not_found() -> Result<()> {
    let dir = TempDir::new()?;
    let config = PipelineConfig::in_dir(dir.path());

    let err = Imputer::new().impute_from_artifact(&config).unwrap_err();
    assert!(matches!(err, ProcessingError::NotFound { .. }));
    Ok(())
}

#[test]
fn test_missing_column_is_schema_error() -> Result<()> {
    let dir = TempDir::new()?;
    let config = PipelineConfig::in_dir(dir.path());
    fs::write(
        &config.input_file,
        "Formatted Date,Summary,Temperature (C),Wind Speed (km/h),Pressure (millibars),Humidity\n\
         2015-03-15T10:00:00+00:00,Clear,10.0,5.0,1012.0,0.5\n",
    )?;

    let err = Pipeline::new(config).run(None).unwrap_err();
    assert!(matches!(err, ProcessingError::Schema { .. }));
    Ok(())
}

#[test]
fn test_bad_timestamp_writes_nothing() -> Result<()> {
    let dir = TempDir::new()?;
    let config = write_input(
        &dir,
        &["yesterday,Clear,rain,9.47,7.38,0.89,14.11,251,15.82,1015.13,Clear."],
    );

    let err = Pipeline::new(config.clone()).run(None).unwrap_err();

    assert!(matches!(err, ProcessingError::Schema { .. }));
    assert!(!config.filtered_file.exists());
    assert!(!config.filled_file.exists());
    Ok(())
}

#[test]
fn test_analysis_and_breakdowns_from_filled_table() -> Result<()> {
    let dir = TempDir::new()?;
    let config = write_input(&dir, &sample_rows());
    Pipeline::new(config.clone()).run(None)?;

    let report = WeatherAnalyzer::new().analyze_file(&config.filled_file)?;
    assert_eq!(report.total_records, 4);
    assert_eq!(report.descriptive.len(), 4);
    assert_eq!(report.correlations.len(), 6);

    let records = ArtifactReader::new().read_cleaned(&config.filled_file)?;
    assert_eq!(
        YearQuery::resolve("1990", &records),
        YearQuery::NotFound {
            year: "1990".to_string(),
            available: vec!["2006".to_string(), "2007".to_string()],
        }
    );

    let year = match YearQuery::resolve("2006", &records) {
        YearQuery::Found(year) => year,
        other => panic!("unexpected {:?}", other),
    };
    let precipitation = BreakdownKind::Precipitation.build(&records, &year);
    assert_eq!(precipitation.total(), 3);
    assert_eq!(precipitation.row("March").map(|r| r.counts.clone()), Some(vec![2, 0]));

    let path = config.output_dir.join("precipitation_2006.csv");
    ArtifactWriter::new().write_breakdown(&precipitation, &path)?;
    let content = fs::read_to_string(&path)?;
    assert!(content.starts_with("month,rain,snow\nJanuary,0,0\n"));
    Ok(())
}
