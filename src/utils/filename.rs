use chrono::{Datelike, Local};
use std::path::{Path, PathBuf};

/// Path of a year breakdown table: `{output_dir}/{kind}_{year}.csv`
pub fn breakdown_filename(output_dir: &Path, kind: &str, year: &str) -> PathBuf {
    output_dir.join(format!("{}_{}.csv", kind, year))
}

/// Report filename stamped with today's date: `weather-report-{YYMMDD}.txt`
pub fn generate_dated_report_filename(output_dir: &Path) -> PathBuf {
    let now = Local::now();
    let year = now.year() % 100; // Get last 2 digits of year
    let month = now.month();
    let day = now.day();

    output_dir.join(format!(
        "weather-report-{:02}{:02}{:02}.txt",
        year, month, day
    ))
}
