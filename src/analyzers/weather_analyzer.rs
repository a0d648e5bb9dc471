use crate::analyzers::statistics::{correlation, covariance, ColumnStatistics};
use crate::error::{ProcessingError, Result};
use crate::models::{CleanedRecord, Season};
use crate::readers::ArtifactReader;
use crate::utils::constants::{NUMERIC_COLUMNS, REPORT_WIDTH};
use chrono::Local;
use serde::Serialize;
use std::collections::HashMap;
use std::path::Path;
use tracing::debug;

#[derive(Debug, Clone, Serialize)]
pub struct PairStatistic {
    pub first: String,
    pub second: String,
    pub value: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct CategoryCounts {
    pub title: String,
    pub counts: Vec<(String, usize)>,
}

impl CategoryCounts {
    /// Count labels, largest count first, ties alphabetically
    pub fn tally<'a>(title: &str, labels: impl Iterator<Item = &'a str>) -> Self {
        let mut counts: HashMap<&str, usize> = HashMap::new();
        for label in labels {
            *counts.entry(label).or_default() += 1;
        }

        let mut counts: Vec<(String, usize)> = counts
            .into_iter()
            .map(|(label, count)| (label.to_string(), count))
            .collect();
        counts.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));

        Self {
            title: title.to_string(),
            counts,
        }
    }

    pub fn count(&self, label: &str) -> Option<usize> {
        self.counts
            .iter()
            .find(|(name, _)| name == label)
            .map(|(_, count)| *count)
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct AnalysisReport {
    pub generated: String,
    pub dataset: String,
    pub total_records: usize,
    pub descriptive: Vec<ColumnStatistics>,
    pub correlations: Vec<PairStatistic>,
    pub covariances: Vec<PairStatistic>,
    pub categories: Vec<CategoryCounts>,
    /// Temperature spread per season, seasons without records left out
    pub seasonal_temperature: Vec<ColumnStatistics>,
}

pub struct WeatherAnalyzer;

impl WeatherAnalyzer {
    pub fn new() -> Self {
        Self
    }

    /// Analyze the imputed table stored at `path`
    pub fn analyze_file(&self, path: &Path) -> Result<AnalysisReport> {
        let records = ArtifactReader::new().read_cleaned(path)?;
        self.analyze(&records, &path.display().to_string())
    }

    pub fn analyze(&self, records: &[CleanedRecord], dataset: &str) -> Result<AnalysisReport> {
        if records.is_empty() {
            return Err(ProcessingError::MissingData(
                "No records to analyze".to_string(),
            ));
        }

        let columns: Vec<(&str, &str, Vec<f64>)> = NUMERIC_COLUMNS
            .iter()
            .map(|(name, description)| {
                let values = records.iter().filter_map(|r| r.numeric(name)).collect();
                (*name, *description, values)
            })
            .collect();

        let descriptive = columns
            .iter()
            .map(|(name, description, values)| {
                ColumnStatistics::from_values(format!("{} ({})", name, description), values)
            })
            .collect();

        let mut correlations = Vec::new();
        let mut covariances = Vec::new();
        for (i, (first, _, x)) in columns.iter().enumerate() {
            for (second, _, y) in columns.iter().skip(i + 1) {
                correlations.push(PairStatistic {
                    first: first.to_string(),
                    second: second.to_string(),
                    value: correlation(x, y),
                });
                covariances.push(PairStatistic {
                    first: first.to_string(),
                    second: second.to_string(),
                    value: covariance(x, y),
                });
            }
        }

        let categories = vec![
            CategoryCounts::tally(
                "Weather Conditions Distribution",
                records.iter().map(|r| r.summary_label()),
            ),
            CategoryCounts::tally(
                "Precipitation Types Distribution",
                records.iter().map(|r| r.precip_type.as_str()),
            ),
            CategoryCounts::tally(
                "Seasonal Distribution",
                records.iter().map(|r| r.season.name()),
            ),
        ];

        let seasonal_temperature = Season::ALL
            .iter()
            .filter_map(|season| {
                let temperatures: Vec<f64> = records
                    .iter()
                    .filter(|r| r.season == *season)
                    .map(|r| r.temperature)
                    .collect();
                (!temperatures.is_empty())
                    .then(|| ColumnStatistics::from_values(season.name(), &temperatures))
            })
            .collect();

        debug!("Analyzed {} records", records.len());

        Ok(AnalysisReport {
            generated: Local::now().format("%Y-%m-%d %H:%M").to_string(),
            dataset: dataset.to_string(),
            total_records: records.len(),
            descriptive,
            correlations,
            covariances,
            categories,
            seasonal_temperature,
        })
    }
}

impl Default for WeatherAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

fn rule() -> String {
    "=".repeat(REPORT_WIDTH)
}

fn number_row(label: &str, value: f64) -> String {
    format!("{:<20} {:>20.4}\n", label, value)
}

impl AnalysisReport {
    pub fn summary(&self) -> String {
        format!(
            "WEATHER DATA ANALYSIS REPORT\n\
            Generated: {}\n\
            Dataset: {}\n\
            Total Records: {}\n",
            self.generated, self.dataset, self.total_records
        )
    }

    pub fn render_statistics(stats: &ColumnStatistics) -> String {
        let mut output = format!("\n{}\n", rule());
        output.push_str(&format!("{:<20} {:<50}\n", "Statistic", stats.variable));
        output.push_str(&format!("{}\n", rule()));

        output.push_str(&format!("{:<20} {:>20}\n", "Count", stats.count));
        output.push_str(&number_row("Mean", stats.mean));
        output.push_str(&number_row("Median", stats.median));
        output.push_str(&number_row("Std Dev", stats.std_dev));
        output.push_str(&number_row("Variance", stats.variance));
        output.push_str(&number_row("Min", stats.min));
        output.push_str(&number_row("Max", stats.max));
        match stats.mode {
            Some(mode) => output.push_str(&number_row("Mode", mode)),
            None => output.push_str(&format!("{:<20} {:>20}\n", "Mode", "N/A")),
        }
        output.push_str(&number_row("25th Percentile", stats.percentile_25));
        output.push_str(&number_row("75th Percentile", stats.percentile_75));

        output.push_str(&format!("{}\n", rule()));
        output
    }

    fn render_pairs(title: &str, pairs: &[PairStatistic], width: usize) -> String {
        let mut output = format!("\n{}\n{}\n{}\n\n", rule(), title, rule());
        for pair in pairs {
            output.push_str(&format!(
                "{:<25} vs {:<25} : {:>width$.4}\n",
                pair.first,
                pair.second,
                pair.value,
                width = width
            ));
        }
        output.push_str(&format!("{}\n", rule()));
        output
    }

    fn render_seasonal_temperature(&self) -> String {
        let mut output = format!(
            "\n{}\nTEMPERATURE DISTRIBUTION BY SEASON\n{}\n\n",
            rule(),
            rule()
        );
        output.push_str(&format!(
            "{:<8} {:>7} {:>8} {:>8} {:>8} {:>8} {:>8} {:>8}\n",
            "Season", "Count", "Mean", "Min", "25%", "Median", "75%", "Max"
        ));
        for stats in &self.seasonal_temperature {
            output.push_str(&format!(
                "{:<8} {:>7} {:>8.2} {:>8.2} {:>8.2} {:>8.2} {:>8.2} {:>8.2}\n",
                stats.variable,
                stats.count,
                stats.mean,
                stats.min,
                stats.percentile_25,
                stats.median,
                stats.percentile_75,
                stats.max
            ));
        }
        output.push_str(&format!("{}\n", rule()));
        output
    }

    pub fn render(&self) -> String {
        let mut output = self.summary();

        output.push_str("\n\nDESCRIPTIVE STATISTICS\n");
        for stats in &self.descriptive {
            output.push_str(&Self::render_statistics(stats));
        }

        output.push_str(&Self::render_pairs("CORRELATION ANALYSIS", &self.correlations, 8));
        output.push_str(&Self::render_pairs("COVARIANCE ANALYSIS", &self.covariances, 12));
        output.push_str(&self.render_seasonal_temperature());

        output.push_str(&format!(
            "\n{}\nCATEGORICAL VARIABLE SUMMARY\n{}\n\n",
            rule(),
            rule()
        ));
        for category in &self.categories {
            output.push_str(&format!("{}:\n", category.title));
            for (label, count) in &category.counts {
                output.push_str(&format!("{:<30} {:>10}\n", label, count));
            }
            output.push('\n');
        }
        output.push_str(&format!("{}\n", rule()));

        output
    }
}
