use crate::models::{CleanedRecord, Month, Season};
use serde::Serialize;
use std::collections::BTreeSet;
use std::fmt;

/// Sorted distinct values of the `year` column
pub fn available_years(records: &[CleanedRecord]) -> Vec<String> {
    records
        .iter()
        .map(|r| r.year.clone())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// Outcome of matching user input against the `year` column
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum YearQuery {
    Skip,
    Invalid(String),
    NotFound { year: String, available: Vec<String> },
    Found(String),
}

impl YearQuery {
    pub fn resolve(input: &str, records: &[CleanedRecord]) -> Self {
        let input = input.trim();
        if input.eq_ignore_ascii_case("skip") {
            return YearQuery::Skip;
        }

        // Re-rendered so " 2015" and "+2015" match the stored text
        let year = match input.parse::<i32>() {
            Ok(year) => year.to_string(),
            Err(_) => return YearQuery::Invalid(input.to_string()),
        };

        if records.iter().any(|r| r.year == year) {
            YearQuery::Found(year)
        } else {
            YearQuery::NotFound {
                year,
                available: available_years(records),
            }
        }
    }
}

impl fmt::Display for YearQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            YearQuery::Skip => write!(f, "skipped"),
            YearQuery::Invalid(input) => {
                write!(f, "Invalid input '{}'. Please enter a valid year.", input)
            }
            YearQuery::NotFound { year, available } => write!(
                f,
                "Year {} not found. Available years: {}",
                year,
                available.join(", ")
            ),
            YearQuery::Found(year) => write!(f, "{}", year),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BreakdownKind {
    Precipitation,
    Conditions,
}

impl BreakdownKind {
    pub const ALL: [BreakdownKind; 2] = [BreakdownKind::Precipitation, BreakdownKind::Conditions];

    pub fn file_stem(&self) -> &'static str {
        match self {
            BreakdownKind::Precipitation => "precipitation",
            BreakdownKind::Conditions => "conditions",
        }
    }

    pub fn build(&self, records: &[CleanedRecord], year: &str) -> YearBreakdown {
        match self {
            BreakdownKind::Precipitation => YearBreakdown::precipitation_by_month(records, year),
            BreakdownKind::Conditions => YearBreakdown::conditions_by_season(records, year),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BreakdownRow {
    pub label: String,
    pub counts: Vec<usize>,
}

/// Hour counts for one year, cross-tabulated by two columns
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct YearBreakdown {
    pub title: String,
    pub year: String,
    pub row_label: String,
    pub columns: Vec<String>,
    pub rows: Vec<BreakdownRow>,
}

impl YearBreakdown {
    /// Hours per precipitation type for each month, January first
    pub fn precipitation_by_month(records: &[CleanedRecord], year: &str) -> Self {
        let in_year: Vec<&CleanedRecord> = records.iter().filter(|r| r.year == year).collect();

        let columns: Vec<String> = in_year
            .iter()
            .map(|r| r.precip_type.clone())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();

        let rows = Month::ALL
            .iter()
            .map(|month| BreakdownRow {
                label: month.name().to_string(),
                counts: columns
                    .iter()
                    .map(|precip| {
                        in_year
                            .iter()
                            .filter(|r| r.month == *month && &r.precip_type == precip)
                            .count()
                    })
                    .collect(),
            })
            .collect();

        Self {
            title: format!("Precipitation Types by Month ({})", year),
            year: year.to_string(),
            row_label: "month".to_string(),
            columns,
            rows,
        }
    }

    /// Hours per season for each weather condition, in order of first appearance
    pub fn conditions_by_season(records: &[CleanedRecord], year: &str) -> Self {
        let in_year: Vec<&CleanedRecord> = records.iter().filter(|r| r.year == year).collect();

        let mut conditions: Vec<&str> = Vec::new();
        for record in &in_year {
            let label = record.summary_label();
            if !conditions.contains(&label) {
                conditions.push(label);
            }
        }

        let rows = conditions
            .iter()
            .map(|condition| BreakdownRow {
                label: condition.to_string(),
                counts: Season::ALL
                    .iter()
                    .map(|season| {
                        in_year
                            .iter()
                            .filter(|r| r.season == *season && r.summary_label() == *condition)
                            .count()
                    })
                    .collect(),
            })
            .collect();

        Self {
            title: format!("Weather Conditions by Season ({})", year),
            year: year.to_string(),
            row_label: "Summary".to_string(),
            columns: Season::ALL.iter().map(|s| s.name().to_string()).collect(),
            rows,
        }
    }

    pub fn total(&self) -> usize {
        self.rows.iter().flat_map(|row| &row.counts).sum()
    }

    pub fn column_total(&self, column: &str) -> Option<usize> {
        let index = self.columns.iter().position(|c| c == column)?;
        Some(self.rows.iter().map(|row| row.counts[index]).sum())
    }

    pub fn row(&self, label: &str) -> Option<&BreakdownRow> {
        self.rows.iter().find(|row| row.label == label)
    }

    pub fn render(&self) -> String {
        let label_width = self
            .rows
            .iter()
            .map(|row| row.label.len())
            .chain(std::iter::once(self.row_label.len()))
            .max()
            .unwrap_or(0);
        let widths: Vec<usize> = self.columns.iter().map(|c| c.len().max(6)).collect();

        let mut output = format!("{}\n", self.title);
        output.push_str(&format!("{:<width$}", self.row_label, width = label_width));
        for (column, width) in self.columns.iter().zip(&widths) {
            output.push_str(&format!("  {:>width$}", column, width = width));
        }
        output.push('\n');

        for row in &self.rows {
            output.push_str(&format!("{:<width$}", row.label, width = label_width));
            for (count, width) in row.counts.iter().zip(&widths) {
                output.push_str(&format!("  {:>width$}", count, width = width));
            }
            output.push('\n');
        }

        output.push_str(&format!("Total hours: {}\n", self.total()));
        output
    }
}
