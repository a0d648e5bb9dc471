use crate::models::CleanedRecord;
use crate::utils::constants::ARTIFACT_COLUMNS;

/// The head of a cleaned table, ready to print
#[derive(Debug, Clone, PartialEq)]
pub struct DataPreview {
    pub total_records: usize,
    pub columns: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl DataPreview {
    pub fn new(records: &[CleanedRecord], rows: usize) -> Self {
        Self {
            total_records: records.len(),
            columns: ARTIFACT_COLUMNS.iter().map(|c| c.to_string()).collect(),
            rows: records.iter().take(rows).map(cells).collect(),
        }
    }

    pub fn render(&self) -> String {
        let widths: Vec<usize> = self
            .columns
            .iter()
            .enumerate()
            .map(|(i, column)| {
                self.rows
                    .iter()
                    .map(|row| row[i].len())
                    .chain(std::iter::once(column.len()))
                    .max()
                    .unwrap_or(0)
            })
            .collect();

        let mut output = format!(
            "First {} rows of {} records:\n\n",
            self.rows.len(),
            self.total_records
        );
        output.push_str(&line(&self.columns, &widths));
        for row in &self.rows {
            output.push_str(&line(row, &widths));
        }

        output.push_str(&format!("\nColumns: {}\n", self.columns.join(", ")));
        output
    }
}

fn cells(record: &CleanedRecord) -> Vec<String> {
    vec![
        record.date.format("%Y-%m-%d").to_string(),
        record.time.format("%H:%M:%S").to_string(),
        record.year.clone(),
        record.month.to_string(),
        record.hour.to_string(),
        record.season.to_string(),
        record.summary_label().to_string(),
        record.precip_type.clone(),
        format!("{:.2}", record.temperature),
        format!("{:.2}", record.wind_speed),
        format!("{:.2}", record.pressure),
        format!("{:.1}", record.humidity_percent),
    ]
}

fn line(cells: &[String], widths: &[usize]) -> String {
    let mut output = cells
        .iter()
        .zip(widths)
        .map(|(cell, width)| format!("{:<width$}", cell, width = width))
        .collect::<Vec<_>>()
        .join("  ");
    output.truncate(output.trim_end().len());
    output.push('\n');
    output
}
