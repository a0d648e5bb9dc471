use dialoguer::{theme::ColorfulTheme, Input, Select};
use tracing::info;

use crate::analyzers::{BreakdownKind, YearQuery};
use crate::cli::commands::{analyze, breakdown, preview};
use crate::config::PipelineConfig;
use crate::error::Result;
use crate::models::CleanedRecord;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    Analyze,
    YearBreakdown,
    Preview,
    Exit,
}

impl MenuChoice {
    pub const ALL: [MenuChoice; 4] = [
        MenuChoice::Analyze,
        MenuChoice::YearBreakdown,
        MenuChoice::Preview,
        MenuChoice::Exit,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            MenuChoice::Analyze => "Analyze the data",
            MenuChoice::YearBreakdown => "Break down one year",
            MenuChoice::Preview => "Preview the data",
            MenuChoice::Exit => "Exit",
        }
    }
}

/// Interactive loop over an already cleaned table
pub struct Menu<'a> {
    config: &'a PipelineConfig,
    records: &'a [CleanedRecord],
    theme: ColorfulTheme,
}

impl<'a> Menu<'a> {
    pub fn new(config: &'a PipelineConfig, records: &'a [CleanedRecord]) -> Self {
        Self {
            config,
            records,
            theme: ColorfulTheme::default(),
        }
    }

    pub fn run(&self) -> Result<()> {
        let labels: Vec<&str> = MenuChoice::ALL.iter().map(MenuChoice::label).collect();

        loop {
            let selection = Select::with_theme(&self.theme)
                .with_prompt("Weather Data Analysis Menu")
                .items(&labels)
                .default(0)
                .interact()?;

            match MenuChoice::ALL[selection] {
                MenuChoice::Analyze => {
                    let report = analyze(self.config, self.records)?;
                    println!("{}", report.render());
                }
                MenuChoice::YearBreakdown => {
                    if let Some(year) = self.prompt_year()? {
                        for table in breakdown(self.config, self.records, &year, &BreakdownKind::ALL)? {
                            println!("{}", table);
                        }
                    }
                }
                MenuChoice::Preview => println!("{}", preview(self.config, self.records)),
                MenuChoice::Exit => {
                    info!("Exiting menu");
                    return Ok(());
                }
            }
        }
    }

    /// Ask until the answer names a year present in the table, or is `skip`
    fn prompt_year(&self) -> Result<Option<String>> {
        loop {
            let input: String = Input::with_theme(&self.theme)
                .with_prompt("Enter a year (or 'skip')")
                .interact_text()?;

            match YearQuery::resolve(&input, self.records) {
                YearQuery::Found(year) => return Ok(Some(year)),
                YearQuery::Skip => return Ok(None),
                rejected => println!("{}", rejected),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_menu_order() {
        assert_eq!(MenuChoice::ALL[0], MenuChoice::Analyze);
        assert_eq!(MenuChoice::ALL[3], MenuChoice::Exit);
        assert_eq!(MenuChoice::Exit.label(), "Exit");
    }
}
