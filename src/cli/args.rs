use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use crate::analyzers::BreakdownKind;

#[derive(Parser)]
#[command(name = "weather-report")]
#[command(about = "Hourly weather observation preprocessing and analysis")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[arg(short, long, global = true, help = "Enable verbose logging")]
    pub verbose: bool,

    #[arg(short, long, global = true, help = "Only log warnings and errors")]
    pub quiet: bool,

    #[arg(long, global = true, help = "Log file path")]
    pub log_file: Option<PathBuf>,

    #[arg(
        short,
        long,
        global = true,
        help = "Settings file (TOML, JSON or YAML)"
    )]
    pub config: Option<PathBuf>,
}

impl Cli {
    pub fn get_log_level(&self) -> &'static str {
        if self.verbose {
            "debug"
        } else if self.quiet {
            "warn"
        } else {
            "info"
        }
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Preprocess the raw observations, then open the interactive menu
    Run {
        #[arg(short, long, help = "Raw observations CSV [default: EnglandWeather.csv]")]
        input_file: Option<PathBuf>,

        #[arg(long, help = "Stop after preprocessing")]
        no_menu: bool,
    },

    /// Derive temporal features and write the filtered table
    Derive {
        #[arg(short, long, help = "Raw observations CSV [default: EnglandWeather.csv]")]
        input_file: Option<PathBuf>,

        #[arg(short, long, help = "Filtered table [default: filtered_data.csv]")]
        output_file: Option<PathBuf>,
    },

    /// Fill missing values in the filtered table and write the filled table
    Impute {
        #[arg(short, long, help = "Filtered table [default: filtered_data.csv]")]
        input_file: Option<PathBuf>,

        #[arg(short, long, help = "Filled table [default: filled_data.csv]")]
        output_file: Option<PathBuf>,
    },

    /// Descriptive statistics, correlations and category counts
    Analyze {
        #[arg(short, long, help = "Filled table [default: filled_data.csv]")]
        input_file: Option<PathBuf>,

        #[arg(
            short,
            long,
            help = "Report file path [default: analysis_report.txt]"
        )]
        report_file: Option<PathBuf>,

        #[arg(long, help = "Name the report weather-report-{YYMMDD}.txt")]
        dated: bool,

        #[arg(long, help = "Print the report as JSON")]
        json: bool,
    },

    /// Show the first rows of the filled table
    Preview {
        #[arg(short, long, help = "Filled table [default: filled_data.csv]")]
        input_file: Option<PathBuf>,

        #[arg(short, long, help = "Number of rows [default: 10]")]
        rows: Option<usize>,
    },

    /// Tabulate one year by month and season
    Breakdown {
        #[arg(short, long)]
        year: String,

        #[arg(short, long, value_enum, default_value = "all")]
        kind: BreakdownSelection,

        #[arg(short, long, help = "Filled table [default: filled_data.csv]")]
        input_file: Option<PathBuf>,

        #[arg(short, long, help = "Directory for the tables [default: output]")]
        output_dir: Option<PathBuf>,
    },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum BreakdownSelection {
    Precipitation,
    Conditions,
    All,
}

impl BreakdownSelection {
    pub fn kinds(&self) -> Vec<BreakdownKind> {
        match self {
            BreakdownSelection::Precipitation => vec![BreakdownKind::Precipitation],
            BreakdownSelection::Conditions => vec![BreakdownKind::Conditions],
            BreakdownSelection::All => BreakdownKind::ALL.to_vec(),
        }
    }
}
