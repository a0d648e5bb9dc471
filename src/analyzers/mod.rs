pub mod breakdown;
pub mod preview;
pub mod statistics;
pub mod weather_analyzer;

pub use breakdown::{available_years, BreakdownKind, BreakdownRow, YearBreakdown, YearQuery};
pub use preview::DataPreview;
pub use statistics::ColumnStatistics;
pub use weather_analyzer::{AnalysisReport, CategoryCounts, PairStatistic, WeatherAnalyzer};
