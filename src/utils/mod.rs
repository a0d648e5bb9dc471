pub mod constants;
pub mod filename;
pub mod progress;

pub use constants::*;
pub use filename::{breakdown_filename, generate_dated_report_filename};
pub use progress::ProgressReporter;
