pub mod calendar;
pub mod cleaned;
pub mod enriched;
pub mod raw;

pub use calendar::{Month, Season, MONTH_NAMES, SEASON_BY_MONTH};
pub use cleaned::CleanedRecord;
pub use enriched::{EnrichedRecord, EnrichedRecordBuilder};
pub use raw::RawWeatherRecord;
