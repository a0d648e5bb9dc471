pub mod feature_deriver;
pub mod imputer;
pub mod pipeline;

pub use feature_deriver::{parse_timestamp, FeatureDeriver};
pub use imputer::{Imputer, MissingValueReport};
pub use pipeline::{Pipeline, PipelineSummary};
