pub mod artifact_reader;
pub mod weather_reader;

pub use artifact_reader::ArtifactReader;
pub use weather_reader::WeatherReader;
