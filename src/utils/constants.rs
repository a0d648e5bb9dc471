/// Input column names
pub const COL_FORMATTED_DATE: &str = "Formatted Date";
pub const COL_SUMMARY: &str = "Summary";
pub const COL_PRECIP_TYPE: &str = "Precip Type";
pub const COL_TEMPERATURE: &str = "Temperature (C)";
pub const COL_WIND_SPEED: &str = "Wind Speed (km/h)";
pub const COL_PRESSURE: &str = "Pressure (millibars)";
pub const COL_HUMIDITY: &str = "Humidity";

/// Derived column names
pub const COL_DATE: &str = "date";
pub const COL_TIME: &str = "time";
pub const COL_YEAR: &str = "year";
pub const COL_MONTH: &str = "month";
pub const COL_HOUR: &str = "hour";
pub const COL_SEASON: &str = "season";
pub const COL_HUMIDITY_PERCENT: &str = "Humidity(%)";

/// Columns every input file must carry
pub const REQUIRED_INPUT_COLUMNS: [&str; 7] = [
    COL_FORMATTED_DATE,
    COL_SUMMARY,
    COL_PRECIP_TYPE,
    COL_TEMPERATURE,
    COL_WIND_SPEED,
    COL_PRESSURE,
    COL_HUMIDITY,
];

/// Column order of both persisted artifacts
pub const ARTIFACT_COLUMNS: [&str; 12] = [
    COL_DATE,
    COL_TIME,
    COL_YEAR,
    COL_MONTH,
    COL_HOUR,
    COL_SEASON,
    COL_SUMMARY,
    COL_PRECIP_TYPE,
    COL_TEMPERATURE,
    COL_WIND_SPEED,
    COL_PRESSURE,
    COL_HUMIDITY_PERCENT,
];

/// Numeric columns with the description used in reports
pub const NUMERIC_COLUMNS: [(&str, &str); 4] = [
    (COL_TEMPERATURE, "Ambient Temperature"),
    (COL_WIND_SPEED, "Wind Velocity"),
    (COL_PRESSURE, "Atmospheric Pressure"),
    (COL_HUMIDITY_PERCENT, "Relative Humidity"),
];

/// Cell contents treated as missing in the raw input
pub const NA_TOKENS: [&str; 19] = [
    "", "#N/A", "#N/A N/A", "#NA", "-NaN", "-nan", "1.#IND", "1.#QNAN", "<NA>", "N/A", "NA",
    "NULL", "NaN", "None", "n/a", "nan", "null", "-1.#IND", "-1.#QNAN",
];

/// Fill value for missing precipitation types
pub const DEFAULT_PRECIP_TYPE: &str = "rain";

/// Default file names
pub const DEFAULT_INPUT_FILE: &str = "EnglandWeather.csv";
pub const DEFAULT_FILTERED_FILE: &str = "filtered_data.csv";
pub const DEFAULT_FILLED_FILE: &str = "filled_data.csv";
pub const DEFAULT_OUTPUT_DIR: &str = "output";
pub const DEFAULT_REPORT_FILE: &str = "analysis_report.txt";

/// Processing defaults
pub const DEFAULT_BUFFER_SIZE: usize = 8192 * 16; // 128KB

/// Reporting defaults
pub const DEFAULT_PREVIEW_ROWS: usize = 10;
pub const REPORT_WIDTH: usize = 70;

/// Environment variable prefix for configuration overrides
pub const ENV_PREFIX: &str = "WEATHER";
