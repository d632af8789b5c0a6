/// Input defaults
pub const DEFAULT_INPUT_DIR: &str = "../fallzahlen_kanton_total_csv/";
pub const DEFAULT_FILE_SUFFIX: &str = "CH_total.csv";
pub const DEFAULT_BUFFER_SIZE: usize = 8192 * 16; // 128KB

/// Column positions in the canton total CSVs
pub const DATE_FIELD: usize = 0;
pub const REGION_FIELD: usize = 2;
pub const COUNT_FIELD: usize = 4;

/// 26 cantons plus the Principality of Liechtenstein
pub const DEFAULT_TOTAL_REGIONS: usize = 27;

/// Output defaults
pub const DEFAULT_OUTPUT_DIR: &str = "output";
pub const INCREASE_CHART_FILE: &str = "daily_increase.svg";
pub const TOTAL_CHART_FILE: &str = "cumulative_total.svg";
pub const DEFAULT_CHART_WIDTH: u32 = 1280;
pub const DEFAULT_CHART_HEIGHT: u32 = 720;

/// Environment variable prefix for settings
pub const ENV_PREFIX: &str = "COVID_RATE";

/// Export formats
pub const FORMAT_CSV: &str = "csv";
pub const FORMAT_JSON: &str = "json";
