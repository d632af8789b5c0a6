use chrono::NaiveDate;
use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, ProcessingError>;

#[derive(Error, Debug)]
pub enum ProcessingError {
    #[error("File I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV export error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON export error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Cannot access input directory {}", .path.display())]
    DirectoryAccess {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Unrecognised date format: '{0}'")]
    InvalidDate(String),

    #[error(
        "Unparseable date '{value}' in {}:{line_number}\nerror at line={line}",
        .path.display()
    )]
    UnparseableDate {
        path: PathBuf,
        line_number: usize,
        value: String,
        line: String,
    },

    #[error(
        "National total decreased on {date}: previous={previous} current={current}"
    )]
    NonMonotonicTotal {
        date: NaiveDate,
        previous: u64,
        current: u64,
    },

    #[error("Cumulative total overflowed on {date}")]
    TotalOverflow { date: NaiveDate },

    #[error("Chart rendering error: {0}")]
    Chart(String),

    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("Validation error: {0}")]
    Validation(#[from] validator::ValidationErrors),

    #[error("Invalid data format: {0}")]
    InvalidFormat(String),
}
