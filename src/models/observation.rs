use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::utils::constants::{COUNT_FIELD, DATE_FIELD, REGION_FIELD};

/// One cumulative-count report of one region on one date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Observation {
    pub region: String,
    pub date: NaiveDate,
    pub cumulative_count: u64,
}

impl Observation {
    pub fn new(region: impl Into<String>, date: NaiveDate, cumulative_count: u64) -> Self {
        Self {
            region: region.into(),
            date,
            cumulative_count,
        }
    }
}

/// Why a row was not turned into an observation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    /// Fewer fields than the count column needs.
    MissingCount,
    /// Count field is blank or not a non-negative integer.
    NonNumericCount(String),
}

/// Result of parsing a single data row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RowOutcome {
    Observation(Observation),
    Skip(SkipReason),
}

/// A data line as read from disk, before any field is interpreted.
///
/// Fields are split naively on `,`; quoted fields containing commas are
/// not supported.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawRow {
    pub line_number: usize,
    pub line: String,
}

impl RawRow {
    pub fn new(line_number: usize, line: impl Into<String>) -> Self {
        Self {
            line_number,
            line: line.into(),
        }
    }

    pub fn date_field(&self) -> Option<&str> {
        self.line.split(',').nth(DATE_FIELD)
    }

    pub fn region_field(&self) -> Option<&str> {
        self.line.split(',').nth(REGION_FIELD)
    }

    pub fn count_field(&self) -> Option<&str> {
        self.line.split(',').nth(COUNT_FIELD)
    }
}

/// All data rows of one input file, in line order.
#[derive(Debug, Clone)]
pub struct SourceFile {
    pub path: PathBuf,
    pub rows: Vec<RawRow>,
}

impl SourceFile {
    pub fn new(path: impl Into<PathBuf>, rows: Vec<RawRow>) -> Self {
        Self {
            path: path.into(),
            rows,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn file_name(&self) -> String {
        self.path
            .file_name()
            .map(|f| f.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.path.display().to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_raw_row_fields() {
        let row = RawRow::new(
            2,
            "2020-02-27,13:00,BS,2,1,0,,,,,https://www.coronavirus.bs.ch",
        );

        assert_eq!(row.date_field(), Some("2020-02-27"));
        assert_eq!(row.region_field(), Some("BS"));
        assert_eq!(row.count_field(), Some("1"));
    }

    #[test]
    fn test_short_row_has_no_count_field() {
        let row = RawRow::new(3, "2020-02-27,13:00,BS");

        assert_eq!(row.region_field(), Some("BS"));
        assert_eq!(row.count_field(), None);
    }

    #[test]
    fn test_source_file_name() {
        let file = SourceFile::new("/data/COVID19_Fallzahlen_Kanton_ZH_total.csv", vec![]);
        assert_eq!(file.file_name(), "COVID19_Fallzahlen_Kanton_ZH_total.csv");
    }
}
