use crate::error::Result;
use crate::models::{RawRow, SourceFile};
use crate::utils::constants::DEFAULT_BUFFER_SIZE;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use tracing::debug;

/// Reads the data lines of one canton total CSV. Line 1 is the header.
#[derive(Debug, Default)]
pub struct CantonReader;

impl CantonReader {
    pub fn new() -> Self {
        Self
    }

    /// Read all data rows of a file; the handle is released on return.
    pub fn read_rows(&self, path: &Path) -> Result<SourceFile> {
        debug!("opening file {}", path.display());
        let file = File::open(path)?;
        let reader = BufReader::with_capacity(DEFAULT_BUFFER_SIZE, file);
        let rows = self.collect_rows(reader)?;
        Ok(SourceFile::new(path, rows))
    }

    /// Collect data rows from any buffered source.
    pub fn collect_rows<R: BufRead>(&self, reader: R) -> Result<Vec<RawRow>> {
        let mut rows = Vec::new();

        for (index, line_result) in reader.lines().enumerate() {
            let line = line_result?;
            let line_number = index + 1;

            if line_number == 1 {
                continue;
            }

            if line.trim().is_empty() {
                continue;
            }

            rows.push(RawRow::new(line_number, line));
        }

        Ok(rows)
    }
}
