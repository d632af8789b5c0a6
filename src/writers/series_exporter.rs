use crate::error::{ProcessingError, Result};
use crate::models::AggregatedSeries;
use crate::utils::constants::{FORMAT_CSV, FORMAT_JSON};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use std::str::FromStr;
use tracing::info;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Csv,
    Json,
}

impl FromStr for ExportFormat {
    type Err = ProcessingError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            FORMAT_CSV => Ok(ExportFormat::Csv),
            FORMAT_JSON => Ok(ExportFormat::Json),
            other => Err(ProcessingError::InvalidFormat(format!(
                "Unknown export format '{}', expected '{}' or '{}'",
                other, FORMAT_CSV, FORMAT_JSON
            ))),
        }
    }
}

/// Writes the aggregated series as one row per date:
/// `date,total,increment,regions_reported`.
pub struct SeriesExporter {
    format: ExportFormat,
}

impl SeriesExporter {
    pub fn new() -> Self {
        Self {
            format: ExportFormat::Csv,
        }
    }

    pub fn with_format(format: ExportFormat) -> Self {
        Self { format }
    }

    pub fn export(&self, series: &AggregatedSeries, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }

        let file = File::create(path)?;
        self.write_to(series, BufWriter::new(file))?;

        info!(
            "exported {} rows to {} ({:?})",
            series.len(),
            path.display(),
            self.format
        );
        Ok(())
    }

    pub fn write_to<W: Write>(&self, series: &AggregatedSeries, writer: W) -> Result<()> {
        let rows = series.rows();

        match self.format {
            ExportFormat::Csv => {
                let mut csv_writer = csv::Writer::from_writer(writer);
                for row in &rows {
                    csv_writer.serialize(row)?;
                }
                csv_writer.flush()?;
            }
            ExportFormat::Json => {
                let mut writer = writer;
                serde_json::to_writer_pretty(&mut writer, &rows)?;
                writer.flush()?;
            }
        }

        Ok(())
    }
}

impl Default for SeriesExporter {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{
        DailyIncrement, DailyTotal, IncrementSeries, NationalSeries, SeriesRow,
    };
    use chrono::NaiveDate;
    use tempfile::TempDir;

    fn d(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2020, 3, day).unwrap()
    }

    fn sample() -> AggregatedSeries {
        AggregatedSeries {
            national: NationalSeries::new(vec![
                DailyTotal { date: d(1), total: 4 },
                DailyTotal { date: d(2), total: 9 },
            ]),
            increments: IncrementSeries::new(vec![
                DailyIncrement { date: d(1), increment: 4 },
                DailyIncrement { date: d(2), increment: 5 },
            ]),
            report_counts: [(d(1), 2), (d(2), 1)].into_iter().collect(),
        }
    }

    #[test]
    fn test_format_from_str() {
        assert_eq!("csv".parse::<ExportFormat>().unwrap(), ExportFormat::Csv);
        assert_eq!("JSON".parse::<ExportFormat>().unwrap(), ExportFormat::Json);
        assert!("parquet".parse::<ExportFormat>().is_err());
    }

    #[test]
    fn test_csv_export() {
        let mut buffer = Vec::new();
        SeriesExporter::new().write_to(&sample(), &mut buffer).unwrap();

        let text = String::from_utf8(buffer).unwrap();
        assert_eq!(
            text,
            "date,total,increment,regions_reported\n2020-03-01,4,4,2\n2020-03-02,9,5,1\n"
        );
    }

    #[test]
    fn test_json_export_to_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("out").join("series.json");

        SeriesExporter::with_format(ExportFormat::Json)
            .export(&sample(), &path)
            .unwrap();

        let rows: Vec<SeriesRow> =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[1].increment, 5);
        assert_eq!(rows[1].date, d(2));
    }
}
