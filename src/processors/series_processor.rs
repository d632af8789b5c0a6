use crate::error::Result;
use crate::models::{AggregatedSeries, IngestedData, ReportCount, SourceFile};
use crate::processors::{IntegrityChecker, IntegrityReport, SeriesMerger};
use crate::readers::DirectoryReader;
use crate::utils::constants::{DEFAULT_FILE_SUFFIX, DEFAULT_TOTAL_REGIONS};
use crate::utils::progress::ProgressReporter;
use std::path::Path;
use tracing::{info, warn};

/// Runs read → merge → diff over a directory of canton totals.
pub struct SeriesProcessor {
    file_suffix: String,
    expected_regions: usize,
    jump_factor: Option<u64>,
}

impl SeriesProcessor {
    pub fn new() -> Self {
        Self {
            file_suffix: DEFAULT_FILE_SUFFIX.to_string(),
            expected_regions: DEFAULT_TOTAL_REGIONS,
            jump_factor: None,
        }
    }

    pub fn with_file_suffix(mut self, file_suffix: impl Into<String>) -> Self {
        self.file_suffix = file_suffix.into();
        self
    }

    pub fn with_expected_regions(mut self, expected_regions: usize) -> Self {
        self.expected_regions = expected_regions;
        self
    }

    pub fn with_jump_factor(mut self, jump_factor: Option<u64>) -> Self {
        self.jump_factor = jump_factor;
        self
    }

    /// Read every matching file and aggregate it.
    pub fn process_directory(
        &self,
        dir_path: &Path,
        progress: Option<&ProgressReporter>,
    ) -> Result<(AggregatedSeries, IntegrityReport)> {
        let sources = self.read_directory(dir_path, progress)?;
        self.process_sources(&sources, progress)
    }

    pub fn read_directory(
        &self,
        dir_path: &Path,
        progress: Option<&ProgressReporter>,
    ) -> Result<Vec<SourceFile>> {
        let reader = DirectoryReader::with_file_suffix(self.file_suffix.as_str());
        let sources = reader.read_directory(dir_path, progress)?;

        if sources.is_empty() {
            warn!(
                "no files ending in '{}' found in {}",
                self.file_suffix,
                dir_path.display()
            );
        }

        Ok(sources)
    }

    /// Aggregate already-read files. Fails on the first unparseable date or
    /// decreasing national total.
    pub fn process_sources(
        &self,
        sources: &[SourceFile],
        progress: Option<&ProgressReporter>,
    ) -> Result<(AggregatedSeries, IntegrityReport)> {
        let data = self.ingest(sources, progress)?;
        let (report_counts, integrity_report) = self.check(&data, progress);
        let aggregated = self.aggregate(&data, report_counts, progress)?;

        Ok((aggregated, integrity_report))
    }

    pub fn ingest(
        &self,
        sources: &[SourceFile],
        progress: Option<&ProgressReporter>,
    ) -> Result<IngestedData> {
        if let Some(p) = progress {
            p.set_message("Merging canton series...");
        }

        let data = SeriesMerger::new().ingest(sources)?;
        info!(
            "ingested {} observations for {} regions ({} rows skipped)",
            data.observation_count(),
            data.region_count(),
            data.rows_skipped
        );

        Ok(data)
    }

    /// Report counts plus the integrity findings for ingested data.
    pub fn check(
        &self,
        data: &IngestedData,
        progress: Option<&ProgressReporter>,
    ) -> (ReportCount, IntegrityReport) {
        if let Some(p) = progress {
            p.set_message("Checking data integrity...");
        }

        let report_counts = SeriesMerger::new().compute_report_counts(&data.dates, &data.regions);

        let mut checker = IntegrityChecker::new().with_expected_regions(self.expected_regions);
        if let Some(factor) = self.jump_factor {
            checker = checker.with_jump_factor(factor);
        }
        let integrity_report = checker.check_integrity(data, &report_counts);

        for violation in integrity_report.count_violations.iter().take(10) {
            warn!(
                "region {} on {}: {}",
                violation.region, violation.date, violation.details
            );
        }

        (report_counts, integrity_report)
    }

    /// National totals and increments; fails if a total decreases.
    pub fn aggregate(
        &self,
        data: &IngestedData,
        report_counts: ReportCount,
        progress: Option<&ProgressReporter>,
    ) -> Result<AggregatedSeries> {
        let merger = SeriesMerger::new();
        let national = merger.compute_national_series(&data.regions, &data.dates)?;
        let increments = merger.compute_increments(&national)?;

        info!("sum={}", increments.sum());

        if let Some(p) = progress {
            p.finish_with_message(&format!(
                "Aggregated {} regions over {} dates",
                data.region_count(),
                national.len()
            ));
        }

        Ok(AggregatedSeries {
            national,
            increments,
            report_counts,
        })
    }
}

impl Default for SeriesProcessor {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ProcessingError;
    use crate::models::RawRow;
    use chrono::NaiveDate;

    fn source(name: &str, lines: &[&str]) -> SourceFile {
        let rows = lines
            .iter()
            .enumerate()
            .map(|(i, line)| RawRow::new(i + 2, *line))
            .collect();
        SourceFile::new(name, rows)
    }

    #[test]
    fn test_process_sources() {
        let sources = vec![
            source("AG_CH_total.csv", &["2020-03-01,,AG,,2", "2020-03-03,,AG,,6"]),
            source("ZH_CH_total.csv", &["2020-03-02,,ZH,,3", "2020-03-02,,ZH,9,"]),
        ];

        let processor = SeriesProcessor::new().with_expected_regions(2);
        let (aggregated, report) = processor.process_sources(&sources, None).unwrap();

        assert_eq!(aggregated.national.totals(), vec![2, 5, 9]);
        assert_eq!(aggregated.increments.increments(), vec![2, 3, 4]);
        assert_eq!(
            aggregated
                .report_counts
                .get(NaiveDate::from_ymd_opt(2020, 3, 2).unwrap()),
            1
        );
        assert_eq!(report.rows_skipped, 1);
        assert_eq!(report.incomplete_dates.len(), 3);
    }

    #[test]
    fn test_decreasing_region_aborts() {
        let sources = vec![source(
            "TI_CH_total.csv",
            &["2020-03-01,,TI,,5", "2020-03-02,,TI,,3"],
        )];

        let result = SeriesProcessor::new().process_sources(&sources, None);
        assert!(matches!(
            result,
            Err(ProcessingError::NonMonotonicTotal { .. })
        ));
    }
}
