use crate::models::{IngestedData, ReportCount};
use crate::utils::constants::DEFAULT_TOTAL_REGIONS;
use chrono::NaiveDate;
use std::collections::BTreeMap;

#[derive(Debug, Clone)]
pub struct IntegrityReport {
    pub files_read: usize,
    pub rows_read: usize,
    pub rows_skipped: usize,
    pub rows_overwritten: usize,
    pub total_regions: usize,
    pub expected_regions: usize,
    pub total_dates: usize,
    pub first_date: Option<NaiveDate>,
    pub last_date: Option<NaiveDate>,
    pub count_violations: Vec<CountViolation>,
    pub incomplete_dates: Vec<IncompleteDate>,
    pub region_statistics: BTreeMap<String, RegionStatistics>,
}

impl IntegrityReport {
    pub fn is_monotonic(&self) -> bool {
        !self
            .count_violations
            .iter()
            .any(|v| v.violation_type == ViolationType::Decrease)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CountViolation {
    pub region: String,
    pub date: NaiveDate,
    pub violation_type: ViolationType,
    pub details: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViolationType {
    /// Cumulative count lower than the region's previous report.
    Decrease,
    /// Growth beyond the configured factor of the previous report.
    SuspiciousJump,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IncompleteDate {
    pub date: NaiveDate,
    pub regions_reported: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RegionStatistics {
    pub observations: usize,
    pub first_date: Option<NaiveDate>,
    pub last_date: Option<NaiveDate>,
    pub latest_count: u64,
    pub decreases: usize,
}

pub struct IntegrityChecker {
    expected_regions: usize,
    jump_factor: Option<u64>,
}

impl IntegrityChecker {
    pub fn new() -> Self {
        Self {
            expected_regions: DEFAULT_TOTAL_REGIONS,
            jump_factor: None,
        }
    }

    pub fn with_expected_regions(mut self, expected_regions: usize) -> Self {
        self.expected_regions = expected_regions;
        self
    }

    /// Flag reports where a region's count grows by more than `factor`
    /// times its previous value.
    pub fn with_jump_factor(mut self, factor: u64) -> Self {
        self.jump_factor = Some(factor);
        self
    }

    /// Check ingested data. Findings never alter the series.
    pub fn check_integrity(
        &self,
        data: &IngestedData,
        report_counts: &ReportCount,
    ) -> IntegrityReport {
        let mut report = IntegrityReport {
            files_read: data.files_read,
            rows_read: data.rows_read,
            rows_skipped: data.rows_skipped,
            rows_overwritten: data.rows_overwritten,
            total_regions: data.region_count(),
            expected_regions: self.expected_regions,
            total_dates: data.dates.len(),
            first_date: data.dates.iter().next().copied(),
            last_date: data.dates.iter().next_back().copied(),
            count_violations: Vec::new(),
            incomplete_dates: Vec::new(),
            region_statistics: BTreeMap::new(),
        };

        for (region, series) in &data.regions {
            let mut stats = RegionStatistics {
                observations: series.len(),
                first_date: series.first_date(),
                ..RegionStatistics::default()
            };
            if let Some((date, count)) = series.last() {
                stats.last_date = Some(date);
                stats.latest_count = count;
            }

            let entries: Vec<(NaiveDate, u64)> = series.iter().collect();
            for window in entries.windows(2) {
                let (prev_date, prev) = window[0];
                let (date, curr) = window[1];

                if curr < prev {
                    stats.decreases += 1;
                    report.count_violations.push(CountViolation {
                        region: region.clone(),
                        date,
                        violation_type: ViolationType::Decrease,
                        details: format!(
                            "cumulative count fell from {} on {} to {}",
                            prev, prev_date, curr
                        ),
                    });
                } else if let Some(factor) = self.jump_factor {
                    if prev > 0 && curr > prev.saturating_mul(factor) {
                        report.count_violations.push(CountViolation {
                            region: region.clone(),
                            date,
                            violation_type: ViolationType::SuspiciousJump,
                            details: format!(
                                "cumulative count jumped from {} on {} to {}",
                                prev, prev_date, curr
                            ),
                        });
                    }
                }
            }

            report.region_statistics.insert(region.clone(), stats);
        }

        // Compare against the regions actually present, never more than expected.
        let reference = report.total_regions.min(self.expected_regions.max(1));
        report.incomplete_dates = report_counts
            .iter()
            .filter(|(_, reported)| *reported < reference)
            .map(|(date, regions_reported)| IncompleteDate {
                date,
                regions_reported,
            })
            .collect();

        report
    }

    /// Generate a summary report
    pub fn generate_summary(&self, report: &IntegrityReport) -> String {
        let mut summary = String::new();

        summary.push_str("=== Integrity Check Report ===\n");
        summary.push_str(&format!("Files Read: {}\n", report.files_read));
        summary.push_str(&format!(
            "Rows Read: {} (skipped {}, overwritten {})\n",
            report.rows_read, report.rows_skipped, report.rows_overwritten
        ));
        summary.push_str(&format!(
            "Regions: {} (expected {})\n",
            report.total_regions, report.expected_regions
        ));
        match (report.first_date, report.last_date) {
            (Some(first), Some(last)) => summary.push_str(&format!(
                "Dates: {} ({} to {})\n",
                report.total_dates, first, last
            )),
            _ => summary.push_str("Dates: 0\n"),
        }
        summary.push_str(&format!(
            "Incomplete Dates: {}\n",
            report.incomplete_dates.len()
        ));
        summary.push_str(&format!(
            "\nCount Violations: {}\n",
            report.count_violations.len()
        ));

        if !report.count_violations.is_empty() {
            summary.push_str("\nTop 10 Violations:\n");
            for (i, violation) in report.count_violations.iter().take(10).enumerate() {
                summary.push_str(&format!(
                    "  {}. Region {} on {}: {}\n",
                    i + 1,
                    violation.region,
                    violation.date,
                    violation.details
                ));
            }
        }

        let missing: Vec<&str> = report
            .region_statistics
            .iter()
            .filter(|(_, stats)| stats.last_date != report.last_date)
            .map(|(region, _)| region.as_str())
            .collect();
        if !missing.is_empty() {
            summary.push_str(&format!(
                "\nRegions without a report on the last date: {}\n",
                missing.join(", ")
            ));
        }

        summary
    }
}

impl Default for IntegrityChecker {
    fn default() -> Self {
        Self::new()
    }
}
