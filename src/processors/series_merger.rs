use crate::error::{ProcessingError, Result};
use crate::models::{
    DailyIncrement, DailyTotal, IncrementSeries, IngestedData, NationalSeries, Observation,
    RawRow, RegionSeries, ReportCount, RowOutcome, SkipReason, SourceFile,
};
use crate::utils::date_parser::parse_date;
use chrono::NaiveDate;
use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;
use tracing::debug;

/// Turns per-region cumulative observations into the national series.
///
/// Every operation is a pure function of its inputs, so the stages can be
/// composed and tested independently.
pub struct SeriesMerger;

impl SeriesMerger {
    pub fn new() -> Self {
        Self
    }

    /// Parse one data row.
    ///
    /// A missing or non-numeric count field marks a row that is not a
    /// cumulative-confirmed record and yields `Skip`. An unparseable date on
    /// any other row is an error.
    pub fn parse_row(&self, row: &RawRow) -> Result<RowOutcome> {
        let count_field = match row.count_field() {
            Some(field) => field.trim(),
            None => return Ok(RowOutcome::Skip(SkipReason::MissingCount)),
        };

        let cumulative_count = match count_field.parse::<u64>() {
            Ok(count) => count,
            Err(_) => {
                return Ok(RowOutcome::Skip(SkipReason::NonNumericCount(
                    count_field.to_string(),
                )))
            }
        };

        // The count field sits after both the date and region fields.
        let date = parse_date(row.date_field().unwrap_or_default())?;
        let region = row.region_field().unwrap_or_default().trim();

        Ok(RowOutcome::Observation(Observation::new(
            region,
            date,
            cumulative_count,
        )))
    }

    /// Accumulate observations from files in the given order.
    ///
    /// Within a (region, date) pair the last parsed row wins.
    pub fn ingest(&self, sources: &[SourceFile]) -> Result<IngestedData> {
        let mut data = IngestedData::default();

        for source in sources {
            self.ingest_rows(source.path(), &source.rows, &mut data)?;
            data.files_read += 1;
        }

        Ok(data)
    }

    fn ingest_rows(&self, path: &Path, rows: &[RawRow], data: &mut IngestedData) -> Result<()> {
        for row in rows {
            data.rows_read += 1;

            let outcome = self.parse_row(row).map_err(|e| match e {
                ProcessingError::InvalidDate(value) => ProcessingError::UnparseableDate {
                    path: path.to_path_buf(),
                    line_number: row.line_number,
                    value,
                    line: row.line.clone(),
                },
                other => other,
            })?;

            match outcome {
                RowOutcome::Observation(observation) => {
                    let previous = data
                        .regions
                        .entry(observation.region)
                        .or_default()
                        .insert(observation.date, observation.cumulative_count);
                    if previous.is_some() {
                        data.rows_overwritten += 1;
                    }
                    data.dates.insert(observation.date);
                }
                RowOutcome::Skip(reason) => {
                    debug!(
                        "skipping {}:{} ({:?})",
                        path.display(),
                        row.line_number,
                        reason
                    );
                    data.rows_skipped += 1;
                }
            }
        }

        Ok(())
    }

    /// Sum the forward-filled value of every region on each date.
    ///
    /// Each region keeps a cursor into its sorted entries that only moves
    /// forward, since dates are visited in ascending order.
    pub fn compute_national_series(
        &self,
        regions: &BTreeMap<String, RegionSeries>,
        dates: &BTreeSet<NaiveDate>,
    ) -> Result<NationalSeries> {
        let mut cursors: Vec<_> = regions
            .values()
            .map(|series| (series.iter().peekable(), 0u64))
            .collect();

        let mut points = Vec::with_capacity(dates.len());
        for &date in dates {
            let mut total: u64 = 0;

            for (entries, current) in cursors.iter_mut() {
                while let Some((_, value)) = entries.next_if(|(entry_date, _)| *entry_date <= date)
                {
                    *current = value;
                }
                total = total
                    .checked_add(*current)
                    .ok_or(ProcessingError::TotalOverflow { date })?;
            }

            debug!("date={} sum={}", date, total);
            points.push(DailyTotal { date, total });
        }

        Ok(NationalSeries::new(points))
    }

    /// Difference consecutive totals, starting from an implicit zero.
    ///
    /// A decreasing total means a region's cumulative count went backwards;
    /// that aborts with the offending date and both totals.
    pub fn compute_increments(&self, national: &NationalSeries) -> Result<IncrementSeries> {
        let mut points = Vec::with_capacity(national.len());
        let mut previous = 0u64;

        for point in &national.points {
            debug!("date={} prev={} cur={}", point.date, previous, point.total);

            let increment =
                point
                    .total
                    .checked_sub(previous)
                    .ok_or(ProcessingError::NonMonotonicTotal {
                        date: point.date,
                        previous,
                        current: point.total,
                    })?;

            points.push(DailyIncrement {
                date: point.date,
                increment,
            });
            previous = point.total;
        }

        Ok(IncrementSeries::new(points))
    }

    /// Number of regions with an observation on exactly each date.
    pub fn compute_report_counts(
        &self,
        dates: &BTreeSet<NaiveDate>,
        regions: &BTreeMap<String, RegionSeries>,
    ) -> ReportCount {
        dates
            .iter()
            .map(|&date| {
                let reported = regions.values().filter(|s| s.contains(date)).count();
                (date, reported)
            })
            .collect()
    }
}

impl Default for SeriesMerger {
    fn default() -> Self {
        Self::new()
    }
}
