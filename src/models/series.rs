use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// Cumulative counts of one region keyed by report date.
///
/// Dates need not be contiguous; a date without an entry holds the value of
/// the nearest earlier entry (forward-fill).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegionSeries {
    values: BTreeMap<NaiveDate, u64>,
}

impl RegionSeries {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the count for a date, returning the value it replaced.
    pub fn insert(&mut self, date: NaiveDate, cumulative_count: u64) -> Option<u64> {
        self.values.insert(date, cumulative_count)
    }

    /// Exact lookup, without forward-fill.
    pub fn get(&self, date: NaiveDate) -> Option<u64> {
        self.values.get(&date).copied()
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.values.contains_key(&date)
    }

    /// Value at the latest date on or before `date`, 0 if there is none.
    pub fn value_at(&self, date: NaiveDate) -> u64 {
        self.values
            .range(..=date)
            .next_back()
            .map(|(_, value)| *value)
            .unwrap_or(0)
    }

    pub fn iter(&self) -> impl Iterator<Item = (NaiveDate, u64)> + '_ {
        self.values.iter().map(|(date, value)| (*date, *value))
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn first_date(&self) -> Option<NaiveDate> {
        self.values.keys().next().copied()
    }

    pub fn last(&self) -> Option<(NaiveDate, u64)> {
        self.values.iter().next_back().map(|(d, v)| (*d, *v))
    }
}

impl FromIterator<(NaiveDate, u64)> for RegionSeries {
    fn from_iter<T: IntoIterator<Item = (NaiveDate, u64)>>(iter: T) -> Self {
        Self {
            values: iter.into_iter().collect(),
        }
    }
}

/// Everything ingested from the input rows.
#[derive(Debug, Clone, Default)]
pub struct IngestedData {
    pub regions: BTreeMap<String, RegionSeries>,
    /// Every distinct date of an accepted row, across all regions.
    pub dates: BTreeSet<NaiveDate>,
    pub files_read: usize,
    pub rows_read: usize,
    pub rows_skipped: usize,
    /// Rows that replaced an earlier value for the same region and date.
    pub rows_overwritten: usize,
}

impl IngestedData {
    pub fn region_count(&self) -> usize {
        self.regions.len()
    }

    pub fn observation_count(&self) -> usize {
        self.regions.values().map(RegionSeries::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyTotal {
    pub date: NaiveDate,
    pub total: u64,
}

/// National cumulative totals, one entry per date, ascending.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NationalSeries {
    pub points: Vec<DailyTotal>,
}

impl NationalSeries {
    pub fn new(points: Vec<DailyTotal>) -> Self {
        Self { points }
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn dates(&self) -> Vec<NaiveDate> {
        self.points.iter().map(|p| p.date).collect()
    }

    pub fn totals(&self) -> Vec<u64> {
        self.points.iter().map(|p| p.total).collect()
    }

    pub fn latest(&self) -> Option<DailyTotal> {
        self.points.last().copied()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyIncrement {
    pub date: NaiveDate,
    pub increment: u64,
}

/// Day-over-day change of the national total.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IncrementSeries {
    pub points: Vec<DailyIncrement>,
}

impl IncrementSeries {
    pub fn new(points: Vec<DailyIncrement>) -> Self {
        Self { points }
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn increments(&self) -> Vec<u64> {
        self.points.iter().map(|p| p.increment).collect()
    }

    /// Sum of all increments; equals the last national total.
    pub fn sum(&self) -> u64 {
        self.points.iter().map(|p| p.increment).sum()
    }

    pub fn peak(&self) -> Option<DailyIncrement> {
        self.points.iter().copied().max_by_key(|p| p.increment)
    }
}

/// Number of regions reporting on exactly each date.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportCount {
    counts: BTreeMap<NaiveDate, usize>,
}

impl ReportCount {
    pub fn get(&self, date: NaiveDate) -> usize {
        self.counts.get(&date).copied().unwrap_or(0)
    }

    pub fn iter(&self) -> impl Iterator<Item = (NaiveDate, usize)> + '_ {
        self.counts.iter().map(|(date, count)| (*date, *count))
    }

    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }
}

impl FromIterator<(NaiveDate, usize)> for ReportCount {
    fn from_iter<T: IntoIterator<Item = (NaiveDate, usize)>>(iter: T) -> Self {
        Self {
            counts: iter.into_iter().collect(),
        }
    }
}

/// The three output sequences of one run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AggregatedSeries {
    pub national: NationalSeries,
    pub increments: IncrementSeries,
    pub report_counts: ReportCount,
}

impl AggregatedSeries {
    pub fn is_empty(&self) -> bool {
        self.national.is_empty()
    }

    pub fn len(&self) -> usize {
        self.national.len()
    }

    /// Row view used by the exporters and the printed table.
    pub fn rows(&self) -> Vec<SeriesRow> {
        self.national
            .points
            .iter()
            .zip(self.increments.points.iter())
            .map(|(total, increment)| SeriesRow {
                date: total.date,
                total: total.total,
                increment: increment.increment,
                regions_reported: self.report_counts.get(total.date),
            })
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeriesRow {
    pub date: NaiveDate,
    pub total: u64,
    pub increment: u64,
    pub regions_reported: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2020, 3, day).unwrap()
    }

    #[test]
    fn test_region_series_forward_fill() {
        let series: RegionSeries = [(d(2), 10), (d(5), 25)].into_iter().collect();

        assert_eq!(series.value_at(d(1)), 0);
        assert_eq!(series.value_at(d(2)), 10);
        assert_eq!(series.value_at(d(4)), 10);
        assert_eq!(series.value_at(d(5)), 25);
        assert_eq!(series.value_at(d(30)), 25);

        assert_eq!(series.get(d(4)), None);
        assert!(series.contains(d(5)));
        assert_eq!(series.first_date(), Some(d(2)));
        assert_eq!(series.last(), Some((d(5), 25)));
    }

    #[test]
    fn test_region_series_insert_overwrites() {
        let mut series = RegionSeries::new();
        assert_eq!(series.insert(d(1), 3), None);
        assert_eq!(series.insert(d(1), 7), Some(3));
        assert_eq!(series.get(d(1)), Some(7));
        assert_eq!(series.len(), 1);
    }

    #[test]
    fn test_increment_series_sum_and_peak() {
        let increments = IncrementSeries::new(vec![
            DailyIncrement { date: d(1), increment: 4 },
            DailyIncrement { date: d(2), increment: 9 },
            DailyIncrement { date: d(3), increment: 2 },
        ]);

        assert_eq!(increments.sum(), 15);
        assert_eq!(increments.peak().map(|p| p.date), Some(d(2)));
    }

    #[test]
    fn test_aggregated_rows() {
        let aggregated = AggregatedSeries {
            national: NationalSeries::new(vec![
                DailyTotal { date: d(1), total: 1 },
                DailyTotal { date: d(2), total: 3 },
            ]),
            increments: IncrementSeries::new(vec![
                DailyIncrement { date: d(1), increment: 1 },
                DailyIncrement { date: d(2), increment: 2 },
            ]),
            report_counts: [(d(1), 1), (d(2), 2)].into_iter().collect(),
        };

        let rows = aggregated.rows();
        assert_eq!(rows.len(), 2);
        assert_eq!(
            rows[1],
            SeriesRow {
                date: d(2),
                total: 3,
                increment: 2,
                regions_reported: 2,
            }
        );
    }
}
