pub mod observation;
pub mod series;

pub use observation::{Observation, RawRow, RowOutcome, SkipReason, SourceFile};
pub use series::{
    AggregatedSeries, DailyIncrement, DailyTotal, IncrementSeries, IngestedData, NationalSeries,
    RegionSeries, ReportCount, SeriesRow,
};
