pub mod integrity_checker;
pub mod series_merger;
pub mod series_processor;

pub use integrity_checker::{
    CountViolation, IncompleteDate, IntegrityChecker, IntegrityReport, RegionStatistics,
    ViolationType,
};
pub use series_merger::SeriesMerger;
pub use series_processor::SeriesProcessor;
