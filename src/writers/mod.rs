pub mod chart_writer;
pub mod series_exporter;

pub use chart_writer::ChartWriter;
pub use series_exporter::{ExportFormat, SeriesExporter};
