//! SVG charts of the national series.
//!
//! Bars are drawn as rectangles on an index axis, one slot per date, and the
//! tick labels map indices back to dates.

use crate::error::{ProcessingError, Result};
use crate::models::AggregatedSeries;
use crate::utils::constants::{
    DEFAULT_CHART_HEIGHT, DEFAULT_CHART_WIDTH, DEFAULT_TOTAL_REGIONS, INCREASE_CHART_FILE,
    TOTAL_CHART_FILE,
};
use chrono::NaiveDate;
use plotters::prelude::*;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

const INCREASE_COLOR: RGBColor = RGBColor(214, 39, 40);
const REPORTED_COLOR: RGBColor = RGBColor(31, 119, 180);
const BAR_HALF_WIDTH: f64 = 0.4;
const MAX_X_LABELS: usize = 12;

fn chart_error<E: std::fmt::Display>(err: E) -> ProcessingError {
    ProcessingError::Chart(err.to_string())
}

/// Label for an index tick; fractional ticks stay blank.
fn date_label(dates: &[NaiveDate], x: f64) -> String {
    let index = x.round();
    if (x - index).abs() > 1e-6 || index < 0.0 {
        return String::new();
    }
    dates
        .get(index as usize)
        .map(|date| date.format("%Y-%m-%d").to_string())
        .unwrap_or_default()
}

fn ensure_points(series: &AggregatedSeries) -> Result<()> {
    if series.is_empty() {
        return Err(ProcessingError::Chart("no data points to plot".to_string()));
    }
    Ok(())
}

fn y_upper(max: u64) -> f64 {
    (max.max(1) as f64) * 1.05
}

pub struct ChartWriter {
    width: u32,
    height: u32,
    total_regions: usize,
}

impl ChartWriter {
    pub fn new() -> Self {
        Self {
            width: DEFAULT_CHART_WIDTH,
            height: DEFAULT_CHART_HEIGHT,
            total_regions: DEFAULT_TOTAL_REGIONS,
        }
    }

    pub fn with_size(mut self, width: u32, height: u32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    pub fn with_total_regions(mut self, total_regions: usize) -> Self {
        self.total_regions = total_regions;
        self
    }

    /// Write both charts into `output_dir`, returning the files written.
    pub fn write_charts(
        &self,
        series: &AggregatedSeries,
        output_dir: &Path,
    ) -> Result<Vec<PathBuf>> {
        if series.is_empty() {
            warn!("no data points, skipping charts");
            return Ok(Vec::new());
        }

        std::fs::create_dir_all(output_dir)?;

        let increase_path = output_dir.join(INCREASE_CHART_FILE);
        self.write_increase_chart(series, &increase_path)?;
        info!("wrote {}", increase_path.display());

        let total_path = output_dir.join(TOTAL_CHART_FILE);
        self.write_total_chart(series, &total_path)?;
        info!("wrote {}", total_path.display());

        Ok(vec![increase_path, total_path])
    }

    /// Daily increase as bars against the left axis, regions reporting as a
    /// line against the right axis.
    pub fn write_increase_chart(&self, series: &AggregatedSeries, path: &Path) -> Result<()> {
        ensure_points(series)?;
        let dates = series.national.dates();
        let increments = series.increments.increments();
        let reported: Vec<usize> = dates
            .iter()
            .map(|date| series.report_counts.get(*date))
            .collect();

        let x_range = -0.5f64..(dates.len() as f64 - 0.5);
        let y_max = y_upper(increments.iter().copied().max().unwrap_or(0));
        let regions_max = self.total_regions.max(1) as f64;

        let root = SVGBackend::new(path, (self.width, self.height)).into_drawing_area();
        root.fill(&WHITE).map_err(chart_error)?;

        let mut chart = ChartBuilder::on(&root)
            .margin(20)
            .x_label_area_size(50)
            .y_label_area_size(70)
            .right_y_label_area_size(70)
            .build_cartesian_2d(x_range.clone(), 0f64..y_max)
            .map_err(chart_error)?
            .set_secondary_coord(x_range, 0f64..regions_max);

        let format_x = |x: &f64| date_label(&dates, *x);
        chart
            .configure_mesh()
            .disable_x_mesh()
            .x_desc("date")
            .y_desc("covid-19 incident increase from previous day")
            .x_labels(dates.len().min(MAX_X_LABELS))
            .x_label_formatter(&format_x)
            .y_label_formatter(&|y| format!("{:.0}", y))
            .axis_desc_style(("sans-serif", 16).into_font().color(&INCREASE_COLOR))
            .draw()
            .map_err(chart_error)?;

        chart
            .configure_secondary_axes()
            .y_desc(format!("# cantons reported (out of {})", self.total_regions))
            .y_label_formatter(&|y| format!("{:.0}", y))
            .axis_desc_style(("sans-serif", 16).into_font().color(&REPORTED_COLOR))
            .draw()
            .map_err(chart_error)?;

        chart
            .draw_series(increments.iter().enumerate().map(|(i, increment)| {
                let x = i as f64;
                Rectangle::new(
                    [
                        (x - BAR_HALF_WIDTH, 0.0),
                        (x + BAR_HALF_WIDTH, *increment as f64),
                    ],
                    INCREASE_COLOR.filled(),
                )
            }))
            .map_err(chart_error)?;

        chart
            .draw_secondary_series(LineSeries::new(
                reported
                    .iter()
                    .enumerate()
                    .map(|(i, count)| (i as f64, *count as f64)),
                REPORTED_COLOR.stroke_width(2),
            ))
            .map_err(chart_error)?;

        root.present().map_err(chart_error)?;
        Ok(())
    }

    /// Cumulative national total as bars.
    pub fn write_total_chart(&self, series: &AggregatedSeries, path: &Path) -> Result<()> {
        ensure_points(series)?;
        let dates = series.national.dates();
        let totals = series.national.totals();

        let x_range = -0.5f64..(dates.len() as f64 - 0.5);
        let y_max = y_upper(totals.iter().copied().max().unwrap_or(0));

        let root = SVGBackend::new(path, (self.width, self.height)).into_drawing_area();
        root.fill(&WHITE).map_err(chart_error)?;

        let mut chart = ChartBuilder::on(&root)
            .margin(20)
            .x_label_area_size(50)
            .y_label_area_size(80)
            .build_cartesian_2d(x_range, 0f64..y_max)
            .map_err(chart_error)?;

        let format_x = |x: &f64| date_label(&dates, *x);
        chart
            .configure_mesh()
            .disable_x_mesh()
            .x_desc("date")
            .y_desc("total number of incidents")
            .x_labels(dates.len().min(MAX_X_LABELS))
            .x_label_formatter(&format_x)
            .y_label_formatter(&|y| format!("{:.0}", y))
            .draw()
            .map_err(chart_error)?;

        chart
            .draw_series(totals.iter().enumerate().map(|(i, total)| {
                let x = i as f64;
                Rectangle::new(
                    [(x - BAR_HALF_WIDTH, 0.0), (x + BAR_HALF_WIDTH, *total as f64)],
                    INCREASE_COLOR.filled(),
                )
            }))
            .map_err(chart_error)?;

        root.present().map_err(chart_error)?;
        Ok(())
    }
}

impl Default for ChartWriter {
    fn default() -> Self {
        Self::new()
    }
}
