use crate::cli::args::{Cli, Commands};
use crate::cli::settings::Settings;
use crate::error::{ProcessingError, Result};
use crate::models::AggregatedSeries;
use crate::processors::IntegrityChecker;
use crate::utils::logging::init_logging;
use crate::utils::progress::ProgressReporter;
use crate::writers::{ExportFormat, SeriesExporter};
use std::error::Error;
use tracing::{debug, error};

pub fn run(cli: Cli) -> Result<()> {
    init_logging(cli.verbose, cli.log_file.as_deref())?;
    execute(cli).map_err(|err| {
        log_failure(&err);
        err
    })
}

/// Log a fatal error together with its cause chain.
fn log_failure(err: &ProcessingError) {
    let mut message = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        message.push_str(&format!("\n  caused by: {cause}"));
        source = cause.source();
    }
    error!("{message}");
}

fn execute(cli: Cli) -> Result<()> {
    let settings = Settings::load(cli.config.as_deref())?;

    match cli.command {
        Commands::Process {
            input,
            output_dir,
            no_charts,
            print_table,
            export,
            format,
        } => {
            let settings = settings.with_overrides(&input.overrides(output_dir))?;
            let export_format: ExportFormat = format.parse()?;
            debug!("settings: {:?}", settings);

            println!("Processing canton totals...");
            println!("Input directory: {}", settings.input_dir.display());
            println!("File suffix: {}", settings.file_suffix);

            let progress = ProgressReporter::new(0, "Reading canton files...", cli.quiet);
            let (series, integrity_report) = settings
                .processor()
                .process_directory(&settings.input_dir, Some(&progress))?;

            let checker = IntegrityChecker::new();
            println!("\n{}", checker.generate_summary(&integrity_report));
            println!("{}", series_summary(&series));

            if print_table {
                println!("\n{}", series_table(&series));
            }

            if let Some(path) = export {
                SeriesExporter::with_format(export_format).export(&series, &path)?;
                println!("Exported series to {}", path.display());
            }

            if no_charts {
                println!("Chart output disabled");
            } else {
                let written = settings
                    .chart_writer()
                    .write_charts(&series, &settings.output_dir)?;
                for path in &written {
                    println!("Wrote chart {}", path.display());
                }
            }

            println!("Processing complete!");
        }

        Commands::Validate { input } => {
            let settings = settings.with_overrides(&input.overrides(None))?;

            println!("Validating canton totals...");
            println!("Input directory: {}", settings.input_dir.display());

            let progress = ProgressReporter::new(0, "Reading canton files...", cli.quiet);
            let processor = settings.processor();
            let sources = processor.read_directory(&settings.input_dir, Some(&progress))?;
            let data = processor.ingest(&sources, Some(&progress))?;
            let (report_counts, integrity_report) = processor.check(&data, Some(&progress));

            let checker = IntegrityChecker::new();
            println!("\n{}", checker.generate_summary(&integrity_report));

            // Report first, then fail on a decreasing national total.
            let series = processor.aggregate(&data, report_counts, Some(&progress))?;
            println!("{}", series_summary(&series));

            if integrity_report.count_violations.is_empty() {
                println!("✅ All data passed validation checks");
            } else {
                println!(
                    "⚠️  Found {} validation issues",
                    integrity_report.count_violations.len()
                );
            }
        }

        Commands::Export {
            input,
            output_file,
            format,
        } => {
            let settings = settings.with_overrides(&input.overrides(None))?;
            let export_format: ExportFormat = format.parse()?;

            let progress = ProgressReporter::new(0, "Reading canton files...", cli.quiet);
            let (series, _integrity_report) = settings
                .processor()
                .process_directory(&settings.input_dir, Some(&progress))?;

            SeriesExporter::with_format(export_format).export(&series, &output_file)?;
            println!(
                "Exported {} days to {}",
                series.len(),
                output_file.display()
            );
        }
    }

    Ok(())
}

/// One-paragraph summary of the aggregated series.
pub fn series_summary(series: &AggregatedSeries) -> String {
    let mut summary = String::new();

    summary.push_str("=== National Series ===\n");
    summary.push_str(&format!("Days: {}\n", series.len()));

    if let Some(latest) = series.national.latest() {
        summary.push_str(&format!(
            "Latest Total: {} ({})\n",
            latest.total, latest.date
        ));
    }
    summary.push_str(&format!("Sum of Increases: {}\n", series.increments.sum()));
    if let Some(peak) = series.increments.peak() {
        summary.push_str(&format!(
            "Largest Daily Increase: {} ({})\n",
            peak.increment, peak.date
        ));
    }

    summary
}

pub fn series_table(series: &AggregatedSeries) -> String {
    let mut table = String::from("date        total   increase  regions\n");
    for row in series.rows() {
        table.push_str(&format!(
            "{}  {:>7}  {:>8}  {:>7}\n",
            row.date, row.total, row.increment, row.regions_reported
        ));
    }
    table
}
