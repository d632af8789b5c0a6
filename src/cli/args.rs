use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use crate::cli::settings::Overrides;

#[derive(Parser)]
#[command(name = "covid-rate")]
#[command(about = "Rate of increase of covid cases in Switzerland")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[arg(short, long, global = true, help = "Enable verbose logging")]
    pub verbose: bool,

    #[arg(short, long, global = true, help = "Hide the progress bar")]
    pub quiet: bool,

    #[arg(long, global = true, help = "Log file path")]
    pub log_file: Option<PathBuf>,

    #[arg(long, global = true, help = "Settings file (toml, yaml or json)")]
    pub config: Option<PathBuf>,
}

/// Input selection shared by every subcommand.
#[derive(Args, Debug, Clone, Default)]
pub struct InputArgs {
    #[arg(
        short = 'd',
        long = "dir-path",
        visible_alias = "dir_path",
        help = "Directory with the canton total CSVs [default: ../fallzahlen_kanton_total_csv/]"
    )]
    pub input_dir: Option<PathBuf>,

    #[arg(long, help = "File-name suffix of canton total CSVs [default: CH_total.csv]")]
    pub file_suffix: Option<String>,

    #[arg(long, help = "Number of regions expected to report [default: 27]")]
    pub total_regions: Option<usize>,

    #[arg(long, help = "Flag region counts growing more than this factor in one report")]
    pub jump_factor: Option<u64>,
}

impl InputArgs {
    pub fn overrides(&self, output_dir: Option<PathBuf>) -> Overrides {
        Overrides {
            input_dir: self.input_dir.clone(),
            file_suffix: self.file_suffix.clone(),
            output_dir,
            total_regions: self.total_regions,
            jump_factor: self.jump_factor,
        }
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Aggregate the canton totals and chart the daily increase
    Process {
        #[command(flatten)]
        input: InputArgs,

        #[arg(short, long, help = "Chart output directory [default: output]")]
        output_dir: Option<PathBuf>,

        #[arg(long, default_value = "false", help = "Skip writing charts")]
        no_charts: bool,

        #[arg(long, default_value = "false", help = "Print the daily series")]
        print_table: bool,

        #[arg(short, long, help = "Also export the series to this file")]
        export: Option<PathBuf>,

        #[arg(short, long, default_value = "csv", help = "Export format: csv or json")]
        format: String,
    },

    /// Check the canton totals without writing anything
    Validate {
        #[command(flatten)]
        input: InputArgs,
    },

    /// Write the aggregated series to a file
    Export {
        #[command(flatten)]
        input: InputArgs,

        #[arg(short, long, help = "Output file path")]
        output_file: PathBuf,

        #[arg(short, long, default_value = "csv", help = "Export format: csv or json")]
        format: String,
    },
}
