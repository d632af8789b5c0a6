use crate::error::Result;
use crate::processors::SeriesProcessor;
use crate::utils::constants::{
    DEFAULT_CHART_HEIGHT, DEFAULT_CHART_WIDTH, DEFAULT_FILE_SUFFIX, DEFAULT_INPUT_DIR,
    DEFAULT_OUTPUT_DIR, DEFAULT_TOTAL_REGIONS, ENV_PREFIX,
};
use crate::writers::ChartWriter;
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use validator::Validate;

/// Run settings: defaults, then an optional settings file, then
/// `COVID_RATE_*` environment variables, then command-line flags.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct Settings {
    pub input_dir: PathBuf,

    #[validate(length(min = 1))]
    pub file_suffix: String,

    pub output_dir: PathBuf,

    #[validate(range(min = 1))]
    pub total_regions: usize,

    #[validate(range(min = 200, max = 8000))]
    pub chart_width: u32,

    #[validate(range(min = 200, max = 8000))]
    pub chart_height: u32,

    #[serde(default)]
    #[validate(range(min = 2))]
    pub jump_factor: Option<u64>,
}

impl Settings {
    pub fn load(config_file: Option<&Path>) -> Result<Self> {
        let mut builder = Config::builder()
            .set_default("input_dir", DEFAULT_INPUT_DIR)?
            .set_default("file_suffix", DEFAULT_FILE_SUFFIX)?
            .set_default("output_dir", DEFAULT_OUTPUT_DIR)?
            .set_default("total_regions", DEFAULT_TOTAL_REGIONS as i64)?
            .set_default("chart_width", DEFAULT_CHART_WIDTH as i64)?
            .set_default("chart_height", DEFAULT_CHART_HEIGHT as i64)?;

        if let Some(path) = config_file {
            builder = builder.add_source(File::from(path).required(true));
        }

        let settings: Settings = builder
            .add_source(Environment::with_prefix(ENV_PREFIX).try_parsing(true))
            .build()?
            .try_deserialize()?;

        settings.validate()?;
        Ok(settings)
    }

    /// Apply command-line overrides and re-validate.
    pub fn with_overrides(mut self, overrides: &Overrides) -> Result<Self> {
        if let Some(ref input_dir) = overrides.input_dir {
            self.input_dir = input_dir.clone();
        }
        if let Some(ref file_suffix) = overrides.file_suffix {
            self.file_suffix = file_suffix.clone();
        }
        if let Some(ref output_dir) = overrides.output_dir {
            self.output_dir = output_dir.clone();
        }
        if let Some(total_regions) = overrides.total_regions {
            self.total_regions = total_regions;
        }
        if overrides.jump_factor.is_some() {
            self.jump_factor = overrides.jump_factor;
        }

        self.validate()?;
        Ok(self)
    }

    pub fn processor(&self) -> SeriesProcessor {
        SeriesProcessor::new()
            .with_file_suffix(self.file_suffix.as_str())
            .with_expected_regions(self.total_regions)
            .with_jump_factor(self.jump_factor)
    }

    pub fn chart_writer(&self) -> ChartWriter {
        ChartWriter::new()
            .with_size(self.chart_width, self.chart_height)
            .with_total_regions(self.total_regions)
    }
}

/// Values given explicitly on the command line.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub input_dir: Option<PathBuf>,
    pub file_suffix: Option<String>,
    pub output_dir: Option<PathBuf>,
    pub total_regions: Option<usize>,
    pub jump_factor: Option<u64>,
}
