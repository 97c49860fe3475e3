use std::path::PathBuf;

use anyhow::{Context, Result};
use dotenvy::dotenv;

use crate::error::AppError;
use crate::models::OutputFormat;

fn default_max_file_size() -> usize {
    // 50 MB in bytes
    50 * 1024 * 1024
}

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub max_file_size: usize,
    pub output_dir: PathBuf,
    /// Raw `SPLITTER_FORMAT`, parsed only when no format flag is given.
    pub format: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            max_file_size: default_max_file_size(),
            output_dir: PathBuf::from("."),
            format: None,
        }
    }
}

impl Config {
    pub fn new() -> Result<Self> {
        // Load .env file first
        dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from `SPLITTER_*` variables; unset keys keep defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let mut config = Config::default();

        if let Some(dir) = lookup("SPLITTER_OUTPUT_DIR") {
            config.output_dir = PathBuf::from(dir);
        }
        config.format = lookup("SPLITTER_FORMAT");
        if let Some(size) = lookup("SPLITTER_MAX_FILE_SIZE") {
            config.max_file_size = size
                .trim()
                .parse()
                .with_context(|| format!("SPLITTER_MAX_FILE_SIZE is not a byte count: {}", size))?;
        }

        Ok(config)
    }

    /// `flag` wins over `SPLITTER_FORMAT`; with neither set the default is xlsx.
    pub fn output_format(&self, flag: Option<&str>) -> Result<OutputFormat, AppError> {
        match flag.or(self.format.as_deref()) {
            Some(raw) => raw.parse(),
            None => Ok(OutputFormat::default()),
        }
    }
}
