//! Run configuration for both pipelines.
//!
//! The reference behavior hardcoded the size list and chart styling; here both
//! live in an explicit [`BenchConfig`] that the entry points receive, loadable
//! from a TOML file and overridable from the command line.

use std::fs;
use std::path::{Path, PathBuf};

use clap::ValueEnum;
use serde::Deserialize;

use crate::error::{BenchError, Result};

/// Figure styling applied to every rendered chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ChartStyle {
    /// White background, dark axes.
    #[default]
    Light,
    /// Dark background, light axes.
    Dark,
}

/// Configuration shared by the generation and visualization entry points.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BenchConfig {
    /// Dataset sizes to generate, in emission order.
    pub sizes: Vec<u64>,
    /// Directory chart images are written into.
    pub output_dir: PathBuf,
    /// Figure styling.
    pub chart_style: ChartStyle,
}

impl Default for BenchConfig {
    fn default() -> Self {
        Self {
            sizes: vec![1_000, 10_000, 100_000],
            output_dir: PathBuf::from("."),
            chart_style: ChartStyle::default(),
        }
    }
}

impl BenchConfig {
    /// Loads a configuration from a TOML file and validates it.
    pub fn from_path(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path)?;
        let cfg: BenchConfig = toml::from_str(&raw)
            .map_err(|e| BenchError::Parse(format!("{}: {e}", path.display())))?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Rejects size lists the generator cannot honor.
    pub fn validate(&self) -> Result<()> {
        if self.sizes.is_empty() {
            return Err(BenchError::InvalidArgument(
                "size list must not be empty".into(),
            ));
        }
        if self.sizes.contains(&0) {
            return Err(BenchError::InvalidArgument(
                "dataset sizes must be positive".into(),
            ));
        }
        Ok(())
    }
}
