use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::PathBuf;

use crate::graph::{Ranking, SplitMode};

/// Environment variable naming an explicit config file
pub const CONFIG_ENV: &str = "GEDGRAPH_CONFIG";

const DEFAULT_CONFIG_FILE: &str = "gedgraph.toml";

/// Main configuration structure
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub chart: ChartConfig,
    #[serde(default)]
    pub style: StyleConfig,
}

/// Chart defaults used when the command line leaves them out
#[derive(Debug, Clone, Deserialize)]
pub struct ChartConfig {
    #[serde(default = "default_generations")]
    pub generations: usize,
    #[serde(default = "default_max_depth")]
    pub max_depth: usize,
    /// `descendants` or `ancestor-split`
    #[serde(default = "default_split")]
    pub split: String,
    /// `blood-then-male` or `length-only`
    #[serde(default = "default_ranking")]
    pub ranking: String,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            generations: default_generations(),
            max_depth: default_max_depth(),
            split: default_split(),
            ranking: default_ranking(),
        }
    }
}

/// Node fill colours for rendered charts (any GraphViz colour name)
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct StyleConfig {
    #[serde(default = "default_node_fill")]
    pub node_fill: String,
    #[serde(default = "default_start_fill")]
    pub start_fill: String,
    #[serde(default = "default_end_fill")]
    pub end_fill: String,
    #[serde(default = "default_path_fill")]
    pub path_fill: String,
    #[serde(default = "default_spouse_fill")]
    pub spouse_fill: String,
}

impl Default for StyleConfig {
    fn default() -> Self {
        Self {
            node_fill: default_node_fill(),
            start_fill: default_start_fill(),
            end_fill: default_end_fill(),
            path_fill: default_path_fill(),
            spouse_fill: default_spouse_fill(),
        }
    }
}

fn default_generations() -> usize {
    4
}

/// Deeper than the library's `DEFAULT_MAX_DEPTH` so the CLI still reaches
/// distant cousins (fifth cousins sit 12 steps apart)
fn default_max_depth() -> usize {
    50
}

fn default_split() -> String {
    "descendants".to_string()
}

fn default_ranking() -> String {
    "blood-then-male".to_string()
}

fn default_node_fill() -> String {
    "lightblue".to_string()
}

fn default_start_fill() -> String {
    "lightcoral".to_string()
}

fn default_end_fill() -> String {
    "lightblue".to_string()
}

fn default_path_fill() -> String {
    "lightgreen".to_string()
}

fn default_spouse_fill() -> String {
    "lightyellow".to_string()
}

impl Config {
    /// Load configuration from file
    ///
    /// Loads environment variables from .env file (if present) before loading config.
    /// Looks for config file in this order:
    /// 1. Path specified in GEDGRAPH_CONFIG environment variable
    /// 2. ./gedgraph.toml in current directory
    ///
    /// Without GEDGRAPH_CONFIG a missing ./gedgraph.toml means built-in defaults.
    pub fn load() -> Result<Self> {
        let _ = dotenv::dotenv();

        let (config_path, explicit) = match std::env::var(CONFIG_ENV) {
            Ok(path) => (PathBuf::from(path), true),
            Err(_) => (PathBuf::from(DEFAULT_CONFIG_FILE), false),
        };

        if !explicit && !config_path.exists() {
            log::debug!("No {} found, using default configuration", DEFAULT_CONFIG_FILE);
            return Ok(Config::default());
        }

        let config_str = std::fs::read_to_string(&config_path)
            .with_context(|| format!("Failed to read config file: {}", config_path.display()))?;

        let config = Self::from_toml_str(&config_str)
            .with_context(|| format!("Invalid config file: {}", config_path.display()))?;

        log::debug!("Loaded configuration from {}", config_path.display());
        Ok(config)
    }

    /// Parse and validate a TOML document
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: Config = toml::from_str(content).context("Failed to parse configuration")?;
        config.validate()?;
        Ok(config)
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        if self.chart.generations == 0 {
            anyhow::bail!("chart.generations must be greater than 0");
        }

        if self.chart.max_depth == 0 {
            anyhow::bail!("chart.max_depth must be greater than 0");
        }

        self.split_mode()?;
        self.ranking()?;

        Ok(())
    }

    pub fn split_mode(&self) -> Result<SplitMode> {
        self.chart
            .split
            .parse()
            .with_context(|| format!("chart.split is invalid: {}", self.chart.split))
    }

    pub fn ranking(&self) -> Result<Ranking> {
        self.chart
            .ranking
            .parse()
            .with_context(|| format!("chart.ranking is invalid: {}", self.chart.ranking))
    }
}
