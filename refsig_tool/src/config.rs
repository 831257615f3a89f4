//! Configuration file for the CRS dump tool
//!
//! Accepts YAML (`.yml`/`.yaml`) or TOML (`.toml`) files.

use anyhow::{anyhow, bail, Result};
use common::types::{CyclicPrefix, LteCell, PhysicalCellId, SLOTS_PER_FRAME};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Main configuration structure
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ToolConfig {
    /// Cell configuration
    pub cell: LteCell,
    /// Output configuration
    #[serde(default)]
    pub output: OutputConfig,
    /// Logging configuration
    #[serde(default)]
    pub log: LogConfig,
}

/// Output configuration
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct OutputConfig {
    /// JSON output file, stdout when absent
    pub path: Option<String>,
    /// Slots to dump, whole frame when absent
    pub slots: Option<Vec<u8>>,
    /// Pretty-print the JSON
    #[serde(default)]
    pub pretty: bool,
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LogConfig {
    /// Log level filter
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for ToolConfig {
    fn default() -> Self {
        Self {
            cell: LteCell {
                id: PhysicalCellId(1),
                nof_prb: 25,
                nof_ports: 1,
                cp: CyclicPrefix::Normal,
            },
            output: OutputConfig::default(),
            log: LogConfig::default(),
        }
    }
}

impl ToolConfig {
    /// Load configuration, picking the format from the file extension
    pub fn from_file(path: &str) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| anyhow!("Cannot read {}: {}", path, e))?;

        match Path::new(path).extension().and_then(|e| e.to_str()) {
            Some("yml") | Some("yaml") => Self::from_yaml_str(&contents),
            Some("toml") => Self::from_toml_str(&contents),
            _ => bail!("Unsupported configuration format: {}", path),
        }
    }

    /// Parse YAML configuration
    pub fn from_yaml_str(contents: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(contents)?)
    }

    /// Parse TOML configuration
    pub fn from_toml_str(contents: &str) -> Result<Self> {
        Ok(toml::from_str(contents)?)
    }

    /// Check the cell and the requested slots
    pub fn validate(&self) -> Result<()> {
        self.cell.validate()?;

        if let Some(ns) = self.slots().into_iter().find(|&ns| ns >= SLOTS_PER_FRAME) {
            bail!("Invalid slot {} (max {})", ns, SLOTS_PER_FRAME - 1);
        }
        Ok(())
    }

    /// Slots to dump
    pub fn slots(&self) -> Vec<u8> {
        match &self.output.slots {
            Some(slots) => slots.clone(),
            None => (0..SLOTS_PER_FRAME).collect(),
        }
    }
}
