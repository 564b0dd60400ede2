/*!
 * Simulator Configuration
 * Defaults from `limits`, overridable through environment variables
 *
 * Environment variables:
 * - PARTITION_SIM_MEMORY_MB: total simulated memory in MB (default: 64)
 * - PARTITION_SIM_MODE: `dynamic` (default) or `fixed:<partitions>`
 */

use super::limits::{DEFAULT_MEMORY_SIZE, MAX_MEMORY_SIZE};
use super::types::{RawAmount, Size};
use crate::memory::PartitionMode;
use miette::Diagnostic;
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const MEMORY_ENV: &str = "PARTITION_SIM_MEMORY_MB";
pub const MODE_ENV: &str = "PARTITION_SIM_MODE";

/// Configuration errors
#[derive(Error, Debug, Clone, PartialEq, Eq, Diagnostic)]
pub enum ConfigError {
    #[error("Invalid memory size '{value}': expected an integer between 1 and {max}")]
    #[diagnostic(code(config::invalid_memory), help("Set PARTITION_SIM_MEMORY_MB to a size in MB."))]
    InvalidMemory { value: String, max: Size },

    #[error("Invalid partition mode '{0}': expected 'dynamic' or 'fixed:<partitions>'")]
    #[diagnostic(code(config::invalid_mode), help("Example: PARTITION_SIM_MODE=fixed:4"))]
    InvalidMode(String),
}

/// Startup configuration for a simulator
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimulatorConfig {
    /// Total simulated memory in MB
    pub total_memory: Size,
    /// Partition mode established at startup
    pub initial_mode: PartitionMode,
    /// Partition count used when `initial_mode` is fixed
    pub fixed_partitions: Option<RawAmount>,
}

impl Default for SimulatorConfig {
    fn default() -> Self {
        Self {
            total_memory: DEFAULT_MEMORY_SIZE,
            initial_mode: PartitionMode::Dynamic,
            fixed_partitions: None,
        }
    }
}

impl SimulatorConfig {
    /// Load configuration from the process environment
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(raw) = lookup(MEMORY_ENV) {
            config.total_memory = parse_memory(&raw)?;
        }

        if let Some(raw) = lookup(MODE_ENV) {
            let (mode, partitions) = parse_mode(&raw)?;
            config.initial_mode = mode;
            config.fixed_partitions = partitions;
        }

        Ok(config)
    }
}

fn parse_memory(raw: &str) -> Result<Size, ConfigError> {
    raw.trim()
        .parse::<Size>()
        .ok()
        .filter(|size| (1..=MAX_MEMORY_SIZE).contains(size))
        .ok_or_else(|| ConfigError::InvalidMemory {
            value: raw.to_string(),
            max: MAX_MEMORY_SIZE,
        })
}

fn parse_mode(raw: &str) -> Result<(PartitionMode, Option<RawAmount>), ConfigError> {
    let value = raw.trim().to_ascii_lowercase();
    if value == "dynamic" {
        return Ok((PartitionMode::Dynamic, None));
    }

    // Partition count range is checked when the mode is established
    value
        .strip_prefix("fixed:")
        .and_then(|count| count.trim().parse::<RawAmount>().ok())
        .map(|count| (PartitionMode::Fixed, Some(count)))
        .ok_or_else(|| ConfigError::InvalidMode(raw.to_string()))
}
