// src/config.rs - run configuration loaded from TOML

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::simulation::ConnectionMode;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct RunConfig {
    #[serde(default)]
    pub simulation: SimulationConfig,
}

/// Topology and run length. Queue interval and length limit are fixed
/// constants of the simulation and deliberately absent here.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SimulationConfig {
    #[serde(default = "default_queue_count")]
    pub queue_count: i64,

    #[serde(default = "default_processor_count")]
    pub processor_count: i64,

    #[serde(default = "default_connection_mode")]
    pub connection_mode: ConnectionMode,

    #[serde(default = "default_max_ticks")]
    pub max_ticks: u64,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            queue_count: default_queue_count(),
            processor_count: default_processor_count(),
            connection_mode: default_connection_mode(),
            max_ticks: default_max_ticks(),
        }
    }
}

fn default_queue_count() -> i64 {
    2
}

fn default_processor_count() -> i64 {
    2
}

fn default_connection_mode() -> ConnectionMode {
    ConnectionMode::OneToOne
}

fn default_max_ticks() -> u64 {
    100
}

pub fn load_config(path: impl AsRef<Path>) -> Result<RunConfig, ConfigError> {
    let raw = fs::read_to_string(path)?;
    let config = toml::from_str(&raw)?;
    Ok(config)
}
