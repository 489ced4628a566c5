//! Configuration types for the engine, service and client.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use tracing::warn;

/// Simulation engine parameters
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Rows of the grid a word is seeded into
    pub grid_rows: usize,
    /// Columns of the grid a word is seeded into
    pub grid_cols: usize,
    /// Upper bound on the number of generations simulated
    pub max_generations: u32,
    /// Recurrences with a shorter period than this stop the run
    pub repeat_pattern_threshold: u32,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            grid_rows: 60,
            grid_cols: 40,
            max_generations: 1000,
            repeat_pattern_threshold: 10,
        }
    }
}

impl EngineConfig {
    pub fn validate(&self) -> Result<()> {
        if self.grid_rows == 0 || self.grid_cols == 0 {
            return Err(Error::InvalidDimensions(format!(
                "grid must have at least one cell, got {}x{}",
                self.grid_rows, self.grid_cols
            )));
        }
        if self.repeat_pattern_threshold < 1 {
            return Err(Error::Validation(
                "repeat_pattern_threshold must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

/// Server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Server bind address
    pub bind_address: String,
    /// Server port
    pub port: u16,
    /// Database path (SQLite)
    pub database_path: String,
    /// Engine parameters used for every request
    pub engine: EngineConfig,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0".to_string(),
            port: 8000,
            database_path: "./data/service.db".to_string(),
            engine: EngineConfig::default(),
        }
    }
}

impl ServerConfig {
    /// Defaults overridden by `CGOL_BIND_ADDRESS`, `CGOL_PORT` and `ENGINE_DB_URL`
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Ok(addr) = std::env::var("CGOL_BIND_ADDRESS") {
            config.bind_address = addr;
        }
        if let Ok(port) = std::env::var("CGOL_PORT") {
            match port.parse() {
                Ok(port) => config.port = port,
                Err(_) => warn!("Ignoring invalid CGOL_PORT value: {}", port),
            }
        }
        if let Ok(path) = std::env::var("ENGINE_DB_URL") {
            config.database_path = path;
        }
        config
    }
}

/// Client configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Service base URL
    pub server_url: String,
    /// Per-request timeout (seconds)
    pub timeout_secs: u64,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            server_url: "http://127.0.0.1:8000".to_string(),
            timeout_secs: 15,
        }
    }
}

impl ClientConfig {
    /// Defaults overridden by `CGOL_SERVER_URL`
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Ok(url) = std::env::var("CGOL_SERVER_URL") {
            config.server_url = url;
        }
        config
    }
}
