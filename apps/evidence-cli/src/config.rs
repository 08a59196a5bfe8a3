//! TOML configuration for the command-line tool
//!
//! ```toml
//! [resolve]
//! lineCoverageThreshold = 0.85
//! wordGapThreshold = 0.25
//! enableTableDetection = false
//! ```
//!
//! Every key is optional; missing keys take the engine defaults.

use anyhow::Context;
use evidence_engine::ResolveOptions;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Resolution tuning
    #[serde(default)]
    pub resolve: ResolveOptions,
}

impl Config {
    /// Load configuration from a TOML file
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The file cannot be read
    /// - The TOML is malformed
    /// - A threshold is out of range
    pub fn from_file<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        Self::from_toml_str(&content)
            .with_context(|| format!("Invalid config file: {}", path.display()))
    }

    pub fn from_toml_str(s: &str) -> anyhow::Result<Self> {
        let config: Self = toml::from_str(s).context("Failed to parse TOML configuration")?;
        config
            .resolve
            .validate()
            .context("Invalid [resolve] options")?;
        Ok(config)
    }

    /// `path` when given, defaults otherwise
    pub fn load(path: Option<&Path>) -> anyhow::Result<Self> {
        match path {
            Some(path) => Self::from_file(path),
            None => Ok(Self::default()),
        }
    }
}
