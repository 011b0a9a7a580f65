//! Configuration management for dvispecials
//!
//! This module provides a layered configuration system that loads settings from:
//! 1. Default values (embedded in structs)
//! 2. TOML configuration file
//! 3. Environment variables (highest priority)
//!
//! # Usage
//!
//! ```no_run
//! use dvispecials::config::Config;
//!
//! let config = Config::load().expect("Failed to load configuration");
//! println!("Ignored specials: {:?}", config.specials.ignore);
//! ```
//!
//! # Environment Variables
//!
//! Configuration can be overridden using environment variables with the pattern:
//! `DVISPECIALS__<section>__<key>`
//!
//! Examples:
//! - `DVISPECIALS__SPECIALS__IGNORE=color,bgcolor`
//! - `DVISPECIALS__LOGGING__FORMAT=json`
//!
//! # Configuration File
//!
//! By default, the configuration is loaded from `config/dvispecials.toml`.
//! This can be overridden using the `DVISPECIALS_CONFIG` environment variable.

mod models;
mod sources;
mod validation;

pub use models::{Config, LogFormat, LoggingConfig, SpecialsConfig};
pub use validation::ValidationError;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to load configuration: {0}")]
    LoadError(#[from] config::ConfigError),

    #[error("Configuration validation failed: {0}")]
    ValidationError(#[from] ValidationError),

    #[error("Failed to render configuration: {0}")]
    RenderError(#[from] toml::ser::Error),
}

impl Config {
    /// Load configuration from all sources (file + environment)
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration file is malformed or
    /// validation fails.
    pub fn load() -> Result<Self, ConfigError> {
        let config = sources::load()?;
        validation::validate(&config)?;
        Ok(config)
    }

    /// Load configuration from a specific path
    pub fn load_from_path(path: std::path::PathBuf) -> Result<Self, ConfigError> {
        let config = sources::load_from_path(path)?;
        validation::validate(&config)?;
        Ok(config)
    }

    /// Ignore spec to register handlers with, `None` meaning "keep all"
    pub fn ignore_spec(&self) -> Option<&str> {
        self.specials.ignore.as_deref()
    }

    /// Effective configuration rendered as TOML
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }
}
