use crate::handlers::DEFAULT_INFO_COLUMN_WIDTH;
use serde::{Deserialize, Serialize};

/// Top-level configuration
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub specials: SpecialsConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Special handler selection and reporting
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SpecialsConfig {
    /// Names of handlers to leave out, e.g. "color, bgcolor"
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ignore: Option<String>,
    /// Register no handler at all
    #[serde(default)]
    pub disable_all: bool,
    /// Width of the name column in handler listings
    #[serde(default = "default_info_column_width")]
    pub info_column_width: usize,
}

impl Default for SpecialsConfig {
    fn default() -> Self {
        Self {
            ignore: None,
            disable_all: false,
            info_column_width: default_info_column_width(),
        }
    }
}

fn default_info_column_width() -> usize {
    DEFAULT_INFO_COLUMN_WIDTH
}

/// Log output format
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LoggingConfig {
    /// Default level; `RUST_LOG` takes precedence when set
    #[serde(default = "default_level")]
    pub level: String,
    #[serde(default)]
    pub format: LogFormat,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_level(),
            format: LogFormat::default(),
        }
    }
}

fn default_level() -> String {
    "info".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();

        assert_eq!(config.specials.info_column_width, 10);
        assert!(config.specials.ignore.is_none());
        assert!(!config.specials.disable_all);
        assert_eq!(config.logging.level, "info");
        assert_eq!(config.logging.format, LogFormat::Pretty);
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config: Config = toml::from_str(
            r#"
[specials]
ignore = "color"

[logging]
format = "json"
            "#,
        )
        .unwrap();

        assert_eq!(config.specials.ignore.as_deref(), Some("color"));
        assert_eq!(config.specials.info_column_width, 10);
        assert_eq!(config.logging.level, "info");
        assert_eq!(config.logging.format, LogFormat::Json);
    }
}
