use super::models::Config;
use config::{ConfigError, Environment, File};
use std::env;
use std::path::{Path, PathBuf};

const CONFIG_ENV_VAR: &str = "DVISPECIALS_CONFIG";
const DEFAULT_CONFIG_PATH: &str = "config/dvispecials.toml";
const ENV_PREFIX: &str = "DVISPECIALS";
const ENV_SEPARATOR: &str = "__";

/// Path of the configuration file, honouring `DVISPECIALS_CONFIG`
pub fn default_path() -> PathBuf {
    env::var(CONFIG_ENV_VAR)
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from(DEFAULT_CONFIG_PATH))
}

/// Load configuration from multiple sources with priority:
/// 1. Defaults (embedded in structs)
/// 2. TOML file (if exists)
/// 3. Environment variables from .env file (via dotenvy)
/// 4. System environment variables (highest priority)
pub fn load() -> Result<Config, ConfigError> {
    load_from_path(default_path())
}

/// Same layering as [`load`], with an explicit configuration file
pub fn load_from_path(config_path: PathBuf) -> Result<Config, ConfigError> {
    load_with_dotenv(config_path, None)
}

/// Apply a `.env` file, then load `config_path` and the environment.
///
/// With `dotenv_path` unset the usual `.env` lookup from the working
/// directory is used. Variables already set in the environment win.
pub fn load_with_dotenv(
    config_path: PathBuf,
    dotenv_path: Option<&Path>,
) -> Result<Config, ConfigError> {
    // Load .env file if it exists (ignore errors if file doesn't exist)
    let _ = match dotenv_path {
        Some(path) => dotenvy::from_path(path),
        None => dotenvy::dotenv().map(|_| ()),
    };

    load_from_sources(config_path)
}

/// Load configuration from a specific path and environment
pub fn load_from_sources(config_path: PathBuf) -> Result<Config, ConfigError> {
    let mut builder = config::Config::builder();

    if config_path.exists() {
        tracing::info!("Loading configuration from: {}", config_path.display());
        builder = builder.add_source(File::from(config_path).required(false));
    } else {
        tracing::debug!(
            "Configuration file not found at {}, using defaults and environment overrides",
            config_path.display()
        );
    }

    // DVISPECIALS__SPECIALS__IGNORE -> specials.ignore
    builder = builder.add_source(
        Environment::with_prefix(ENV_PREFIX)
            .separator(ENV_SEPARATOR)
            .try_parsing(true),
    );

    let config = builder.build()?;
    config.try_deserialize()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_load_defaults_only() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("nonexistent.toml");

        let config = load_from_sources(config_path).unwrap();
        assert_eq!(config.specials.info_column_width, 10);
    }

    #[test]
    fn test_load_from_toml() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("test.toml");

        let toml_content = r#"
[specials]
ignore = "color, bgcolor"
info_column_width = 12

[logging]
level = "debug"
format = "json"
        "#;

        fs::write(&config_path, toml_content).unwrap();

        let config = load_from_sources(config_path).unwrap();
        assert_eq!(config.specials.ignore.as_deref(), Some("color, bgcolor"));
        assert_eq!(config.specials.info_column_width, 12);
        assert_eq!(config.logging.level, "debug");
    }

    #[test]
    fn test_dotenv_layer_applies_with_explicit_path() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("test.toml");
        let dotenv_path = temp_dir.path().join(".env");

        fs::write(&config_path, "[specials]\ninfo_column_width = 12\n").unwrap();
        fs::write(&dotenv_path, "DVISPECIALS__SPECIALS__DISABLE_ALL=true\n").unwrap();

        let config = load_with_dotenv(config_path, Some(&dotenv_path)).unwrap();
        assert!(config.specials.disable_all);
        assert_eq!(config.specials.info_column_width, 12);
    }
}
