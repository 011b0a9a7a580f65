use super::models::Config;
use thiserror::Error;

const MAX_INFO_COLUMN_WIDTH: usize = 64;
const LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];

#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("info_column_width must be between 1 and {max}, got {actual}")]
    InvalidInfoColumnWidth { actual: usize, max: usize },

    #[error("Unknown log level '{0}', expected one of trace, debug, info, warn, error")]
    InvalidLogLevel(String),
}

/// Validate the entire configuration
pub fn validate(config: &Config) -> Result<(), ValidationError> {
    validate_specials(config)?;
    validate_logging(config)?;
    Ok(())
}

fn validate_specials(config: &Config) -> Result<(), ValidationError> {
    let width = config.specials.info_column_width;
    if width == 0 || width > MAX_INFO_COLUMN_WIDTH {
        return Err(ValidationError::InvalidInfoColumnWidth {
            actual: width,
            max: MAX_INFO_COLUMN_WIDTH,
        });
    }
    Ok(())
}

fn validate_logging(config: &Config) -> Result<(), ValidationError> {
    let level = config.logging.level.to_ascii_lowercase();
    if !LOG_LEVELS.contains(&level.as_str()) {
        return Err(ValidationError::InvalidLogLevel(
            config.logging.level.clone(),
        ));
    }
    Ok(())
}
