use thiserror::Error;

use crate::actions::SpecialActions;

use super::types::{ColorError, Remainder};

/// Faults raised by special handlers while parsing their commands
#[derive(Debug, Error)]
pub enum HandlerError {
    #[error("{prefix}: invalid color specification: {source}")]
    InvalidColor {
        prefix: String,
        #[source]
        source: ColorError,
    },
    #[error("{prefix}: {message}")]
    Syntax { prefix: String, message: String },
}

impl HandlerError {
    pub fn syntax(prefix: &str, message: impl Into<String>) -> Self {
        Self::Syntax {
            prefix: prefix.to_string(),
            message: message.into(),
        }
    }

    pub fn invalid_color(prefix: &str, source: ColorError) -> Self {
        Self::InvalidColor {
            prefix: prefix.to_string(),
            source,
        }
    }
}

/// Special handler trait for prefix-routed commands
///
/// A handler claims one or more prefixes. The registry hands it every
/// special whose routing prefix matches one of them, together with the
/// unconsumed rest of the command and the caller's action context.
pub trait SpecialHandler {
    /// Prefixes this handler is responsible for (may be empty)
    fn prefixes(&self) -> &[&str];

    /// Stable name used for exclusion filtering and reporting
    fn name(&self) -> &str;

    /// Process a special command.
    ///
    /// Returns `Ok(true)` if the command was handled.
    fn process(
        &mut self,
        prefix: &str,
        remainder: Remainder<'_>,
        actions: &mut dyn SpecialActions,
    ) -> Result<bool, HandlerError>;

    /// Called at every page boundary (optional hook)
    fn end_page(&mut self) {}

    /// Short description shown in handler listings
    fn info(&self) -> Option<&str> {
        None
    }
}
