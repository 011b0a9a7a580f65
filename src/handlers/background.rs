use crate::actions::SpecialActions;

use super::traits::{HandlerError, SpecialHandler};
use super::types::{Color, Remainder};

/// Handler for `background <spec>` specials setting the page color
#[derive(Debug, Default)]
pub struct BgColorSpecialHandler;

impl BgColorSpecialHandler {
    pub fn new() -> Self {
        Self
    }
}

impl SpecialHandler for BgColorSpecialHandler {
    fn prefixes(&self) -> &[&str] {
        &["background"]
    }

    fn name(&self) -> &str {
        "bgcolor"
    }

    fn info(&self) -> Option<&str> {
        Some("background color special")
    }

    fn process(
        &mut self,
        prefix: &str,
        remainder: Remainder<'_>,
        actions: &mut dyn SpecialActions,
    ) -> Result<bool, HandlerError> {
        if remainder.is_blank() {
            return Err(HandlerError::syntax(prefix, "missing color specification"));
        }
        let color = Color::parse(remainder.as_str())
            .map_err(|e| HandlerError::invalid_color(prefix, e))?;
        actions.set_background(color);
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::actions::RecordingActions;

    #[test]
    fn test_background_sets_page_color() {
        let mut handler = BgColorSpecialHandler::new();
        let mut actions = RecordingActions::new();
        let special = "background cmyk 0 0 0 0";
        let remainder = Remainder::new(special, "background".len()).unwrap();

        assert!(handler.process("background", remainder, &mut actions).unwrap());
        assert_eq!(actions.background(), Some(Color::WHITE));
    }

    #[test]
    fn test_background_requires_color() {
        let mut handler = BgColorSpecialHandler::new();
        let mut actions = RecordingActions::new();
        let remainder = Remainder::new("background  ", 10).unwrap();

        let err = handler.process("background", remainder, &mut actions).unwrap_err();
        assert_eq!(err.to_string(), "background: missing color specification");
        assert!(actions.background().is_none());
    }
}
