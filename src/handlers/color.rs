use crate::actions::SpecialActions;

use super::traits::{HandlerError, SpecialHandler};
use super::types::{Color, Remainder};

/// Handler for dvips color specials
///
/// - `color push <spec>` saves the color on the stack and selects it
/// - `color pop` restores the previously pushed color
/// - `color <spec>` selects a color and empties the stack
#[derive(Debug, Default)]
pub struct ColorSpecialHandler {
    stack: Vec<Color>,
}

impl ColorSpecialHandler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn depth(&self) -> usize {
        self.stack.len()
    }
}

impl SpecialHandler for ColorSpecialHandler {
    fn prefixes(&self) -> &[&str] {
        &["color"]
    }

    fn name(&self) -> &str {
        "color"
    }

    fn info(&self) -> Option<&str> {
        Some("complete support of color specials")
    }

    fn process(
        &mut self,
        prefix: &str,
        remainder: Remainder<'_>,
        actions: &mut dyn SpecialActions,
    ) -> Result<bool, HandlerError> {
        let args = remainder.as_str().trim();
        let (command, rest) = args
            .split_once(char::is_whitespace)
            .unwrap_or((args, ""));

        match command {
            "" => Err(HandlerError::syntax(prefix, "missing color specification")),
            "push" => {
                let color =
                    Color::parse(rest).map_err(|e| HandlerError::invalid_color(prefix, e))?;
                self.stack.push(color);
                actions.set_color(color);
                Ok(true)
            }
            "pop" => {
                if self.stack.pop().is_none() {
                    tracing::warn!("Color stack underflow");
                }
                actions.set_color(self.stack.last().copied().unwrap_or(Color::BLACK));
                Ok(true)
            }
            _ => {
                let color =
                    Color::parse(args).map_err(|e| HandlerError::invalid_color(prefix, e))?;
                self.stack.clear();
                actions.set_color(color);
                Ok(true)
            }
        }
    }

    fn end_page(&mut self) {
        if !self.stack.is_empty() {
            tracing::warn!(depth = self.stack.len(), "Unbalanced color push at end of page");
            self.stack.clear();
        }
    }
}
