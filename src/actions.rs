//! Action context handed to special handlers
//!
//! Handlers never touch the output document directly; everything they do
//! goes through a [`SpecialActions`] implementation supplied by the caller.

use serde::Serialize;

use crate::handlers::Color;

/// Side effects special handlers may request
pub trait SpecialActions {
    /// Current drawing color
    fn color(&self) -> Color;

    fn set_color(&mut self, color: Color);

    /// Set the background color of the current page
    fn set_background(&mut self, color: Color);

    /// Called by the driver after a page is complete
    fn end_page(&mut self) {}
}

/// Action recorded by [`RecordingActions`]
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum Action {
    SetColor { page: u32, color: String },
    SetBackground { page: u32, color: String },
    EndPage { page: u32 },
}

/// Action context that keeps the drawing state and a log of every action
#[derive(Debug, Clone)]
pub struct RecordingActions {
    color: Color,
    background: Option<Color>,
    page: u32,
    events: Vec<Action>,
}

impl RecordingActions {
    pub fn new() -> Self {
        Self {
            color: Color::BLACK,
            background: None,
            page: 1,
            events: Vec::new(),
        }
    }

    /// Number of the page currently being processed (1-based)
    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn background(&self) -> Option<Color> {
        self.background
    }

    pub fn events(&self) -> &[Action] {
        &self.events
    }
}

impl Default for RecordingActions {
    fn default() -> Self {
        Self::new()
    }
}

impl SpecialActions for RecordingActions {
    fn color(&self) -> Color {
        self.color
    }

    fn set_color(&mut self, color: Color) {
        tracing::trace!(page = self.page, color = %color, "Set color");
        self.color = color;
        self.events.push(Action::SetColor {
            page: self.page,
            color: color.to_hex(),
        });
    }

    fn set_background(&mut self, color: Color) {
        tracing::trace!(page = self.page, color = %color, "Set page background");
        self.background = Some(color);
        self.events.push(Action::SetBackground {
            page: self.page,
            color: color.to_hex(),
        });
    }

    fn end_page(&mut self) {
        self.events.push(Action::EndPage { page: self.page });
        self.page += 1;
        self.background = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recording_actions_tracks_pages() {
        let mut actions = RecordingActions::new();
        actions.set_background(Color::WHITE);
        actions.set_color(Color::rgb(1.0, 0.0, 0.0));
        actions.end_page();

        assert_eq!(actions.page(), 2);
        assert!(actions.background().is_none());
        assert_eq!(actions.color(), Color::rgb(1.0, 0.0, 0.0));
        assert_eq!(
            actions.events(),
            &[
                Action::SetBackground { page: 1, color: "#ffffff".to_string() },
                Action::SetColor { page: 1, color: "#ff0000".to_string() },
                Action::EndPage { page: 1 },
            ]
        );
    }

    #[test]
    fn test_action_serializes_tagged() {
        let json = serde_json::to_value(Action::EndPage { page: 3 }).unwrap();
        assert_eq!(json, serde_json::json!({"action": "end_page", "page": 3}));
    }
}
