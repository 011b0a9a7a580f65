//! Special handler system
//!
//! Specials are free-form commands embedded in page content. Each one starts
//! with a routing prefix (`color`, `em:`, `ps:` ...) that selects the handler
//! responsible for the rest of the command.
//!
//! ## Key Components
//!
//! - [`SpecialHandler`] - Trait implemented by every special handler
//! - [`HandlerRegistry`] - Owns handlers and routes specials by prefix
//! - [`split_prefix`] - Extracts the routing prefix from a special
//! - [`Remainder`] - Unconsumed rest of a special passed to its handler
//! - [`ColorSpecialHandler`], [`BgColorSpecialHandler`] - Built-in handlers
//!
//! ## Example
//!
//! ```rust
//! use dvispecials::actions::RecordingActions;
//! use dvispecials::handlers::{builtin_handlers, HandlerRegistry};
//!
//! let mut registry = HandlerRegistry::new();
//! registry.register_all(builtin_handlers(), Some("bgcolor"));
//!
//! let mut actions = RecordingActions::new();
//! assert!(registry.process("color push Red", &mut actions).unwrap());
//! assert!(!registry.process("background White", &mut actions).unwrap());
//! ```

mod background;
mod color;
mod prefix;
mod registry;
mod traits;
pub(crate) mod types;

pub use background::BgColorSpecialHandler;
pub use color::ColorSpecialHandler;
pub use prefix::split_prefix;
pub use registry::{DEFAULT_INFO_COLUMN_WIDTH, HandlerRegistry, IgnoreList};
pub use traits::{HandlerError, SpecialHandler};
pub use types::{Color, ColorError, HandlerInfo, Remainder};

/// Fresh instances of every built-in handler, in registration order
pub fn builtin_handlers() -> Vec<Box<dyn SpecialHandler>> {
    vec![
        Box::new(BgColorSpecialHandler::new()),
        Box::new(ColorSpecialHandler::new()),
    ]
}
