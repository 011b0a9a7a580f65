use std::collections::BTreeMap;
use std::fmt::Write;

use crate::actions::SpecialActions;

use super::prefix::split_prefix;
use super::traits::{HandlerError, SpecialHandler};
use super::types::HandlerInfo;

pub const DEFAULT_INFO_COLUMN_WIDTH: usize = 10;

/// Set of handler names excluded from registration
///
/// Built from a free-form list where every non-alphanumeric character acts
/// as a separator, e.g. `"color, ps em"` or `"color:ps"`. Matching is by
/// whole token, so `em` never matches inside `system`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IgnoreList {
    normalized: String,
}

impl IgnoreList {
    const SEPARATOR: char = '%';

    pub fn parse(spec: &str) -> Self {
        let body: String = spec
            .chars()
            .map(|c| if c.is_ascii_alphanumeric() { c } else { Self::SEPARATOR })
            .collect();
        Self {
            normalized: format!("{sep}{body}{sep}", sep = Self::SEPARATOR),
        }
    }

    pub fn contains(&self, name: &str) -> bool {
        if self.normalized.is_empty() || name.is_empty() {
            return false;
        }
        let token = format!("{sep}{name}{sep}", sep = Self::SEPARATOR);
        self.normalized.contains(&token)
    }
}

/// Registry routing special prefixes to handler instances
///
/// Owns every registered handler until it is dropped. The prefix map only
/// stores indices into the owning pool, so a handler shadowed by a later
/// registration stays alive but is no longer reachable by that prefix.
pub struct HandlerRegistry {
    pool: Vec<Box<dyn SpecialHandler>>,
    handlers: BTreeMap<String, usize>,
    info_column_width: usize,
}

impl HandlerRegistry {
    pub fn new() -> Self {
        Self {
            pool: Vec::new(),
            handlers: BTreeMap::new(),
            info_column_width: DEFAULT_INFO_COLUMN_WIDTH,
        }
    }

    pub fn with_info_column_width(mut self, width: usize) -> Self {
        self.info_column_width = width;
        self
    }

    /// Register a single handler.
    ///
    /// Doesn't check whether a handler of the same kind is already
    /// registered; prefixes already mapped are taken over by `handler`.
    pub fn register(&mut self, handler: Box<dyn SpecialHandler>) {
        let index = self.pool.len();
        for prefix in handler.prefixes() {
            let previous = self.handlers.insert(prefix.to_string(), index);
            if let Some(previous) = previous.filter(|&p| p != index) {
                tracing::debug!(
                    prefix = %prefix,
                    shadowed = self.pool[previous].name(),
                    handler = handler.name(),
                    "Special prefix taken over"
                );
            }
        }
        tracing::debug!(
            handler = handler.name(),
            prefixes = ?handler.prefixes(),
            "Special handler registered"
        );
        self.pool.push(handler);
    }

    /// Register several handlers, dropping those named in `ignore`.
    ///
    /// Ownership of every handler passes to the registry; excluded ones are
    /// dropped right away.
    pub fn register_all<I>(&mut self, handlers: I, ignore: Option<&str>)
    where
        I: IntoIterator<Item = Box<dyn SpecialHandler>>,
    {
        let ignore = ignore.map(IgnoreList::parse).unwrap_or_default();
        for handler in handlers {
            if ignore.contains(handler.name()) {
                tracing::info!(handler = handler.name(), "Special handler ignored");
                drop(handler);
            } else {
                self.register(handler);
            }
        }
    }

    /// Look up the handler for an exact prefix, e.g. `color` or `em:`
    pub fn find(&self, prefix: &str) -> Option<&dyn SpecialHandler> {
        self.handlers
            .get(prefix)
            .map(|&index| self.pool[index].as_ref())
    }

    pub fn has_handler(&self, prefix: &str) -> bool {
        self.handlers.contains_key(prefix)
    }

    /// Number of owned handlers, including shadowed ones
    pub fn len(&self) -> usize {
        self.pool.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pool.is_empty()
    }

    /// Execute a special command.
    ///
    /// Returns `Ok(false)` if no handler owns the command's prefix. Errors
    /// raised by the handler are passed through untouched.
    pub fn process(
        &mut self,
        special: &str,
        actions: &mut dyn SpecialActions,
    ) -> Result<bool, HandlerError> {
        let (prefix, remainder) = split_prefix(special);
        let Some(&index) = self.handlers.get(prefix) else {
            tracing::debug!(prefix, "No handler for special");
            return Ok(false);
        };
        let handler = &mut self.pool[index];
        tracing::debug!(prefix, handler = handler.name(), "Dispatching special");
        handler.process(prefix, remainder, actions)
    }

    /// Notify handlers that the current page is complete.
    ///
    /// Walks the prefix map, so a handler registered under several prefixes
    /// is notified once per prefix.
    pub fn notify_end_page(&mut self) {
        for &index in self.handlers.values() {
            self.pool[index].end_page();
        }
    }

    /// Handler listing sorted by name.
    ///
    /// Only handlers reachable through a prefix are listed. Handlers are keyed
    /// by name, so of several instances sharing a name only the one met last
    /// in prefix order is reported.
    pub fn handler_info(&self) -> Vec<HandlerInfo> {
        let mut by_name: BTreeMap<&str, &dyn SpecialHandler> = BTreeMap::new();
        for &index in self.handlers.values() {
            let handler = self.pool[index].as_ref();
            by_name.insert(handler.name(), handler);
        }
        by_name
            .into_values()
            .map(|handler| HandlerInfo {
                name: handler.name().to_string(),
                info: handler.info().map(str::to_string),
            })
            .collect()
    }

    /// Text rendering of [`handler_info`](Self::handler_info), one handler
    /// per line with the name padded to the info column width.
    pub fn write_handler_info(&self) -> String {
        let width = self.info_column_width;
        let mut out = String::new();
        for entry in self.handler_info() {
            let _ = write!(out, "{:<width$} ", entry.name);
            if let Some(info) = &entry.info {
                out.push_str(info);
            }
            out.push('\n');
        }
        out
    }
}

impl Default for HandlerRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::actions::RecordingActions;
    use crate::handlers::types::Remainder;

    struct Echo {
        name: &'static str,
        prefixes: &'static [&'static str],
    }

    impl SpecialHandler for Echo {
        fn prefixes(&self) -> &[&str] {
            self.prefixes
        }

        fn name(&self) -> &str {
            self.name
        }

        fn process(
            &mut self,
            _prefix: &str,
            remainder: Remainder<'_>,
            _actions: &mut dyn SpecialActions,
        ) -> Result<bool, HandlerError> {
            Ok(!remainder.is_blank())
        }
    }

    fn echo(name: &'static str, prefixes: &'static [&'static str]) -> Box<dyn SpecialHandler> {
        Box::new(Echo { name, prefixes })
    }

    #[test]
    fn test_ignore_list_matches_whole_tokens() {
        let ignore = IgnoreList::parse("color, ps:system");
        assert!(ignore.contains("color"));
        assert!(ignore.contains("ps"));
        assert!(ignore.contains("system"));
        assert!(!ignore.contains("em"));
        assert!(!ignore.contains("col"));
    }

    #[test]
    fn test_empty_ignore_list_excludes_nothing() {
        assert!(!IgnoreList::default().contains("color"));
        assert!(!IgnoreList::parse("").contains("color"));
        assert!(!IgnoreList::parse(" , ").contains("color"));
    }

    #[test]
    fn test_empty_name_is_never_ignored() {
        assert!(!IgnoreList::parse("").contains(""));
        assert!(!IgnoreList::parse("color,,em").contains(""));

        let mut registry = HandlerRegistry::new();
        registry.register_all(vec![echo("", &["x"])], Some(""));
        assert!(registry.has_handler("x"));
    }

    #[test]
    fn test_find_is_exact() {
        let mut registry = HandlerRegistry::new();
        registry.register(echo("ps", &["ps:"]));

        assert!(registry.find("ps:").is_some());
        assert!(registry.find("ps").is_none());
        assert!(registry.find("ps::").is_none());
        assert!(registry.find("PS:").is_none());
    }

    #[test]
    fn test_handler_without_prefixes_is_owned_but_unreachable() {
        let mut registry = HandlerRegistry::new();
        registry.register(echo("silent", &[]));

        assert_eq!(registry.len(), 1);
        assert!(registry.handler_info().is_empty());
    }

    #[test]
    fn test_process_relays_handler_result() {
        let mut registry = HandlerRegistry::new();
        registry.register(echo("em", &["em:"]));
        let mut actions = RecordingActions::new();

        assert!(registry.process("em:line 1,2", &mut actions).unwrap());
        assert!(!registry.process("em:", &mut actions).unwrap());
        assert!(!registry.process("em line", &mut actions).unwrap());
    }

    #[test]
    fn test_write_handler_info_pads_names() {
        let mut registry = HandlerRegistry::new().with_info_column_width(6);
        registry.register(echo("em", &["em:"]));

        assert_eq!(registry.write_handler_info(), "em     \n");
    }
}
