//! Driver feeding a line-oriented special stream through the registry
//!
//! Each non-blank line is one special as extracted from a DVI page.
//! `%%EndPage` closes the current page; other lines starting with `%` are
//! comments. Leading whitespace is ignored for both. Bytes that are not
//! valid UTF-8 are replaced rather than rejected.

use std::io::{self, BufRead};

use serde::Serialize;
use thiserror::Error;

use crate::actions::SpecialActions;
use crate::handlers::{HandlerError, HandlerRegistry, split_prefix};
use crate::observability::DispatchMetrics;

const END_PAGE_MARKER: &str = "%%EndPage";
const COMMENT_MARKER: char = '%';

#[derive(Debug, Error)]
pub enum StreamError {
    #[error("failed to read special stream: {0}")]
    Io(#[from] io::Error),

    #[error("line {line}: {source}")]
    Handler {
        line: usize,
        #[source]
        source: HandlerError,
    },
}

#[derive(Debug, Clone, Copy, Default)]
pub struct StreamOptions {
    /// Abort on the first handler fault instead of logging it
    pub strict: bool,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct StreamSummary {
    pub specials: usize,
    pub pages: usize,
}

/// Dispatch every special read from `reader`.
///
/// Unrecognized specials are logged and skipped. Handler faults are logged
/// and counted, or returned right away in strict mode. A page left open at
/// end of input is closed as if `%%EndPage` followed.
pub fn run<R: BufRead>(
    registry: &mut HandlerRegistry,
    mut reader: R,
    actions: &mut dyn SpecialActions,
    options: StreamOptions,
    metrics: &DispatchMetrics,
) -> Result<StreamSummary, StreamError> {
    let mut summary = StreamSummary::default();
    let mut page_open = false;

    let mut buf = Vec::new();
    let mut line_no = 0;

    loop {
        buf.clear();
        if reader.read_until(b'\n', &mut buf)? == 0 {
            break;
        }
        line_no += 1;

        // Specials are raw DVI bytes; invalid UTF-8 is replaced, not fatal
        let line = String::from_utf8_lossy(&buf);
        let special = line.trim_end_matches(['\r', '\n']);
        let marker = special.trim_start();

        if marker.is_empty() {
            continue;
        }
        if marker.starts_with(END_PAGE_MARKER) {
            end_page(registry, actions, metrics, &mut summary);
            page_open = false;
            continue;
        }
        if marker.starts_with(COMMENT_MARKER) {
            continue;
        }

        page_open = true;
        summary.specials += 1;
        match registry.process(special, actions) {
            Ok(true) => metrics.special_handled(),
            Ok(false) => {
                if registry.has_handler(split_prefix(special).0) {
                    metrics.special_declined();
                } else {
                    metrics.special_unrecognized();
                }
                tracing::warn!(line = line_no, special, "Special ignored");
            }
            Err(source) => {
                metrics.special_failed();
                if options.strict {
                    return Err(StreamError::Handler {
                        line: line_no,
                        source,
                    });
                }
                tracing::warn!(line = line_no, error = %source, "Special failed");
            }
        }
    }

    if page_open {
        end_page(registry, actions, metrics, &mut summary);
    }

    tracing::info!(
        specials = summary.specials,
        pages = summary.pages,
        "Special stream processed"
    );
    Ok(summary)
}

fn end_page(
    registry: &mut HandlerRegistry,
    actions: &mut dyn SpecialActions,
    metrics: &DispatchMetrics,
    summary: &mut StreamSummary,
) {
    registry.notify_end_page();
    actions.end_page();
    metrics.page_completed();
    summary.pages += 1;
}
