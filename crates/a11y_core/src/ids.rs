//! Unique DOM id generation for ARIA references.

use std::cell::Cell;

/// Allocates page-unique DOM ids for component instances.
///
/// One allocator is constructed by the application entry point and shared through the UI
/// context; nothing here is global.
#[derive(Debug)]
pub struct DomIdAllocator {
    prefix: String,
    next: Cell<u64>,
}

impl DomIdAllocator {
    /// Creates an allocator whose ids start with `prefix`.
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: sanitize_id_segment(&prefix.into()),
            next: Cell::new(1),
        }
    }

    /// Returns a fresh id such as `ui-combobox-3`.
    pub fn next_id(&self, kind: &str) -> String {
        let n = self.next.get();
        self.next.set(n.saturating_add(1));
        format!("{}-{}-{n}", self.prefix, sanitize_id_segment(kind))
    }
}

impl Default for DomIdAllocator {
    fn default() -> Self {
        Self::new("ui")
    }
}

/// Lower-cases and replaces characters that are awkward in ids and CSS selectors.
pub fn sanitize_id_segment(raw: &str) -> String {
    let cleaned: String = raw
        .trim()
        .chars()
        .map(|ch| {
            if ch.is_ascii_alphanumeric() || ch == '-' || ch == '_' {
                ch.to_ascii_lowercase()
            } else {
                '-'
            }
        })
        .collect();
    if cleaned.is_empty() {
        "x".to_string()
    } else {
        cleaned
    }
}
