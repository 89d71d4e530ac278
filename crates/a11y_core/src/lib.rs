//! Headless focus-management and keyboard-navigation state for the shared UI primitives.
//!
//! Everything here is DOM-free so it can be exercised natively. The browser bridge in
//! `system_ui` supplies a [`FocusScope`] over live elements and renders the ARIA attributes
//! these types compute (`aria-activedescendant`, roving `tabindex`, `aria-selected`).

#![warn(missing_docs, rustdoc::broken_intra_doc_links)]

pub mod calendar;
pub mod config;
pub mod error;
pub mod filter;
pub mod focus_trap;
pub mod highlight;
pub mod ids;
pub mod keys;
pub mod tabs;

pub use calendar::{
    day_cell_id, format_iso_date, parse_iso_date, CalendarGrid, DayCell, GridOutcome, WeekStart,
    YearMonth,
};
pub use config::{ComboboxConfig, CommandPaletteConfig, DatePickerConfig, OverlayConfig, UiConfig};
pub use error::{ConfigError, DateParseError, KeyChordError};
pub use filter::{filter_indices, matches_query};
pub use focus_trap::{
    decide_tab, is_tabbable, FocusScope, FocusTrapCore, TabDecision, FOCUSABLE_SELECTOR,
};
pub use highlight::{HighlightList, HighlightOutcome, HighlightReset, MenuEffect, PopupInput};
pub use ids::DomIdAllocator;
pub use keys::{KeyChord, NavKey};
pub use tabs::{TabsOutcome, TabsState};
