//! Error types for parsing user- or config-supplied values.

use thiserror::Error;

/// Failure to parse a keyboard shortcut such as `Ctrl+K`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum KeyChordError {
    /// The chord string was empty or whitespace.
    #[error("key chord is empty")]
    Empty,
    /// The chord listed modifiers but no key.
    #[error("key chord `{0}` has no key")]
    MissingKey(String),
    /// A segment before the final key is not a known modifier.
    #[error("unknown modifier `{modifier}` in key chord `{chord}`")]
    UnknownModifier {
        /// Offending segment.
        modifier: String,
        /// Full chord input.
        chord: String,
    },
}

/// Failure to parse an ISO `YYYY-MM-DD` calendar date.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DateParseError {
    /// Input does not match the `YYYY-MM-DD` layout.
    #[error("date `{0}` is not in YYYY-MM-DD form")]
    Format(String),
    /// Fields parsed but do not name a real day.
    #[error("date `{0}` does not exist")]
    OutOfRange(String),
}

/// Failure to load a [`crate::UiConfig`] document.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The document is not valid JSON for the config schema.
    #[error("invalid ui config: {0}")]
    Json(#[from] serde_json::Error),
    /// `min_date` is later than `max_date`.
    #[error("date picker min {min} is after max {max}")]
    InvertedDateRange {
        /// Configured lower bound.
        min: chrono::NaiveDate,
        /// Configured upper bound.
        max: chrono::NaiveDate,
    },
}
