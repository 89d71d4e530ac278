//! Configuration for the interactive primitives.
//!
//! The entry point builds a [`UiConfig`] (defaults, or JSON embedded by the host page) and
//! hands it to the UI context; components read their section from there. Individual
//! components also accept per-instance overrides as props.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::{calendar::WeekStart, error::ConfigError, keys::KeyChord};

/// Root configuration document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct UiConfig {
    /// Prefix for generated DOM ids.
    pub id_prefix: String,
    /// Modal, drawer and dialog behavior.
    pub overlay: OverlayConfig,
    /// Command palette behavior.
    pub command_palette: CommandPaletteConfig,
    /// Combobox behavior.
    pub combobox: ComboboxConfig,
    /// Date picker defaults.
    pub date_picker: DatePickerConfig,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            id_prefix: "ui".to_string(),
            overlay: OverlayConfig::default(),
            command_palette: CommandPaletteConfig::default(),
            combobox: ComboboxConfig::default(),
            date_picker: DatePickerConfig::default(),
        }
    }
}

impl UiConfig {
    /// Parses and validates a JSON config document. Missing fields take defaults.
    pub fn from_json(raw: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    /// Checks cross-field constraints.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.date_picker.validate()
    }
}

/// Dismissal behavior shared by overlays.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OverlayConfig {
    /// Escape closes the overlay.
    pub close_on_escape: bool,
    /// Clicking the backdrop closes the overlay.
    pub close_on_backdrop: bool,
}

impl Default for OverlayConfig {
    fn default() -> Self {
        Self {
            close_on_escape: true,
            close_on_backdrop: true,
        }
    }
}

/// Command palette settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CommandPaletteConfig {
    /// Global shortcut that opens the palette.
    pub shortcut: KeyChord,
    /// Search input placeholder.
    pub placeholder: String,
    /// Upper bound on rendered results.
    pub max_results: usize,
}

impl Default for CommandPaletteConfig {
    fn default() -> Self {
        Self {
            shortcut: KeyChord::default(),
            placeholder: "Type a command...".to_string(),
            max_results: 50,
        }
    }
}

/// Combobox settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ComboboxConfig {
    /// Delay before filter input is applied; `0` applies immediately.
    pub filter_debounce_ms: u64,
    /// Input placeholder.
    pub placeholder: String,
    /// Text shown when the filter matches nothing.
    pub empty_text: String,
}

impl Default for ComboboxConfig {
    fn default() -> Self {
        Self {
            filter_debounce_ms: 120,
            placeholder: "Search...".to_string(),
            empty_text: "No matches".to_string(),
        }
    }
}

/// Date picker defaults.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DatePickerConfig {
    /// Earliest selectable date.
    pub min_date: Option<NaiveDate>,
    /// Latest selectable date.
    pub max_date: Option<NaiveDate>,
    /// First grid column.
    pub week_start: WeekStart,
}

impl DatePickerConfig {
    /// Rejects an inverted range.
    pub fn validate(&self) -> Result<(), ConfigError> {
        match (self.min_date, self.max_date) {
            (Some(min), Some(max)) if min > max => Err(ConfigError::InvertedDateRange { min, max }),
            _ => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn partial_json_fills_defaults() {
        let config = UiConfig::from_json(
            r#"{
                "id_prefix": "site",
                "command_palette": { "shortcut": "Ctrl+Shift+P" },
                "date_picker": { "min_date": "2025-01-01", "week_start": "monday" }
            }"#,
        )
        .expect("config");

        assert_eq!(config.id_prefix, "site");
        assert!(config.command_palette.shortcut.matches("p", true, false, true, false));
        assert_eq!(config.command_palette.max_results, 50);
        assert_eq!(config.date_picker.week_start, WeekStart::Monday);
        assert_eq!(config.date_picker.min_date, NaiveDate::from_ymd_opt(2025, 1, 1));
        assert_eq!(config.overlay, OverlayConfig::default());
    }

    #[test]
    fn inverted_date_range_is_rejected() {
        let err = UiConfig::from_json(
            r#"{ "date_picker": { "min_date": "2025-02-01", "max_date": "2025-01-01" } }"#,
        )
        .expect_err("inverted");
        assert!(matches!(err, ConfigError::InvertedDateRange { .. }));
    }

    #[test]
    fn bad_shortcut_surfaces_as_json_error() {
        let err = UiConfig::from_json(r#"{ "command_palette": { "shortcut": "Hyper+K" } }"#)
            .expect_err("bad chord");
        assert!(err.to_string().contains("Hyper"));
    }
}
