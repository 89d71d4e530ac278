//! Shared control, overlay, list, and calendar primitives.

use leptos::ev::{KeyboardEvent, MouseEvent};
use leptos::*;

mod combobox;
mod command_palette;
mod controls;
mod date_picker;
mod menus;
mod navigation;
mod overlays;

pub use combobox::{Combobox, ComboboxOption};
pub use command_palette::{Command, CommandPalette};
pub use controls::Button;
pub use date_picker::DatePicker;
pub use menus::{Dropdown, DropdownItem};
pub use navigation::{Tab, TabDefinition, TabList, Tabs};
pub use overlays::{ConfirmDialog, Drawer, DrawerSide, Modal};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
/// Shared button variants.
pub enum ButtonVariant {
    /// Standard action button.
    #[default]
    Standard,
    /// Primary emphasized action button.
    Primary,
    /// Quiet/toggle style button.
    Quiet,
    /// Danger/destructive button.
    Danger,
}

impl ButtonVariant {
    pub(crate) fn token(self) -> &'static str {
        match self {
            Self::Standard => "standard",
            Self::Primary => "primary",
            Self::Quiet => "quiet",
            Self::Danger => "danger",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
/// Shared button sizing tokens.
pub enum ButtonSize {
    /// Dense button.
    Sm,
    /// Default button.
    #[default]
    Md,
    /// Large button.
    Lg,
}

impl ButtonSize {
    pub(crate) fn token(self) -> &'static str {
        match self {
            Self::Sm => "sm",
            Self::Md => "md",
            Self::Lg => "lg",
        }
    }
}

pub(crate) fn merge_layout_class(base: &'static str, layout_class: Option<&'static str>) -> String {
    match layout_class {
        Some(layout_class) if !layout_class.is_empty() => format!("{base} {layout_class}"),
        _ => base.to_string(),
    }
}

pub(crate) fn bool_token(value: bool) -> &'static str {
    if value {
        "true"
    } else {
        "false"
    }
}

/// Decodes a keydown into a [`a11y_core::NavKey`].
pub(crate) fn nav_key(ev: &KeyboardEvent) -> Option<a11y_core::NavKey> {
    a11y_core::NavKey::from_key(&ev.key(), ev.shift_key())
}

pub(crate) fn stop_event(ev: &KeyboardEvent) {
    ev.prevent_default();
    ev.stop_propagation();
}

pub(crate) fn stop_mouse_event(ev: &MouseEvent) {
    ev.prevent_default();
    ev.stop_propagation();
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn layout_class_is_appended_when_present() {
        assert_eq!(merge_layout_class("ui-modal", None), "ui-modal");
        assert_eq!(merge_layout_class("ui-modal", Some("")), "ui-modal");
        assert_eq!(
            merge_layout_class("ui-modal", Some("settings-dialog")),
            "ui-modal settings-dialog"
        );
    }

    #[test]
    fn tokens_are_stable() {
        assert_eq!(ButtonVariant::default().token(), "standard");
        assert_eq!(ButtonVariant::Danger.token(), "danger");
        assert_eq!(ButtonSize::default().token(), "md");
        assert_eq!(bool_token(true), "true");
    }
}
