//! Accessible Leptos overlay, list, and calendar primitives.
//!
//! Components share a single keyboard model: overlays confine Tab with a [`FocusTrap`], list
//! widgets move a roving highlight published through `aria-activedescendant`, and the date
//! picker moves a roving `tabindex` across its day grid. The state machines live in
//! [`a11y_core`]; this crate binds them to the DOM and to the stable `data-ui-*` contract used
//! by the stylesheet.
//!
//! Mount components under a [`UiProvider`] carrying a [`UiContext`].

#![warn(missing_docs, rustdoc::broken_intra_doc_links)]

mod context;
mod debounce;
mod dom;
mod focus_trap;
mod primitives;

pub use a11y_core::{KeyChord, UiConfig, WeekStart};
pub use context::{use_ui_context, UiContext, UiProvider};
pub use focus_trap::{FocusTrap, WebFocusScope};
pub use primitives::{
    Button, ButtonSize, ButtonVariant, Combobox, ComboboxOption, Command, CommandPalette,
    ConfirmDialog, DatePicker, Drawer, DrawerSide, Dropdown, DropdownItem, Modal, Tab,
    TabDefinition, TabList, Tabs,
};

/// Convenience imports for application crates consuming the shared primitive set.
pub mod prelude {
    pub use crate::{
        use_ui_context, Button, ButtonSize, ButtonVariant, Combobox, ComboboxOption, Command,
        CommandPalette, ConfirmDialog, DatePicker, Drawer, DrawerSide, Dropdown, DropdownItem,
        FocusTrap, KeyChord, Modal, Tab, TabDefinition, TabList, Tabs, UiConfig, UiContext,
        UiProvider, WeekStart,
    };
}
