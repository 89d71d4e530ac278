//! UI context provided by the application entry point.
//!
//! Components read configuration and allocate DOM ids through [`UiContext`]. The entry point
//! constructs it and installs it with [`UiProvider`]; it is released with the provider's
//! reactive owner. There is no lazily initialized global.

use std::rc::Rc;

use a11y_core::{DomIdAllocator, UiConfig};
use leptos::*;

#[derive(Clone)]
/// Leptos context carrying UI configuration and the DOM id allocator.
pub struct UiContext {
    config: Rc<UiConfig>,
    ids: Rc<DomIdAllocator>,
}

impl UiContext {
    /// Builds a context from `config`.
    pub fn new(config: UiConfig) -> Self {
        let ids = DomIdAllocator::new(config.id_prefix.clone());
        Self {
            config: Rc::new(config),
            ids: Rc::new(ids),
        }
    }

    /// Active configuration.
    pub fn config(&self) -> &UiConfig {
        &self.config
    }

    /// Allocates a page-unique DOM id for a component of `kind`.
    pub fn next_id(&self, kind: &str) -> String {
        self.ids.next_id(kind)
    }
}

impl Default for UiContext {
    fn default() -> Self {
        Self::new(UiConfig::default())
    }
}

#[component]
/// Provides [`UiContext`] to descendant components.
pub fn UiProvider(
    /// Context constructed by the entry point.
    context: UiContext,
    children: Children,
) -> impl IntoView {
    provide_context(context);
    children()
}

/// Returns the [`UiContext`] installed by [`UiProvider`].
pub fn use_ui_context() -> UiContext {
    use_context::<UiContext>().expect("UiContext not provided")
}

/// Returns `explicit` or a freshly allocated id of `kind`.
pub(crate) fn resolve_id(ui: &UiContext, explicit: Option<String>, kind: &str) -> String {
    explicit
        .filter(|id| !id.trim().is_empty())
        .unwrap_or_else(|| ui.next_id(kind))
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn ids_use_configured_prefix_and_never_repeat() {
        let ui = UiContext::new(UiConfig {
            id_prefix: "docs".to_string(),
            ..UiConfig::default()
        });
        assert_eq!(ui.next_id("modal"), "docs-modal-1");
        assert_eq!(ui.next_id("modal"), "docs-modal-2");

        let shared = ui.clone();
        assert_eq!(shared.next_id("tabs"), "docs-tabs-3");
    }

    #[test]
    fn explicit_ids_win_unless_blank() {
        let ui = UiContext::default();
        assert_eq!(resolve_id(&ui, Some("settings".to_string()), "modal"), "settings");
        assert_eq!(resolve_id(&ui, Some("  ".to_string()), "modal"), "ui-modal-1");
        assert_eq!(resolve_id(&ui, None, "drawer"), "ui-drawer-2");
    }
}
