//! Browser focus trap for overlays.
//!
//! [`FocusTrap`] drives [`FocusTrapCore`] over a live container found by DOM id and owns the
//! window-level keydown listener that intercepts Tab while active.

use std::{
    cell::{Cell, RefCell},
    rc::Rc,
};

use a11y_core::{FocusScope, FocusTrapCore};
use leptos::{leptos_dom::helpers::WindowListenerHandle, *};

use crate::dom;

/// [`FocusScope`] over the element with a given DOM id, resolved on every query so the
/// container may be rendered after the trap is created.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WebFocusScope {
    container_id: String,
}

impl WebFocusScope {
    /// Scope for the element `container_id`.
    pub fn new(container_id: impl Into<String>) -> Self {
        Self {
            container_id: container_id.into(),
        }
    }

    /// Container element id.
    pub fn container_id(&self) -> &str {
        &self.container_id
    }
}

impl FocusScope for WebFocusScope {
    type Element = web_sys::HtmlElement;

    fn focusable_elements(&self) -> Vec<Self::Element> {
        dom::focusable_descendants(&self.container_id)
    }

    fn active_element(&self) -> Option<Self::Element> {
        dom::active_html_element()
    }

    fn focus(&self, element: &Self::Element) {
        dom::focus_html_element(element);
    }

    fn is_connected(&self, element: &Self::Element) -> bool {
        element.is_connected()
    }
}

/// Confines Tab focus to a container and restores the previous focus on release.
///
/// Call [`FocusTrap::destroy`] when the owning component is disposed; otherwise an active
/// trap leaves its keydown listener installed on the window.
pub struct FocusTrap {
    core: Rc<RefCell<FocusTrapCore<WebFocusScope>>>,
    listener: RefCell<Option<WindowListenerHandle>>,
    destroyed: Cell<bool>,
}

impl FocusTrap {
    /// Binds a trap to the element `container_id`. Nothing is installed until activation.
    pub fn new(container_id: impl Into<String>) -> Self {
        Self {
            core: Rc::new(RefCell::new(FocusTrapCore::new(WebFocusScope::new(container_id)))),
            listener: RefCell::new(None),
            destroyed: Cell::new(false),
        }
    }

    /// Container element id.
    pub fn container_id(&self) -> String {
        self.core.borrow().scope().container_id().to_string()
    }

    /// Returns whether the trap currently intercepts Tab.
    pub fn is_active(&self) -> bool {
        self.core.borrow().is_active()
    }

    /// Captures the focused element, installs the Tab listener, and focuses the first
    /// focusable descendant. No-op while active or after [`FocusTrap::destroy`].
    pub fn activate(&self) {
        if self.destroyed.get() {
            logging::warn!("focus trap `{}` activated after destroy", self.container_id());
            return;
        }
        if !self.core.borrow_mut().activate() {
            return;
        }

        let core = Rc::clone(&self.core);
        let handle = window_event_listener(ev::keydown, move |ev| {
            if ev.key() != "Tab" {
                return;
            }
            let Ok(core) = core.try_borrow() else {
                return;
            };
            if core.handle_tab(ev.shift_key()) {
                ev.prevent_default();
            }
        });
        if let Some(stale) = self.listener.borrow_mut().replace(handle) {
            stale.remove();
        }
    }

    /// Removes the Tab listener and refocuses the element captured at activation when it is
    /// still attached. No-op while inactive.
    pub fn deactivate(&self) {
        if !self.core.borrow_mut().deactivate() {
            return;
        }
        self.remove_listener();
    }

    /// Focuses the first focusable descendant, whether or not the trap is active.
    pub fn focus_first(&self) -> bool {
        self.core.borrow().focus_first()
    }

    /// Focuses the last focusable descendant, whether or not the trap is active.
    pub fn focus_last(&self) -> bool {
        self.core.borrow().focus_last()
    }

    /// Forces deactivation and releases the listener. The trap cannot be reactivated.
    pub fn destroy(&self) {
        self.deactivate();
        self.remove_listener();
        self.destroyed.set(true);
    }

    fn remove_listener(&self) {
        if let Some(handle) = self.listener.borrow_mut().take() {
            handle.remove();
        }
    }
}

/// Wires a [`FocusTrap`] for `container_id` to an overlay's `open` signal.
///
/// Activation waits for the opened container to render. When `initial_focus` is set, that
/// element is focused after activation instead of the trap's first focusable descendant.
pub(crate) fn use_overlay_focus_trap(
    open: RwSignal<bool>,
    container_id: String,
    initial_focus: Option<String>,
) -> Rc<FocusTrap> {
    let trap = Rc::new(FocusTrap::new(container_id));

    create_effect({
        let trap = Rc::clone(&trap);
        move |_| {
            if open.get() {
                let trap = Rc::clone(&trap);
                let initial_focus = initial_focus.clone();
                dom::defer(move || {
                    if open.try_get_untracked() != Some(true) {
                        return;
                    }
                    trap.activate();
                    if let Some(id) = initial_focus {
                        let _ = dom::focus_element_by_id(&id);
                    }
                });
            } else {
                trap.deactivate();
            }
        }
    });

    on_cleanup({
        let trap = Rc::clone(&trap);
        move || trap.destroy()
    });

    trap
}
