//! Focus-trap lifecycle and Tab-cycling decisions.
//!
//! [`FocusTrapCore`] owns the activation state and the restoration target; the element tree
//! is reached only through a [`FocusScope`], which the browser layer implements over a live
//! container and tests implement over plain values.

/// CSS selector for candidate focusable descendants. Candidates are further filtered with
/// [`is_tabbable`] because `disabled` and negative `tabindex` cannot all be expressed here.
pub const FOCUSABLE_SELECTOR: &str = r#"a[href], button, textarea, input:not([type="hidden"]), select, [tabindex]"#;

/// Returns whether a selector-matched candidate takes part in Tab traversal.
///
/// `native` marks elements focusable without a `tabindex` (links, buttons, form controls). An
/// unparsable `tabindex` is ignored, as browsers do, so it only keeps native elements tabbable.
pub fn is_tabbable(native: bool, disabled: bool, tabindex: Option<&str>) -> bool {
    if disabled {
        return false;
    }
    match tabindex.map(str::trim) {
        Some(raw) => raw.parse::<i32>().map(|value| value >= 0).unwrap_or(native),
        None => native,
    }
}

/// Element access required by a focus trap.
pub trait FocusScope {
    /// Handle to a focusable element.
    type Element: Clone + PartialEq;

    /// Returns the container's tabbable descendants in document order, computed fresh.
    fn focusable_elements(&self) -> Vec<Self::Element>;

    /// Returns the document's currently focused element.
    fn active_element(&self) -> Option<Self::Element>;

    /// Moves focus to `element`. Failures are ignored.
    fn focus(&self, element: &Self::Element);

    /// Returns whether `element` is still attached to the document.
    fn is_connected(&self, element: &Self::Element) -> bool;
}

/// What to do with a Tab keydown while a trap is active.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TabDecision {
    /// No focusable descendants: swallow the key.
    Block,
    /// Move focus to the first focusable descendant and prevent default.
    WrapToFirst,
    /// Move focus to the last focusable descendant and prevent default.
    WrapToLast,
    /// Let the browser's traversal proceed.
    Allow,
}

/// Decides how a Tab or Shift+Tab press is handled given the current focusable set.
pub fn decide_tab<E: PartialEq>(focusables: &[E], active: Option<&E>, shift: bool) -> TabDecision {
    let (Some(first), Some(last)) = (focusables.first(), focusables.last()) else {
        return TabDecision::Block;
    };

    match active {
        Some(active) if focusables.contains(active) => {
            if shift && active == first {
                TabDecision::WrapToLast
            } else if !shift && active == last {
                TabDecision::WrapToFirst
            } else {
                TabDecision::Allow
            }
        }
        // Focus is elsewhere, possibly inside another open overlay.
        _ => TabDecision::Allow,
    }
}

/// Activation state and focus restoration for one trapped container.
#[derive(Debug)]
pub struct FocusTrapCore<S: FocusScope> {
    scope: S,
    active: bool,
    previous_focus: Option<S::Element>,
}

impl<S: FocusScope> FocusTrapCore<S> {
    /// Binds a trap to `scope` without activating it.
    pub fn new(scope: S) -> Self {
        Self {
            scope,
            active: false,
            previous_focus: None,
        }
    }

    /// Returns the bound scope.
    pub fn scope(&self) -> &S {
        &self.scope
    }

    /// Returns whether Tab interception is installed.
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Activates the trap. Returns `false` when it was already active.
    ///
    /// Captures the focused element for later restoration, then focuses the first focusable
    /// descendant when one exists.
    pub fn activate(&mut self) -> bool {
        if self.active {
            return false;
        }
        self.previous_focus = self.scope.active_element();
        self.active = true;
        let _ = self.focus_first();
        true
    }

    /// Deactivates the trap. Returns `false` when it was not active.
    ///
    /// Refocuses the element captured at activation if it is still connected.
    pub fn deactivate(&mut self) -> bool {
        if !self.active {
            return false;
        }
        self.active = false;
        if let Some(previous) = self.previous_focus.take() {
            if self.scope.is_connected(&previous) {
                self.scope.focus(&previous);
            }
        }
        true
    }

    /// Focuses the first focusable descendant. Independent of activation state.
    pub fn focus_first(&self) -> bool {
        match self.scope.focusable_elements().first() {
            Some(first) => {
                self.scope.focus(first);
                true
            }
            None => false,
        }
    }

    /// Focuses the last focusable descendant. Independent of activation state.
    pub fn focus_last(&self) -> bool {
        match self.scope.focusable_elements().last() {
            Some(last) => {
                self.scope.focus(last);
                true
            }
            None => false,
        }
    }

    /// Handles a Tab keydown. Returns whether the caller must prevent the default action.
    pub fn handle_tab(&self, shift: bool) -> bool {
        if !self.active {
            return false;
        }
        let focusables = self.scope.focusable_elements();
        let active = self.scope.active_element();
        match decide_tab(&focusables, active.as_ref(), shift) {
            TabDecision::Block => true,
            TabDecision::WrapToFirst => {
                if let Some(first) = focusables.first() {
                    self.scope.focus(first);
                }
                true
            }
            TabDecision::WrapToLast => {
                if let Some(last) = focusables.last() {
                    self.scope.focus(last);
                }
                true
            }
            TabDecision::Allow => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use pretty_assertions::assert_eq;

    use super::*;

    /// In-memory focus scope: elements are names, the document is a connected set.
    #[derive(Debug, Default)]
    struct FakeScope {
        focusables: RefCell<Vec<&'static str>>,
        focused: RefCell<Option<&'static str>>,
        detached: RefCell<Vec<&'static str>>,
    }

    impl FakeScope {
        fn with(focusables: &[&'static str], focused: Option<&'static str>) -> Self {
            Self {
                focusables: RefCell::new(focusables.to_vec()),
                focused: RefCell::new(focused),
                detached: RefCell::new(Vec::new()),
            }
        }

        /// Simulates the browser's default in-container Tab step.
        fn browser_tab(&self, shift: bool) {
            let focusables = self.focusables.borrow().clone();
            let current = *self.focused.borrow();
            let Some(position) = current.and_then(|c| focusables.iter().position(|f| *f == c))
            else {
                return;
            };
            let next = if shift { position - 1 } else { position + 1 };
            *self.focused.borrow_mut() = Some(focusables[next]);
        }
    }

    impl FocusScope for FakeScope {
        type Element = &'static str;

        fn focusable_elements(&self) -> Vec<Self::Element> {
            self.focusables.borrow().clone()
        }

        fn active_element(&self) -> Option<Self::Element> {
            *self.focused.borrow()
        }

        fn focus(&self, element: &Self::Element) {
            *self.focused.borrow_mut() = Some(*element);
        }

        fn is_connected(&self, element: &Self::Element) -> bool {
            !self.detached.borrow().contains(element)
        }
    }

    fn press_tab(trap: &FocusTrapCore<FakeScope>, shift: bool) {
        if !trap.handle_tab(shift) {
            trap.scope().browser_tab(shift);
        }
    }

    #[test]
    fn tabbable_filter_excludes_disabled_and_negative_tabindex() {
        assert!(is_tabbable(true, false, None));
        assert!(is_tabbable(false, false, Some("0")));
        assert!(is_tabbable(false, false, Some(" 2 ")));
        assert!(!is_tabbable(true, false, Some("-1")));
        assert!(!is_tabbable(true, true, None));
    }

    #[test]
    fn invalid_tabindex_is_ignored() {
        assert!(!is_tabbable(false, false, Some("abc")));
        assert!(!is_tabbable(false, false, Some("")));
        assert!(is_tabbable(true, false, Some("abc")));
    }

    #[test]
    fn decide_tab_wraps_at_both_boundaries() {
        let items = ["a", "b", "c"];
        assert_eq!(decide_tab(&items, Some(&"c"), false), TabDecision::WrapToFirst);
        assert_eq!(decide_tab(&items, Some(&"a"), true), TabDecision::WrapToLast);
        assert_eq!(decide_tab(&items, Some(&"b"), false), TabDecision::Allow);
        assert_eq!(decide_tab(&items, Some(&"b"), true), TabDecision::Allow);
        assert_eq!(decide_tab::<&str>(&[], None, false), TabDecision::Block);
        assert_eq!(decide_tab(&items, Some(&"outside"), true), TabDecision::Allow);
        assert_eq!(decide_tab(&items, None, false), TabDecision::Allow);
    }

    #[test]
    fn activate_focuses_first_and_is_idempotent() {
        let mut trap = FocusTrapCore::new(FakeScope::with(&["ok", "cancel"], Some("opener")));
        assert!(trap.activate());
        assert_eq!(trap.scope().active_element(), Some("ok"));

        trap.scope().focus(&"cancel");
        assert!(!trap.activate());
        assert_eq!(trap.scope().active_element(), Some("cancel"));
        assert!(trap.is_active());
    }

    #[test]
    fn tab_sequences_stay_inside_container() {
        let mut trap = FocusTrapCore::new(FakeScope::with(&["a", "b", "c"], Some("opener")));
        trap.activate();

        let presses = [false, false, false, false, true, true, true, false, true, true];
        for shift in presses {
            press_tab(&trap, shift);
            let focused = trap.scope().active_element().expect("focus");
            assert!(["a", "b", "c"].contains(&focused), "focus escaped to {focused}");
        }
    }

    #[test]
    fn tab_on_last_wraps_to_first_and_shift_tab_on_first_wraps_to_last() {
        let mut trap = FocusTrapCore::new(FakeScope::with(&["a", "b", "c"], None));
        trap.activate();

        trap.scope().focus(&"c");
        assert!(trap.handle_tab(false));
        assert_eq!(trap.scope().active_element(), Some("a"));

        assert!(trap.handle_tab(true));
        assert_eq!(trap.scope().active_element(), Some("c"));
    }

    #[test]
    fn focusables_are_recomputed_on_every_tab() {
        let mut trap = FocusTrapCore::new(FakeScope::with(&["a", "b"], None));
        trap.activate();
        trap.scope().focus(&"b");
        trap.scope().focusables.borrow_mut().push("error-link");

        assert!(!trap.handle_tab(false));
        trap.scope().browser_tab(false);
        assert_eq!(trap.scope().active_element(), Some("error-link"));
        assert!(trap.handle_tab(false));
        assert_eq!(trap.scope().active_element(), Some("a"));
    }

    #[test]
    fn empty_container_swallows_tab_without_moving_focus() {
        let mut trap = FocusTrapCore::new(FakeScope::with(&[], Some("opener")));
        assert!(trap.activate());
        assert_eq!(trap.scope().active_element(), Some("opener"));
        assert!(trap.handle_tab(false));
        assert!(trap.handle_tab(true));
        assert_eq!(trap.scope().active_element(), Some("opener"));
    }

    #[test]
    fn inactive_trap_never_intercepts() {
        let trap = FocusTrapCore::new(FakeScope::with(&["a"], Some("a")));
        assert!(!trap.handle_tab(false));
    }

    #[test]
    fn deactivate_restores_previous_focus() {
        let mut trap = FocusTrapCore::new(FakeScope::with(&["a", "b"], Some("opener")));
        trap.activate();
        assert!(trap.deactivate());
        assert_eq!(trap.scope().active_element(), Some("opener"));
        assert!(!trap.deactivate());
    }

    #[test]
    fn deactivate_skips_restoration_when_previous_is_detached() {
        let mut trap = FocusTrapCore::new(FakeScope::with(&["a", "b"], Some("opener")));
        trap.activate();
        trap.scope().detached.borrow_mut().push("opener");
        assert!(trap.deactivate());
        assert_eq!(trap.scope().active_element(), Some("a"));
    }

    #[test]
    fn focus_helpers_work_without_activation() {
        let trap = FocusTrapCore::new(FakeScope::with(&["search", "result"], None));
        assert!(trap.focus_last());
        assert_eq!(trap.scope().active_element(), Some("result"));
        assert!(trap.focus_first());
        assert_eq!(trap.scope().active_element(), Some("search"));
        assert!(!trap.is_active());
    }

    /// Document shared by several traps: one focus, one tab order.
    #[derive(Debug)]
    struct Page {
        order: Vec<&'static str>,
        focused: RefCell<Option<&'static str>>,
    }

    impl Page {
        fn browser_tab(&self, shift: bool) {
            let current = *self.focused.borrow();
            let Some(position) = current.and_then(|c| self.order.iter().position(|f| *f == c))
            else {
                return;
            };
            let next = if shift {
                position.checked_sub(1)
            } else {
                Some(position + 1).filter(|next| *next < self.order.len())
            };
            if let Some(next) = next {
                *self.focused.borrow_mut() = Some(self.order[next]);
            }
        }
    }

    #[derive(Debug)]
    struct PageScope<'a> {
        page: &'a Page,
        focusables: Vec<&'static str>,
    }

    impl FocusScope for PageScope<'_> {
        type Element = &'static str;

        fn focusable_elements(&self) -> Vec<Self::Element> {
            self.focusables.clone()
        }

        fn active_element(&self) -> Option<Self::Element> {
            *self.page.focused.borrow()
        }

        fn focus(&self, element: &Self::Element) {
            *self.page.focused.borrow_mut() = Some(*element);
        }

        fn is_connected(&self, _element: &Self::Element) -> bool {
            true
        }
    }

    #[test]
    fn stacked_traps_cycle_through_the_topmost_container() {
        let page = Page {
            order: vec!["settings", "m-close", "name", "save", "c-close", "cancel", "confirm"],
            focused: RefCell::new(Some("settings")),
        };
        let mut modal = FocusTrapCore::new(PageScope {
            page: &page,
            focusables: vec!["m-close", "name", "save"],
        });
        let mut confirm = FocusTrapCore::new(PageScope {
            page: &page,
            focusables: vec!["c-close", "cancel", "confirm"],
        });
        modal.activate();
        confirm.activate();
        assert_eq!(*page.focused.borrow(), Some("c-close"));

        // Each trap owns a listener; they run in installation order.
        let press = |shift: bool| {
            let modal_prevented = modal.handle_tab(shift);
            let confirm_prevented = confirm.handle_tab(shift);
            if !modal_prevented && !confirm_prevented {
                page.browser_tab(shift);
            }
            *page.focused.borrow()
        };

        assert_eq!(press(false), Some("cancel"));
        assert_eq!(press(false), Some("confirm"));
        assert_eq!(press(false), Some("c-close"));
        assert_eq!(press(true), Some("confirm"));

        confirm.deactivate();
        assert_eq!(*page.focused.borrow(), Some("m-close"));
    }
}
