//! Roving tabindex for tab lists. Selection follows focus.

use crate::keys::NavKey;

/// Result of routing a key through [`TabsState::handle_key`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TabsOutcome {
    /// The active tab changed; focus the tab at this index.
    Activated(usize),
    /// The key was recognised but nothing changed.
    Unchanged,
    /// Not handled.
    Ignored,
}

/// Active tab and per-tab disabled flags.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TabsState {
    disabled: Vec<bool>,
    active: usize,
}

impl TabsState {
    /// Creates state for tabs with the given disabled flags, activating `initial` when it is
    /// enabled and the first enabled tab otherwise.
    ///
    /// When every tab is disabled the first one stays the nominal active tab with `tabindex=0`
    /// and its panel shown; arrow keys and `set_active` change nothing.
    pub fn new(disabled: Vec<bool>, initial: usize) -> Self {
        let mut state = Self {
            disabled,
            active: 0,
        };
        if !state.set_active(initial) {
            if let Some(first) = state.step_from(None, true) {
                state.active = first;
            }
        }
        state
    }

    /// Index of the active tab.
    pub fn active(&self) -> usize {
        self.active
    }

    /// Number of tabs.
    pub fn len(&self) -> usize {
        self.disabled.len()
    }

    /// Returns whether there are no tabs.
    pub fn is_empty(&self) -> bool {
        self.disabled.is_empty()
    }

    /// Returns whether the tab at `index` is disabled (out of range counts as disabled).
    pub fn is_disabled(&self, index: usize) -> bool {
        self.disabled.get(index).copied().unwrap_or(true)
    }

    /// Activates `index`. Out-of-range or disabled indices are ignored and return `false`.
    pub fn set_active(&mut self, index: usize) -> bool {
        if self.is_disabled(index) {
            return false;
        }
        self.active = index;
        true
    }

    /// Roving `tabindex` for the tab at `index`.
    pub fn tabindex(&self, index: usize) -> i32 {
        if index == self.active {
            0
        } else {
            -1
        }
    }

    /// Routes arrow, Home and End keys.
    pub fn handle_key(&mut self, key: NavKey) -> TabsOutcome {
        let target = match key {
            NavKey::Right => self.step_from(Some(self.active), true),
            NavKey::Left => self.step_from(Some(self.active), false),
            NavKey::Home => self.step_from(None, true),
            NavKey::End => self.step_from(None, false),
            _ => return TabsOutcome::Ignored,
        };
        match target {
            Some(index) if index != self.active => {
                self.active = index;
                TabsOutcome::Activated(index)
            }
            _ => TabsOutcome::Unchanged,
        }
    }

    fn step_from(&self, start: Option<usize>, forward: bool) -> Option<usize> {
        let len = self.len();
        if len == 0 {
            return None;
        }
        let step = |index: usize| {
            if forward {
                (index + 1) % len
            } else {
                (index + len - 1) % len
            }
        };
        let mut index = match start {
            Some(current) => step(current.min(len - 1)),
            None if forward => 0,
            None => len - 1,
        };
        for _ in 0..len {
            if !self.disabled[index] {
                return Some(index);
            }
            index = step(index);
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn arrows_wrap_and_skip_disabled_tabs() {
        let mut tabs = TabsState::new(vec![false, true, false], 0);
        assert_eq!(tabs.handle_key(NavKey::Right), TabsOutcome::Activated(2));
        assert_eq!(tabs.handle_key(NavKey::Right), TabsOutcome::Activated(0));
        assert_eq!(tabs.handle_key(NavKey::Left), TabsOutcome::Activated(2));
        assert_eq!(tabs.tabindex(2), 0);
        assert_eq!(tabs.tabindex(0), -1);
    }

    #[test]
    fn set_active_bounds_checks_silently() {
        let mut tabs = TabsState::new(vec![false, false], 1);
        assert!(!tabs.set_active(5));
        assert_eq!(tabs.active(), 1);
        assert_eq!(tabs.handle_key(NavKey::Down), TabsOutcome::Ignored);
    }

    #[test]
    fn disabled_initial_tab_falls_back_to_first_enabled() {
        let tabs = TabsState::new(vec![true, false, false], 0);
        assert_eq!(tabs.active(), 1);
    }

    #[test]
    fn home_on_first_tab_is_unchanged() {
        let mut tabs = TabsState::new(vec![false, false, false], 0);
        assert_eq!(tabs.handle_key(NavKey::Home), TabsOutcome::Unchanged);
        assert_eq!(tabs.handle_key(NavKey::End), TabsOutcome::Activated(2));
    }

    #[test]
    fn all_disabled_tabs_pin_the_first_as_active() {
        let mut tabs = TabsState::new(vec![true, true, true], 2);
        assert_eq!(tabs.active(), 0);
        assert_eq!(tabs.tabindex(0), 0);
        assert_eq!(tabs.tabindex(2), -1);
        assert_eq!(tabs.handle_key(NavKey::Right), TabsOutcome::Unchanged);
        assert_eq!(tabs.handle_key(NavKey::End), TabsOutcome::Unchanged);
        assert!(!tabs.set_active(1));
        assert_eq!(tabs.active(), 0);
    }
}
