//! Roving highlight over a flat, filterable list (menus, listboxes, command results).
//!
//! The highlight is the single source of truth for keyboard and pointer input alike. Item ids
//! carry a generation counter so every rebuild publishes fresh `aria-activedescendant` targets.

use crate::keys::NavKey;

/// How the highlight is re-seeded after the list is rebuilt or the widget opens.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HighlightReset {
    /// No highlight (`-1`).
    Clear,
    /// First enabled item, or none when every item is disabled.
    FirstEnabled,
    /// Last enabled item, or none when every item is disabled.
    LastEnabled,
}

/// Result of routing a key press through [`HighlightList::handle_key`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HighlightOutcome {
    /// The highlight changed (or was re-evaluated) and now points here.
    Moved(Option<usize>),
    /// Enter/Space on an enabled item: fire its action and close.
    Execute(usize),
    /// Escape: close the owning widget.
    Close,
    /// The key is not handled by the list; let it through.
    Ignored,
}

/// Where keyboard focus sits while a popup list is navigated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PopupInput {
    /// A button that opens the list (menu button).
    Trigger,
    /// A text field that filters the list; Space, Home and End belong to text editing.
    TextField,
}

/// What the owning widget does after [`HighlightList::handle_popup_key`].
///
/// The highlight has already been updated; the widget applies the rest in field order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MenuEffect {
    /// Open the popup. The highlight is already seeded with this reset.
    pub open: Option<HighlightReset>,
    /// Run the item at this index.
    pub execute: Option<usize>,
    /// Close the popup. The highlight is already cleared.
    pub close: bool,
    /// Return focus to the trigger or input after closing.
    pub refocus: bool,
    /// Scroll this item into view.
    pub scroll_to: Option<usize>,
    /// Prevent the browser default and stop propagation.
    pub prevent_default: bool,
}

/// Highlight cursor over `len` items with per-item disabled flags.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HighlightList {
    base_id: String,
    generation: u64,
    disabled: Vec<bool>,
    highlight: Option<usize>,
}

impl HighlightList {
    /// Creates an empty list whose item ids derive from `base_id`.
    pub fn new(base_id: impl Into<String>) -> Self {
        Self {
            base_id: base_id.into(),
            generation: 0,
            disabled: Vec::new(),
            highlight: None,
        }
    }

    /// Replaces the displayed items, regenerates ids, and clears the highlight.
    pub fn set_items<I>(&mut self, disabled_flags: I)
    where
        I: IntoIterator<Item = bool>,
    {
        self.disabled = disabled_flags.into_iter().collect();
        self.generation = self.generation.wrapping_add(1);
        self.highlight = None;
    }

    /// Number of displayed items.
    pub fn len(&self) -> usize {
        self.disabled.len()
    }

    /// Returns whether no items are displayed.
    pub fn is_empty(&self) -> bool {
        self.disabled.is_empty()
    }

    /// Current highlight, `None` meaning nothing is highlighted.
    pub fn highlight(&self) -> Option<usize> {
        self.highlight
    }

    /// Returns whether `index` is disabled. Out-of-range indices count as disabled.
    pub fn is_disabled(&self, index: usize) -> bool {
        self.disabled.get(index).copied().unwrap_or(true)
    }

    /// Re-seeds the highlight according to `reset`.
    pub fn reset(&mut self, reset: HighlightReset) -> Option<usize> {
        self.highlight = match reset {
            HighlightReset::Clear => None,
            HighlightReset::FirstEnabled => self.search(None, true),
            HighlightReset::LastEnabled => self.search(None, false),
        };
        self.highlight
    }

    /// Clears the highlight (widget closed).
    pub fn clear(&mut self) {
        self.highlight = None;
    }

    /// Sets the highlight directly. Out-of-range indices clear it.
    pub fn set_highlight(&mut self, index: Option<usize>) {
        self.highlight = index.filter(|index| *index < self.len());
    }

    /// Pointer hover. Enabled items become highlighted; returns whether the highlight changed.
    pub fn hover(&mut self, index: usize) -> bool {
        if self.is_disabled(index) || self.highlight == Some(index) {
            return false;
        }
        self.highlight = Some(index);
        true
    }

    /// Moves to the next enabled item, wrapping past the end.
    pub fn highlight_next(&mut self) -> Option<usize> {
        self.highlight = self.search(self.highlight, true);
        self.highlight
    }

    /// Moves to the previous enabled item, wrapping past the start.
    pub fn highlight_prev(&mut self) -> Option<usize> {
        self.highlight = self.search(self.highlight, false);
        self.highlight
    }

    /// Moves to the first enabled item.
    pub fn highlight_first(&mut self) -> Option<usize> {
        self.highlight = self.search(None, true);
        self.highlight
    }

    /// Moves to the last enabled item.
    pub fn highlight_last(&mut self) -> Option<usize> {
        self.highlight = self.search(None, false);
        self.highlight
    }

    /// Returns the highlighted index when it can be executed.
    pub fn executable(&self) -> Option<usize> {
        self.highlight.filter(|index| !self.is_disabled(*index))
    }

    /// DOM id for the item at `index`, unique to the current generation.
    pub fn item_id(&self, index: usize) -> Option<String> {
        (index < self.len()).then(|| format!("{}-g{}-{index}", self.base_id, self.generation))
    }

    /// Value for `aria-activedescendant`; `None` means remove the attribute.
    pub fn active_descendant(&self) -> Option<String> {
        self.highlight.and_then(|index| self.item_id(index))
    }

    /// Routes a navigation key. Tab and paging keys are ignored.
    pub fn handle_key(&mut self, key: NavKey) -> HighlightOutcome {
        match key {
            NavKey::Down => HighlightOutcome::Moved(self.highlight_next()),
            NavKey::Up => HighlightOutcome::Moved(self.highlight_prev()),
            NavKey::Home => HighlightOutcome::Moved(self.highlight_first()),
            NavKey::End => HighlightOutcome::Moved(self.highlight_last()),
            NavKey::Enter | NavKey::Space => match self.executable() {
                Some(index) => HighlightOutcome::Execute(index),
                None => HighlightOutcome::Ignored,
            },
            NavKey::Escape => HighlightOutcome::Close,
            _ => HighlightOutcome::Ignored,
        }
    }

    /// Routes a key for a popup list widget (dropdown, combobox, command palette) given whether
    /// the popup is currently `open`.
    ///
    /// While closed, ArrowDown opens on the first enabled item and ArrowUp on the last; a trigger
    /// also opens on Enter or Space. While open, Tab closes without taking the key, and
    /// executing or dismissing clears the highlight so no active descendant outlives the popup.
    pub fn handle_popup_key(&mut self, open: bool, key: NavKey, input: PopupInput) -> MenuEffect {
        let text_field = input == PopupInput::TextField;
        if text_field && matches!(key, NavKey::Space | NavKey::Home | NavKey::End) {
            return MenuEffect::default();
        }

        if !open {
            let reset = match key {
                NavKey::Down => HighlightReset::FirstEnabled,
                NavKey::Up => HighlightReset::LastEnabled,
                NavKey::Enter | NavKey::Space if !text_field => HighlightReset::FirstEnabled,
                _ => return MenuEffect::default(),
            };
            let highlight = self.reset(reset);
            return MenuEffect {
                open: Some(reset),
                scroll_to: highlight,
                prevent_default: true,
                ..MenuEffect::default()
            };
        }

        if let NavKey::Tab { .. } = key {
            self.clear();
            return MenuEffect {
                close: true,
                ..MenuEffect::default()
            };
        }

        match self.handle_key(key) {
            HighlightOutcome::Moved(index) => MenuEffect {
                scroll_to: index,
                prevent_default: true,
                ..MenuEffect::default()
            },
            HighlightOutcome::Execute(index) => {
                self.clear();
                MenuEffect {
                    execute: Some(index),
                    close: true,
                    refocus: true,
                    prevent_default: true,
                    ..MenuEffect::default()
                }
            }
            HighlightOutcome::Close => {
                self.clear();
                MenuEffect {
                    close: true,
                    refocus: true,
                    prevent_default: true,
                    ..MenuEffect::default()
                }
            }
            // Enter or Space with nothing executable must not click the trigger.
            HighlightOutcome::Ignored => MenuEffect {
                prevent_default: key.is_activation(),
                ..MenuEffect::default()
            },
        }
    }

    /// Finds the next enabled index from `start`, visiting each item at most once.
    fn search(&self, start: Option<usize>, forward: bool) -> Option<usize> {
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
        let mut index = match start.filter(|index| *index < len) {
            Some(current) => step(current),
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

    fn list(flags: &[bool]) -> HighlightList {
        let mut list = HighlightList::new("menu");
        list.set_items(flags.iter().copied());
        list
    }

    #[test]
    fn next_and_prev_wrap_at_both_ends() {
        let mut nav = list(&[false, false, false]);
        nav.set_highlight(Some(2));
        assert_eq!(nav.highlight_next(), Some(0));
        assert_eq!(nav.highlight_prev(), Some(2));
    }

    #[test]
    fn arbitrary_sequences_stay_in_bounds() {
        for len in 1..6 {
            let mut nav = list(&vec![false; len]);
            let mut seed = 7_u32;
            for _ in 0..50 {
                seed = seed.wrapping_mul(1_103_515_245).wrapping_add(12_345);
                let index = if seed % 2 == 0 {
                    nav.highlight_next()
                } else {
                    nav.highlight_prev()
                };
                let index = index.expect("enabled item");
                assert!(index < len);
            }
        }
    }

    #[test]
    fn alternating_disabled_items_are_skipped() {
        let mut nav = list(&[false, true, false, true, false, true]);
        let mut visited = Vec::new();
        for _ in 0..9 {
            visited.push(nav.highlight_next().expect("enabled"));
        }
        assert_eq!(visited, vec![0, 2, 4, 0, 2, 4, 0, 2, 4]);
        assert_eq!(nav.highlight_prev(), Some(2));
    }

    #[test]
    fn all_disabled_terminates_with_no_highlight() {
        let mut nav = list(&[true, true, true]);
        nav.set_highlight(Some(1));
        assert_eq!(nav.highlight_next(), None);
        assert_eq!(nav.highlight_prev(), None);
        assert_eq!(nav.reset(HighlightReset::FirstEnabled), None);
        assert_eq!(nav.reset(HighlightReset::LastEnabled), None);
        assert_eq!(nav.active_descendant(), None);
    }

    #[test]
    fn single_enabled_item_is_revisited() {
        let mut nav = list(&[true, false, true]);
        assert_eq!(nav.highlight_next(), Some(1));
        assert_eq!(nav.highlight_next(), Some(1));
        assert_eq!(nav.highlight_prev(), Some(1));
    }

    #[test]
    fn empty_list_forces_no_highlight() {
        let mut nav = list(&[]);
        nav.set_highlight(Some(0));
        assert_eq!(nav.highlight(), None);
        assert_eq!(nav.handle_key(NavKey::Down), HighlightOutcome::Moved(None));
        assert_eq!(nav.handle_key(NavKey::Enter), HighlightOutcome::Ignored);
    }

    #[test]
    fn active_descendant_tracks_highlight() {
        let mut nav = list(&[false, false]);
        assert_eq!(nav.active_descendant(), None);
        nav.highlight_next();
        assert_eq!(nav.active_descendant(), nav.item_id(0));
        nav.highlight_next();
        assert_eq!(nav.active_descendant(), nav.item_id(1));
        nav.clear();
        assert_eq!(nav.active_descendant(), None);
    }

    #[test]
    fn rebuilding_regenerates_ids_and_clears_highlight() {
        let mut nav = list(&[false, false]);
        nav.highlight_next();
        let before = nav.item_id(0);
        nav.set_items([false, false]);
        assert_eq!(nav.highlight(), None);
        assert_ne!(nav.item_id(0), before);
        assert_eq!(nav.item_id(2), None);
    }

    #[test]
    fn hover_shares_state_with_keyboard() {
        let mut nav = list(&[false, true, false, false]);
        assert!(nav.hover(2));
        assert!(!nav.hover(2));
        assert!(!nav.hover(1));
        assert_eq!(nav.highlight_next(), Some(3));
        assert!(!nav.hover(9));
        assert_eq!(nav.highlight(), Some(3));
    }

    #[test]
    fn home_and_end_jump_to_enabled_edges() {
        let mut nav = list(&[true, false, false, true]);
        assert_eq!(nav.handle_key(NavKey::End), HighlightOutcome::Moved(Some(2)));
        assert_eq!(nav.handle_key(NavKey::Home), HighlightOutcome::Moved(Some(1)));
    }

    #[test]
    fn dropdown_scenario_skips_disabled_and_executes() {
        // Edit, Duplicate (disabled), Delete
        let mut nav = list(&[false, true, false]);
        assert_eq!(nav.reset(HighlightReset::FirstEnabled), Some(0));
        assert_eq!(nav.handle_key(NavKey::Down), HighlightOutcome::Moved(Some(2)));
        assert_eq!(nav.handle_key(NavKey::Enter), HighlightOutcome::Execute(2));
        assert_eq!(nav.handle_key(NavKey::Escape), HighlightOutcome::Close);
    }

    #[test]
    fn dropdown_keyboard_session_ends_closed_without_active_descendant() {
        // Edit, Duplicate (disabled), Delete
        let mut nav = list(&[false, true, false]);

        let opened = nav.handle_popup_key(false, NavKey::Down, PopupInput::Trigger);
        assert_eq!(
            opened,
            MenuEffect {
                open: Some(HighlightReset::FirstEnabled),
                scroll_to: Some(0),
                prevent_default: true,
                ..MenuEffect::default()
            }
        );
        assert_eq!(nav.active_descendant(), nav.item_id(0));

        let moved = nav.handle_popup_key(true, NavKey::Down, PopupInput::Trigger);
        assert_eq!(moved.scroll_to, Some(2));
        assert_eq!(nav.active_descendant(), nav.item_id(2));

        let chosen = nav.handle_popup_key(true, NavKey::Enter, PopupInput::Trigger);
        assert_eq!(
            chosen,
            MenuEffect {
                execute: Some(2),
                close: true,
                refocus: true,
                prevent_default: true,
                ..MenuEffect::default()
            }
        );
        assert_eq!(nav.highlight(), None);
        assert_eq!(nav.active_descendant(), None);
    }

    #[test]
    fn closed_trigger_opens_on_activation_keys_and_arrow_up_starts_at_the_end() {
        let mut nav = list(&[false, true, false, true]);
        let effect = nav.handle_popup_key(false, NavKey::Space, PopupInput::Trigger);
        assert_eq!(effect.open, Some(HighlightReset::FirstEnabled));

        nav.clear();
        let effect = nav.handle_popup_key(false, NavKey::Up, PopupInput::Trigger);
        assert_eq!(effect.open, Some(HighlightReset::LastEnabled));
        assert_eq!(nav.highlight(), Some(2));

        nav.clear();
        assert_eq!(
            nav.handle_popup_key(false, NavKey::Escape, PopupInput::Trigger),
            MenuEffect::default()
        );
        assert_eq!(nav.active_descendant(), None);
    }

    #[test]
    fn escape_and_tab_close_and_clear_the_highlight() {
        let mut nav = list(&[false, false]);
        nav.highlight_first();
        let dismissed = nav.handle_popup_key(true, NavKey::Escape, PopupInput::Trigger);
        assert!(dismissed.close && dismissed.refocus && dismissed.prevent_default);
        assert_eq!(nav.active_descendant(), None);

        nav.highlight_first();
        let tabbed = nav.handle_popup_key(true, NavKey::Tab { shift: false }, PopupInput::Trigger);
        assert!(tabbed.close);
        assert!(!tabbed.refocus);
        assert!(!tabbed.prevent_default);
        assert_eq!(nav.active_descendant(), None);
    }

    #[test]
    fn text_field_keeps_editing_keys_and_needs_an_arrow_to_open() {
        let mut nav = list(&[false, false]);
        for key in [NavKey::Space, NavKey::Enter, NavKey::Home] {
            assert_eq!(
                nav.handle_popup_key(false, key, PopupInput::TextField),
                MenuEffect::default()
            );
        }
        nav.handle_popup_key(false, NavKey::Down, PopupInput::TextField);
        assert_eq!(
            nav.handle_popup_key(true, NavKey::End, PopupInput::TextField),
            MenuEffect::default()
        );
        assert_eq!(nav.highlight(), Some(0));
    }

    #[test]
    fn enter_without_highlight_is_swallowed_but_does_nothing() {
        let mut nav = list(&[false, false]);
        let effect = nav.handle_popup_key(true, NavKey::Enter, PopupInput::TextField);
        assert_eq!(
            effect,
            MenuEffect {
                prevent_default: true,
                ..MenuEffect::default()
            }
        );
    }
}
