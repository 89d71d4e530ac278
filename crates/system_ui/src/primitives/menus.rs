use a11y_core::{HighlightList, HighlightReset, PopupInput};

use super::*;
use crate::context::{resolve_id, use_ui_context};
use crate::dom;

#[derive(Clone)]
/// Entry rendered by [`Dropdown`].
pub struct DropdownItem {
    /// Visible label.
    pub label: String,
    /// Disabled items are skipped by keyboard navigation and ignore clicks.
    pub disabled: bool,
    /// Invoked when the item is chosen. The menu closes afterwards.
    pub on_select: Callback<()>,
}

impl DropdownItem {
    /// Enabled item with the given label and action.
    pub fn new(label: impl Into<String>, on_select: Callback<()>) -> Self {
        Self {
            label: label.into(),
            disabled: false,
            on_select,
        }
    }

    /// Sets the disabled flag.
    pub fn disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }
}

#[component]
/// Menu button: a trigger with `aria-haspopup="menu"` and a `role="menu"` popup.
///
/// DOM focus stays on the trigger while the menu is open; the highlighted item is published
/// through the trigger's `aria-activedescendant`.
pub fn Dropdown(
    #[prop(into)] label: String,
    #[prop(into)] items: MaybeSignal<Vec<DropdownItem>>,
    #[prop(optional, into)] id: Option<String>,
    /// External open state. An internal signal is used when omitted.
    #[prop(optional)]
    open: Option<RwSignal<bool>>,
    #[prop(optional)] layout_class: Option<&'static str>,
) -> impl IntoView {
    let ui = use_ui_context();
    let root_id = resolve_id(&ui, id, "dropdown");
    let trigger_id = format!("{root_id}-trigger");
    let menu_id = format!("{root_id}-menu");
    let open = open.unwrap_or_else(|| create_rw_signal(false));
    let items = Signal::derive(move || items.get());
    let nav = create_rw_signal(HighlightList::new(format!("{root_id}-item")));
    let open_reset = store_value(HighlightReset::FirstEnabled);
    let trigger = store_value(trigger_id.clone());
    let root = store_value(root_id.clone());

    let disabled_flags =
        move || items.with_untracked(|items| items.iter().map(|item| item.disabled).collect::<Vec<_>>());

    create_effect(move |was_open: Option<bool>| {
        let is_open = open.get();
        if is_open && was_open != Some(true) {
            let flags = disabled_flags();
            let reset = open_reset.get_value();
            nav.update(|nav| {
                nav.set_items(flags);
                nav.reset(reset);
            });
            open_reset.set_value(HighlightReset::FirstEnabled);
        } else if !is_open && was_open == Some(true) {
            nav.update(HighlightList::clear);
        }
        is_open
    });

    // Items replaced while open: fresh ids, no highlight.
    create_effect(move |_| {
        items.with(|_| ());
        if open.get_untracked() {
            let flags = disabled_flags();
            nav.update(|nav| nav.set_items(flags));
        }
    });

    let open_menu = move |reset: HighlightReset| {
        open_reset.set_value(reset);
        open.set(true);
    };

    let close = move |refocus: bool| {
        open.set(false);
        if refocus {
            trigger.with_value(|id| {
                let _ = dom::focus_element_by_id(id);
            });
        }
    };

    let execute = move |index: usize| {
        let Some(item) = items.with_untracked(|items| items.get(index).cloned()) else {
            return;
        };
        if item.disabled {
            return;
        }
        item.on_select.call(());
        close(true);
    };

    let scroll_to = move |index: Option<usize>| {
        if let Some(id) = index.and_then(|index| nav.with_untracked(|nav| nav.item_id(index))) {
            dom::scroll_into_view_nearest(&id);
        }
    };

    let outside = window_event_listener(ev::mousedown, move |ev| {
        if open.get_untracked() && !root.with_value(|id| dom::event_within(&ev, id)) {
            close(false);
        }
    });
    on_cleanup(move || outside.remove());

    let on_keydown = Callback::new(move |ev: KeyboardEvent| {
        let Some(key) = nav_key(&ev) else {
            return;
        };
        let is_open = open.get_untracked();
        let Some(effect) = nav.try_update(|nav| nav.handle_popup_key(is_open, key, PopupInput::Trigger))
        else {
            return;
        };
        if effect.prevent_default {
            stop_event(&ev);
        }
        if let Some(reset) = effect.open {
            open_menu(reset);
        }
        if let Some(index) = effect.execute {
            execute(index);
        }
        if effect.close {
            close(effect.refocus);
        }
        scroll_to(effect.scroll_to);
    });

    let rows = move || {
        items.with(|items| {
            items
                .iter()
                .enumerate()
                .map(|(index, item)| (index, item.label.clone(), item.disabled))
                .collect::<Vec<_>>()
        })
    };

    view! {
        <div
            id=root_id
            class=merge_layout_class("ui-dropdown", layout_class)
            data-ui-primitive="true"
            data-ui-kind="dropdown"
            data-ui-state=move || if open.get() { "open" } else { "closed" }
        >
            <Button
                id=trigger_id.clone()
                aria_haspopup="menu".to_string()
                aria_controls=menu_id.clone()
                aria_expanded=Signal::derive(move || open.get())
                aria_activedescendant=Signal::derive(move || {
                    if open.get() {
                        nav.with(HighlightList::active_descendant)
                    } else {
                        None
                    }
                })
                ui_slot="trigger"
                on_click=Callback::new(move |_| {
                    if open.get_untracked() {
                        close(false);
                    } else {
                        open_menu(HighlightReset::FirstEnabled);
                    }
                })
                on_keydown
            >
                {label}
            </Button>
            <Show when=move || open.get() fallback=|| ()>
                <ul
                    id=menu_id.clone()
                    class="ui-menu-surface"
                    role="menu"
                    aria-labelledby=trigger_id.clone()
                    data-ui-primitive="true"
                    data-ui-kind="menu-surface"
                >
                    {move || {
                        rows()
                            .into_iter()
                            .map(|(index, label, disabled)| {
                                let highlighted = move || nav.with(|nav| nav.highlight() == Some(index));
                                view! {
                                    <li
                                        id=move || nav.with(|nav| nav.item_id(index))
                                        class="ui-menu-item"
                                        class:highlighted=highlighted
                                        role="menuitem"
                                        tabindex="-1"
                                        aria-disabled=disabled.then_some("true")
                                        data-ui-kind="menu-item"
                                        data-ui-highlighted=move || bool_token(highlighted())
                                        on:mouseenter=move |_| {
                                            if nav.with_untracked(|nav| nav.highlight() != Some(index)) {
                                                nav.update(|nav| {
                                                    nav.hover(index);
                                                });
                                            }
                                        }
                                        on:mousedown=move |ev: MouseEvent| ev.prevent_default()
                                        on:click=move |ev: MouseEvent| {
                                            stop_mouse_event(&ev);
                                            execute(index);
                                        }
                                    >
                                        {label}
                                    </li>
                                }
                            })
                            .collect_view()
                    }}
                </ul>
            </Show>
        </div>
    }
}
