use std::time::Duration;

use a11y_core::{filter_indices, HighlightList, NavKey, PopupInput};

use super::*;
use crate::context::{resolve_id, use_ui_context};
use crate::debounce::Debouncer;
use crate::dom;

const NO_KEYWORDS: &[String] = &[];

#[derive(Debug, Clone, PartialEq, Eq)]
/// Selectable entry of a [`Combobox`].
pub struct ComboboxOption {
    /// Value written to the bound signal on selection.
    pub value: String,
    /// Text shown in the list and matched by the filter.
    pub label: String,
    /// Disabled options stay visible but cannot be highlighted or chosen.
    pub disabled: bool,
}

impl ComboboxOption {
    /// Enabled option.
    pub fn new(value: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
            disabled: false,
        }
    }

    /// Sets the disabled flag.
    pub fn disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }
}

#[component]
/// Filterable single-select input (`role="combobox"` with a `role="listbox"` popup).
///
/// Typing filters the options after the configured debounce and clears the highlight.
pub fn Combobox(
    #[prop(into)] label: String,
    #[prop(into)] options: MaybeSignal<Vec<ComboboxOption>>,
    /// Selected option value.
    value: RwSignal<Option<String>>,
    #[prop(optional, into)] id: Option<String>,
    #[prop(optional, into)] placeholder: Option<String>,
    /// Overrides the configured filter debounce.
    #[prop(optional)]
    debounce_ms: Option<u64>,
    #[prop(optional)] on_change: Option<Callback<Option<String>>>,
    #[prop(optional)] layout_class: Option<&'static str>,
) -> impl IntoView {
    let ui = use_ui_context();
    let config = ui.config().combobox.clone();
    let delay = Duration::from_millis(debounce_ms.unwrap_or(config.filter_debounce_ms));
    let placeholder = placeholder.unwrap_or(config.placeholder);
    let empty_text = store_value(config.empty_text);

    let root_id = resolve_id(&ui, id, "combobox");
    let input_id = format!("{root_id}-input");
    let label_id = format!("{root_id}-label");
    let listbox_id = format!("{root_id}-listbox");
    let root = store_value(root_id.clone());
    let input = store_value(input_id.clone());

    let options = Signal::derive(move || options.get());
    let open = create_rw_signal(false);
    let query = create_rw_signal(String::new());
    let filter = create_rw_signal(String::new());
    let nav = create_rw_signal(HighlightList::new(format!("{root_id}-option")));
    let debouncer = Debouncer::default();

    let visible = create_memo(move |_| {
        let query = filter.get();
        options.with(|options| {
            filter_indices(
                options
                    .iter()
                    .map(|option| (option.label.as_str(), NO_KEYWORDS)),
                &query,
                usize::MAX,
            )
        })
    });

    // Every filter pass rebuilds the list with no highlight.
    create_effect(move |_| {
        let flags: Vec<bool> = visible.with(|visible| {
            options.with_untracked(|options| {
                visible
                    .iter()
                    .map(|index| options.get(*index).map_or(true, |option| option.disabled))
                    .collect()
            })
        });
        nav.update(|nav| nav.set_items(flags));
    });

    create_effect(move |_| {
        if !open.get() {
            nav.update(HighlightList::clear);
        }
    });

    // Keep the input text in step with the bound value.
    create_effect(move |_| {
        let label = value.get().and_then(|value| {
            options.with_untracked(|options| {
                options
                    .iter()
                    .find(|option| option.value == value)
                    .map(|option| option.label.clone())
            })
        });
        if let Some(label) = label {
            query.set(label);
        }
    });

    on_cleanup({
        let debouncer = debouncer.clone();
        move || debouncer.cancel()
    });

    let option_at = move |position: usize| {
        let index = visible.with_untracked(|visible| visible.get(position).copied())?;
        options.with_untracked(|options| options.get(index).cloned())
    };

    let close = move || {
        open.set(false);
    };

    let select = move |position: usize| {
        let Some(option) = option_at(position) else {
            return;
        };
        if option.disabled {
            return;
        }
        value.set(Some(option.value.clone()));
        query.set(option.label);
        filter.set(String::new());
        close();
        if let Some(on_change) = on_change {
            on_change.call(Some(option.value));
        }
    };

    let clear = move || {
        value.set(None);
        query.set(String::new());
        filter.set(String::new());
        close();
        if let Some(on_change) = on_change {
            on_change.call(None);
        }
        input.with_value(|id| {
            let _ = dom::focus_element_by_id(id);
        });
    };

    let scroll_to = move |position: Option<usize>| {
        if let Some(id) = position.and_then(|position| nav.with_untracked(|nav| nav.item_id(position))) {
            dom::scroll_into_view_nearest(&id);
        }
    };

    let outside = window_event_listener(ev::mousedown, move |ev| {
        if open.get_untracked() && !root.with_value(|id| dom::event_within(&ev, id)) {
            close();
        }
    });
    on_cleanup(move || outside.remove());

    let on_input = {
        let debouncer = debouncer.clone();
        move |ev: ev::Event| {
            let text = event_target_value(&ev);
            query.set(text.clone());
            open.set(true);
            debouncer.schedule(delay, move || {
                let _ = filter.try_set(text);
            });
        }
    };

    let on_keydown = move |ev: KeyboardEvent| {
        let Some(key) = nav_key(&ev) else {
            return;
        };
        let is_open = open.get_untracked();
        if !is_open && key == NavKey::Escape && !query.with_untracked(String::is_empty) {
            stop_event(&ev);
            clear();
            return;
        }
        let Some(effect) = nav.try_update(|nav| nav.handle_popup_key(is_open, key, PopupInput::TextField))
        else {
            return;
        };
        if effect.prevent_default {
            stop_event(&ev);
        }
        if effect.open.is_some() {
            open.set(true);
        }
        if let Some(position) = effect.execute {
            select(position);
        }
        if effect.close {
            close();
        }
        scroll_to(effect.scroll_to);
    };

    let rows = move || {
        let positions = visible.get();
        options.with(|options| {
            positions
                .iter()
                .enumerate()
                .filter_map(|(position, index)| {
                    options
                        .get(*index)
                        .map(|option| (position, option.value.clone(), option.label.clone(), option.disabled))
                })
                .collect::<Vec<_>>()
        })
    };

    view! {
        <div
            id=root_id
            class=merge_layout_class("ui-combobox", layout_class)
            data-ui-primitive="true"
            data-ui-kind="combobox"
            data-ui-state=move || if open.get() { "open" } else { "closed" }
        >
            <label id=label_id.clone() for=input_id.clone() data-ui-slot="label">
                {label}
            </label>
            <div data-ui-slot="control">
                <input
                    id=input_id.clone()
                    type="text"
                    class="ui-field-input"
                    role="combobox"
                    autocomplete="off"
                    aria-autocomplete="list"
                    aria-expanded=move || bool_token(open.get())
                    aria-controls=listbox_id.clone()
                    aria-activedescendant=move || {
                        if open.get() {
                            nav.with(HighlightList::active_descendant)
                        } else {
                            None
                        }
                    }
                    placeholder=placeholder
                    prop:value=move || query.get()
                    on:input=on_input
                    on:keydown=on_keydown
                    on:click=move |_| open.set(true)
                />
                <Show when=move || value.with(Option::is_some) fallback=|| ()>
                    <Button
                        variant=ButtonVariant::Quiet
                        size=ButtonSize::Sm
                        ui_slot="clear"
                        aria_label="Clear selection".to_string()
                        on_click=Callback::new(move |_| clear())
                    >
                        "×"
                    </Button>
                </Show>
            </div>
            <Show when=move || open.get() fallback=|| ()>
                <ul
                    id=listbox_id.clone()
                    class="ui-list-surface"
                    role="listbox"
                    aria-labelledby=label_id.clone()
                    data-ui-primitive="true"
                    data-ui-kind="listbox"
                >
                    {move || {
                        rows()
                            .into_iter()
                            .map(|(position, option_value, label, disabled)| {
                                let highlighted = move || nav.with(|nav| nav.highlight() == Some(position));
                                let chosen = move || value.with(|value| value.as_deref() == Some(option_value.as_str()));
                                view! {
                                    <li
                                        id=move || nav.with(|nav| nav.item_id(position))
                                        class="ui-list-option"
                                        class:highlighted=highlighted
                                        role="option"
                                        aria-selected=move || bool_token(highlighted())
                                        aria-disabled=disabled.then_some("true")
                                        data-ui-kind="option"
                                        data-ui-chosen=move || bool_token(chosen())
                                        on:mouseenter=move |_| {
                                            if nav.with_untracked(|nav| nav.highlight() != Some(position)) {
                                                nav.update(|nav| {
                                                    nav.hover(position);
                                                });
                                            }
                                        }
                                        on:mousedown=move |ev: MouseEvent| ev.prevent_default()
                                        on:click=move |_| select(position)
                                    >
                                        {label}
                                    </li>
                                }
                            })
                            .collect_view()
                    }}
                </ul>
                <Show when=move || visible.with(Vec::is_empty) fallback=|| ()>
                    <p role="status" data-ui-slot="empty">{empty_text.get_value()}</p>
                </Show>
            </Show>
        </div>
    }
}
