use a11y_core::{filter_indices, HighlightList, HighlightReset, KeyChord, NavKey, PopupInput};

use super::*;
use crate::context::{resolve_id, use_ui_context};
use crate::dom;
use crate::focus_trap::use_overlay_focus_trap;

#[derive(Clone)]
/// Action listed by [`CommandPalette`].
pub struct Command {
    /// Stable identifier, used for logging.
    pub id: String,
    /// Visible label, matched by the search query.
    pub label: String,
    /// Optional group caption shown next to the label.
    pub group: Option<String>,
    /// Extra search terms.
    pub keywords: Vec<String>,
    /// Display-only shortcut hint.
    pub shortcut: Option<String>,
    /// Disabled commands are listed but never highlighted or executed.
    pub disabled: bool,
    /// Invoked after the palette closes.
    pub action: Callback<()>,
}

impl Command {
    /// Enabled command with no group, keywords, or shortcut hint.
    pub fn new(id: impl Into<String>, label: impl Into<String>, action: Callback<()>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            group: None,
            keywords: Vec::new(),
            shortcut: None,
            disabled: false,
            action,
        }
    }

    /// Sets the group caption.
    pub fn group(mut self, group: impl Into<String>) -> Self {
        self.group = Some(group.into());
        self
    }

    /// Adds search keywords.
    pub fn keywords<I, S>(mut self, keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.keywords.extend(keywords.into_iter().map(Into::into));
        self
    }

    /// Sets the shortcut hint.
    pub fn shortcut(mut self, shortcut: impl Into<String>) -> Self {
        self.shortcut = Some(shortcut.into());
        self
    }

    /// Sets the disabled flag.
    pub fn disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }
}

#[component]
/// Searchable command launcher opened by a global keyboard shortcut.
///
/// The palette owns a focus trap but seeds focus on its search input. Results are re-filtered
/// on every keystroke and the first enabled result is highlighted.
pub fn CommandPalette(
    #[prop(into)] commands: MaybeSignal<Vec<Command>>,
    /// External open state. An internal signal is used when omitted.
    #[prop(optional)]
    open: Option<RwSignal<bool>>,
    #[prop(optional, into)] id: Option<String>,
    /// Overrides the configured shortcut.
    #[prop(optional)]
    shortcut: Option<KeyChord>,
    #[prop(optional, into)] placeholder: Option<String>,
    /// Overrides the configured result cap.
    #[prop(optional)]
    max_results: Option<usize>,
) -> impl IntoView {
    let ui = use_ui_context();
    let config = ui.config().command_palette.clone();
    let shortcut = shortcut.unwrap_or(config.shortcut);
    let placeholder = placeholder.unwrap_or(config.placeholder);
    let max_results = max_results.unwrap_or(config.max_results);

    let palette_id = resolve_id(&ui, id, "command-palette");
    let title_id = format!("{palette_id}-title");
    let input_id = format!("{palette_id}-input");
    let listbox_id = format!("{palette_id}-listbox");
    let keyshortcuts = shortcut.aria_keyshortcuts();

    let commands = Signal::derive(move || commands.get());
    let open = open.unwrap_or_else(|| create_rw_signal(false));
    let query = create_rw_signal(String::new());
    let nav = create_rw_signal(HighlightList::new(format!("{palette_id}-option")));
    let _trap = use_overlay_focus_trap(open, palette_id.clone(), Some(input_id.clone()));

    let visible = create_memo(move |_| {
        query.with(|query| {
            commands.with(|commands| {
                filter_indices(
                    commands
                        .iter()
                        .map(|command| (command.label.as_str(), command.keywords.as_slice())),
                    query,
                    max_results,
                )
            })
        })
    });

    create_effect(move |_| {
        let flags: Vec<bool> = visible.with(|visible| {
            commands.with_untracked(|commands| {
                visible
                    .iter()
                    .map(|index| commands.get(*index).map_or(true, |command| command.disabled))
                    .collect()
            })
        });
        nav.update(|nav| {
            nav.set_items(flags);
            nav.reset(HighlightReset::FirstEnabled);
        });
    });

    create_effect(move |was_open: Option<bool>| {
        let is_open = open.get();
        if is_open && was_open != Some(true) {
            query.set(String::new());
            nav.update(|nav| {
                nav.reset(HighlightReset::FirstEnabled);
            });
        } else if !is_open && was_open == Some(true) {
            nav.update(HighlightList::clear);
        }
        is_open
    });

    let toggle = window_event_listener(ev::keydown, move |ev| {
        if ev.repeat() {
            return;
        }
        if shortcut.matches(&ev.key(), ev.ctrl_key(), ev.alt_key(), ev.shift_key(), ev.meta_key()) {
            ev.prevent_default();
            open.update(|open| *open = !*open);
        }
    });
    on_cleanup(move || toggle.remove());

    let close = move || open.set(false);

    let execute = move |position: usize| {
        let Some(command) = visible
            .with_untracked(|visible| visible.get(position).copied())
            .and_then(|index| commands.with_untracked(|commands| commands.get(index).cloned()))
        else {
            return;
        };
        if command.disabled {
            return;
        }
        logging::log!("command palette: running `{}`", command.id);
        close();
        command.action.call(());
    };

    let on_keydown = move |ev: KeyboardEvent| {
        let Some(key) = nav_key(&ev) else {
            return;
        };
        // Tab stays with the focus trap.
        if let NavKey::Tab { .. } = key {
            return;
        }
        let Some(effect) = nav.try_update(|nav| nav.handle_popup_key(true, key, PopupInput::TextField))
        else {
            return;
        };
        if effect.prevent_default {
            stop_event(&ev);
        }
        if let Some(position) = effect.execute {
            execute(position);
        }
        if effect.close {
            close();
        }
        if let Some(id) = effect
            .scroll_to
            .and_then(|position| nav.with_untracked(|nav| nav.item_id(position)))
        {
            dom::scroll_into_view_nearest(&id);
        }
    };

    let rows = move || {
        let positions = visible.get();
        commands.with(|commands| {
            positions
                .iter()
                .enumerate()
                .filter_map(|(position, index)| {
                    commands.get(*index).map(|command| {
                        (
                            position,
                            command.label.clone(),
                            command.group.clone(),
                            command.shortcut.clone(),
                            command.disabled,
                        )
                    })
                })
                .collect::<Vec<_>>()
        })
    };

    view! {
        <Show when=move || open.get() fallback=|| ()>
            <div
                class="ui-modal-backdrop"
                data-ui-primitive="true"
                data-ui-kind="command-palette-backdrop"
                on:mousedown=move |ev: MouseEvent| {
                    if ev.target() == ev.current_target() {
                        close();
                    }
                }
            >
                <div
                    id=palette_id.clone()
                    class="ui-command-palette"
                    role="dialog"
                    aria-modal="true"
                    aria-labelledby=title_id.clone()
                    aria-keyshortcuts=keyshortcuts.clone()
                    tabindex="-1"
                    data-ui-primitive="true"
                    data-ui-kind="command-palette"
                >
                    <h2 id=title_id.clone() class="ui-visually-hidden">"Command palette"</h2>
                    <input
                        id=input_id.clone()
                        type="text"
                        class="ui-field-input"
                        role="combobox"
                        autocomplete="off"
                        aria-autocomplete="list"
                        aria-expanded="true"
                        aria-controls=listbox_id.clone()
                        aria-activedescendant=move || nav.with(HighlightList::active_descendant)
                        placeholder=placeholder.clone()
                        prop:value=move || query.get()
                        on:input=move |ev| query.set(event_target_value(&ev))
                        on:keydown=on_keydown
                    />
                    <ul
                        id=listbox_id.clone()
                        class="ui-list-surface"
                        role="listbox"
                        aria-labelledby=title_id.clone()
                        data-ui-kind="listbox"
                    >
                        {move || {
                            rows()
                                .into_iter()
                                .map(|(position, label, group, shortcut, disabled)| {
                                    let highlighted = move || nav.with(|nav| nav.highlight() == Some(position));
                                    view! {
                                        <li
                                            id=move || nav.with(|nav| nav.item_id(position))
                                            class="ui-list-option"
                                            class:highlighted=highlighted
                                            role="option"
                                            aria-selected=move || bool_token(highlighted())
                                            aria-disabled=disabled.then_some("true")
                                            data-ui-kind="option"
                                            on:mouseenter=move |_| {
                                                if nav.with_untracked(|nav| nav.highlight() != Some(position)) {
                                                    nav.update(|nav| {
                                                        nav.hover(position);
                                                    });
                                                }
                                            }
                                            on:mousedown=move |ev: MouseEvent| ev.prevent_default()
                                            on:click=move |_| execute(position)
                                        >
                                            <span data-ui-slot="label">{label}</span>
                                            {group.map(|group| view! { <span data-ui-slot="group">{group}</span> })}
                                            {shortcut.map(|shortcut| view! { <kbd data-ui-slot="shortcut">{shortcut}</kbd> })}
                                        </li>
                                    }
                                })
                                .collect_view()
                        }}
                    </ul>
                    <Show when=move || visible.with(Vec::is_empty) fallback=|| ()>
                        <p role="status" data-ui-slot="empty">"No matching commands"</p>
                    </Show>
                </div>
            </div>
        </Show>
    }
}
