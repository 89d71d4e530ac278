use std::rc::Rc;

use a11y_core::{TabsOutcome, TabsState};

use super::*;
use crate::context::{resolve_id, use_ui_context};
use crate::dom;

#[component]
/// Shared tab list primitive.
pub fn TabList(
    #[prop(optional)] layout_class: Option<&'static str>,
    #[prop(optional, into)] aria_label: Option<String>,
    #[prop(optional)] on_keydown: Option<Callback<KeyboardEvent>>,
    children: Children,
) -> impl IntoView {
    view! {
        <div
            class=merge_layout_class("ui-tab-list", layout_class)
            data-ui-primitive="true"
            data-ui-kind="tab-list"
            role="tablist"
            aria-label=aria_label
            on:keydown=move |ev| {
                if let Some(on_keydown) = on_keydown.as_ref() {
                    on_keydown.call(ev);
                }
            }
        >
            {children()}
        </div>
    }
}

#[component]
/// Shared tab trigger primitive.
pub fn Tab(
    #[prop(optional)] layout_class: Option<&'static str>,
    #[prop(into)] id: String,
    #[prop(into)] controls: String,
    #[prop(optional, into)] selected: MaybeSignal<bool>,
    #[prop(into)] tabindex: MaybeSignal<i32>,
    #[prop(optional, into)] disabled: MaybeSignal<bool>,
    #[prop(optional)] on_click: Option<Callback<MouseEvent>>,
    children: Children,
) -> impl IntoView {
    view! {
        <Button
            layout_class=layout_class.unwrap_or("")
            id=id
            role="tab".to_string()
            aria_controls=controls
            aria_selected=selected.clone()
            selected=selected
            tabindex=tabindex
            disabled=disabled
            ui_slot="tab"
            variant=ButtonVariant::Quiet
            on_click=Callback::new(move |ev| {
                if let Some(on_click) = on_click.as_ref() {
                    on_click.call(ev);
                }
            })
        >
            {children()}
        </Button>
    }
}

#[derive(Clone)]
/// One tab and the panel it reveals, for [`Tabs`].
pub struct TabDefinition {
    /// Tab label.
    pub label: String,
    /// Disabled tabs are skipped by arrow keys and cannot be activated.
    pub disabled: bool,
    /// Panel body, rendered only while the tab is active.
    pub content: Rc<dyn Fn() -> View>,
}

impl TabDefinition {
    /// Enabled tab.
    pub fn new(label: impl Into<String>, content: impl Fn() -> View + 'static) -> Self {
        Self {
            label: label.into(),
            disabled: false,
            content: Rc::new(content),
        }
    }

    /// Sets the disabled flag.
    pub fn disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }
}

#[component]
/// Tab set with roving `tabindex`; selection follows focus.
pub fn Tabs(
    tabs: Vec<TabDefinition>,
    /// Initially active tab. Falls back to the first enabled tab.
    #[prop(optional)]
    initial: usize,
    /// Accessible name of the tab list.
    #[prop(into)]
    label: String,
    #[prop(optional, into)] id: Option<String>,
    #[prop(optional)] on_change: Option<Callback<usize>>,
    #[prop(optional)] layout_class: Option<&'static str>,
) -> impl IntoView {
    let ui = use_ui_context();
    let tabs_id = resolve_id(&ui, id, "tabs");
    let tab_ids: Vec<String> = (0..tabs.len()).map(|index| format!("{tabs_id}-tab-{index}")).collect();
    let panel_ids: Vec<String> = (0..tabs.len()).map(|index| format!("{tabs_id}-panel-{index}")).collect();
    let state = create_rw_signal(TabsState::new(
        tabs.iter().map(|tab| tab.disabled).collect(),
        initial,
    ));
    let tab_id_store = store_value(tab_ids.clone());

    let activate = move |index: usize| {
        let changed = state.try_update(|state| state.set_active(index)).unwrap_or(false);
        if changed {
            if let Some(on_change) = on_change {
                on_change.call(index);
            }
        }
    };

    let on_keydown = Callback::new(move |ev: KeyboardEvent| {
        let Some(key) = nav_key(&ev) else {
            return;
        };
        let outcome = state
            .try_update(|state| state.handle_key(key))
            .unwrap_or(TabsOutcome::Ignored);
        match outcome {
            TabsOutcome::Activated(index) => {
                stop_event(&ev);
                tab_id_store.with_value(|ids| {
                    if let Some(id) = ids.get(index) {
                        let _ = dom::focus_element_by_id(id);
                    }
                });
                if let Some(on_change) = on_change {
                    on_change.call(index);
                }
            }
            TabsOutcome::Unchanged => stop_event(&ev),
            TabsOutcome::Ignored => {}
        }
    });

    let triggers = tabs
        .iter()
        .enumerate()
        .map(|(index, tab)| {
            let label = tab.label.clone();
            view! {
                <Tab
                    id=tab_ids[index].clone()
                    controls=panel_ids[index].clone()
                    selected=Signal::derive(move || state.with(|state| state.active() == index))
                    tabindex=Signal::derive(move || state.with(|state| state.tabindex(index)))
                    disabled=tab.disabled
                    on_click=Callback::new(move |_| activate(index))
                >
                    {label}
                </Tab>
            }
        })
        .collect_view();

    let panels = tabs
        .into_iter()
        .enumerate()
        .map(|(index, tab)| {
            let active = move || state.with(|state| state.active() == index);
            let content = Rc::clone(&tab.content);
            view! {
                <div
                    id=panel_ids[index].clone()
                    class="ui-tab-panel"
                    role="tabpanel"
                    aria-labelledby=tab_ids[index].clone()
                    tabindex="0"
                    hidden=move || !active()
                    data-ui-kind="tab-panel"
                >
                    {move || active().then(|| content())}
                </div>
            }
        })
        .collect_view();

    view! {
        <div
            id=tabs_id
            class=merge_layout_class("ui-tabs", layout_class)
            data-ui-primitive="true"
            data-ui-kind="tabs"
        >
            <TabList aria_label=label on_keydown>
                {triggers}
            </TabList>
            {panels}
        </div>
    }
}
