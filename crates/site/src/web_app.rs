use a11y_core::UiConfig;
use chrono::NaiveDate;
use leptos::*;
use leptos_meta::*;
use system_ui::prelude::*;

/// Id of the optional `<script type="application/json">` element carrying page configuration.
const CONFIG_ELEMENT_ID: &str = "ui-config";

/// Reads the page's [`UiConfig`], falling back to defaults when it is absent or invalid.
pub fn load_ui_config() -> UiConfig {
    let raw = web_sys::window()
        .and_then(|window| window.document())
        .and_then(|document| document.get_element_by_id(CONFIG_ELEMENT_ID))
        .and_then(|element| element.text_content());
    match raw {
        Some(raw) if !raw.trim().is_empty() => parse_ui_config(&raw),
        _ => UiConfig::default(),
    }
}

fn parse_ui_config(raw: &str) -> UiConfig {
    UiConfig::from_json(raw).unwrap_or_else(|err| {
        logging::warn!("ignoring page ui config: {err}");
        UiConfig::default()
    })
}

#[component]
pub fn SiteApp() -> impl IntoView {
    provide_meta_context();
    let context = UiContext::new(load_ui_config());

    view! {
        <Title text="Accessible primitives" />
        <Meta name="description" content="Focus and keyboard behaviour of the shared overlay, list, and calendar primitives." />

        <UiProvider context>
            <main class="site-root">
                <ShowcasePage />
            </main>
        </UiProvider>
    }
}

#[component]
pub fn ShowcasePage() -> impl IntoView {
    let ui = use_ui_context();
    let shortcut = ui.config().command_palette.shortcut.to_string();

    let last_action = create_rw_signal(String::from("Nothing yet"));
    let record = move |action: &str| {
        logging::log!("showcase: {action}");
        last_action.set(action.to_string());
    };

    let modal_open = create_rw_signal(false);
    let confirm_open = create_rw_signal(false);
    let drawer_open = create_rw_signal(false);
    let palette_open = create_rw_signal(false);
    let fruit = create_rw_signal::<Option<String>>(None);
    let due_date = create_rw_signal::<Option<NaiveDate>>(None);
    let draft_name = create_rw_signal(String::new());

    let menu_items = vec![
        DropdownItem::new("Edit", Callback::new(move |_| record("edit"))),
        DropdownItem::new("Duplicate", Callback::new(move |_| record("duplicate"))).disabled(true),
        DropdownItem::new("Delete", Callback::new(move |_| confirm_open.set(true))),
    ];

    let fruits = vec![
        ComboboxOption::new("apple", "Apple"),
        ComboboxOption::new("apricot", "Apricot"),
        ComboboxOption::new("banana", "Banana"),
        ComboboxOption::new("blackberry", "Blackberry").disabled(true),
        ComboboxOption::new("cherry", "Cherry"),
        ComboboxOption::new("grape", "Grape"),
        ComboboxOption::new("mango", "Mango"),
    ];

    let commands = vec![
        Command::new("open-modal", "Open settings dialog", Callback::new(move |_| modal_open.set(true)))
            .group("Dialogs")
            .keywords(["preferences", "modal"]),
        Command::new("open-drawer", "Open navigation drawer", Callback::new(move |_| drawer_open.set(true)))
            .group("Dialogs")
            .keywords(["sidebar", "panel"]),
        Command::new("delete", "Delete project", Callback::new(move |_| confirm_open.set(true)))
            .group("Project")
            .keywords(["remove", "trash"]),
        Command::new("clear-date", "Clear due date", Callback::new(move |_| due_date.set(None)))
            .group("Project"),
        Command::new("archive", "Archive project", Callback::new(move |_| record("archive")))
            .group("Project")
            .disabled(true),
    ];

    let tabs = vec![
        TabDefinition::new("Overview", || {
            view! { <p>"Arrow keys move between tabs; the selection follows focus."</p> }.into_view()
        }),
        TabDefinition::new("Shortcuts", move || {
            view! { <p>"Home and End jump to the first and last enabled tab."</p> }.into_view()
        }),
        TabDefinition::new("Billing", || view! { <p>"Unavailable"</p> }.into_view()).disabled(true),
        TabDefinition::new("History", || {
            view! { <p>"Disabled tabs are skipped."</p> }.into_view()
        }),
    ];

    view! {
        <h1>"Accessible primitives"</h1>
        <p>
            "Press " <kbd>{shortcut}</kbd> " anywhere to open the command palette. Last action: "
            <output aria-live="polite">{move || last_action.get()}</output>
        </p>

        <section aria-labelledby="showcase-overlays">
            <h2 id="showcase-overlays">"Overlays"</h2>
            <Button variant=ButtonVariant::Primary on_click=Callback::new(move |_| modal_open.set(true))>
                "Settings"
            </Button>
            <Button on_click=Callback::new(move |_| drawer_open.set(true))>"Navigation"</Button>
            <Button variant=ButtonVariant::Danger on_click=Callback::new(move |_| confirm_open.set(true))>
                "Delete project"
            </Button>
            <Button variant=ButtonVariant::Quiet on_click=Callback::new(move |_| palette_open.set(true))>
                "Commands"
            </Button>
        </section>

        <section aria-labelledby="showcase-lists">
            <h2 id="showcase-lists">"Lists"</h2>
            <Dropdown label="Actions" items=menu_items />
            <Combobox
                label="Favourite fruit"
                options=fruits
                value=fruit
                on_change=Callback::new(move |value: Option<String>| {
                    record(&format!("fruit: {}", value.unwrap_or_else(|| "none".to_string())));
                })
            />
        </section>

        <section aria-labelledby="showcase-calendar">
            <h2 id="showcase-calendar">"Calendar"</h2>
            <DatePicker
                label="Due date"
                value=due_date
                week_start=WeekStart::Monday
                on_change=Callback::new(move |date: Option<NaiveDate>| {
                    record(&format!("due date: {}", date.map(|date| date.to_string()).unwrap_or_default()));
                })
            />
        </section>

        <section aria-labelledby="showcase-tabs">
            <h2 id="showcase-tabs">"Tabs"</h2>
            <Tabs label="Project sections" tabs />
        </section>

        <Modal open=modal_open title="Settings" on_close=Callback::new(move |_| record("settings closed"))>
            <label for="showcase-project-name">"Project name"</label>
            <input
                id="showcase-project-name"
                type="text"
                prop:value=move || draft_name.get()
                on:input=move |ev| draft_name.set(event_target_value(&ev))
            />
            <Button
                variant=ButtonVariant::Primary
                on_click=Callback::new(move |_| {
                    record(&format!("renamed to {}", draft_name.get_untracked()));
                    modal_open.set(false);
                })
            >
                "Save"
            </Button>
        </Modal>

        <ConfirmDialog
            open=confirm_open
            title="Delete project?"
            message="This removes the project and its history."
            confirm_label="Delete"
            variant=ButtonVariant::Danger
            on_confirm=Callback::new(move |_| record("deleted"))
            on_cancel=Callback::new(move |_| record("delete cancelled"))
        />

        <Drawer open=drawer_open title="Navigation" side=DrawerSide::Left>
            <nav aria-label="Sections">
                <a href="#showcase-overlays">"Overlays"</a>
                <a href="#showcase-lists">"Lists"</a>
                <a href="#showcase-calendar">"Calendar"</a>
                <a href="#showcase-tabs">"Tabs"</a>
            </nav>
        </Drawer>

        <CommandPalette commands open=palette_open />
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn page_config_overrides_defaults() {
        let config = parse_ui_config(r#"{ "id_prefix": "demo", "combobox": { "filter_debounce_ms": 0 } }"#);
        assert_eq!(config.id_prefix, "demo");
        assert_eq!(config.combobox.filter_debounce_ms, 0);
        assert_eq!(config.overlay, UiConfig::default().overlay);
    }

    #[test]
    fn invalid_page_config_falls_back_to_defaults() {
        assert_eq!(parse_ui_config("{ not json"), UiConfig::default());
    }
}
