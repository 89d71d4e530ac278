use super::*;

#[component]
/// Shared button primitive with standardized states and ARIA passthrough.
pub fn Button(
    #[prop(default = ButtonVariant::Standard)] variant: ButtonVariant,
    #[prop(default = ButtonSize::Md)] size: ButtonSize,
    #[prop(optional)] layout_class: Option<&'static str>,
    #[prop(optional, into)] id: Option<String>,
    #[prop(optional, into)] role: Option<String>,
    #[prop(optional, into)] aria_label: Option<String>,
    #[prop(optional, into)] aria_controls: Option<String>,
    #[prop(optional, into)] aria_haspopup: Option<String>,
    #[prop(optional, into)] aria_expanded: Option<MaybeSignal<bool>>,
    #[prop(optional, into)] aria_selected: Option<MaybeSignal<bool>>,
    #[prop(optional, into)] aria_activedescendant: Option<Signal<Option<String>>>,
    #[prop(optional, into)] tabindex: Option<MaybeSignal<i32>>,
    #[prop(optional)] ui_slot: Option<&'static str>,
    #[prop(optional, into)] disabled: MaybeSignal<bool>,
    #[prop(optional, into)] selected: MaybeSignal<bool>,
    #[prop(optional)] on_click: Option<Callback<MouseEvent>>,
    #[prop(optional)] on_keydown: Option<Callback<KeyboardEvent>>,
    children: Children,
) -> impl IntoView {
    let class = merge_layout_class("ui-button", layout_class);
    view! {
        <button
            type="button"
            class=class
            id=id
            role=role
            aria-label=aria_label
            aria-controls=aria_controls
            aria-haspopup=aria_haspopup
            aria-expanded=move || aria_expanded.map(|expanded| bool_token(expanded.get()))
            aria-selected=move || aria_selected.map(|selected| bool_token(selected.get()))
            aria-activedescendant=move || aria_activedescendant.and_then(|id| id.get())
            tabindex=move || tabindex.map(|tabindex| tabindex.get())
            disabled=move || disabled.get()
            data-ui-primitive="true"
            data-ui-kind="button"
            data-ui-slot=ui_slot
            data-ui-variant=variant.token()
            data-ui-size=size.token()
            data-ui-state=move || if selected.get() { "selected" } else { "idle" }
            data-ui-selected=move || bool_token(selected.get())
            data-ui-disabled=move || bool_token(disabled.get())
            on:click=move |ev| {
                if let Some(on_click) = on_click.as_ref() {
                    on_click.call(ev);
                }
            }
            on:keydown=move |ev| {
                if let Some(on_keydown) = on_keydown.as_ref() {
                    on_keydown.call(ev);
                }
            }
        >
            {children()}
        </button>
    }
}
