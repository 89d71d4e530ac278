use std::rc::Rc;

use super::*;
use crate::context::{resolve_id, use_ui_context};
use crate::focus_trap::use_overlay_focus_trap;

fn dismiss(open: RwSignal<bool>, on_close: Option<Callback<()>>) {
    open.set(false);
    if let Some(on_close) = on_close {
        on_close.call(());
    }
}

#[component]
/// Modal dialog that owns a focus trap for its open lifetime.
///
/// `role` defaults to `dialog`; [`ConfirmDialog`] passes `alertdialog`.
pub fn Modal(
    /// Open state; the trap activates when it turns `true` and releases when it turns `false`.
    open: RwSignal<bool>,
    #[prop(into)] title: String,
    #[prop(optional, into)] id: Option<String>,
    #[prop(default = "dialog")] role: &'static str,
    #[prop(optional, into)] aria_describedby: Option<String>,
    #[prop(optional)] layout_class: Option<&'static str>,
    #[prop(optional)] close_on_escape: Option<bool>,
    #[prop(optional)] close_on_backdrop: Option<bool>,
    #[prop(optional)] on_close: Option<Callback<()>>,
    children: ChildrenFn,
) -> impl IntoView {
    let ui = use_ui_context();
    let overlay = ui.config().overlay;
    let close_on_escape = close_on_escape.unwrap_or(overlay.close_on_escape);
    let close_on_backdrop = close_on_backdrop.unwrap_or(overlay.close_on_backdrop);
    let modal_id = resolve_id(&ui, id, "modal");
    let title_id = format!("{modal_id}-title");
    let _trap = use_overlay_focus_trap(open, modal_id.clone(), None);
    let class = merge_layout_class("ui-modal", layout_class);

    view! {
        <Show when=move || open.get() fallback=|| ()>
            <div
                class="ui-modal-backdrop"
                data-ui-primitive="true"
                data-ui-kind="modal-backdrop"
                on:mousedown=move |ev: MouseEvent| {
                    if close_on_backdrop && ev.target() == ev.current_target() {
                        dismiss(open, on_close);
                    }
                }
            >
                <div
                    id=modal_id.clone()
                    class=class.clone()
                    role=role
                    aria-modal="true"
                    aria-labelledby=title_id.clone()
                    aria-describedby=aria_describedby.clone()
                    tabindex="-1"
                    data-ui-primitive="true"
                    data-ui-kind="modal"
                    on:keydown=move |ev: KeyboardEvent| {
                        if close_on_escape && ev.key() == "Escape" {
                            stop_event(&ev);
                            dismiss(open, on_close);
                        }
                    }
                >
                    <header data-ui-slot="header">
                        <h2 id=title_id.clone() data-ui-slot="title">{title.clone()}</h2>
                        <Button
                            variant=ButtonVariant::Quiet
                            size=ButtonSize::Sm
                            ui_slot="close"
                            aria_label="Close".to_string()
                            on_click=Callback::new(move |_| dismiss(open, on_close))
                        >
                            "×"
                        </Button>
                    </header>
                    <div data-ui-slot="body">{children()}</div>
                </div>
            </div>
        </Show>
    }
}

#[component]
/// Confirmation dialog built on [`Modal`] with the `alertdialog` role.
///
/// Initial focus follows the trap default (first focusable element) for every variant.
pub fn ConfirmDialog(
    open: RwSignal<bool>,
    #[prop(into)] title: String,
    #[prop(into)] message: String,
    #[prop(default = "Confirm".to_string(), into)] confirm_label: String,
    #[prop(default = "Cancel".to_string(), into)] cancel_label: String,
    #[prop(default = ButtonVariant::Primary)] variant: ButtonVariant,
    on_confirm: Callback<()>,
    #[prop(optional)] on_cancel: Option<Callback<()>>,
) -> impl IntoView {
    let ui = use_ui_context();
    let dialog_id = ui.next_id("confirm");
    let message_id = format!("{dialog_id}-message");
    let confirm_label = store_value(confirm_label);
    let cancel_label = store_value(cancel_label);

    view! {
        <Modal
            open
            title
            id=dialog_id
            role="alertdialog"
            aria_describedby=message_id.clone()
            layout_class="ui-confirm-dialog"
            close_on_backdrop=false
            on_close=Callback::new(move |_| {
                if let Some(on_cancel) = on_cancel {
                    on_cancel.call(());
                }
            })
        >
            <p id=message_id.clone() data-ui-slot="message">{message.clone()}</p>
            <div data-ui-slot="actions">
                <Button
                    ui_slot="cancel"
                    on_click=Callback::new(move |_| {
                        open.set(false);
                        if let Some(on_cancel) = on_cancel {
                            on_cancel.call(());
                        }
                    })
                >
                    {cancel_label.get_value()}
                </Button>
                <Button
                    variant
                    ui_slot="confirm"
                    on_click=Callback::new(move |_| {
                        open.set(false);
                        on_confirm.call(());
                    })
                >
                    {confirm_label.get_value()}
                </Button>
            </div>
        </Modal>
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
/// Edge a [`Drawer`] slides in from.
pub enum DrawerSide {
    /// Left edge.
    Left,
    /// Right edge.
    #[default]
    Right,
}

impl DrawerSide {
    fn token(self) -> &'static str {
        match self {
            Self::Left => "left",
            Self::Right => "right",
        }
    }
}

#[component]
/// Edge-anchored modal panel that owns a focus trap while open.
pub fn Drawer(
    open: RwSignal<bool>,
    #[prop(into)] title: String,
    #[prop(optional, into)] id: Option<String>,
    #[prop(optional)] side: DrawerSide,
    #[prop(optional)] on_close: Option<Callback<()>>,
    children: ChildrenFn,
) -> impl IntoView {
    let ui = use_ui_context();
    let overlay = ui.config().overlay;
    let drawer_id = resolve_id(&ui, id, "drawer");
    let title_id = format!("{drawer_id}-title");
    let trap = use_overlay_focus_trap(open, drawer_id.clone(), None);

    view! {
        <Show when=move || open.get() fallback=|| ()>
            <div
                class="ui-drawer-backdrop"
                data-ui-primitive="true"
                data-ui-kind="drawer-backdrop"
                on:mousedown=move |ev: MouseEvent| {
                    if overlay.close_on_backdrop && ev.target() == ev.current_target() {
                        dismiss(open, on_close);
                    }
                }
            >
                <aside
                    id=drawer_id.clone()
                    class="ui-drawer"
                    role="dialog"
                    aria-modal="true"
                    aria-labelledby=title_id.clone()
                    tabindex="-1"
                    data-ui-primitive="true"
                    data-ui-kind="drawer"
                    data-ui-side=side.token()
                    on:keydown={
                        let trap = Rc::clone(&trap);
                        move |ev: KeyboardEvent| match ev.key().as_str() {
                            "Escape" if overlay.close_on_escape => {
                                stop_event(&ev);
                                dismiss(open, on_close);
                            }
                            "End" if ev.ctrl_key() => {
                                stop_event(&ev);
                                let _ = trap.focus_last();
                            }
                            "Home" if ev.ctrl_key() => {
                                stop_event(&ev);
                                let _ = trap.focus_first();
                            }
                            _ => {}
                        }
                    }
                >
                    <header data-ui-slot="header">
                        <h2 id=title_id.clone() data-ui-slot="title">{title.clone()}</h2>
                        <Button
                            variant=ButtonVariant::Quiet
                            size=ButtonSize::Sm
                            ui_slot="close"
                            aria_label="Close".to_string()
                            on_click=Callback::new(move |_| dismiss(open, on_close))
                        >
                            "×"
                        </Button>
                    </header>
                    <div data-ui-slot="body">{children()}</div>
                </aside>
            </div>
        </Show>
    }
}
