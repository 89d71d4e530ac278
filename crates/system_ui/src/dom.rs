//! Internal DOM focus, lookup, and scrolling helpers shared by the interactive primitives.

use a11y_core::{is_tabbable, FOCUSABLE_SELECTOR};
use wasm_bindgen::{closure::Closure, JsCast};

fn document() -> Option<web_sys::Document> {
    web_sys::window().and_then(|window| window.document())
}

/// Returns the current active element as an [`web_sys::HtmlElement`] when possible.
pub(crate) fn active_html_element() -> Option<web_sys::HtmlElement> {
    document()
        .and_then(|document| document.active_element())
        .and_then(|element| element.dyn_into::<web_sys::HtmlElement>().ok())
}

/// Focuses an HTML element, ignoring browser focus errors.
pub(crate) fn focus_html_element(element: &web_sys::HtmlElement) {
    let _ = element.focus();
}

/// Looks up an element by id as an [`web_sys::HtmlElement`].
pub(crate) fn html_element_by_id(id: &str) -> Option<web_sys::HtmlElement> {
    document()
        .and_then(|document| document.get_element_by_id(id))
        .and_then(|element| element.dyn_into::<web_sys::HtmlElement>().ok())
}

/// Focuses an element by ID and reports whether a focusable HTML element was found.
pub(crate) fn focus_element_by_id(id: &str) -> bool {
    let Some(element) = html_element_by_id(id) else {
        return false;
    };
    focus_html_element(&element);
    true
}

/// Runs `callback` on the next task, after pending renders have reached the DOM.
pub(crate) fn defer(callback: impl FnOnce() + 'static) {
    let Some(window) = web_sys::window() else {
        return;
    };
    let callback = Closure::once_into_js(callback);
    let _ = window.set_timeout_with_callback_and_timeout_and_arguments_0(callback.unchecked_ref(), 0);
}

/// Focuses an element by ID once the current render has been flushed.
pub(crate) fn focus_element_by_id_deferred(id: String) {
    defer(move || {
        let _ = focus_element_by_id(&id);
    });
}

/// Tabbable descendants of the container `container_id`, in document order.
pub(crate) fn focusable_descendants(container_id: &str) -> Vec<web_sys::HtmlElement> {
    let Some(container) = document().and_then(|document| document.get_element_by_id(container_id))
    else {
        return Vec::new();
    };
    let Ok(nodes) = container.query_selector_all(FOCUSABLE_SELECTOR) else {
        return Vec::new();
    };

    let mut items = Vec::new();
    for index in 0..nodes.length() {
        let Some(node) = nodes.item(index) else {
            continue;
        };
        let Ok(item) = node.dyn_into::<web_sys::HtmlElement>() else {
            continue;
        };
        let tabindex = item.get_attribute("tabindex");
        let native = match item.tag_name().as_str() {
            "A" => item.has_attribute("href"),
            "BUTTON" | "TEXTAREA" | "INPUT" | "SELECT" => true,
            _ => false,
        };
        if !is_tabbable(native, item.has_attribute("disabled"), tabindex.as_deref()) {
            continue;
        }
        items.push(item);
    }

    items
}

/// Scrolls the element into the nearest visible position of its scroll container, instantly.
pub(crate) fn scroll_into_view_nearest(id: &str) {
    let Some(element) = document().and_then(|document| document.get_element_by_id(id)) else {
        return;
    };
    let options = web_sys::ScrollIntoViewOptions::new();
    options.set_block(web_sys::ScrollLogicalPosition::Nearest);
    options.set_inline(web_sys::ScrollLogicalPosition::Nearest);
    options.set_behavior(web_sys::ScrollBehavior::Instant);
    element.scroll_into_view_with_scroll_into_view_options(&options);
}

/// Returns whether the event target lies inside the element `root_id`.
///
/// A missing root counts as "outside" so stale listeners close their popups.
pub(crate) fn event_within(ev: &web_sys::Event, root_id: &str) -> bool {
    let Some(root) = document().and_then(|document| document.get_element_by_id(root_id)) else {
        return false;
    };
    let Some(target) = ev
        .target()
        .and_then(|target| target.dyn_into::<web_sys::Node>().ok())
    else {
        return false;
    };
    root.contains(Some(&target))
}

/// Today's date in the browser's local time zone.
pub(crate) fn today() -> chrono::NaiveDate {
    #[cfg(target_arch = "wasm32")]
    {
        let now = js_sys::Date::new_0();
        chrono::NaiveDate::from_ymd_opt(now.get_full_year() as i32, now.get_month() + 1, now.get_date())
            .unwrap_or_default()
    }

    #[cfg(not(target_arch = "wasm32"))]
    {
        let secs = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map(|elapsed| elapsed.as_secs() as i64)
            .unwrap_or_default();
        chrono::DateTime::from_timestamp(secs, 0)
            .map(|now| now.date_naive())
            .unwrap_or_default()
    }
}
