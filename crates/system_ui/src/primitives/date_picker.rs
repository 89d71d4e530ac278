use a11y_core::{
    day_cell_id, format_iso_date, parse_iso_date, CalendarGrid, DayCell, GridOutcome, NavKey,
    WeekStart,
};
use chrono::NaiveDate;

use super::*;
use crate::context::{resolve_id, use_ui_context};
use crate::dom;

#[component]
/// Date input with a calendar popup navigated by roving `tabindex`.
///
/// Arrow keys move by day or week and cross month boundaries; Home/End jump within the month;
/// PageUp/PageDown change month. Enter or Space commits unless the day is outside `min`/`max`.
pub fn DatePicker(
    #[prop(into)] label: String,
    /// Selected date.
    value: RwSignal<Option<NaiveDate>>,
    #[prop(optional, into)] id: Option<String>,
    /// Earliest selectable date. Falls back to the configured bound.
    #[prop(optional)]
    min: Option<NaiveDate>,
    /// Latest selectable date. Falls back to the configured bound.
    #[prop(optional)]
    max: Option<NaiveDate>,
    #[prop(optional)] week_start: Option<WeekStart>,
    #[prop(optional)] on_change: Option<Callback<Option<NaiveDate>>>,
    #[prop(optional)] layout_class: Option<&'static str>,
) -> impl IntoView {
    let ui = use_ui_context();
    let config = ui.config().date_picker;
    let min = min.or(config.min_date);
    let max = max.or(config.max_date);
    let week_start = week_start.unwrap_or(config.week_start);

    let root_id = resolve_id(&ui, id, "date-picker");
    let input_id = format!("{root_id}-input");
    let popup_id = format!("{root_id}-popup");
    let month_label_id = format!("{root_id}-month");
    let grid_id = format!("{root_id}-grid");
    let root = store_value(root_id.clone());
    let input = store_value(input_id.clone());
    let grid_key = store_value(grid_id.clone());

    let open = create_rw_signal(false);
    let text = create_rw_signal(String::new());
    let grid = create_rw_signal(CalendarGrid::new(dom::today(), week_start).with_range(min, max));
    let displayed = create_memo(move |_| grid.with(CalendarGrid::displayed));

    create_effect(move |_| {
        let selected = value.get();
        text.set(selected.map(format_iso_date).unwrap_or_default());
        grid.update(|grid| grid.set_selected(selected));
    });

    let focus_cell = move |deferred: bool| {
        let focused = grid.with_untracked(CalendarGrid::focused);
        let id = grid_key.with_value(|grid_id| day_cell_id(grid_id, focused));
        if deferred {
            dom::focus_element_by_id_deferred(id);
        } else {
            let _ = dom::focus_element_by_id(&id);
        }
    };

    let open_popup = move || {
        grid.update(CalendarGrid::open);
        open.set(true);
        focus_cell(true);
    };

    let close = move |refocus: bool| {
        open.set(false);
        if refocus {
            input.with_value(|id| {
                let _ = dom::focus_element_by_id(id);
            });
        }
    };

    let set_value = move |date: Option<NaiveDate>| {
        value.set(date);
        if let Some(on_change) = on_change {
            on_change.call(date);
        }
    };

    let pick = move |date: NaiveDate| {
        let outcome = grid
            .try_update(|grid| grid.select(date))
            .unwrap_or(GridOutcome::Ignored);
        if let GridOutcome::Committed(date) = outcome {
            set_value(Some(date));
            close(true);
        }
    };

    let shift_month = move |delta: i32| {
        grid.update(|grid| {
            grid.shift_months(delta);
        });
    };

    let outside = window_event_listener(ev::mousedown, move |ev| {
        if open.get_untracked() && !root.with_value(|id| dom::event_within(&ev, id)) {
            close(false);
        }
    });
    on_cleanup(move || outside.remove());

    let on_input_change = move |ev: ev::Event| {
        let raw = event_target_value(&ev);
        if raw.trim().is_empty() {
            set_value(None);
            return;
        }
        match parse_iso_date(&raw) {
            Ok(date) if grid.with_untracked(|grid| grid.is_disabled(date)) => {
                logging::warn!("date {date} is outside the selectable range");
                text.set(value.get_untracked().map(format_iso_date).unwrap_or_default());
            }
            Ok(date) => set_value(Some(date)),
            Err(err) => {
                logging::warn!("{err}");
                text.set(value.get_untracked().map(format_iso_date).unwrap_or_default());
            }
        }
    };

    let on_input_keydown = move |ev: KeyboardEvent| match nav_key(&ev) {
        Some(NavKey::Down) if !open.get_untracked() => {
            stop_event(&ev);
            open_popup();
        }
        Some(NavKey::Escape) if open.get_untracked() => {
            stop_event(&ev);
            close(true);
        }
        _ => {}
    };

    let on_grid_keydown = move |ev: KeyboardEvent| {
        let Some(key) = nav_key(&ev) else {
            return;
        };
        let outcome = grid
            .try_update(|grid| grid.handle_key(key))
            .unwrap_or(GridOutcome::Ignored);
        match outcome {
            GridOutcome::Moved { month_changed } => {
                stop_event(&ev);
                focus_cell(month_changed);
            }
            GridOutcome::Committed(date) => {
                stop_event(&ev);
                set_value(Some(date));
                close(true);
            }
            GridOutcome::Blocked => stop_event(&ev),
            GridOutcome::Close => {
                stop_event(&ev);
                close(true);
            }
            GridOutcome::Ignored => {}
        }
    };

    let headers = week_start.headers();

    view! {
        <div
            id=root_id
            class=merge_layout_class("ui-date-picker", layout_class)
            data-ui-primitive="true"
            data-ui-kind="date-picker"
            data-ui-state=move || if open.get() { "open" } else { "closed" }
        >
            <label for=input_id.clone() data-ui-slot="label">{label}</label>
            <div data-ui-slot="control">
                <input
                    id=input_id.clone()
                    type="text"
                    class="ui-field-input"
                    inputmode="numeric"
                    autocomplete="off"
                    placeholder="YYYY-MM-DD"
                    prop:value=move || text.get()
                    on:input=move |ev| text.set(event_target_value(&ev))
                    on:change=on_input_change
                    on:keydown=on_input_keydown
                />
                <Button
                    variant=ButtonVariant::Quiet
                    size=ButtonSize::Sm
                    ui_slot="toggle"
                    aria_label="Choose date".to_string()
                    aria_haspopup="dialog".to_string()
                    aria_controls=popup_id.clone()
                    aria_expanded=Signal::derive(move || open.get())
                    on_click=Callback::new(move |_| {
                        if open.get_untracked() {
                            close(false);
                        } else {
                            open_popup();
                        }
                    })
                >
                    "Calendar"
                </Button>
            </div>
            <Show when=move || open.get() fallback=|| ()>
                <div
                    id=popup_id.clone()
                    class="ui-date-picker-popup"
                    role="dialog"
                    aria-modal="false"
                    aria-labelledby=month_label_id.clone()
                    data-ui-kind="date-picker-popup"
                >
                    <div data-ui-slot="header">
                        <Button
                            variant=ButtonVariant::Quiet
                            size=ButtonSize::Sm
                            ui_slot="previous-month"
                            aria_label="Previous month".to_string()
                            on_click=Callback::new(move |_| shift_month(-1))
                        >
                            "‹"
                        </Button>
                        <h2 id=month_label_id.clone() aria-live="polite" data-ui-slot="month">
                            {move || displayed.get().label()}
                        </h2>
                        <Button
                            variant=ButtonVariant::Quiet
                            size=ButtonSize::Sm
                            ui_slot="next-month"
                            aria_label="Next month".to_string()
                            on_click=Callback::new(move |_| shift_month(1))
                        >
                            "›"
                        </Button>
                    </div>
                    <table
                        id=grid_id.clone()
                        class="ui-calendar-grid"
                        role="grid"
                        aria-labelledby=month_label_id.clone()
                        on:keydown=on_grid_keydown
                    >
                        <thead>
                            <tr role="row">
                                {headers
                                    .iter()
                                    .map(|(abbr, full)| {
                                        view! {
                                            <th role="columnheader" scope="col" abbr=*full>
                                                {*abbr}
                                            </th>
                                        }
                                    })
                                    .collect_view()}
                            </tr>
                        </thead>
                        <tbody>
                            {move || {
                                let _ = displayed.get();
                                let weeks = grid.with_untracked(CalendarGrid::weeks);
                                let grid_id = grid_key.get_value();
                                weeks
                                    .into_iter()
                                    .map(|week| {
                                        let grid_id = grid_id.clone();
                                        view! {
                                            <tr role="row">
                                                {week
                                                    .into_iter()
                                                    .map(|cell| day_cell(&grid_id, cell, grid, pick))
                                                    .collect_view()}
                                            </tr>
                                        }
                                    })
                                    .collect_view()
                            }}
                        </tbody>
                    </table>
                </div>
            </Show>
        </div>
    }
}

fn day_cell(
    grid_id: &str,
    cell: Option<DayCell>,
    grid: RwSignal<CalendarGrid>,
    pick: impl Fn(NaiveDate) + Copy + 'static,
) -> View {
    let Some(cell) = cell else {
        return view! { <td role="gridcell" data-ui-slot="padding"></td> }.into_view();
    };
    let date = cell.date;
    let id = day_cell_id(grid_id, date);
    let accessible = date.format("%A, %B %-d, %Y").to_string();
    let tabindex = move || grid.with(|grid| grid.tabindex(date));
    let selected = move || grid.with(|grid| grid.selected() == Some(date));

    let button = if cell.disabled {
        view! {
            <button
                type="button"
                id=id
                class="ui-date-cell"
                tabindex=tabindex
                aria-label=accessible
                aria-disabled="true"
                data-ui-today=bool_token(cell.today)
            >
                {cell.day()}
            </button>
        }
    } else {
        view! {
            <button
                type="button"
                id=id
                class="ui-date-cell"
                tabindex=tabindex
                aria-label=accessible
                data-ui-today=bool_token(cell.today)
                on:click=move |_| pick(date)
            >
                {cell.day()}
            </button>
        }
    };

    view! {
        <td role="gridcell" aria-selected=move || bool_token(selected())>
            {button}
        </td>
    }
    .into_view()
}
