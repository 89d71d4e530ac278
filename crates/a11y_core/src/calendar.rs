//! Month-grid roving navigation for the date picker.
//!
//! The focused date is the roving-tabindex target. When a move lands in another month the
//! displayed month switches first, so the caller re-renders the grid before placing focus.

use chrono::format::ParseErrorKind;
use chrono::{Datelike, Days, Months, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};

use crate::{error::DateParseError, keys::NavKey};

/// Number of columns in the month grid.
pub const GRID_COLUMNS: usize = 7;

/// A calendar month, stored as its first day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct YearMonth(NaiveDate);

impl YearMonth {
    /// Month containing `date`.
    pub fn of(date: NaiveDate) -> Self {
        Self(date.with_day(1).unwrap_or(date))
    }

    /// Returns the month for `year`/`month` when it exists.
    pub fn new(year: i32, month: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, 1).map(Self)
    }

    /// Calendar year.
    pub fn year(self) -> i32 {
        self.0.year()
    }

    /// Month number, 1 through 12.
    pub fn month(self) -> u32 {
        self.0.month()
    }

    /// First day of the month.
    pub fn first_day(self) -> NaiveDate {
        self.0
    }

    /// Number of days in the month.
    pub fn days_in_month(self) -> u32 {
        match self.month() {
            4 | 6 | 9 | 11 => 30,
            2 if NaiveDate::from_ymd_opt(self.year(), 2, 29).is_some() => 29,
            2 => 28,
            _ => 31,
        }
    }

    /// Last day of the month.
    pub fn last_day(self) -> NaiveDate {
        self.day(self.days_in_month())
    }

    /// Day `day` of the month, clamped into `1..=days_in_month`.
    pub fn day(self, day: u32) -> NaiveDate {
        let day = day.clamp(1, self.days_in_month());
        self.0.with_day(day).unwrap_or(self.0)
    }

    /// Month offset by `delta`, saturating at the representable range.
    pub fn offset(self, delta: i32) -> Self {
        let months = Months::new(delta.unsigned_abs());
        let shifted = if delta >= 0 {
            self.0.checked_add_months(months)
        } else {
            self.0.checked_sub_months(months)
        };
        shifted.map(Self).unwrap_or(self)
    }

    /// Human-readable heading such as `January 2025`.
    pub fn label(self) -> String {
        self.0.format("%B %Y").to_string()
    }
}

/// First column of the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WeekStart {
    /// Sunday-first, the default.
    #[default]
    Sunday,
    /// Monday-first (ISO weeks).
    Monday,
}

impl WeekStart {
    /// Column index (0..7) of `weekday` in a grid starting on this day.
    pub fn column(self, weekday: Weekday) -> usize {
        match self {
            Self::Sunday => weekday.num_days_from_sunday() as usize,
            Self::Monday => weekday.num_days_from_monday() as usize,
        }
    }

    /// Column headers as `(abbreviation, full name)`.
    pub fn headers(self) -> [(&'static str, &'static str); GRID_COLUMNS] {
        const SUNDAY_FIRST: [(&str, &str); GRID_COLUMNS] = [
            ("Su", "Sunday"),
            ("Mo", "Monday"),
            ("Tu", "Tuesday"),
            ("We", "Wednesday"),
            ("Th", "Thursday"),
            ("Fr", "Friday"),
            ("Sa", "Saturday"),
        ];
        let mut headers = SUNDAY_FIRST;
        if self == Self::Monday {
            headers.rotate_left(1);
        }
        headers
    }
}

/// Render data for one day button.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DayCell {
    /// The date shown.
    pub date: NaiveDate,
    /// Outside the min/max range; rendered without a click handler.
    pub disabled: bool,
    /// Equals the committed selection.
    pub selected: bool,
    /// Roving focus target.
    pub focused: bool,
    /// Equals the injected "today".
    pub today: bool,
}

impl DayCell {
    /// Day of month.
    pub fn day(&self) -> u32 {
        self.date.day()
    }

    /// Roving `tabindex` value.
    pub fn tabindex(&self) -> i32 {
        if self.focused {
            0
        } else {
            -1
        }
    }
}

/// Result of routing input through a [`CalendarGrid`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GridOutcome {
    /// Focus moved. When `month_changed`, re-render before focusing the new cell.
    Moved {
        /// The displayed month switched.
        month_changed: bool,
    },
    /// The focused day was committed as the selection.
    Committed(NaiveDate),
    /// Commit refused because the day is outside the range; nothing changes.
    Blocked,
    /// Close the popup and return focus to the trigger input.
    Close,
    /// Not handled.
    Ignored,
}

/// Roving focus, displayed month, and selection for a date picker grid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalendarGrid {
    displayed: YearMonth,
    focused: NaiveDate,
    selected: Option<NaiveDate>,
    min: Option<NaiveDate>,
    max: Option<NaiveDate>,
    week_start: WeekStart,
    today: NaiveDate,
}

impl CalendarGrid {
    /// Creates a grid showing the month of `today`.
    pub fn new(today: NaiveDate, week_start: WeekStart) -> Self {
        Self {
            displayed: YearMonth::of(today),
            focused: today,
            selected: None,
            min: None,
            max: None,
            week_start,
            today,
        }
    }

    /// Sets the selectable range. Either bound may be absent.
    pub fn with_range(mut self, min: Option<NaiveDate>, max: Option<NaiveDate>) -> Self {
        self.min = min;
        self.max = max;
        self
    }

    /// Month currently rendered.
    pub fn displayed(&self) -> YearMonth {
        self.displayed
    }

    /// Roving focus target.
    pub fn focused(&self) -> NaiveDate {
        self.focused
    }

    /// Focused day of month.
    pub fn focused_day(&self) -> u32 {
        self.focused.day()
    }

    /// Committed selection.
    pub fn selected(&self) -> Option<NaiveDate> {
        self.selected
    }

    /// Grid column configuration.
    pub fn week_start(&self) -> WeekStart {
        self.week_start
    }

    /// Replaces the selection without the range guard (external value binding).
    pub fn set_selected(&mut self, selected: Option<NaiveDate>) {
        self.selected = selected;
    }

    /// Returns whether `date` lies outside the configured range.
    pub fn is_disabled(&self, date: NaiveDate) -> bool {
        self.min.is_some_and(|min| date < min) || self.max.is_some_and(|max| date > max)
    }

    /// Prepares the grid for opening: focus the selection, else today, pulled into range.
    pub fn open(&mut self) {
        let mut start = self.selected.unwrap_or(self.today);
        if let Some(min) = self.min.filter(|min| start < *min) {
            start = min;
        }
        if let Some(max) = self.max.filter(|max| start > *max) {
            start = max;
        }
        self.focus_date(start);
    }

    /// Moves focus to `date`, switching the displayed month when needed.
    pub fn focus_date(&mut self, date: NaiveDate) -> GridOutcome {
        let month = YearMonth::of(date);
        let month_changed = month != self.displayed;
        self.displayed = month;
        self.focused = date;
        GridOutcome::Moved { month_changed }
    }

    /// Moves focus by `delta` days.
    pub fn move_days(&mut self, delta: i64) -> GridOutcome {
        let days = Days::new(delta.unsigned_abs());
        let target = if delta >= 0 {
            self.focused.checked_add_days(days)
        } else {
            self.focused.checked_sub_days(days)
        };
        match target {
            Some(date) => self.focus_date(date),
            None => GridOutcome::Ignored,
        }
    }

    /// Shows the month `delta` months away, keeping the day of month where possible.
    pub fn shift_months(&mut self, delta: i32) -> GridOutcome {
        let month = self.displayed.offset(delta);
        self.focus_date(month.day(self.focused.day()))
    }

    /// Commits the focused day unless it is disabled.
    pub fn commit(&mut self) -> GridOutcome {
        self.select(self.focused)
    }

    /// Commits `date` (pointer click) unless it is disabled.
    pub fn select(&mut self, date: NaiveDate) -> GridOutcome {
        if self.is_disabled(date) {
            return GridOutcome::Blocked;
        }
        self.focus_date(date);
        self.selected = Some(date);
        GridOutcome::Committed(date)
    }

    /// Routes a navigation key.
    pub fn handle_key(&mut self, key: NavKey) -> GridOutcome {
        match key {
            NavKey::Left => self.move_days(-1),
            NavKey::Right => self.move_days(1),
            NavKey::Up => self.move_days(-(GRID_COLUMNS as i64)),
            NavKey::Down => self.move_days(GRID_COLUMNS as i64),
            NavKey::Home => self.focus_date(self.displayed.first_day()),
            NavKey::End => self.focus_date(self.displayed.last_day()),
            NavKey::PageUp => self.shift_months(-1),
            NavKey::PageDown => self.shift_months(1),
            NavKey::Enter | NavKey::Space => self.commit(),
            NavKey::Escape => GridOutcome::Close,
            NavKey::Tab { .. } => GridOutcome::Ignored,
        }
    }

    /// Rows of the displayed month; `None` pads the first and last weeks.
    pub fn weeks(&self) -> Vec<[Option<DayCell>; GRID_COLUMNS]> {
        let first = self.displayed.first_day();
        let lead = self.week_start.column(first.weekday());
        let mut weeks = Vec::with_capacity(6);
        let mut row = [None; GRID_COLUMNS];
        let mut column = lead;

        for date in first.iter_days().take(self.displayed.days_in_month() as usize) {
            row[column] = Some(DayCell {
                date,
                disabled: self.is_disabled(date),
                selected: self.selected == Some(date),
                focused: self.focused == date,
                today: self.today == date,
            });
            column += 1;
            if column == GRID_COLUMNS {
                weeks.push(row);
                row = [None; GRID_COLUMNS];
                column = 0;
            }
        }
        if column != 0 {
            weeks.push(row);
        }
        weeks
    }

    /// Roving `tabindex` for `date` in the current render.
    pub fn tabindex(&self, date: NaiveDate) -> i32 {
        if date == self.focused {
            0
        } else {
            -1
        }
    }
}

/// DOM id of the day button for `date` inside the grid `grid_id`.
pub fn day_cell_id(grid_id: &str, date: NaiveDate) -> String {
    format!("{grid_id}-{}", date.format("%Y-%m-%d"))
}

/// Formats a date as `YYYY-MM-DD` for the text input.
pub fn format_iso_date(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// Parses a typed `YYYY-MM-DD` date.
pub fn parse_iso_date(raw: &str) -> Result<NaiveDate, DateParseError> {
    let trimmed = raw.trim();
    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d").map_err(|err| match err.kind() {
        ParseErrorKind::OutOfRange | ParseErrorKind::Impossible => {
            DateParseError::OutOfRange(trimmed.to_string())
        }
        _ => DateParseError::Format(trimmed.to_string()),
    })
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).expect("valid date")
    }

    fn grid_at(focus: NaiveDate) -> CalendarGrid {
        let mut grid = CalendarGrid::new(focus, WeekStart::Sunday);
        grid.focus_date(focus);
        grid
    }

    #[test]
    fn arrow_left_from_january_first_crosses_into_previous_december() {
        let mut grid = grid_at(date(2025, 1, 1));
        assert_eq!(
            grid.handle_key(NavKey::Left),
            GridOutcome::Moved { month_changed: true }
        );
        assert_eq!(grid.displayed(), YearMonth::new(2024, 12).expect("month"));
        assert_eq!(grid.focused_day(), 31);
    }

    #[test]
    fn vertical_moves_are_one_week() {
        let mut grid = grid_at(date(2025, 3, 10));
        assert_eq!(
            grid.handle_key(NavKey::Down),
            GridOutcome::Moved { month_changed: false }
        );
        assert_eq!(grid.focused(), date(2025, 3, 17));
        grid.handle_key(NavKey::Up);
        grid.handle_key(NavKey::Up);
        assert_eq!(grid.focused(), date(2025, 3, 3));
        assert_eq!(
            grid.handle_key(NavKey::Up),
            GridOutcome::Moved { month_changed: true }
        );
        assert_eq!(grid.focused(), date(2025, 2, 24));
    }

    #[test]
    fn page_keys_clamp_day_to_month_length() {
        let mut grid = grid_at(date(2024, 1, 31));
        grid.handle_key(NavKey::PageDown);
        assert_eq!(grid.focused(), date(2024, 2, 29));
        grid.handle_key(NavKey::PageUp);
        assert_eq!(grid.focused(), date(2024, 1, 29));
    }

    #[test]
    fn home_end_stay_in_displayed_month() {
        let mut grid = grid_at(date(2025, 4, 15));
        grid.handle_key(NavKey::End);
        assert_eq!(grid.focused(), date(2025, 4, 30));
        grid.handle_key(NavKey::Home);
        assert_eq!(grid.focused(), date(2025, 4, 1));
    }

    #[test]
    fn enter_on_out_of_range_day_is_a_no_op() {
        let mut grid = CalendarGrid::new(date(2025, 6, 15), WeekStart::Sunday)
            .with_range(Some(date(2025, 6, 10)), Some(date(2025, 6, 20)));
        grid.set_selected(Some(date(2025, 6, 12)));
        grid.focus_date(date(2025, 6, 25));

        assert_eq!(grid.handle_key(NavKey::Enter), GridOutcome::Blocked);
        assert_eq!(grid.selected(), Some(date(2025, 6, 12)));
        assert_eq!(grid.focused(), date(2025, 6, 25));

        grid.focus_date(date(2025, 6, 18));
        assert_eq!(
            grid.handle_key(NavKey::Space),
            GridOutcome::Committed(date(2025, 6, 18))
        );
        assert_eq!(grid.selected(), Some(date(2025, 6, 18)));
    }

    #[test]
    fn exactly_one_cell_is_tabbable_after_each_render() {
        let mut grid = grid_at(date(2025, 2, 14));
        for key in [NavKey::Right, NavKey::Down, NavKey::Down, NavKey::Down] {
            grid.handle_key(key);
            let cells: Vec<DayCell> = grid.weeks().into_iter().flatten().flatten().collect();
            let tabbable: Vec<_> = cells.iter().filter(|cell| cell.tabindex() == 0).collect();
            assert_eq!(tabbable.len(), 1);
            assert_eq!(tabbable[0].date, grid.focused());
            assert_eq!(cells.len() as u32, grid.displayed().days_in_month());
        }
    }

    #[test]
    fn weeks_pad_leading_days_by_week_start() {
        // 1 June 2025 is a Sunday.
        let sunday_first = grid_at(date(2025, 6, 1));
        assert_eq!(sunday_first.weeks()[0][0].map(|cell| cell.day()), Some(1));

        let mut monday_first = CalendarGrid::new(date(2025, 6, 1), WeekStart::Monday);
        monday_first.focus_date(date(2025, 6, 1));
        let first_week = monday_first.weeks()[0];
        assert!(first_week[..6].iter().all(Option::is_none));
        assert_eq!(first_week[6].map(|cell| cell.day()), Some(1));
        assert_eq!(WeekStart::Monday.headers()[0], ("Mo", "Monday"));
    }

    #[test]
    fn open_focuses_selection_or_today_within_range() {
        let mut grid = CalendarGrid::new(date(2025, 1, 5), WeekStart::Sunday)
            .with_range(Some(date(2025, 2, 1)), None);
        grid.open();
        assert_eq!(grid.focused(), date(2025, 2, 1));

        grid.set_selected(Some(date(2025, 3, 9)));
        grid.open();
        assert_eq!(grid.focused(), date(2025, 3, 9));
        assert_eq!(grid.displayed().label(), "March 2025");
    }

    #[test]
    fn parses_iso_dates() {
        assert_eq!(parse_iso_date(" 2025-07-04 "), Ok(date(2025, 7, 4)));
        assert_eq!(
            parse_iso_date("2025-02-30"),
            Err(DateParseError::OutOfRange("2025-02-30".to_string()))
        );
        assert_eq!(
            parse_iso_date("07/04/2025"),
            Err(DateParseError::Format("07/04/2025".to_string()))
        );
        assert_eq!(
            parse_iso_date("2025-13-01"),
            Err(DateParseError::OutOfRange("2025-13-01".to_string()))
        );
        assert_eq!(
            parse_iso_date("2025-07"),
            Err(DateParseError::Format("2025-07".to_string()))
        );
        assert_eq!(
            parse_iso_date("2025-07-04T10:00"),
            Err(DateParseError::Format("2025-07-04T10:00".to_string()))
        );
        assert_eq!(format_iso_date(date(2025, 7, 4)), "2025-07-04");
        assert_eq!(day_cell_id("dp", date(2025, 7, 4)), "dp-2025-07-04");
    }
}
