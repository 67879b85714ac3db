//! Calendar navigation, selection and month-grid layout.
//!
//! # Responsibility
//! - Own the viewed month and the selected date for one session.
//! - Lay out a month as leading placeholders followed by day cells.
//!
//! # Invariants
//! - `selected_date` is always a valid calendar date.
//! - `viewed_month` and `selected_date` change independently.
//! - Grid length is `leading_empty + days_in_month`, never padded to 7.

use crate::model::date_key::{DateKey, WeekStart, YearMonth};
use chrono::{Local, NaiveDate};

/// One position in a month grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GridCell {
    /// Placeholder before day 1.
    Empty,
    Day(DayCell),
}

impl GridCell {
    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Empty)
    }

    pub fn as_day(&self) -> Option<&DayCell> {
        match self {
            Self::Empty => None,
            Self::Day(cell) => Some(cell),
        }
    }
}

/// A day of the laid-out month.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DayCell {
    /// 1-based day of month.
    pub day: u32,
    pub date: NaiveDate,
    pub is_today: bool,
    pub is_selected: bool,
}

/// Session calendar state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalendarModel {
    viewed_month: YearMonth,
    selected_date: NaiveDate,
    week_start: WeekStart,
}

impl CalendarModel {
    /// Starts with `today` selected and its month in view.
    pub fn new(today: NaiveDate) -> Self {
        Self {
            viewed_month: YearMonth::of(today),
            selected_date: today,
            week_start: WeekStart::default(),
        }
    }

    /// Starts from the local calendar date.
    pub fn starting_today() -> Self {
        Self::new(local_today())
    }

    pub fn with_week_start(mut self, week_start: WeekStart) -> Self {
        self.week_start = week_start;
        self
    }

    pub fn viewed_month(&self) -> YearMonth {
        self.viewed_month
    }

    pub fn selected_date(&self) -> NaiveDate {
        self.selected_date
    }

    pub fn week_start(&self) -> WeekStart {
        self.week_start
    }

    /// Moves the viewed month by `delta`; selection is untouched.
    pub fn navigate_month(&mut self, delta: i32) {
        self.viewed_month = self.viewed_month.shift(delta);
    }

    /// Selects `date`; the viewed month is untouched.
    pub fn select_date(&mut self, date: NaiveDate) {
        self.selected_date = date;
    }

    /// Lays out `month` against the current selection.
    ///
    /// `today` marks the real current date; callers pass it in so the grid
    /// stays deterministic.
    pub fn grid_layout(&self, month: YearMonth, today: NaiveDate) -> Vec<GridCell> {
        let leading = month.leading_empty(self.week_start) as usize;
        let days = month.days_in_month();
        let today_key = DateKey::from_date(today);
        let selected_key = DateKey::from_date(self.selected_date);

        let mut cells = Vec::with_capacity(leading + days as usize);
        cells.extend(std::iter::repeat(GridCell::Empty).take(leading));
        cells.extend((1..=days).filter_map(|day| {
            let date = month.date_of(day)?;
            let key = DateKey::from_date(date);
            Some(GridCell::Day(DayCell {
                day,
                date,
                is_today: key == today_key,
                is_selected: key == selected_key,
            }))
        }));
        cells
    }

    /// Lays out the viewed month.
    pub fn viewed_grid(&self, today: NaiveDate) -> Vec<GridCell> {
        self.grid_layout(self.viewed_month, today)
    }
}

/// Local calendar date of the host clock.
pub fn local_today() -> NaiveDate {
    Local::now().date_naive()
}

#[cfg(test)]
mod tests {
    use super::{CalendarModel, GridCell};
    use crate::model::date_key::{WeekStart, YearMonth};
    use chrono::NaiveDate;

    fn date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).expect("valid test date")
    }

    fn selected_count(cells: &[GridCell]) -> usize {
        cells
            .iter()
            .filter_map(GridCell::as_day)
            .filter(|cell| cell.is_selected)
            .count()
    }

    #[test]
    fn new_model_views_and_selects_today() {
        let model = CalendarModel::new(date(2026, 10, 19));
        assert_eq!(model.selected_date(), date(2026, 10, 19));
        assert_eq!(model.viewed_month(), YearMonth::new(2026, 10).unwrap());
        assert_eq!(model.week_start(), WeekStart::Sunday);
    }

    #[test]
    fn grid_length_is_leading_plus_days_for_every_month() {
        let model = CalendarModel::new(date(2026, 10, 19));
        let mut month = YearMonth::new(2023, 1).unwrap();
        for _ in 0..60 {
            let cells = model.grid_layout(month, date(2026, 10, 19));
            let leading = month.leading_empty(WeekStart::Sunday) as usize;
            assert_eq!(cells.len(), leading + month.days_in_month() as usize);
            assert!(cells[..leading].iter().all(GridCell::is_empty));
            assert!(cells[leading..].iter().all(|cell| !cell.is_empty()));
            month = month.shift(1);
        }
    }

    #[test]
    fn leap_february_has_twenty_nine_day_cells() {
        let model = CalendarModel::new(date(2024, 2, 1));
        let cells = model.grid_layout(YearMonth::new(2024, 2).unwrap(), date(2024, 2, 1));
        let days: Vec<u32> = cells
            .iter()
            .filter_map(GridCell::as_day)
            .map(|cell| cell.day)
            .collect();
        assert_eq!(days.len(), 29);
        assert_eq!(days.first(), Some(&1));
        assert_eq!(days.last(), Some(&29));
        // 2024-02-01 is a Thursday.
        assert_eq!(cells.iter().take_while(|cell| cell.is_empty()).count(), 4);
    }

    #[test]
    fn twelve_steps_land_on_same_month_of_next_year() {
        let mut model = CalendarModel::new(date(2026, 10, 19));
        let start = model.viewed_month();
        for _ in 0..12 {
            model.navigate_month(1);
        }
        assert_eq!(model.viewed_month().month(), start.month());
        assert_eq!(model.viewed_month().year(), start.year() + 1);
        assert_eq!(model.viewed_month(), YearMonth::new(2027, 10).unwrap());

        for _ in 0..12 {
            model.navigate_month(-1);
        }
        assert_eq!(model.viewed_month(), start);
    }

    #[test]
    fn selection_survives_month_navigation() {
        let mut model = CalendarModel::new(date(2026, 10, 19));
        model.select_date(date(2026, 12, 31));
        model.navigate_month(2);
        model.navigate_month(1);
        assert_eq!(model.viewed_month(), YearMonth::new(2027, 1).unwrap());
        assert_eq!(model.selected_date(), date(2026, 12, 31));

        model.navigate_month(-1);
        assert_eq!(model.viewed_month(), YearMonth::new(2026, 12).unwrap());
    }

    #[test]
    fn exactly_one_cell_selected_inside_viewed_month() {
        let mut model = CalendarModel::new(date(2026, 10, 19));
        model.select_date(date(2026, 10, 31));
        let cells = model.viewed_grid(date(2026, 10, 19));
        assert_eq!(selected_count(&cells), 1);

        model.navigate_month(1);
        let cells = model.viewed_grid(date(2026, 10, 19));
        assert_eq!(selected_count(&cells), 0);
    }

    #[test]
    fn today_flag_requires_full_date_match() {
        let model = CalendarModel::new(date(2026, 10, 19));
        let october = model.grid_layout(YearMonth::new(2026, 10).unwrap(), date(2026, 10, 19));
        let today_days: Vec<u32> = october
            .iter()
            .filter_map(GridCell::as_day)
            .filter(|cell| cell.is_today)
            .map(|cell| cell.day)
            .collect();
        assert_eq!(today_days, vec![19]);

        let next_year = model.grid_layout(YearMonth::new(2027, 10).unwrap(), date(2026, 10, 19));
        assert!(next_year
            .iter()
            .filter_map(GridCell::as_day)
            .all(|cell| !cell.is_today && !cell.is_selected));
    }

    #[test]
    fn monday_week_start_shifts_leading_cells() {
        let model = CalendarModel::new(date(2026, 11, 1)).with_week_start(WeekStart::Monday);
        // 2026-11-01 is a Sunday: last column for Monday-first grids.
        let cells = model.viewed_grid(date(2026, 11, 1));
        assert_eq!(cells.iter().take_while(|cell| cell.is_empty()).count(), 6);
        assert_eq!(cells.len(), 6 + 30);
    }
}
