//! Month grid – the Monday-start, whole-week day sequence shown for a month.

use chrono::{Datelike, Duration, Months, NaiveDate};
use serde::{Deserialize, Serialize};

/// Years kept well inside chrono's range so lead/trail weeks always exist.
const YEAR_LIMIT: i32 = 262_000;

pub const WEEKDAY_LABELS: [&str; 7] = ["Lun", "Mar", "Mié", "Jue", "Vie", "Sáb", "Dom"];

// ─── Focus month ─────────────────────────────────────────────────────────────

/// The month a grid is built around. Always valid: construction normalises
/// out-of-range months into neighbouring years.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct FocusMonth {
    first: NaiveDate,
}

impl FocusMonth {
    /// `month` is 1-based; 0 is December of the previous year, 13 is
    /// January of the next.
    pub fn new(year: i32, month: i32) -> Self {
        let total = year as i64 * 12 + (month as i64 - 1);
        let y = total.div_euclid(12).clamp(-YEAR_LIMIT as i64, YEAR_LIMIT as i64) as i32;
        let m = total.rem_euclid(12) as u32 + 1;
        FocusMonth {
            first: NaiveDate::from_ymd_opt(y, m, 1).unwrap_or_default(),
        }
    }

    /// The month `date` falls in.
    pub fn containing(date: NaiveDate) -> Self {
        Self::new(date.year(), date.month() as i32)
    }

    pub fn year(&self) -> i32 {
        self.first.year()
    }

    /// 1-based month number.
    pub fn month(&self) -> u32 {
        self.first.month()
    }

    pub fn first_day(&self) -> NaiveDate {
        self.first
    }

    pub fn last_day(&self) -> NaiveDate {
        self.first
            .checked_add_months(Months::new(1))
            .and_then(|d| d.pred_opt())
            .unwrap_or(self.first)
    }

    pub fn next(&self) -> Self {
        Self::new(self.year(), self.month() as i32 + 1)
    }

    pub fn prev(&self) -> Self {
        Self::new(self.year(), self.month() as i32 - 1)
    }

    /// e.g. `"junio 2025"`.
    pub fn label(&self) -> String {
        format!("{} {}", month_label(self.month()), self.year())
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date.year() == self.year() && date.month() == self.month()
    }
}

// ─── Grid ────────────────────────────────────────────────────────────────────

/// One cell of the month grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalendarDay {
    pub date: NaiveDate,
    /// False for the lead/trail days borrowed from adjacent months.
    pub in_focus_month: bool,
}

/// Contiguous Monday-start day sequence covering a focus month in whole
/// weeks. Its length is always 28, 35 or 42.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthGrid {
    pub focus: FocusMonth,
    pub days: Vec<CalendarDay>,
}

impl MonthGrid {
    pub fn build(focus: FocusMonth) -> Self {
        let first = focus.first_day();
        let last = focus.last_day();
        let start = first - Duration::days(first.weekday().num_days_from_monday() as i64);
        let end = last + Duration::days(7 - last.weekday().num_days_from_monday() as i64);

        let days = start
            .iter_days()
            .take_while(|d| *d < end)
            .map(|date| CalendarDay {
                date,
                in_focus_month: focus.contains(date),
            })
            .collect();

        MonthGrid { focus, days }
    }

    /// First visible day (a Monday).
    pub fn start(&self) -> NaiveDate {
        self.days.first().map(|d| d.date).unwrap_or(self.focus.first_day())
    }

    /// Day after the last visible day, i.e. the exclusive end of the span.
    pub fn end(&self) -> NaiveDate {
        self.start() + Duration::days(self.days.len() as i64)
    }

    pub fn week_count(&self) -> usize {
        self.days.len() / 7
    }

    /// Position of `date` in the sequence, if visible.
    pub fn index_of(&self, date: NaiveDate) -> Option<usize> {
        let offset = (date - self.start()).num_days();
        (0..self.days.len() as i64)
            .contains(&offset)
            .then_some(offset as usize)
    }

    pub fn weeks(&self) -> std::slice::Chunks<'_, CalendarDay> {
        self.days.chunks(7)
    }
}

// ─── Helpers ─────────────────────────────────────────────────────────────────

pub fn month_label(m: u32) -> &'static str {
    match m {
        1 => "enero", 2 => "febrero", 3 => "marzo", 4 => "abril",
        5 => "mayo", 6 => "junio", 7 => "julio", 8 => "agosto",
        9 => "septiembre", 10 => "octubre", 11 => "noviembre", 12 => "diciembre",
        _ => "?",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Weekday;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn test_focus_month_normalises() {
        assert_eq!(FocusMonth::new(2024, 13), FocusMonth::new(2025, 1));
        assert_eq!(FocusMonth::new(2025, 0), FocusMonth::new(2024, 12));
        assert_eq!(FocusMonth::new(2025, -11), FocusMonth::new(2024, 1));
        assert_eq!(FocusMonth::new(2025, 6).prev().next(), FocusMonth::new(2025, 6));
        assert_eq!(FocusMonth::new(2025, 12).next().year(), 2026);
        assert_eq!(FocusMonth::containing(d(2025, 6, 17)).first_day(), d(2025, 6, 1));
    }

    #[test]
    fn test_extreme_years_still_build() {
        for focus in [FocusMonth::new(i32::MAX, 6), FocusMonth::new(i32::MIN, 6)] {
            let grid = MonthGrid::build(focus);
            assert_eq!(grid.days.len() % 7, 0);
            assert!(!grid.days.is_empty());
        }
    }

    #[test]
    fn test_last_day() {
        assert_eq!(FocusMonth::new(2024, 2).last_day(), d(2024, 2, 29));
        assert_eq!(FocusMonth::new(2025, 2).last_day(), d(2025, 2, 28));
        assert_eq!(FocusMonth::new(2025, 12).last_day(), d(2025, 12, 31));
    }

    #[test]
    fn test_june_2025_grid() {
        // June 1st 2025 is a Sunday, June 30th a Monday.
        let grid = MonthGrid::build(FocusMonth::new(2025, 6));
        assert_eq!(grid.start(), d(2025, 5, 26));
        assert_eq!(grid.end(), d(2025, 7, 7));
        assert_eq!(grid.days.len(), 42);
        assert_eq!(grid.week_count(), 6);
        assert!(!grid.days[5].in_focus_month);
        assert!(grid.days[6].in_focus_month);
        assert!(grid.days[35].in_focus_month);
        assert!(!grid.days[36].in_focus_month);
    }

    #[test]
    fn test_february_2021_is_four_weeks() {
        // Feb 1st 2021 is a Monday and Feb 28th a Sunday.
        let grid = MonthGrid::build(FocusMonth::new(2021, 2));
        assert_eq!(grid.days.len(), 28);
        assert!(grid.days.iter().all(|d| d.in_focus_month));
    }

    #[test]
    fn test_grid_shape_for_many_months() {
        for year in 2020..2030 {
            for month in 1..=12 {
                let focus = FocusMonth::new(year, month);
                let grid = MonthGrid::build(focus);
                assert_eq!(grid.days.len() % 7, 0);
                assert!(grid.days.len() >= 28 && grid.days.len() <= 42);
                assert_eq!(grid.start().weekday(), Weekday::Mon);
                assert!(grid.index_of(focus.first_day()).unwrap() < 7);
                assert!(grid.index_of(focus.last_day()).unwrap() >= grid.days.len() - 7);
                assert!(grid.days.windows(2).all(|w| w[1].date == w[0].date.succ_opt().unwrap()));
                assert_eq!(grid, MonthGrid::build(focus));
            }
        }
    }

    #[test]
    fn test_index_of() {
        let grid = MonthGrid::build(FocusMonth::new(2025, 6));
        assert_eq!(grid.index_of(d(2025, 5, 26)), Some(0));
        assert_eq!(grid.index_of(d(2025, 7, 6)), Some(41));
        assert_eq!(grid.index_of(d(2025, 7, 7)), None);
        assert_eq!(grid.index_of(d(2025, 5, 25)), None);
    }

    #[test]
    fn test_label() {
        assert_eq!(FocusMonth::new(2025, 6).label(), "junio 2025");
    }
}
