//! One full layout pass: snapshot + focus month → render-ready timeline.

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::filter::visible_reservations;
use super::geometry::{segments_for, BarSegment};
use super::grid::{CalendarDay, FocusMonth, MonthGrid};
use super::heights::{week_heights, LayoutMetrics};
use super::lanes::{allocate, LaneAssignment};
use crate::reservation::Reservation;

/// Everything a renderer needs to draw a month: the day cells, the height
/// of each week row and the bar segments. Segments refer back to their
/// reservation by id only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimelineLayout {
    pub grid: MonthGrid,
    pub week_heights: Vec<u32>,
    /// Ordered by reservation (check-in, id), then week row.
    pub segments: Vec<BarSegment>,
    pub lanes: LaneAssignment,
}

impl TimelineLayout {
    /// Lay out `reservations` over the grid for `focus`.
    ///
    /// Pure and infallible: the same snapshot and month always give the
    /// same layout, whatever the input order.
    pub fn compute(reservations: &[Reservation], focus: FocusMonth, metrics: &LayoutMetrics) -> Self {
        let grid = MonthGrid::build(focus);
        let visible = visible_reservations(reservations, grid.start(), grid.end());
        let lane_of = allocate(&visible);

        let segments: Vec<BarSegment> = visible
            .iter()
            .zip(&lane_of)
            .flat_map(|(r, lane)| segments_for(&r.id, r.check_in, r.check_out, *lane, &grid))
            .collect();

        let week_heights = week_heights(&segments, grid.week_count(), metrics);
        let lanes = LaneAssignment::new(&visible, &lane_of);

        debug!(
            "Timeline {}: {} of {} reservations visible, {} lanes, {} segments",
            focus.label(),
            visible.len(),
            reservations.len(),
            lanes.lane_count(),
            segments.len()
        );

        TimelineLayout {
            grid,
            week_heights,
            segments,
            lanes,
        }
    }

    pub fn focus(&self) -> FocusMonth {
        self.grid.focus
    }

    pub fn days(&self) -> &[CalendarDay] {
        &self.grid.days
    }

    pub fn week_count(&self) -> usize {
        self.grid.week_count()
    }

    pub fn segments_in_week(&self, week_row: usize) -> impl Iterator<Item = &BarSegment> {
        self.segments.iter().filter(move |s| s.week_row == week_row)
    }

    pub fn segments_of<'a>(&'a self, reservation_id: &'a str) -> impl Iterator<Item = &'a BarSegment> {
        self.segments
            .iter()
            .filter(move |s| s.reservation_id == reservation_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn d(m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, m, day).unwrap()
    }

    #[test]
    fn test_empty_snapshot() {
        let m = LayoutMetrics::default();
        let layout = TimelineLayout::compute(&[], FocusMonth::new(2025, 6), &m);
        assert!(layout.segments.is_empty());
        assert!(layout.lanes.is_empty());
        assert_eq!(layout.week_heights, vec![m.min_height; 6]);
        assert_eq!(layout.days().len(), 42);
    }

    #[test]
    fn test_week_rows_and_heights() {
        let m = LayoutMetrics::default();
        let rs = vec![
            Reservation::new("a", "A", d(6, 3), d(6, 5)),
            Reservation::new("b", "B", d(6, 4), d(6, 6)),
            Reservation::new("c", "C", d(6, 4), d(6, 10)),
            Reservation::new("bad", "X", d(6, 20), d(6, 18)),
        ];
        let layout = TimelineLayout::compute(&rs, FocusMonth::new(2025, 6), &m);
        assert_eq!(layout.lanes.lane_of("a"), Some(0));
        assert_eq!(layout.lanes.lane_of("b"), Some(1));
        assert_eq!(layout.lanes.lane_of("c"), Some(2));
        assert_eq!(layout.lanes.lane_of("bad"), None);

        // "c" spills into row 2 alone, still on lane 2.
        let row2: Vec<_> = layout.segments_in_week(2).collect();
        assert_eq!(row2.len(), 1);
        assert_eq!(row2[0].lane, 2);
        assert_eq!(layout.week_heights[1], m.week_height(Some(2)));
        assert_eq!(layout.week_heights[2], m.week_height(Some(2)));
        assert_eq!(layout.week_heights[3], m.min_height);
        assert_eq!(layout.segments_of("c").count(), 2);
    }
}
