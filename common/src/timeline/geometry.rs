//! Bar geometry – maps a stay onto grid cells, one segment per week row.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::grid::MonthGrid;

/// The visible part of one reservation within one week row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BarSegment {
    pub reservation_id: String,
    pub week_row: usize,
    /// 0 = Monday … 6 = Sunday.
    pub start_column: usize,
    /// 1..=7, never past Sunday.
    pub column_span: usize,
    pub lane: usize,
    /// The stay began before this segment's first cell (previous week or
    /// before the grid).
    pub clipped_start: bool,
    /// The stay continues after this segment's last cell.
    pub clipped_end: bool,
}

impl BarSegment {
    /// Grid index of the first covered cell.
    pub fn first_index(&self) -> usize {
        self.week_row * 7 + self.start_column
    }

    /// Grid index one past the last covered cell.
    pub fn end_index(&self) -> usize {
        self.first_index() + self.column_span
    }
}

/// Split `[check_in, check_out)` into per-week segments on `grid`, clipped
/// to the visible span. Returns nothing when the stay is not visible.
///
/// The spans of the returned segments add up to the number of visible
/// occupied nights.
pub fn segments_for(
    reservation_id: &str,
    check_in: NaiveDate,
    check_out: NaiveDate,
    lane: usize,
    grid: &MonthGrid,
) -> Vec<BarSegment> {
    let grid_start = grid.start();
    let grid_end = grid.end();
    let start = check_in.max(grid_start);
    let end = check_out.min(grid_end);
    if start >= end {
        return Vec::new();
    }

    let first = (start - grid_start).num_days() as usize;
    let last = (end - grid_start).num_days() as usize;

    let mut segments = Vec::with_capacity((last - first).div_ceil(7) + 1);
    let mut idx = first;
    while idx < last {
        let week_row = idx / 7;
        let seg_end = last.min((week_row + 1) * 7);
        segments.push(BarSegment {
            reservation_id: reservation_id.to_string(),
            week_row,
            start_column: idx % 7,
            column_span: seg_end - idx,
            lane,
            clipped_start: idx > first || check_in < grid_start,
            clipped_end: seg_end < last || check_out > grid_end,
        });
        idx = seg_end;
    }
    segments
}
