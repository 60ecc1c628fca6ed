//! Week row sizing.

use serde::{Deserialize, Serialize};

use super::geometry::BarSegment;

/// Pixel constants for week rows and the bars inside them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LayoutMetrics {
    /// Space above the first lane (day numbers).
    pub header_height: u32,
    pub bar_height: u32,
    pub bar_gap: u32,
    /// Floor for every week row, also the height of empty weeks.
    pub min_height: u32,
}

impl Default for LayoutMetrics {
    fn default() -> Self {
        LayoutMetrics {
            header_height: 28,
            bar_height: 20,
            bar_gap: 4,
            min_height: 96,
        }
    }
}

impl LayoutMetrics {
    fn lane_pitch(&self) -> u32 {
        self.bar_height.saturating_add(self.bar_gap)
    }

    /// Vertical offset of a lane's bar from the top of its week row.
    pub fn lane_offset(&self, lane: usize) -> u32 {
        let lane = u32::try_from(lane).unwrap_or(u32::MAX);
        self.header_height
            .saturating_add(lane.saturating_mul(self.lane_pitch()))
    }

    /// Row height for a week whose highest lane is `max_lane`.
    pub fn week_height(&self, max_lane: Option<usize>) -> u32 {
        match max_lane {
            Some(lane) => self
                .header_height
                .saturating_add(
                    u32::try_from(lane)
                        .unwrap_or(u32::MAX)
                        .saturating_add(1)
                        .saturating_mul(self.lane_pitch()),
                )
                .max(self.min_height),
            None => self.min_height,
        }
    }
}

/// Height of each of the `week_count` rows given the segments laid out on
/// them. Segments pointing past `week_count` are ignored.
pub fn week_heights(segments: &[BarSegment], week_count: usize, metrics: &LayoutMetrics) -> Vec<u32> {
    let mut max_lane: Vec<Option<usize>> = vec![None; week_count];
    for seg in segments {
        if let Some(slot) = max_lane.get_mut(seg.week_row) {
            *slot = Some(slot.map_or(seg.lane, |m| m.max(seg.lane)));
        }
    }
    max_lane.into_iter().map(|m| metrics.week_height(m)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_huge_metrics_saturate() {
        let metrics = LayoutMetrics {
            header_height: 28,
            bar_height: u32::MAX,
            bar_gap: u32::MAX,
            min_height: 96,
        };
        assert_eq!(metrics.lane_offset(0), 28);
        assert_eq!(metrics.lane_offset(3), u32::MAX);
        assert_eq!(metrics.week_height(Some(usize::MAX)), u32::MAX);
    }

    fn seg(week_row: usize, lane: usize) -> BarSegment {
        BarSegment {
            reservation_id: format!("{week_row}-{lane}"),
            week_row,
            start_column: 0,
            column_span: 1,
            lane,
            clipped_start: false,
            clipped_end: false,
        }
    }

    #[test]
    fn test_empty_weeks_use_minimum() {
        let m = LayoutMetrics::default();
        assert_eq!(week_heights(&[], 5, &m), vec![96; 5]);
    }

    #[test]
    fn test_height_grows_with_lanes() {
        let m = LayoutMetrics::default();
        let segs = [seg(0, 0), seg(1, 4), seg(1, 2), seg(2, 2)];
        // row 1: 28 + 5 × 24 = 148; row 2: 28 + 3 × 24 = 100
        assert_eq!(week_heights(&segs, 4, &m), [96, 148, 100, 96]);
    }

    #[test]
    fn test_out_of_range_rows_ignored() {
        let m = LayoutMetrics::default();
        assert_eq!(week_heights(&[seg(9, 20)], 2, &m), [96, 96]);
    }

    #[test]
    fn test_lane_offset() {
        let m = LayoutMetrics::default();
        assert_eq!(m.lane_offset(0), 28);
        assert_eq!(m.lane_offset(2), 76);
    }
}
