//! Lane allocator – greedy interval colouring.
//!
//! Reservations are visited in check-in order and each takes the lowest
//! lane whose previous occupant has already checked out. Because checkout
//! is exclusive, a lane freed on day `d` can take a guest arriving on `d`.
//! Visiting by start date makes this optimal: a new lane is only opened when
//! every existing lane is occupied on the arrival night, so the lane count
//! equals the largest number of simultaneous stays.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::reservation::Reservation;

/// Assign lanes to `sorted`, which must be ordered by check-in (ties by
/// id). Returns one lane per input, in input order.
pub fn allocate(sorted: &[&Reservation]) -> Vec<usize> {
    let mut lane_ends: Vec<NaiveDate> = Vec::new();
    let mut lanes = Vec::with_capacity(sorted.len());

    for r in sorted {
        let lane = match lane_ends.iter().position(|end| *end <= r.check_in) {
            Some(free) => {
                lane_ends[free] = r.check_out;
                free
            }
            None => {
                lane_ends.push(r.check_out);
                lane_ends.len() - 1
            }
        };
        lanes.push(lane);
    }
    lanes
}

/// Reservation id → lane index for one layout pass.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LaneAssignment {
    lanes: BTreeMap<String, usize>,
    lane_count: usize,
}

impl LaneAssignment {
    /// Pair each reservation with the lane [`allocate`] gave it.
    pub fn new(sorted: &[&Reservation], lanes: &[usize]) -> Self {
        LaneAssignment {
            lanes: sorted
                .iter()
                .zip(lanes)
                .map(|(r, lane)| (r.id.clone(), *lane))
                .collect(),
            lane_count: lanes.iter().max().map_or(0, |max| max + 1),
        }
    }

    pub fn from_sorted(sorted: &[&Reservation]) -> Self {
        Self::new(sorted, &allocate(sorted))
    }

    pub fn lane_of(&self, id: &str) -> Option<usize> {
        self.lanes.get(id).copied()
    }

    /// Number of lanes in use.
    pub fn lane_count(&self) -> usize {
        self.lane_count
    }

    pub fn len(&self) -> usize {
        self.lanes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lanes.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, usize)> {
        self.lanes.iter().map(|(id, lane)| (id.as_str(), *lane))
    }
}
