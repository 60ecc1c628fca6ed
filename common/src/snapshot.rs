//! Immutable reservation snapshots with latest-wins publication.
//!
//! The reservation store never mutates a published snapshot. Writers build
//! a complete new list and [`SnapshotCell::publish`] it; readers take an
//! `Arc` to whatever is current and lay it out without holding a lock.

use std::sync::{Arc, PoisonError, RwLock};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::reservation::Reservation;
use crate::timeline::{FocusMonth, LayoutMetrics, TimelineLayout};

/// A complete reservation set at one revision.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub revision: u64,
    pub reservations: Vec<Reservation>,
}

impl Snapshot {
    pub fn get(&self, id: &str) -> Option<&Reservation> {
        self.reservations.iter().find(|r| r.id == id)
    }

    pub fn layout(&self, focus: FocusMonth, metrics: &LayoutMetrics) -> TimelineLayout {
        TimelineLayout::compute(&self.reservations, focus, metrics)
    }
}

/// Holder of the current [`Snapshot`].
#[derive(Debug, Default)]
pub struct SnapshotCell {
    current: RwLock<Arc<Snapshot>>,
}

impl SnapshotCell {
    pub fn new() -> Self {
        Self::default()
    }

    /// The latest published snapshot.
    pub fn current(&self) -> Arc<Snapshot> {
        self.current
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn revision(&self) -> u64 {
        self.current().revision
    }

    /// Replace the current snapshot and return its revision number, one
    /// higher than the previous.
    pub fn publish(&self, reservations: Vec<Reservation>) -> u64 {
        let mut guard = self.current.write().unwrap_or_else(PoisonError::into_inner);
        let revision = guard.revision + 1;
        debug!("Publishing snapshot r{revision} ({} reservations)", reservations.len());
        *guard = Arc::new(Snapshot {
            revision,
            reservations,
        });
        revision
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn d(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 6, day).unwrap()
    }

    #[test]
    fn test_publish_replaces_wholesale() {
        let cell = SnapshotCell::new();
        assert_eq!(cell.revision(), 0);
        assert!(cell.current().reservations.is_empty());

        let before = cell.current();
        let rev = cell.publish(vec![Reservation::new("a", "Ana", d(1), d(3))]);
        assert_eq!(rev, 1);

        // Readers holding the old snapshot keep seeing it unchanged.
        assert!(before.reservations.is_empty());
        assert_eq!(cell.current().get("a").map(|r| r.guest_name.as_str()), Some("Ana"));

        cell.publish(Vec::new());
        assert_eq!(cell.revision(), 2);
        assert!(cell.current().get("a").is_none());
    }

    #[test]
    fn test_concurrent_readers_see_whole_snapshots() {
        let cell = Arc::new(SnapshotCell::new());
        let writer = {
            let cell = Arc::clone(&cell);
            std::thread::spawn(move || {
                for n in 1..=50u32 {
                    let rs = (0..n)
                        .map(|i| Reservation::new(&i.to_string(), "G", d(1), d(2)))
                        .collect();
                    cell.publish(rs);
                }
            })
        };
        for _ in 0..200 {
            let snap = cell.current();
            assert_eq!(snap.reservations.len() as u64, snap.revision);
        }
        writer.join().unwrap();
        assert_eq!(cell.revision(), 50);
    }

    #[test]
    fn test_layout_from_snapshot() {
        let cell = SnapshotCell::new();
        cell.publish(vec![Reservation::new("a", "Ana", d(1), d(5))]);
        let layout = cell
            .current()
            .layout(FocusMonth::new(2025, 6), &LayoutMetrics::default());
        assert_eq!(layout.lanes.lane_of("a"), Some(0));
    }
}
