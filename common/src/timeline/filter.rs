//! Interval filter – picks the reservations visible in a grid span.

use chrono::NaiveDate;
use tracing::warn;

use crate::reservation::Reservation;

/// Reservations overlapping the half-open span `[start, end)`, ordered by
/// check-in then id. Malformed records (`check_in >= check_out`) are
/// dropped with a warning.
///
/// A stay checking out on `start` does not overlap: the guest is gone
/// before the first visible night.
pub fn visible_reservations(
    reservations: &[Reservation],
    start: NaiveDate,
    end: NaiveDate,
) -> Vec<&Reservation> {
    let mut visible: Vec<&Reservation> = reservations
        .iter()
        .filter(|r| {
            if r.is_well_formed() {
                return true;
            }
            warn!(
                "Skipping malformed reservation {} ({}): check-in {} is not before check-out {}",
                r.id, r.guest_name, r.check_in, r.check_out
            );
            false
        })
        .filter(|r| r.overlaps(start, end))
        .collect();

    visible.sort_by(|a, b| a.check_in.cmp(&b.check_in).then_with(|| a.id.cmp(&b.id)));
    visible
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, m, day).unwrap()
    }

    fn ids(rs: &[&Reservation]) -> Vec<String> {
        rs.iter().map(|r| r.id.clone()).collect()
    }

    #[test]
    fn test_boundary_overlap() {
        let rs = vec![
            Reservation::new("leaves-on-start", "A", d(5, 20), d(6, 1)),
            Reservation::new("spans-start", "B", d(5, 20), d(6, 2)),
            Reservation::new("arrives-on-end", "C", d(7, 1), d(7, 3)),
            Reservation::new("spans-end", "D", d(6, 30), d(7, 3)),
            Reservation::new("covers-all", "E", d(5, 1), d(8, 1)),
        ];
        let visible = visible_reservations(&rs, d(6, 1), d(7, 1));
        assert_eq!(ids(&visible), ["covers-all", "spans-start", "spans-end"]);
    }

    #[test]
    fn test_malformed_dropped() {
        let rs = vec![
            Reservation::new("inverted", "A", d(6, 5), d(6, 2)),
            Reservation::new("empty", "B", d(6, 5), d(6, 5)),
            Reservation::new("ok", "C", d(6, 5), d(6, 6)),
        ];
        let visible = visible_reservations(&rs, d(6, 1), d(7, 1));
        assert_eq!(ids(&visible), ["ok"]);
    }

    #[test]
    fn test_order_independent_of_input() {
        let rs = vec![
            Reservation::new("b", "B", d(6, 3), d(6, 5)),
            Reservation::new("c", "C", d(6, 2), d(6, 9)),
            Reservation::new("a", "A", d(6, 3), d(6, 4)),
        ];
        let mut reversed = rs.clone();
        reversed.reverse();
        let expected = ["c", "a", "b"];
        assert_eq!(ids(&visible_reservations(&rs, d(6, 1), d(7, 1))), expected);
        assert_eq!(ids(&visible_reservations(&reversed, d(6, 1), d(7, 1))), expected);
    }

    #[test]
    fn test_empty_set() {
        assert!(visible_reservations(&[], d(6, 1), d(7, 1)).is_empty());
    }
}
