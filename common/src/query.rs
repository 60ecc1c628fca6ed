//! Read-side queries over a reservation snapshot: upcoming arrivals, guest
//! search and stay history.

use std::collections::HashSet;

use chrono::{Duration, NaiveDate};

use crate::reservation::{Reservation, ReservationStatus};

/// Pending reservations arriving within `[today, today + window_days]`,
/// skipping ids the user dismissed. Ordered by check-in, then id.
pub fn upcoming_arrivals<'a>(
    reservations: &'a [Reservation],
    today: NaiveDate,
    window_days: u32,
    dismissed: &HashSet<String>,
) -> Vec<&'a Reservation> {
    let horizon = today + Duration::days(window_days as i64);
    let mut upcoming: Vec<&Reservation> = reservations
        .iter()
        .filter(|r| r.status == ReservationStatus::Pending)
        .filter(|r| r.check_in >= today && r.check_in <= horizon)
        .filter(|r| !dismissed.contains(&r.id))
        .collect();
    upcoming.sort_by(|a, b| a.check_in.cmp(&b.check_in).then_with(|| a.id.cmp(&b.id)));
    upcoming
}

/// Case-insensitive substring match on the guest name. A blank term
/// matches everything.
pub fn search_by_guest<'a, I>(reservations: I, term: &str) -> Vec<&'a Reservation>
where
    I: IntoIterator<Item = &'a Reservation>,
{
    let needle = term.trim().to_lowercase();
    reservations
        .into_iter()
        .filter(|r| needle.is_empty() || r.guest_name.to_lowercase().contains(&needle))
        .collect()
}

/// Stays that have ended by `today` (check-out is exclusive, so a guest
/// leaving today is history). Most recent check-out first.
pub fn past_reservations(reservations: &[Reservation], today: NaiveDate) -> Vec<&Reservation> {
    let mut past: Vec<&Reservation> = reservations
        .iter()
        .filter(|r| r.check_out <= today)
        .collect();
    past.sort_by(|a, b| b.check_out.cmp(&a.check_out).then_with(|| a.id.cmp(&b.id)));
    past
}

/// Number of well-formed reservations occupying the night of `date`.
pub fn occupancy_on(reservations: &[Reservation], date: NaiveDate) -> usize {
    reservations
        .iter()
        .filter(|r| r.is_well_formed() && r.occupies(date))
        .count()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, m, day).unwrap()
    }

    fn sample() -> Vec<Reservation> {
        let mut confirmed = Reservation::new("c", "Carla Díaz", d(6, 3), d(6, 6));
        confirmed.status = ReservationStatus::Confirmed;
        vec![
            Reservation::new("b", "Juan Pérez", d(6, 8), d(6, 10)),
            Reservation::new("a", "Ana Gómez", d(6, 2), d(6, 4)),
            confirmed,
            Reservation::new("z", "Pedro Soto", d(6, 9), d(6, 12)),
            Reservation::new("old", "Luis Rojas", d(5, 20), d(6, 1)),
        ]
    }

    #[test]
    fn test_upcoming_window_is_inclusive() {
        let rs = sample();
        let ids: Vec<_> = upcoming_arrivals(&rs, d(6, 1), 7, &HashSet::new())
            .iter()
            .map(|r| r.id.as_str())
            .collect();
        // "c" is confirmed, "z" arrives on day 8, "old" already arrived.
        assert_eq!(ids, ["a", "b"]);
    }

    #[test]
    fn test_upcoming_skips_dismissed() {
        let rs = sample();
        let dismissed: HashSet<String> = ["a".to_string()].into();
        let ids: Vec<_> = upcoming_arrivals(&rs, d(6, 1), 8, &dismissed)
            .iter()
            .map(|r| r.id.as_str())
            .collect();
        assert_eq!(ids, ["b", "z"]);
    }

    #[test]
    fn test_search_by_guest() {
        let rs = sample();
        assert_eq!(search_by_guest(&rs, "PÉREZ").len(), 1);
        assert_eq!(search_by_guest(&rs, "  GÓM ").len(), 1);
        assert_eq!(search_by_guest(&rs, "").len(), rs.len());
        assert!(search_by_guest(&rs, "nadie").is_empty());
    }

    #[test]
    fn test_past_reservations() {
        let rs = sample();
        let ids: Vec<_> = past_reservations(&rs, d(6, 4))
            .iter()
            .map(|r| r.id.as_str())
            .collect();
        assert_eq!(ids, ["a", "old"]);
    }

    #[test]
    fn test_occupancy() {
        let rs = sample();
        assert_eq!(occupancy_on(&rs, d(6, 3)), 2);
        assert_eq!(occupancy_on(&rs, d(6, 4)), 1);
        assert_eq!(occupancy_on(&rs, d(6, 1)), 0);
    }
}
