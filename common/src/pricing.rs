//! Nightly pricing and deposit calculation.
//!
//! Amounts are whole Chilean pesos. Infants stay free of charge.

use serde::{Deserialize, Serialize};

use crate::reservation::{DepositKind, Reservation, Season};

/// Nightly rates per guest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rates {
    pub adult_low: u64,
    pub adult_high: u64,
    pub child: u64,
    /// Share of the total charged up front for [`DepositKind::Percentage`].
    pub deposit_percent: u32,
}

impl Default for Rates {
    fn default() -> Self {
        Rates {
            adult_low: 25_000,
            adult_high: 30_000,
            child: 15_000,
            deposit_percent: 50,
        }
    }
}

impl Rates {
    pub fn adult_rate(&self, season: Season) -> u64 {
        match season {
            Season::Low => self.adult_low,
            Season::High => self.adult_high,
        }
    }

    /// `nights × (adults × adult rate + children × child rate)`; zero when
    /// the dates are not a valid stay.
    pub fn total(&self, reservation: &Reservation) -> u64 {
        let per_night = (reservation.adults as u64)
            .saturating_mul(self.adult_rate(reservation.season))
            .saturating_add((reservation.children as u64).saturating_mul(self.child));
        (reservation.nights() as u64).saturating_mul(per_night)
    }

    /// Deposit owed for `reservation` given its total price.
    pub fn deposit(&self, reservation: &Reservation, total: u64) -> u64 {
        match reservation.deposit_kind {
            DepositKind::Percentage => (total as u128 * self.deposit_percent as u128 / 100) as u64,
            DepositKind::Manual => reservation.deposit_amount.min(total),
        }
    }

    /// Fill in `total_price` and `deposit_amount`.
    pub fn apply(&self, reservation: &mut Reservation) {
        let total = self.total(reservation);
        reservation.deposit_amount = self.deposit(reservation, total);
        reservation.total_price = total;
    }
}

/// Format a peso amount with `.` thousands separators, e.g. `$150.000`.
pub fn format_clp(amount: u64) -> String {
    let digits = amount.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    out.push('$');
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push('.');
        }
        out.push(ch);
    }
    out
}
