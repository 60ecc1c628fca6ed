//! Shared data-transfer objects used by both server and client.

use serde::{Deserialize, Serialize};

use cabana_common::config::Config;
use cabana_common::pricing::Rates;
use cabana_common::reservation::parse_date;
use cabana_common::timeline::LayoutMetrics;
use cabana_common::{
    CabinType, DepositKind, Reservation, ReservationError, ReservationStatus, Season,
};

// ─── Settings ────────────────────────────────────────────────────────────────

/// The part of the server configuration the browser needs.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    pub metrics: LayoutMetrics,
    pub rates: Rates,
    pub upcoming_window_days: u32,
    pub poll_interval_secs: u64,
}

impl From<&Config> for Settings {
    fn from(config: &Config) -> Self {
        Settings {
            metrics: config.metrics,
            rates: config.rates,
            upcoming_window_days: config.upcoming_window_days,
            poll_interval_secs: config.poll_interval_secs,
        }
    }
}

impl Default for Settings {
    fn default() -> Self {
        Settings::from(&Config::default())
    }
}

// ─── Form draft ──────────────────────────────────────────────────────────────

/// Raw form values, exactly as typed. Converted into a [`Reservation`] on
/// submit and for the live price preview.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReservationDraft {
    pub guest_name: String,
    pub check_in: String,
    pub check_out: String,
    pub cabin_type: String,
    pub status: String,
    pub adults: String,
    pub children: String,
    pub infants: String,
    pub season: String,
    pub flight_in: String,
    pub flight_out: String,
    pub deposit_kind: String,
    pub deposit_amount: String,
}

/// Flights offered in the form.
pub const ARRIVAL_FLIGHTS: [&str; 2] = ["LA841", "LA843"];
pub const DEPARTURE_FLIGHTS: [&str; 2] = ["LA842", "LA844"];

impl ReservationDraft {
    /// Blank form for a new booking: one adult, low season, pending.
    pub fn blank() -> Self {
        ReservationDraft {
            cabin_type: CabinType::Unassigned.as_str().into(),
            status: ReservationStatus::Pending.as_str().into(),
            adults: "1".into(),
            children: "0".into(),
            infants: "0".into(),
            season: Season::Low.as_str().into(),
            flight_in: ARRIVAL_FLIGHTS[0].into(),
            flight_out: DEPARTURE_FLIGHTS[0].into(),
            deposit_kind: DepositKind::Percentage.as_str().into(),
            deposit_amount: "0".into(),
            ..Default::default()
        }
    }

    /// Pre-filled form for editing.
    pub fn from_reservation(r: &Reservation) -> Self {
        ReservationDraft {
            guest_name: r.guest_name.clone(),
            check_in: r.check_in.format("%Y-%m-%d").to_string(),
            check_out: r.check_out.format("%Y-%m-%d").to_string(),
            cabin_type: r.cabin_type.as_str().into(),
            status: r.status.as_str().into(),
            adults: r.adults.to_string(),
            children: r.children.to_string(),
            infants: r.infants.to_string(),
            season: r.season.as_str().into(),
            flight_in: r.flight_in.clone(),
            flight_out: r.flight_out.clone(),
            deposit_kind: r.deposit_kind.as_str().into(),
            deposit_amount: r.deposit_amount.to_string(),
        }
    }

    /// Parse into a reservation with `id`, priced with `rates`.
    ///
    /// Counts and amounts that do not parse are read as zero; the
    /// categorical fields fall back to their defaults. Only the dates are
    /// hard errors, since nothing sensible can replace them.
    pub fn to_reservation(&self, id: &str, rates: &Rates) -> Result<Reservation, ReservationError> {
        let count = |s: &str| s.trim().parse::<u32>().unwrap_or(0);

        let mut r = Reservation::new(
            id,
            self.guest_name.trim(),
            parse_date(&self.check_in)?,
            parse_date(&self.check_out)?,
        );
        r.cabin_type = self.cabin_type.parse().unwrap_or_default();
        r.status = self.status.parse().unwrap_or_default();
        r.adults = count(&self.adults);
        r.children = count(&self.children);
        r.infants = count(&self.infants);
        r.season = self.season.parse().unwrap_or_default();
        r.flight_in = self.flight_in.trim().to_string();
        r.flight_out = self.flight_out.trim().to_string();
        r.deposit_kind = self.deposit_kind.parse().unwrap_or_default();
        r.deposit_amount = self.deposit_amount.trim().parse().unwrap_or(0);
        rates.apply(&mut r);
        Ok(r)
    }
}
