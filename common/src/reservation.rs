//! Reservation record and its categorical fields.
//!
//! Dates are calendar dates. `check_out` is exclusive: the guest leaves on
//! that day and does not occupy the cabin that night.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::ReservationError;

/// Largest party a single booking may hold.
pub const MAX_GUESTS: u32 = 40;
/// Longest stay a single booking may span.
pub const MAX_NIGHTS: u32 = 366;

// ─── Categorical fields ──────────────────────────────────────────────────────

/// Booking status. The wire names are the ones stored by the booking office.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ReservationStatus {
    #[default]
    #[serde(rename = "Pendiente")]
    Pending,
    #[serde(rename = "Confirmada")]
    Confirmed,
    #[serde(rename = "Cancelada")]
    Cancelled,
}

impl ReservationStatus {
    pub const ALL: [ReservationStatus; 3] = [Self::Pending, Self::Confirmed, Self::Cancelled];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "Pendiente",
            Self::Confirmed => "Confirmada",
            Self::Cancelled => "Cancelada",
        }
    }

    /// CSS modifier shared by the table badges and the timeline bars.
    pub fn css_class(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Confirmed => "confirmed",
            Self::Cancelled => "cancelled",
        }
    }
}

impl FromStr for ReservationStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|st| st.as_str().eq_ignore_ascii_case(s) || st.css_class() == s)
            .ok_or_else(|| format!("unknown status: {s}"))
    }
}

/// Cabin category. Only used for styling; the layout engine ignores it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CabinType {
    Standard,
    Family,
    Premium,
    #[default]
    #[serde(other)]
    Unassigned,
}

impl CabinType {
    pub const ALL: [CabinType; 4] = [Self::Standard, Self::Family, Self::Premium, Self::Unassigned];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Standard => "standard",
            Self::Family => "family",
            Self::Premium => "premium",
            Self::Unassigned => "unassigned",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Standard => "Estándar",
            Self::Family => "Familiar",
            Self::Premium => "Premium",
            Self::Unassigned => "Sin asignar",
        }
    }

    pub fn css_class(self) -> &'static str {
        match self {
            Self::Standard => "cabin-standard",
            Self::Family => "cabin-family",
            Self::Premium => "cabin-premium",
            Self::Unassigned => "cabin-unassigned",
        }
    }
}

impl FromStr for CabinType {
    type Err = std::convert::Infallible;

    /// Unknown tags fall back to [`CabinType::Unassigned`], matching serde.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::ALL
            .into_iter()
            .find(|c| c.as_str().eq_ignore_ascii_case(s))
            .unwrap_or(Self::Unassigned))
    }
}

/// Pricing season.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Season {
    #[default]
    #[serde(rename = "Baja")]
    Low,
    #[serde(rename = "Alta")]
    High,
}

impl Season {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Low => "Baja",
            Self::High => "Alta",
        }
    }
}

impl FromStr for Season {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Baja" | "low" => Ok(Self::Low),
            "Alta" | "high" => Ok(Self::High),
            _ => Err(format!("unknown season: {s}")),
        }
    }
}

/// How the deposit amount is determined.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DepositKind {
    /// A configured percentage of the total price.
    #[default]
    Percentage,
    /// An amount entered by staff.
    Manual,
}

impl DepositKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Percentage => "percentage",
            Self::Manual => "manual",
        }
    }
}

impl FromStr for DepositKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "percentage" => Ok(Self::Percentage),
            "manual" => Ok(Self::Manual),
            _ => Err(format!("unknown deposit kind: {s}")),
        }
    }
}

// ─── Reservation ─────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Reservation {
    /// Empty until the record has been stored.
    #[serde(default)]
    pub id: String,
    pub guest_name: String,
    pub check_in: NaiveDate,
    pub check_out: NaiveDate,
    #[serde(default)]
    pub cabin_type: CabinType,
    #[serde(default)]
    pub status: ReservationStatus,

    #[serde(default)]
    pub adults: u32,
    #[serde(default)]
    pub children: u32,
    #[serde(default)]
    pub infants: u32,
    #[serde(default)]
    pub season: Season,

    #[serde(default)]
    pub flight_in: String,
    #[serde(default)]
    pub flight_out: String,

    #[serde(default)]
    pub deposit_kind: DepositKind,
    #[serde(default)]
    pub deposit_amount: u64,
    #[serde(default)]
    pub total_price: u64,
}

impl Reservation {
    /// A pending reservation for one adult with no pricing filled in.
    pub fn new(id: &str, guest_name: &str, check_in: NaiveDate, check_out: NaiveDate) -> Self {
        Reservation {
            id: id.to_string(),
            guest_name: guest_name.to_string(),
            check_in,
            check_out,
            cabin_type: CabinType::default(),
            status: ReservationStatus::default(),
            adults: 1,
            children: 0,
            infants: 0,
            season: Season::default(),
            flight_in: String::new(),
            flight_out: String::new(),
            deposit_kind: DepositKind::default(),
            deposit_amount: 0,
            total_price: 0,
        }
    }

    /// `check_in < check_out`. Records failing this are never laid out.
    pub fn is_well_formed(&self) -> bool {
        self.check_in < self.check_out
    }

    /// Number of nights; zero for malformed records.
    pub fn nights(&self) -> u32 {
        (self.check_out - self.check_in).num_days().max(0) as u32
    }

    pub fn total_guests(&self) -> u32 {
        self.adults
            .saturating_add(self.children)
            .saturating_add(self.infants)
    }

    /// Whether the cabin is occupied on the night of `date`.
    pub fn occupies(&self, date: NaiveDate) -> bool {
        self.check_in <= date && date < self.check_out
    }

    /// Half-open overlap with `[start, end)`.
    pub fn overlaps(&self, start: NaiveDate, end: NaiveDate) -> bool {
        self.check_in < end && self.check_out > start
    }

    /// Checks a record before it is stored.
    pub fn validate(&self) -> Result<(), ReservationError> {
        if self.guest_name.trim().is_empty() {
            return Err(ReservationError::EmptyGuestName);
        }
        if !self.is_well_formed() {
            return Err(ReservationError::InvalidDates {
                check_in: self.check_in,
                check_out: self.check_out,
            });
        }
        let guests = self.total_guests();
        if guests == 0 {
            return Err(ReservationError::NoGuests);
        }
        if guests > MAX_GUESTS {
            return Err(ReservationError::TooManyGuests {
                guests,
                max: MAX_GUESTS,
            });
        }
        if self.nights() > MAX_NIGHTS {
            return Err(ReservationError::StayTooLong {
                nights: self.nights(),
                max: MAX_NIGHTS,
            });
        }
        if self.deposit_amount > self.total_price {
            return Err(ReservationError::DepositExceedsTotal {
                deposit: self.deposit_amount,
                total: self.total_price,
            });
        }
        Ok(())
    }
}

impl fmt::Display for Reservation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Reservation({}, {}, {} → {}, {})",
            self.id,
            self.guest_name,
            self.check_in,
            self.check_out,
            self.status.as_str()
        )
    }
}

/// Parse a `YYYY-MM-DD` date as sent by HTML date inputs.
pub fn parse_date(s: &str) -> Result<NaiveDate, ReservationError> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
        .map_err(|_| ReservationError::InvalidDate(s.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, m, day).unwrap()
    }

    #[test]
    fn test_checkout_is_exclusive() {
        let r = Reservation::new("1", "Ana", d(6, 1), d(6, 3));
        assert!(r.occupies(d(6, 1)));
        assert!(r.occupies(d(6, 2)));
        assert!(!r.occupies(d(6, 3)));
        assert_eq!(r.nights(), 2);
        assert!(!r.overlaps(d(6, 3), d(6, 5)));
        assert!(r.overlaps(d(5, 20), d(6, 2)));
    }

    #[test]
    fn test_validate() {
        let mut r = Reservation::new("1", "Ana", d(6, 1), d(6, 3));
        assert_eq!(r.validate(), Ok(()));

        r.guest_name = "  ".into();
        assert_eq!(r.validate(), Err(ReservationError::EmptyGuestName));

        r.guest_name = "Ana".into();
        r.check_out = d(6, 1);
        assert!(matches!(r.validate(), Err(ReservationError::InvalidDates { .. })));
        assert_eq!(r.nights(), 0);

        r.check_out = d(6, 4);
        r.adults = 0;
        assert_eq!(r.validate(), Err(ReservationError::NoGuests));

        r.adults = 2;
        r.total_price = 100;
        r.deposit_amount = 150;
        assert_eq!(
            r.validate(),
            Err(ReservationError::DepositExceedsTotal { deposit: 150, total: 100 })
        );
    }

    #[test]
    fn test_validate_rejects_absurd_parties_and_stays() {
        let mut r = Reservation::new("1", "Ana", d(6, 1), d(6, 3));
        r.adults = u32::MAX;
        r.children = 1;
        assert_eq!(r.total_guests(), u32::MAX);
        assert_eq!(
            r.validate(),
            Err(ReservationError::TooManyGuests { guests: u32::MAX, max: MAX_GUESTS })
        );

        r.adults = 2;
        r.children = 0;
        r.check_out = NaiveDate::from_ymd_opt(9999, 12, 31).unwrap();
        assert!(matches!(r.validate(), Err(ReservationError::StayTooLong { .. })));
    }

    #[test]
    fn test_wire_names() {
        let mut r = Reservation::new("abc", "Juan Pérez", d(6, 1), d(6, 4));
        r.status = ReservationStatus::Confirmed;
        r.season = Season::High;
        let json = serde_json::to_value(&r).unwrap();
        assert_eq!(json["status"], "Confirmada");
        assert_eq!(json["season"], "Alta");
        assert_eq!(json["checkIn"], "2025-06-01");
        assert_eq!(json["guestName"], "Juan Pérez");
    }

    #[test]
    fn test_unknown_cabin_type_falls_back() {
        let json = r#"{"guestName":"Ana","checkIn":"2025-06-01","checkOut":"2025-06-02","cabinType":"igloo"}"#;
        let r: Reservation = serde_json::from_str(json).unwrap();
        assert_eq!(r.cabin_type, CabinType::Unassigned);
        assert_eq!(r.status, ReservationStatus::Pending);
        assert_eq!("igloo".parse::<CabinType>(), Ok(CabinType::Unassigned));
        assert_eq!("Family".parse::<CabinType>(), Ok(CabinType::Family));
    }

    #[test]
    fn test_status_parse() {
        assert_eq!("Cancelada".parse(), Ok(ReservationStatus::Cancelled));
        assert_eq!("confirmed".parse(), Ok(ReservationStatus::Confirmed));
        assert!("maybe".parse::<ReservationStatus>().is_err());
    }

    #[test]
    fn test_parse_date() {
        assert_eq!(parse_date("2025-06-01"), Ok(d(6, 1)));
        assert!(matches!(parse_date("01/06/2025"), Err(ReservationError::InvalidDate(_))));
    }
}
