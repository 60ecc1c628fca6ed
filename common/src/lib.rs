//! Cabana common – reservation model, configuration, pricing and the
//! timeline layout engine shared by the server and the WASM client.

pub mod config;
pub mod error;
pub mod pricing;
pub mod query;
pub mod reservation;
pub mod snapshot;
pub mod timeline;

pub use error::ReservationError;
pub use reservation::{CabinType, DepositKind, Reservation, ReservationStatus, Season};
