//! Server-only code: persistence and the reservation store.

pub mod db;
pub mod store;
