//! Reservation timeline layout engine.
//!
//! Takes a reservation snapshot and a focus month and lays the stays out as
//! horizontal bars over a Monday-start month grid:
//!
//! 1. [`grid`] builds the whole-week day sequence for the month.
//! 2. [`filter`] keeps the reservations overlapping the visible span.
//! 3. [`lanes`] assigns each one a lane so bars in a lane never collide.
//! 4. [`geometry`] turns each stay into per-week bar segments.
//! 5. [`heights`] sizes each week row from the lanes it uses.
//!
//! [`layout::TimelineLayout`] runs the whole pass. Everything here is pure
//! and never fails: bad records are dropped, not reported.

pub mod filter;
pub mod geometry;
pub mod grid;
pub mod heights;
pub mod lanes;
pub mod layout;

pub use geometry::BarSegment;
pub use grid::{CalendarDay, FocusMonth, MonthGrid};
pub use heights::LayoutMetrics;
pub use lanes::LaneAssignment;
pub use layout::TimelineLayout;
