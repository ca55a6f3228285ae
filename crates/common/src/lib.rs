//! Shared types for the booking system.
//!
//! Identifier newtypes keep the two services from mixing up the various
//! UUID- and integer-based ids, and [`StayPeriod`] carries the validated
//! half-open `[check_in, check_out)` date range both sides reason about.

pub mod ids;
pub mod period;

pub use ids::{BookingId, CorrelationId, LockId, RequestId, RoomId, UserId};
pub use period::{InvalidStayPeriod, StayPeriod};
