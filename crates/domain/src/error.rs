//! Booking domain errors.

use thiserror::Error;

use crate::status::BookingStatus;

/// Errors raised by the booking aggregate itself.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BookingError {
    /// Attempted a status transition the lifecycle forbids.
    #[error("invalid booking status transition: {from} -> {to}")]
    InvalidStatusTransition {
        from: BookingStatus,
        to: BookingStatus,
    },
}
