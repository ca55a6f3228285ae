//! Hotel-side errors.

use common::{RequestId, RoomId, StayPeriod};
use thiserror::Error;

use crate::lock::LockStatus;

/// Errors raised by the reservation-lock engine and its store.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HotelError {
    /// The requested range overlaps an active (HELD or CONFIRMED) lock.
    #[error("room {room_id} is busy: {period} overlaps an active reservation")]
    Conflict { room_id: RoomId, period: StayPeriod },

    /// No lock exists for this idempotency key.
    #[error("no reservation lock for request {0}")]
    LockNotFound(RequestId),

    /// The lock lifecycle forbids this transition.
    #[error("invalid lock transition for request {request_id}: {from} -> {to}")]
    InvalidTransition {
        request_id: RequestId,
        from: LockStatus,
        to: LockStatus,
    },

    /// A lock with this idempotency key already exists.
    #[error("a reservation lock already exists for request {0}")]
    DuplicateRequestId(RequestId),

    /// The backing store could not serve the operation.
    #[error("lock store unavailable: {0}")]
    Unavailable(String),
}

impl HotelError {
    /// Returns true for the resource-busy condition callers map to 409.
    pub fn is_conflict(&self) -> bool {
        matches!(self, HotelError::Conflict { .. })
    }
}
