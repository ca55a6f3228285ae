//! The Booking aggregate.

use chrono::{DateTime, Utc};
use common::{BookingId, CorrelationId, RequestId, RoomId, StayPeriod, UserId};
use serde::{Deserialize, Serialize};

use crate::error::BookingError;
use crate::status::BookingStatus;

/// One reservation attempt by a user.
///
/// A booking is created `Pending`, moved exactly once to a terminal status
/// by the orchestration call that created it, and never deleted. It is
/// correlated 1:1 with a room reservation lock through the shared
/// `request_id`; there is no cross-store foreign key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Booking {
    id: BookingId,
    request_id: RequestId,
    user_id: UserId,
    room_id: RoomId,
    period: StayPeriod,
    status: BookingStatus,
    correlation_id: CorrelationId,
    created_at: DateTime<Utc>,
}

impl Booking {
    /// Creates a new pending booking for a fresh (non-duplicate) request.
    pub fn pending(
        user_id: UserId,
        room_id: RoomId,
        period: StayPeriod,
        request_id: RequestId,
        correlation_id: CorrelationId,
    ) -> Self {
        Self {
            id: BookingId::new(),
            request_id,
            user_id,
            room_id,
            period,
            status: BookingStatus::Pending,
            correlation_id,
            created_at: Utc::now(),
        }
    }

    /// Marks the booking confirmed. Only valid from `Pending`.
    pub fn confirm(&mut self) -> Result<(), BookingError> {
        if !self.status.can_confirm() {
            return Err(BookingError::InvalidStatusTransition {
                from: self.status,
                to: BookingStatus::Confirmed,
            });
        }
        self.status = BookingStatus::Confirmed;
        Ok(())
    }

    /// Marks the booking cancelled. Only valid from `Pending`.
    pub fn cancel(&mut self) -> Result<(), BookingError> {
        if !self.status.can_cancel() {
            return Err(BookingError::InvalidStatusTransition {
                from: self.status,
                to: BookingStatus::Cancelled,
            });
        }
        self.status = BookingStatus::Cancelled;
        Ok(())
    }

    pub fn id(&self) -> BookingId {
        self.id
    }

    pub fn request_id(&self) -> &RequestId {
        &self.request_id
    }

    pub fn user_id(&self) -> UserId {
        self.user_id
    }

    pub fn room_id(&self) -> RoomId {
        self.room_id
    }

    pub fn period(&self) -> StayPeriod {
        self.period
    }

    pub fn status(&self) -> BookingStatus {
        self.status
    }

    pub fn correlation_id(&self) -> CorrelationId {
        self.correlation_id
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}
