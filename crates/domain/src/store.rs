//! Booking persistence contract.

use async_trait::async_trait;
use common::{BookingId, RequestId};
use thiserror::Error;

use crate::booking::Booking;

/// Errors produced by booking store implementations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// A booking with this idempotency key already exists.
    #[error("a booking already exists for request {0}")]
    DuplicateRequestId(RequestId),

    /// No booking with this identifier.
    #[error("booking {0} not found")]
    NotFound(BookingId),

    /// The backing store could not serve the operation.
    #[error("booking store unavailable: {0}")]
    Unavailable(String),
}

/// Durable store for [`Booking`] rows.
///
/// Implementations must enforce uniqueness of `request_id`: a second
/// `insert` with an already-stored key fails with
/// [`StoreError::DuplicateRequestId`] instead of writing a second row.
/// This constraint is the backstop behind the orchestrator's idempotency
/// pre-check when two retries of the same request race.
#[async_trait]
pub trait BookingStore: Send + Sync {
    /// Persists a new booking.
    async fn insert(&self, booking: Booking) -> Result<(), StoreError>;

    /// Looks up a booking by its identifier.
    async fn find(&self, id: BookingId) -> Result<Option<Booking>, StoreError>;

    /// Looks up a booking by its idempotency key.
    async fn find_by_request_id(
        &self,
        request_id: &RequestId,
    ) -> Result<Option<Booking>, StoreError>;

    /// Replaces the stored row for an existing booking.
    async fn update(&self, booking: &Booking) -> Result<(), StoreError>;
}
