//! Orchestrator error types.

use common::{InvalidStayPeriod, RequestId};
use domain::{BookingError, StoreError};
use thiserror::Error;

use crate::gateway::GatewayError;

/// Errors surfaced by [`crate::BookingOrchestrator`].
///
/// Saga-level failures (conflict, transport, timeout) are NOT errors here:
/// they produce a CANCELLED booking as a normal return value. Only invalid
/// input and local failures reach the caller as `Err`.
#[derive(Debug, Error)]
pub enum SagaError {
    /// Rejected date range; fails fast, nothing is persisted.
    #[error("invalid input: {0}")]
    InvalidStay(#[from] InvalidStayPeriod),

    /// The idempotency key carries no characters.
    #[error("invalid input: request id must not be empty")]
    EmptyRequestId,

    /// Local booking persistence failed.
    #[error(transparent)]
    Store(#[from] StoreError),

    /// Local booking state transition failed.
    #[error(transparent)]
    Booking(#[from] BookingError),

    /// A duplicate insert raced us and its row then vanished; the store
    /// broke its uniqueness contract.
    #[error("no booking recorded for request {0}")]
    RequestNotFound(RequestId),

    /// A read-only gateway call failed (room suggestions path).
    #[error("hotel gateway error: {0}")]
    Gateway(#[from] GatewayError),
}
