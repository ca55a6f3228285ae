//! Remote contract for the hotel reservation service.
//!
//! The orchestrator only ever talks to the room side through
//! [`HotelGateway`]. All three mutating operations are idempotent at the
//! receiving side per the lock-engine contract, which is what makes
//! at-least-once delivery with retries safe.

pub mod local;
pub mod recording;

use async_trait::async_trait;
use common::{CorrelationId, LockId, RequestId, RoomId, StayPeriod};
use hotel::{HotelError, RoomView};
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use local::LocalHotelGateway;
pub use recording::RecordingGateway;

/// Correlation context threaded explicitly through every gateway call.
///
/// Carried as a value rather than ambient logging context, so transports
/// can forward it (e.g. as a header) and every log line can name it.
#[derive(Debug, Clone, Copy)]
pub struct CallContext {
    correlation_id: CorrelationId,
}

impl CallContext {
    /// Creates a context for one saga execution.
    pub fn new(correlation_id: CorrelationId) -> Self {
        Self { correlation_id }
    }

    /// Returns the correlation identifier.
    pub fn correlation_id(&self) -> CorrelationId {
        self.correlation_id
    }
}

/// Payload for the hold operation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HoldRequest {
    /// Idempotency key shared with the booking row.
    pub request_id: RequestId,
    /// Half-open date range to claim.
    pub period: StayPeriod,
}

/// Acknowledgement of a successful hold.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct HoldReceipt {
    /// The lock the remote side created (or replayed).
    pub lock_id: LockId,
}

/// Failures crossing the gateway boundary.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GatewayError {
    /// Resource busy: the range overlaps an active reservation.
    #[error("conflict: {0}")]
    Conflict(String),

    /// The call did not reach the remote side, or failed in transit.
    #[error("transport failure: {0}")]
    Transport(String),

    /// The per-call timeout expired before a response arrived.
    #[error("call timed out")]
    Timeout,

    /// The remote side has no lock for this idempotency key.
    #[error("no reservation lock for request {0}")]
    LockNotFound(RequestId),

    /// The remote lock lifecycle forbids the requested transition.
    #[error("invalid lock transition: {0}")]
    InvalidTransition(String),
}

impl GatewayError {
    /// Transient failures worth another attempt; everything else is
    /// definitive and fails the call immediately.
    pub fn is_retryable(&self) -> bool {
        matches!(self, GatewayError::Transport(_) | GatewayError::Timeout)
    }
}

impl From<HotelError> for GatewayError {
    fn from(err: HotelError) -> Self {
        match err {
            HotelError::Conflict { .. } => GatewayError::Conflict(err.to_string()),
            HotelError::LockNotFound(request_id) => GatewayError::LockNotFound(request_id),
            HotelError::InvalidTransition { .. } => {
                GatewayError::InvalidTransition(err.to_string())
            }
            HotelError::DuplicateRequestId(_) => GatewayError::Conflict(err.to_string()),
            HotelError::Unavailable(message) => GatewayError::Transport(message),
        }
    }
}

/// Hold/confirm/release operations exposed by the room service, plus the
/// room listing that feeds popularity ranking.
#[async_trait]
pub trait HotelGateway: Send + Sync {
    /// Places (or replays) a hold on a room for a date range.
    async fn hold(
        &self,
        ctx: &CallContext,
        room_id: RoomId,
        request: HoldRequest,
    ) -> Result<HoldReceipt, GatewayError>;

    /// Confirms a previously held range.
    async fn confirm(
        &self,
        ctx: &CallContext,
        room_id: RoomId,
        request_id: &RequestId,
    ) -> Result<(), GatewayError>;

    /// Releases a previously held range (compensation).
    async fn release(
        &self,
        ctx: &CallContext,
        room_id: RoomId,
        request_id: &RequestId,
    ) -> Result<(), GatewayError>;

    /// Lists rooms with their confirmed-stay counts.
    async fn list_rooms(&self, ctx: &CallContext) -> Result<Vec<RoomView>, GatewayError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transient_errors_are_retryable() {
        assert!(GatewayError::Transport("reset".into()).is_retryable());
        assert!(GatewayError::Timeout.is_retryable());
    }

    #[test]
    fn definitive_errors_are_not_retryable() {
        assert!(!GatewayError::Conflict("busy".into()).is_retryable());
        assert!(!GatewayError::LockNotFound(RequestId::new("req-a")).is_retryable());
        assert!(!GatewayError::InvalidTransition("released".into()).is_retryable());
    }

    #[test]
    fn hotel_conflict_maps_to_conflict() {
        let period = StayPeriod::new(
            chrono::NaiveDate::from_ymd_opt(2026, 3, 1).unwrap(),
            chrono::NaiveDate::from_ymd_opt(2026, 3, 3).unwrap(),
        )
        .unwrap();
        let err: GatewayError = HotelError::Conflict {
            room_id: RoomId::new(301),
            period,
        }
        .into();
        assert!(matches!(err, GatewayError::Conflict(_)));
        assert!(!err.is_retryable());
    }

    #[test]
    fn hotel_unavailable_maps_to_transport() {
        let err: GatewayError = HotelError::Unavailable("store down".into()).into();
        assert!(err.is_retryable());
    }
}
