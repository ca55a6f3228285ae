//! Lock persistence contract.

use async_trait::async_trait;
use common::{RequestId, RoomId};

use crate::error::HotelError;
use crate::lock::RoomReservationLock;

/// Durable store for [`RoomReservationLock`] rows.
///
/// Implementations must enforce uniqueness of `request_id`
/// ([`HotelError::DuplicateRequestId`] on violation). The store does not
/// serialize the conflict-scan-then-insert sequence itself; callers wrap
/// it in the per-room exclusive section so two overlapping holds for the
/// same room can never both pass the scan.
#[async_trait]
pub trait LockStore: Send + Sync {
    /// Persists a new lock.
    async fn insert(&self, lock: RoomReservationLock) -> Result<(), HotelError>;

    /// Looks up a lock by its idempotency key.
    async fn find_by_request_id(
        &self,
        request_id: &RequestId,
    ) -> Result<Option<RoomReservationLock>, HotelError>;

    /// Replaces the stored row for an existing lock.
    async fn update(&self, lock: &RoomReservationLock) -> Result<(), HotelError>;

    /// Returns the locks for a room whose status still counts against
    /// occupancy (HELD or CONFIRMED).
    async fn active_for_room(
        &self,
        room_id: RoomId,
    ) -> Result<Vec<RoomReservationLock>, HotelError>;

    /// Counts CONFIRMED locks for a room.
    async fn confirmed_count(&self, room_id: RoomId) -> Result<u64, HotelError>;
}
