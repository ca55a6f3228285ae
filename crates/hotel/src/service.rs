//! The reservation-lock engine.

use common::{RequestId, RoomId, StayPeriod};

use crate::error::HotelError;
use crate::lock::{LockStatus, RoomReservationLock};
use crate::sections::RoomSections;
use crate::store::LockStore;

/// Detects date-range conflicts and drives lock state transitions.
///
/// This is a leaf component: it talks only to its lock store and knows
/// nothing about rooms beyond their identifiers, so the `available` flag
/// can never leak into conflict detection.
///
/// Conflict scan and insert are executed under the per-room section, the
/// one serialization point the no-overlap invariant requires. Holds for
/// different rooms never contend.
#[derive(Clone)]
pub struct RoomLockService<L> {
    locks: L,
    sections: RoomSections,
}

impl<L: LockStore> RoomLockService<L> {
    /// Creates a lock service over the given store.
    pub fn new(locks: L) -> Self {
        Self {
            locks,
            sections: RoomSections::new(),
        }
    }

    /// Returns a reference to the underlying lock store.
    pub fn store(&self) -> &L {
        &self.locks
    }

    /// Places a hold on a room for a date range.
    ///
    /// Idempotent per `request_id`: a replayed hold returns the existing
    /// lock unchanged, whatever its status, without re-validating the
    /// range. A fresh hold fails with [`HotelError::Conflict`] if the
    /// range overlaps any HELD or CONFIRMED lock for the room.
    #[tracing::instrument(skip(self), fields(request_id = %request_id, room_id = %room_id))]
    pub async fn hold_room(
        &self,
        request_id: RequestId,
        room_id: RoomId,
        period: StayPeriod,
    ) -> Result<RoomReservationLock, HotelError> {
        if let Some(existing) = self.locks.find_by_request_id(&request_id).await? {
            tracing::debug!(status = %existing.status(), "hold replayed, returning existing lock");
            return Ok(existing);
        }

        let _section = self.sections.enter(room_id).await;

        let active = self.locks.active_for_room(room_id).await?;
        if active.iter().any(|lock| lock.period().overlaps(&period)) {
            metrics::counter!("room_hold_conflicts_total").increment(1);
            tracing::info!("hold rejected, date range conflict");
            return Err(HotelError::Conflict { room_id, period });
        }

        let lock = RoomReservationLock::held(request_id.clone(), room_id, period);
        match self.locks.insert(lock.clone()).await {
            Ok(()) => {
                metrics::counter!("room_holds_total").increment(1);
                Ok(lock)
            }
            // The same request raced us past the idempotency check; the
            // store's unique key kept a single row. Return that row.
            Err(HotelError::DuplicateRequestId(_)) => self
                .locks
                .find_by_request_id(&request_id)
                .await?
                .ok_or(HotelError::LockNotFound(request_id)),
            Err(err) => Err(err),
        }
    }

    /// Confirms a held lock.
    ///
    /// Idempotent no-op on an already CONFIRMED lock. Fails if the lock is
    /// missing or RELEASED: a released hold cannot come back.
    #[tracing::instrument(skip(self), fields(request_id = %request_id))]
    pub async fn confirm_hold(
        &self,
        request_id: &RequestId,
    ) -> Result<RoomReservationLock, HotelError> {
        let found = self.require_lock(request_id).await?;
        let _section = self.sections.enter(found.room_id()).await;

        // Re-read inside the section so concurrent transitions serialize.
        let mut lock = self.require_lock(request_id).await?;
        match lock.status() {
            LockStatus::Confirmed => Ok(lock),
            LockStatus::Released => Err(HotelError::InvalidTransition {
                request_id: request_id.clone(),
                from: LockStatus::Released,
                to: LockStatus::Confirmed,
            }),
            LockStatus::Held => {
                lock.set_status(LockStatus::Confirmed);
                self.locks.update(&lock).await?;
                metrics::counter!("room_holds_confirmed_total").increment(1);
                Ok(lock)
            }
        }
    }

    /// Releases a held lock (compensation or caller-driven).
    ///
    /// Idempotent no-op on an already RELEASED lock. Fails if the lock is
    /// missing or CONFIRMED: terminal claims stay where they are.
    #[tracing::instrument(skip(self), fields(request_id = %request_id))]
    pub async fn release_hold(
        &self,
        request_id: &RequestId,
    ) -> Result<RoomReservationLock, HotelError> {
        let found = self.require_lock(request_id).await?;
        let _section = self.sections.enter(found.room_id()).await;

        let mut lock = self.require_lock(request_id).await?;
        match lock.status() {
            LockStatus::Released => Ok(lock),
            LockStatus::Confirmed => Err(HotelError::InvalidTransition {
                request_id: request_id.clone(),
                from: LockStatus::Confirmed,
                to: LockStatus::Released,
            }),
            LockStatus::Held => {
                lock.set_status(LockStatus::Released);
                self.locks.update(&lock).await?;
                metrics::counter!("room_holds_released_total").increment(1);
                Ok(lock)
            }
        }
    }

    /// Counts CONFIRMED locks for a room; feeds popularity ranking.
    pub async fn confirmed_count(&self, room_id: RoomId) -> Result<u64, HotelError> {
        self.locks.confirmed_count(room_id).await
    }

    async fn require_lock(
        &self,
        request_id: &RequestId,
    ) -> Result<RoomReservationLock, HotelError> {
        self.locks
            .find_by_request_id(request_id)
            .await?
            .ok_or_else(|| HotelError::LockNotFound(request_id.clone()))
    }
}
