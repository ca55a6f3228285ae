//! In-process gateway backed directly by the lock engine.

use async_trait::async_trait;
use common::{RequestId, RoomId};
use hotel::{LockStore, RoomDirectory, RoomLockService, RoomView};

use super::{CallContext, GatewayError, HoldReceipt, HoldRequest, HotelGateway};

/// Gateway implementation that calls the lock engine in process.
///
/// Stands where a networked client would: same trait, same error mapping,
/// same idempotency guarantees, minus the wire.
#[derive(Clone)]
pub struct LocalHotelGateway<L> {
    locks: RoomLockService<L>,
    rooms: RoomDirectory,
}

impl<L: LockStore> LocalHotelGateway<L> {
    /// Creates a gateway over a lock engine and room directory.
    pub fn new(locks: RoomLockService<L>, rooms: RoomDirectory) -> Self {
        Self { locks, rooms }
    }

    /// Returns the underlying lock engine.
    pub fn locks(&self) -> &RoomLockService<L> {
        &self.locks
    }

    /// Returns the room directory.
    pub fn rooms(&self) -> &RoomDirectory {
        &self.rooms
    }
}

#[async_trait]
impl<L: LockStore> HotelGateway for LocalHotelGateway<L> {
    async fn hold(
        &self,
        ctx: &CallContext,
        room_id: RoomId,
        request: HoldRequest,
    ) -> Result<HoldReceipt, GatewayError> {
        tracing::debug!(correlation_id = %ctx.correlation_id(), %room_id, "gateway hold");
        let lock = self
            .locks
            .hold_room(request.request_id, room_id, request.period)
            .await?;
        Ok(HoldReceipt { lock_id: lock.id() })
    }

    async fn confirm(
        &self,
        ctx: &CallContext,
        room_id: RoomId,
        request_id: &RequestId,
    ) -> Result<(), GatewayError> {
        tracing::debug!(correlation_id = %ctx.correlation_id(), %room_id, "gateway confirm");
        self.locks.confirm_hold(request_id).await?;
        Ok(())
    }

    async fn release(
        &self,
        ctx: &CallContext,
        room_id: RoomId,
        request_id: &RequestId,
    ) -> Result<(), GatewayError> {
        tracing::debug!(correlation_id = %ctx.correlation_id(), %room_id, "gateway release");
        self.locks.release_hold(request_id).await?;
        Ok(())
    }

    async fn list_rooms(&self, ctx: &CallContext) -> Result<Vec<RoomView>, GatewayError> {
        tracing::debug!(correlation_id = %ctx.correlation_id(), "gateway list rooms");
        let mut views = Vec::new();
        for room in self.rooms.list().await {
            let times_booked = self.locks.confirmed_count(room.id).await?;
            views.push(RoomView {
                id: room.id,
                number: room.number,
                times_booked,
            });
        }
        Ok(views)
    }
}
