use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use common::{RequestId, RoomId};
use tokio::sync::RwLock;

use crate::error::HotelError;
use crate::lock::{LockStatus, RoomReservationLock};
use crate::store::LockStore;

/// In-memory lock store.
///
/// Keyed by `request_id`, which doubles as the uniqueness constraint a
/// durable implementation would put on the column.
#[derive(Clone, Default)]
pub struct InMemoryLockStore {
    locks: Arc<RwLock<HashMap<RequestId, RoomReservationLock>>>,
}

impl InMemoryLockStore {
    /// Creates a new empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the total number of stored locks, any status.
    pub async fn len(&self) -> usize {
        self.locks.read().await.len()
    }

    /// Returns true if no locks are stored.
    pub async fn is_empty(&self) -> bool {
        self.locks.read().await.is_empty()
    }
}

#[async_trait]
impl LockStore for InMemoryLockStore {
    async fn insert(&self, lock: RoomReservationLock) -> Result<(), HotelError> {
        let mut locks = self.locks.write().await;
        if locks.contains_key(lock.request_id()) {
            return Err(HotelError::DuplicateRequestId(lock.request_id().clone()));
        }
        locks.insert(lock.request_id().clone(), lock);
        Ok(())
    }

    async fn find_by_request_id(
        &self,
        request_id: &RequestId,
    ) -> Result<Option<RoomReservationLock>, HotelError> {
        Ok(self.locks.read().await.get(request_id).cloned())
    }

    async fn update(&self, lock: &RoomReservationLock) -> Result<(), HotelError> {
        let mut locks = self.locks.write().await;
        match locks.get_mut(lock.request_id()) {
            Some(stored) => {
                *stored = lock.clone();
                Ok(())
            }
            None => Err(HotelError::LockNotFound(lock.request_id().clone())),
        }
    }

    async fn active_for_room(
        &self,
        room_id: RoomId,
    ) -> Result<Vec<RoomReservationLock>, HotelError> {
        Ok(self
            .locks
            .read()
            .await
            .values()
            .filter(|lock| lock.room_id() == room_id && lock.status().is_active())
            .cloned()
            .collect())
    }

    async fn confirmed_count(&self, room_id: RoomId) -> Result<u64, HotelError> {
        Ok(self
            .locks
            .read()
            .await
            .values()
            .filter(|lock| lock.room_id() == room_id && lock.status() == LockStatus::Confirmed)
            .count() as u64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use common::StayPeriod;

    fn period(from: u32, to: u32) -> StayPeriod {
        StayPeriod::new(
            NaiveDate::from_ymd_opt(2026, 6, from).unwrap(),
            NaiveDate::from_ymd_opt(2026, 6, to).unwrap(),
        )
        .unwrap()
    }

    fn lock(request_id: &str, room: i64, from: u32, to: u32) -> RoomReservationLock {
        RoomReservationLock::held(RequestId::new(request_id), RoomId::new(room), period(from, to))
    }

    #[tokio::test]
    async fn insert_enforces_request_id_uniqueness() {
        let store = InMemoryLockStore::new();
        store.insert(lock("req-a", 301, 1, 3)).await.unwrap();

        let err = store.insert(lock("req-a", 302, 5, 7)).await.unwrap_err();
        assert_eq!(err, HotelError::DuplicateRequestId(RequestId::new("req-a")));
        assert_eq!(store.len().await, 1);
    }

    #[tokio::test]
    async fn active_for_room_excludes_released_and_other_rooms() {
        let store = InMemoryLockStore::new();
        store.insert(lock("req-a", 301, 1, 3)).await.unwrap();
        store.insert(lock("req-b", 302, 1, 3)).await.unwrap();

        let mut released = lock("req-c", 301, 5, 7);
        store.insert(released.clone()).await.unwrap();
        released.set_status(LockStatus::Released);
        store.update(&released).await.unwrap();

        let active = store.active_for_room(RoomId::new(301)).await.unwrap();
        assert_eq!(active.len(), 1);
        assert_eq!(active[0].request_id().as_str(), "req-a");
    }

    #[tokio::test]
    async fn confirmed_count_only_counts_confirmed() {
        let store = InMemoryLockStore::new();
        let mut confirmed = lock("req-a", 301, 1, 3);
        store.insert(confirmed.clone()).await.unwrap();
        confirmed.set_status(LockStatus::Confirmed);
        store.update(&confirmed).await.unwrap();
        store.insert(lock("req-b", 301, 5, 7)).await.unwrap();

        assert_eq!(store.confirmed_count(RoomId::new(301)).await.unwrap(), 1);
        assert_eq!(store.confirmed_count(RoomId::new(302)).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn update_of_missing_lock_fails() {
        let store = InMemoryLockStore::new();
        let l = lock("req-a", 301, 1, 3);
        assert_eq!(
            store.update(&l).await.unwrap_err(),
            HotelError::LockNotFound(RequestId::new("req-a"))
        );
    }
}
