use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use common::{BookingId, RequestId};
use tokio::sync::RwLock;

use crate::booking::Booking;
use crate::store::{BookingStore, StoreError};

#[derive(Default)]
struct Inner {
    bookings: HashMap<BookingId, Booking>,
    by_request: HashMap<RequestId, BookingId>,
}

/// In-memory booking store.
///
/// Provides the same interface and uniqueness guarantee a durable
/// implementation would; the `by_request` index plays the role of the
/// unique constraint on `request_id`.
#[derive(Clone, Default)]
pub struct InMemoryBookingStore {
    inner: Arc<RwLock<Inner>>,
}

impl InMemoryBookingStore {
    /// Creates a new empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of stored bookings.
    pub async fn len(&self) -> usize {
        self.inner.read().await.bookings.len()
    }

    /// Returns true if no bookings are stored.
    pub async fn is_empty(&self) -> bool {
        self.inner.read().await.bookings.is_empty()
    }
}

#[async_trait]
impl BookingStore for InMemoryBookingStore {
    async fn insert(&self, booking: Booking) -> Result<(), StoreError> {
        let mut inner = self.inner.write().await;
        if inner.by_request.contains_key(booking.request_id()) {
            return Err(StoreError::DuplicateRequestId(booking.request_id().clone()));
        }
        inner
            .by_request
            .insert(booking.request_id().clone(), booking.id());
        inner.bookings.insert(booking.id(), booking);
        Ok(())
    }

    async fn find(&self, id: BookingId) -> Result<Option<Booking>, StoreError> {
        Ok(self.inner.read().await.bookings.get(&id).cloned())
    }

    async fn find_by_request_id(
        &self,
        request_id: &RequestId,
    ) -> Result<Option<Booking>, StoreError> {
        let inner = self.inner.read().await;
        Ok(inner
            .by_request
            .get(request_id)
            .and_then(|id| inner.bookings.get(id))
            .cloned())
    }

    async fn update(&self, booking: &Booking) -> Result<(), StoreError> {
        let mut inner = self.inner.write().await;
        match inner.bookings.get_mut(&booking.id()) {
            Some(stored) => {
                *stored = booking.clone();
                Ok(())
            }
            None => Err(StoreError::NotFound(booking.id())),
        }
    }
}
