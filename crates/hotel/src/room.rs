//! Room records and the room directory.

use std::collections::HashMap;
use std::sync::Arc;

use common::RoomId;
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;

/// External room record, consumed but not owned by the lock engine.
///
/// `available` is a display/admin flag only. Date-range occupancy is
/// decided by the lock engine alone, so an unavailable room still accepts
/// non-conflicting holds. `times_booked` is the counter carried on the
/// registered record; live popularity rankings derive from confirmed lock
/// counts instead, which stay correct under replayed confirms.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Room {
    pub id: RoomId,
    pub number: String,
    pub capacity: u32,
    pub available: bool,
    pub times_booked: u64,
}

impl Room {
    /// Creates an available room with no booking history.
    pub fn new(id: RoomId, number: impl Into<String>, capacity: u32) -> Self {
        Self {
            id,
            number: number.into(),
            capacity,
            available: true,
            times_booked: 0,
        }
    }
}

/// Read-model row for room popularity ranking.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoomView {
    pub id: RoomId,
    pub number: String,
    pub times_booked: u64,
}

/// In-memory registry of room records.
#[derive(Clone, Default)]
pub struct RoomDirectory {
    rooms: Arc<RwLock<HashMap<RoomId, Room>>>,
}

impl RoomDirectory {
    /// Creates an empty directory.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a room, replacing any previous record with the same id.
    pub async fn register(&self, room: Room) {
        self.rooms.write().await.insert(room.id, room);
    }

    /// Looks up a room by id.
    pub async fn get(&self, id: RoomId) -> Option<Room> {
        self.rooms.read().await.get(&id).cloned()
    }

    /// Returns all registered rooms, ordered by id.
    pub async fn list(&self) -> Vec<Room> {
        let mut rooms: Vec<Room> = self.rooms.read().await.values().cloned().collect();
        rooms.sort_by_key(|room| room.id);
        rooms
    }
}
