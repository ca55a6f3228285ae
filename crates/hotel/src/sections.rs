//! Per-room exclusive sections.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use common::RoomId;
use tokio::sync::OwnedMutexGuard;

/// Scoped mutual exclusion keyed by room identifier.
///
/// `enter` returns a guard that holds the room's section until dropped.
/// Two holds targeting the same room are serialized through it, which is
/// what makes the conflict-scan-then-insert sequence atomic per room;
/// holds for distinct rooms proceed fully concurrently.
///
/// A durable deployment can substitute a serializable-isolation
/// transaction for this in-process section; the lock store's unique
/// `request_id` constraint stays in place as the backstop either way.
#[derive(Clone, Default)]
pub struct RoomSections {
    sections: Arc<Mutex<HashMap<RoomId, Arc<tokio::sync::Mutex<()>>>>>,
}

impl RoomSections {
    /// Creates an empty section map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Enters the exclusive section for a room, waiting if another task
    /// currently holds it.
    pub async fn enter(&self, room_id: RoomId) -> OwnedMutexGuard<()> {
        let section = {
            let mut sections = self.sections.lock().expect("room section map poisoned");
            sections
                .entry(room_id)
                .or_insert_with(|| Arc::new(tokio::sync::Mutex::new(())))
                .clone()
        };
        section.lock_owned().await
    }
}
