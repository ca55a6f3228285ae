//! Room reservation locks.

use common::{LockId, RequestId, RoomId, StayPeriod};
use serde::{Deserialize, Serialize};

/// The status of a reservation lock.
///
/// Status transitions:
/// ```text
/// Held ──┬──► Confirmed
///        └──► Released
/// ```
///
/// Confirmed and Released are both terminal. Locks in Held or Confirmed
/// count against room occupancy; Released locks do not.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LockStatus {
    /// Claim recorded, awaiting confirm or release.
    Held,

    /// Claim made permanent (terminal).
    Confirmed,

    /// Claim undone by compensation or the caller (terminal).
    Released,
}

impl LockStatus {
    /// Returns true if the lock still counts against room occupancy.
    pub fn is_active(&self) -> bool {
        matches!(self, LockStatus::Held | LockStatus::Confirmed)
    }

    /// Returns true if this is a terminal status.
    pub fn is_terminal(&self) -> bool {
        matches!(self, LockStatus::Confirmed | LockStatus::Released)
    }

    /// Returns the status name as a string.
    pub fn as_str(&self) -> &'static str {
        match self {
            LockStatus::Held => "Held",
            LockStatus::Confirmed => "Confirmed",
            LockStatus::Released => "Released",
        }
    }
}

impl std::fmt::Display for LockStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One claim on a room for a date range.
///
/// Correlated 1:1 with a booking through the shared `request_id`. The core
/// invariant of the whole system: for any room, the periods of its active
/// locks are pairwise non-overlapping under half-open semantics.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoomReservationLock {
    id: LockId,
    request_id: RequestId,
    room_id: RoomId,
    period: StayPeriod,
    status: LockStatus,
}

impl RoomReservationLock {
    /// Creates a freshly held lock.
    pub fn held(request_id: RequestId, room_id: RoomId, period: StayPeriod) -> Self {
        Self {
            id: LockId::new(),
            request_id,
            room_id,
            period,
            status: LockStatus::Held,
        }
    }

    pub fn id(&self) -> LockId {
        self.id
    }

    pub fn request_id(&self) -> &RequestId {
        &self.request_id
    }

    pub fn room_id(&self) -> RoomId {
        self.room_id
    }

    pub fn period(&self) -> StayPeriod {
        self.period
    }

    pub fn status(&self) -> LockStatus {
        self.status
    }

    pub(crate) fn set_status(&mut self, status: LockStatus) {
        self.status = status;
    }
}
