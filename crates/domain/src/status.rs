//! Booking status machine.

use serde::{Deserialize, Serialize};

/// The status of a booking in its lifecycle.
///
/// Status transitions:
/// ```text
/// Pending ──┬──► Confirmed
///           └──► Cancelled
/// ```
///
/// Pending is the only initial status; Confirmed and Cancelled are both
/// terminal, and no transition leads back out of either.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum BookingStatus {
    /// Booking recorded, saga outcome not yet known.
    #[default]
    Pending,

    /// Hold and confirm both succeeded (terminal).
    Confirmed,

    /// Some saga step failed and compensation ran (terminal).
    Cancelled,
}

impl BookingStatus {
    /// Returns true if the booking can still be confirmed.
    pub fn can_confirm(&self) -> bool {
        matches!(self, BookingStatus::Pending)
    }

    /// Returns true if the booking can still be cancelled.
    pub fn can_cancel(&self) -> bool {
        matches!(self, BookingStatus::Pending)
    }

    /// Returns true if this is a terminal status.
    pub fn is_terminal(&self) -> bool {
        matches!(self, BookingStatus::Confirmed | BookingStatus::Cancelled)
    }

    /// Returns the status name as a string.
    pub fn as_str(&self) -> &'static str {
        match self {
            BookingStatus::Pending => "Pending",
            BookingStatus::Confirmed => "Confirmed",
            BookingStatus::Cancelled => "Cancelled",
        }
    }
}

impl std::fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
