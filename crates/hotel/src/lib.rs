//! Room-service side of the booking system.
//!
//! The [`RoomLockService`] is the reservation-lock engine: it detects
//! date-range conflicts per room and drives the HELD → CONFIRMED/RELEASED
//! lock lifecycle. The conflict scan and insert run under a per-room
//! exclusive section ([`RoomSections`]), with the lock store's unique
//! `request_id` constraint as the backstop for replayed requests.
//!
//! The [`RoomDirectory`] carries the external room records (number,
//! capacity, `available` flag). The lock engine never consults it: a room
//! flagged unavailable still accepts non-conflicting holds, and occupancy
//! is decided purely by the set of active locks.

pub mod error;
pub mod lock;
pub mod memory;
pub mod room;
pub mod sections;
pub mod service;
pub mod store;

pub use error::HotelError;
pub use lock::{LockStatus, RoomReservationLock};
pub use memory::InMemoryLockStore;
pub use room::{Room, RoomDirectory, RoomView};
pub use sections::RoomSections;
pub use service::RoomLockService;
pub use store::LockStore;
