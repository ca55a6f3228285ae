//! Booking domain for the reservation system.
//!
//! This crate owns the [`Booking`] aggregate and its monotonic status
//! machine, plus the [`BookingStore`] persistence contract that guarantees
//! uniqueness of the caller-supplied idempotency key.

pub mod booking;
pub mod error;
pub mod memory;
pub mod status;
pub mod store;

pub use booking::Booking;
pub use error::BookingError;
pub use memory::InMemoryBookingStore;
pub use status::BookingStatus;
pub use store::{BookingStore, StoreError};
