//! Booking saga for coordinating the two reservation ledgers.
//!
//! Booking a room touches two independently-owned stores that cannot share
//! a transaction: the booking ledger and the room-availability ledger. The
//! [`BookingOrchestrator`] sequences hold → confirm against the remote
//! side, compensates with a best-effort release when a later step fails,
//! and is idempotent under client retries via the caller-supplied request
//! id.
//!
//! The saga itself is modelled as an explicit state value: a stream of
//! [`SagaEvent`]s applied to a [`BookingSaga`], so the compensation logic
//! stays auditable independent of transport details. Remote calls run
//! under a per-call timeout and bounded exponential backoff
//! ([`CallPolicy`]); retry exhaustion is a definitive failure, never an
//! escalated error.

pub mod error;
pub mod events;
pub mod gateway;
pub mod instance;
pub mod orchestrator;
pub mod retry;
pub mod state;
pub mod steps;

pub use error::SagaError;
pub use events::SagaEvent;
pub use gateway::{
    CallContext, GatewayError, HoldReceipt, HoldRequest, HotelGateway, LocalHotelGateway,
    RecordingGateway,
};
pub use instance::BookingSaga;
pub use orchestrator::{BookingOrchestrator, CreateBooking};
pub use retry::{CallPolicy, RetryPolicy};
pub use state::SagaState;
