//! Saga instance state.

use common::{BookingId, CorrelationId, LockId, RequestId};
use serde::{Deserialize, Serialize};

use crate::events::SagaEvent;
use crate::state::SagaState;

/// One booking saga execution, folded from its events.
///
/// Tracks completed steps and the context accumulated along the way (the
/// remote lock id, the failure reason). The orchestrator applies each
/// event as it happens; tests fold recorded event streams to audit what a
/// run did.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BookingSaga {
    booking_id: Option<BookingId>,
    request_id: Option<RequestId>,
    correlation_id: Option<CorrelationId>,
    state: SagaState,
    completed_steps: Vec<String>,
    /// Lock ID handed back by the hold step.
    lock_id: Option<LockId>,
    /// Reason for failure, if any.
    failure_reason: Option<String>,
}

impl BookingSaga {
    /// Applies an event, updating the folded state.
    ///
    /// Pure and infallible: events are facts about what already happened.
    pub fn apply(&mut self, event: SagaEvent) {
        match event {
            SagaEvent::SagaStarted(data) => {
                self.booking_id = Some(data.booking_id);
                self.request_id = Some(data.request_id);
                self.correlation_id = Some(data.correlation_id);
                self.state = SagaState::Running;
            }
            SagaEvent::StepStarted(_) => {}
            SagaEvent::StepCompleted(data) => {
                self.completed_steps.push(data.step_name);
                if let Some(lock_id) = data.lock_id {
                    self.lock_id = Some(lock_id);
                }
            }
            SagaEvent::StepFailed(data) => {
                self.failure_reason = Some(data.error);
            }
            SagaEvent::CompensationStarted(_) => {
                self.state = SagaState::Compensating;
            }
            SagaEvent::CompensationStepCompleted(_) => {}
            SagaEvent::CompensationStepFailed(_) => {
                // Logged by the orchestrator; the chain keeps going.
            }
            SagaEvent::SagaCompleted(_) => {
                self.state = SagaState::Completed;
            }
            SagaEvent::SagaFailed(data) => {
                self.state = SagaState::Failed;
                self.failure_reason = Some(data.reason);
            }
        }
    }

    /// Applies multiple events in sequence.
    pub fn apply_events(&mut self, events: impl IntoIterator<Item = SagaEvent>) {
        for event in events {
            self.apply(event);
        }
    }

    /// Returns the saga state.
    pub fn state(&self) -> SagaState {
        self.state
    }

    /// Returns the booking this saga is driving.
    pub fn booking_id(&self) -> Option<BookingId> {
        self.booking_id
    }

    /// Returns the idempotency key.
    pub fn request_id(&self) -> Option<&RequestId> {
        self.request_id.as_ref()
    }

    /// Returns the correlation identifier.
    pub fn correlation_id(&self) -> Option<CorrelationId> {
        self.correlation_id
    }

    /// Returns the list of completed forward step names.
    pub fn completed_steps(&self) -> &[String] {
        &self.completed_steps
    }

    /// Returns the remote lock ID, if the hold step completed.
    pub fn lock_id(&self) -> Option<LockId> {
        self.lock_id
    }

    /// Returns the failure reason, if any.
    pub fn failure_reason(&self) -> Option<&str> {
        self.failure_reason.as_deref()
    }
}
