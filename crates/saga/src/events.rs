//! Booking saga events.

use chrono::{DateTime, Utc};
use common::{BookingId, CorrelationId, LockId, RequestId};
use serde::{Deserialize, Serialize};

/// Events that can occur during one saga execution.
///
/// Applied in order to a [`crate::BookingSaga`], they reconstruct exactly
/// what the orchestrator did: which steps ran, what the remote side handed
/// back, and how far compensation got.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum SagaEvent {
    /// Saga execution started for a fresh (non-duplicate) request.
    SagaStarted(SagaStartedData),

    /// A forward step started execution.
    StepStarted(StepData),

    /// A forward step completed successfully.
    StepCompleted(StepCompletedData),

    /// A forward step failed after its retry budget.
    StepFailed(StepFailedData),

    /// Compensation started after a step failure.
    CompensationStarted(CompensationData),

    /// A compensating action completed successfully.
    CompensationStepCompleted(StepData),

    /// A compensating action failed (logged, saga still terminates).
    CompensationStepFailed(StepFailedData),

    /// Saga completed successfully; booking is CONFIRMED.
    SagaCompleted(SagaCompletedData),

    /// Saga failed after compensation; booking is CANCELLED.
    SagaFailed(SagaFailedData),
}

/// Data for SagaStarted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SagaStartedData {
    /// The booking being driven to a terminal status.
    pub booking_id: BookingId,
    /// The idempotency key shared with the remote lock.
    pub request_id: RequestId,
    /// Correlation value attached to every call in this execution.
    pub correlation_id: CorrelationId,
    /// When the saga started.
    pub started_at: DateTime<Utc>,
}

/// Data naming a step (started / compensation completed).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StepData {
    /// The step name.
    pub step_name: String,
}

/// Data for StepCompleted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StepCompletedData {
    /// The step name.
    pub step_name: String,
    /// Lock ID handed back by the hold step.
    pub lock_id: Option<LockId>,
}

/// Data for step/compensation failures.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StepFailedData {
    /// The step that failed.
    pub step_name: String,
    /// Error message describing the failure.
    pub error: String,
}

/// Data for CompensationStarted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompensationData {
    /// The step whose failure triggered compensation.
    pub from_step: String,
}

/// Data for SagaCompleted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SagaCompletedData {
    /// When the saga completed.
    pub completed_at: DateTime<Utc>,
}

/// Data for SagaFailed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SagaFailedData {
    /// Reason for failure.
    pub reason: String,
    /// When the saga failed.
    pub failed_at: DateTime<Utc>,
}

impl SagaEvent {
    /// Returns the event type name.
    pub fn event_type(&self) -> &'static str {
        match self {
            SagaEvent::SagaStarted(_) => "SagaStarted",
            SagaEvent::StepStarted(_) => "StepStarted",
            SagaEvent::StepCompleted(_) => "StepCompleted",
            SagaEvent::StepFailed(_) => "StepFailed",
            SagaEvent::CompensationStarted(_) => "CompensationStarted",
            SagaEvent::CompensationStepCompleted(_) => "CompensationStepCompleted",
            SagaEvent::CompensationStepFailed(_) => "CompensationStepFailed",
            SagaEvent::SagaCompleted(_) => "SagaCompleted",
            SagaEvent::SagaFailed(_) => "SagaFailed",
        }
    }

    /// Creates a SagaStarted event.
    pub fn saga_started(
        booking_id: BookingId,
        request_id: RequestId,
        correlation_id: CorrelationId,
    ) -> Self {
        SagaEvent::SagaStarted(SagaStartedData {
            booking_id,
            request_id,
            correlation_id,
            started_at: Utc::now(),
        })
    }

    /// Creates a StepStarted event.
    pub fn step_started(step_name: impl Into<String>) -> Self {
        SagaEvent::StepStarted(StepData {
            step_name: step_name.into(),
        })
    }

    /// Creates a StepCompleted event.
    pub fn step_completed(step_name: impl Into<String>, lock_id: Option<LockId>) -> Self {
        SagaEvent::StepCompleted(StepCompletedData {
            step_name: step_name.into(),
            lock_id,
        })
    }

    /// Creates a StepFailed event.
    pub fn step_failed(step_name: impl Into<String>, error: impl Into<String>) -> Self {
        SagaEvent::StepFailed(StepFailedData {
            step_name: step_name.into(),
            error: error.into(),
        })
    }

    /// Creates a CompensationStarted event.
    pub fn compensation_started(from_step: impl Into<String>) -> Self {
        SagaEvent::CompensationStarted(CompensationData {
            from_step: from_step.into(),
        })
    }

    /// Creates a CompensationStepCompleted event.
    pub fn compensation_step_completed(step_name: impl Into<String>) -> Self {
        SagaEvent::CompensationStepCompleted(StepData {
            step_name: step_name.into(),
        })
    }

    /// Creates a CompensationStepFailed event.
    pub fn compensation_step_failed(
        step_name: impl Into<String>,
        error: impl Into<String>,
    ) -> Self {
        SagaEvent::CompensationStepFailed(StepFailedData {
            step_name: step_name.into(),
            error: error.into(),
        })
    }

    /// Creates a SagaCompleted event.
    pub fn saga_completed() -> Self {
        SagaEvent::SagaCompleted(SagaCompletedData {
            completed_at: Utc::now(),
        })
    }

    /// Creates a SagaFailed event.
    pub fn saga_failed(reason: impl Into<String>) -> Self {
        SagaEvent::SagaFailed(SagaFailedData {
            reason: reason.into(),
            failed_at: Utc::now(),
        })
    }
}
