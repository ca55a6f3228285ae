//! The booking saga orchestrator.

use chrono::NaiveDate;
use common::{BookingId, CorrelationId, RequestId, RoomId, StayPeriod, UserId};
use domain::{Booking, BookingStore, StoreError};
use hotel::RoomView;

use crate::error::SagaError;
use crate::events::SagaEvent;
use crate::gateway::{CallContext, GatewayError, HoldRequest, HotelGateway};
use crate::instance::BookingSaga;
use crate::retry::{CallPolicy, call_with_retry};
use crate::steps;

/// Input for one booking attempt.
#[derive(Debug, Clone)]
pub struct CreateBooking {
    pub user_id: UserId,
    pub room_id: RoomId,
    pub check_in: NaiveDate,
    pub check_out: NaiveDate,
    pub request_id: RequestId,
}

/// Drives the hold → confirm saga against the hotel gateway.
///
/// Each invocation runs independently; sagas for distinct request ids
/// need no coordination. Within one saga the two forward steps are
/// strictly ordered, each bounded by the per-call timeout and retry
/// budget of the configured [`CallPolicy`].
pub struct BookingOrchestrator<B, G> {
    bookings: B,
    gateway: G,
    policy: CallPolicy,
}

impl<B, G> BookingOrchestrator<B, G>
where
    B: BookingStore,
    G: HotelGateway,
{
    /// Creates an orchestrator over a booking store and gateway.
    pub fn new(bookings: B, gateway: G, policy: CallPolicy) -> Self {
        Self {
            bookings,
            gateway,
            policy,
        }
    }

    /// Returns the booking store.
    pub fn bookings(&self) -> &B {
        &self.bookings
    }

    /// Books a room, returning the booking in a terminal status.
    ///
    /// Idempotent per `request_id`: a duplicate request returns the
    /// stored booking without issuing any remote call. Saga-level
    /// failures (conflict, transport, timeout) come back as a CANCELLED
    /// booking, not as an error; only invalid input and local persistence
    /// failures raise.
    #[tracing::instrument(skip(self, cmd), fields(request_id = %cmd.request_id, room_id = %cmd.room_id))]
    pub async fn create_booking(&self, cmd: CreateBooking) -> Result<Booking, SagaError> {
        if cmd.request_id.is_empty() {
            return Err(SagaError::EmptyRequestId);
        }
        let period = StayPeriod::new(cmd.check_in, cmd.check_out)?;

        if let Some(existing) = self.bookings.find_by_request_id(&cmd.request_id).await? {
            metrics::counter!("booking_requests_replayed_total").increment(1);
            tracing::info!(booking_id = %existing.id(), "duplicate request, returning stored booking");
            return Ok(existing);
        }

        let correlation_id = CorrelationId::new();
        let mut booking = Booking::pending(
            cmd.user_id,
            cmd.room_id,
            period,
            cmd.request_id.clone(),
            correlation_id,
        );
        match self.bookings.insert(booking.clone()).await {
            Ok(()) => {}
            Err(StoreError::DuplicateRequestId(_)) => {
                // A concurrent retry won the uniqueness race; its saga is
                // the one that runs. Hand back its row.
                return self
                    .bookings
                    .find_by_request_id(&cmd.request_id)
                    .await?
                    .ok_or_else(|| SagaError::RequestNotFound(cmd.request_id.clone()));
            }
            Err(err) => return Err(err.into()),
        }
        tracing::info!(booking_id = %booking.id(), %correlation_id, "booking initialized as Pending");

        metrics::counter!("booking_sagas_total").increment(1);
        let saga_start = std::time::Instant::now();

        let ctx = CallContext::new(correlation_id);
        let mut saga = BookingSaga::default();
        saga.apply(SagaEvent::saga_started(
            booking.id(),
            cmd.request_id.clone(),
            correlation_id,
        ));

        match self
            .run_forward(&ctx, &mut saga, &cmd.request_id, cmd.room_id, period)
            .await
        {
            Ok(()) => {
                booking.confirm()?;
                self.bookings.update(&booking).await?;
                saga.apply(SagaEvent::saga_completed());
                metrics::counter!("booking_sagas_confirmed_total").increment(1);
                tracing::info!(booking_id = %booking.id(), %correlation_id, "booking confirmed");
            }
            Err(err) => {
                self.compensate(&ctx, &mut saga, cmd.room_id, &cmd.request_id)
                    .await;
                booking.cancel()?;
                self.bookings.update(&booking).await?;
                saga.apply(SagaEvent::saga_failed(err.to_string()));
                metrics::counter!("booking_sagas_cancelled_total").increment(1);
                tracing::warn!(
                    booking_id = %booking.id(),
                    %correlation_id,
                    reason = %err,
                    "booking cancelled"
                );
            }
        }

        metrics::histogram!("booking_saga_duration_seconds")
            .record(saga_start.elapsed().as_secs_f64());
        Ok(booking)
    }

    /// Loads a booking by its identifier.
    pub async fn get_booking(&self, id: BookingId) -> Result<Option<Booking>, SagaError> {
        Ok(self.bookings.find(id).await?)
    }

    /// Returns rooms ranked for suggestion: least-booked first, ties
    /// broken by ascending room id. Read-only and restartable per call.
    #[tracing::instrument(skip(self))]
    pub async fn room_suggestions(&self) -> Result<Vec<RoomView>, SagaError> {
        let ctx = CallContext::new(CorrelationId::new());
        let mut rooms = self.gateway.list_rooms(&ctx).await?;
        rooms.sort_by(|a, b| a.times_booked.cmp(&b.times_booked).then(a.id.cmp(&b.id)));
        Ok(rooms)
    }

    /// Executes hold then confirm, recording saga events as it goes.
    async fn run_forward(
        &self,
        ctx: &CallContext,
        saga: &mut BookingSaga,
        request_id: &RequestId,
        room_id: RoomId,
        period: StayPeriod,
    ) -> Result<(), GatewayError> {
        saga.apply(SagaEvent::step_started(steps::STEP_HOLD_ROOM));
        tracing::info!(step = steps::STEP_HOLD_ROOM, correlation_id = %ctx.correlation_id(), "saga step started");
        let receipt = match call_with_retry(&self.policy, steps::STEP_HOLD_ROOM, || {
            self.gateway.hold(
                ctx,
                room_id,
                HoldRequest {
                    request_id: request_id.clone(),
                    period,
                },
            )
        })
        .await
        {
            Ok(receipt) => receipt,
            Err(err) => {
                saga.apply(SagaEvent::step_failed(steps::STEP_HOLD_ROOM, err.to_string()));
                return Err(err);
            }
        };
        saga.apply(SagaEvent::step_completed(
            steps::STEP_HOLD_ROOM,
            Some(receipt.lock_id),
        ));

        saga.apply(SagaEvent::step_started(steps::STEP_CONFIRM_HOLD));
        tracing::info!(step = steps::STEP_CONFIRM_HOLD, correlation_id = %ctx.correlation_id(), "saga step started");
        match call_with_retry(&self.policy, steps::STEP_CONFIRM_HOLD, || {
            self.gateway.confirm(ctx, room_id, request_id)
        })
        .await
        {
            Ok(()) => {
                saga.apply(SagaEvent::step_completed(steps::STEP_CONFIRM_HOLD, None));
                Ok(())
            }
            Err(err) => {
                saga.apply(SagaEvent::step_failed(
                    steps::STEP_CONFIRM_HOLD,
                    err.to_string(),
                ));
                Err(err)
            }
        }
    }

    /// Undoes completed forward steps in reverse order, best effort.
    ///
    /// A compensation failure is logged and recorded but never escalated:
    /// the saga must terminate. A hold left behind by a failed release is
    /// the known reconciliation gap, picked up by an out-of-band sweep.
    async fn compensate(
        &self,
        ctx: &CallContext,
        saga: &mut BookingSaga,
        room_id: RoomId,
        request_id: &RequestId,
    ) {
        let from_step = saga
            .completed_steps()
            .last()
            .cloned()
            .unwrap_or_else(|| steps::STEP_HOLD_ROOM.to_string());
        saga.apply(SagaEvent::compensation_started(from_step));

        let completed: Vec<String> = saga.completed_steps().to_vec();
        for step in completed.iter().rev() {
            match step.as_str() {
                steps::STEP_HOLD_ROOM => {
                    match call_with_retry(&self.policy, "release_hold", || {
                        self.gateway.release(ctx, room_id, request_id)
                    })
                    .await
                    {
                        Ok(()) => {
                            saga.apply(SagaEvent::compensation_step_completed(step));
                            tracing::info!(
                                correlation_id = %ctx.correlation_id(),
                                "hold released"
                            );
                        }
                        Err(err) => {
                            saga.apply(SagaEvent::compensation_step_failed(
                                step,
                                err.to_string(),
                            ));
                            metrics::counter!("booking_compensation_failures_total")
                                .increment(1);
                            tracing::warn!(
                                correlation_id = %ctx.correlation_id(),
                                error = %err,
                                "release failed; stale hold left for reconciliation sweep"
                            );
                        }
                    }
                }
                // confirm_hold has no compensating action: once the saga
                // reaches a completed confirm it never compensates.
                _ => {}
            }
        }
    }
}
