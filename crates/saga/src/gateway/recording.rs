//! Instrumented gateway decorator for tests and fault drills.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use common::{RequestId, RoomId};
use hotel::RoomView;

use super::{CallContext, GatewayError, HoldReceipt, HoldRequest, HotelGateway};

#[derive(Debug, Default)]
struct RecordingState {
    hold_calls: Vec<RequestId>,
    confirm_calls: Vec<RequestId>,
    release_calls: Vec<RequestId>,
    fail_on_hold: bool,
    fail_on_confirm: bool,
    fail_on_release: bool,
    /// Remaining calls to fail with a transport error before recovering.
    transient_failures: u32,
    /// Added latency per call, for driving the per-call timeout.
    call_delay: Option<Duration>,
}

/// Wraps any gateway, counting calls and injecting failures.
///
/// Counters make idempotency and compensation observable ("exactly one
/// release was attempted"); the failure switches simulate a flaky or slow
/// remote side without touching the lock engine.
#[derive(Clone)]
pub struct RecordingGateway<G> {
    inner: G,
    state: Arc<Mutex<RecordingState>>,
}

impl<G> RecordingGateway<G> {
    /// Wraps a gateway with call recording.
    pub fn new(inner: G) -> Self {
        Self {
            inner,
            state: Arc::new(Mutex::new(RecordingState::default())),
        }
    }

    /// Returns the wrapped gateway.
    pub fn inner(&self) -> &G {
        &self.inner
    }

    /// Fails every hold call with a transport error.
    pub fn set_fail_on_hold(&self, fail: bool) {
        self.state.lock().unwrap().fail_on_hold = fail;
    }

    /// Fails every confirm call with a transport error.
    pub fn set_fail_on_confirm(&self, fail: bool) {
        self.state.lock().unwrap().fail_on_confirm = fail;
    }

    /// Fails every release call with a transport error.
    pub fn set_fail_on_release(&self, fail: bool) {
        self.state.lock().unwrap().fail_on_release = fail;
    }

    /// Fails the next `count` calls (any operation), then recovers.
    pub fn set_transient_failures(&self, count: u32) {
        self.state.lock().unwrap().transient_failures = count;
    }

    /// Adds latency to every call.
    pub fn set_call_delay(&self, delay: Duration) {
        self.state.lock().unwrap().call_delay = Some(delay);
    }

    /// Number of hold calls that reached this gateway.
    pub fn hold_calls(&self) -> usize {
        self.state.lock().unwrap().hold_calls.len()
    }

    /// Number of confirm calls that reached this gateway.
    pub fn confirm_calls(&self) -> usize {
        self.state.lock().unwrap().confirm_calls.len()
    }

    /// Number of release calls that reached this gateway.
    pub fn release_calls(&self) -> usize {
        self.state.lock().unwrap().release_calls.len()
    }

    /// Number of release calls for one idempotency key.
    pub fn release_calls_for(&self, request_id: &RequestId) -> usize {
        self.state
            .lock()
            .unwrap()
            .release_calls
            .iter()
            .filter(|recorded| *recorded == request_id)
            .count()
    }

    /// Applies recorded delay, then decides whether to inject a failure.
    async fn intercept(&self, forced_failure: bool) -> Result<(), GatewayError> {
        let (delay, fail) = {
            let mut state = self.state.lock().unwrap();
            let transient = state.transient_failures > 0;
            if transient {
                state.transient_failures -= 1;
            }
            (state.call_delay, forced_failure || transient)
        };
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
        if fail {
            return Err(GatewayError::Transport("injected failure".into()));
        }
        Ok(())
    }
}

#[async_trait]
impl<G: HotelGateway> HotelGateway for RecordingGateway<G> {
    async fn hold(
        &self,
        ctx: &CallContext,
        room_id: RoomId,
        request: HoldRequest,
    ) -> Result<HoldReceipt, GatewayError> {
        let fail = {
            let mut state = self.state.lock().unwrap();
            state.hold_calls.push(request.request_id.clone());
            state.fail_on_hold
        };
        self.intercept(fail).await?;
        self.inner.hold(ctx, room_id, request).await
    }

    async fn confirm(
        &self,
        ctx: &CallContext,
        room_id: RoomId,
        request_id: &RequestId,
    ) -> Result<(), GatewayError> {
        let fail = {
            let mut state = self.state.lock().unwrap();
            state.confirm_calls.push(request_id.clone());
            state.fail_on_confirm
        };
        self.intercept(fail).await?;
        self.inner.confirm(ctx, room_id, request_id).await
    }

    async fn release(
        &self,
        ctx: &CallContext,
        room_id: RoomId,
        request_id: &RequestId,
    ) -> Result<(), GatewayError> {
        let fail = {
            let mut state = self.state.lock().unwrap();
            state.release_calls.push(request_id.clone());
            state.fail_on_release
        };
        self.intercept(fail).await?;
        self.inner.release(ctx, room_id, request_id).await
    }

    async fn list_rooms(&self, ctx: &CallContext) -> Result<Vec<RoomView>, GatewayError> {
        self.intercept(false).await?;
        self.inner.list_rooms(ctx).await
    }
}
