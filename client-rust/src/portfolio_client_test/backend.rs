use std::{
    collections::{HashMap, VecDeque},
    sync::Mutex,
};

use futures::channel::oneshot;
use serde_json::Value;

use crate::{ApiEnvelope, Backend, BackendRequest, ClientError, ClientResult, HttpMethod};

/// Result for a mocked backend call.
pub enum MockResult {
    /// Answer with this envelope.
    Envelope(ApiEnvelope),
    /// Fail with this error.
    Error(ClientError),
    /// Wait until the paired [`DeferredResponse`] is resolved.
    Deferred(oneshot::Receiver<ClientResult<ApiEnvelope>>),
}

impl MockResult {
    /// A successful envelope carrying `data`.
    pub fn ok(data: Value) -> Self {
        Self::Envelope(ApiEnvelope::ok(Some(data)))
    }

    /// A successful envelope with no data.
    pub fn empty() -> Self {
        Self::Envelope(ApiEnvelope::ok(None))
    }

    /// A `success: false` envelope.
    pub fn rejected(message: &str) -> Self {
        Self::Envelope(ApiEnvelope::rejected(message.to_string()))
    }

    /// A failure as if the backend were unreachable.
    pub fn network_error() -> Self {
        Self::Error(ClientError::StatusCode(
            reqwest::StatusCode::BAD_GATEWAY,
            "connection refused (mock)".to_string(),
        ))
    }

    /// A `401` response.
    pub fn unauthorized() -> Self {
        Self::Error(ClientError::Unauthorized { message: None })
    }

    /// A result resolved later through the returned handle.
    pub fn deferred() -> (Self, DeferredResponse) {
        let (sender, receiver) = oneshot::channel();
        (Self::Deferred(receiver), DeferredResponse { sender })
    }
}

impl From<ApiEnvelope> for MockResult {
    fn from(envelope: ApiEnvelope) -> Self {
        Self::Envelope(envelope)
    }
}

impl From<ClientError> for MockResult {
    fn from(error: ClientError) -> Self {
        Self::Error(error)
    }
}

/// Handle that completes a [`MockResult::deferred`] call.
pub struct DeferredResponse {
    sender: oneshot::Sender<ClientResult<ApiEnvelope>>,
}

impl DeferredResponse {
    pub fn resolve(self, result: impl Into<MockResult>) {
        let result = match result.into() {
            MockResult::Envelope(envelope) => Ok(envelope),
            MockResult::Error(error) => Err(error),
            MockResult::Deferred(_) => Err(ClientError::InvalidResponse(
                "cannot resolve a deferred mock with another deferred mock".to_string(),
            )),
        };
        // The caller may have been aborted; nobody is left to notify then.
        let _ = self.sender.send(result);
    }
}

#[derive(Default)]
struct MockBackendState {
    routed_results: HashMap<(HttpMethod, String), VecDeque<MockResult>>,
    queued_results: VecDeque<MockResult>,
    tracked_requests: Vec<BackendRequest>,
}

impl MockBackendState {
    fn next_result(&mut self, request: &BackendRequest) -> Option<MockResult> {
        self.routed_results
            .get_mut(&(request.method, request.path.clone()))
            .and_then(VecDeque::pop_front)
            .or_else(|| self.queued_results.pop_front())
    }

    fn reset(&mut self) {
        self.tracked_requests.clear();
    }

    fn restore(&mut self) {
        self.routed_results.clear();
        self.queued_results.clear();
        self.reset();
    }
}

/// A backend for tests that records requests and answers with predefined
/// results.
///
/// Results enqueued for a specific method and path take precedence;
/// everything else is answered in FIFO order.
#[derive(Default)]
pub struct MockBackend {
    state: Mutex<MockBackendState>,
}

impl MockBackend {
    /// Construct a new mock backend instance.
    pub fn new() -> Self {
        Self::default()
    }

    /// Enqueue a result for the next call not matched by a route.
    pub fn enqueue<R>(&self, result: R) -> &Self
    where
        R: Into<MockResult>,
    {
        let mut state = self.state.lock().expect("mock state poisoned");
        state.queued_results.push_back(result.into());
        drop(state);
        self
    }

    /// Enqueue a result for the next `method` call on `path`.
    pub fn enqueue_for<R>(&self, method: HttpMethod, path: &str, result: R) -> &Self
    where
        R: Into<MockResult>,
    {
        let mut state = self.state.lock().expect("mock state poisoned");
        state
            .routed_results
            .entry((method, path.to_string()))
            .or_default()
            .push_back(result.into());
        drop(state);
        self
    }

    /// Retrieve the requests received so far.
    pub fn tracked_requests(&self) -> Vec<BackendRequest> {
        let state = self.state.lock().expect("mock state poisoned");
        state.tracked_requests.clone()
    }

    /// Number of requests received so far.
    pub fn request_count(&self) -> usize {
        let state = self.state.lock().expect("mock state poisoned");
        state.tracked_requests.len()
    }

    /// Reset tracked requests without touching enqueued results.
    pub fn reset(&self) {
        let mut state = self.state.lock().expect("mock state poisoned");
        state.reset();
    }

    /// Clear both tracked requests and enqueued results.
    pub fn restore(&self) {
        let mut state = self.state.lock().expect("mock state poisoned");
        state.restore();
    }
}

#[async_trait::async_trait]
impl Backend for MockBackend {
    fn name(&self) -> &'static str {
        "mock"
    }

    async fn send(&self, request: BackendRequest) -> ClientResult<ApiEnvelope> {
        let result = {
            let mut state = self.state.lock().expect("mock state poisoned");
            let result = state.next_result(&request);
            state.tracked_requests.push(request.clone());
            result
        };

        match result {
            None => Err(ClientError::InvalidResponse(format!(
                "no mocked result available for {} {}",
                request.method, request.path
            ))),
            Some(MockResult::Envelope(envelope)) => Ok(envelope),
            Some(MockResult::Error(error)) => Err(error),
            Some(MockResult::Deferred(receiver)) => receiver.await.unwrap_or_else(|_| {
                Err(ClientError::InvalidResponse(
                    "deferred mock response was dropped".to_string(),
                ))
            }),
        }
    }
}
