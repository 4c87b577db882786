//! Canned-response transport shared by the integration tests

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use serde_json::Value;

use evmproxy::{HttpRequest, Transport, TransportError};

/// Replays canned responses in order and captures every outbound request.
/// Clones share the same state, so a test can keep a handle for inspection
/// after handing the transport to a client.
#[derive(Clone)]
pub struct StubTransport {
    inner: Arc<Inner>,
}

struct Inner {
    responses: Mutex<Vec<Result<Value, TransportError>>>,
    requests: Mutex<Vec<HttpRequest>>,
}

impl StubTransport {
    pub fn new(responses: Vec<Result<Value, TransportError>>) -> Self {
        Self {
            inner: Arc::new(Inner {
                responses: Mutex::new(responses),
                requests: Mutex::new(Vec::new()),
            }),
        }
    }

    pub fn single(response: Value) -> Self {
        Self::new(vec![Ok(response)])
    }

    /// Outbound requests seen so far, oldest first.
    pub fn requests(&self) -> Vec<HttpRequest> {
        self.inner.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl Transport for StubTransport {
    async fn request(&self, request: HttpRequest) -> Result<Value, TransportError> {
        self.inner.requests.lock().unwrap().push(request);
        let mut responses = self.inner.responses.lock().unwrap();
        assert!(!responses.is_empty(), "stub ran out of canned responses");
        responses.remove(0)
    }
}
