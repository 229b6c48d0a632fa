// Test mocks for the client.
//
// MockSender replaces the reqwest sender at the HttpSend seam: responses
// are scripted FIFO, every outbound request is recorded. Tests follow
// MOCK → FUNCTION → OUTPUT: script the wire, call the real client, assert
// on what went out and what came back.

use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;

use geolens_common::error::{GeoLensError, Result};

use crate::transport::{HttpSend, OutboundRequest, RawResponse};

/// Scripted HTTP sender. Responses are served in arrival order regardless
/// of the request; running past the script is a hard test failure surfaced
/// as a network error.
#[derive(Default)]
pub struct MockSender {
    responses: Mutex<VecDeque<Result<RawResponse>>>,
    requests: Mutex<Vec<OutboundRequest>>,
}

impl MockSender {
    pub fn new() -> Self {
        Self::default()
    }

    /// Script a JSON response.
    pub fn respond_json(self, status: u16, body: serde_json::Value) -> Self {
        self.responses.lock().unwrap().push_back(Ok(RawResponse {
            status,
            body: body.to_string().into_bytes(),
        }));
        self
    }

    /// Script a bare status with a plain-text body.
    pub fn respond_status(self, status: u16, message: &str) -> Self {
        self.responses.lock().unwrap().push_back(Ok(RawResponse {
            status,
            body: message.as_bytes().to_vec(),
        }));
        self
    }

    /// Script a transport-level failure (connection refused, timeout).
    pub fn respond_error(self, error: GeoLensError) -> Self {
        self.responses.lock().unwrap().push_back(Err(error));
        self
    }

    /// Everything the client has sent, in order.
    pub fn requests(&self) -> Vec<OutboundRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn request_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    /// Requests whose URL contains the given fragment.
    pub fn requests_to(&self, fragment: &str) -> Vec<OutboundRequest> {
        self.requests
            .lock()
            .unwrap()
            .iter()
            .filter(|r| r.url.contains(fragment))
            .cloned()
            .collect()
    }
}

#[async_trait]
impl HttpSend for MockSender {
    async fn send(&self, request: OutboundRequest) -> Result<RawResponse> {
        self.requests.lock().unwrap().push(request);
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| {
                Err(GeoLensError::Network(
                    "MockSender: script exhausted, no response left".to_string(),
                ))
            })
    }
}
