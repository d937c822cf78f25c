//! Deterministic responder for tests. Records every request, never touches the network.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;

use super::{CompletionRequest, Responder, ResponderError};

enum Reply {
    Text(String),
    ApiError { status: u16, message: String },
}

pub struct StubResponder {
    reply: Reply,
    calls: AtomicUsize,
    requests: Mutex<Vec<CompletionRequest>>,
}

impl StubResponder {
    /// Always answers with `text`.
    pub fn replying(text: impl Into<String>) -> Self {
        Self::with_reply(Reply::Text(text.into()))
    }

    /// Always fails with an API error.
    pub fn failing(status: u16, message: impl Into<String>) -> Self {
        Self::with_reply(Reply::ApiError {
            status,
            message: message.into(),
        })
    }

    fn with_reply(reply: Reply) -> Self {
        Self {
            reply,
            calls: AtomicUsize::new(0),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn last_request(&self) -> Option<CompletionRequest> {
        self.requests.lock().unwrap().last().cloned()
    }
}

#[async_trait]
impl Responder for StubResponder {
    async fn complete(&self, request: &CompletionRequest) -> Result<String, ResponderError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.requests.lock().unwrap().push(request.clone());
        match &self.reply {
            Reply::Text(text) => Ok(text.clone()),
            Reply::ApiError { status, message } => Err(ResponderError::Api {
                status: *status,
                message: message.clone(),
            }),
        }
    }
}
