//! In-memory [`Backend`] for tests. Replies are keyed by method and path;
//! every request is recorded so tests can assert on what was sent.

use super::{ApiError, ApiRequest, Backend, Method};
use async_trait::async_trait;
use serde_json::Value;
use std::{collections::HashMap, sync::Mutex};

#[derive(Debug, Default)]
pub struct StubBackend {
    replies: Mutex<HashMap<(Method, String), Result<Value, ApiError>>>,
    requests: Mutex<Vec<ApiRequest>>,
}

impl StubBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reply(self, method: Method, path: &str, value: Value) -> Self {
        self.replies
            .lock()
            .expect("stub lock")
            .insert((method, path.to_string()), Ok(value));
        self
    }

    pub fn fail(self, method: Method, path: &str, err: ApiError) -> Self {
        self.replies
            .lock()
            .expect("stub lock")
            .insert((method, path.to_string()), Err(err));
        self
    }

    pub fn requests(&self) -> Vec<ApiRequest> {
        self.requests.lock().expect("stub lock").clone()
    }

    pub fn last_request(&self, method: Method, path: &str) -> Option<ApiRequest> {
        self.requests()
            .into_iter()
            .rev()
            .find(|r| r.method == method && r.path == path)
    }
}

#[async_trait]
impl Backend for StubBackend {
    async fn send(&self, request: ApiRequest) -> Result<Value, ApiError> {
        let key = (request.method, request.path.clone());
        self.requests.lock().expect("stub lock").push(request);
        self.replies
            .lock()
            .expect("stub lock")
            .get(&key)
            .cloned()
            .unwrap_or_else(|| {
                Err(ApiError::Transport(format!("no stub for {key:?}")))
            })
    }
}
