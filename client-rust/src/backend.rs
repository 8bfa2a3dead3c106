use std::fmt;

use serde_json::Value;

use crate::{ApiEnvelope, ClientResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Delete,
}

impl HttpMethod {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Delete => "DELETE",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single call against the REST backend, relative to its base URL.
#[derive(Debug, Clone, PartialEq)]
pub struct BackendRequest {
    pub method: HttpMethod,
    /// Path beginning with `/`, e.g. `/skills/4`.
    pub path: String,
    pub body: Option<Value>,
    /// Bearer credential attached by the client when a session is active.
    pub bearer_token: Option<String>,
}

impl BackendRequest {
    pub fn new(method: HttpMethod, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            body: None,
            bearer_token: None,
        }
    }

    #[must_use]
    pub fn with_body(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }
}

/// Transport to the portfolio backend. Implementations return the decoded
/// envelope as-is; interpreting `success` is left to the client.
#[async_trait::async_trait]
pub trait Backend: Send + Sync {
    /// Short identifier used in traces, e.g. `http`.
    fn name(&self) -> &'static str;
    async fn send(&self, request: BackendRequest) -> ClientResult<ApiEnvelope>;
}
