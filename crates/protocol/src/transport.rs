//! The transport port: the single seam between the protocol layer and HTTP.
//!
//! A [`Transport`] issues one request and returns one response. It never
//! retries and never interprets what it carries; the Cubby protocol is
//! invisible at this layer. The `transport` crate provides the
//! reqwest-backed implementation; tests substitute a scripted fake.

use async_trait::async_trait;
use serde_json::Value;

use crate::errors::TransportError;

// ---------------------------------------------------------------------------

/// HTTP method of a [`Request`]. Only the methods the protocol uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    Get,
    Post,
    Put,
    Delete,
}

impl Method {
    /// Returns the method's wire name.
    pub fn as_str(self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Delete => "DELETE",
        }
    }
}

impl std::fmt::Display for Method {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ---------------------------------------------------------------------------

/// One HTTP request, fully formed. `Clone` because the staging retry loop
/// reissues the identical request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Request {
    /// HTTP method.
    pub method: Method,
    /// Absolute URL, already encoded.
    pub url: String,
    /// JSON body, when the operation carries one.
    pub body: Option<Value>,
}

impl Request {
    /// Creates a request without a body.
    pub fn new(method: Method, url: impl Into<String>) -> Self {
        Self { method, url: url.into(), body: None }
    }

    /// Attaches a JSON body.
    pub fn with_body(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }
}

// ---------------------------------------------------------------------------

/// One HTTP response: status code plus parsed JSON body, if any.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    /// Raw HTTP status code.
    pub status: u16,
    /// Parsed JSON body; `None` for empty responses.
    pub body: Option<Value>,
}

impl Response {
    /// Creates a response.
    pub fn new(status: u16, body: Option<Value>) -> Self {
        Self { status, body }
    }

    /// The machine-readable `errorCode` field of the body, when present.
    ///
    /// This is the only body field the classifier inspects.
    pub fn error_code(&self) -> Option<&str> {
        self.body.as_ref()?.get("errorCode")?.as_str()
    }
}

// ---------------------------------------------------------------------------

/// Issues a single HTTP request and returns the response.
///
/// Implementations must be shareable across concurrently-issued operations;
/// the client facade holds one transport behind an `Arc`.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Sends `request` and waits for the response.
    async fn send(&self, request: Request) -> Result<Response, TransportError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn error_code_reads_the_machine_readable_field() {
        let response = Response::new(
            404,
            Some(json!({"errorCode": "SPACE_DOES_NOT_EXIST", "status": "NOT_FOUND", "message": "gone"})),
        );
        assert_eq!(response.error_code(), Some("SPACE_DOES_NOT_EXIST"));
    }

    #[test]
    fn error_code_is_none_without_body_or_field() {
        assert_eq!(Response::new(202, None).error_code(), None);
        assert_eq!(Response::new(200, Some(json!({"transactionId": "T1"}))).error_code(), None);
        // A non-string errorCode does not classify.
        assert_eq!(Response::new(200, Some(json!({"errorCode": 42}))).error_code(), None);
    }
}
