//! Cubby HTTP transport infrastructure.
//!
//! Implements the [`protocol::Transport`] port over [`reqwest`]. One request
//! in, one `(status, parsed JSON body)` out. Connection pooling and TLS are
//! reqwest's concern; retry and interpretation are the client's. Nothing in
//! this crate knows the Cubby protocol.
//!
//! ## Architectural Layer
//!
//! **Infrastructure.** This crate must not contain domain rules. The
//! `client` crate sees only [`protocol::Transport`].

use async_trait::async_trait;

use protocol::{Request, Response, Transport, TransportError};

// ---------------------------------------------------------------------------

/// Reqwest-backed [`Transport`] implementation.
///
/// Cheap to clone; the underlying [`reqwest::Client`] already shares its
/// connection pool across clones.
#[derive(Debug, Clone, Default)]
pub struct HttpTransport {
    http: reqwest::Client,
}

impl HttpTransport {
    /// Creates a transport with a default-configured HTTP client.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a transport from a pre-configured HTTP client (timeouts,
    /// proxies, extra root certificates, ...).
    pub fn with_client(http: reqwest::Client) -> Self {
        Self { http }
    }
}

fn method_of(method: protocol::Method) -> reqwest::Method {
    match method {
        protocol::Method::Get => reqwest::Method::GET,
        protocol::Method::Post => reqwest::Method::POST,
        protocol::Method::Put => reqwest::Method::PUT,
        protocol::Method::Delete => reqwest::Method::DELETE,
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn send(&self, request: Request) -> Result<Response, TransportError> {
        let mut builder = self.http.request(method_of(request.method), &request.url);
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        let response = builder.send().await.map_err(|source| TransportError::Request {
            url: request.url.clone(),
            message: source.to_string(),
        })?;

        let status = response.status().as_u16();
        let bytes = response.bytes().await.map_err(|source| TransportError::Request {
            url: request.url.clone(),
            message: source.to_string(),
        })?;

        // Empty bodies are legitimate (e.g. silent deletes and commits).
        let body = if bytes.is_empty() {
            None
        } else {
            Some(serde_json::from_slice(&bytes).map_err(|source| TransportError::InvalidBody {
                url: request.url.clone(),
                message: source.to_string(),
            })?)
        };

        tracing::debug!(
            method = %request.method,
            url = %request.url,
            status,
            "request completed"
        );

        Ok(Response::new(status, body))
    }
}
