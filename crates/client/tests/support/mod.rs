//! Shared test support: a scripted transport fake standing in for the server.
//!
//! The fake replays a queue of canned responses and records every request it
//! was given, so tests can assert exact call counts (the retry-budget
//! properties) and exact request shapes (URLs, methods, bodies).
#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use serde_json::{json, Value};

use client::{ClientConfig, Request, Response, Transport, TransportError};

/// Base URL used by every test; no socket is ever opened.
pub const BASE_URL: &str = "http://cubby.test";

/// Client configuration with a millisecond backoff so retry tests run fast.
pub fn test_config() -> ClientConfig {
    ClientConfig::new(BASE_URL).with_retry_backoff(Duration::from_millis(1))
}

/// Installs a fmt subscriber honoring `RUST_LOG`, once per test binary.
pub fn init_tracing() {
    use tracing_subscriber::EnvFilter;
    let _ = tracing_subscriber::fmt().with_env_filter(EnvFilter::from_default_env()).try_init();
}

/// An `{errorCode, status, message}` body as the server shapes it.
pub fn error_body(code: &str) -> Value {
    json!({
        "errorCode": code,
        "status": "ERROR",
        "message": format!("test condition: {code}"),
    })
}

// ---------------------------------------------------------------------------

/// Scripted [`Transport`]: pops one canned response per request, in order.
#[derive(Default)]
pub struct FakeTransport {
    responses: Mutex<VecDeque<Response>>,
    requests: Mutex<Vec<Request>>,
}

impl FakeTransport {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Queues a response with a JSON body.
    pub fn respond(&self, status: u16, body: Value) {
        self.responses.lock().unwrap().push_back(Response::new(status, Some(body)));
    }

    /// Queues a body-less response.
    pub fn respond_empty(&self, status: u16) {
        self.responses.lock().unwrap().push_back(Response::new(status, None));
    }

    /// Queues `count` identical responses.
    pub fn respond_repeatedly(&self, count: usize, status: u16, body: Value) {
        for _ in 0..count {
            self.respond(status, body.clone());
        }
    }

    /// Every request seen so far, in issue order.
    pub fn requests(&self) -> Vec<Request> {
        self.requests.lock().unwrap().clone()
    }

    pub fn request_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    /// The single recorded request; panics if there were zero or several.
    pub fn only_request(&self) -> Request {
        let requests = self.requests();
        assert_eq!(requests.len(), 1, "expected exactly one request, saw {}", requests.len());
        requests.into_iter().next().unwrap()
    }
}

#[async_trait]
impl Transport for FakeTransport {
    async fn send(&self, request: Request) -> Result<Response, TransportError> {
        self.requests.lock().unwrap().push(request.clone());
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .ok_or_else(|| TransportError::Request {
                url: request.url,
                message: "no scripted response left".into(),
            })
    }
}
