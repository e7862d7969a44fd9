// ABOUTME: Shared test utilities and setup functions for integration tests
// ABOUTME: Provides mock RTE endpoints, payload builders, quiet logging and log capture
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org
#![allow(
    dead_code,
    clippy::missing_panics_doc,
    clippy::must_use_candidate,
    clippy::unwrap_used
)]
//! Shared test utilities for `rte_signals`

use rte_signals::{ApiEndpoints, ClientCredentials};
use serde_json::{json, Value};
use std::io;
use std::sync::{Arc, Mutex, Once, PoisonError};
use tracing::subscriber::DefaultGuard;
use wiremock::matchers::{basic_auth, bearer_token, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub const CLIENT_ID: &str = "test-client-id";
pub const CLIENT_SECRET: &str = "test-client-secret";
pub const TOKEN_PATH: &str = "/token/oauth";
pub const SIGNALS_PATH: &str = "/open_api/demand_response_signal/v2/signals";

static INIT_LOGGER: Once = Once::new();

/// Initialize quiet logging for tests (call once per test process)
pub fn init_test_logging() {
    INIT_LOGGER.call_once(|| {
        let log_level = match std::env::var("TEST_LOG").as_deref() {
            Ok("TRACE") => tracing::Level::TRACE,
            Ok("DEBUG") => tracing::Level::DEBUG,
            Ok("INFO") => tracing::Level::INFO,
            _ => tracing::Level::WARN,
        };

        tracing_subscriber::fmt()
            .with_max_level(log_level)
            .with_test_writer()
            .init();
    });
}

/// Log lines recorded on the current thread while the capture is alive
pub struct LogCapture {
    buffer: Arc<Mutex<Vec<u8>>>,
    guard: DefaultGuard,
}

impl LogCapture {
    /// Stop recording and return everything written so far
    pub fn finish(self) -> String {
        drop(self.guard);
        let bytes = self.buffer.lock().unwrap_or_else(PoisonError::into_inner);
        String::from_utf8_lossy(&bytes).into_owned()
    }
}

struct CaptureWriter(Arc<Mutex<Vec<u8>>>);

impl io::Write for CaptureWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Record warnings and errors emitted on this thread
///
/// Works with `#[tokio::test]`, whose runtime polls every task on the test
/// thread.
pub fn capture_logs() -> LogCapture {
    let buffer = Arc::new(Mutex::new(Vec::new()));
    let writer = Arc::clone(&buffer);
    let subscriber = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::WARN)
        .with_writer(move || CaptureWriter(Arc::clone(&writer)))
        .finish();

    LogCapture {
        buffer,
        guard: tracing::subscriber::set_default(subscriber),
    }
}

pub fn test_credentials() -> ClientCredentials {
    ClientCredentials::new(CLIENT_ID, CLIENT_SECRET)
}

pub fn endpoints_for(server: &MockServer) -> ApiEndpoints {
    ApiEndpoints::with_base_url(&server.uri()).unwrap()
}

/// One `signaled_dates` entry
pub fn signal_entry(start: &str, end: &str, code: i64) -> Value {
    json!({
        "start_date": start,
        "end_date": end,
        "aoe_signals": code,
        "updated_date": "2024-12-31T11:00:00+01:00",
    })
}

/// Full signal payload around the given entries
pub fn signal_payload(entries: Vec<Value>) -> Value {
    json!({ "signals": [{ "signaled_dates": entries }] })
}

/// Two days: 2025-01-02 not reported (newest) and 2025-01-01 explicit
pub fn two_day_payload() -> Value {
    signal_payload(vec![
        signal_entry("2025-01-02T00:00:00+01:00", "2025-01-03T00:00:00+01:00", 0),
        signal_entry("2025-01-01T00:00:00+01:00", "2025-01-02T00:00:00+01:00", 1),
    ])
}

pub fn token_body(token: &str) -> Value {
    json!({
        "access_token": token,
        "token_type": "Bearer",
        "expires_in": 7200,
    })
}

/// Token endpoint granting `token` to the test credentials
pub async fn mount_token_grant(server: &MockServer, token: &str) {
    Mock::given(method("POST"))
        .and(path(TOKEN_PATH))
        .and(basic_auth(CLIENT_ID, CLIENT_SECRET))
        .respond_with(ResponseTemplate::new(200).set_body_json(token_body(token)))
        .mount(server)
        .await;
}

/// Signal endpoint answering `response` to requests bearing `token`
pub async fn mount_signals(server: &MockServer, token: &str, response: ResponseTemplate) {
    Mock::given(method("GET"))
        .and(path(SIGNALS_PATH))
        .and(bearer_token(token))
        .respond_with(response)
        .mount(server)
        .await;
}
