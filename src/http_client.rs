// ABOUTME: Shared HTTP client with the fixed User-Agent and connection timeout
// ABOUTME: Singleton client reused by the token manager, signal fetcher and self-test
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

use reqwest::{Client, ClientBuilder};
use rte_signals_core::constants::api::{CONNECT_TIMEOUT, USER_AGENT};
use std::sync::OnceLock;

/// Global shared HTTP client
static SHARED_CLIENT: OnceLock<Client> = OnceLock::new();

/// Get or create the shared HTTP client
///
/// No overall request timeout is set here; the signal fetcher applies its own
/// per request.
pub fn shared_client() -> &'static Client {
    SHARED_CLIENT.get_or_init(create_client)
}

/// Create a new HTTP client with the worker defaults
///
/// Falls back to a default client if the builder fails.
#[must_use]
pub fn create_client() -> Client {
    create_custom_client(|builder| builder)
}

/// Create a new HTTP client with the worker defaults plus custom configuration
#[must_use]
pub fn create_custom_client<F>(config_fn: F) -> Client
where
    F: FnOnce(ClientBuilder) -> ClientBuilder,
{
    let builder = ClientBuilder::new()
        .user_agent(USER_AGENT)
        .connect_timeout(CONNECT_TIMEOUT);
    config_fn(builder).build().unwrap_or_else(|_| Client::new())
}
