// ABOUTME: Signal fetcher calling the demand-response endpoint with bearer authentication
// ABOUTME: Retries exactly once after a token refresh, then classifies and parses the response
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

//! # Signal Fetcher
//!
//! [`SignalApiClient`] performs one `GET` against the signal endpoint per
//! cycle. When the endpoint answers `401`, the token is refreshed and the
//! request is attempted a second and last time. Without a held token the fetch
//! fails immediately; obtaining one is the caller's job
//! ([`SignalSource::ensure_token`]).

/// Payload decoding for successful responses
pub mod parser;

pub use parser::parse_signal_days;

use crate::config::ApiEndpoints;
use crate::oauth2_client::{ClientCredentials, TokenManager};
use async_trait::async_trait;
use reqwest::header::{ACCEPT, USER_AGENT};
use reqwest::{Client, StatusCode};
use rte_signals_core::constants::api::{REQUEST_TIMEOUT, USER_AGENT as RTE_USER_AGENT};
use rte_signals_core::{classify_response, SignalDay, SignalError, SignalResult};
use tracing::{debug, info};

/// Source of signal days driven by the worker loop
///
/// Implemented by [`SignalApiClient`]; tests substitute their own sources.
#[async_trait]
pub trait SignalSource: Send {
    /// Whether an access token is currently held
    fn has_token(&self) -> bool;

    /// Obtain an access token if none is held
    ///
    /// # Errors
    ///
    /// Returns the grant failure
    async fn ensure_token(&mut self) -> SignalResult<()>;

    /// Fetch and decode the current signal calendar, newest day first
    ///
    /// Never performs a grant on its own except the single refresh after a
    /// `401`.
    ///
    /// # Errors
    ///
    /// Returns any transport, token, API or payload failure of the cycle;
    /// `SignalError::Token` when no token is held
    async fn fetch_signal_days(&mut self) -> SignalResult<Vec<SignalDay>>;
}

/// Outcome of a single GET
enum Attempt {
    Body(String),
    TokenExpired,
}

/// HTTP client for the demand-response signal endpoint
#[derive(Debug)]
pub struct SignalApiClient {
    tokens: TokenManager,
    http: Client,
    signals_url: String,
}

impl SignalApiClient {
    /// Create a client for the given endpoints
    #[must_use]
    pub fn new(http: Client, credentials: ClientCredentials, endpoints: &ApiEndpoints) -> Self {
        Self {
            tokens: TokenManager::new(http.clone(), credentials, endpoints.token_url.as_str()),
            http,
            signals_url: endpoints.signals_url.clone(),
        }
    }

    /// Token manager owned by this client
    #[must_use]
    pub const fn tokens(&self) -> &TokenManager {
        &self.tokens
    }

    async fn attempt(&self) -> SignalResult<Attempt> {
        let Some(token) = self.tokens.access_token() else {
            return Err(SignalError::token("no access token held"));
        };

        debug!(url = %self.signals_url, "Calling signal endpoint with no params");
        let response = self
            .http
            .get(&self.signals_url)
            .bearer_auth(token)
            .header(ACCEPT, "application/json")
            .header(USER_AGENT, RTE_USER_AGENT)
            .timeout(REQUEST_TIMEOUT)
            .send()
            .await?;

        let status = response.status();
        if status == StatusCode::UNAUTHORIZED {
            return Ok(Attempt::TokenExpired);
        }

        let body = response.text().await?;
        classify_response(status.as_u16(), &body).into_result()?;
        Ok(Attempt::Body(body))
    }
}

#[async_trait]
impl SignalSource for SignalApiClient {
    fn has_token(&self) -> bool {
        self.tokens.has_token()
    }

    async fn ensure_token(&mut self) -> SignalResult<()> {
        self.tokens.ensure_token().await
    }

    async fn fetch_signal_days(&mut self) -> SignalResult<Vec<SignalDay>> {
        let body = match self.attempt().await? {
            Attempt::Body(body) => body,
            Attempt::TokenExpired => {
                info!("Access token expired, refreshing before retrying");
                self.tokens.force_refresh().await?;
                match self.attempt().await? {
                    Attempt::Body(body) => body,
                    Attempt::TokenExpired => {
                        self.tokens.invalidate();
                        return Err(SignalError::token(
                            "access token rejected again after refresh",
                        ));
                    }
                }
            }
        };
        parse_signal_days(&body)
    }
}
