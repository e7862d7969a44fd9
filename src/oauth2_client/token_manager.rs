// ABOUTME: Holds the current OAuth2 access token and obtains new ones on demand
// ABOUTME: Expiry is detected at request time by the fetcher, never predicted locally
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

use super::client::{request_access_token, AccessToken, ClientCredentials};
use reqwest::Client;
use rte_signals_core::SignalResult;
use tracing::{debug, error};

/// Owner of the access token used against the signal endpoint
///
/// The manager keeps at most one token. It is empty at startup, after a failed
/// grant, and after [`TokenManager::invalidate`].
#[derive(Debug)]
pub struct TokenManager {
    http: Client,
    credentials: ClientCredentials,
    token_url: String,
    token: Option<AccessToken>,
}

impl TokenManager {
    /// Create a manager with no token held
    #[must_use]
    pub fn new(http: Client, credentials: ClientCredentials, token_url: impl Into<String>) -> Self {
        Self {
            http,
            credentials,
            token_url: token_url.into(),
            token: None,
        }
    }

    /// Whether a token is currently held
    #[must_use]
    pub const fn has_token(&self) -> bool {
        self.token.is_some()
    }

    /// Bearer value of the held token
    #[must_use]
    pub fn access_token(&self) -> Option<&str> {
        self.token.as_ref().map(AccessToken::secret)
    }

    /// Drop the held token
    pub fn invalidate(&mut self) {
        if self.token.take().is_some() {
            debug!("Access token invalidated");
        }
    }

    /// Obtain a token if none is held
    ///
    /// # Errors
    ///
    /// Returns the grant failure; the manager stays empty
    pub async fn ensure_token(&mut self) -> SignalResult<()> {
        if self.has_token() {
            return Ok(());
        }
        self.grant().await
    }

    /// Drop the held token and perform a new grant
    ///
    /// # Errors
    ///
    /// Returns the grant failure; the manager stays empty
    pub async fn force_refresh(&mut self) -> SignalResult<()> {
        self.token = None;
        self.grant().await
    }

    async fn grant(&mut self) -> SignalResult<()> {
        match request_access_token(&self.http, &self.credentials, &self.token_url).await {
            Ok(token) => {
                debug!(expires_in = ?token.expires_in, "Access token obtained");
                self.token = Some(token);
                Ok(())
            }
            Err(e) => {
                error!(error.category = e.category(), "Fetching OAuth2 access token failed: {e}");
                Err(e)
            }
        }
    }
}
