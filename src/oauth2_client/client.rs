// ABOUTME: Client-credentials grant against the RTE OAuth2 token endpoint
// ABOUTME: Basic-auth POST with a form body, decoding the opaque access token
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

use reqwest::header::USER_AGENT;
use reqwest::{Client, StatusCode};
use rte_signals_core::constants::api::USER_AGENT as RTE_USER_AGENT;
use rte_signals_core::{classify_response, ApiStatus, SignalError, SignalResult};
use serde::Deserialize;
use std::fmt;
use tracing::debug;

/// OAuth2 application credentials issued by the RTE data portal
#[derive(Clone, PartialEq, Eq)]
pub struct ClientCredentials {
    client_id: String,
    client_secret: String,
}

impl ClientCredentials {
    /// Create credentials from an id / secret pair
    #[must_use]
    pub fn new(client_id: impl Into<String>, client_secret: impl Into<String>) -> Self {
        Self {
            client_id: client_id.into(),
            client_secret: client_secret.into(),
        }
    }

    /// Application id
    #[must_use]
    pub fn client_id(&self) -> &str {
        &self.client_id
    }

    /// Application secret
    #[must_use]
    pub fn client_secret(&self) -> &str {
        &self.client_secret
    }
}

impl fmt::Debug for ClientCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientCredentials")
            .field("client_id", &self.client_id)
            .field("client_secret", &"[REDACTED]")
            .finish()
    }
}

/// Opaque access token returned by the grant
#[derive(Clone, PartialEq, Eq, Deserialize)]
pub struct AccessToken {
    /// Bearer value attached to signal requests
    pub access_token: String,
    /// Token type (usually "Bearer")
    #[serde(default)]
    pub token_type: Option<String>,
    /// Lifetime announced by the server, informational only
    #[serde(default)]
    pub expires_in: Option<u64>,
}

impl AccessToken {
    /// Bearer value
    #[must_use]
    pub fn secret(&self) -> &str {
        &self.access_token
    }
}

impl fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AccessToken")
            .field("access_token", &"[REDACTED]")
            .field("token_type", &self.token_type)
            .field("expires_in", &self.expires_in)
            .finish()
    }
}

/// Perform one client-credentials grant
///
/// # Errors
///
/// Returns `SignalError::Transport` if the token endpoint cannot be reached and
/// `SignalError::Token` if it answers with anything but a readable token
pub async fn request_access_token(
    http: &Client,
    credentials: &ClientCredentials,
    token_url: &str,
) -> SignalResult<AccessToken> {
    debug!(token_url, "Requesting access token");

    let response = http
        .post(token_url)
        .basic_auth(credentials.client_id(), Some(credentials.client_secret()))
        .header(USER_AGENT, RTE_USER_AGENT)
        .form(&[("grant_type", "client_credentials")])
        .send()
        .await?;

    let status = response.status();
    let body = response.text().await?;

    if status != StatusCode::OK {
        let message = match classify_response(status.as_u16(), &body) {
            ApiStatus::Fault(fault) => fault.to_string(),
            ApiStatus::Success => format!("HTTP code {status}"),
        };
        return Err(SignalError::token(message));
    }

    serde_json::from_str::<AccessToken>(&body)
        .map_err(|e| SignalError::token(format!("Invalid token response ({e}): {body}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_credentials_debug_redacts_secret() {
        let credentials = ClientCredentials::new("my-app", "super-secret");
        let rendered = format!("{credentials:?}");
        assert!(rendered.contains("my-app"));
        assert!(!rendered.contains("super-secret"));
    }

    #[test]
    fn test_access_token_accepts_minimal_payload() {
        let token: AccessToken = serde_json::from_str(r#"{"access_token": "abc"}"#).unwrap();
        assert_eq!(token.secret(), "abc");
        assert!(token.expires_in.is_none());
        assert!(!format!("{token:?}").contains("abc"));
    }
}
