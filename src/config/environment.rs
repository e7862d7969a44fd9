// ABOUTME: Environment-based configuration for the signal worker
// ABOUTME: Reads credentials and endpoint overrides, validating URLs before the worker starts
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

use crate::oauth2_client::ClientCredentials;
use anyhow::{bail, Context, Result};
use rte_signals_core::constants::api::{SIGNALS_ENDPOINT, TOKEN_ENDPOINT};
use rte_signals_core::constants::env_config;
use std::env;
use tracing::info;
use url::Url;

/// Upstream endpoints used by the worker
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiEndpoints {
    /// OAuth2 token endpoint
    pub token_url: String,
    /// Demand-response signal endpoint
    pub signals_url: String,
}

impl ApiEndpoints {
    /// Build endpoints from raw URLs
    ///
    /// # Errors
    ///
    /// Returns an error if either URL is not absolute `http(s)`
    pub fn parse(token_url: &str, signals_url: &str) -> Result<Self> {
        Ok(Self {
            token_url: parse_http_url(token_url)
                .context("invalid token endpoint")?
                .into(),
            signals_url: parse_http_url(signals_url)
                .context("invalid signal endpoint")?
                .into(),
        })
    }

    /// Endpoints rooted at `base`, keeping the production paths
    ///
    /// Used to point the worker at a mock server.
    ///
    /// # Errors
    ///
    /// Returns an error if `base` is not a valid URL
    pub fn with_base_url(base: &str) -> Result<Self> {
        let base = parse_http_url(base)?;
        let join = |endpoint: &str| -> Result<String> {
            let path = Url::parse(endpoint)?.path().to_owned();
            Ok(base.join(&path)?.into())
        };
        Ok(Self {
            token_url: join(TOKEN_ENDPOINT).context("invalid token endpoint")?,
            signals_url: join(SIGNALS_ENDPOINT).context("invalid signal endpoint")?,
        })
    }
}

impl Default for ApiEndpoints {
    fn default() -> Self {
        Self {
            token_url: TOKEN_ENDPOINT.to_owned(),
            signals_url: SIGNALS_ENDPOINT.to_owned(),
        }
    }
}

/// Complete worker configuration
#[derive(Debug, Clone)]
pub struct WorkerConfig {
    /// OAuth2 application credentials
    pub credentials: ClientCredentials,
    /// Upstream endpoints
    pub endpoints: ApiEndpoints,
}

impl WorkerConfig {
    /// Create a configuration for the production endpoints
    #[must_use]
    pub fn new(credentials: ClientCredentials) -> Self {
        Self {
            credentials,
            endpoints: ApiEndpoints::default(),
        }
    }

    /// Load configuration from environment variables
    ///
    /// # Errors
    ///
    /// Returns an error if credentials are missing or empty, or if an endpoint
    /// override is not a valid URL
    pub fn from_env() -> Result<Self> {
        info!("Loading configuration from environment variables");

        let client_id = required_var(env_config::CLIENT_ID)?;
        let client_secret = required_var(env_config::CLIENT_SECRET)?;

        let endpoints = ApiEndpoints::parse(
            &env_var_or(env_config::TOKEN_URL, TOKEN_ENDPOINT),
            &env_var_or(env_config::SIGNALS_URL, SIGNALS_ENDPOINT),
        )?;

        Ok(Self {
            credentials: ClientCredentials::new(client_id, client_secret),
            endpoints,
        })
    }

    /// Human readable summary for startup logs, without secrets
    #[must_use]
    pub fn summary(&self) -> String {
        format!(
            "RTE Signal Worker Configuration:\n\
             - Client ID: {}\n\
             - Token Endpoint: {}\n\
             - Signal Endpoint: {}",
            self.credentials.client_id(),
            self.endpoints.token_url,
            self.endpoints.signals_url,
        )
    }
}

fn required_var(key: &str) -> Result<String> {
    let value = env::var(key).with_context(|| format!("{key} must be set"))?;
    if value.trim().is_empty() {
        bail!("{key} must not be empty");
    }
    Ok(value)
}

fn env_var_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_owned())
}

fn parse_http_url(raw: &str) -> Result<Url> {
    let url = Url::parse(raw).with_context(|| format!("'{raw}' is not a valid URL"))?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        other => bail!("unsupported URL scheme '{other}' in '{raw}'"),
    }
}
