// ABOUTME: One-shot credential self-test: token grant plus a single signal request
// ABOUTME: Surfaces the first failure unmodified, without retry and without starting the worker
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

use crate::config::ApiEndpoints;
use crate::http_client::shared_client;
use crate::oauth2_client::{request_access_token, ClientCredentials};
use reqwest::header::{ACCEPT, USER_AGENT};
use rte_signals_core::constants::api::{REQUEST_TIMEOUT, USER_AGENT as RTE_USER_AGENT};
use rte_signals_core::{classify_response, SignalResult};
use tracing::{debug, info};

/// Check that `credentials` can obtain a token and read the signal endpoint
///
/// The response body is classified but not parsed.
///
/// # Errors
///
/// Returns the grant failure, the transport failure or the classified API
/// fault, whichever happens first
pub async fn verify_credentials(
    credentials: &ClientCredentials,
    endpoints: &ApiEndpoints,
) -> SignalResult<()> {
    let http = shared_client();
    let token = request_access_token(http, credentials, &endpoints.token_url).await?;

    debug!(url = %endpoints.signals_url, "Testing signal endpoint access");
    let response = http
        .get(&endpoints.signals_url)
        .bearer_auth(token.secret())
        .header(ACCEPT, "application/json")
        .header(USER_AGENT, RTE_USER_AGENT)
        .timeout(REQUEST_TIMEOUT)
        .send()
        .await?;

    let status = response.status().as_u16();
    let body = response.text().await?;
    classify_response(status, &body).into_result()?;

    info!(client_id = credentials.client_id(), "Credentials verified");
    Ok(())
}
