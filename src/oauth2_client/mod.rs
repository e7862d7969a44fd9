// ABOUTME: OAuth 2.0 client-credentials support for the RTE token endpoint
// ABOUTME: Credential holder, token grant and the token manager owned by the worker
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

//! # OAuth 2.0 Client Module
//!
//! The signal API is protected by a client-credentials grant. This module
//! handles:
//! - Holding the client id and secret without leaking the secret in logs
//! - Performing the grant against the token endpoint
//! - Keeping the current access token for the signal fetcher

/// Credentials and the client-credentials grant request
pub mod client;
/// Access token state owned by the worker
pub mod token_manager;

pub use client::{request_access_token, AccessToken, ClientCredentials};
pub use token_manager::TokenManager;
