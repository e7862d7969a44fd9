// ABOUTME: Classifies upstream HTTP responses into success or typed client/server/unexpected faults
// ABOUTME: Pure function of status code and body, following the error table of the RTE API guide
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

//! # Response Classification
//!
//! The RTE API documents a fixed set of error codes. 400 and 500 carry a JSON
//! body with `error` / `error_description`; the other documented codes carry a
//! fixed reason and their body is ignored. Anything else is unexpected.

use crate::constants::api::{KEY_ERROR, KEY_ERROR_DESC};
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Fault families of the upstream API
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FaultKind {
    /// 4xx documented by the API
    Client,
    /// 5xx documented by the API
    Server,
    /// Any status the API guide does not describe
    Unexpected,
}

impl fmt::Display for FaultKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Client => write!(f, "client fault"),
            Self::Server => write!(f, "server fault"),
            Self::Unexpected => write!(f, "unexpected fault"),
        }
    }
}

/// Classified non-success response
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
#[error("HTTP code {code}: {message}")]
pub struct ApiFault {
    /// Fault family
    pub kind: FaultKind,
    /// HTTP status code
    pub code: u16,
    /// Human readable message
    pub message: String,
}

impl ApiFault {
    /// Create a new fault
    #[must_use]
    pub fn new(kind: FaultKind, code: u16, message: impl Into<String>) -> Self {
        Self {
            kind,
            code,
            message: message.into(),
        }
    }
}

/// Outcome of classifying a response
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiStatus {
    /// HTTP 200
    Success,
    /// Any other status
    Fault(ApiFault),
}

impl ApiStatus {
    /// Convert into a `Result`, keeping the fault as the error
    ///
    /// # Errors
    ///
    /// Returns the fault for every non-success status
    pub fn into_result(self) -> Result<(), ApiFault> {
        match self {
            Self::Success => Ok(()),
            Self::Fault(fault) => Err(fault),
        }
    }

    /// Whether the response was a success
    #[must_use]
    pub const fn is_success(&self) -> bool {
        matches!(self, Self::Success)
    }
}

/// Classify an HTTP response by status code and raw body
#[must_use]
pub fn classify_response(status: u16, body: &str) -> ApiStatus {
    let fault = match status {
        200 => return ApiStatus::Success,
        400 => ApiFault::new(FaultKind::Client, status, error_payload_message(body)),
        500 => ApiFault::new(FaultKind::Server, status, error_payload_message(body)),
        401 | 403 | 404 | 408 | 413 | 414 | 429 => {
            ApiFault::new(FaultKind::Client, status, client_reason(status))
        }
        503 => ApiFault::new(FaultKind::Server, status, "Service Unavailable"),
        509 => ApiFault::new(FaultKind::Server, status, "Bandwidth Limit Exceeded"),
        _ => ApiFault::new(
            FaultKind::Unexpected,
            status,
            format!("Unexpected HTTP code: {body}"),
        ),
    };
    ApiStatus::Fault(fault)
}

fn client_reason(status: u16) -> &'static str {
    match status {
        401 => "Unauthorized",
        403 => "Forbidden",
        404 => "Not Found",
        408 => "Request Time-out",
        413 => "Request Entity Too Large",
        414 => "Request-URI Too Long",
        _ => "Too Many Requests",
    }
}

/// Build the message of a 400/500 from its `error` / `error_description` JSON body
fn error_payload_message(body: &str) -> String {
    let Ok(payload) = serde_json::from_str::<serde_json::Value>(body) else {
        return format!("Failed to decode JSON payload: {body}");
    };
    match (payload.get(KEY_ERROR), payload.get(KEY_ERROR_DESC)) {
        (Some(error), Some(description)) => {
            format!("{}: {}", json_text(error), json_text(description))
        }
        _ => format!("Failed to decode access JSON error payload: {body}"),
    }
}

fn json_text(value: &serde_json::Value) -> String {
    value
        .as_str()
        .map_or_else(|| value.to_string(), ToOwned::to_owned)
}
