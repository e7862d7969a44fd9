// ABOUTME: Error taxonomy for the signal worker: transport, token, API faults and payload decoding
// ABOUTME: Distinguishes the locally recoverable malformed-entry case from cycle-aborting failures
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

//! # Signal Errors
//!
//! Every component of the worker reports failures through [`SignalError`].
//! Only [`SignalError::MalformedEntry`] is recovered where it occurs (the entry
//! is skipped); every other variant aborts the current fetch cycle and leaves
//! the cache stale.

use crate::classifier::{ApiFault, FaultKind};
use thiserror::Error;

/// Boxed source error carried by transport failures
pub type BoxedSource = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Errors produced while authenticating against, calling or decoding the upstream API
#[derive(Debug, Error)]
pub enum SignalError {
    /// Network level failure: connection, DNS, timeout, body read
    #[error("transport error: {message}")]
    Transport {
        /// Human readable description
        message: String,
        /// Underlying client error
        #[source]
        source: Option<BoxedSource>,
    },

    /// Client-credentials grant failed, or the token was rejected again after a refresh
    #[error("OAuth2 token error: {0}")]
    Token(String),

    /// Classified non-success HTTP response
    #[error(transparent)]
    Api(#[from] ApiFault),

    /// Timestamp not matching `YYYY-MM-DDThh:mm:ss±hh:mm`
    #[error("malformed timestamp '{value}': {source}")]
    MalformedTimestamp {
        /// Raw value as received
        value: String,
        /// Parser failure
        #[source]
        source: chrono::ParseError,
    },

    /// Body of a successful response that could not be decoded
    #[error("malformed payload ({reason}):\n{body}")]
    MalformedPayload {
        /// What went wrong
        reason: String,
        /// Raw response body
        body: String,
    },

    /// One signal-day entry that cannot be turned into a `SignalDay`
    #[error("malformed signal entry ({reason}): {entry}")]
    MalformedEntry {
        /// Missing field or violated invariant
        reason: String,
        /// The entry as received
        entry: String,
    },
}

/// Result type alias for signal operations
pub type SignalResult<T> = Result<T, SignalError>;

impl SignalError {
    /// Transport failure without an underlying source
    pub fn transport(message: impl Into<String>) -> Self {
        Self::Transport {
            message: message.into(),
            source: None,
        }
    }

    /// Token failure
    pub fn token(message: impl Into<String>) -> Self {
        Self::Token(message.into())
    }

    /// Payload decoding failure
    pub fn malformed_payload(reason: impl Into<String>, body: impl Into<String>) -> Self {
        Self::MalformedPayload {
            reason: reason.into(),
            body: body.into(),
        }
    }

    /// Entry decoding failure
    pub fn malformed_entry(reason: impl Into<String>, entry: impl Into<String>) -> Self {
        Self::MalformedEntry {
            reason: reason.into(),
            entry: entry.into(),
        }
    }

    /// Whether the failure is handled where it occurs instead of aborting the fetch cycle
    #[must_use]
    pub const fn is_recoverable(&self) -> bool {
        matches!(self, Self::MalformedEntry { .. })
    }

    /// The classified API fault, if this error came from an HTTP status
    #[must_use]
    pub const fn api_fault(&self) -> Option<&ApiFault> {
        match self {
            Self::Api(fault) => Some(fault),
            _ => None,
        }
    }

    /// HTTP status carried by the error, if any
    #[must_use]
    pub fn status_code(&self) -> Option<u16> {
        self.api_fault().map(|fault| fault.code)
    }

    /// Short category label used in structured logs
    #[must_use]
    pub const fn category(&self) -> &'static str {
        match self {
            Self::Transport { .. } => "transport",
            Self::Token(_) => "token",
            Self::Api(fault) => match fault.kind {
                FaultKind::Client => "client_fault",
                FaultKind::Server => "server_fault",
                FaultKind::Unexpected => "unexpected_fault",
            },
            Self::MalformedTimestamp { .. } => "malformed_timestamp",
            Self::MalformedPayload { .. } => "malformed_payload",
            Self::MalformedEntry { .. } => "malformed_entry",
        }
    }
}

#[cfg(feature = "transport-errors")]
impl From<reqwest::Error> for SignalError {
    fn from(error: reqwest::Error) -> Self {
        let message = if error.is_timeout() {
            format!("request timed out: {error}")
        } else if error.is_connect() {
            format!("connection failed: {error}")
        } else {
            error.to_string()
        };
        Self::Transport {
            message,
            source: Some(Box::new(error)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_malformed_entry_is_recoverable() {
        assert!(SignalError::malformed_entry("missing start_date", "{}").is_recoverable());
        assert!(!SignalError::token("grant failed").is_recoverable());
        assert!(!SignalError::transport("timeout").is_recoverable());
        assert!(!SignalError::malformed_payload("not JSON", "<html>").is_recoverable());
    }

    #[test]
    fn test_api_fault_display_and_category() {
        let error = SignalError::from(ApiFault::new(FaultKind::Server, 503, "Service Unavailable"));
        assert_eq!(error.to_string(), "HTTP code 503: Service Unavailable");
        assert_eq!(error.category(), "server_fault");
        assert_eq!(error.status_code(), Some(503));
    }
}
