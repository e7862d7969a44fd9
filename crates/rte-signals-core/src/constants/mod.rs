// ABOUTME: Constants module with domain-separated organization
// ABOUTME: Upstream API endpoints, payload keys, signal names and scheduling values
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

//! Constants module
//!
//! Constants are grouped by the component that consumes them rather than being
//! kept in a single flat list.

/// Upstream API endpoints, headers and payload keys
pub mod api;
/// Wait-time algorithm and timezone constants
pub mod schedule;

/// Signal names exposed to readers of the cache
pub mod signal_names {
    /// No demand reduction reported for the interval
    pub const NOT_REPORTED: &str = "not_reported";
    /// Explicit demand reduction
    pub const EXPLICIT: &str = "explicit";
    /// Implicit demand reduction
    pub const IMPLICIT: &str = "implicit";
    /// Both explicit and implicit demand reduction
    pub const EXPLICIT_IMPLICIT: &str = "explicit_implicit";
    /// Unknown code, or no signal available
    pub const UNKNOWN: &str = "unknown";
}

/// Environment variable names read by the configuration layer
pub mod env_config {
    /// OAuth2 client id
    pub const CLIENT_ID: &str = "RTE_CLIENT_ID";
    /// OAuth2 client secret
    pub const CLIENT_SECRET: &str = "RTE_CLIENT_SECRET";
    /// Token endpoint override
    pub const TOKEN_URL: &str = "RTE_TOKEN_URL";
    /// Signal endpoint override
    pub const SIGNALS_URL: &str = "RTE_SIGNALS_URL";
}

/// Service identification used in logs
pub mod service_names {
    /// Name of the signal worker service
    pub const RTE_SIGNALS: &str = "rte-signals";
}
