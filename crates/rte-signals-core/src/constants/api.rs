// ABOUTME: Upstream RTE API constants for endpoints, headers, timeouts and JSON keys
// ABOUTME: Mirrors the Demand Response Signal v2 API contract
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

use std::time::Duration;

/// OAuth2 token endpoint (client-credentials grant)
pub const TOKEN_ENDPOINT: &str = "https://digital.iservices.rte-france.com/token/oauth";

/// Demand response signal endpoint
pub const SIGNALS_ENDPOINT: &str =
    "https://digital.iservices.rte-france.com/open_api/demand_response_signal/v2/signals";

/// Fixed User-Agent sent with every request
pub const USER_AGENT: &str = "github.com/hiteule/rte-jours-signales v1.0.0";

/// Per-request timeout for the signal endpoint
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(3);

/// Connection timeout for the shared HTTP client
pub const CONNECT_TIMEOUT: Duration = Duration::from_secs(3);

/// Timestamp layout once the offset colon has been removed
pub const DATE_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%z";

/// Timestamp layout as delivered by the API
pub const DATE_FORMAT_WITH_COLON: &str = "%Y-%m-%dT%H:%M:%S%:z";

/// Error payload: error identifier
pub const KEY_ERROR: &str = "error";
/// Error payload: human readable description
pub const KEY_ERROR_DESC: &str = "error_description";

/// Signal payload: top-level signal list
pub const KEY_SIGNALS: &str = "signals";
/// Signal payload: dated entries of one signal
pub const KEY_SIGNALED_DATES: &str = "signaled_dates";
/// Signal entry: inclusive start
pub const KEY_START: &str = "start_date";
/// Signal entry: exclusive end
pub const KEY_END: &str = "end_date";
/// Signal entry: demand-response code
pub const KEY_VALUE: &str = "aoe_signals";
/// Signal entry: last upstream revision
pub const KEY_UPDATED: &str = "updated_date";

/// `aoe_signals` code: not reported
pub const SIGNAL_NOT_REPORTED: i64 = 0;
/// `aoe_signals` code: explicit
pub const SIGNAL_EXPLICIT: i64 = 1;
/// `aoe_signals` code: implicit
pub const SIGNAL_IMPLICIT: i64 = 2;
/// `aoe_signals` code: explicit and implicit
pub const SIGNAL_EXPLICIT_IMPLICIT: i64 = 3;
