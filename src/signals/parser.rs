// ABOUTME: Decodes the demand-response signal payload into ordered signal days
// ABOUTME: Skips malformed entries with a warning, aborts on unreadable payloads or timestamps
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

use rte_signals_core::constants::api::{
    KEY_END, KEY_SIGNALED_DATES, KEY_SIGNALS, KEY_START, KEY_UPDATED, KEY_VALUE,
};
use rte_signals_core::datetime::parse_timestamp;
use rte_signals_core::{SignalDay, SignalError, SignalResult, SignalValue};
use serde_json::Value;
use tracing::warn;

/// Parse the body of a successful signal response
///
/// Entries keep the API order (newest first).
///
/// # Errors
///
/// - `SignalError::MalformedPayload` if the body is not JSON or has no
///   `signals[0].signaled_dates` list
/// - `SignalError::MalformedTimestamp` if any timestamp cannot be decoded
pub fn parse_signal_days(body: &str) -> SignalResult<Vec<SignalDay>> {
    let payload: Value = serde_json::from_str(body).map_err(|e| {
        SignalError::malformed_payload(
            format!("JSON parsing error on a HTTP 200 request ({e})"),
            body,
        )
    })?;

    let entries = payload
        .get(KEY_SIGNALS)
        .and_then(|signals| signals.get(0))
        .and_then(|signal| signal.get(KEY_SIGNALED_DATES))
        .and_then(Value::as_array)
        .ok_or_else(|| {
            SignalError::malformed_payload(
                format!("missing {KEY_SIGNALS}[0].{KEY_SIGNALED_DATES} list"),
                body,
            )
        })?;

    let mut days = Vec::with_capacity(entries.len());
    for entry in entries {
        match parse_entry(entry) {
            Ok(day) => days.push(day),
            Err(e) if e.is_recoverable() => {
                warn!("Following day failed to be processed with {e}, skipping");
            }
            Err(e) => return Err(e),
        }
    }
    Ok(days)
}

fn parse_entry(entry: &Value) -> SignalResult<SignalDay> {
    let start = text_field(entry, KEY_START)?;
    let end = text_field(entry, KEY_END)?;
    let updated = text_field(entry, KEY_UPDATED)?;
    let code = entry
        .get(KEY_VALUE)
        .ok_or_else(|| missing_field(entry, KEY_VALUE))?
        .as_i64()
        .ok_or_else(|| {
            SignalError::malformed_entry(
                format!("'{KEY_VALUE}' is not an integer"),
                entry.to_string(),
            )
        })?;

    let start = parse_timestamp(start)?;
    let end = parse_timestamp(end)?;
    let updated = parse_timestamp(updated)?;

    SignalDay::new(start, end, SignalValue::from(code), updated).ok_or_else(|| {
        SignalError::malformed_entry(
            format!("'{KEY_START}' is not before '{KEY_END}'"),
            entry.to_string(),
        )
    })
}

fn text_field<'a>(entry: &'a Value, key: &str) -> SignalResult<&'a str> {
    entry
        .get(key)
        .ok_or_else(|| missing_field(entry, key))?
        .as_str()
        .ok_or_else(|| {
            SignalError::malformed_entry(format!("'{key}' is not a string"), entry.to_string())
        })
}

fn missing_field(entry: &Value, key: &str) -> SignalError {
    SignalError::malformed_entry(format!("missing '{key}'"), entry.to_string())
}
