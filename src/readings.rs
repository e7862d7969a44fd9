// ABOUTME: Derived "current" and "next" signal readings computed from a cache snapshot
// ABOUTME: What a host polling the worker displays for a given instant
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

use chrono::{DateTime, TimeZone};
use rte_signals_core::constants::signal_names;
use rte_signals_core::{SignalDay, SignalValue};
use serde::Serialize;
use tracing::warn;

/// Day in effect at `now`: the first day with `start <= now < end`
#[must_use]
pub fn current_signal<'a, Z: TimeZone>(
    days: &'a [SignalDay],
    now: &DateTime<Z>,
) -> Option<&'a SignalDay> {
    days.iter().find(|day| day.contains(now))
}

/// First day in cache order starting strictly after `now`
///
/// The cache is newest first, so this is the latest known future day rather
/// than the closest one.
#[must_use]
pub fn next_signal<'a, Z: TimeZone>(
    days: &'a [SignalDay],
    now: &DateTime<Z>,
) -> Option<&'a SignalDay> {
    days.iter().find(|day| day.starts_after(now))
}

/// Reader-facing names of the current and next signals
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SignalReadings {
    /// Signal in effect now
    pub current: &'static str,
    /// Upcoming signal
    pub next: &'static str,
}

impl SignalReadings {
    /// Compute both readings for `now`
    #[must_use]
    pub fn observe<Z: TimeZone>(days: &[SignalDay], now: &DateTime<Z>) -> Self {
        Self {
            current: reading_name(current_signal(days, now)),
            next: reading_name(next_signal(days, now)),
        }
    }
}

fn reading_name(day: Option<&SignalDay>) -> &'static str {
    match day.map(|day| day.value) {
        None => signal_names::UNKNOWN,
        Some(SignalValue::Unknown(code)) => {
            warn!(code, "Unknown demand response signal value");
            signal_names::UNKNOWN
        }
        Some(value) => value.name(),
    }
}
