// ABOUTME: Adaptive wait-time algorithm deciding when the next fetch should happen
// ABOUTME: Targets the 10:45 confirmation time or next midnight, with random jitter
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

//! # Wait-time Algorithm
//!
//! After each cycle the worker compares the freshest cached day with today:
//!
//! - nothing fetched: retry in 10 minutes
//! - the freshest day is ahead of today: sleep until 10:45 (when the next day
//!   is confirmed) or, past that time, until midnight
//! - otherwise: retry in about an hour
//!
//! Days are compared by day-of-month only, so on a month boundary (31 then 1)
//! the difference is negative and the hourly fallback is used.

use chrono::{DateTime, Datelike};
use chrono_tz::Tz;
use rand::Rng;
use rte_signals_core::constants::schedule::{
    CONFIRM_HOUR, CONFIRM_MIN, FALLBACK_MAX_SECS, FALLBACK_MIN_SECS, JITTER_SECS, RETRY_WAIT_SECS,
};
use rte_signals_core::datetime::{france_datetime, france_midnight};
use rte_signals_core::SignalDay;
use std::time::Duration;
use tracing::{info, warn};

/// Midnight (Europe/Paris) of the calendar date of the newest cached day
#[must_use]
pub fn freshest_day_midnight(days: &[SignalDay]) -> Option<DateTime<Tz>> {
    days.first()
        .map(|day| france_midnight(day.start.date_naive()))
}

/// Compute how long to wait before the next fetch
#[must_use]
pub fn compute_wait_time<R>(
    now: &DateTime<Tz>,
    freshest: Option<&DateTime<Tz>>,
    rng: &mut R,
) -> Duration
where
    R: Rng + ?Sized,
{
    let Some(freshest) = freshest else {
        return Duration::from_secs(RETRY_WAIT_SECS);
    };

    let day_diff = i64::from(freshest.day()) - i64::from(now.day());
    if day_diff <= 0 {
        return fallback_wait(rng);
    }

    let today = now.date_naive();
    let confirmation = france_datetime(today, CONFIRM_HOUR, CONFIRM_MIN);
    if *now > confirmation {
        let Some(tomorrow) = today.succ_opt() else {
            return fallback_wait(rng);
        };
        let wait = jittered(seconds_until(now, &france_midnight(tomorrow)), rng);
        info!(
            wait_secs = wait.as_secs(),
            "We got next day, waiting until tomorrow to get future next day"
        );
        wait
    } else {
        let wait = jittered(seconds_until(now, &confirmation), rng);
        info!(
            wait_secs = wait.as_secs(),
            "We got next day, waiting until confirmation hour"
        );
        wait
    }
}

fn seconds_until(now: &DateTime<Tz>, target: &DateTime<Tz>) -> u64 {
    u64::try_from((*target - *now).num_seconds()).unwrap_or(0)
}

fn jittered<R: Rng + ?Sized>(base: u64, rng: &mut R) -> Duration {
    Duration::from_secs(rng.gen_range(base..base + JITTER_SECS))
}

fn fallback_wait<R: Rng + ?Sized>(rng: &mut R) -> Duration {
    let wait = Duration::from_secs(rng.gen_range(FALLBACK_MIN_SECS..FALLBACK_MAX_SECS));
    warn!(
        wait_secs = wait.as_secs(),
        "Unexpected delta encountered between today and last result, waiting as fallback"
    );
    wait
}
