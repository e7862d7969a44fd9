// ABOUTME: Scheduling constants for the adaptive polling wait-time algorithm
// ABOUTME: Confirmation hour, jitter windows and the fixed civil timezone
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

use chrono_tz::Tz;

/// Civil timezone used for every scheduling decision
pub const FRANCE_TZ: Tz = chrono_tz::Europe::Paris;

/// Hour after which the next day's signal is considered published
pub const CONFIRM_HOUR: u32 = 10;

/// Minute component of the confirmation time
pub const CONFIRM_MIN: u32 = 45;

/// Wait after a failed fetch
pub const RETRY_WAIT_SECS: u64 = 600; // 10 minutes

/// Upper bound (exclusive) of the jitter added to scheduled waits
pub const JITTER_SECS: u64 = 900; // 15 minutes

/// Nominal fallback wait when no future day is known
pub const FALLBACK_WAIT_SECS: u64 = 3_600; // 1 hour

/// Fallback lower bound (5/6 of the nominal wait)
pub const FALLBACK_MIN_SECS: u64 = FALLBACK_WAIT_SECS * 5 / 6;

/// Fallback upper bound, exclusive (7/6 of the nominal wait)
pub const FALLBACK_MAX_SECS: u64 = FALLBACK_WAIT_SECS * 7 / 6;
