// ABOUTME: Signal-day domain models for the demand-response calendar
// ABOUTME: SignalDay interval records and the SignalValue code mapping
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

use crate::constants::api::{
    SIGNAL_EXPLICIT, SIGNAL_EXPLICIT_IMPLICIT, SIGNAL_IMPLICIT, SIGNAL_NOT_REPORTED,
};
use crate::constants::signal_names;
use chrono::{DateTime, FixedOffset, TimeZone};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Demand-response code of one signal day
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "i64", into = "i64")]
pub enum SignalValue {
    /// No demand reduction reported
    NotReported,
    /// Explicit demand reduction requested
    Explicit,
    /// Implicit demand reduction requested
    Implicit,
    /// Explicit and implicit demand reduction requested
    ExplicitImplicit,
    /// Code not described by the API guide, kept verbatim
    Unknown(i64),
}

impl SignalValue {
    /// Raw `aoe_signals` code
    #[must_use]
    pub const fn code(self) -> i64 {
        match self {
            Self::NotReported => SIGNAL_NOT_REPORTED,
            Self::Explicit => SIGNAL_EXPLICIT,
            Self::Implicit => SIGNAL_IMPLICIT,
            Self::ExplicitImplicit => SIGNAL_EXPLICIT_IMPLICIT,
            Self::Unknown(code) => code,
        }
    }

    /// Reader-facing name
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::NotReported => signal_names::NOT_REPORTED,
            Self::Explicit => signal_names::EXPLICIT,
            Self::Implicit => signal_names::IMPLICIT,
            Self::ExplicitImplicit => signal_names::EXPLICIT_IMPLICIT,
            Self::Unknown(_) => signal_names::UNKNOWN,
        }
    }

    /// Whether the code is one the API guide describes
    #[must_use]
    pub const fn is_known(self) -> bool {
        !matches!(self, Self::Unknown(_))
    }
}

impl From<i64> for SignalValue {
    fn from(code: i64) -> Self {
        match code {
            SIGNAL_NOT_REPORTED => Self::NotReported,
            SIGNAL_EXPLICIT => Self::Explicit,
            SIGNAL_IMPLICIT => Self::Implicit,
            SIGNAL_EXPLICIT_IMPLICIT => Self::ExplicitImplicit,
            other => Self::Unknown(other),
        }
    }
}

impl From<SignalValue> for i64 {
    fn from(value: SignalValue) -> Self {
        value.code()
    }
}

impl fmt::Display for SignalValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One calendar interval during which a demand-response code is in effect
///
/// `start` is inclusive and `end` exclusive. Collections of signal days keep the
/// API order, newest day first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "SignalDayFields")]
pub struct SignalDay {
    /// Inclusive lower bound
    pub start: DateTime<FixedOffset>,
    /// Exclusive upper bound
    pub end: DateTime<FixedOffset>,
    /// Demand-response code
    pub value: SignalValue,
    /// Last upstream revision
    pub updated: DateTime<FixedOffset>,
}

/// Unchecked wire shape of a [`SignalDay`]
#[derive(Deserialize)]
struct SignalDayFields {
    start: DateTime<FixedOffset>,
    end: DateTime<FixedOffset>,
    value: SignalValue,
    updated: DateTime<FixedOffset>,
}

impl TryFrom<SignalDayFields> for SignalDay {
    type Error = &'static str;

    fn try_from(fields: SignalDayFields) -> Result<Self, Self::Error> {
        Self::new(fields.start, fields.end, fields.value, fields.updated)
            .ok_or("signal day start must be before its end")
    }
}

impl SignalDay {
    /// Build a signal day, returning `None` when `start` is not before `end`
    #[must_use]
    pub fn new(
        start: DateTime<FixedOffset>,
        end: DateTime<FixedOffset>,
        value: SignalValue,
        updated: DateTime<FixedOffset>,
    ) -> Option<Self> {
        (start < end).then_some(Self {
            start,
            end,
            value,
            updated,
        })
    }

    /// Whether `instant` falls inside `[start, end)`
    #[must_use]
    pub fn contains<Z: TimeZone>(&self, instant: &DateTime<Z>) -> bool {
        let instant = instant.fixed_offset();
        self.start <= instant && instant < self.end
    }

    /// Whether the day begins strictly after `instant`
    #[must_use]
    pub fn starts_after<Z: TimeZone>(&self, instant: &DateTime<Z>) -> bool {
        instant.fixed_offset() < self.start
    }
}
