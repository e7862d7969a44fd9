// ABOUTME: Core types and constants for the RTE demand-response signal worker
// ABOUTME: Foundation crate with signal-day models, timestamp codec, errors and HTTP classification
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

#![deny(unsafe_code)]

//! # RTE Signals Core
//!
//! Foundation crate providing the pure, I/O-free pieces of the signal worker.
//! Nothing in here talks to the network or spawns tasks, which keeps it cheap to
//! test and lets the worker crate focus on scheduling and HTTP plumbing.
//!
//! ## Modules
//!
//! - **constants**: Upstream endpoints, payload keys, scheduling constants
//! - **datetime**: Codec for the upstream `±hh:mm` timestamp format
//! - **classifier**: Maps an HTTP status and body to a typed API outcome
//! - **errors**: `SignalError` taxonomy shared by every component
//! - **models**: `SignalDay` and `SignalValue`

/// Upstream API constants, payload keys and scheduling values
pub mod constants;

/// HTTP response classification (status + body to typed outcome)
pub mod classifier;

/// Timestamp codec for the upstream API format
pub mod datetime;

/// Error taxonomy for token, transport, API and payload failures
pub mod errors;

/// Signal-day domain models
pub mod models;

pub use classifier::{classify_response, ApiFault, ApiStatus, FaultKind};
pub use errors::{SignalError, SignalResult};
pub use models::{SignalDay, SignalValue};
