// ABOUTME: Main library entry point for the RTE demand-response signal worker
// ABOUTME: Token management, signal fetching, caching and adaptive scheduling
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

#![deny(unsafe_code)]

//! # RTE Signals
//!
//! A background worker that keeps an in-memory copy of the RTE demand-response
//! signal calendar ("jours signalés").
//!
//! ## Features
//!
//! - **OAuth2 client credentials**: token obtained on demand and refreshed once
//!   when the signal endpoint rejects it
//! - **Adaptive polling**: fetches right after the daily 10:45 confirmation and
//!   after midnight, with random jitter
//! - **Snapshot reads**: readers get an immutable copy of the last calendar
//!
//! ## Example
//!
//! ```rust,no_run
//! use rte_signals::oauth2_client::ClientCredentials;
//! use rte_signals::readings::SignalReadings;
//! use rte_signals::worker::SignalWorker;
//! use rte_signals::datetime::france_now;
//!
//! # async fn example() {
//! let mut worker = SignalWorker::new(ClientCredentials::new("client-id", "client-secret"));
//! worker.start();
//!
//! let readings = SignalReadings::observe(&worker.signal_days(), &france_now());
//! println!("current: {}, next: {}", readings.current, readings.next);
//!
//! worker.stop("shutdown");
//! worker.join().await;
//! # }
//! ```

/// Environment-based configuration
pub mod config;

/// One-shot credential self-test
pub mod credentials;

/// Shared HTTP client
pub mod http_client;

/// Structured logging setup
pub mod logging;

/// OAuth2 client-credentials grant and token state
pub mod oauth2_client;

/// Current / next readings derived from the cache
pub mod readings;

/// Signal endpoint client and payload parser
pub mod signals;

/// Background worker, cache and wait-time algorithm
pub mod worker;

// Re-export the core crate so callers need a single dependency
pub use rte_signals_core::{
    classifier, constants, datetime, errors, models, ApiFault, ApiStatus, FaultKind, SignalDay,
    SignalError, SignalResult, SignalValue,
};

pub use config::{ApiEndpoints, WorkerConfig};
pub use oauth2_client::ClientCredentials;
pub use readings::SignalReadings;
pub use worker::{SignalCache, SignalWorker};
