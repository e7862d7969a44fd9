// ABOUTME: Background worker polling the signal endpoint and caching the latest calendar
// ABOUTME: One tokio task runs fetch, cache update and adaptive wait until stop is requested
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

//! # Signal Worker
//!
//! [`SignalWorker`] owns a single background task. Each cycle it makes sure a
//! token is held, fetches the calendar, replaces the cache on success and then
//! sleeps for the duration computed by [`compute_wait_time`]. A stop request
//! interrupts the sleep immediately; a fetch already in flight is allowed to
//! finish.
//!
//! Upstream failures never end the task: they are logged and the next cycle is
//! scheduled ten minutes later.

/// Shared in-memory signal calendar
pub mod cache;
/// Wait-time algorithm
pub mod schedule;

pub use cache::SignalCache;
pub use schedule::{compute_wait_time, freshest_day_midnight};

use crate::config::{ApiEndpoints, WorkerConfig};
use crate::http_client::shared_client;
use crate::oauth2_client::ClientCredentials;
use crate::signals::{SignalApiClient, SignalSource};
use chrono::DateTime;
use chrono_tz::Tz;
use rte_signals_core::datetime::france_now;
use rte_signals_core::SignalDay;
use std::sync::Arc;
use tokio::task::JoinHandle;
use tokio::time::sleep;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, warn};

/// Long-running signal worker
///
/// Readers use [`SignalWorker::signal_days`] or a cloned [`SignalCache`]; they
/// never call into the loop itself.
pub struct SignalWorker {
    source: Option<Box<dyn SignalSource>>,
    cache: SignalCache,
    cancel: CancellationToken,
    handle: Option<JoinHandle<()>>,
}

impl SignalWorker {
    /// Create a worker for the production endpoints
    #[must_use]
    pub fn new(credentials: ClientCredentials) -> Self {
        Self::from_endpoints(credentials, &ApiEndpoints::default())
    }

    /// Create a worker from a loaded configuration
    #[must_use]
    pub fn from_config(config: &WorkerConfig) -> Self {
        Self::from_endpoints(config.credentials.clone(), &config.endpoints)
    }

    /// Create a worker against explicit endpoints
    #[must_use]
    pub fn from_endpoints(credentials: ClientCredentials, endpoints: &ApiEndpoints) -> Self {
        let client = SignalApiClient::new(shared_client().clone(), credentials, endpoints);
        Self::with_source(client)
    }

    /// Create a worker driven by any signal source
    #[must_use]
    pub fn with_source(source: impl SignalSource + 'static) -> Self {
        Self {
            source: Some(Box::new(source)),
            cache: SignalCache::new(),
            cancel: CancellationToken::new(),
            handle: None,
        }
    }

    /// Spawn the background task
    ///
    /// Must be called from within a tokio runtime. Calling it again is a no-op.
    pub fn start(&mut self) {
        let Some(source) = self.source.take() else {
            warn!("Signal worker already started, ignoring start request");
            return;
        };
        let cache = self.cache.clone();
        let cancel = self.cancel.clone();
        self.handle = Some(tokio::spawn(run_loop(source, cache, cancel)));
    }

    /// Request the worker to stop
    ///
    /// Safe to call any number of times, from any thread; only the first call
    /// has an effect but every call is logged.
    pub fn stop(&self, reason: &str) {
        info!(
            reason,
            "Stopping RTE demand response signal worker (received {reason})"
        );
        self.cancel.cancel();
    }

    /// Whether a stop has been requested
    #[must_use]
    pub fn is_stopped(&self) -> bool {
        self.cancel.is_cancelled()
    }

    /// Whether the background task is alive
    #[must_use]
    pub fn is_running(&self) -> bool {
        self.handle
            .as_ref()
            .is_some_and(|handle| !handle.is_finished())
    }

    /// Latest cached calendar, newest day first; may be empty
    #[must_use]
    pub fn signal_days(&self) -> Arc<[SignalDay]> {
        self.cache.snapshot()
    }

    /// Cloneable read handle on the cache
    #[must_use]
    pub fn cache(&self) -> SignalCache {
        self.cache.clone()
    }

    /// Wait for the background task to finish
    ///
    /// Returns immediately if the worker was never started.
    pub async fn join(&mut self) {
        if let Some(handle) = self.handle.take() {
            if let Err(e) = handle.await {
                error!("Signal worker task failed: {e}");
            }
        }
    }
}

impl Drop for SignalWorker {
    fn drop(&mut self) {
        // The task must not outlive its owner
        self.cancel.cancel();
    }
}

/// Run one fetch cycle and update the cache
///
/// Returns the freshest day at midnight, or `None` when the fetch failed or
/// returned no day. The cache is left untouched on failure.
pub async fn run_cycle(source: &mut dyn SignalSource, cache: &SignalCache) -> Option<DateTime<Tz>> {
    match source.fetch_signal_days().await {
        Ok(days) => {
            let freshest = freshest_day_midnight(&days);
            info!(days = days.len(), "Signal calendar updated");
            cache.replace(days);
            freshest
        }
        Err(e) => {
            error!(error.category = e.category(), "API request failed: {e}");
            None
        }
    }
}

async fn run_loop(
    mut source: Box<dyn SignalSource>,
    cache: SignalCache,
    cancel: CancellationToken,
) {
    info!("Starting signal worker");

    while !cancel.is_cancelled() {
        if !source.has_token() {
            if let Err(e) = source.ensure_token().await {
                debug!(error.category = e.category(), "Initial token grant failed: {e}");
            }
        }

        let now = france_now();
        let freshest = run_cycle(source.as_mut(), &cache).await;
        let wait = {
            let mut rng = rand::thread_rng();
            compute_wait_time(&now, freshest.as_ref(), &mut rng)
        };

        tokio::select! {
            () = cancel.cancelled() => break,
            () = sleep(wait) => {}
        }
    }

    info!("Signal worker stopped");
}
