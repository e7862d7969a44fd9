// ABOUTME: In-memory cache holding the latest signal calendar as an immutable snapshot
// ABOUTME: Single writer (the worker task), any number of readers on any thread
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

use rte_signals_core::SignalDay;
use std::sync::{Arc, PoisonError, RwLock};

/// Latest signal calendar, replaced wholesale after each successful fetch
///
/// Uses `Arc<RwLock<Arc<[SignalDay]>>>`: the lock is only held to clone or swap
/// the inner `Arc`, so a reader always gets a complete list and never waits on
/// a fetch.
#[derive(Debug, Clone)]
pub struct SignalCache {
    days: Arc<RwLock<Arc<[SignalDay]>>>,
}

impl SignalCache {
    /// Create an empty cache
    #[must_use]
    pub fn new() -> Self {
        Self {
            days: Arc::new(RwLock::new(Arc::from(Vec::new()))),
        }
    }

    /// Current calendar, newest day first
    #[must_use]
    pub fn snapshot(&self) -> Arc<[SignalDay]> {
        let guard = self.days.read().unwrap_or_else(PoisonError::into_inner);
        Arc::clone(&guard)
    }

    /// Replace the calendar with a freshly fetched one
    pub fn replace(&self, days: Vec<SignalDay>) {
        let days: Arc<[SignalDay]> = Arc::from(days);
        let mut guard = self.days.write().unwrap_or_else(PoisonError::into_inner);
        *guard = days;
    }

    /// Number of cached days
    #[must_use]
    pub fn len(&self) -> usize {
        self.snapshot().len()
    }

    /// Whether no day is cached
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.snapshot().is_empty()
    }
}

impl Default for SignalCache {
    fn default() -> Self {
        Self::new()
    }
}
