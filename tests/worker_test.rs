// ABOUTME: Integration tests for the signal worker lifecycle and cache updates
// ABOUTME: Uses scripted signal sources and a mock API to exercise start, stop and join
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org
#![allow(clippy::unwrap_used)]

mod common;

use async_trait::async_trait;
use common::{
    endpoints_for, init_test_logging, mount_signals, mount_token_grant, test_credentials,
    two_day_payload,
};
use rte_signals::datetime::parse_timestamp;
use rte_signals::http_client::create_client;
use rte_signals::signals::{SignalApiClient, SignalSource};
use rte_signals::worker::{run_cycle, SignalCache};
use rte_signals::{SignalDay, SignalError, SignalResult, SignalValue, SignalWorker};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::time::{sleep, timeout};
use wiremock::{MockServer, ResponseTemplate};

/// Source whose fetches always fail, counting calls
struct FailingSource {
    fetches: Arc<AtomicUsize>,
    grants: Arc<AtomicUsize>,
}

#[async_trait]
impl SignalSource for FailingSource {
    fn has_token(&self) -> bool {
        false
    }

    async fn ensure_token(&mut self) -> SignalResult<()> {
        self.grants.fetch_add(1, Ordering::SeqCst);
        Err(SignalError::token("grant refused"))
    }

    async fn fetch_signal_days(&mut self) -> SignalResult<Vec<SignalDay>> {
        self.fetches.fetch_add(1, Ordering::SeqCst);
        Err(SignalError::transport("connection refused"))
    }
}

/// Source returning a fixed calendar
struct FixedSource(Vec<SignalDay>);

#[async_trait]
impl SignalSource for FixedSource {
    fn has_token(&self) -> bool {
        true
    }

    async fn ensure_token(&mut self) -> SignalResult<()> {
        Ok(())
    }

    async fn fetch_signal_days(&mut self) -> SignalResult<Vec<SignalDay>> {
        Ok(self.0.clone())
    }
}

fn explicit_day() -> SignalDay {
    SignalDay::new(
        parse_timestamp("2025-01-01T00:00:00+01:00").unwrap(),
        parse_timestamp("2025-01-02T00:00:00+01:00").unwrap(),
        SignalValue::Explicit,
        parse_timestamp("2024-12-31T11:00:00+01:00").unwrap(),
    )
    .unwrap()
}

async fn wait_for_cache(worker: &SignalWorker, len: usize) {
    timeout(Duration::from_secs(5), async {
        while worker.signal_days().len() != len {
            sleep(Duration::from_millis(20)).await;
        }
    })
    .await
    .unwrap();
}

#[tokio::test]
async fn test_worker_populates_cache_from_api() {
    init_test_logging();
    let server = MockServer::start().await;
    mount_token_grant(&server, "token-1").await;
    mount_signals(
        &server,
        "token-1",
        ResponseTemplate::new(200).set_body_json(two_day_payload()),
    )
    .await;

    let client = SignalApiClient::new(create_client(), test_credentials(), &endpoints_for(&server));
    let mut worker = SignalWorker::with_source(client);
    assert!(worker.signal_days().is_empty());

    worker.start();
    wait_for_cache(&worker, 2).await;

    let days = worker.signal_days();
    assert_eq!(days[0].value, SignalValue::NotReported);
    assert_eq!(days[1].value, SignalValue::Explicit);

    worker.stop("test");
    timeout(Duration::from_secs(2), worker.join()).await.unwrap();
    assert!(!worker.is_running());
}

#[tokio::test]
async fn test_stop_interrupts_wait_promptly() {
    init_test_logging();
    let fetches = Arc::new(AtomicUsize::new(0));
    let grants = Arc::new(AtomicUsize::new(0));
    let mut worker = SignalWorker::with_source(FailingSource {
        fetches: Arc::clone(&fetches),
        grants: Arc::clone(&grants),
    });

    worker.start();
    timeout(Duration::from_secs(2), async {
        while fetches.load(Ordering::SeqCst) == 0 {
            sleep(Duration::from_millis(10)).await;
        }
    })
    .await
    .unwrap();

    // The worker is now in its 10 minute retry wait
    assert!(worker.is_running());
    worker.stop("test");
    timeout(Duration::from_secs(2), worker.join()).await.unwrap();

    assert_eq!(fetches.load(Ordering::SeqCst), 1);
    assert_eq!(grants.load(Ordering::SeqCst), 1);
    assert!(worker.signal_days().is_empty());
}

#[tokio::test]
async fn test_stop_is_idempotent() {
    init_test_logging();
    let mut worker = SignalWorker::with_source(FixedSource(vec![explicit_day()]));
    worker.start();
    wait_for_cache(&worker, 1).await;

    worker.stop("first");
    worker.stop("second");
    assert!(worker.is_stopped());
    timeout(Duration::from_secs(2), worker.join()).await.unwrap();

    worker.stop("after join");
    worker.join().await;
}

#[tokio::test]
async fn test_second_start_is_ignored() {
    init_test_logging();
    let mut worker = SignalWorker::with_source(FixedSource(vec![explicit_day()]));
    worker.start();
    worker.start();
    wait_for_cache(&worker, 1).await;
    assert!(worker.is_running());

    worker.stop("test");
    timeout(Duration::from_secs(2), worker.join()).await.unwrap();
}

#[tokio::test]
async fn test_stop_before_start_never_fetches() {
    init_test_logging();
    let fetches = Arc::new(AtomicUsize::new(0));
    let mut worker = SignalWorker::with_source(FailingSource {
        fetches: Arc::clone(&fetches),
        grants: Arc::new(AtomicUsize::new(0)),
    });

    worker.stop("early");
    worker.start();
    timeout(Duration::from_secs(2), worker.join()).await.unwrap();
    assert_eq!(fetches.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_failed_cycle_keeps_previous_cache() {
    init_test_logging();
    let cache = SignalCache::new();

    let mut fixed = FixedSource(vec![explicit_day()]);
    let freshest = run_cycle(&mut fixed, &cache).await;
    assert_eq!(cache.len(), 1);
    assert_eq!(freshest.unwrap().to_rfc3339(), "2025-01-01T00:00:00+01:00");

    let mut failing = FailingSource {
        fetches: Arc::new(AtomicUsize::new(0)),
        grants: Arc::new(AtomicUsize::new(0)),
    };
    assert!(run_cycle(&mut failing, &cache).await.is_none());
    assert_eq!(cache.len(), 1);
}

#[tokio::test]
async fn test_empty_success_clears_cache() {
    init_test_logging();
    let cache = SignalCache::new();
    run_cycle(&mut FixedSource(vec![explicit_day()]), &cache).await;
    assert_eq!(cache.len(), 1);

    let freshest = run_cycle(&mut FixedSource(Vec::new()), &cache).await;
    assert!(freshest.is_none());
    assert!(cache.is_empty());
}
