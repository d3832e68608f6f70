//! Probe classification against real sockets.

use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;
use std::time::Duration;

use health_checker::health::{FailureKind, Outcome, ProbeExecutor, ServerError};
use tokio::time::Instant;

mod common;

fn executor() -> ProbeExecutor {
    ProbeExecutor::new(&common::probe_config()).unwrap()
}

#[tokio::test]
async fn test_success_status_is_up() {
    let addr = common::start_fixed_backend(200, "ok").await;
    let outcome = executor().probe(&format!("http://{}/health", addr)).await;
    assert_eq!(outcome, Outcome::Up);
}

#[tokio::test]
async fn test_any_2xx_is_up() {
    let addr = common::start_fixed_backend(204, "").await;
    let outcome = executor().probe(&format!("http://{}", addr)).await;
    assert!(outcome.is_up());
}

#[tokio::test]
async fn test_non_success_carries_code_and_body() {
    let addr = common::start_fixed_backend(503, "maintenance").await;
    let outcome = executor().probe(&format!("http://{}", addr)).await;
    assert_eq!(outcome, Outcome::http(503, "maintenance"));
}

#[tokio::test]
async fn test_upstream_500_is_an_http_failure() {
    let addr = common::start_fixed_backend(500, "oops").await;
    let Outcome::Down(failure) = executor().probe(&format!("http://{}", addr)).await else {
        panic!("expected down");
    };
    let error = ServerError::from(failure);
    assert_eq!(error.status_code, 500);
    assert_eq!(error.body, "oops");
    assert_eq!(error.kind, FailureKind::Http);
}

#[tokio::test]
async fn test_refused_connection_is_transport_500() {
    let addr = common::refused_addr().await;
    let Outcome::Down(failure) = executor().probe(&format!("http://{}", addr)).await else {
        panic!("expected down");
    };
    assert_eq!(failure.kind(), FailureKind::Transport);
    assert_eq!(failure.status_code(), 500);
    assert!(!failure.body().trim().is_empty());
}

#[tokio::test]
async fn test_deadline_cancels_slow_probe() {
    let addr = common::start_slow_backend(Duration::from_secs(3)).await;
    let started = Instant::now();

    let outcome = executor()
        .probe_until(
            &format!("http://{}", addr),
            Instant::now() + Duration::from_millis(200),
        )
        .await;

    assert!(started.elapsed() < Duration::from_secs(2), "probe should be cut short");
    let Outcome::Down(failure) = outcome else {
        panic!("expected down");
    };
    assert_eq!(failure.kind(), FailureKind::Transport);
    assert_eq!(failure.status_code(), 500);
    assert!(failure.body().contains("deadline"));
}

#[tokio::test]
async fn test_single_attempt_per_probe() {
    let calls = Arc::new(AtomicU32::new(0));
    let counter = calls.clone();
    let addr = common::start_programmable_backend(move || {
        let counter = counter.clone();
        async move {
            counter.fetch_add(1, Ordering::SeqCst);
            (503, "busy".to_string())
        }
    })
    .await;

    let outcome = executor().probe(&format!("http://{}", addr)).await;
    assert!(!outcome.is_up());
    assert_eq!(calls.load(Ordering::SeqCst), 1, "no retries expected");
}
