//! At-most-once execution and failure-capture tests.

use std::sync::Arc;

use lifecycle_harness::{Capabilities, HarnessError, LifecycleStep};
use lifecycle_testkit::{full_lifecycle, MockService, OpKind};

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_checks_share_one_dispatch() {
    let service = MockService::new();
    let lifecycle = Arc::new(full_lifecycle(&service).build().unwrap());

    let mut handles = Vec::new();
    for _ in 0..8 {
        let lifecycle = lifecycle.clone();
        handles.push(tokio::spawn(async move {
            lifecycle.create_call_is_valid().await.unwrap();
            lifecycle.get_after_create_is_valid().await.unwrap();
        }));
    }
    for handle in handles {
        handle.await.unwrap();
    }

    // One dispatch per variant per step, no matter how many callers.
    assert_eq!(service.count_of(OpKind::Create), 4);
    assert_eq!(service.count_of(OpKind::Read), 4);
}

#[tokio::test]
async fn resolve_through_returns_the_same_result_reference() {
    let service = MockService::new();
    let lifecycle = full_lifecycle(&service).build().unwrap();

    let first = lifecycle
        .resolve_through(&LifecycleStep::Create)
        .await
        .unwrap();
    let second = lifecycle
        .resolve_through(&LifecycleStep::Create)
        .await
        .unwrap();

    assert!(Arc::ptr_eq(&first, &second));
    assert_eq!(service.count_of(OpKind::Create), 4);
}

#[tokio::test]
async fn captured_failures_are_redelivered_not_retried() {
    let service = MockService::new();
    service.inject_failure(OpKind::Create);
    let lifecycle = full_lifecycle(&service)
        .capabilities(Capabilities {
            test_only_one_variant: true,
            ..Capabilities::default()
        })
        .build()
        .unwrap();

    let first = lifecycle.create_call_is_valid().await.unwrap_err();
    let second = lifecycle.create_call_is_valid().await.unwrap_err();

    assert!(matches!(first, HarnessError::Dispatch { .. }));
    assert_eq!(first.to_string(), second.to_string());
    assert_eq!(service.count_of(OpKind::Create), 1);

    // Dependent steps still run and observe the downstream state coherently:
    // nothing was created, so the read-back is invalid, not missing.
    let read_err = lifecycle.get_after_create_is_valid().await.unwrap_err();
    assert!(matches!(read_err, HarnessError::Assertion { .. }));
    assert_eq!(service.count_of(OpKind::Read), 1);
}
