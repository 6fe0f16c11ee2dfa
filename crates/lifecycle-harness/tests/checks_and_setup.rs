//! Assertion-surface error reporting and integration-setup tests.

use lifecycle_harness::{Capabilities, HarnessConfig, HarnessError, LifecycleStep};
use lifecycle_testkit::{
    full_lifecycle, CountingSetup, CreateResponse, ExistsResponse, MockService, ReadResponse,
};

fn single_variant() -> Capabilities {
    Capabilities {
        test_only_one_variant: true,
        ..Capabilities::default()
    }
}

#[tokio::test]
async fn unknown_after_create_key_is_a_configuration_error() {
    let service = MockService::new();
    let lifecycle = full_lifecycle(&service).build().unwrap();

    let err = lifecycle
        .assert_on_after_create::<ReadResponse, _>("missing-key", |_| Ok(()))
        .await
        .unwrap_err();

    assert!(matches!(err, HarnessError::UnknownAfterCreateKey { .. }));
    assert!(err.to_string().contains("missing-key"));
    // The error aborts before anything is resolved.
    assert_eq!(service.dispatch_count(), 0);
}

#[tokio::test]
async fn resolving_an_unregistered_step_dispatches_nothing() {
    let service = MockService::new();
    let lifecycle = full_lifecycle(&service)
        .capabilities(single_variant())
        .build()
        .unwrap();

    // Bypass the guarded entry point; the sequencer itself must refuse
    // the step before any predecessor resolves.
    let err = lifecycle
        .assert_on_all::<ReadResponse, _>(LifecycleStep::AfterCreate("typo".into()), |_| Ok(()))
        .await
        .unwrap_err();

    assert!(matches!(err, HarnessError::UnknownAfterCreateKey { .. }));
    assert_eq!(service.dispatch_count(), 0);
}

#[tokio::test]
async fn resolving_a_capability_disabled_step_dispatches_nothing() {
    let service = MockService::new();
    let lifecycle = full_lifecycle(&service)
        .capabilities(Capabilities {
            supports_deletes: false,
            test_only_one_variant: true,
            ..Capabilities::default()
        })
        .build()
        .unwrap();

    let err = lifecycle
        .assert_on_all::<ReadResponse, _>(LifecycleStep::Delete, |_| Ok(()))
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        HarnessError::MissingStep {
            step: LifecycleStep::Delete
        }
    ));
    assert_eq!(service.dispatch_count(), 0);
}

#[tokio::test]
async fn wrong_expected_response_type_is_a_configuration_error() {
    let service = MockService::new();
    let lifecycle = full_lifecycle(&service)
        .capabilities(single_variant())
        .build()
        .unwrap();

    let err = lifecycle
        .assert_on_all::<ExistsResponse, _>(LifecycleStep::Create, |_| Ok(()))
        .await
        .unwrap_err();

    assert!(matches!(err, HarnessError::ResponseTypeMismatch { .. }));
    assert!(err.to_string().contains("ExistsResponse"));
}

#[tokio::test]
async fn typed_predicates_see_concrete_responses() {
    let service = MockService::new();
    let lifecycle = full_lifecycle(&service).build().unwrap();

    lifecycle
        .assert_on_all::<CreateResponse, _>(LifecycleStep::Create, |r| {
            if r.acknowledged {
                Ok(())
            } else {
                Err("create not acknowledged".to_owned())
            }
        })
        .await
        .unwrap();

    lifecycle
        .assert_on_all::<ReadResponse, _>(LifecycleStep::ReadAfterUpdate, |r| {
            if r.payload.as_deref() == Some("updated") {
                Ok(())
            } else {
                Err(format!("payload not updated: {:?}", r.payload))
            }
        })
        .await
        .unwrap();
}

#[tokio::test]
async fn integration_setup_runs_once_whichever_check_comes_first() {
    let service = MockService::new();
    let setup = CountingSetup::new();
    let lifecycle = full_lifecycle(&service)
        .config(HarnessConfig {
            run_integration_tests: true,
        })
        .integration_setup(setup.clone())
        .capabilities(single_variant())
        .build()
        .unwrap();

    lifecycle.delete_not_found_is_not_valid().await.unwrap();
    lifecycle.create_call_is_valid().await.unwrap();
    lifecycle.exists_after_create_is_valid().await.unwrap();

    assert_eq!(setup.invocations(), 1);
}

#[tokio::test]
async fn integration_setup_is_skipped_in_fixture_mode() {
    let service = MockService::new();
    let setup = CountingSetup::new();
    let lifecycle = full_lifecycle(&service)
        .integration_setup(setup.clone())
        .capabilities(single_variant())
        .build()
        .unwrap();

    lifecycle.create_call_is_valid().await.unwrap();
    lifecycle.delete_call_is_valid().await.unwrap();

    assert_eq!(setup.invocations(), 0);
    assert!(service.dispatch_count() > 0);
}
