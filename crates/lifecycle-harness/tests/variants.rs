//! Variant fan-out and identifier-stability tests.

use std::collections::BTreeSet;

use lifecycle_harness::{CallVariant, Capabilities, LifecycleStep};
use lifecycle_testkit::{fixed_generator, full_lifecycle, MockService, OpKind};

#[tokio::test]
async fn four_variants_fan_out_with_distinct_identifiers() {
    let service = MockService::new();
    let lifecycle = full_lifecycle(&service).build().unwrap();

    lifecycle.create_call_is_valid().await.unwrap();

    let creates = service.records_of(OpKind::Create);
    assert_eq!(creates.len(), 4);
    let ids: BTreeSet<_> = creates.iter().map(|r| r.id.clone()).collect();
    assert_eq!(ids.len(), 4, "variants must never share a resource");

    let responses = lifecycle
        .resolve_through(&LifecycleStep::Create)
        .await
        .unwrap();
    assert_eq!(responses.len(), 4);
}

#[tokio::test]
async fn single_variant_mode_produces_one_entry() {
    let service = MockService::new();
    let lifecycle = full_lifecycle(&service)
        .capabilities(Capabilities {
            test_only_one_variant: true,
            ..Capabilities::default()
        })
        .build()
        .unwrap();

    let responses = lifecycle
        .resolve_through(&LifecycleStep::Create)
        .await
        .unwrap();

    assert_eq!(responses.len(), 1);
    assert!(responses.contains_key(&CallVariant::FluentSync));
    assert_eq!(service.dispatch_count(), 1);
}

#[tokio::test]
async fn reads_reuse_the_create_identifier_per_variant() {
    let service = MockService::new();
    let lifecycle = full_lifecycle(&service)
        .identifier_generator(fixed_generator())
        .build()
        .unwrap();

    lifecycle.get_after_create_is_valid().await.unwrap();

    for variant in CallVariant::all() {
        let expected = format!("{}-fixed", variant.id_prefix());
        assert!(
            service
                .records_of(OpKind::Create)
                .iter()
                .any(|r| r.id == expected),
            "create missing identifier {expected}"
        );
        assert!(
            service
                .records_of(OpKind::Read)
                .iter()
                .any(|r| r.id == expected),
            "read did not reuse identifier {expected}"
        );
    }
}
