//! Fully wired lifecycle fixtures over the mock service.
//!
//! These builders wire every operation's fluent and structured request
//! styles against a shared [`MockService`], so harness tests only choose
//! capabilities and which operations to register.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use lifecycle_harness::{
    IdentifierGenerator, IntegrationSetup, LifecycleBuilder, VariantCalls,
};

use crate::requests::{CreateRequest, DeleteRequest, ExistsRequest, ReadRequest, UpdateRequest};
use crate::service::MockService;

/// Variant calls for the create operation.
pub fn create_calls(service: &Arc<MockService>) -> VariantCalls {
    VariantCalls::wire(
        service.clone(),
        |id| CreateRequest::for_resource(id).payload("seeded"),
        |id| CreateRequest {
            id: id.to_owned(),
            payload: "seeded".to_owned(),
        },
    )
}

/// Variant calls for the read operation.
pub fn read_calls(service: &Arc<MockService>) -> VariantCalls {
    VariantCalls::wire(
        service.clone(),
        |id| ReadRequest::for_resource(id),
        |id| ReadRequest { id: id.to_owned() },
    )
}

/// Variant calls for the update operation.
pub fn update_calls(service: &Arc<MockService>) -> VariantCalls {
    VariantCalls::wire(
        service.clone(),
        |id| UpdateRequest::for_resource(id).payload("updated"),
        |id| UpdateRequest {
            id: id.to_owned(),
            payload: "updated".to_owned(),
        },
    )
}

/// Variant calls for the existence check.
pub fn exists_calls(service: &Arc<MockService>) -> VariantCalls {
    VariantCalls::wire(
        service.clone(),
        |id| ExistsRequest::for_resource(id),
        |id| ExistsRequest { id: id.to_owned() },
    )
}

/// Variant calls for the delete operation.
pub fn delete_calls(service: &Arc<MockService>) -> VariantCalls {
    VariantCalls::wire(
        service.clone(),
        |id| DeleteRequest::for_resource(id),
        |id| DeleteRequest { id: id.to_owned() },
    )
}

/// A lifecycle builder with all five operations wired against the mock.
pub fn full_lifecycle(service: &Arc<MockService>) -> LifecycleBuilder {
    LifecycleBuilder::new("MockResourceCrud")
        .create(create_calls(service))
        .read(read_calls(service))
        .update(update_calls(service))
        .exists(exists_calls(service))
        .delete(delete_calls(service))
}

/// Deterministic identifier generator: `<variant-prefix>-fixed`.
///
/// Lets tests assert exact identifier reuse across steps.
pub fn fixed_generator() -> IdentifierGenerator {
    Arc::new(|variant| format!("{}-fixed", variant.id_prefix()))
}

/// Integration setup hook that counts its invocations.
#[derive(Debug, Default)]
pub struct CountingSetup {
    invocations: AtomicUsize,
}

impl CountingSetup {
    /// A fresh counter.
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// How many times the hook ran.
    pub fn invocations(&self) -> usize {
        self.invocations.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl IntegrationSetup for CountingSetup {
    async fn prepare(&self) {
        self.invocations.fetch_add(1, Ordering::SeqCst);
    }
}
