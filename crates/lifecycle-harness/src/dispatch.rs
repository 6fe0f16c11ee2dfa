//! Variant dispatcher: fans one logical operation out across its variants.
//!
//! Dispatch order within one operation is fixed: fluent-sync runs inline,
//! then the fluent-async future is created, structured-sync runs inline,
//! the structured-async future is created, and the two async futures are
//! awaited together. The sync variants therefore execute in program order,
//! the async variants initiate in program order and may complete in either
//! order, and all variants have completed before the aggregated map is
//! returned.

use std::sync::Arc;

use futures::future::BoxFuture;
use futures::FutureExt;

use crate::client::{Execute, IntegrationSetup};
use crate::ident::VariantIds;
use crate::response::{DispatchResult, VariantResponses};
use crate::sequencer::LifecycleStep;
use crate::variant::CallVariant;

/// Blocking invocation of one variant against its identifier.
pub type SyncVariantCall = Box<dyn Fn(&str) -> DispatchResult + Send + Sync>;

/// Async invocation of one variant against its identifier.
pub type AsyncVariantCall = Box<dyn Fn(String) -> BoxFuture<'static, DispatchResult> + Send + Sync>;

/// The four per-variant invocation closures for one logical operation.
///
/// Subjects usually build these with [`VariantCalls::wire`] from a pair of
/// request builders plus a client; raw closures are accepted for subjects
/// whose call shape does not fit the builder/client split.
pub struct VariantCalls {
    /// Fluent construction, blocking execution.
    pub fluent: SyncVariantCall,
    /// Fluent construction, async execution.
    pub fluent_async: AsyncVariantCall,
    /// Structured construction, blocking execution.
    pub structured: SyncVariantCall,
    /// Structured construction, async execution.
    pub structured_async: AsyncVariantCall,
}

impl VariantCalls {
    /// Wire the four variants from two request builders and a client.
    ///
    /// The fluent and structured builders produce the request for their
    /// construction style; each style is then executed through both the
    /// blocking and async paths of the capability.
    pub fn wire<C, Fq, Sq, FB, SB>(client: Arc<C>, fluent: FB, structured: SB) -> Self
    where
        C: Execute<Fq> + Execute<Sq> + 'static,
        Fq: Send + 'static,
        Sq: Send + 'static,
        FB: Fn(&str) -> Fq + Send + Sync + 'static,
        SB: Fn(&str) -> Sq + Send + Sync + 'static,
    {
        let fluent = Arc::new(fluent);
        let structured = Arc::new(structured);

        let fluent_sync: SyncVariantCall = {
            let client = client.clone();
            let build = fluent.clone();
            Box::new(move |id| client.execute((*build)(id)))
        };
        let fluent_async: AsyncVariantCall = {
            let client = client.clone();
            Box::new(move |id| {
                let req = (*fluent)(&id);
                let client = client.clone();
                async move { client.execute_async(req).await }.boxed()
            })
        };
        let structured_sync: SyncVariantCall = {
            let client = client.clone();
            let build = structured.clone();
            Box::new(move |id| client.execute((*build)(id)))
        };
        let structured_async: AsyncVariantCall = Box::new(move |id| {
            let req = (*structured)(&id);
            let client = client.clone();
            async move { client.execute_async(req).await }.boxed()
        });

        Self {
            fluent: fluent_sync,
            fluent_async,
            structured: structured_sync,
            structured_async,
        }
    }
}

/// One-shot guard around the integration setup hook.
///
/// Shared by every cell of a sequencer so the hook runs exactly once,
/// before the first real dispatch, whichever operation resolves first.
pub(crate) struct SetupOnce {
    hook: Arc<dyn IntegrationSetup>,
    once: tokio::sync::OnceCell<()>,
}

impl SetupOnce {
    pub(crate) fn new(hook: Arc<dyn IntegrationSetup>) -> Self {
        Self {
            hook,
            once: tokio::sync::OnceCell::new(),
        }
    }

    pub(crate) async fn ensure(&self) {
        self.once
            .get_or_init(|| async {
                tracing::debug!("running integration setup");
                self.hook.prepare().await;
            })
            .await;
    }
}

/// Execute one logical operation across its variants.
///
/// With `one_variant` set only fluent-sync runs and the map has a single
/// entry (useful for capturing a clean reproduction trace).
pub(crate) async fn dispatch_all(
    step: &LifecycleStep,
    calls: &VariantCalls,
    ids: &VariantIds,
    one_variant: bool,
) -> VariantResponses {
    let mut responses = VariantResponses::new();

    let outcome = (calls.fluent)(ids.get(CallVariant::FluentSync));
    responses.insert(CallVariant::FluentSync, outcome);
    if one_variant {
        tracing::debug!(step = %step, "single-variant dispatch");
        return responses;
    }

    let fluent_async = (calls.fluent_async)(ids.get(CallVariant::FluentAsync).to_owned());

    let outcome = (calls.structured)(ids.get(CallVariant::StructuredSync));
    responses.insert(CallVariant::StructuredSync, outcome);

    let structured_async =
        (calls.structured_async)(ids.get(CallVariant::StructuredAsync).to_owned());

    let (fluent_out, structured_out) = futures::join!(fluent_async, structured_async);
    responses.insert(CallVariant::FluentAsync, fluent_out);
    responses.insert(CallVariant::StructuredAsync, structured_out);

    responses
}
