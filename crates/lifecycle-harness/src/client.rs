//! Service capability boundary.
//!
//! The harness treats the remote service as an opaque capability: something
//! that executes a built request and yields a response or a captured
//! failure, in both blocking and async flavors. Wire format, retries and
//! transport concerns all live behind this boundary.

use async_trait::async_trait;

use crate::response::DispatchResult;

/// Executes one built request against the service under test.
///
/// Implemented per request type so a single client can serve every
/// lifecycle operation. The blocking and async paths must be semantically
/// equivalent; they exist so both invocation styles of the subject's API
/// surface get exercised.
#[async_trait]
pub trait Execute<Req: Send + 'static>: Send + Sync {
    /// Execute the request, blocking inline.
    fn execute(&self, req: Req) -> DispatchResult;

    /// Execute the request asynchronously.
    async fn execute_async(&self, req: Req) -> DispatchResult;
}

/// One-time environment preparation for integration runs.
///
/// Invoked at most once per sequencer instance, before the first real
/// dispatch, whichever operation happens to trigger it; never invoked when
/// integration mode is off.
#[async_trait]
pub trait IntegrationSetup: Send + Sync {
    /// Prepare the remote environment (seed data, indices, fixtures).
    async fn prepare(&self);
}
