#![deny(clippy::dbg_macro)]
#![deny(clippy::todo)]
//! # Lifecycle Harness
//!
//! Orchestration engine for exercising resource lifecycles (create → read →
//! exists → update → delete → re-read → delete-not-found) against a remote
//! service, guaranteeing that each underlying call executes exactly once no
//! matter how many assertions depend on it, and that calls run in lifecycle
//! order no matter which order a test runner schedules the assertions.
//!
//! ## Architecture
//!
//! - **variant / response / client**: the call variants, the opaque
//!   response surface, and the narrow service-capability boundary
//! - **ident**: per-variant resource identifiers, generated once per
//!   lifecycle and stable across every step
//! - **cell**: memoized single-execution, multi-observer call cells
//! - **dispatch**: fan-out of one logical operation across the variants
//! - **sequencer**: the capability-gated, order-enforcing cell chain and
//!   its two-phase builder
//! - **checks**: the named, idempotent assertion surface
//!
//! ## Usage
//!
//! ```rust,no_run
//! # use lifecycle_harness::{Capabilities, LifecycleBuilder, VariantCalls};
//! # fn calls() -> VariantCalls { unimplemented!() }
//! # async fn example() -> lifecycle_harness::Result<()> {
//! let lifecycle = LifecycleBuilder::new("RoleCrud")
//!     .capabilities(Capabilities::default())
//!     .create(calls())
//!     .read(calls())
//!     .update(calls())
//!     .delete(calls())
//!     .build()?;
//!
//! // Checks may run in any order; create still happens before delete.
//! lifecycle.delete_not_found_is_not_valid().await?;
//! lifecycle.create_call_is_valid().await?;
//! # Ok(())
//! # }
//! ```

pub mod checks;
pub mod client;
pub mod config;
pub mod dispatch;
pub mod error;
pub mod ident;
pub mod response;
pub mod sequencer;
pub mod variant;

mod cell;

// Re-export the working surface
pub use client::{Execute, IntegrationSetup};
pub use config::HarnessConfig;
pub use dispatch::{AsyncVariantCall, SyncVariantCall, VariantCalls};
pub use error::{HarnessError, Result};
pub use ident::{default_generator, IdentifierGenerator, VariantIds};
pub use response::{ApiResponse, DispatchFailure, DispatchResult, VariantResponses};
pub use sequencer::{Capabilities, LifecycleBuilder, LifecycleSequencer, LifecycleStep};
pub use variant::CallVariant;
