#![deny(clippy::dbg_macro)]
#![deny(clippy::todo)]
#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
//! # Lifecycle Testkit
//!
//! In-memory fixtures for exercising the lifecycle harness without a real
//! service: a fully instrumented mock resource service, typed request and
//! response fixtures, and pre-wired lifecycle builders.
//!
//! The mock records every call with a global sequence number, which is what
//! lets the harness's integration tests prove ordering, at-most-once
//! execution, and capability gating.

pub mod fixtures;
pub mod requests;
pub mod responses;
pub mod service;

pub use fixtures::{
    create_calls, delete_calls, exists_calls, fixed_generator, full_lifecycle, read_calls,
    update_calls, CountingSetup,
};
pub use requests::{CreateRequest, DeleteRequest, ExistsRequest, ReadRequest, UpdateRequest};
pub use responses::{
    CreateResponse, DeleteResponse, ExistsResponse, ReadResponse, UpdateResponse,
};
pub use service::{CallRecord, MockService, OpKind};
