//! Response and failure types shared by every dispatch.
//!
//! The engine never inspects response bodies beyond validity and existence;
//! concrete response types live with the test subject and are recovered by
//! downcast at the assertion surface.

use std::any::Any;
use std::collections::BTreeMap;
use std::fmt;

use crate::variant::CallVariant;

/// A response returned by the service capability for one variant call.
///
/// Implementors expose `as_any` so typed assertions can downcast back to the
/// concrete response type; a failed downcast is a configuration error, not a
/// soft assertion failure.
pub trait ApiResponse: Any + Send + Sync + fmt::Debug {
    /// Whether the service accepted the call.
    fn is_valid(&self) -> bool;

    /// Existence flag for existence-check responses.
    ///
    /// Returns `None` for response types that do not carry an existence
    /// flag; the built-in exists checks treat that as a type mismatch.
    fn exists(&self) -> Option<bool> {
        None
    }

    /// Downcast support for typed assertions.
    fn as_any(&self) -> &dyn Any;
}

/// Captured failure from the service capability.
///
/// Stored verbatim in the owning cell's result and re-delivered identically
/// to every observer; this layer never retries.
#[derive(Debug, Clone, thiserror::Error)]
#[error("dispatch failed: {message}")]
pub struct DispatchFailure {
    /// Description of the underlying failure.
    pub message: String,
}

impl DispatchFailure {
    /// Capture a failure from a message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// Capture a failure from any error value.
    pub fn from_error(err: &(dyn std::error::Error + 'static)) -> Self {
        Self {
            message: err.to_string(),
        }
    }
}

/// Outcome of one variant's dispatch: a response or a captured failure.
pub type DispatchResult = Result<Box<dyn ApiResponse>, DispatchFailure>;

/// Aggregated result of one logical operation: one outcome per variant.
pub type VariantResponses = BTreeMap<CallVariant, DispatchResult>;
