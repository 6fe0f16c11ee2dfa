//! Error taxonomy for the harness.
//!
//! Dispatch failures flow through the normal assertion path; configuration
//! errors (unknown after-create key, wrong expected response type) indicate
//! a defective test subject and abort the offending check immediately.

use crate::sequencer::LifecycleStep;
use crate::variant::CallVariant;

/// Result alias used across the harness.
pub type Result<T> = std::result::Result<T, HarnessError>;

/// Errors surfaced by the assertion surface.
#[derive(Debug, Clone, thiserror::Error)]
pub enum HarnessError {
    /// The service capability failed for one variant of a step.
    #[error("dispatch for {step} ({variant}) failed: {message}")]
    Dispatch {
        /// Lifecycle step whose dispatch failed.
        step: LifecycleStep,
        /// Variant that observed the failure.
        variant: CallVariant,
        /// Captured failure message.
        message: String,
    },

    /// A predicate rejected one variant's response.
    #[error("assertion on {step} ({variant}) failed: {message}")]
    Assertion {
        /// Lifecycle step under assertion.
        step: LifecycleStep,
        /// Variant whose response was rejected.
        variant: CallVariant,
        /// Predicate failure message.
        message: String,
    },

    /// A stored response does not have the type the check expected.
    ///
    /// Configuration error: the subject wired the wrong response type for
    /// this step.
    #[error("response for {step} ({variant}) is {actual}, not expected type {expected}")]
    ResponseTypeMismatch {
        /// Lifecycle step under assertion.
        step: LifecycleStep,
        /// Variant whose response had the wrong type.
        variant: CallVariant,
        /// Expected concrete response type.
        expected: &'static str,
        /// Actual stored response, rendered via Debug.
        actual: String,
    },

    /// An after-create assertion named a key that was never registered.
    #[error("{key} is not a registered after-create call")]
    UnknownAfterCreateKey {
        /// The unregistered key.
        key: String,
    },

    /// A step required by the requested check was never configured.
    #[error("lifecycle step {step} was not configured for this subject")]
    MissingStep {
        /// The unconfigured step.
        step: LifecycleStep,
    },
}
