//! Call variants: the equivalent execution paths for one logical operation.
//!
//! Every lifecycle operation can be exercised through four paths: the two
//! request-construction styles (fluent builder vs. structured literal)
//! crossed with the two invocation styles (blocking vs. async). The engine
//! fans one operation out across all four and aggregates one response per
//! variant.

use std::fmt;

/// One of the four equivalent ways to invoke a lifecycle operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum CallVariant {
    /// Fluent request construction, blocking execution.
    FluentSync,
    /// Fluent request construction, async execution.
    FluentAsync,
    /// Structured request construction, blocking execution.
    StructuredSync,
    /// Structured request construction, async execution.
    StructuredAsync,
}

impl CallVariant {
    /// All variants, in dispatch order.
    pub const fn all() -> [CallVariant; 4] {
        [
            CallVariant::FluentSync,
            CallVariant::FluentAsync,
            CallVariant::StructuredSync,
            CallVariant::StructuredAsync,
        ]
    }

    /// Identifier prefix distinguishing this variant's server-side resource.
    pub const fn id_prefix(self) -> &'static str {
        match self {
            CallVariant::FluentSync => "fluent",
            CallVariant::FluentAsync => "fluentasync",
            CallVariant::StructuredSync => "structured",
            CallVariant::StructuredAsync => "structuredasync",
        }
    }
}

impl fmt::Display for CallVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            CallVariant::FluentSync => "fluent-sync",
            CallVariant::FluentAsync => "fluent-async",
            CallVariant::StructuredSync => "structured-sync",
            CallVariant::StructuredAsync => "structured-async",
        };
        write!(f, "{}", name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn variants_are_ordered_by_dispatch_position() {
        let all = CallVariant::all();
        for pair in all.windows(2) {
            assert!(pair[0] < pair[1]);
        }
    }

    #[test]
    fn id_prefixes_are_unique() {
        let prefixes: std::collections::BTreeSet<_> =
            CallVariant::all().iter().map(|v| v.id_prefix()).collect();
        assert_eq!(prefixes.len(), 4);
    }
}
