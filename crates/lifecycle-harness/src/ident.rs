//! Resource identifier generation.
//!
//! Each call variant targets its own independently named server-side
//! resource so concurrent variants never collide. The four identifiers are
//! generated once per sequencer instance and reused by every later
//! operation of the lifecycle, which is what makes a read-after-create hit
//! the resource its create actually made.

use std::sync::Arc;

use rand::Rng;

use crate::variant::CallVariant;

/// Produces the identifier for one variant's resource.
///
/// Injected explicitly rather than read from ambient static state; tests
/// that need reproducible names supply their own generator.
pub type IdentifierGenerator = Arc<dyn Fn(CallVariant) -> String + Send + Sync>;

/// The fixed per-variant identifiers for one lifecycle instance.
///
/// Holds exactly one identifier per variant, indexed by discriminant;
/// `CallVariant::all` lists the variants in declaration order, so the
/// slots line up.
#[derive(Debug, Clone)]
pub struct VariantIds {
    ids: [String; 4],
}

impl VariantIds {
    /// Generate one identifier per variant using the given generator.
    pub fn generate(generator: &IdentifierGenerator) -> Self {
        let ids = CallVariant::all().map(|v| generator.as_ref()(v));
        Self { ids }
    }

    /// The identifier assigned to a variant.
    pub fn get(&self, variant: CallVariant) -> &str {
        &self.ids[variant as usize]
    }
}

/// The default generator: `<variant-prefix>-<random-token>-<subject>`.
///
/// The subject suffix keeps resources from different lifecycle subjects
/// apart on a shared server; the random token keeps repeated runs apart.
pub fn default_generator(subject: &str) -> IdentifierGenerator {
    let suffix = sanitize_subject(subject);
    Arc::new(move |variant| format!("{}-{}-{}", variant.id_prefix(), random_token(), suffix))
}

/// Eight hex characters of randomness.
fn random_token() -> String {
    let token: u32 = rand::thread_rng().gen();
    format!("{:08x}", token)
}

/// Lowercase the subject name and strip anything that is not safe in a
/// resource identifier.
fn sanitize_subject(subject: &str) -> String {
    subject
        .chars()
        .filter_map(|c| {
            if c.is_ascii_alphanumeric() {
                Some(c.to_ascii_lowercase())
            } else if c == '-' || c == '_' {
                Some('-')
            } else {
                None
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn ids_are_stable_per_variant() {
        let generator = default_generator("RoleCrud");
        let ids = VariantIds::generate(&generator);
        for v in CallVariant::all() {
            assert_eq!(ids.get(v), ids.get(v));
            assert!(ids.get(v).starts_with(v.id_prefix()));
            assert!(ids.get(v).ends_with("rolecrud"));
        }
    }

    #[test]
    fn every_variant_slot_holds_its_own_identifier() {
        let generator: IdentifierGenerator = Arc::new(|v| format!("{}-id", v.id_prefix()));
        let ids = VariantIds::generate(&generator);
        for v in CallVariant::all() {
            assert_eq!(ids.get(v), format!("{}-id", v.id_prefix()));
        }
    }

    #[test]
    fn variants_get_distinct_ids() {
        let generator = default_generator("RoleCrud");
        let ids = VariantIds::generate(&generator);
        let distinct: std::collections::BTreeSet<_> =
            CallVariant::all().iter().map(|&v| ids.get(v)).collect();
        assert_eq!(distinct.len(), 4);
    }

    proptest! {
        #[test]
        fn sanitized_subjects_are_identifier_safe(subject in ".*") {
            let cleaned = sanitize_subject(&subject);
            prop_assert!(cleaned
                .chars()
                .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-'));
        }

        #[test]
        fn generated_ids_embed_prefix_and_suffix(subject in "[A-Za-z][A-Za-z0-9_]{0,16}") {
            let generator = default_generator(&subject);
            let id = generator.as_ref()(CallVariant::StructuredAsync);
            prop_assert!(id.starts_with("structuredasync-"));
            prop_assert!(id.ends_with(&sanitize_subject(&subject)));
        }
    }
}
