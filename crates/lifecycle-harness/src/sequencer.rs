//! Lifecycle sequencer: ordered, capability-gated chain of call cells.
//!
//! One sequencer instance owns the full lifecycle of one test subject:
//! create, read-after-create, exists-after-create, the named after-create
//! extras, update, read-after-update, delete, read-after-delete,
//! exists-after-delete, delete-not-found. Resolving any step first resolves
//! every still-pending enabled predecessor, in order, so the server-side
//! sequence is correct no matter which assertion a test runner happens to
//! schedule first. Steps behind a disabled capability get no cell at all.
//!
//! Construction is two-phase: a [`LifecycleBuilder`] collects calls and
//! flags, and `build()` assembles the cells without dispatching anything.
//! The first resolved check triggers the first dispatch.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use crate::cell::CallCell;
use crate::client::IntegrationSetup;
use crate::config::HarnessConfig;
use crate::dispatch::{dispatch_all, SetupOnce, VariantCalls};
use crate::error::{HarnessError, Result};
use crate::ident::{default_generator, IdentifierGenerator, VariantIds};
use crate::response::VariantResponses;

/// A named step in the lifecycle. Identity is the name.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum LifecycleStep {
    /// Create the resource.
    Create,
    /// Read it back after creation.
    ReadAfterCreate,
    /// Check it exists after creation.
    ExistsAfterCreate,
    /// A named extra call between creation and update.
    AfterCreate(String),
    /// Update the resource.
    Update,
    /// Read it back after the update.
    ReadAfterUpdate,
    /// Delete the resource.
    Delete,
    /// Read it back after deletion (expected invalid).
    ReadAfterDelete,
    /// Check it no longer exists after deletion.
    ExistsAfterDelete,
    /// Delete it again (expected not-found).
    DeleteNotFound,
}

impl fmt::Display for LifecycleStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LifecycleStep::Create => write!(f, "create"),
            LifecycleStep::ReadAfterCreate => write!(f, "read-after-create"),
            LifecycleStep::ExistsAfterCreate => write!(f, "exists-after-create"),
            LifecycleStep::AfterCreate(key) => write!(f, "after-create:{}", key),
            LifecycleStep::Update => write!(f, "update"),
            LifecycleStep::ReadAfterUpdate => write!(f, "read-after-update"),
            LifecycleStep::Delete => write!(f, "delete"),
            LifecycleStep::ReadAfterDelete => write!(f, "read-after-delete"),
            LifecycleStep::ExistsAfterDelete => write!(f, "exists-after-delete"),
            LifecycleStep::DeleteNotFound => write!(f, "delete-not-found"),
        }
    }
}

/// What the subject's resource type supports.
///
/// One explicit flag per lifecycle instance; nothing is inferred from the
/// subject's type. Checks governed by a disabled flag succeed trivially and
/// the corresponding cells are never created.
#[derive(Debug, Clone)]
pub struct Capabilities {
    /// The resource can be deleted (gates delete, read-after-delete,
    /// exists-after-delete and delete-not-found).
    pub supports_deletes: bool,
    /// The resource has an existence check.
    pub supports_exists: bool,
    /// The resource can be updated (gates update and read-after-update).
    pub supports_updates: bool,
    /// Run only the fluent-sync variant. Helpful when capturing a clean
    /// reproduction trace against a live service.
    pub test_only_one_variant: bool,
}

impl Default for Capabilities {
    fn default() -> Self {
        Self {
            supports_deletes: true,
            supports_exists: true,
            supports_updates: true,
            test_only_one_variant: false,
        }
    }
}

/// Collects the calls and flags for one lifecycle subject.
pub struct LifecycleBuilder {
    subject: String,
    capabilities: Capabilities,
    config: HarnessConfig,
    generator: Option<IdentifierGenerator>,
    setup: Option<Arc<dyn IntegrationSetup>>,
    create: Option<VariantCalls>,
    read: Option<VariantCalls>,
    update: Option<VariantCalls>,
    exists: Option<VariantCalls>,
    delete: Option<VariantCalls>,
    after_create: Vec<(String, VariantCalls)>,
}

impl LifecycleBuilder {
    /// Start a builder for the named subject.
    ///
    /// The subject name only feeds the default identifier generator's
    /// suffix, keeping this subject's resources apart from others on a
    /// shared service.
    pub fn new(subject: impl Into<String>) -> Self {
        Self {
            subject: subject.into(),
            capabilities: Capabilities::default(),
            config: HarnessConfig::default(),
            generator: None,
            setup: None,
            create: None,
            read: None,
            update: None,
            exists: None,
            delete: None,
            after_create: Vec::new(),
        }
    }

    /// Set the capability flags.
    pub fn capabilities(mut self, capabilities: Capabilities) -> Self {
        self.capabilities = capabilities;
        self
    }

    /// Set the runtime configuration.
    pub fn config(mut self, config: HarnessConfig) -> Self {
        self.config = config;
        self
    }

    /// Inject an identifier generator (default: random token + subject
    /// suffix).
    pub fn identifier_generator(mut self, generator: IdentifierGenerator) -> Self {
        self.generator = Some(generator);
        self
    }

    /// Register the one-time integration setup hook.
    pub fn integration_setup(mut self, setup: Arc<dyn IntegrationSetup>) -> Self {
        self.setup = Some(setup);
        self
    }

    /// Register the create calls (required).
    pub fn create(mut self, calls: VariantCalls) -> Self {
        self.create = Some(calls);
        self
    }

    /// Register the read calls, reused by every read-back step.
    pub fn read(mut self, calls: VariantCalls) -> Self {
        self.read = Some(calls);
        self
    }

    /// Register the update calls.
    pub fn update(mut self, calls: VariantCalls) -> Self {
        self.update = Some(calls);
        self
    }

    /// Register the existence-check calls, reused after create and delete.
    pub fn exists(mut self, calls: VariantCalls) -> Self {
        self.exists = Some(calls);
        self
    }

    /// Register the delete calls, reused by the delete-not-found step.
    pub fn delete(mut self, calls: VariantCalls) -> Self {
        self.delete = Some(calls);
        self
    }

    /// Register a named extra call that runs after create and before
    /// update. Extras have no relative order among themselves.
    pub fn after_create(mut self, key: impl Into<String>, calls: VariantCalls) -> Self {
        self.after_create.push((key.into(), calls));
        self
    }

    /// Assemble the sequencer. No dispatch happens here.
    pub fn build(self) -> Result<LifecycleSequencer> {
        let create = self.create.ok_or(HarnessError::MissingStep {
            step: LifecycleStep::Create,
        })?;

        let generator = self
            .generator
            .unwrap_or_else(|| default_generator(&self.subject));
        let ids = Arc::new(VariantIds::generate(&generator));
        let setup = if self.config.run_integration_tests {
            self.setup.map(|hook| Arc::new(SetupOnce::new(hook)))
        } else {
            None
        };
        let one_variant = self.capabilities.test_only_one_variant;

        let read = self.read.map(Arc::new);
        let update = self.update.map(Arc::new);
        let exists = self.exists.map(Arc::new);
        let delete = self.delete.map(Arc::new);

        let make_cell = |step: LifecycleStep, calls: Option<Arc<VariantCalls>>| match calls {
            Some(calls) => {
                let ids = ids.clone();
                let setup = setup.clone();
                let dispatch_step = step.clone();
                CallCell::new(step, async move {
                    if let Some(setup) = &setup {
                        setup.ensure().await;
                    }
                    dispatch_all(&dispatch_step, &calls, &ids, one_variant).await
                })
            }
            None => CallCell::empty(step),
        };

        let caps = &self.capabilities;
        let after_create: BTreeMap<String, CallCell> = self
            .after_create
            .into_iter()
            .map(|(key, calls)| {
                let cell = make_cell(LifecycleStep::AfterCreate(key.clone()), Some(Arc::new(calls)));
                (key, cell)
            })
            .collect();

        Ok(LifecycleSequencer {
            capabilities: self.capabilities.clone(),
            ids: ids.clone(),
            create: make_cell(LifecycleStep::Create, Some(Arc::new(create))),
            read_after_create: make_cell(LifecycleStep::ReadAfterCreate, read.clone()),
            exists_after_create: caps
                .supports_exists
                .then(|| make_cell(LifecycleStep::ExistsAfterCreate, exists.clone())),
            after_create,
            update: caps
                .supports_updates
                .then(|| make_cell(LifecycleStep::Update, update)),
            read_after_update: caps
                .supports_updates
                .then(|| make_cell(LifecycleStep::ReadAfterUpdate, read.clone())),
            delete: caps
                .supports_deletes
                .then(|| make_cell(LifecycleStep::Delete, delete.clone())),
            read_after_delete: caps
                .supports_deletes
                .then(|| make_cell(LifecycleStep::ReadAfterDelete, read)),
            exists_after_delete: (caps.supports_deletes && caps.supports_exists)
                .then(|| make_cell(LifecycleStep::ExistsAfterDelete, exists)),
            delete_not_found: caps
                .supports_deletes
                .then(|| make_cell(LifecycleStep::DeleteNotFound, delete)),
        })
    }
}

/// Orchestrator enforcing dependency order across one subject's cells.
pub struct LifecycleSequencer {
    capabilities: Capabilities,
    ids: Arc<VariantIds>,
    create: CallCell,
    read_after_create: CallCell,
    exists_after_create: Option<CallCell>,
    after_create: BTreeMap<String, CallCell>,
    update: Option<CallCell>,
    read_after_update: Option<CallCell>,
    delete: Option<CallCell>,
    read_after_delete: Option<CallCell>,
    exists_after_delete: Option<CallCell>,
    delete_not_found: Option<CallCell>,
}

impl LifecycleSequencer {
    /// The capability flags this sequencer was built with.
    pub fn capabilities(&self) -> &Capabilities {
        &self.capabilities
    }

    /// The per-variant identifiers this lifecycle targets.
    pub fn variant_ids(&self) -> &VariantIds {
        &self.ids
    }

    /// Whether the given after-create key was registered.
    pub fn has_after_create(&self, key: &str) -> bool {
        self.after_create.contains_key(key)
    }

    /// Resolve the given step, first forcing every still-pending enabled
    /// predecessor in lifecycle order. Returns the step's aggregated
    /// variant responses; repeated resolution returns the cached result.
    pub async fn resolve_through(&self, step: &LifecycleStep) -> Result<Arc<VariantResponses>> {
        // Membership is checked before any cell resolves; asking for a
        // step that is not in the chain must not touch the service.
        if !self.chain().any(|cell| cell.step() == step) {
            return Err(match step {
                LifecycleStep::AfterCreate(key) => HarnessError::UnknownAfterCreateKey {
                    key: key.clone(),
                },
                other => HarnessError::MissingStep {
                    step: other.clone(),
                },
            });
        }
        for cell in self.chain() {
            let responses = cell.resolve().await;
            if cell.step() == step {
                return Ok(responses);
            }
        }
        Err(HarnessError::MissingStep { step: step.clone() })
    }

    /// Enabled cells in fixed lifecycle order.
    fn chain(&self) -> impl Iterator<Item = &CallCell> {
        [Some(&self.create), Some(&self.read_after_create)]
            .into_iter()
            .chain(std::iter::once(self.exists_after_create.as_ref()))
            .flatten()
            .chain(self.after_create.values())
            .chain(
                [
                    self.update.as_ref(),
                    self.read_after_update.as_ref(),
                    self.delete.as_ref(),
                    self.read_after_delete.as_ref(),
                    self.exists_after_delete.as_ref(),
                    self.delete_not_found.as_ref(),
                ]
                .into_iter()
                .flatten(),
            )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn build_without_create_is_an_error() {
        let err = LifecycleBuilder::new("subject").build().err();
        assert!(matches!(
            err,
            Some(HarnessError::MissingStep {
                step: LifecycleStep::Create
            })
        ));
    }

    #[test]
    fn defaults_enable_everything_but_single_variant() {
        let caps = Capabilities::default();
        assert!(caps.supports_deletes);
        assert!(caps.supports_exists);
        assert!(caps.supports_updates);
        assert!(!caps.test_only_one_variant);
    }

    #[test]
    fn steps_render_by_name() {
        assert_eq!(LifecycleStep::DeleteNotFound.to_string(), "delete-not-found");
        assert_eq!(
            LifecycleStep::AfterCreate("pipeline".into()).to_string(),
            "after-create:pipeline"
        );
    }
}
