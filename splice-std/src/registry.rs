//! Registry module for patch management.
//!
//! This module provides a builder for collecting discovered patches and a
//! registry keyed by target class. The registry only ever shrinks: each
//! class entry is handed out once, to the first dispatch pass that asks.

use crate::{diagnostics, source::PatchSource};
use splice_core::{ClassRepr, DiscoveryError, Patch, PatchRef};
use std::{
    collections::{HashMap, HashSet},
    sync::{Arc, Mutex, MutexGuard, PoisonError},
};

/// How patches targeting the same class are ordered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PatchOrder {
    /// Keep the order the discovery facility produced.
    #[default]
    Discovery,
    /// Stable-sort each class's patches by id.
    ///
    /// Patches with equal ids keep their discovery order.
    ById,
}

/// Lifecycle of one class name within a registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClassState {
    /// Patches are registered and waiting for the class to be transformed.
    Pending,
    /// The class's patches were taken by a dispatch pass.
    Applied,
    /// No patch ever targeted this class.
    Untracked,
}

// ============================================================================
// RegistryBuilder - for constructing registries
// ============================================================================

/// Builder for constructing a [`Registry`].
///
/// # Example
/// ```ignore
/// let registry = RegistryBuilder::new()
///     .register(FixRender)
///     .register(SkipIntro)
///     .order(PatchOrder::ById)
///     .build()?;
/// ```
pub struct RegistryBuilder<C: ClassRepr> {
    patches: Vec<PatchRef<C>>,
    order: PatchOrder,
}

impl<C: ClassRepr> RegistryBuilder<C> {
    /// Create a new empty builder.
    pub fn new() -> Self {
        Self {
            patches: Vec::new(),
            order: PatchOrder::default(),
        }
    }

    /// Register a patch.
    pub fn register<P: Patch<C>>(mut self, patch: P) -> Self {
        self.register_mut(Arc::new(patch));
        self
    }

    /// Register a shared patch handle (mutable version).
    pub fn register_mut(&mut self, patch: PatchRef<C>) {
        self.patches.push(patch);
    }

    /// Register every patch from an iterator, in iteration order.
    pub fn extend<I>(mut self, patches: I) -> Self
    where
        I: IntoIterator<Item = PatchRef<C>>,
    {
        self.patches.extend(patches);
        self
    }

    /// Set the ordering policy.
    pub fn order(mut self, order: PatchOrder) -> Self {
        self.order = order;
        self
    }

    /// Get the number of registered patches.
    pub fn len(&self) -> usize {
        self.patches.len()
    }

    /// Check if the builder has no patches.
    pub fn is_empty(&self) -> bool {
        self.patches.is_empty()
    }

    /// Validate every patch and group them by target class.
    ///
    /// Fails on the first malformed patch; nothing is registered in that case.
    pub fn build(self) -> Result<Registry<C>, DiscoveryError> {
        let mut pending: HashMap<String, Vec<PatchRef<C>>> = HashMap::new();

        for patch in self.patches {
            validate(patch.as_ref())?;
            pending
                .entry(patch.target_class().to_owned())
                .or_default()
                .push(patch);
        }

        if self.order == PatchOrder::ById {
            for patches in pending.values_mut() {
                patches.sort_by(|a, b| a.id().cmp(b.id()));
            }
        }

        for (class, patches) in &pending {
            for patch in patches {
                diagnostics::registered(patch.id(), class, &patch.method_key(), patch.rationale());
            }
        }

        Ok(Registry {
            state: Mutex::new(RegistryState {
                pending,
                consumed: HashSet::new(),
            }),
        })
    }
}

impl<C: ClassRepr> Default for RegistryBuilder<C> {
    fn default() -> Self {
        Self::new()
    }
}

fn validate<C: ClassRepr>(patch: &dyn Patch<C>) -> Result<(), DiscoveryError> {
    let id = patch.id();
    let fields = [
        ("id", id),
        ("target class", patch.target_class()),
        ("method name", patch.method_name()),
        ("method descriptor", patch.method_descriptor()),
    ];
    for (field, value) in fields {
        if value.trim().is_empty() {
            return Err(DiscoveryError::malformed(id, format!("empty {field}")));
        }
    }
    Ok(())
}

// ============================================================================
// Registry - class-keyed, consume-once patch storage
// ============================================================================

struct RegistryState<C: ClassRepr> {
    pending: HashMap<String, Vec<PatchRef<C>>>,
    consumed: HashSet<String>,
}

/// Patches grouped by target class, each group handed out at most once.
///
/// Created by [`RegistryBuilder::build`] or [`Registry::from_source`]. The
/// registry is `Send + Sync`; share it by reference or through an `Arc`.
pub struct Registry<C: ClassRepr> {
    state: Mutex<RegistryState<C>>,
}

impl<C: ClassRepr> Registry<C> {
    /// Start building a registry.
    pub fn builder() -> RegistryBuilder<C> {
        RegistryBuilder::new()
    }

    /// Run discovery once and build a registry from the result.
    pub fn from_source<S>(source: &S, order: PatchOrder) -> Result<Self, DiscoveryError>
    where
        S: PatchSource<C> + ?Sized,
    {
        RegistryBuilder::new()
            .extend(source.discover()?)
            .order(order)
            .build()
    }

    fn state(&self) -> MutexGuard<'_, RegistryState<C>> {
        // Every critical section is a single map operation, so a poisoned
        // lock still guards consistent data.
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Remove and return the patches registered for `class_name`.
    ///
    /// Only the first caller for a given class gets `Some`; every later or
    /// concurrent caller gets `None`.
    pub fn take(&self, class_name: &str) -> Option<Vec<PatchRef<C>>> {
        let mut state = self.state();
        let patches = state.pending.remove(class_name)?;
        state.consumed.insert(class_name.to_owned());
        Some(patches)
    }

    /// Where `class_name` is in its lifecycle.
    pub fn class_state(&self, class_name: &str) -> ClassState {
        let state = self.state();
        if state.pending.contains_key(class_name) {
            ClassState::Pending
        } else if state.consumed.contains(class_name) {
            ClassState::Applied
        } else {
            ClassState::Untracked
        }
    }

    /// Whether patches are still waiting for `class_name`.
    pub fn contains(&self, class_name: &str) -> bool {
        self.state().pending.contains_key(class_name)
    }

    /// Names of classes with pending patches, sorted.
    pub fn pending_classes(&self) -> Vec<String> {
        let mut classes: Vec<String> = self.state().pending.keys().cloned().collect();
        classes.sort();
        classes
    }

    /// Total number of patches not yet handed out.
    pub fn pending_patches(&self) -> usize {
        self.state().pending.values().map(Vec::len).sum()
    }

    /// Get the number of classes with pending patches.
    pub fn len(&self) -> usize {
        self.state().pending.len()
    }

    /// Check if every class entry has been consumed.
    pub fn is_empty(&self) -> bool {
        self.state().pending.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        source::PatchTable,
        testing::{RecordingPatch, TestClass},
    };
    use splice_core::PatchSite;

    fn ids(patches: &[PatchRef<TestClass>]) -> Vec<&str> {
        patches.iter().map(|p| p.id()).collect()
    }

    #[test]
    fn groups_by_class_in_discovery_order() {
        let registry = Registry::builder()
            .register(RecordingPatch::new("b", "demo.A", "m", "()V"))
            .register(RecordingPatch::new("x", "demo.B", "m", "()V"))
            .register(RecordingPatch::new("a", "demo.A", "n", "()I"))
            .build()
            .unwrap();

        assert_eq!(registry.len(), 2);
        assert_eq!(registry.pending_patches(), 3);
        assert_eq!(registry.pending_classes(), vec!["demo.A", "demo.B"]);

        let patches = registry.take("demo.A").unwrap();
        assert_eq!(ids(&patches), vec!["b", "a"]);
        assert!(patches.iter().all(|p| p.target_class() == "demo.A"));
    }

    #[test]
    fn by_id_order_is_stable() {
        let first = RecordingPatch::new("same", "demo.A", "m", "()V");
        let second = RecordingPatch::new("same", "demo.A", "m", "()V");
        let first_log = first.calls();

        let registry = Registry::builder()
            .register(RecordingPatch::new("zeta", "demo.A", "m", "()V"))
            .register(first)
            .register(second)
            .register(RecordingPatch::new("alpha", "demo.A", "m", "()V"))
            .order(PatchOrder::ById)
            .build()
            .unwrap();

        let patches = registry.take("demo.A").unwrap();
        assert_eq!(ids(&patches), vec!["alpha", "same", "same", "zeta"]);

        // The first "same" is still first after sorting.
        let mut class = TestClass::new("demo.A").with_method("m", "()V");
        let mut site = PatchSite::resolve(&mut class, &patches[1].method_key(), 0).unwrap();
        patches[1].apply(&mut site).unwrap();
        assert_eq!(first_log.count(), 1);
    }

    #[test]
    fn duplicates_are_kept() {
        let registry = Registry::builder()
            .register(RecordingPatch::new("dup", "demo.A", "m", "()V"))
            .register(RecordingPatch::new("dup", "demo.A", "m", "()V"))
            .build()
            .unwrap();
        assert_eq!(registry.pending_patches(), 2);
    }

    #[test]
    fn take_consumes_entry_once() {
        let registry = Registry::builder()
            .register(RecordingPatch::new("p", "demo.A", "m", "()V"))
            .build()
            .unwrap();

        assert_eq!(registry.class_state("demo.A"), ClassState::Pending);
        assert!(registry.take("demo.A").is_some());
        assert!(registry.take("demo.A").is_none());
        assert_eq!(registry.class_state("demo.A"), ClassState::Applied);
        assert_eq!(registry.class_state("demo.Z"), ClassState::Untracked);
        assert!(registry.is_empty());
    }

    #[test]
    fn malformed_patch_aborts_build() {
        let result = Registry::builder()
            .register(RecordingPatch::new("ok", "demo.A", "m", "()V"))
            .register(RecordingPatch::new("broken", "", "m", "()V"))
            .build();

        match result {
            Err(DiscoveryError::Malformed { patch, reason }) => {
                assert_eq!(patch, "broken");
                assert_eq!(reason, "empty target class");
            }
            _ => panic!("expected a malformed patch error"),
        }
    }

    #[test]
    fn blank_descriptor_is_malformed() {
        let result = Registry::builder()
            .register(RecordingPatch::new("p", "demo.A", "m", "  "))
            .build();
        assert!(matches!(result, Err(DiscoveryError::Malformed { .. })));
    }

    #[test]
    fn from_source_propagates_source_failure() {
        let source = || -> Result<Vec<PatchRef<TestClass>>, DiscoveryError> {
            Err(DiscoveryError::Source("service index unreadable".into()))
        };
        let result = Registry::from_source(&source, PatchOrder::Discovery);
        assert!(matches!(result, Err(DiscoveryError::Source(_))));
    }

    #[test]
    fn from_source_reads_table() {
        let table: PatchTable<TestClass> = [
            Arc::new(RecordingPatch::new("p1", "demo.A", "m", "()V")) as PatchRef<TestClass>,
            Arc::new(RecordingPatch::new("p2", "demo.B", "m", "()V")),
        ]
        .into_iter()
        .collect();

        let registry = Registry::from_source(&table, PatchOrder::Discovery).unwrap();
        assert_eq!(registry.pending_classes(), vec!["demo.A", "demo.B"]);
    }

    #[test]
    fn registry_is_shareable() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Registry<TestClass>>();
    }
}
