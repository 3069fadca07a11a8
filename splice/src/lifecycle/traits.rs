//! Host-facing plugin protocol.

use splice_core::{ClassRepr, LoadError};
use splice_std::PatchReport;
use std::collections::HashSet;

/// Host-supplied information about the transform group being applied.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GroupMeta {
    /// Group name.
    pub name: String,
    /// Host priority of the group.
    pub priority: i32,
}

impl GroupMeta {
    /// Create group metadata.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            priority: 0,
        }
    }

    /// Set priority.
    pub fn with_priority(mut self, priority: i32) -> Self {
        self.priority = priority;
        self
    }
}

/// The plugin protocol a host transformation pipeline drives.
///
/// The host calls [`on_load`](Self::on_load) once, then, for every class it
/// transforms, [`before_transform`](Self::before_transform) and
/// [`after_transform`](Self::after_transform) around its own work. Either
/// callback may fire more than once per class and from several threads.
#[diagnostic::on_unimplemented(
    message = "`{Self}` is not a `TransformPlugin` for `{C}`",
    label = "missing `TransformPlugin` implementation",
    note = "Hosts drive plugins through the load, filter and transform callbacks."
)]
pub trait TransformPlugin<C: ClassRepr>: Send + Sync {
    /// Called once after the plugin is instantiated.
    fn on_load(&self, namespace: &str) -> Result<(), LoadError>;

    /// Name of a remapping config to use, or `None` for the host default.
    fn remap_config(&self) -> Option<String>;

    /// Whether the group `group` should be applied to `target_class`.
    fn should_apply(&self, target_class: &str, group: &str) -> bool;

    /// Lets the plugin prune its own target set after all configs are known.
    fn accept_targets(&self, mine: &mut HashSet<String>, others: &HashSet<String>);

    /// Extra declarative units the plugin wants the host to load.
    fn additional_units(&self) -> Vec<String>;

    /// Called right before the host transforms `class_name`.
    fn before_transform(
        &self,
        class_name: &str,
        class: &mut C,
        group: &str,
        meta: &GroupMeta,
    ) -> PatchReport;

    /// Called right after the host transformed `class_name`.
    fn after_transform(
        &self,
        class_name: &str,
        class: &mut C,
        group: &str,
        meta: &GroupMeta,
    ) -> PatchReport;
}
