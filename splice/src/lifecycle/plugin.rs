//! The patch-applying plugin.

use super::{
    config::{Phase, PluginConfig},
    traits::{GroupMeta, TransformPlugin},
};
use splice_core::{ClassRepr, LoadError};
use splice_std::{ClassState, PatchReport, PatchSource, Registry, apply_patches};
use std::{
    collections::HashSet,
    sync::{Mutex, OnceLock, PoisonError},
};

/// Applies discovered patches from inside a host's transform callbacks.
///
/// On load the plugin asks its [`PatchSource`] for every patch and builds a
/// [`Registry`]. Afterwards exactly one of the two transform callbacks,
/// chosen by [`PluginConfig::phase`], forwards each class to the dispatcher;
/// the other passes through. Because the dispatcher consumes a class's
/// registry entry, each class is patched at most once.
///
/// # Example
///
/// ```rust,ignore
/// let plugin = PatchPlugin::new(GamePatches::source(), PluginConfig::new(true));
/// plugin.on_load("game.mixins")?;
///
/// // Host pipeline:
/// plugin.before_transform("game.Menu", &mut node, "game.mixins", &meta);
/// ```
pub struct PatchPlugin<C: ClassRepr, S> {
    source: S,
    config: PluginConfig,
    registry: OnceLock<Registry<C>>,
    // Held for the whole of `on_load` so discovery runs once.
    load_guard: Mutex<()>,
}

impl<C, S> PatchPlugin<C, S>
where
    C: ClassRepr,
    S: PatchSource<C>,
{
    /// Create an unloaded plugin.
    pub fn new(source: S, config: PluginConfig) -> Self {
        Self {
            source,
            config,
            registry: OnceLock::new(),
            load_guard: Mutex::new(()),
        }
    }

    /// The plugin's configuration.
    pub fn config(&self) -> &PluginConfig {
        &self.config
    }

    /// Whether [`on_load`](TransformPlugin::on_load) has succeeded.
    pub fn is_loaded(&self) -> bool {
        self.registry.get().is_some()
    }

    /// The registry, once loaded.
    pub fn registry(&self) -> Option<&Registry<C>> {
        self.registry.get()
    }

    /// Lifecycle state of `class_name`. Everything is untracked before load.
    pub fn class_state(&self, class_name: &str) -> ClassState {
        self.registry
            .get()
            .map_or(ClassState::Untracked, |registry| {
                registry.class_state(class_name)
            })
    }

    fn dispatch(&self, class_name: &str, class: &mut C) -> PatchReport {
        match self.registry.get() {
            Some(registry) => apply_patches(registry, class_name, class),
            None => {
                #[cfg(feature = "tracing")]
                tracing::warn!(class = %class_name, "Transform hook fired before patches were loaded");
                PatchReport::empty(class_name)
            }
        }
    }

    fn run_in(&self, phase: Phase, class_name: &str, class: &mut C) -> PatchReport {
        if self.config.phase() == phase {
            self.dispatch(class_name, class)
        } else {
            PatchReport::empty(class_name)
        }
    }
}

impl<C, S> TransformPlugin<C> for PatchPlugin<C, S>
where
    C: ClassRepr,
    S: PatchSource<C> + Send + Sync,
{
    fn on_load(&self, namespace: &str) -> Result<(), LoadError> {
        let _guard = self.load_guard.lock().unwrap_or_else(PoisonError::into_inner);
        if self.is_loaded() {
            return Err(LoadError::AlreadyLoaded(namespace.to_owned()));
        }

        let registry = Registry::from_source(&self.source, self.config.patch_order())?;

        #[cfg(feature = "tracing")]
        tracing::info!(
            namespace = %namespace,
            classes = registry.len(),
            patches = registry.pending_patches(),
            "Loaded patches"
        );

        self.registry
            .set(registry)
            .map_err(|_| LoadError::AlreadyLoaded(namespace.to_owned()))
    }

    fn remap_config(&self) -> Option<String> {
        None
    }

    /// Always true. Patches gate themselves inside `apply` if they need to.
    fn should_apply(&self, _target_class: &str, _group: &str) -> bool {
        true
    }

    fn accept_targets(&self, _mine: &mut HashSet<String>, _others: &HashSet<String>) {}

    fn additional_units(&self) -> Vec<String> {
        Vec::new()
    }

    fn before_transform(
        &self,
        class_name: &str,
        class: &mut C,
        _group: &str,
        _meta: &GroupMeta,
    ) -> PatchReport {
        self.run_in(Phase::Before, class_name, class)
    }

    fn after_transform(
        &self,
        class_name: &str,
        class: &mut C,
        _group: &str,
        _meta: &GroupMeta,
    ) -> PatchReport {
        self.run_in(Phase::After, class_name, class)
    }
}
