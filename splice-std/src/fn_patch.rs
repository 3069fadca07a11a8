//! Closure-backed patches.

use splice_core::{ClassRepr, MethodKey, Patch, PatchSite, TransformError};
use std::marker::PhantomData;

/// A [`Patch`] whose transform is a closure.
///
/// # Example
///
/// ```rust,ignore
/// let patch = FnPatch::new("mute-beep", "game.Sound", "beep", "()V", |site| {
///     site.method_mut()?.instructions.clear();
///     Ok(())
/// })
/// .with_rationale("beep is loud");
/// ```
pub struct FnPatch<C, F> {
    id: String,
    target_class: String,
    key: MethodKey,
    rationale: String,
    transform: F,
    _class: PhantomData<fn(&mut C)>,
}

impl<C, F> FnPatch<C, F>
where
    C: ClassRepr,
    F: Fn(&mut PatchSite<'_, C>) -> Result<(), TransformError> + Send + Sync + 'static,
{
    /// Create a patch targeting `target_class.method_name method_descriptor`.
    pub fn new(
        id: impl Into<String>,
        target_class: impl Into<String>,
        method_name: impl Into<String>,
        method_descriptor: impl Into<String>,
        transform: F,
    ) -> Self {
        Self {
            id: id.into(),
            target_class: target_class.into(),
            key: MethodKey::new(method_name, method_descriptor),
            rationale: String::new(),
            transform,
            _class: PhantomData,
        }
    }

    /// Attach a rationale.
    pub fn with_rationale(mut self, rationale: impl Into<String>) -> Self {
        self.rationale = rationale.into();
        self
    }
}

impl<C, F> Patch<C> for FnPatch<C, F>
where
    C: ClassRepr,
    F: Fn(&mut PatchSite<'_, C>) -> Result<(), TransformError> + Send + Sync + 'static,
{
    fn id(&self) -> &str {
        &self.id
    }

    fn target_class(&self) -> &str {
        &self.target_class
    }

    fn method_name(&self) -> &str {
        self.key.name()
    }

    fn method_descriptor(&self) -> &str {
        self.key.descriptor()
    }

    fn rationale(&self) -> &str {
        &self.rationale
    }

    fn apply(&self, site: &mut PatchSite<'_, C>) -> Result<(), TransformError> {
        (self.transform)(site)
    }

    fn method_key(&self) -> MethodKey {
        self.key.clone()
    }
}
