//! # Patch contract
//!
//! A patch names one method of one class and rewrites it in place. Patches
//! are written independently of each other and of the host; the only thing
//! they share is this trait.
//!
//! The dispatcher hands each matched patch a [`PatchSite`], a cursor that
//! borrows the whole class mutably while remembering which method was
//! matched. Through it a patch can reach both the class (to add fields,
//! helper methods, ...) and the target method body.

use crate::{
    class::{ClassRepr, MethodKey},
    error::TransformError,
};
use std::sync::Arc;

/// Shared handle to a discovered patch.
pub type PatchRef<C> = Arc<dyn Patch<C>>;

/// A unit that rewrites one method of one class.
///
/// # Object Safety
///
/// The trait is object safe; registries store patches as [`PatchRef`].
///
/// # Example
///
/// ```rust,ignore
/// struct SkipIntro;
///
/// impl Patch<ClassNode> for SkipIntro {
///     fn id(&self) -> &str { "skip-intro" }
///     fn target_class(&self) -> &str { "game.Menu" }
///     fn method_name(&self) -> &str { "showIntro" }
///     fn method_descriptor(&self) -> &str { "()V" }
///
///     fn apply(&self, site: &mut PatchSite<'_, ClassNode>) -> Result<(), TransformError> {
///         site.method_mut()?.instructions.clear();
///         Ok(())
///     }
/// }
/// ```
#[diagnostic::on_unimplemented(
    message = "`{Self}` is not a `Patch` for `{C}`",
    label = "missing `Patch` implementation",
    note = "Patches must declare their target and implement `apply` for `{C}`."
)]
pub trait Patch<C: ClassRepr>: Send + Sync + 'static {
    /// Human-readable identifier, used in diagnostics only.
    fn id(&self) -> &str;

    /// Fully qualified name of the class this patch targets.
    fn target_class(&self) -> &str;

    /// Name of the target method.
    fn method_name(&self) -> &str;

    /// Descriptor of the target method.
    fn method_descriptor(&self) -> &str;

    /// Why this patch exists.
    fn rationale(&self) -> &str {
        ""
    }

    /// Rewrite the matched method.
    ///
    /// Returning an error marks this patch as failed. Any mutation already
    /// made stays in place.
    fn apply(&self, site: &mut PatchSite<'_, C>) -> Result<(), TransformError>;

    /// The (name, descriptor) pair this patch matches against.
    fn method_key(&self) -> MethodKey {
        MethodKey::new(self.method_name(), self.method_descriptor())
    }
}

/// A matched method inside a mutably borrowed class.
pub struct PatchSite<'a, C: ClassRepr> {
    class: &'a mut C,
    index: usize,
    key: MethodKey,
}

impl<'a, C: ClassRepr> PatchSite<'a, C> {
    /// Locate `key` in `class`, trying `hint` first.
    ///
    /// Returns `None` if the class has no method with that key.
    pub fn resolve(class: &'a mut C, key: &MethodKey, hint: usize) -> Option<Self> {
        let index = if class.method(hint).is_some_and(|m| key.matches(m)) {
            hint
        } else {
            (0..class.method_count()).find(|&i| class.method(i).is_some_and(|m| key.matches(m)))?
        };
        Some(Self {
            class,
            index,
            key: key.clone(),
        })
    }

    /// The matched method's key.
    pub fn key(&self) -> &MethodKey {
        &self.key
    }

    /// Position of the matched method in the class.
    pub fn index(&self) -> usize {
        self.index
    }

    /// The class being patched.
    pub fn class(&self) -> &C {
        self.class
    }

    /// Mutable access to the class being patched.
    ///
    /// Adding or removing methods through this reference is allowed; the
    /// site re-checks the matched method on every access.
    pub fn class_mut(&mut self) -> &mut C {
        self.class
    }

    /// The matched method.
    pub fn method(&self) -> Result<&C::Method, TransformError> {
        self.class
            .method(self.index)
            .filter(|m| self.key.matches(*m))
            .ok_or_else(|| TransformError::MethodMissing(self.key.to_string()))
    }

    /// Mutable access to the matched method.
    pub fn method_mut(&mut self) -> Result<&mut C::Method, TransformError> {
        let key = &self.key;
        self.class
            .method_mut(self.index)
            .filter(|m| key.matches(&**m))
            .ok_or_else(|| TransformError::MethodMissing(key.to_string()))
    }
}
