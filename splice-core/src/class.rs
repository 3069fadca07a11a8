//! Host code representation.
//!
//! The class and method trees are owned by the host. Splice only needs to
//! name a class, walk its methods by position and read each method's name
//! and descriptor; everything else is between the host and the patches.

use std::fmt;

/// A method inside a host class representation.
#[diagnostic::on_unimplemented(
    message = "`{Self}` is not a `MethodRepr`",
    label = "missing `MethodRepr` implementation",
    note = "Host method nodes must expose their name and descriptor."
)]
pub trait MethodRepr {
    /// The method's simple name, e.g. `render`.
    fn name(&self) -> &str;

    /// The method's signature descriptor, e.g. `(F)V`.
    fn descriptor(&self) -> &str;

    /// Owned match key for this method.
    fn key(&self) -> MethodKey {
        MethodKey::new(self.name(), self.descriptor())
    }
}

/// A mutable class representation owned by the host.
///
/// Methods are addressed by position. Positions are only meaningful for the
/// duration of one dispatch pass.
#[diagnostic::on_unimplemented(
    message = "`{Self}` is not a `ClassRepr`",
    label = "missing `ClassRepr` implementation",
    note = "Implement `ClassRepr` on the host's class node type to patch it."
)]
pub trait ClassRepr: Send + 'static {
    /// The method node type.
    type Method: MethodRepr;

    /// Fully qualified class name.
    fn name(&self) -> &str;

    /// Number of methods currently in the class.
    fn method_count(&self) -> usize;

    /// The method at `index`, if any.
    fn method(&self, index: usize) -> Option<&Self::Method>;

    /// Mutable access to the method at `index`, if any.
    fn method_mut(&mut self, index: usize) -> Option<&mut Self::Method>;
}

/// The exact (name, descriptor) pair a patch targets.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MethodKey {
    name: String,
    descriptor: String,
}

impl MethodKey {
    /// Create a key from a method name and descriptor.
    pub fn new(name: impl Into<String>, descriptor: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            descriptor: descriptor.into(),
        }
    }

    /// The method name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The method descriptor.
    pub fn descriptor(&self) -> &str {
        &self.descriptor
    }

    /// Whether `method` has exactly this name and descriptor.
    pub fn matches<M: MethodRepr + ?Sized>(&self, method: &M) -> bool {
        self.name == method.name() && self.descriptor == method.descriptor()
    }
}

impl fmt::Display for MethodKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.name, self.descriptor)
    }
}
