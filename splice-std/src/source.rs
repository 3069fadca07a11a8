//! Discovery facilities.
//!
//! A [`PatchSource`] is asked once, at load time, for every patch it knows
//! about. Anything that can produce the full set up front works: a static
//! table, a closure reading a config file, or a link-time collection (see
//! [`crate::collected`], behind the `inventory` feature).

use splice_core::{ClassRepr, DiscoveryError, Patch, PatchRef};
use std::sync::Arc;

/// Enumerates every patch available to a registry.
#[diagnostic::on_unimplemented(
    message = "`{Self}` is not a `PatchSource` for `{C}`",
    label = "missing `PatchSource` implementation",
    note = "Implement `discover` or pass a closure returning `Result<Vec<PatchRef<{C}>>, DiscoveryError>`."
)]
pub trait PatchSource<C: ClassRepr> {
    /// Return all patches, in discovery order.
    fn discover(&self) -> Result<Vec<PatchRef<C>>, DiscoveryError>;
}

impl<C, F> PatchSource<C> for F
where
    C: ClassRepr,
    F: Fn() -> Result<Vec<PatchRef<C>>, DiscoveryError>,
{
    fn discover(&self) -> Result<Vec<PatchRef<C>>, DiscoveryError> {
        (self)()
    }
}

/// A fixed list of patches.
pub struct PatchTable<C: ClassRepr> {
    patches: Vec<PatchRef<C>>,
}

impl<C: ClassRepr> PatchTable<C> {
    /// Create an empty table.
    pub fn new() -> Self {
        Self {
            patches: Vec::new(),
        }
    }

    /// Append a patch.
    pub fn with<P: Patch<C>>(mut self, patch: P) -> Self {
        self.patches.push(Arc::new(patch));
        self
    }

    /// Append a shared patch handle.
    pub fn push(&mut self, patch: PatchRef<C>) {
        self.patches.push(patch);
    }

    /// Get the number of patches.
    pub fn len(&self) -> usize {
        self.patches.len()
    }

    /// Check if the table is empty.
    pub fn is_empty(&self) -> bool {
        self.patches.is_empty()
    }
}

impl<C: ClassRepr> Default for PatchTable<C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: ClassRepr> FromIterator<PatchRef<C>> for PatchTable<C> {
    fn from_iter<I: IntoIterator<Item = PatchRef<C>>>(iter: I) -> Self {
        Self {
            patches: iter.into_iter().collect(),
        }
    }
}

impl<C: ClassRepr> PatchSource<C> for PatchTable<C> {
    fn discover(&self) -> Result<Vec<PatchRef<C>>, DiscoveryError> {
        Ok(self.patches.clone())
    }
}

/// Concatenation of two sources, `first` then `second`.
pub struct Chained<A, B> {
    first: A,
    second: B,
}

impl<A, B> Chained<A, B> {
    /// Chain two sources.
    pub fn new(first: A, second: B) -> Self {
        Self { first, second }
    }
}

impl<C, A, B> PatchSource<C> for Chained<A, B>
where
    C: ClassRepr,
    A: PatchSource<C>,
    B: PatchSource<C>,
{
    fn discover(&self) -> Result<Vec<PatchRef<C>>, DiscoveryError> {
        let mut patches = self.first.discover()?;
        patches.extend(self.second.discover()?);
        Ok(patches)
    }
}
