//! Link-time patch collection via `inventory`.
//!
//! Patch crates submit factories from anywhere in the program; the host's
//! load hook collects them all through an [`InventorySource`]. Collections
//! are declared per class representation type with
//! [`define_patch_collection!`](crate::define_patch_collection) and filled
//! with [`register_patch!`](crate::register_patch).
//!
//! Link-time collection has no defined order. Pair it with
//! [`PatchOrder::ById`](crate::registry::PatchOrder::ById) when patches on the
//! same method must compose deterministically.

use crate::source::PatchSource;
use splice_core::{ClassRepr, DiscoveryError, PatchRef};
use std::marker::PhantomData;

/// An `inventory` collection of patch factories for one class type.
///
/// Implemented by the type [`define_patch_collection!`] declares.
///
/// [`define_patch_collection!`]: crate::define_patch_collection
pub trait PatchCollection: inventory::Collect {
    /// The class representation the collected patches target.
    type Class: ClassRepr;

    /// Instantiate the patch this entry was submitted for.
    fn create(&self) -> PatchRef<Self::Class>;
}

/// A [`PatchSource`] reading every entry of the collection `T`.
pub struct InventorySource<T> {
    _collection: PhantomData<fn() -> T>,
}

impl<T> InventorySource<T> {
    /// Source over the collection `T`.
    pub const fn new() -> Self {
        Self {
            _collection: PhantomData,
        }
    }
}

impl<T> Default for InventorySource<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: PatchCollection> PatchSource<T::Class> for InventorySource<T> {
    fn discover(&self) -> Result<Vec<PatchRef<T::Class>>, DiscoveryError> {
        Ok(inventory::iter::<T>
            .into_iter()
            .map(PatchCollection::create)
            .collect())
    }
}

/// Declares a link-time patch collection for a class representation type.
///
/// # Example
/// ```rust,ignore
/// splice::define_patch_collection! {
///     /// Patches for the game's class nodes.
///     pub GamePatches for ClassNode
/// }
///
/// let registry = Registry::from_source(&GamePatches::source(), PatchOrder::ById)?;
/// ```
#[macro_export]
macro_rules! define_patch_collection {
    ($(#[$meta:meta])* $vis:vis $name:ident for $class:ty) => {
        $(#[$meta])*
        $vis struct $name {
            factory: fn() -> $crate::splice_core::PatchRef<$class>,
        }

        impl $name {
            /// Wrap a factory for submission.
            pub const fn new(factory: fn() -> $crate::splice_core::PatchRef<$class>) -> Self {
                Self { factory }
            }

            /// A source over every patch submitted to this collection.
            pub const fn source() -> $crate::collected::InventorySource<$name> {
                $crate::collected::InventorySource::new()
            }
        }

        impl $crate::collected::PatchCollection for $name {
            type Class = $class;

            fn create(&self) -> $crate::splice_core::PatchRef<$class> {
                (self.factory)()
            }
        }

        $crate::inventory::collect!($name);
    };
}

/// Submits a patch to a collection declared with
/// [`define_patch_collection!`](crate::define_patch_collection).
///
/// The expression is evaluated once per discovery, when the collection is
/// read.
///
/// # Example
/// ```rust,ignore
/// splice::register_patch!(GamePatches, SkipIntro);
/// ```
#[macro_export]
macro_rules! register_patch {
    ($collection:ty, $patch:expr) => {
        $crate::inventory::submit! {
            <$collection>::new({
                fn factory() -> $crate::splice_core::PatchRef<
                    <$collection as $crate::collected::PatchCollection>::Class,
                > {
                    ::std::sync::Arc::new($patch)
                }
                factory
            })
        }
    };
}
