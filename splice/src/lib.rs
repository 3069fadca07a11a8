//! # splice - Apply-Once Method Patching
//!
//! `splice` lets independently written patches rewrite single methods of
//! classes whose loading is driven by a host transformation pipeline. The
//! host calls into a [`PatchPlugin`] around each class transform; every
//! patch registered for that class is applied exactly once, in registry
//! order, with each patch's failure contained to itself.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use splice::prelude::*;
//!
//! #[splice::patch(target = "game.Menu", method = "showIntro", descriptor = "()V")]
//! fn skip_intro(site: &mut PatchSite<'_, ClassNode>) -> Result<(), TransformError> {
//!     site.method_mut()?.instructions.clear();
//!     Ok(())
//! }
//!
//! let plugin = PatchPlugin::new(PatchTable::new().with(skip_intro), PluginConfig::new(true));
//! plugin.on_load("game.mixins")?;
//! ```

#![deny(clippy::wildcard_imports)]
#![warn(missing_docs)]

pub use splice_core::{
    // Error types
    BoxError,
    // Host representation
    ClassRepr,
    DiscoveryError,
    LoadError,
    MethodKey,
    MethodRepr,
    // Patch contract
    Patch,
    // Outcomes
    PatchFault,
    PatchOutcome,
    PatchRef,
    PatchSite,
    SpliceError,
    TransformError,
};

// Registry and dispatch
pub use splice_std::{
    Chained, ClassState, FnPatch, PatchOrder, PatchReport, PatchSource, PatchTable, Registry,
    RegistryBuilder, apply_patches,
};

pub mod lifecycle;

pub use lifecycle::{GroupMeta, PatchPlugin, Phase, PluginConfig, TransformPlugin};

/// Testing utilities.
pub mod testing {
    #![allow(clippy::wildcard_imports)]
    pub use splice_std::testing::*;
}

/// Prelude module - common imports for Splice.
///
/// # Usage
///
/// ```rust,ignore
/// use splice::prelude::*;
/// ```
pub mod prelude {
    pub use crate::{
        ClassRepr, DiscoveryError, FnPatch, MethodKey, MethodRepr, Patch, PatchOrder,
        PatchOutcome, PatchPlugin, PatchReport, PatchSite, PatchSource, PatchTable, PluginConfig,
        Registry, TransformError, TransformPlugin,
    };
}

#[cfg(feature = "macros")]
pub use splice_macros::patch;

#[cfg(feature = "inventory")]
pub use splice_std::{
    collected::{InventorySource, PatchCollection},
    define_patch_collection, inventory, register_patch,
};
