//! # splice-std
//!
//! Standard implementations for the Splice method patching engine.
//!
//! This crate provides:
//! - **Registry**: [`Registry`], [`RegistryBuilder`], [`PatchOrder`]
//! - **Dispatch**: [`apply_patches`] and its [`PatchReport`]
//! - **Discovery**: [`PatchSource`], [`PatchTable`], [`Chained`], and
//!   link-time collection (`inventory` feature)
//! - **Closure patches**: [`FnPatch`]
//! - **Testing**: an in-memory class model and canned patches

#![deny(clippy::wildcard_imports)]
#![warn(missing_docs)]

// Re-export core traits
pub use splice_core;

// Modules
mod diagnostics;
pub mod dispatch;
pub mod fn_patch;
pub mod registry;
pub mod report;
pub mod source;
pub mod testing;

#[cfg(feature = "inventory")]
pub mod collected;

pub use dispatch::apply_patches;
pub use fn_patch::FnPatch;
pub use registry::{ClassState, PatchOrder, Registry, RegistryBuilder};
pub use report::PatchReport;
pub use source::{Chained, PatchSource, PatchTable};

#[cfg(feature = "inventory")]
pub use inventory;
