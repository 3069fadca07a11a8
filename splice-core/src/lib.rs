//! # splice-core
//!
//! Core traits for the Splice method patching engine.
//!
//! This crate has minimal dependencies and is designed to be imported by
//! patch authors and host integrations that don't need the full
//! `splice-std` implementation.
//!
//! # Contract
//!
//! ## Host side ([`ClassRepr`], [`MethodRepr`])
//!
//! The host owns the class trees. It implements these two traits on its own
//! node types so Splice can walk methods by position and compare their
//! (name, descriptor) pair against a patch's [`MethodKey`].
//!
//! ## Patch side ([`Patch`])
//!
//! A patch declares one target class and one method key, and rewrites the
//! matched method through a [`PatchSite`]. Patches are stored type-erased as
//! [`PatchRef`].
//!
//! ## Results ([`PatchOutcome`])
//!
//! Every registered patch ends a pass as applied, failed or unmatched.
//!
//! # Error Types
//!
//! - [`SpliceError`] - Top-level error type
//! - [`DiscoveryError`] - Load-time, fatal
//! - [`TransformError`] - Per patch, recovered by the dispatcher
//! - [`LoadError`] - Returned to the host from the load hook

#![deny(clippy::wildcard_imports)]
#![warn(missing_docs)]

mod class;
mod error;
mod outcome;
mod patch;

// Re-exports
pub use class::{ClassRepr, MethodKey, MethodRepr};
pub use error::{BoxError, DiscoveryError, LoadError, SpliceError, TransformError};
pub use outcome::{PatchFault, PatchOutcome};
pub use patch::{Patch, PatchRef, PatchSite};
