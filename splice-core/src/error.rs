//! Error types for Splice.
//!
//! This module provides a structured error hierarchy using `thiserror`:
//!
//! - [`SpliceError`] - Top-level error type for all Splice operations
//! - [`DiscoveryError`] - Errors while collecting patches at load time
//! - [`TransformError`] - Errors returned by an individual patch
//! - [`LoadError`] - Errors from the host-facing load phase

use thiserror::Error;

/// A boxed error type for dynamic error handling.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Top-level error type for all Splice operations.
#[derive(Error, Debug)]
pub enum SpliceError {
    /// Patch discovery failed.
    #[error("discovery error: {0}")]
    Discovery(#[from] DiscoveryError),

    /// The load phase failed.
    #[error("load error: {0}")]
    Load(#[from] LoadError),

    /// A patch failed to transform its method.
    #[error("transform error: {0}")]
    Transform(#[from] TransformError),

    /// A custom error occurred.
    #[error(transparent)]
    Custom(BoxError),
}

/// Errors raised while building the registry.
///
/// Any of these aborts the load phase: no patch from the failed set is used.
#[derive(Error, Debug)]
pub enum DiscoveryError {
    /// A discovered patch declares an unusable target.
    #[error("malformed patch `{patch}`: {reason}")]
    Malformed {
        /// Identifier of the offending patch (may be empty).
        patch: String,
        /// What is wrong with it.
        reason: String,
    },

    /// The discovery facility itself failed.
    #[error("patch source failed")]
    Source(#[source] BoxError),
}

impl DiscoveryError {
    /// Shorthand for [`DiscoveryError::Malformed`].
    pub fn malformed(patch: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Malformed {
            patch: patch.into(),
            reason: reason.into(),
        }
    }
}

/// Errors a patch may return from [`Patch::apply`](crate::Patch::apply).
///
/// The dispatcher records these as failed outcomes; they never escape a pass.
#[derive(Error, Debug)]
pub enum TransformError {
    /// The method the patch was matched to can no longer be resolved,
    /// usually because an earlier patch removed it.
    #[error("method {0} is no longer present in the class")]
    MethodMissing(String),

    /// The method body did not have the shape the patch expected.
    #[error("unexpected method shape: {0}")]
    UnexpectedShape(String),

    /// A custom transform error.
    #[error(transparent)]
    Custom(BoxError),
}

impl TransformError {
    /// Wrap any error as a [`TransformError::Custom`].
    pub fn custom(err: impl Into<BoxError>) -> Self {
        Self::Custom(err.into())
    }
}

/// Errors surfaced to the host from the load hook.
#[derive(Error, Debug)]
pub enum LoadError {
    /// Discovery failed and the registry was not built.
    #[error(transparent)]
    Discovery(#[from] DiscoveryError),

    /// The registry was already built for this plugin.
    #[error("patches were already loaded for namespace `{0}`")]
    AlreadyLoaded(String),
}

// Convenience conversions
impl From<BoxError> for SpliceError {
    fn from(err: BoxError) -> Self {
        SpliceError::Custom(err)
    }
}

impl From<BoxError> for TransformError {
    fn from(err: BoxError) -> Self {
        TransformError::Custom(err)
    }
}

impl From<BoxError> for DiscoveryError {
    fn from(err: BoxError) -> Self {
        DiscoveryError::Source(err)
    }
}
