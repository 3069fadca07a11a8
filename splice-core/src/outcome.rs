//! Per-patch outcomes of a dispatch pass.

use crate::{class::MethodKey, error::TransformError};
use std::fmt;

/// Why a matched patch did not apply cleanly.
#[derive(Debug)]
pub enum PatchFault {
    /// The patch returned an error.
    Transform(TransformError),
    /// The patch panicked; carries the panic message if one was available.
    Panicked(String),
}

impl fmt::Display for PatchFault {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PatchFault::Transform(err) => write!(f, "{err}"),
            PatchFault::Panicked(msg) => write!(f, "patch panicked: {msg}"),
        }
    }
}

impl From<TransformError> for PatchFault {
    fn from(err: TransformError) -> Self {
        PatchFault::Transform(err)
    }
}

/// What happened to one patch during one pass.
#[derive(Debug)]
pub enum PatchOutcome {
    /// The patch rewrote `method` successfully.
    Applied {
        /// Patch identifier.
        patch_id: String,
        /// The method it was applied to.
        method: MethodKey,
    },
    /// The patch's target method does not exist in the class.
    Unmatched {
        /// Patch identifier.
        patch_id: String,
    },
    /// The patch matched `method` but failed.
    Failed {
        /// Patch identifier.
        patch_id: String,
        /// The method it was applied to.
        method: MethodKey,
        /// The captured failure.
        fault: PatchFault,
    },
}

impl PatchOutcome {
    /// Identifier of the patch this outcome is about.
    pub fn patch_id(&self) -> &str {
        match self {
            PatchOutcome::Applied { patch_id, .. }
            | PatchOutcome::Unmatched { patch_id }
            | PatchOutcome::Failed { patch_id, .. } => patch_id,
        }
    }

    /// The method involved, if the patch was matched.
    pub fn method(&self) -> Option<&MethodKey> {
        match self {
            PatchOutcome::Applied { method, .. } | PatchOutcome::Failed { method, .. } => {
                Some(method)
            }
            PatchOutcome::Unmatched { .. } => None,
        }
    }

    /// Whether the patch applied.
    pub fn is_applied(&self) -> bool {
        matches!(self, PatchOutcome::Applied { .. })
    }

    /// Whether the patch matched but failed.
    pub fn is_failed(&self) -> bool {
        matches!(self, PatchOutcome::Failed { .. })
    }

    /// Whether the patch found no method.
    pub fn is_unmatched(&self) -> bool {
        matches!(self, PatchOutcome::Unmatched { .. })
    }
}

impl fmt::Display for PatchOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PatchOutcome::Applied { patch_id, method } => {
                write!(f, "applied `{patch_id}` to {method}")
            }
            PatchOutcome::Unmatched { patch_id } => write!(f, "`{patch_id}` matched no method"),
            PatchOutcome::Failed {
                patch_id,
                method,
                fault,
            } => write!(f, "`{patch_id}` failed on {method}: {fault}"),
        }
    }
}
