//! Testing utilities for Splice.
//!
//! This module provides a minimal in-memory class model and a few canned
//! patches, so dispatch behavior can be exercised without a real host.
//!
//! # Features
//!
//! - [`TestClass`] / [`TestMethod`]: a class tree whose method bodies are
//!   lists of strings
//! - [`RecordingPatch`]: appends its id to the method body and records what
//!   it saw
//! - [`FailingPatch`]: always returns a [`TransformError`]
//! - [`PanickingPatch`]: always panics

use splice_core::{ClassRepr, MethodKey, MethodRepr, Patch, PatchSite, TransformError};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

// ============================================================================
// Class model
// ============================================================================

/// A method with a string-list body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TestMethod {
    name: String,
    descriptor: String,
    /// The method body; patches append to it.
    pub body: Vec<String>,
}

impl TestMethod {
    /// Create a method with an empty body.
    pub fn new(name: impl Into<String>, descriptor: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            descriptor: descriptor.into(),
            body: Vec::new(),
        }
    }
}

impl MethodRepr for TestMethod {
    fn name(&self) -> &str {
        &self.name
    }

    fn descriptor(&self) -> &str {
        &self.descriptor
    }
}

/// An in-memory class.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TestClass {
    name: String,
    /// Methods in declaration order.
    pub methods: Vec<TestMethod>,
}

impl TestClass {
    /// Create a class with no methods.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            methods: Vec::new(),
        }
    }

    /// Add a method with an empty body.
    pub fn with_method(mut self, name: &str, descriptor: &str) -> Self {
        self.methods.push(TestMethod::new(name, descriptor));
        self
    }

    /// Body of the method with the given key, if present.
    pub fn body(&self, name: &str, descriptor: &str) -> Option<&[String]> {
        self.methods
            .iter()
            .find(|m| m.name == name && m.descriptor == descriptor)
            .map(|m| m.body.as_slice())
    }

    /// Remove the method with the given key. Returns whether one was removed.
    pub fn remove_method(&mut self, name: &str, descriptor: &str) -> bool {
        let before = self.methods.len();
        self.methods.retain(|m| !(m.name == name && m.descriptor == descriptor));
        self.methods.len() != before
    }
}

impl ClassRepr for TestClass {
    type Method = TestMethod;

    fn name(&self) -> &str {
        &self.name
    }

    fn method_count(&self) -> usize {
        self.methods.len()
    }

    fn method(&self, index: usize) -> Option<&TestMethod> {
        self.methods.get(index)
    }

    fn method_mut(&mut self, index: usize) -> Option<&mut TestMethod> {
        self.methods.get_mut(index)
    }
}

// ============================================================================
// Call log
// ============================================================================

/// One recorded patch invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Call {
    /// The patch that ran.
    pub patch_id: String,
    /// The method it ran on.
    pub method: MethodKey,
    /// The method body as the patch found it.
    pub body_before: Vec<String>,
}

/// A shared, cloneable record of patch invocations.
///
/// Give the same log to several patches to observe their relative order.
#[derive(Debug, Clone, Default)]
pub struct CallLog {
    calls: Arc<Mutex<Vec<Call>>>,
}

impl CallLog {
    /// Create an empty log.
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Vec<Call>> {
        self.calls.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Get a clone of the recorded calls.
    pub fn calls(&self) -> Vec<Call> {
        self.lock().clone()
    }

    /// Ids of the patches that ran, in order.
    pub fn patch_ids(&self) -> Vec<String> {
        self.lock().iter().map(|c| c.patch_id.clone()).collect()
    }

    /// Get the number of recorded calls.
    pub fn count(&self) -> usize {
        self.lock().len()
    }

    /// Clear all recorded calls.
    pub fn clear(&self) {
        self.lock().clear();
    }

    fn record(&self, call: Call) {
        self.lock().push(call);
    }
}

// ============================================================================
// Recording Patch
// ============================================================================

/// A patch that appends its id to the target method's body.
///
/// # Example
///
/// ```rust,ignore
/// let patch = RecordingPatch::new("p1", "demo.A", "m", "()V");
/// let log = patch.calls();
///
/// // Register and dispatch...
///
/// assert_eq!(log.count(), 1);
/// ```
pub struct RecordingPatch {
    id: String,
    target_class: String,
    key: MethodKey,
    log: CallLog,
}

impl RecordingPatch {
    /// Create a recording patch with its own log.
    pub fn new(id: &str, target_class: &str, method_name: &str, descriptor: &str) -> Self {
        Self {
            id: id.to_owned(),
            target_class: target_class.to_owned(),
            key: MethodKey::new(method_name, descriptor),
            log: CallLog::new(),
        }
    }

    /// Record into `log` instead of a private log.
    pub fn with_log(mut self, log: &CallLog) -> Self {
        self.log = log.clone();
        self
    }

    /// Handle to this patch's log.
    pub fn calls(&self) -> CallLog {
        self.log.clone()
    }
}

impl Patch<TestClass> for RecordingPatch {
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
        "records invocations for tests"
    }

    fn apply(&self, site: &mut PatchSite<'_, TestClass>) -> Result<(), TransformError> {
        let method = site.method_mut()?;
        self.log.record(Call {
            patch_id: self.id.clone(),
            method: method.key(),
            body_before: method.body.clone(),
        });
        method.body.push(self.id.clone());
        Ok(())
    }
}

// ============================================================================
// Failing and Panicking Patches
// ============================================================================

/// A patch that always fails with [`TransformError::UnexpectedShape`].
pub struct FailingPatch {
    id: String,
    target_class: String,
    key: MethodKey,
    log: CallLog,
}

impl FailingPatch {
    /// Create a failing patch.
    pub fn new(id: &str, target_class: &str, method_name: &str, descriptor: &str) -> Self {
        Self {
            id: id.to_owned(),
            target_class: target_class.to_owned(),
            key: MethodKey::new(method_name, descriptor),
            log: CallLog::new(),
        }
    }

    /// Record into `log` instead of a private log.
    pub fn with_log(mut self, log: &CallLog) -> Self {
        self.log = log.clone();
        self
    }
}

impl Patch<TestClass> for FailingPatch {
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

    fn apply(&self, site: &mut PatchSite<'_, TestClass>) -> Result<(), TransformError> {
        let method = site.method()?;
        self.log.record(Call {
            patch_id: self.id.clone(),
            method: method.key(),
            body_before: method.body.clone(),
        });
        Err(TransformError::UnexpectedShape(format!(
            "{} refuses to patch {}",
            self.id, self.key
        )))
    }
}

/// A patch that always panics with `"<id> exploded"`.
pub struct PanickingPatch {
    id: String,
    target_class: String,
    key: MethodKey,
}

impl PanickingPatch {
    /// Create a panicking patch.
    pub fn new(id: &str, target_class: &str, method_name: &str, descriptor: &str) -> Self {
        Self {
            id: id.to_owned(),
            target_class: target_class.to_owned(),
            key: MethodKey::new(method_name, descriptor),
        }
    }
}

impl Patch<TestClass> for PanickingPatch {
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

    fn apply(&self, _site: &mut PatchSite<'_, TestClass>) -> Result<(), TransformError> {
        panic!("{} exploded", self.id)
    }
}
