//! Summary of one dispatch pass.

use splice_core::PatchOutcome;

/// The outcomes of patching one class.
///
/// An empty report means no patches were pending for the class, either
/// because none were registered or because an earlier pass consumed them.
#[derive(Debug)]
pub struct PatchReport {
    class_name: String,
    outcomes: Vec<PatchOutcome>,
}

impl PatchReport {
    /// Create a report from the outcomes of a pass.
    pub fn new(class_name: impl Into<String>, outcomes: Vec<PatchOutcome>) -> Self {
        Self {
            class_name: class_name.into(),
            outcomes,
        }
    }

    /// A report for a class with nothing to apply.
    pub fn empty(class_name: impl Into<String>) -> Self {
        Self::new(class_name, Vec::new())
    }

    /// The class this report is about.
    pub fn class_name(&self) -> &str {
        &self.class_name
    }

    /// All outcomes in the order they were produced.
    pub fn outcomes(&self) -> &[PatchOutcome] {
        &self.outcomes
    }

    /// Consume the report, keeping the outcomes.
    pub fn into_outcomes(self) -> Vec<PatchOutcome> {
        self.outcomes
    }

    /// Whether the pass did nothing.
    pub fn is_empty(&self) -> bool {
        self.outcomes.is_empty()
    }

    /// Number of outcomes.
    pub fn len(&self) -> usize {
        self.outcomes.len()
    }

    /// Number of patches that applied.
    pub fn applied(&self) -> usize {
        self.outcomes.iter().filter(|o| o.is_applied()).count()
    }

    /// Number of patches that matched but failed.
    pub fn failed(&self) -> usize {
        self.outcomes.iter().filter(|o| o.is_failed()).count()
    }

    /// Number of patches that found no method.
    pub fn unmatched(&self) -> usize {
        self.outcomes.iter().filter(|o| o.is_unmatched()).count()
    }

    /// Whether every patch in the pass applied.
    pub fn is_clean(&self) -> bool {
        self.outcomes.iter().all(PatchOutcome::is_applied)
    }

    /// Outcomes for one patch id. Usually one, more if ids are duplicated.
    pub fn for_patch<'a>(
        &'a self,
        patch_id: &'a str,
    ) -> impl Iterator<Item = &'a PatchOutcome> + 'a {
        self.outcomes.iter().filter(move |o| o.patch_id() == patch_id)
    }
}

impl IntoIterator for PatchReport {
    type Item = PatchOutcome;
    type IntoIter = std::vec::IntoIter<PatchOutcome>;

    fn into_iter(self) -> Self::IntoIter {
        self.outcomes.into_iter()
    }
}
