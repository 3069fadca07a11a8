//! # Dispatch
//!
//! Applies a class's pending patches in one pass over its methods.
//!
//! The registry entry is taken before anything else happens, so a class is
//! patched at most once no matter how often, or from how many threads, the
//! host asks. Each patch runs inside its own failure boundary: an error or a
//! panic is recorded against that patch and the pass moves on.

use crate::{diagnostics, registry::Registry, report::PatchReport};
use splice_core::{
    ClassRepr, MethodKey, MethodRepr, Patch, PatchFault, PatchOutcome, PatchSite, TransformError,
};
use std::{
    any::Any,
    collections::HashMap,
    panic::{self, AssertUnwindSafe},
};

/// Apply every patch registered for `class_name` to `class`.
///
/// Returns an empty report if nothing is pending for the class. Otherwise
/// the report holds one outcome per registered patch: `Applied` and `Failed`
/// in method order, then `Unmatched` in registry order. This function never
/// fails; patch failures are only visible in the report.
pub fn apply_patches<C: ClassRepr>(
    registry: &Registry<C>,
    class_name: &str,
    class: &mut C,
) -> PatchReport {
    let Some(patches) = registry.take(class_name) else {
        return PatchReport::empty(class_name);
    };
    if patches.is_empty() {
        return PatchReport::empty(class_name);
    }

    // Slots per method key, in registry order.
    let mut by_key: HashMap<MethodKey, Vec<usize>> = HashMap::new();
    for (slot, patch) in patches.iter().enumerate() {
        by_key.entry(patch.method_key()).or_default().push(slot);
    }

    // Keys are snapshotted so patches may reshape the class mid-pass.
    let methods: Vec<(usize, MethodKey)> = (0..class.method_count())
        .filter_map(|index| class.method(index).map(|m| (index, m.key())))
        .collect();

    let mut outcomes = Vec::with_capacity(patches.len());
    let mut matched = vec![false; patches.len()];

    for (index, key) in &methods {
        let Some(slots) = by_key.get(key) else {
            continue;
        };
        for &slot in slots {
            if matched[slot] {
                continue;
            }
            matched[slot] = true;
            outcomes.push(attempt(patches[slot].as_ref(), class_name, class, key, *index));
        }
    }

    for (slot, patch) in patches.iter().enumerate() {
        if !matched[slot] {
            diagnostics::unmatched(patch.id(), class_name, &patch.method_key());
            outcomes.push(PatchOutcome::Unmatched {
                patch_id: patch.id().to_owned(),
            });
        }
    }

    let report = PatchReport::new(class_name, outcomes);
    diagnostics::pass_finished(&report);
    report
}

fn attempt<C: ClassRepr>(
    patch: &dyn Patch<C>,
    class_name: &str,
    class: &mut C,
    key: &MethodKey,
    hint: usize,
) -> PatchOutcome {
    diagnostics::attempting(patch.id(), class_name, key);

    let result = match PatchSite::resolve(class, key, hint) {
        Some(mut site) => match panic::catch_unwind(AssertUnwindSafe(|| patch.apply(&mut site))) {
            Ok(Ok(())) => Ok(()),
            Ok(Err(err)) => Err(PatchFault::Transform(err)),
            Err(payload) => Err(PatchFault::Panicked(panic_message(payload.as_ref()))),
        },
        None => Err(PatchFault::Transform(TransformError::MethodMissing(
            key.to_string(),
        ))),
    };

    match result {
        Ok(()) => {
            diagnostics::applied(patch.id(), class_name, key, patch.rationale());
            PatchOutcome::Applied {
                patch_id: patch.id().to_owned(),
                method: key.clone(),
            }
        }
        Err(fault) => {
            diagnostics::failed(patch.id(), class_name, key, &fault);
            PatchOutcome::Failed {
                patch_id: patch.id().to_owned(),
                method: key.clone(),
                fault,
            }
        }
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(msg) = payload.downcast_ref::<&str>() {
        (*msg).to_owned()
    } else if let Some(msg) = payload.downcast_ref::<String>() {
        msg.clone()
    } else {
        "non-string panic payload".to_owned()
    }
}
