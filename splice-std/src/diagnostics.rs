//! Structured diagnostics for registration and dispatch.
//!
//! Events go through `tracing` when the feature is enabled; verbosity is
//! whatever the host's subscriber allows. Without the feature every
//! function here compiles to nothing.

use crate::report::PatchReport;
use splice_core::{MethodKey, PatchFault};

pub(crate) fn registered(patch: &str, class: &str, method: &MethodKey, rationale: &str) {
    #[cfg(feature = "tracing")]
    {
        tracing::debug!(
            patch = %patch,
            class = %class,
            method = %method,
            rationale = %rationale,
            "Registering patch"
        );
    }

    #[cfg(not(feature = "tracing"))]
    {
        let _ = (patch, class, method, rationale);
    }
}

pub(crate) fn attempting(patch: &str, class: &str, method: &MethodKey) {
    #[cfg(feature = "tracing")]
    {
        tracing::trace!(patch = %patch, class = %class, method = %method, "Attempting patch");
    }

    #[cfg(not(feature = "tracing"))]
    {
        let _ = (patch, class, method);
    }
}

pub(crate) fn applied(patch: &str, class: &str, method: &MethodKey, rationale: &str) {
    #[cfg(feature = "tracing")]
    {
        tracing::info!(
            patch = %patch,
            class = %class,
            method = %method,
            rationale = %rationale,
            "Patched {}.{}",
            class,
            method.name()
        );
    }

    #[cfg(not(feature = "tracing"))]
    {
        let _ = (patch, class, method, rationale);
    }
}

pub(crate) fn failed(patch: &str, class: &str, method: &MethodKey, fault: &PatchFault) {
    #[cfg(feature = "tracing")]
    {
        tracing::error!(
            patch = %patch,
            class = %class,
            method = %method,
            error = %fault,
            "Error applying patch"
        );
    }

    #[cfg(not(feature = "tracing"))]
    {
        let _ = (patch, class, method, fault);
    }
}

pub(crate) fn unmatched(patch: &str, class: &str, method: &MethodKey) {
    #[cfg(feature = "tracing")]
    {
        tracing::warn!(
            patch = %patch,
            class = %class,
            method = %method,
            "Patch target method not found"
        );
    }

    #[cfg(not(feature = "tracing"))]
    {
        let _ = (patch, class, method);
    }
}

pub(crate) fn pass_finished(report: &PatchReport) {
    #[cfg(feature = "tracing")]
    {
        tracing::debug!(
            class = %report.class_name(),
            applied = report.applied(),
            failed = report.failed(),
            unmatched = report.unmatched(),
            "Finished patching class"
        );
    }

    #[cfg(not(feature = "tracing"))]
    {
        let _ = report;
    }
}

#[cfg(all(test, feature = "tracing"))]
mod tests {
    use crate::{
        dispatch::apply_patches,
        registry::Registry,
        testing::{FailingPatch, RecordingPatch, TestClass},
    };
    use std::{
        collections::HashMap,
        fmt,
        sync::{Arc, Mutex, PoisonError},
    };
    use tracing::{
        Event, Level, Subscriber,
        field::{Field, Visit},
    };
    use tracing_subscriber::{
        layer::{Context, Layer, SubscriberExt},
        registry,
    };

    #[derive(Debug, Clone)]
    struct Captured {
        level: Level,
        fields: HashMap<String, String>,
    }

    impl Captured {
        fn field(&self, name: &str) -> Option<&str> {
            self.fields.get(name).map(String::as_str)
        }
    }

    #[derive(Default)]
    struct FieldVisitor(HashMap<String, String>);

    impl Visit for FieldVisitor {
        fn record_str(&mut self, field: &Field, value: &str) {
            self.0.insert(field.name().to_owned(), value.to_owned());
        }

        fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
            self.0.insert(field.name().to_owned(), format!("{value:?}"));
        }
    }

    #[derive(Clone, Default)]
    struct CaptureLayer {
        events: Arc<Mutex<Vec<Captured>>>,
    }

    impl CaptureLayer {
        fn events(&self) -> Vec<Captured> {
            self.events
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .clone()
        }

        fn with_message(&self, message: &str) -> Vec<Captured> {
            self.events()
                .into_iter()
                .filter(|e| e.field("message") == Some(message))
                .collect()
        }
    }

    impl<S: Subscriber> Layer<S> for CaptureLayer {
        fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
            let mut visitor = FieldVisitor::default();
            event.record(&mut visitor);
            self.events
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .push(Captured {
                    level: *event.metadata().level(),
                    fields: visitor.0,
                });
        }
    }

    fn run_pass() -> CaptureLayer {
        let layer = CaptureLayer::default();
        let subscriber = registry().with(layer.clone());

        tracing::subscriber::with_default(subscriber, || {
            let registry = Registry::builder()
                .register(RecordingPatch::new("good", "demo.A", "m", "()V"))
                .register(FailingPatch::new("bad", "demo.A", "n", "()I"))
                .register(RecordingPatch::new("lost", "demo.A", "q", "()V"))
                .build()
                .unwrap();
            let mut class = TestClass::new("demo.A")
                .with_method("m", "()V")
                .with_method("n", "()I");
            apply_patches(&registry, "demo.A", &mut class);
        });

        layer
    }

    #[test]
    fn registration_is_logged_at_debug() {
        let registered = run_pass().with_message("Registering patch");
        assert_eq!(registered.len(), 3);
        assert!(registered.iter().all(|e| e.level == Level::DEBUG));
        assert!(
            registered
                .iter()
                .any(|e| e.field("patch") == Some("good") && e.field("method") == Some("m()V"))
        );
    }

    #[test]
    fn attempts_are_logged_at_trace() {
        let attempts = run_pass().with_message("Attempting patch");
        assert_eq!(attempts.len(), 2);
        assert!(attempts.iter().all(|e| e.level == Level::TRACE));
    }

    #[test]
    fn applied_patch_is_logged_at_info() {
        let applied = run_pass().with_message("Patched demo.A.m");
        assert_eq!(applied.len(), 1);

        let event = &applied[0];
        assert_eq!(event.level, Level::INFO);
        assert_eq!(event.field("patch"), Some("good"));
        assert_eq!(event.field("class"), Some("demo.A"));
        assert_eq!(event.field("method"), Some("m()V"));
        assert_eq!(event.field("rationale"), Some("records invocations for tests"));
    }

    #[test]
    fn failure_is_logged_at_error_with_detail() {
        let failed = run_pass().with_message("Error applying patch");
        assert_eq!(failed.len(), 1);

        let event = &failed[0];
        assert_eq!(event.level, Level::ERROR);
        assert_eq!(event.field("patch"), Some("bad"));
        assert_eq!(event.field("class"), Some("demo.A"));
        assert_eq!(event.field("method"), Some("n()I"));
        let error = event.field("error").unwrap_or_default();
        assert!(error.contains("bad refuses to patch n()I"), "{error}");
    }

    #[test]
    fn unmatched_patch_is_logged_at_warn() {
        let unmatched = run_pass().with_message("Patch target method not found");
        assert_eq!(unmatched.len(), 1);

        let event = &unmatched[0];
        assert_eq!(event.level, Level::WARN);
        assert_eq!(event.field("patch"), Some("lost"));
        assert_eq!(event.field("class"), Some("demo.A"));
        assert_eq!(event.field("method"), Some("q()V"));
    }

    #[test]
    fn pass_summary_counts_outcomes() {
        let summary = run_pass().with_message("Finished patching class");
        assert_eq!(summary.len(), 1);

        let event = &summary[0];
        assert_eq!(event.level, Level::DEBUG);
        assert_eq!(event.field("applied"), Some("1"));
        assert_eq!(event.field("failed"), Some("1"));
        assert_eq!(event.field("unmatched"), Some("1"));
    }
}
