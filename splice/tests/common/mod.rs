#![allow(dead_code)]

use splice::{
    PatchRef, PatchTable, PluginConfig,
    lifecycle::PatchPlugin,
    testing::{CallLog, RecordingPatch, TestClass},
};
use std::sync::Arc;

// ============================================================================
// Test Classes
// ============================================================================

pub const TARGET: &str = "demo.Target";
pub const OTHER: &str = "demo.Other";

/// `demo.Target` with `m()V` and `n()I`.
pub fn target_class() -> TestClass {
    TestClass::new(TARGET)
        .with_method("m", "()V")
        .with_method("n", "()I")
}

pub fn other_class() -> TestClass {
    TestClass::new(OTHER).with_method("run", "()V")
}

// ============================================================================
// Test Plugins
// ============================================================================

pub fn recording(
    id: &str,
    class: &str,
    method: &str,
    desc: &str,
    log: &CallLog,
) -> PatchRef<TestClass> {
    Arc::new(RecordingPatch::new(id, class, method, desc).with_log(log))
}

/// A loaded plugin over `patches`.
pub fn loaded_plugin(
    patches: Vec<PatchRef<TestClass>>,
    precedence: bool,
) -> PatchPlugin<TestClass, PatchTable<TestClass>> {
    use splice::TransformPlugin;

    let plugin = PatchPlugin::new(patches.into_iter().collect(), PluginConfig::new(precedence));
    plugin.on_load("demo.mixins").unwrap();
    plugin
}
