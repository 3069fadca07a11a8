//! Link-time patch discovery through `inventory`.

#![cfg(feature = "inventory")]

use splice::{
    FnPatch, PatchOrder, PatchSite, PluginConfig, TransformPlugin,
    lifecycle::{GroupMeta, PatchPlugin},
    testing::{RecordingPatch, TestClass},
};

mod common;
use common::{TARGET, target_class};

splice::define_patch_collection! {
    /// Patches collected for the integration tests.
    pub DemoPatches for TestClass
}

splice::register_patch!(DemoPatches, RecordingPatch::new("b-second", "demo.Target", "m", "()V"));
splice::register_patch!(DemoPatches, RecordingPatch::new("a-first", "demo.Target", "m", "()V"));
splice::register_patch!(
    DemoPatches,
    FnPatch::new("n-marker", "demo.Target", "n", "()I", |site: &mut PatchSite<'_, TestClass>| {
        site.method_mut()?.body.push("marked".into());
        Ok(())
    })
);

#[test]
fn test_collection_feeds_plugin() {
    let config = PluginConfig::new(false).order(PatchOrder::ById);
    let plugin = PatchPlugin::new(DemoPatches::source(), config);
    plugin.on_load("demo.mixins").unwrap();

    let registry = plugin.registry().unwrap();
    assert_eq!(registry.pending_patches(), 3);
    assert_eq!(registry.pending_classes(), vec![TARGET]);

    let mut node = target_class();
    let report = plugin.after_transform(TARGET, &mut node, "demo.mixins", &GroupMeta::default());

    assert_eq!(report.applied(), 3);
    // ById ordering makes the composition deterministic.
    assert_eq!(node.body("m", "()V").unwrap(), ["a-first", "b-second"]);
    assert_eq!(node.body("n", "()I").unwrap(), ["marked"]);
}
