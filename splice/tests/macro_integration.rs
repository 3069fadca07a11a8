//! Integration tests for the `#[patch]` attribute.

#![cfg(feature = "macros")]

use splice::{
    Patch, PatchSite, PatchTable, PluginConfig, TransformError, TransformPlugin,
    lifecycle::{GroupMeta, PatchPlugin},
    testing::TestClass,
};

mod common;
use common::{TARGET, target_class};

// Test: #[splice::patch] basic usage
#[splice::patch(target = "demo.Target", method = "m", descriptor = "()V")]
fn stub_out_m(site: &mut PatchSite<'_, TestClass>) -> Result<(), TransformError> {
    let method = site.method_mut()?;
    method.body.clear();
    method.body.push("return".into());
    Ok(())
}

// Test: explicit id and rationale
#[splice::patch(
    target = "demo.Target",
    method = "n",
    descriptor = "()I",
    id = "n-constant",
    reason = "n() must always return zero"
)]
fn zero_n(site: &mut PatchSite<'_, TestClass>) -> Result<(), TransformError> {
    site.method_mut()?.body.push("iconst_0".into());
    Ok(())
}

// Test: a patch that refuses
#[splice::patch(target = "demo.Target", method = "m", descriptor = "()V")]
fn picky(site: &mut PatchSite<'_, TestClass>) -> Result<(), TransformError> {
    if site.method()?.body.is_empty() {
        return Err(TransformError::UnexpectedShape("empty body".into()));
    }
    Ok(())
}

// Test: attributes on the fn carry over to the generated patch
#[splice::patch(target = "demo.Target", method = "m", descriptor = "()V")]
/// Leaves `m` untouched.
#[cfg(all())]
#[allow(dead_code)]
fn documented(_site: &mut PatchSite<'_, TestClass>) -> Result<(), TransformError> {
    Ok(())
}

// Test: a cfg'd-out patch leaves neither struct nor impl behind
#[splice::patch(target = "demo.Target", method = "m", descriptor = "()V")]
#[cfg(any())]
fn compiled_out(_site: &mut PatchSite<'_, NoSuchClass>) -> Result<(), TransformError> {
    Ok(())
}

#[test]
fn test_patch_macro_keeps_fn_attributes() {
    let patch = documented;
    assert_eq!(Patch::<TestClass>::id(&patch), "documented");

    let mut node = target_class();
    let key = Patch::<TestClass>::method_key(&patch);
    let mut site = PatchSite::resolve(&mut node, &key, 0).unwrap();
    Patch::<TestClass>::apply(&patch, &mut site).unwrap();
    assert_eq!(node, target_class());
}

#[test]
fn test_patch_macro_declaration() {
    let patch = stub_out_m;
    assert_eq!(Patch::<TestClass>::id(&patch), "stub_out_m");
    assert_eq!(Patch::<TestClass>::target_class(&patch), TARGET);
    assert_eq!(Patch::<TestClass>::method_name(&patch), "m");
    assert_eq!(Patch::<TestClass>::method_descriptor(&patch), "()V");
    assert_eq!(Patch::<TestClass>::rationale(&patch), "");
}

#[test]
fn test_patch_macro_custom_id_and_reason() {
    assert_eq!(Patch::<TestClass>::id(&zero_n), "n-constant");
    assert_eq!(
        Patch::<TestClass>::rationale(&zero_n),
        "n() must always return zero"
    );
}

#[test]
fn test_patch_macro_through_plugin() {
    let table = PatchTable::new().with(picky).with(stub_out_m).with(zero_n);
    let plugin = PatchPlugin::new(table, PluginConfig::new(true));
    plugin.on_load("demo.mixins").unwrap();

    let mut node = target_class();
    let report = plugin.before_transform(TARGET, &mut node, "demo.mixins", &GroupMeta::default());

    assert_eq!(report.failed(), 1);
    assert_eq!(report.applied(), 2);
    assert_eq!(node.body("m", "()V").unwrap(), ["return"]);
    assert_eq!(node.body("n", "()I").unwrap(), ["iconst_0"]);
}
