use proc_macro::TokenStream;
use syn::{ItemFn, parse_macro_input};

mod patch;

/// Turns a function into a `Patch` implementation.
///
/// The function must take a single `&mut PatchSite<'_, Class>` argument and
/// return `Result<(), TransformError>`. A unit struct with the function's
/// name is generated; the class type is read from the argument.
///
/// # Arguments
///
/// - `target = "pkg.Class"` (required)
/// - `method = "name"` (required)
/// - `descriptor = "(I)V"` (required)
/// - `reason = "..."` (optional rationale)
/// - `id = "..."` (optional, defaults to the function name)
///
/// # Example
///
/// ```rust,ignore
/// #[splice::patch(target = "game.Menu", method = "showIntro", descriptor = "()V")]
/// fn skip_intro(site: &mut PatchSite<'_, ClassNode>) -> Result<(), TransformError> {
///     site.method_mut()?.instructions.clear();
///     Ok(())
/// }
/// ```
#[proc_macro_attribute]
pub fn patch(attr: TokenStream, item: TokenStream) -> TokenStream {
    let args = parse_macro_input!(attr as patch::PatchArgs);
    let input = parse_macro_input!(item as ItemFn);

    patch::generate(args, &input)
        .unwrap_or_else(syn::Error::into_compile_error)
        .into()
}
