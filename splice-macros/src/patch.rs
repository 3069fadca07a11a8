//! `#[patch]` expansion.

use proc_macro2::{Span, TokenStream};
use quote::quote;
use syn::{
    FnArg, GenericArgument, Ident, ItemFn, LitStr, PathArguments, Token, Type,
    parse::{Parse, ParseStream},
};

/// Arguments for the `#[patch]` macro.
pub(crate) struct PatchArgs {
    target: Option<LitStr>,
    method: Option<LitStr>,
    descriptor: Option<LitStr>,
    reason: Option<LitStr>,
    id: Option<LitStr>,
}

impl Parse for PatchArgs {
    fn parse(input: ParseStream) -> syn::Result<Self> {
        let mut args = PatchArgs {
            target: None,
            method: None,
            descriptor: None,
            reason: None,
            id: None,
        };

        while !input.is_empty() {
            let ident: Ident = input.parse()?;
            input.parse::<Token![=]>()?;
            let lit: LitStr = input.parse()?;

            let slot = match ident.to_string().as_str() {
                "target" => &mut args.target,
                "method" => &mut args.method,
                "descriptor" => &mut args.descriptor,
                "reason" => &mut args.reason,
                "id" => &mut args.id,
                other => {
                    return Err(syn::Error::new(
                        ident.span(),
                        format!("unknown attribute: {}", other),
                    ));
                }
            };
            if slot.is_some() {
                return Err(syn::Error::new(
                    ident.span(),
                    format!("duplicate attribute: {}", ident),
                ));
            }
            *slot = Some(lit);

            if input.peek(Token![,]) {
                input.parse::<Token![,]>()?;
            }
        }

        Ok(args)
    }
}

fn required(value: Option<LitStr>, name: &str) -> syn::Result<LitStr> {
    value.ok_or_else(|| {
        syn::Error::new(
            Span::call_site(),
            format!("missing required attribute: {} = \"...\"", name),
        )
    })
}

/// Pulls `Class` out of `&mut PatchSite<'_, Class>`.
fn class_type(arg_ty: &Type) -> Option<&Type> {
    let Type::Reference(reference) = arg_ty else {
        return None;
    };
    reference.mutability.as_ref()?;
    let Type::Path(path) = &*reference.elem else {
        return None;
    };
    let segment = path.path.segments.last()?;
    let PathArguments::AngleBracketed(generics) = &segment.arguments else {
        return None;
    };
    generics.args.iter().find_map(|arg| match arg {
        GenericArgument::Type(ty) => Some(ty),
        _ => None,
    })
}

pub(crate) fn generate(args: PatchArgs, input: &ItemFn) -> syn::Result<TokenStream> {
    let fn_name = &input.sig.ident;
    let fn_vis = &input.vis;
    let attrs = &input.attrs;
    let fn_block = &input.block;
    let output = &input.sig.output;

    if let Some(asyncness) = &input.sig.asyncness {
        return Err(syn::Error::new_spanned(
            asyncness,
            "patch functions run synchronously inside the host's transform",
        ));
    }

    let (site_pat, site_ty) = match input.sig.inputs.first() {
        Some(FnArg::Typed(pat_type)) if input.sig.inputs.len() == 1 => {
            (&pat_type.pat, &*pat_type.ty)
        }
        _ => {
            return Err(syn::Error::new_spanned(
                &input.sig.inputs,
                "patch function must take one argument: fn(site: &mut PatchSite<'_, Class>)",
            ));
        }
    };

    let class = class_type(site_ty).ok_or_else(|| {
        syn::Error::new_spanned(site_ty, "expected `&mut PatchSite<'_, Class>`")
    })?;

    let target = required(args.target, "target")?;
    let method = required(args.method, "method")?;
    let descriptor = required(args.descriptor, "descriptor")?;
    let reason = args
        .reason
        .unwrap_or_else(|| LitStr::new("", Span::call_site()));
    let id = args
        .id
        .unwrap_or_else(|| LitStr::new(&fn_name.to_string(), fn_name.span()));

    // `#[cfg]` has to gate the impl as well as the struct.
    let cfg_attrs = attrs.iter().filter(|attr| attr.path().is_ident("cfg"));
    let default_doc = (!attrs.iter().any(|attr| attr.path().is_ident("doc"))).then(|| {
        quote! {
            #[doc = concat!("Auto-generated Patch from `#[splice::patch]` on `", stringify!(#fn_name), "`")]
        }
    });

    Ok(quote! {
        #(#attrs)*
        #default_doc
        #[allow(non_camel_case_types)]
        #[derive(Clone, Copy, Debug, Default)]
        #fn_vis struct #fn_name;

        #(#cfg_attrs)*
        impl ::splice::Patch<#class> for #fn_name {
            fn id(&self) -> &str {
                #id
            }

            fn target_class(&self) -> &str {
                #target
            }

            fn method_name(&self) -> &str {
                #method
            }

            fn method_descriptor(&self) -> &str {
                #descriptor
            }

            fn rationale(&self) -> &str {
                #reason
            }

            fn apply(&self, #site_pat: #site_ty) #output #fn_block
        }
    })
}
