//! Trait-source front end: build a [`ProtocolSpec`] from Rust `trait` syntax.
//!
//! Hosts that load capability descriptions alongside plugins can author them
//! as ordinary trait items instead of builder calls. Methods become callable
//! requirements with normalized signatures; associated consts become
//! attribute requirements. Associated types and macros carry no runtime
//! member surface and are ignored.

use crate::core::errors::Result;
use crate::core::{normalize_annotation, MethodSignature};
use crate::protocol::ProtocolSpec;
use quote::ToTokens;
use syn::{FnArg, ItemTrait, Pat, ReturnType, TraitItem};

/// Parse a single `trait` item into a protocol. The trait's own name becomes
/// the qualified name.
pub fn parse_trait(source: &str) -> Result<ProtocolSpec> {
    parse_trait_in_module(source, None)
}

/// Parse a single `trait` item, qualifying its name with a module path.
pub fn parse_trait_in_module(source: &str, module_path: Option<&str>) -> Result<ProtocolSpec> {
    let item: ItemTrait = syn::parse_str(source)?;
    let name = item.ident.to_string();
    let qualified_name = match module_path {
        Some(path) => format!("{path}::{name}"),
        None => name,
    };

    let mut builder = ProtocolSpec::builder(qualified_name);
    for trait_item in &item.items {
        match trait_item {
            TraitItem::Fn(method) => {
                builder = builder.method(
                    method.sig.ident.to_string(),
                    signature_from_syn(&method.sig),
                );
            }
            TraitItem::Const(constant) => {
                builder = builder.attribute(constant.ident.to_string());
            }
            _ => {}
        }
    }
    Ok(builder.build())
}

/// Normalize a syn signature into the descriptor form.
fn signature_from_syn(sig: &syn::Signature) -> MethodSignature {
    let mut out = MethodSignature::new();
    for input in &sig.inputs {
        match input {
            FnArg::Receiver(_) => out = out.receiver(),
            FnArg::Typed(pat_type) => {
                let name = match &*pat_type.pat {
                    Pat::Ident(pat) => pat.ident.to_string(),
                    other => other.to_token_stream().to_string(),
                };
                out = out.param(name, normalize_type(&pat_type.ty));
            }
        }
    }
    if sig.variadic.is_some() {
        out = out.variadic("args");
    }
    if let ReturnType::Type(_, ty) = &sig.output {
        out = out.returns(normalize_type(ty));
    }
    out
}

/// Print a type with incidental token spacing removed, so parsed annotations
/// compare equal to builder-authored ones.
fn normalize_type(ty: &syn::Type) -> String {
    normalize_annotation(&ty.to_token_stream().to_string())
}
