//! Shared utilities for Vellum procedural macro crates.
//!
//! Generated code must name runtime crates by a path that resolves in the
//! consumer. A consumer may depend on `vellum_attributes` directly, under a
//! renamed key, or only through the `vellum` umbrella crate.

use proc_macro_crate::{FoundCrate, crate_name};
use proc_macro2::TokenStream;
use quote::{format_ident, quote};

/// A Vellum crate that macro-generated code may reference.
pub enum VellumCrate {
    /// `vellum_attributes`
    Attributes,
}

impl VellumCrate {
    /// Returns the `Cargo.toml` package name for this crate.
    fn package_name(&self) -> &'static str {
        match self {
            Self::Attributes => "vellum_attributes",
        }
    }
}

/// Returns a [`TokenStream`] path for the given Vellum crate.
///
/// Resolution order:
/// 1. Direct dependency (possibly renamed in `Cargo.toml`).
/// 2. Re-export through the `vellum` umbrella crate (`vellum::<name>`),
///    including from the umbrella crate's own tests.
/// 3. The literal crate name, so a missing dependency surfaces as an
///    unresolved path in the consumer.
pub fn resolve_crate_path(krate: VellumCrate) -> TokenStream {
    let name = krate.package_name();

    match crate_name(name) {
        Ok(FoundCrate::Itself) => {
            let ident = format_ident!("{}", name);
            quote!(#ident)
        }
        Ok(FoundCrate::Name(found)) => {
            let ident = format_ident!("{}", found);
            quote!(#ident)
        }
        Err(_) => {
            let ident = format_ident!("{}", name);
            match crate_name("vellum") {
                Ok(FoundCrate::Name(found)) => {
                    let umbrella = format_ident!("{}", found);
                    quote!(#umbrella::#ident)
                }
                // Doctests and integration tests of the umbrella crate itself.
                Ok(FoundCrate::Itself) => quote!(::vellum::#ident),
                Err(_) => quote!(#ident),
            }
        }
    }
}
