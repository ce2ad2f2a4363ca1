//! Derive macro for the `Attributes` trait.

use darling::{FromDeriveInput, FromField, ast::Data, util::Ignored};
use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;
use quote::quote;
use syn::{DeriveInput, GenericArgument, PathArguments, Type, parse_macro_input};

/// Parsed input of the derive.
#[derive(FromDeriveInput)]
#[darling(attributes(attribute), supports(struct_named))]
struct AttributesArgs {
    ident: syn::Ident,
    generics: syn::Generics,
    data: Data<Ignored, AttributeField>,
}

/// Parsed `#[attribute(...)]` options of one field.
#[derive(FromField)]
#[darling(attributes(attribute))]
struct AttributeField {
    ident: Option<syn::Ident>,
    ty: Type,

    /// Attribute name. Defaults to the field name.
    #[darling(default)]
    rename: Option<String>,

    /// Describe the field without a setter.
    #[darling(default)]
    read_only: bool,

    /// Leave the field out.
    #[darling(default)]
    skip: bool,
}

/// Implementation of the `#[derive(Attributes)]` macro.
pub(crate) fn derive_attributes(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);

    let args = match AttributesArgs::from_derive_input(&input) {
        Ok(args) => args,
        Err(err) => return err.write_errors().into(),
    };

    let name = &args.ident;
    let (impl_generics, ty_generics, where_clause) = args.generics.split_for_impl();

    let va_crate =
        vellum_macro_utils::resolve_crate_path(vellum_macro_utils::VellumCrate::Attributes);

    let Some(fields) = args.data.take_struct() else {
        return syn::Error::new_spanned(name, "Attributes can only be derived for structs")
            .to_compile_error()
            .into();
    };

    let descriptors = fields
        .fields
        .iter()
        .filter(|field| !field.skip)
        .filter_map(|field| describe(&va_crate, field));

    let expanded = quote! {
        impl #impl_generics #va_crate::Attributes for #name #ty_generics #where_clause {
            fn attribute_set(&self) -> #va_crate::AttributeSet {
                #va_crate::AttributeSet::new(vec![#(#descriptors),*])
            }
        }
    };

    expanded.into()
}

/// Generates the descriptor expression of one field.
fn describe(va_crate: &TokenStream2, field: &AttributeField) -> Option<TokenStream2> {
    let ident = field.ident.as_ref()?;
    let attribute = field.rename.clone().unwrap_or_else(|| {
        let raw = ident.to_string();
        raw.strip_prefix("r#").map(str::to_owned).unwrap_or(raw)
    });
    let ty = &field.ty;

    let descriptor = if field.read_only {
        quote! {
            #va_crate::AttributeDescriptor::read_only::<#ty>(#attribute)
        }
    } else if let Some(inner) = option_inner(ty) {
        quote! {
            #va_crate::AttributeDescriptor::optional::<Self, #inner>(
                #attribute,
                |target: &mut Self, value: ::core::option::Option<#inner>| target.#ident = value,
            )
        }
    } else {
        quote! {
            #va_crate::AttributeDescriptor::writable::<Self, #ty>(
                #attribute,
                |target: &mut Self, value: #ty| target.#ident = value,
            )
        }
    };

    Some(descriptor)
}

/// Returns `T` if `ty` is spelled `Option<T>`.
fn option_inner(ty: &Type) -> Option<&Type> {
    let Type::Path(path) = ty else {
        return None;
    };
    if path.qself.is_some() {
        return None;
    }
    let segment = path.path.segments.last()?;
    if segment.ident != "Option" {
        return None;
    }
    let PathArguments::AngleBracketed(arguments) = &segment.arguments else {
        return None;
    };
    match arguments.args.first()? {
        GenericArgument::Type(inner) if arguments.args.len() == 1 => Some(inner),
        _ => None,
    }
}
