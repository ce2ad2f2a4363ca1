//! Procedural macros for `vellum_attributes`.
//!
//! This crate provides `#[derive(Attributes)]`, which describes the named
//! fields of a struct as resource-settable attributes.

mod attributes;

use proc_macro::TokenStream;

/// Derive macro for the `Attributes` trait.
///
/// Every named field becomes a writable attribute whose declared type is the
/// field type. Fields of type `Option<T>` are declared as `T` and accept null,
/// which is written as `None`. Field types must be `Clone + Send + Sync`.
///
/// # Field attributes
///
/// - `rename = "..."`: Attribute name. Defaults to the field name.
/// - `read_only`: Describe the field without a setter.
/// - `skip`: Leave the field out entirely.
///
/// # Example
///
/// ```ignore
/// use vellum_attributes::Attributes;
///
/// #[derive(Attributes)]
/// struct TextBox {
///     #[attribute(rename = "Text")]
///     text: String,
///     #[attribute(rename = "MaxLength", read_only)]
///     max_length: usize,
///     #[attribute(skip)]
///     cursor: usize,
/// }
/// ```
#[proc_macro_derive(Attributes, attributes(attribute))]
pub fn derive_attributes(input: TokenStream) -> TokenStream {
    attributes::derive_attributes(input)
}
