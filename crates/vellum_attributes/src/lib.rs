//! Attribute introspection for Vellum resource targets (Layer 1).
//!
//! A resource target is any value whose externally settable attributes can be
//! enumerated at runtime. This crate provides:
//!
//! - [`Attributes`] - The introspection trait implemented by targets
//! - [`AttributeDescriptor`] - Name, declared type, writability and setter of
//!   one attribute
//! - [`AttributeSet`] - The ordered attributes of a target, searchable by
//!   case-insensitive name
//! - [`macro@Attributes`] - Derive macro generating the trait for structs
//!
//! # Example
//!
//! ```
//! use vellum_attributes::Attributes;
//! use vellum_resources::ResourceValue;
//!
//! #[derive(Default, Attributes)]
//! struct Label {
//!     #[attribute(rename = "Text")]
//!     text: String,
//!     #[attribute(rename = "ToolTip")]
//!     tool_tip: Option<String>,
//!     #[attribute(skip)]
//!     handle: usize,
//! }
//!
//! let mut label = Label::default();
//! let attributes = label.attribute_set();
//! assert_eq!(attributes.len(), 2);
//!
//! let text = attributes.find("TEXT").unwrap();
//! text.set(&mut label, &ResourceValue::from("Name:")).unwrap();
//! assert_eq!(label.text, "Name:");
//! ```

// Self-reference so `#[derive(Attributes)]` output can use `vellum_attributes::`
// paths within this crate.
extern crate self as vellum_attributes;

pub mod descriptor;
pub mod error;
pub mod set;
pub mod target;

pub use descriptor::{AttributeDescriptor, AttributeSetter};
pub use error::AttributeError;
pub use set::AttributeSet;
pub use target::{Attributes, TargetType};

/// Re-export the `#[derive(Attributes)]` macro.
pub use attribute_macros::Attributes;
