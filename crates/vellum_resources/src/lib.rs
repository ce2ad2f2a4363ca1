//! Locale-layered resource tables for Vellum (Layer 1).
//!
//! `vellum_resources` provides the data side of resource application:
//!
//! - [`locale`] - Locale identifiers and their parent chains
//! - [`value`] - Type-erased, shareable resource values
//! - [`store`] - The [`ResourceStore`] seam and an in-memory implementation
//! - [`resolver`] - Merging a locale chain into one effective map
//! - [`key`] - Case-insensitive identifier comparison
//! - [`owner`] - Identity of the type that owns a set of resources
//!
//! # Architecture
//!
//! - **Layer 1** (`vellum_resources`, `vellum_attributes`): values, stores and
//!   introspection (this crate)
//! - **Layer 2** (`vellum_manager`): compiled assignment and process caches
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use vellum_resources::{Locale, MemoryResourceStore, ResourceResolver};
//!
//! let store = MemoryResourceStore::new()
//!     .with_entry(Locale::invariant(), "okButton.Text", "OK")
//!     .with_entry(Locale::new("fr"), "okButton.Text", "D'accord");
//!
//! let resolver = ResourceResolver::new(Arc::new(store));
//! let resources = resolver.resolve(&Locale::new("fr-CA")).unwrap();
//!
//! let text = resources.get("OKBUTTON.text").unwrap();
//! assert_eq!(text.downcast_ref::<String>().unwrap(), "D'accord");
//! ```

pub mod error;
pub mod key;
pub mod locale;
pub mod owner;
pub mod resolver;
pub mod store;
pub mod value;

pub use error::ResourceError;
pub use key::FoldedKey;
pub use locale::Locale;
pub use owner::OwnerId;
pub use resolver::{EffectiveResourceMap, ResourceResolver};
pub use store::{MemoryResourceStore, ResourceSet, ResourceStore};
pub use value::{ResourceData, ResourceValue, ValueType};
