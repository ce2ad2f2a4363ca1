//! Cached, compiled application of localized component resources onto named
//! objects.
//!
//! # Example
//!
//! ```
//! use vellum::prelude::*;
//!
//! struct Toolbar;
//!
//! #[derive(Default, Attributes)]
//! struct Button {
//!     #[attribute(rename = "Text")]
//!     text: String,
//! }
//!
//! let store = MemoryResourceStore::new()
//!     .with_entry(Locale::invariant(), "save.Text", "Save")
//!     .with_entry(Locale::new("it"), "save.Text", "Salva");
//! let manager = ComponentResourceManager::builder::<Toolbar>(store)
//!     .with_locale_provider(FixedLocale::new(Locale::new("it-IT")))
//!     .build();
//!
//! let mut save = Button::default();
//! manager.apply_resources(&mut save, "save").unwrap();
//! assert_eq!(save.text, "Salva");
//! ```

pub use vellum_internal::*;

/// Re-export all common types for easy access.
pub mod prelude {
    pub use vellum_internal::prelude::*;
}
