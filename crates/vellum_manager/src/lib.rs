//! Compiled, cached resource assignment for Vellum components (Layer 2).
//!
//! A component owns a table of localized resources keyed
//! `"<objectName>.<attributeName>"`. Applying the resources of a name to an
//! object writes every matching, type-compatible value into the object's
//! attributes. This crate makes that cheap to repeat:
//!
//! - [`ComponentResourceManager`] - Public entry point: `apply_resources`,
//!   `get_object`, `register_type_for_deep_clone`
//! - [`CompiledAssignment`] - The matched steps for one (target type, name)
//!   pair, compiled once and reused
//! - [`ResourceCaches`] - Plan cache, object cache and deep-clone registry,
//!   process-wide or explicitly scoped
//! - [`DeepCloneRegistry`] - Value types copied before each assignment
//! - [`locale`] - The ambient UI locale
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use vellum_attributes::Attributes;
//! use vellum_manager::locale::FixedLocale;
//! use vellum_manager::{ComponentResourceManager, ResourceCaches};
//! use vellum_resources::{Locale, MemoryResourceStore};
//!
//! struct LoginForm;
//!
//! #[derive(Default, Attributes)]
//! struct Panel {
//!     #[attribute(rename = "Text")]
//!     text: String,
//!     #[attribute(rename = "Width")]
//!     width: i32,
//! }
//!
//! let store = MemoryResourceStore::new()
//!     .with_entry(Locale::invariant(), "panel.Text", "Hello")
//!     .with_entry(Locale::invariant(), "panel.Width", 42_i32)
//!     .with_entry(Locale::invariant(), "panel.Height", "not-an-int");
//!
//! let caches = Arc::new(ResourceCaches::new());
//! let manager = ComponentResourceManager::builder::<LoginForm>(store)
//!     .with_caches(Arc::clone(&caches))
//!     .with_locale_provider(FixedLocale::new(Locale::new("en-US")))
//!     .build();
//!
//! for _ in 0..3 {
//!     let mut panel = Panel::default();
//!     manager.apply_resources(&mut panel, "panel").unwrap();
//!     assert_eq!(panel.text, "Hello");
//!     assert_eq!(panel.width, 42);
//! }
//!
//! let stats = caches.stats();
//! assert_eq!((stats.plan_misses, stats.plan_hits), (1, 2));
//! ```

pub mod cache;
pub mod compiler;
pub mod deep_clone;
pub mod error;
pub mod locale;
mod manager;

pub use cache::{AssignmentCache, CacheStats, ObjectCache, PlanScope, ResourceCaches};
pub use compiler::{AssignmentStep, CompiledAssignment, ValueProducer};
pub use deep_clone::{CloneFn, DeepClone, DeepCloneRegistry, clone_via_json};
pub use error::{ApplyError, CloneError};
pub use locale::{FixedLocale, LocaleProvider, ThreadUiLocale};
pub use manager::{ComponentResourceManager, ComponentResourceManagerBuilder};
