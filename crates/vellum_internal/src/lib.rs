//! # Vellum Internal Library
//!
//! Re-exports the core Vellum crates for convenience.

/// Layer 1: Locale-layered resource tables and resolution.
pub use vellum_resources;

/// Layer 1: Attribute introspection and `#[derive(Attributes)]`.
pub use vellum_attributes;

/// Layer 2: Compiled, cached resource assignment.
pub use vellum_manager;

/// Logging setup.
pub use vellum_core;

/// Re-export all common types for easy access.
pub mod prelude {
    pub use vellum_attributes::{AttributeDescriptor, AttributeSet, Attributes, TargetType};
    pub use vellum_manager::locale::{current_ui_locale, set_current_ui_locale};
    pub use vellum_manager::{
        ApplyError, ComponentResourceManager, DeepClone, FixedLocale, LocaleProvider,
        ResourceCaches, ThreadUiLocale,
    };
    pub use vellum_resources::{
        Locale, MemoryResourceStore, ResourceSet, ResourceStore, ResourceValue,
    };
}
