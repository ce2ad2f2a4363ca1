//! Locale chain resolution.
//!
//! The [`ResourceResolver`] turns the per-locale tables of a
//! [`ResourceStore`] into the effective view for one locale: the parent
//! locale's effective map with the locale's own entries laid over it.
//!
//! ```text
//! invariant   { x.a = 1 }
//! fr          { x.a = 2, x.b = 3 }
//! fr-CA       { x.a = 4 }
//! ------------------------------------
//! fr-CA view  { x.a = 4, x.b = 3 }
//! ```
//!
//! # Neutral Resources Locale
//!
//! A store may declare a neutral locale: the language its invariant table is
//! written in. The chain for any locale stops at the neutral locale, and the
//! neutral locale reads the invariant table as its own base. With a neutral
//! locale of `en-US`, the chain of `en-US` is `invariant -> en-US` and `en`
//! is never consulted.

use crate::error::ResourceError;
use crate::key::FoldedKey;
use crate::locale::Locale;
use crate::store::ResourceStore;
use crate::value::ResourceValue;
use indexmap::IndexMap;
use std::sync::Arc;

/// The merged resources visible from one locale.
///
/// Keys are case-insensitive. Iteration follows first-insertion order, with
/// ancestors' keys first.
#[derive(Debug, Clone, Default)]
pub struct EffectiveResourceMap {
    entries: IndexMap<FoldedKey, (String, ResourceValue)>,
}

impl EffectiveResourceMap {
    /// Creates an empty map.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts an entry, replacing any entry whose key differs only by case.
    pub fn insert(&mut self, key: &str, value: ResourceValue) {
        self.entries
            .insert(FoldedKey::new(key), (key.to_owned(), value));
    }

    /// Returns the value for `key`, ignoring case.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&ResourceValue> {
        self.entries.get(&FoldedKey::new(key)).map(|(_, value)| value)
    }

    /// Iterates over the entries. Keys keep the spelling of their most
    /// recent source.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &ResourceValue)> {
        self.entries
            .values()
            .map(|(key, value)| (key.as_str(), value))
    }

    /// Returns the number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if there are no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Resolves locale chains against a [`ResourceStore`].
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use vellum_resources::{Locale, MemoryResourceStore, ResourceResolver};
///
/// let store = MemoryResourceStore::new()
///     .with_entry(Locale::invariant(), "x.a", 1_i32)
///     .with_entry(Locale::new("fr"), "x.a", 2_i32)
///     .with_entry(Locale::new("fr"), "x.b", 3_i32)
///     .with_entry(Locale::new("fr-CA"), "x.a", 4_i32);
///
/// let resolver = ResourceResolver::new(Arc::new(store));
/// let view = resolver.resolve(&Locale::new("fr-CA")).unwrap();
///
/// assert_eq!(view.len(), 2);
/// assert_eq!(view.get("x.a").unwrap().downcast_ref::<i32>(), Some(&4));
/// assert_eq!(view.get("x.b").unwrap().downcast_ref::<i32>(), Some(&3));
/// ```
#[derive(Clone)]
pub struct ResourceResolver {
    store: Arc<dyn ResourceStore>,
    neutral: Option<Locale>,
}

impl core::fmt::Debug for ResourceResolver {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("ResourceResolver")
            .field("neutral", &self.neutral)
            .finish_non_exhaustive()
    }
}

impl ResourceResolver {
    /// Creates a resolver using the store's declared neutral locale.
    #[must_use]
    pub fn new(store: Arc<dyn ResourceStore>) -> Self {
        let neutral = store.neutral_locale();
        Self { store, neutral }
    }

    /// Overrides the neutral resources locale.
    #[must_use]
    pub fn with_neutral_locale(mut self, neutral: Option<Locale>) -> Self {
        self.neutral = neutral;
        self
    }

    /// Returns the neutral resources locale, if any.
    #[must_use]
    pub fn neutral_locale(&self) -> Option<&Locale> {
        self.neutral.as_ref()
    }

    /// Returns the store this resolver reads from.
    #[must_use]
    pub fn store(&self) -> &Arc<dyn ResourceStore> {
        &self.store
    }

    /// Returns `true` if `locale` terminates a chain.
    fn is_root(&self, locale: &Locale) -> bool {
        locale.is_invariant() || self.neutral.as_ref() == Some(locale)
    }

    /// Returns the locales consulted for `locale`, most specific first.
    ///
    /// The chain ends at the invariant locale. When it stops early at a
    /// non-invariant neutral locale, the invariant locale follows it as that
    /// locale's base.
    #[must_use]
    pub fn chain(&self, locale: &Locale) -> Vec<Locale> {
        let mut chain = Vec::new();
        for current in locale.ancestry() {
            let root = self.is_root(&current);
            chain.push(current);
            if root {
                break;
            }
        }
        if chain.last().is_some_and(|last| !last.is_invariant()) {
            chain.push(Locale::invariant());
        }
        chain
    }

    /// Builds the effective resource map for `locale`.
    ///
    /// Each locale's own entries override those inherited from its parent,
    /// comparing keys case-insensitively.
    ///
    /// # Errors
    ///
    /// Propagates the first [`ResourceError`] returned by the store.
    pub fn resolve(&self, locale: &Locale) -> Result<EffectiveResourceMap, ResourceError> {
        let mut resources = EffectiveResourceMap::new();
        for current in self.chain(locale).iter().rev() {
            if let Some(set) = self.store.resource_set(current)? {
                for (key, value) in set.iter() {
                    resources.insert(key, value.clone());
                }
            }
        }

        tracing::trace!(
            locale = %locale,
            entries = resources.len(),
            "resolved resource map"
        );
        Ok(resources)
    }

    /// Looks up a single resource by name, walking the chain of `locale`
    /// from most specific to the invariant locale.
    ///
    /// Returns the null value if no locale in the chain defines `name`.
    ///
    /// # Errors
    ///
    /// Propagates the first [`ResourceError`] returned by the store.
    pub fn lookup(&self, locale: &Locale, name: &str) -> Result<ResourceValue, ResourceError> {
        for current in self.chain(locale) {
            if let Some(value) = self
                .store
                .resource_set(&current)?
                .and_then(|set| set.get_ignore_case(name).cloned())
            {
                return Ok(value);
            }
        }
        Ok(ResourceValue::null())
    }
}
