//! Resource stores.
//!
//! A [`ResourceStore`] owns the raw, per-locale resource tables. Vellum only
//! ever reads from it, one locale at a time; merging locales into an
//! effective view is the job of the
//! [`ResourceResolver`](crate::resolver::ResourceResolver).
//!
//! [`MemoryResourceStore`] is a complete in-memory store, suitable for tests
//! and for applications that embed their tables at build time.

use crate::error::ResourceError;
use crate::key::eq_ignore_case;
use crate::locale::Locale;
use crate::value::ResourceValue;
use hashbrown::HashMap;
use indexmap::IndexMap;
use std::sync::Arc;

/// The resource entries of a single locale, in insertion order.
///
/// # Example
///
/// ```
/// use vellum_resources::ResourceSet;
///
/// let set = ResourceSet::new()
///     .with_entry("panel.Text", "Hello")
///     .with_entry("panel.Width", 42_i32);
///
/// assert_eq!(set.len(), 2);
/// assert!(set.get("panel.Width").unwrap().is::<i32>());
/// assert!(set.get_ignore_case("PANEL.width").is_some());
/// ```
#[derive(Debug, Clone, Default)]
pub struct ResourceSet {
    entries: IndexMap<String, ResourceValue>,
}

impl ResourceSet {
    /// Creates an empty resource set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an entry, returning the set for chaining.
    #[must_use]
    pub fn with_entry(mut self, key: impl Into<String>, value: impl Into<ResourceValue>) -> Self {
        self.insert(key, value);
        self
    }

    /// Inserts an entry, returning the value previously stored under `key`.
    pub fn insert(
        &mut self,
        key: impl Into<String>,
        value: impl Into<ResourceValue>,
    ) -> Option<ResourceValue> {
        self.entries.insert(key.into(), value.into())
    }

    /// Returns the value stored under exactly `key`.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&ResourceValue> {
        self.entries.get(key)
    }

    /// Returns the value stored under `key`, ignoring case.
    ///
    /// An exact match is preferred over a case-insensitive one.
    #[must_use]
    pub fn get_ignore_case(&self, key: &str) -> Option<&ResourceValue> {
        self.get(key).or_else(|| {
            self.entries
                .iter()
                .find(|(candidate, _)| eq_ignore_case(candidate, key))
                .map(|(_, value)| value)
        })
    }

    /// Iterates over the entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &ResourceValue)> {
        self.entries.iter().map(|(key, value)| (key.as_str(), value))
    }

    /// Returns the number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if the set has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K: Into<String>, V: Into<ResourceValue>> FromIterator<(K, V)> for ResourceSet {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            entries: iter
                .into_iter()
                .map(|(key, value)| (key.into(), value.into()))
                .collect(),
        }
    }
}

/// Source of per-locale resource sets.
///
/// Implementations return only the entries that belong to the requested
/// locale itself; parent fallback is applied by the caller.
pub trait ResourceStore: Send + Sync {
    /// Returns the resource set of `locale`, or `None` if the locale has no
    /// resources of its own.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::Store`] if the backing storage cannot be read.
    fn resource_set(&self, locale: &Locale) -> Result<Option<Arc<ResourceSet>>, ResourceError>;

    /// Returns the locale whose resources are stored under the invariant
    /// locale, if the store declares one.
    fn neutral_locale(&self) -> Option<Locale> {
        None
    }
}

impl<S: ResourceStore + ?Sized> ResourceStore for Arc<S> {
    fn resource_set(&self, locale: &Locale) -> Result<Option<Arc<ResourceSet>>, ResourceError> {
        (**self).resource_set(locale)
    }

    fn neutral_locale(&self) -> Option<Locale> {
        (**self).neutral_locale()
    }
}

/// An in-memory [`ResourceStore`].
///
/// # Example
///
/// ```
/// use vellum_resources::{Locale, MemoryResourceStore, ResourceStore};
///
/// let store = MemoryResourceStore::new()
///     .with_neutral_locale(Locale::new("en"))
///     .with_entry(Locale::invariant(), "title.Text", "Settings")
///     .with_entry(Locale::new("de"), "title.Text", "Einstellungen");
///
/// let german = store.resource_set(&Locale::new("de")).unwrap().unwrap();
/// assert_eq!(german.len(), 1);
/// assert!(store.resource_set(&Locale::new("ja")).unwrap().is_none());
/// assert_eq!(store.neutral_locale(), Some(Locale::new("en")));
/// ```
#[derive(Debug, Clone, Default)]
pub struct MemoryResourceStore {
    sets: HashMap<Locale, Arc<ResourceSet>>,
    neutral: Option<Locale>,
}

impl MemoryResourceStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Declares the locale whose resources live under the invariant locale.
    #[must_use]
    pub fn with_neutral_locale(mut self, locale: Locale) -> Self {
        self.neutral = Some(locale);
        self
    }

    /// Replaces the whole resource set of `locale`.
    #[must_use]
    pub fn with_set(mut self, locale: Locale, set: ResourceSet) -> Self {
        self.sets.insert(locale, Arc::new(set));
        self
    }

    /// Adds a single entry to the resource set of `locale`.
    #[must_use]
    pub fn with_entry(
        mut self,
        locale: Locale,
        key: impl Into<String>,
        value: impl Into<ResourceValue>,
    ) -> Self {
        self.insert(locale, key, value);
        self
    }

    /// Adds a single entry to the resource set of `locale`.
    pub fn insert(
        &mut self,
        locale: Locale,
        key: impl Into<String>,
        value: impl Into<ResourceValue>,
    ) -> Option<ResourceValue> {
        let set = self.sets.entry(locale).or_default();
        Arc::make_mut(set).insert(key, value)
    }

    /// Returns the locales that have resources, in no particular order.
    pub fn locales(&self) -> impl Iterator<Item = &Locale> {
        self.sets.keys()
    }
}

impl ResourceStore for MemoryResourceStore {
    fn resource_set(&self, locale: &Locale) -> Result<Option<Arc<ResourceSet>>, ResourceError> {
        Ok(self.sets.get(locale).cloned())
    }

    fn neutral_locale(&self) -> Option<Locale> {
        self.neutral.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_replaces_existing_entry() {
        let mut set = ResourceSet::new();
        assert!(set.insert("a.Text", "one").is_none());
        let old = set.insert("a.Text", "two").unwrap();
        assert_eq!(old.downcast_ref::<String>().unwrap(), "one");
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn iteration_preserves_insertion_order() {
        let set: ResourceSet = [("z.A", 1_i32), ("a.B", 2), ("m.C", 3)]
            .into_iter()
            .collect();
        let keys: Vec<_> = set.iter().map(|(key, _)| key).collect();
        assert_eq!(keys, ["z.A", "a.B", "m.C"]);
    }

    #[test]
    fn exact_match_wins_over_case_insensitive() {
        let set = ResourceSet::new()
            .with_entry("Title", "upper")
            .with_entry("title", "lower");
        let value = set.get_ignore_case("title").unwrap();
        assert_eq!(value.downcast_ref::<String>().unwrap(), "lower");
        assert!(set.get("TITLE").is_none());
        assert!(set.get_ignore_case("TITLE").is_some());
    }

    #[test]
    fn memory_store_groups_entries_by_locale() {
        let store = MemoryResourceStore::new()
            .with_entry(Locale::new("fr"), "a.Text", "un")
            .with_entry(Locale::new("FR"), "b.Text", "deux")
            .with_entry(Locale::invariant(), "a.Text", "one");

        let french = store.resource_set(&Locale::new("fr")).unwrap().unwrap();
        assert_eq!(french.len(), 2);
        assert_eq!(store.locales().count(), 2);
    }

    #[test]
    fn store_through_arc_delegates() {
        let store: Arc<dyn ResourceStore> = Arc::new(
            MemoryResourceStore::new()
                .with_neutral_locale(Locale::new("en"))
                .with_entry(Locale::invariant(), "x.Y", 1_i32),
        );
        let shared = Arc::new(Arc::clone(&store));
        assert_eq!(shared.neutral_locale(), Some(Locale::new("en")));
        assert!(shared.resource_set(&Locale::invariant()).unwrap().is_some());
    }
}
