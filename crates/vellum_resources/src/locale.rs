//! Locale identifiers and their parent chains.
//!
//! A [`Locale`] is a BCP 47-style tag such as `fr-CA` or `zh-Hant-TW`. Its
//! parent is obtained by dropping the last subtag, and every chain ends at the
//! invariant locale (the empty tag):
//!
//! ```text
//! zh-Hant-TW -> zh-Hant -> zh -> (invariant)
//! ```
//!
//! Because parents are derived from the tag itself, every ancestry chain is
//! finite and acyclic.

use core::fmt;
use core::hash::{Hash, Hasher};
use core::str::FromStr;
use std::sync::Arc;

/// A locale tag with case-insensitive identity.
///
/// Cloning is cheap: the tag is shared.
///
/// # Example
///
/// ```
/// use vellum_resources::Locale;
///
/// let locale = Locale::new("fr_CA");
/// assert_eq!(locale.name(), "fr-CA");
/// assert_eq!(locale.parent(), Locale::new("FR"));
/// assert!(locale.parent().parent().is_invariant());
/// ```
#[derive(Clone)]
pub struct Locale {
    name: Arc<str>,
}

impl Locale {
    /// Creates a locale from a tag. Underscores are accepted as separators.
    #[must_use]
    pub fn new(tag: &str) -> Self {
        let tag = tag.trim();
        let name: Arc<str> = if tag.contains('_') {
            tag.replace('_', "-").into()
        } else {
            tag.into()
        };
        Self { name }
    }

    /// Returns the invariant (root) locale.
    #[must_use]
    pub fn invariant() -> Self {
        Self { name: "".into() }
    }

    /// Returns the locale tag. The invariant locale has an empty tag.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns `true` for the invariant (root) locale.
    #[must_use]
    pub fn is_invariant(&self) -> bool {
        self.name.is_empty()
    }

    /// Returns the parent locale. The invariant locale is its own parent.
    #[must_use]
    pub fn parent(&self) -> Self {
        match self.name.rfind('-') {
            Some(index) => Self::new(&self.name[..index]),
            None => Self::invariant(),
        }
    }

    /// Iterates from this locale up to and including the invariant locale.
    pub fn ancestry(&self) -> Ancestry {
        Ancestry {
            next: Some(self.clone()),
        }
    }
}

impl Default for Locale {
    fn default() -> Self {
        Self::invariant()
    }
}

impl PartialEq for Locale {
    fn eq(&self, other: &Self) -> bool {
        self.name.eq_ignore_ascii_case(&other.name)
    }
}

impl Eq for Locale {}

impl Hash for Locale {
    fn hash<H: Hasher>(&self, state: &mut H) {
        for byte in self.name.bytes() {
            state.write_u8(byte.to_ascii_lowercase());
        }
        state.write_u8(0xff);
    }
}

impl fmt::Debug for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_invariant() {
            f.write_str("Locale(invariant)")
        } else {
            write!(f, "Locale({})", self.name)
        }
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_invariant() {
            f.write_str("invariant")
        } else {
            f.write_str(&self.name)
        }
    }
}

impl FromStr for Locale {
    type Err = core::convert::Infallible;

    fn from_str(tag: &str) -> Result<Self, Self::Err> {
        Ok(Self::new(tag))
    }
}

impl From<&str> for Locale {
    fn from(tag: &str) -> Self {
        Self::new(tag)
    }
}

/// Iterator over a locale and its ancestors, ending with the invariant locale.
///
/// Created by [`Locale::ancestry`].
#[derive(Debug, Clone)]
pub struct Ancestry {
    next: Option<Locale>,
}

impl Iterator for Ancestry {
    type Item = Locale;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.next.take()?;
        if !current.is_invariant() {
            self.next = Some(current.parent());
        }
        Some(current)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parent_drops_last_subtag() {
        assert_eq!(Locale::new("zh-Hant-TW").parent(), Locale::new("zh-Hant"));
        assert_eq!(Locale::new("zh-Hant").parent(), Locale::new("zh"));
        assert!(Locale::new("zh").parent().is_invariant());
    }

    #[test]
    fn invariant_is_its_own_parent() {
        assert_eq!(Locale::invariant().parent(), Locale::invariant());
        assert_eq!(Locale::default(), Locale::invariant());
    }

    #[test]
    fn equality_ignores_case_and_separator_style() {
        assert_eq!(Locale::new("en-us"), Locale::new("EN_US"));
        assert_ne!(Locale::new("en-US"), Locale::new("en-GB"));
    }

    #[test]
    fn ancestry_ends_at_invariant() {
        let chain: Vec<_> = Locale::new("sr-Latn-RS").ancestry().collect();
        assert_eq!(
            chain,
            vec![
                Locale::new("sr-Latn-RS"),
                Locale::new("sr-Latn"),
                Locale::new("sr"),
                Locale::invariant(),
            ]
        );
        assert_eq!(Locale::invariant().ancestry().count(), 1);
    }

    #[test]
    fn display_names_invariant() {
        assert_eq!(Locale::invariant().to_string(), "invariant");
        assert_eq!(Locale::new("de-AT").to_string(), "de-AT");
    }

    #[test]
    fn equal_locales_hash_equally() {
        let mut set = hashbrown::HashSet::new();
        set.insert(Locale::new("pt-BR"));
        assert!(set.contains(&Locale::new("PT-br")));
    }
}
