//! Case-insensitive identifier comparison.
//!
//! Resource keys, object names and attribute names are identifiers. They are
//! compared with ordinal case folding, never with locale-sensitive collation,
//! so `"OkButton.TEXT"` and `"okbutton.text"` name the same entry on every
//! machine regardless of the current UI locale.

use core::fmt;

/// Folds one character.
///
/// Characters whose lowercase form is a single character fold to it. The
/// rest (such as `'İ'`) fold to themselves, so every character folds to
/// exactly one character and comparisons never straddle character boundaries.
fn fold_char(c: char) -> char {
    let mut lower = c.to_lowercase();
    match (lower.next(), lower.next()) {
        (Some(folded), None) => folded,
        _ => c,
    }
}

/// Folds a single identifier to its case-insensitive form.
fn fold(value: &str) -> String {
    if value.is_ascii() {
        value.to_ascii_lowercase()
    } else {
        value.chars().map(fold_char).collect()
    }
}

/// Returns `true` if `a` and `b` are equal ignoring case.
///
/// # Example
///
/// ```
/// use vellum_resources::key::eq_ignore_case;
///
/// assert!(eq_ignore_case("BackColor", "backcolor"));
/// assert!(!eq_ignore_case("Größe", "GRÖSSE"));
/// assert!(eq_ignore_case("Ärger", "ärger"));
/// ```
#[must_use]
pub fn eq_ignore_case(a: &str, b: &str) -> bool {
    if a.is_ascii() && b.is_ascii() {
        return a.eq_ignore_ascii_case(b);
    }
    a.chars().map(fold_char).eq(b.chars().map(fold_char))
}

/// Strips `prefix` from the start of `value`, ignoring case.
///
/// Returns the remainder of `value` after the prefix, or `None` if `value`
/// does not start with `prefix`.
///
/// # Example
///
/// ```
/// use vellum_resources::key::strip_prefix_ignore_case;
///
/// assert_eq!(strip_prefix_ignore_case("Panel.Text", "panel"), Some(".Text"));
/// assert_eq!(strip_prefix_ignore_case("Pane", "panel"), None);
/// ```
#[must_use]
pub fn strip_prefix_ignore_case<'a>(value: &'a str, prefix: &str) -> Option<&'a str> {
    if value.is_ascii() && prefix.is_ascii() {
        let head = value.get(..prefix.len())?;
        return head
            .eq_ignore_ascii_case(prefix)
            .then(|| &value[prefix.len()..]);
    }

    let mut remaining = value.char_indices();
    for expected in prefix.chars() {
        let (_, actual) = remaining.next()?;
        if fold_char(actual) != fold_char(expected) {
            return None;
        }
    }
    let offset = remaining.next().map_or(value.len(), |(index, _)| index);
    Some(&value[offset..])
}

/// A case-folded identifier usable as a hash map key.
///
/// Two keys compare equal exactly when [`eq_ignore_case`] holds for their
/// source strings.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FoldedKey(Box<str>);

impl FoldedKey {
    /// Folds `key` into its case-insensitive form.
    #[must_use]
    pub fn new(key: &str) -> Self {
        Self(fold(key).into_boxed_str())
    }

    /// Returns the folded form.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for FoldedKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.0, f)
    }
}

impl From<&str> for FoldedKey {
    fn from(key: &str) -> Self {
        Self::new(key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn ascii_equality_ignores_case() {
        assert!(eq_ignore_case("Text", "TEXT"));
        assert!(!eq_ignore_case("Text", "Texts"));
    }

    #[test]
    fn unicode_equality_ignores_case() {
        assert!(eq_ignore_case("ÉTIQUETTE", "étiquette"));
        assert!(!eq_ignore_case("étiquette", "etiquette"));
    }

    #[test]
    fn strip_prefix_requires_full_prefix() {
        assert_eq!(strip_prefix_ignore_case("foo.bar", "FOO"), Some(".bar"));
        assert_eq!(strip_prefix_ignore_case("foobar.baz", "foo"), Some("bar.baz"));
        assert_eq!(strip_prefix_ignore_case("fo", "foo"), None);
        assert_eq!(strip_prefix_ignore_case("", ""), Some(""));
    }

    #[test]
    fn strip_prefix_handles_multibyte_keys() {
        assert_eq!(
            strip_prefix_ignore_case("Überschrift.Text", "überschrift"),
            Some(".Text")
        );
        assert_eq!(strip_prefix_ignore_case("Ü", "u"), None);
        // A non-ASCII prefix against an ASCII key must not slice mid-character.
        assert_eq!(strip_prefix_ignore_case("ab", "é"), None);
    }

    #[test]
    fn multi_char_lowercase_compares_per_character() {
        // 'İ' lowercases to "i\u{307}", two characters.
        let dotted = "\u{130}";
        let decomposed = "i\u{307}";

        assert!(eq_ignore_case(dotted, dotted));
        assert!(!eq_ignore_case(dotted, decomposed));
        assert_eq!(strip_prefix_ignore_case("\u{130}.Text", dotted), Some(".Text"));
        assert_eq!(strip_prefix_ignore_case("\u{130}.Text", decomposed), None);
        assert_ne!(FoldedKey::new(dotted), FoldedKey::new(decomposed));

        let key = format!("{decomposed}.Text");
        assert_eq!(
            strip_prefix_ignore_case(&key, dotted).is_some(),
            eq_ignore_case(decomposed, dotted)
        );
    }

    #[test]
    fn folded_keys_compare_case_insensitively() {
        assert_eq!(FoldedKey::new("Panel.Width"), FoldedKey::new("PANEL.width"));
        assert_ne!(FoldedKey::new("Panel.Width"), FoldedKey::new("Panel.Height"));
        assert_eq!(FoldedKey::new("Panel.Width").as_str(), "panel.width");
    }

    proptest! {
        #[test]
        fn strip_prefix_recovers_suffix(prefix in "[a-zA-Z$_]{1,12}", suffix in "[a-zA-Z.]{0,12}") {
            let key = format!("{}{}", prefix.to_uppercase(), suffix);
            prop_assert_eq!(strip_prefix_ignore_case(&key, &prefix), Some(suffix.as_str()));
        }

        #[test]
        fn prefix_match_agrees_with_equality(a in "[a-zA-Z\u{130}\u{307}iI]{0,6}", b in "[a-zA-Z\u{130}\u{307}iI]{0,6}") {
            let key = format!("{a}.Text");
            prop_assert_eq!(
                strip_prefix_ignore_case(&key, &b) == Some(".Text"),
                eq_ignore_case(&a, &b)
            );
        }

        #[test]
        fn folded_key_agrees_with_eq_ignore_case(a in "[a-zA-Zà-ÿ]{0,8}", b in "[a-zA-Zà-ÿ]{0,8}") {
            prop_assert_eq!(FoldedKey::new(&a) == FoldedKey::new(&b), eq_ignore_case(&a, &b));
        }
    }
}
