//! Error types for resource lookup.

use crate::locale::Locale;

/// Errors that can occur while reading resources from a store.
#[derive(Debug, thiserror::Error)]
pub enum ResourceError {
    /// The backing store failed to produce the resource set for a locale.
    #[error("resource store failed for locale {locale}: {message}")]
    Store {
        /// The locale being read.
        locale: Locale,
        /// Store-specific failure description.
        message: String,
    },
}

impl ResourceError {
    /// Creates a [`Store`](Self::Store) error.
    pub fn store(locale: &Locale, message: impl Into<String>) -> Self {
        Self::Store {
            locale: locale.clone(),
            message: message.into(),
        }
    }
}
