//! The ambient UI locale.
//!
//! Resources are applied for the locale that is current when an assignment
//! is first compiled. Managers read it through a [`LocaleProvider`], by
//! default [`ThreadUiLocale`], which follows [`set_current_ui_locale`] on the
//! calling thread.

use std::cell::RefCell;
use vellum_resources::Locale;

thread_local! {
    static CURRENT_UI_LOCALE: RefCell<Locale> = RefCell::new(Locale::invariant());
}

/// Sets the UI locale of the current thread, returning the previous one.
///
/// # Example
///
/// ```
/// use vellum_manager::locale::{current_ui_locale, set_current_ui_locale};
/// use vellum_resources::Locale;
///
/// let previous = set_current_ui_locale(Locale::new("pt-BR"));
/// assert!(previous.is_invariant());
/// assert_eq!(current_ui_locale(), Locale::new("pt-BR"));
/// ```
pub fn set_current_ui_locale(locale: Locale) -> Locale {
    CURRENT_UI_LOCALE.with(|current| current.replace(locale))
}

/// Returns the UI locale of the current thread.
///
/// Threads start with the invariant locale.
#[must_use]
pub fn current_ui_locale() -> Locale {
    CURRENT_UI_LOCALE.with(|current| current.borrow().clone())
}

/// Source of the locale a manager applies resources for.
pub trait LocaleProvider: Send + Sync + core::fmt::Debug {
    /// Returns the locale to use for the current call.
    fn current_locale(&self) -> Locale;
}

/// Reads the calling thread's UI locale.
#[derive(Debug, Clone, Copy, Default)]
pub struct ThreadUiLocale;

impl LocaleProvider for ThreadUiLocale {
    fn current_locale(&self) -> Locale {
        current_ui_locale()
    }
}

/// Always returns the same locale.
#[derive(Debug, Clone)]
pub struct FixedLocale(Locale);

impl FixedLocale {
    /// Creates a provider for `locale`.
    #[must_use]
    pub fn new(locale: Locale) -> Self {
        Self(locale)
    }
}

impl LocaleProvider for FixedLocale {
    fn current_locale(&self) -> Locale {
        self.0.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn thread_locale_is_per_thread() {
        set_current_ui_locale(Locale::new("de-AT"));
        assert_eq!(ThreadUiLocale.current_locale(), Locale::new("de-AT"));

        let other = std::thread::spawn(current_ui_locale).join().unwrap();
        assert!(other.is_invariant());
    }

    #[test]
    fn fixed_locale_ignores_thread_locale() {
        let provider = FixedLocale::new(Locale::new("ja"));
        set_current_ui_locale(Locale::new("ko"));
        assert_eq!(provider.current_locale(), Locale::new("ja"));
    }
}
