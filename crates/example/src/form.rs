//! The login form.

use crate::controls::{Button, Items, Label, ListBox, TextBox, Theme};
use vellum_manager::{ApplyError, ComponentResourceManager, clone_via_json};
use vellum_resources::ResourceStore;

/// A login form, rebuilt on every display.
#[derive(Debug, Default)]
pub struct LoginForm {
    /// Heading.
    pub title: Label,
    /// User name input.
    pub user_name: TextBox,
    /// Recently used accounts.
    pub recent: ListBox,
    /// Confirmation button.
    pub ok: Button,
}

impl LoginForm {
    /// Creates a manager for the form's resources.
    ///
    /// Values that controls mutate after assignment are registered for deep
    /// cloning before any control is initialized.
    #[must_use]
    pub fn resource_manager(resources: impl ResourceStore + 'static) -> ComponentResourceManager {
        let manager = ComponentResourceManager::new::<Self>(resources);
        manager.register_type_for_deep_clone::<Items>();
        manager
            .caches()
            .deep_clone()
            .register_with::<Theme>(clone_via_json);
        manager
    }

    /// Builds the form and applies its localized resources.
    ///
    /// # Errors
    ///
    /// Returns the first [`ApplyError`] raised by a control.
    pub fn initialize_component(resources: &ComponentResourceManager) -> Result<Self, ApplyError> {
        let mut form = Self::default();
        resources.apply_resources(&mut form.title, "title")?;
        resources.apply_resources(&mut form.user_name, "userName")?;
        resources.apply_resources(&mut form.recent, "recent")?;
        resources.apply_resources(&mut form.ok, "ok")?;
        Ok(form)
    }

    /// Returns the window caption.
    ///
    /// # Errors
    ///
    /// Returns an [`ApplyError`] if the caption cannot be read.
    pub fn caption(resources: &ComponentResourceManager) -> Result<String, ApplyError> {
        Ok(resources.get_string("$this.Text")?.unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resources::login_resources;
    use std::sync::Arc;
    use vellum_manager::locale::FixedLocale;
    use vellum_manager::ResourceCaches;
    use vellum_resources::Locale;

    fn manager(locale: &str) -> ComponentResourceManager {
        let manager = ComponentResourceManager::builder::<LoginForm>(login_resources())
            .with_caches(Arc::new(ResourceCaches::new()))
            .with_locale_provider(FixedLocale::new(Locale::new(locale)))
            .build();
        manager.register_type_for_deep_clone::<Items>();
        manager
    }

    #[test]
    fn english_uses_neutral_resources() {
        let resources = manager("en-US");
        let form = LoginForm::initialize_component(&resources).unwrap();

        assert_eq!(form.title.text, "Sign in");
        assert_eq!(form.title.tool_tip.as_deref(), Some("Use your company account"));
        assert_eq!(form.user_name.max_length, 64);
        assert_eq!(form.ok.width, 75);
        assert_eq!(form.recent.visible_rows, 0);
        assert_eq!(LoginForm::caption(&resources).unwrap(), "Sign in");
    }

    #[test]
    fn german_overrides_and_inherits() {
        let resources = manager("de-CH");
        let form = LoginForm::initialize_component(&resources).unwrap();

        assert_eq!(form.title.text, "Anmelden");
        assert_eq!(form.title.tool_tip, None);
        assert_eq!(form.user_name.placeholder, "Benutzername");
        assert_eq!(form.user_name.max_length, 64);
        assert_eq!(form.ok.text, "OK");
        assert_eq!(form.ok.width, 90);
    }

    #[test]
    fn each_form_gets_its_own_recent_list() {
        let resources = manager("fr");
        let first = LoginForm::initialize_component(&resources).unwrap();
        first.recent.push("carol");

        let second = LoginForm::initialize_component(&resources).unwrap();
        assert_eq!(first.recent.entries(), ["alice", "bob", "carol"]);
        assert_eq!(second.recent.entries(), ["alice", "bob"]);
    }

    #[test]
    fn rebuilding_compiles_once_per_control() {
        let resources = manager("fr");
        for _ in 0..5 {
            LoginForm::initialize_component(&resources).unwrap();
        }

        let stats = resources.caches().stats();
        assert_eq!(stats.compiled_plans, 4);
        assert_eq!(stats.plan_hits, 16);
    }
}
