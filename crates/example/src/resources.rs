//! Resource tables of the login form.

use crate::controls::{Items, Theme};
use parking_lot::RwLock;
use std::sync::Arc;
use vellum_resources::{Locale, MemoryResourceStore, ResourceSet, ResourceValue};

/// Returns the resources of the login form.
///
/// English is the neutral language and lives in the invariant table.
/// German and French override a subset of it.
#[must_use]
pub fn login_resources() -> MemoryResourceStore {
    let recent: Items = Arc::new(RwLock::new(vec!["alice".to_owned(), "bob".to_owned()]));

    let neutral = ResourceSet::new()
        .with_entry("$this.Text", "Sign in")
        .with_entry("title.Text", "Sign in")
        .with_entry("title.ToolTip", "Use your company account")
        .with_entry("userName.PlaceholderText", "User name")
        .with_entry("userName.MaxLength", 64_u32)
        .with_entry("recent.Items", ResourceValue::new(recent))
        .with_entry("recent.VisibleRows", 4_u32)
        .with_entry("ok.Text", "OK")
        .with_entry("ok.Width", 75_i32)
        .with_entry(
            "ok.Theme",
            ResourceValue::new(Theme {
                foreground: 0xff_ff_ff,
                background: 0x00_66_cc,
            }),
        )
        .with_entry("ok.Height", "23");

    let german = ResourceSet::new()
        .with_entry("$this.Text", "Anmelden")
        .with_entry("title.Text", "Anmelden")
        .with_entry("title.ToolTip", ResourceValue::null())
        .with_entry("userName.PlaceholderText", "Benutzername")
        .with_entry("ok.Width", 90_i32);

    let french = ResourceSet::new()
        .with_entry("title.Text", "Connexion")
        .with_entry("userName.PlaceholderText", "Nom d'utilisateur");

    MemoryResourceStore::new()
        .with_neutral_locale(Locale::new("en"))
        .with_set(Locale::invariant(), neutral)
        .with_set(Locale::new("de"), german)
        .with_set(Locale::new("fr"), french)
}
