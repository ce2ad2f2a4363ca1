//! Example login form localized with Vellum.
//!
//! The form is rebuilt from scratch every time it is shown, the way
//! designer-generated UI code does it: each control is created with default
//! values, then its localized attributes are applied by name.
//!
//! ```text
//! ┌──────────────────────────────────────────┐
//! │ title        "Sign in"                   │
//! │ userName     [            ] "User name"  │
//! │ recent       • alice  • bob              │
//! │ ok           [ OK ]                      │
//! └──────────────────────────────────────────┘
//! ```

mod controls;
mod form;
mod resources;

pub use controls::{Button, Items, Label, ListBox, TextBox, Theme};
pub use form::LoginForm;
pub use resources::login_resources;
