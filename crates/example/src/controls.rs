//! Controls placed on the login form.

use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use vellum_attributes::Attributes;

/// Shared, mutable list of entries shown by a [`ListBox`].
pub type Items = Arc<RwLock<Vec<String>>>;

/// Colors applied to a control.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Theme {
    /// Foreground color as `0xRRGGBB`.
    pub foreground: u32,
    /// Background color as `0xRRGGBB`.
    pub background: u32,
}

/// Static text.
#[derive(Debug, Clone, Default, Attributes)]
pub struct Label {
    /// Displayed text.
    #[attribute(rename = "Text")]
    pub text: String,
    /// Hover text.
    #[attribute(rename = "ToolTip")]
    pub tool_tip: Option<String>,
}

/// Single-line text input.
#[derive(Debug, Clone, Default, Attributes)]
pub struct TextBox {
    /// Placeholder shown while empty.
    #[attribute(rename = "PlaceholderText")]
    pub placeholder: String,
    /// Maximum number of characters.
    #[attribute(rename = "MaxLength")]
    pub max_length: u32,
    /// Characters typed by the user.
    #[attribute(skip)]
    pub value: String,
}

/// Push button.
#[derive(Debug, Clone, Default, Attributes)]
pub struct Button {
    /// Caption.
    #[attribute(rename = "Text")]
    pub text: String,
    /// Width in pixels.
    #[attribute(rename = "Width")]
    pub width: i32,
    /// Colors.
    #[attribute(rename = "Theme")]
    pub theme: Theme,
}

/// List of selectable entries.
///
/// Entries are appended at runtime, so the list received from resources
/// must be a private copy.
#[derive(Debug, Clone, Default, Attributes)]
pub struct ListBox {
    /// Entries.
    #[attribute(rename = "Items")]
    pub items: Items,
    /// Number of entries visible without scrolling.
    #[attribute(rename = "VisibleRows", read_only)]
    pub visible_rows: u32,
}

impl ListBox {
    /// Appends an entry.
    pub fn push(&self, entry: impl Into<String>) {
        self.items.write().push(entry.into());
    }

    /// Returns a snapshot of the entries.
    #[must_use]
    pub fn entries(&self) -> Vec<String> {
        self.items.read().clone()
    }
}
