//! Error types for attribute assignment.

use thiserror::Error;

/// Errors raised while writing a value into an attribute.
#[derive(Debug, Error)]
pub enum AttributeError {
    /// The setter was invoked on a target of a different type.
    #[error("attribute '{attribute}' belongs to {expected}, not {found}")]
    TargetMismatch {
        /// Attribute name.
        attribute: String,
        /// Type the attribute was described on.
        expected: &'static str,
        /// Type of the target actually passed.
        found: &'static str,
    },

    /// The value's runtime type is not the attribute's declared type.
    #[error("attribute '{attribute}' expects {expected}, got {found}")]
    ValueMismatch {
        /// Attribute name.
        attribute: String,
        /// Declared attribute type.
        expected: &'static str,
        /// Runtime type of the value.
        found: &'static str,
    },

    /// A null value was written into an attribute that cannot hold null.
    #[error("attribute '{attribute}' does not accept null")]
    NullNotAllowed {
        /// Attribute name.
        attribute: String,
    },

    /// The attribute has no setter.
    #[error("attribute '{attribute}' is read-only")]
    ReadOnly {
        /// Attribute name.
        attribute: String,
    },

    /// The attribute's own validation refused the value.
    #[error("attribute '{attribute}' rejected the value: {reason}")]
    Rejected {
        /// Attribute name.
        attribute: String,
        /// Why the value was refused.
        reason: String,
    },
}

impl AttributeError {
    /// Creates a [`Rejected`](Self::Rejected) error.
    pub fn rejected(attribute: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Rejected {
            attribute: attribute.into(),
            reason: reason.into(),
        }
    }
}
