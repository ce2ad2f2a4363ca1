//! Error types for resource application.

use thiserror::Error;
use vellum_attributes::AttributeError;
use vellum_resources::ResourceError;

/// Errors produced while deep-cloning a resource value.
#[derive(Debug, Error)]
pub enum CloneError {
    /// No clone function is registered for the value's type.
    #[error("no deep clone registered for {type_name}")]
    NotRegistered {
        /// Runtime type of the value.
        type_name: &'static str,
    },

    /// A serialization round trip failed.
    #[error("deep clone serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),

    /// A registered clone function refused the value.
    #[error("deep clone of {type_name} failed: {reason}")]
    Failed {
        /// Runtime type of the value.
        type_name: &'static str,
        /// Failure description.
        reason: String,
    },
}

impl CloneError {
    /// Creates a [`Failed`](Self::Failed) error for values of type `T`.
    pub fn failed<T: ?Sized>(reason: impl Into<String>) -> Self {
        Self::Failed {
            type_name: core::any::type_name::<T>(),
            reason: reason.into(),
        }
    }
}

/// Errors returned by [`ComponentResourceManager`](crate::ComponentResourceManager).
#[derive(Debug, Error)]
pub enum ApplyError {
    /// A required argument was missing or empty. Nothing was modified.
    #[error("invalid argument: {0}")]
    InvalidArgument(&'static str),

    /// The resource store could not be read.
    #[error(transparent)]
    Resource(#[from] ResourceError),

    /// An attribute refused the value written to it.
    #[error(transparent)]
    Attribute(#[from] AttributeError),

    /// A registered value could not be cloned.
    #[error(transparent)]
    Clone(#[from] CloneError),
}
