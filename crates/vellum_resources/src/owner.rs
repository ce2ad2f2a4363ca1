//! Identity of resource owners.
//!
//! Resources are compiled into the owning component (a form, a dialog, a
//! page). Caches are partitioned by owner so two components may reuse the
//! same object names without seeing each other's resources.

use core::any::TypeId;

/// Unique identifier for a resource owner type.
///
/// Based on [`TypeId`], so each owner type has exactly one `OwnerId`.
///
/// # Example
///
/// ```
/// use vellum_resources::OwnerId;
///
/// struct MainWindow;
/// struct AboutDialog;
///
/// assert_eq!(OwnerId::of::<MainWindow>(), OwnerId::of::<MainWindow>());
/// assert_ne!(OwnerId::of::<MainWindow>(), OwnerId::of::<AboutDialog>());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct OwnerId {
    type_id: TypeId,
    type_name: &'static str,
}

impl OwnerId {
    /// Creates an `OwnerId` for the given owner type.
    #[must_use]
    pub fn of<O: ?Sized + 'static>() -> Self {
        Self {
            type_id: TypeId::of::<O>(),
            type_name: core::any::type_name::<O>(),
        }
    }

    /// Returns the underlying `TypeId`.
    #[must_use]
    pub fn type_id(&self) -> TypeId {
        self.type_id
    }

    /// Returns the type name for debugging.
    #[must_use]
    pub fn type_name(&self) -> &'static str {
        self.type_name
    }
}
