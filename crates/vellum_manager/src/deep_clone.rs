//! Deep cloning of shared resource values.
//!
//! Resource values are shared by reference between every target they are
//! assigned to. A type whose values are mutated after assignment, typically
//! through interior mutability, must be registered in a
//! [`DeepCloneRegistry`] so each assignment receives an independent copy.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use parking_lot::RwLock;
//! use vellum_manager::DeepCloneRegistry;
//! use vellum_resources::{ResourceValue, ValueType};
//!
//! type Items = Arc<RwLock<Vec<String>>>;
//!
//! let registry = DeepCloneRegistry::new();
//! registry.register::<Items>();
//! assert!(registry.is_registered(ValueType::of::<Items>()));
//!
//! let original = ResourceValue::new(Items::default());
//! let copy = registry.deep_clone(&original).unwrap();
//! copy.downcast_ref::<Items>().unwrap().write().push("new".into());
//!
//! assert!(original.downcast_ref::<Items>().unwrap().read().is_empty());
//! ```

use crate::error::CloneError;
use hashbrown::HashMap;
use parking_lot::{Mutex, RwLock};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::sync::Arc;
use vellum_resources::{ResourceValue, ValueType};

/// Produces a structurally independent copy of a value.
///
/// Unlike [`Clone`], the copy must not share mutable state with the
/// original.
pub trait DeepClone: Sized {
    /// Returns an independent copy of `self`.
    ///
    /// # Errors
    ///
    /// Returns a [`CloneError`] if the value cannot be copied.
    fn deep_clone(&self) -> Result<Self, CloneError>;
}

impl<T: Clone> DeepClone for Arc<RwLock<T>> {
    fn deep_clone(&self) -> Result<Self, CloneError> {
        Ok(Arc::new(RwLock::new(self.read().clone())))
    }
}

impl<T: Clone> DeepClone for Arc<Mutex<T>> {
    fn deep_clone(&self) -> Result<Self, CloneError> {
        Ok(Arc::new(Mutex::new(self.lock().clone())))
    }
}

/// Copies a value through a JSON round trip.
///
/// Useful as a [`DeepCloneRegistry::register_with`] function for types that
/// are serializable but have no cheaper way to produce an independent copy.
///
/// # Errors
///
/// Returns [`CloneError::Serialization`] if the value cannot be serialized
/// or the serialized form cannot be read back.
pub fn clone_via_json<T: Serialize + DeserializeOwned>(value: &T) -> Result<T, CloneError> {
    let json = serde_json::to_value(value)?;
    Ok(serde_json::from_value(json)?)
}

/// Type-erased clone function stored in the registry.
pub type CloneFn =
    Arc<dyn Fn(&ResourceValue) -> Result<ResourceValue, CloneError> + Send + Sync>;

/// Append-only set of value types that are deep-cloned before assignment.
///
/// The registry is consulted when an assignment is compiled. Registering a
/// type afterwards does not change plans that were already compiled.
#[derive(Default)]
pub struct DeepCloneRegistry {
    entries: RwLock<HashMap<ValueType, CloneFn>>,
}

impl core::fmt::Debug for DeepCloneRegistry {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let entries = self.entries.read();
        f.debug_set().entries(entries.keys()).finish()
    }
}

impl DeepCloneRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `T` using its [`DeepClone`] implementation.
    ///
    /// Returns `false` if `T` was already registered, in which case the
    /// existing clone function is kept.
    pub fn register<T: DeepClone + Send + Sync + 'static>(&self) -> bool {
        self.register_with::<T>(T::deep_clone)
    }

    /// Registers `T` with an explicit clone function.
    ///
    /// Returns `false` if `T` was already registered, in which case the
    /// existing clone function is kept.
    pub fn register_with<T: Send + Sync + 'static>(
        &self,
        clone: impl Fn(&T) -> Result<T, CloneError> + Send + Sync + 'static,
    ) -> bool {
        let value_type = ValueType::of::<T>();
        let clone_fn: CloneFn = Arc::new(move |value: &ResourceValue| {
            let original = value.downcast_ref::<T>().ok_or(CloneError::NotRegistered {
                type_name: value
                    .value_type()
                    .map_or("null", |value_type| value_type.type_name()),
            })?;
            clone(original).map(ResourceValue::new)
        });

        let mut entries = self.entries.write();
        if entries.contains_key(&value_type) {
            return false;
        }
        entries.insert(value_type, clone_fn);
        tracing::debug!(value_type = %value_type, "registered type for deep clone");
        true
    }

    /// Returns `true` if values of `value_type` are deep-cloned.
    #[must_use]
    pub fn is_registered(&self, value_type: ValueType) -> bool {
        self.entries.read().contains_key(&value_type)
    }

    /// Returns the clone function registered for `value_type`.
    #[must_use]
    pub fn clone_fn(&self, value_type: ValueType) -> Option<CloneFn> {
        self.entries.read().get(&value_type).cloned()
    }

    /// Deep-clones `value` with its registered clone function.
    ///
    /// Null is returned unchanged.
    ///
    /// # Errors
    ///
    /// Returns [`CloneError::NotRegistered`] if the value's type is not
    /// registered, or the error of the clone function itself.
    pub fn deep_clone(&self, value: &ResourceValue) -> Result<ResourceValue, CloneError> {
        let Some(value_type) = value.value_type() else {
            return Ok(ResourceValue::null());
        };
        let clone = self
            .clone_fn(value_type)
            .ok_or(CloneError::NotRegistered {
                type_name: value_type.type_name(),
            })?;
        clone(value)
    }

    /// Returns the number of registered types.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    /// Returns `true` if no type is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }
}
