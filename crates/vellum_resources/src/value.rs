//! Type-erased resource values.
//!
//! A [`ResourceValue`] is what a resource store hands out for a key: any
//! `Send + Sync + 'static` value, shared behind an [`Arc`], or null. Values
//! remember their runtime [`ValueType`] so that attribute compatibility can
//! be checked without touching the data.

use core::any::TypeId;
use core::fmt;
use core::hash::{Hash, Hasher};
use downcast_rs::{DowncastSync, impl_downcast};
use std::sync::Arc;

/// Data that can be stored in a [`ResourceValue`].
///
/// Implemented for every `Send + Sync + 'static` type.
pub trait ResourceData: DowncastSync {}

impl<T: Send + Sync + 'static> ResourceData for T {}

impl_downcast!(sync ResourceData);

/// Runtime type of a resource value or attribute.
///
/// Identity is the [`TypeId`]; the type name is kept for diagnostics.
#[derive(Clone, Copy)]
pub struct ValueType {
    type_id: TypeId,
    type_name: &'static str,
}

impl ValueType {
    /// Returns the `ValueType` of `T`.
    #[must_use]
    pub fn of<T: ?Sized + 'static>() -> Self {
        Self {
            type_id: TypeId::of::<T>(),
            type_name: core::any::type_name::<T>(),
        }
    }

    /// Builds a `ValueType` from a type id observed at runtime.
    ///
    /// `type_name` must name the type `type_id` identifies.
    #[must_use]
    pub fn from_parts(type_id: TypeId, type_name: &'static str) -> Self {
        Self { type_id, type_name }
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

impl PartialEq for ValueType {
    fn eq(&self, other: &Self) -> bool {
        self.type_id == other.type_id
    }
}

impl Eq for ValueType {}

impl Hash for ValueType {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.type_id.hash(state);
    }
}

impl fmt::Debug for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.type_name)
    }
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.type_name)
    }
}

/// A shared, type-erased resource value that may be null.
///
/// Cloning a `ResourceValue` clones the [`Arc`], never the data.
///
/// # Example
///
/// ```
/// use vellum_resources::{ResourceValue, ValueType};
///
/// let width = ResourceValue::new(42_i32);
/// assert_eq!(width.value_type(), Some(ValueType::of::<i32>()));
/// assert_eq!(width.downcast_ref::<i32>(), Some(&42));
/// assert_eq!(width.downcast_ref::<u32>(), None);
///
/// let text: ResourceValue = "Hello".into();
/// assert_eq!(text.downcast_ref::<String>().map(String::as_str), Some("Hello"));
///
/// assert!(ResourceValue::null().is_null());
/// ```
#[derive(Clone, Default)]
pub struct ResourceValue {
    inner: Option<(ValueType, Arc<dyn ResourceData>)>,
}

impl ResourceValue {
    /// Wraps `value` in a new shared resource value.
    pub fn new<T: Send + Sync + 'static>(value: T) -> Self {
        Self::from_arc(Arc::new(value))
    }

    /// Wraps an already shared value without copying it.
    pub fn from_arc<T: Send + Sync + 'static>(value: Arc<T>) -> Self {
        let data: Arc<dyn ResourceData> = value;
        Self {
            inner: Some((ValueType::of::<T>(), data)),
        }
    }

    /// Returns the null value.
    #[must_use]
    pub const fn null() -> Self {
        Self { inner: None }
    }

    /// Returns `true` if this is the null value.
    #[must_use]
    pub fn is_null(&self) -> bool {
        self.inner.is_none()
    }

    /// Returns the runtime type of the value, or `None` for null.
    #[must_use]
    pub fn value_type(&self) -> Option<ValueType> {
        self.inner.as_ref().map(|(value_type, _)| *value_type)
    }

    /// Returns `true` if the value is a `T`.
    #[must_use]
    pub fn is<T: Send + Sync + 'static>(&self) -> bool {
        self.value_type() == Some(ValueType::of::<T>())
    }

    /// Returns a reference to the value if it is a `T`.
    #[must_use]
    pub fn downcast_ref<T: Send + Sync + 'static>(&self) -> Option<&T> {
        self.inner
            .as_ref()
            .and_then(|(_, data)| data.downcast_ref::<T>())
    }

    /// Returns the shared value if it is a `T`.
    #[must_use]
    pub fn downcast_arc<T: Send + Sync + 'static>(&self) -> Option<Arc<T>> {
        let (_, data) = self.inner.as_ref()?;
        Arc::clone(data).downcast_arc::<T>().ok()
    }

    /// Returns `true` if both values share the same allocation, or both are null.
    #[must_use]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        match (&self.inner, &other.inner) {
            (Some((_, a)), Some((_, b))) => Arc::ptr_eq(a, b),
            (None, None) => true,
            _ => false,
        }
    }
}

impl fmt::Debug for ResourceValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.value_type() {
            Some(value_type) => write!(f, "ResourceValue({value_type})"),
            None => f.write_str("ResourceValue(null)"),
        }
    }
}

impl From<&str> for ResourceValue {
    fn from(value: &str) -> Self {
        Self::new(value.to_owned())
    }
}

macro_rules! impl_from_value {
    ($($ty:ty),* $(,)?) => {
        $(
            impl From<$ty> for ResourceValue {
                fn from(value: $ty) -> Self {
                    Self::new(value)
                }
            }
        )*
    };
}

impl_from_value!(String, bool, char, i8, i16, i32, i64, u8, u16, u32, u64, usize, f32, f64);

impl<T: Send + Sync + 'static> From<Option<T>> for ResourceValue {
    fn from(value: Option<T>) -> Self {
        value.map_or_else(Self::null, Self::new)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, PartialEq)]
    struct Padding {
        left: u16,
        right: u16,
    }

    #[test]
    fn value_remembers_its_type() {
        let value = ResourceValue::new(Padding { left: 1, right: 2 });
        assert_eq!(value.value_type(), Some(ValueType::of::<Padding>()));
        assert!(value.is::<Padding>());
        assert!(!value.is::<String>());
    }

    #[test]
    fn null_has_no_type() {
        let value = ResourceValue::null();
        assert!(value.is_null());
        assert_eq!(value.value_type(), None);
        assert_eq!(value.downcast_ref::<String>(), None);
        assert!(ResourceValue::from(None::<i32>).is_null());
    }

    #[test]
    fn clones_share_the_allocation() {
        let value = ResourceValue::new(Padding { left: 3, right: 4 });
        let copy = value.clone();
        assert!(value.ptr_eq(&copy));
        assert!(!value.ptr_eq(&ResourceValue::new(Padding { left: 3, right: 4 })));
    }

    #[test]
    fn downcast_arc_returns_shared_data() {
        let shared = Arc::new(Padding { left: 5, right: 6 });
        let value = ResourceValue::from_arc(Arc::clone(&shared));
        let back = value.downcast_arc::<Padding>().unwrap();
        assert!(Arc::ptr_eq(&shared, &back));
        assert!(value.downcast_arc::<String>().is_none());
    }

    #[test]
    fn value_type_equality_uses_type_id() {
        assert_eq!(ValueType::of::<i32>(), ValueType::of::<i32>());
        assert_ne!(ValueType::of::<i32>(), ValueType::of::<i64>());
        assert_eq!(ValueType::of::<i32>().type_name(), "i32");
    }

    #[test]
    fn debug_names_the_type() {
        assert_eq!(format!("{:?}", ResourceValue::new(1_u8)), "ResourceValue(u8)");
        assert_eq!(format!("{:?}", ResourceValue::null()), "ResourceValue(null)");
    }
}
