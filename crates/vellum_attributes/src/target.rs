//! The introspection trait implemented by resource targets.

use crate::set::AttributeSet;
use downcast_rs::{Downcast, impl_downcast};
use vellum_resources::ValueType;

/// A value whose attributes can be described and written at runtime.
///
/// Usually derived with [`#[derive(Attributes)]`](macro@crate::Attributes).
/// Manual implementations can add attributes that are not plain fields, or
/// setters that validate their input.
///
/// # Example
///
/// ```
/// use vellum_attributes::{AttributeDescriptor, AttributeError, AttributeSet, Attributes};
///
/// struct Slider {
///     value: u8,
/// }
///
/// impl Attributes for Slider {
///     fn attribute_set(&self) -> AttributeSet {
///         AttributeSet::new(vec![AttributeDescriptor::try_writable(
///             "Value",
///             |slider: &mut Slider, value: u8| {
///                 if value > 100 {
///                     return Err(AttributeError::rejected("Value", "above 100"));
///                 }
///                 slider.value = value;
///                 Ok(())
///             },
///         )])
///     }
/// }
/// ```
pub trait Attributes: Downcast + TargetType + 'static {
    /// Describes the attributes of this value.
    ///
    /// Called when a resource assignment for this value's type is compiled,
    /// not on every assignment.
    fn attribute_set(&self) -> AttributeSet;
}

impl_downcast!(Attributes);

/// The runtime type of a value, as seen through `dyn Attributes`.
///
/// Implemented for every [`Attributes`] type and cannot be overridden by
/// them, so the reported type is always the concrete type of the value.
/// Compiled assignments are cached under it.
pub trait TargetType {
    /// Returns the runtime type of this value.
    fn target_type(&self) -> ValueType;
}

impl<T: Attributes> TargetType for T {
    fn target_type(&self) -> ValueType {
        ValueType::of::<T>()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Empty;

    impl Attributes for Empty {
        fn attribute_set(&self) -> AttributeSet {
            AttributeSet::default()
        }
    }

    #[test]
    fn target_type_is_concrete_through_dyn() {
        let target: Box<dyn Attributes> = Box::new(Empty);
        assert_eq!(target.target_type(), ValueType::of::<Empty>());
        assert!(target.is::<Empty>());
    }
}
