//! Attribute descriptors.
//!
//! An [`AttributeDescriptor`] is everything needed to decide whether a
//! resource value fits an attribute, and to write it. Setters are type-erased
//! so descriptors of different targets can be stored side by side.

use crate::error::AttributeError;
use crate::target::{Attributes, TargetType};
use downcast_rs::Downcast;
use std::borrow::Cow;
use std::sync::Arc;
use vellum_resources::{ResourceValue, ValueType};

/// Type-erased attribute setter.
///
/// Writes a resource value into an attribute of the target.
pub type AttributeSetter =
    Arc<dyn Fn(&mut dyn Attributes, &ResourceValue) -> Result<(), AttributeError> + Send + Sync>;

/// Describes one attribute of a target type.
///
/// # Example
///
/// ```
/// use vellum_attributes::{AttributeDescriptor, AttributeSet, Attributes};
/// use vellum_resources::{ResourceValue, ValueType};
///
/// struct Gauge {
///     level: f32,
///     caption: Option<String>,
/// }
///
/// impl Attributes for Gauge {
///     fn attribute_set(&self) -> AttributeSet {
///         AttributeSet::new(vec![
///             AttributeDescriptor::writable("Level", |g: &mut Gauge, v: f32| g.level = v),
///             AttributeDescriptor::optional("Caption", |g: &mut Gauge, v: Option<String>| {
///                 g.caption = v;
///             }),
///             AttributeDescriptor::read_only::<usize>("Handle"),
///         ])
///     }
/// }
///
/// let mut gauge = Gauge { level: 0.0, caption: Some("old".into()) };
/// let attributes = gauge.attribute_set();
///
/// let level = attributes.find("level").unwrap();
/// assert_eq!(level.declared_type(), ValueType::of::<f32>());
/// assert!(level.accepts(&ResourceValue::new(0.5_f32)));
/// assert!(!level.accepts(&ResourceValue::new(0.5_f64)));
///
/// attributes.find("Caption").unwrap().set(&mut gauge, &ResourceValue::null()).unwrap();
/// assert_eq!(gauge.caption, None);
///
/// assert!(!attributes.find("Handle").unwrap().is_writable());
/// ```
#[derive(Clone)]
pub struct AttributeDescriptor {
    name: Cow<'static, str>,
    declared_type: ValueType,
    nullable: bool,
    setter: Option<AttributeSetter>,
}

impl core::fmt::Debug for AttributeDescriptor {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("AttributeDescriptor")
            .field("name", &self.name)
            .field("declared_type", &self.declared_type)
            .field("nullable", &self.nullable)
            .field("writable", &self.is_writable())
            .finish()
    }
}

impl AttributeDescriptor {
    /// Describes a writable attribute of type `T` on targets of type `O`.
    ///
    /// The resource value is cloned out of its shared allocation before
    /// `assign` receives it.
    pub fn writable<O, T>(
        name: impl Into<Cow<'static, str>>,
        assign: impl Fn(&mut O, T) + Send + Sync + 'static,
    ) -> Self
    where
        O: Attributes,
        T: Clone + Send + Sync + 'static,
    {
        Self::try_writable(name, move |target: &mut O, value: T| {
            assign(target, value);
            Ok(())
        })
    }

    /// Describes a writable attribute whose setter may refuse values.
    ///
    /// Errors returned by `assign` surface unchanged from
    /// [`set`](Self::set).
    pub fn try_writable<O, T>(
        name: impl Into<Cow<'static, str>>,
        assign: impl Fn(&mut O, T) -> Result<(), AttributeError> + Send + Sync + 'static,
    ) -> Self
    where
        O: Attributes,
        T: Clone + Send + Sync + 'static,
    {
        let name = name.into();
        let attribute = name.clone();
        let setter: AttributeSetter = Arc::new(
            move |target: &mut dyn Attributes, value: &ResourceValue| {
                let target = downcast_target::<O>(&attribute, target)?;
                let value = value_of::<T>(&attribute, value)?;
                assign(target, value)
            },
        );

        Self {
            name,
            declared_type: ValueType::of::<T>(),
            nullable: false,
            setter: Some(setter),
        }
    }

    /// Describes a writable attribute of type `Option<T>`.
    ///
    /// Accepts values of type `T` and null, which is written as `None`.
    pub fn optional<O, T>(
        name: impl Into<Cow<'static, str>>,
        assign: impl Fn(&mut O, Option<T>) + Send + Sync + 'static,
    ) -> Self
    where
        O: Attributes,
        T: Clone + Send + Sync + 'static,
    {
        let name = name.into();
        let attribute = name.clone();
        let setter: AttributeSetter = Arc::new(
            move |target: &mut dyn Attributes, value: &ResourceValue| {
                let target = downcast_target::<O>(&attribute, target)?;
                let value = if value.is_null() {
                    None
                } else {
                    Some(value_of::<T>(&attribute, value)?)
                };
                assign(target, value);
                Ok(())
            },
        );

        Self {
            name,
            declared_type: ValueType::of::<T>(),
            nullable: true,
            setter: Some(setter),
        }
    }

    /// Describes a read-only attribute of type `T`.
    #[must_use]
    pub fn read_only<T: ?Sized + 'static>(name: impl Into<Cow<'static, str>>) -> Self {
        Self {
            name: name.into(),
            declared_type: ValueType::of::<T>(),
            nullable: false,
            setter: None,
        }
    }

    /// Returns the attribute name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the declared type of the attribute.
    ///
    /// For optional attributes this is the type inside the `Option`.
    #[must_use]
    pub fn declared_type(&self) -> ValueType {
        self.declared_type
    }

    /// Returns `true` if the attribute can hold null.
    #[must_use]
    pub fn is_nullable(&self) -> bool {
        self.nullable
    }

    /// Returns `true` if the attribute has a setter.
    #[must_use]
    pub fn is_writable(&self) -> bool {
        self.setter.is_some()
    }

    /// Returns the setter, or `None` for read-only attributes.
    #[must_use]
    pub fn setter(&self) -> Option<&AttributeSetter> {
        self.setter.as_ref()
    }

    /// Returns `true` if `value` may be assigned to this attribute.
    ///
    /// A value is accepted when the attribute is writable and the value is
    /// null or of exactly the declared type. Null is accepted even by
    /// non-nullable attributes; the setter rejects it when written.
    #[must_use]
    pub fn accepts(&self, value: &ResourceValue) -> bool {
        self.is_writable()
            && value
                .value_type()
                .is_none_or(|value_type| value_type == self.declared_type)
    }

    /// Writes `value` into this attribute of `target`.
    ///
    /// # Errors
    ///
    /// - [`AttributeError::ReadOnly`] if the attribute has no setter
    /// - [`AttributeError::TargetMismatch`] if `target` is not the type this
    ///   attribute was described on
    /// - [`AttributeError::ValueMismatch`] or
    ///   [`AttributeError::NullNotAllowed`] if the value does not fit
    /// - any error returned by the setter itself
    pub fn set(&self, target: &mut dyn Attributes, value: &ResourceValue) -> Result<(), AttributeError> {
        let setter = self.setter.as_ref().ok_or_else(|| AttributeError::ReadOnly {
            attribute: self.name.to_string(),
        })?;
        setter(target, value)
    }
}

/// Downcasts a setter's target to the type the attribute was described on.
fn downcast_target<'a, O: Attributes>(
    attribute: &str,
    target: &'a mut dyn Attributes,
) -> Result<&'a mut O, AttributeError> {
    let found = target.target_type().type_name();
    target
        .as_any_mut()
        .downcast_mut::<O>()
        .ok_or_else(|| AttributeError::TargetMismatch {
            attribute: attribute.to_owned(),
            expected: core::any::type_name::<O>(),
            found,
        })
}

/// Clones a `T` out of a resource value.
fn value_of<T: Clone + Send + Sync + 'static>(
    attribute: &str,
    value: &ResourceValue,
) -> Result<T, AttributeError> {
    let Some(value_type) = value.value_type() else {
        return Err(AttributeError::NullNotAllowed {
            attribute: attribute.to_owned(),
        });
    };
    value
        .downcast_ref::<T>()
        .cloned()
        .ok_or_else(|| AttributeError::ValueMismatch {
            attribute: attribute.to_owned(),
            expected: core::any::type_name::<T>(),
            found: value_type.type_name(),
        })
}
