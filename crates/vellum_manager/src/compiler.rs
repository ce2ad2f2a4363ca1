//! Compilation of resource assignments.
//!
//! A [`CompiledAssignment`] is the result of matching the resources of one
//! object name against the attributes of one target type. It is built once,
//! then executed against every later target of that type with that name.

use crate::deep_clone::{CloneFn, DeepCloneRegistry};
use crate::error::{ApplyError, CloneError};
use std::borrow::Cow;
use vellum_attributes::{AttributeSet, AttributeSetter, Attributes, TargetType};
use vellum_resources::key::strip_prefix_ignore_case;
use vellum_resources::{EffectiveResourceMap, Locale, ResourceValue, ValueType};

/// Separator between the object name and the attribute name of a key.
pub const KEY_SEPARATOR: char = '.';

/// Source of the value written by one step.
#[derive(Clone)]
pub enum ValueProducer {
    /// Writes the shared resource value itself.
    Constant(ResourceValue),
    /// Writes an independent copy of the resource value.
    DeepClone {
        /// The shared original.
        value: ResourceValue,
        /// Produces the copy.
        clone: CloneFn,
    },
}

impl core::fmt::Debug for ValueProducer {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Constant(value) => f.debug_tuple("Constant").field(value).finish(),
            Self::DeepClone { value, .. } => f.debug_tuple("DeepClone").field(value).finish(),
        }
    }
}

impl ValueProducer {
    /// Returns the shared resource value.
    #[must_use]
    pub fn value(&self) -> &ResourceValue {
        match self {
            Self::Constant(value) | Self::DeepClone { value, .. } => value,
        }
    }

    /// Returns `true` if the value is copied before each write.
    #[must_use]
    pub fn is_deep_clone(&self) -> bool {
        matches!(self, Self::DeepClone { .. })
    }

    /// Produces the value to write.
    ///
    /// # Errors
    ///
    /// Returns the clone function's error for [`DeepClone`](Self::DeepClone)
    /// producers.
    pub fn produce(&self) -> Result<Cow<'_, ResourceValue>, CloneError> {
        match self {
            Self::Constant(value) => Ok(Cow::Borrowed(value)),
            Self::DeepClone { value, clone } => clone(value).map(Cow::Owned),
        }
    }
}

/// One attribute write of a compiled assignment.
#[derive(Clone)]
pub struct AssignmentStep {
    key: String,
    attribute: String,
    setter: AttributeSetter,
    producer: ValueProducer,
}

impl core::fmt::Debug for AssignmentStep {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("AssignmentStep")
            .field("key", &self.key)
            .field("attribute", &self.attribute)
            .field("producer", &self.producer)
            .finish_non_exhaustive()
    }
}

impl AssignmentStep {
    /// Returns the resource key this step was compiled from.
    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Returns the name of the attribute written, as the target declares it.
    #[must_use]
    pub fn attribute(&self) -> &str {
        &self.attribute
    }

    /// Returns the value producer.
    #[must_use]
    pub fn producer(&self) -> &ValueProducer {
        &self.producer
    }

    fn execute(&self, target: &mut dyn Attributes) -> Result<(), ApplyError> {
        let value = self.producer.produce()?;
        (self.setter)(target, &*value)?;
        Ok(())
    }
}

/// A reusable, immutable list of attribute writes.
///
/// # Example
///
/// ```
/// use vellum_attributes::Attributes;
/// use vellum_manager::{CompiledAssignment, DeepCloneRegistry};
/// use vellum_resources::{EffectiveResourceMap, Locale, ResourceValue};
///
/// #[derive(Default, Attributes)]
/// struct Panel {
///     #[attribute(rename = "Text")]
///     text: String,
///     #[attribute(rename = "Width")]
///     width: i32,
/// }
///
/// let mut resources = EffectiveResourceMap::new();
/// resources.insert("panel.Text", ResourceValue::from("Hello"));
/// resources.insert("panel.Width", ResourceValue::new(42_i32));
/// resources.insert("panel.Height", ResourceValue::from("not-an-int"));
/// resources.insert("panelist.Text", ResourceValue::from("Other"));
///
/// let mut panel = Panel::default();
/// let plan = CompiledAssignment::compile(
///     &panel,
///     "panel",
///     &resources,
///     Locale::invariant(),
///     &DeepCloneRegistry::new(),
/// );
/// assert_eq!(plan.len(), 2);
///
/// plan.execute(&mut panel).unwrap();
/// assert_eq!(panel.text, "Hello");
/// assert_eq!(panel.width, 42);
/// ```
#[derive(Debug, Clone)]
pub struct CompiledAssignment {
    target_type: ValueType,
    object_name: String,
    locale: Locale,
    steps: Vec<AssignmentStep>,
}

impl CompiledAssignment {
    /// Compiles the assignment of `object_name`'s resources to targets of the
    /// runtime type of `target`.
    ///
    /// A key `"<object_name>.<attribute>"` becomes a step when `target` has a
    /// writable attribute of that name (ignoring case) whose declared type is
    /// the value's type, or when the value is null. Other keys are skipped.
    /// `target` is only described if at least one key names the object.
    #[must_use]
    pub fn compile(
        target: &dyn Attributes,
        object_name: &str,
        resources: &EffectiveResourceMap,
        locale: Locale,
        deep_clone: &DeepCloneRegistry,
    ) -> Self {
        let target_type = target.target_type();
        let mut attributes: Option<AttributeSet> = None;
        let mut steps = Vec::new();

        for (key, value) in resources.iter() {
            let Some(attribute_name) = strip_prefix_ignore_case(key, object_name)
                .and_then(|rest| rest.strip_prefix(KEY_SEPARATOR))
            else {
                continue;
            };

            let attributes = attributes.get_or_insert_with(|| target.attribute_set());
            let Some(attribute) = attributes.find(attribute_name) else {
                tracing::trace!(key, target = %target_type, "no attribute for resource key");
                continue;
            };
            let Some(setter) = attribute.setter().filter(|_| attribute.accepts(value)) else {
                tracing::trace!(
                    key,
                    target = %target_type,
                    declared = %attribute.declared_type(),
                    "resource value not assignable"
                );
                continue;
            };

            let producer = match value
                .value_type()
                .and_then(|value_type| deep_clone.clone_fn(value_type))
            {
                Some(clone) => ValueProducer::DeepClone {
                    value: value.clone(),
                    clone,
                },
                None => ValueProducer::Constant(value.clone()),
            };

            steps.push(AssignmentStep {
                key: key.to_owned(),
                attribute: attribute.name().to_owned(),
                setter: setter.clone(),
                producer,
            });
        }

        Self {
            target_type,
            object_name: object_name.to_owned(),
            locale,
            steps,
        }
    }

    /// Runs every step against `target`, in order.
    ///
    /// # Errors
    ///
    /// Stops at the first step whose clone or write fails. Steps already
    /// executed are not undone.
    pub fn execute(&self, target: &mut dyn Attributes) -> Result<(), ApplyError> {
        self.steps.iter().try_for_each(|step| step.execute(target))
    }

    /// Returns the runtime type of the targets this plan was compiled for.
    #[must_use]
    pub fn target_type(&self) -> ValueType {
        self.target_type
    }

    /// Returns the object name this plan was compiled for.
    #[must_use]
    pub fn object_name(&self) -> &str {
        &self.object_name
    }

    /// Returns the locale whose resources this plan was compiled from.
    #[must_use]
    pub fn locale(&self) -> &Locale {
        &self.locale
    }

    /// Returns the steps in execution order.
    #[must_use]
    pub fn steps(&self) -> &[AssignmentStep] {
        &self.steps
    }

    /// Returns the number of steps.
    #[must_use]
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    /// Returns `true` if the plan writes nothing.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use parking_lot::RwLock;
    use proptest::prelude::*;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use vellum_attributes::{AttributeDescriptor, AttributeError};

    #[derive(Debug, Default)]
    struct Field {
        label: String,
        size: i32,
        items: Arc<RwLock<Vec<String>>>,
    }

    impl Attributes for Field {
        fn attribute_set(&self) -> AttributeSet {
            AttributeSet::new(vec![
                AttributeDescriptor::writable("Label", |f: &mut Field, v: String| f.label = v),
                AttributeDescriptor::try_writable("Size", |f: &mut Field, v: i32| {
                    if v > 100 {
                        return Err(AttributeError::rejected("Size", "too large"));
                    }
                    f.size = v;
                    Ok(())
                }),
                AttributeDescriptor::writable(
                    "Items",
                    |f: &mut Field, v: Arc<RwLock<Vec<String>>>| f.items = v,
                ),
                AttributeDescriptor::read_only::<String>("Kind"),
            ])
        }
    }

    static PROBED: AtomicUsize = AtomicUsize::new(0);

    struct Probe;

    impl Attributes for Probe {
        fn attribute_set(&self) -> AttributeSet {
            PROBED.fetch_add(1, Ordering::SeqCst);
            AttributeSet::default()
        }
    }

    fn resources(entries: &[(&str, ResourceValue)]) -> EffectiveResourceMap {
        let mut map = EffectiveResourceMap::new();
        for (key, value) in entries {
            map.insert(key, value.clone());
        }
        map
    }

    fn compile(target: &Field, name: &str, map: &EffectiveResourceMap) -> CompiledAssignment {
        CompiledAssignment::compile(target, name, map, Locale::invariant(), &DeepCloneRegistry::new())
    }

    #[test]
    fn prefix_requires_separator() {
        let map = resources(&[
            ("foo.Label", ResourceValue::from("match")),
            ("foobar.Label", ResourceValue::from("no match")),
            ("FOO.size", ResourceValue::new(3_i32)),
        ]);
        let plan = compile(&Field::default(), "foo", &map);

        let keys: Vec<_> = plan.steps().iter().map(AssignmentStep::key).collect();
        assert_eq!(keys, ["foo.Label", "FOO.size"]);
        assert_eq!(plan.steps()[1].attribute(), "Size");
    }

    #[test]
    fn incompatible_and_read_only_keys_are_skipped() {
        let map = resources(&[
            ("f.Size", ResourceValue::new(3_i64)),
            ("f.Kind", ResourceValue::from("text")),
            ("f.Missing", ResourceValue::from("x")),
            ("f.Label", ResourceValue::from("ok")),
        ]);
        let mut field = Field::default();
        let plan = compile(&field, "f", &map);
        assert_eq!(plan.len(), 1);

        plan.execute(&mut field).unwrap();
        assert_eq!(field.label, "ok");
        assert_eq!(field.size, 0);
    }

    #[test]
    fn introspection_is_lazy() {
        let map = resources(&[("other.Label", ResourceValue::from("x"))]);
        let registry = DeepCloneRegistry::new();

        let plan = CompiledAssignment::compile(&Probe, "p", &map, Locale::invariant(), &registry);
        assert!(plan.is_empty());
        assert_eq!(PROBED.load(Ordering::SeqCst), 0);

        let map = resources(&[("p.A", ResourceValue::null()), ("p.B", ResourceValue::null())]);
        let plan = CompiledAssignment::compile(&Probe, "p", &map, Locale::invariant(), &registry);
        assert!(plan.is_empty());
        assert_eq!(PROBED.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn execution_stops_at_first_failure_without_rollback() {
        let map = resources(&[
            ("f.Label", ResourceValue::from("written")),
            ("f.Size", ResourceValue::new(500_i32)),
            ("f.Items", ResourceValue::new(Arc::new(RwLock::new(vec!["a".to_owned()])))),
        ]);
        let mut field = Field::default();
        let plan = compile(&field, "f", &map);
        assert_eq!(plan.len(), 3);

        let err = plan.execute(&mut field).unwrap_err();
        assert!(matches!(err, ApplyError::Attribute(AttributeError::Rejected { .. })));
        assert_eq!(field.label, "written");
        assert!(field.items.read().is_empty());
    }

    #[test]
    fn null_into_non_optional_fails_on_execute() {
        let map = resources(&[("f.Label", ResourceValue::null())]);
        let mut field = Field::default();
        let plan = compile(&field, "f", &map);
        assert_eq!(plan.len(), 1);

        let err = plan.execute(&mut field).unwrap_err();
        assert!(matches!(err, ApplyError::Attribute(AttributeError::NullNotAllowed { .. })));
    }

    #[test]
    fn registered_types_compile_to_deep_clone_steps() {
        let shared = Arc::new(RwLock::new(vec!["a".to_owned()]));
        let map = resources(&[
            ("f.Items", ResourceValue::new(Arc::clone(&shared))),
            ("f.Label", ResourceValue::from("x")),
        ]);
        let registry = DeepCloneRegistry::new();
        registry.register::<Arc<RwLock<Vec<String>>>>();

        let mut field = Field::default();
        let plan =
            CompiledAssignment::compile(&field, "f", &map, Locale::new("de"), &registry);
        assert!(plan.steps()[0].producer().is_deep_clone());
        assert!(!plan.steps()[1].producer().is_deep_clone());
        assert_eq!(plan.locale(), &Locale::new("de"));

        plan.execute(&mut field).unwrap();
        field.items.write().push("b".to_owned());
        assert_eq!(shared.read().len(), 1);
    }

    proptest! {
        #[test]
        fn longer_object_names_never_match(name in "[a-z]{1,8}", extra in "[a-z]{1,8}") {
            let map = resources(&[
                (format!("{name}{extra}.Label").as_str(), ResourceValue::from("other")),
                (format!("{}.label", name.to_uppercase()).as_str(), ResourceValue::from("own")),
            ]);
            let plan = compile(&Field::default(), &name, &map);

            prop_assert_eq!(plan.len(), 1);
            prop_assert_eq!(plan.steps()[0].attribute(), "Label");
            prop_assert_eq!(plan.steps()[0].producer().value().downcast_ref::<String>().unwrap(), "own");
        }
    }
}
