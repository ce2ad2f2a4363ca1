//! Ordered attribute collections.

use crate::descriptor::AttributeDescriptor;
use vellum_resources::key::eq_ignore_case;

/// The attributes of one target, in declaration order.
///
/// Lookup by name ignores case, matching how resource keys name attributes.
#[derive(Debug, Clone, Default)]
pub struct AttributeSet {
    attributes: Vec<AttributeDescriptor>,
}

impl AttributeSet {
    /// Creates a set from descriptors.
    #[must_use]
    pub fn new(attributes: Vec<AttributeDescriptor>) -> Self {
        Self { attributes }
    }

    /// Adds a descriptor, returning the set for chaining.
    #[must_use]
    pub fn with(mut self, attribute: AttributeDescriptor) -> Self {
        self.attributes.push(attribute);
        self
    }

    /// Finds the first attribute named `name`, ignoring case.
    #[must_use]
    pub fn find(&self, name: &str) -> Option<&AttributeDescriptor> {
        self.attributes
            .iter()
            .find(|attribute| eq_ignore_case(attribute.name(), name))
    }

    /// Iterates over all attributes.
    pub fn iter(&self) -> impl Iterator<Item = &AttributeDescriptor> {
        self.attributes.iter()
    }

    /// Iterates over the attributes that have a setter.
    pub fn writable(&self) -> impl Iterator<Item = &AttributeDescriptor> {
        self.attributes
            .iter()
            .filter(|attribute| attribute.is_writable())
    }

    /// Returns the number of attributes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.attributes.len()
    }

    /// Returns `true` if there are no attributes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.attributes.is_empty()
    }
}

impl FromIterator<AttributeDescriptor> for AttributeSet {
    fn from_iter<I: IntoIterator<Item = AttributeDescriptor>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a AttributeSet {
    type Item = &'a AttributeDescriptor;
    type IntoIter = core::slice::Iter<'a, AttributeDescriptor>;

    fn into_iter(self) -> Self::IntoIter {
        self.attributes.iter()
    }
}
