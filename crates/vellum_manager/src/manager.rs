//! The component resource manager.

use crate::cache::{PlanScope, ResourceCaches};
use crate::compiler::CompiledAssignment;
use crate::deep_clone::DeepClone;
use crate::error::ApplyError;
use crate::locale::{LocaleProvider, ThreadUiLocale};
use std::sync::Arc;
use vellum_attributes::{Attributes, TargetType};
use vellum_resources::{Locale, OwnerId, ResourceResolver, ResourceStore, ResourceValue};

/// Applies the localized resources of one owner to named objects.
///
/// The first application of a name to a target type compiles a
/// [`CompiledAssignment`] from the resources of the locale current at that
/// moment. Every later application of that name to that type reuses the plan.
///
/// # Locale pinning
///
/// A compiled plan is never rebuilt. Changing the UI locale after a name
/// was first applied to a type has no effect on later applications of that
/// name to that type. The same holds for [`get_object`](Self::get_object).
///
/// # Example
///
/// ```
/// use vellum_attributes::{Attributes, TargetType};
/// use vellum_manager::ComponentResourceManager;
/// use vellum_manager::locale::set_current_ui_locale;
/// use vellum_resources::{Locale, MemoryResourceStore};
///
/// struct SettingsPage;
///
/// #[derive(Default, Attributes)]
/// struct Button {
///     #[attribute(rename = "Text")]
///     text: String,
/// }
///
/// let store = MemoryResourceStore::new()
///     .with_entry(Locale::invariant(), "save.Text", "Save")
///     .with_entry(Locale::new("fr"), "save.Text", "Enregistrer");
/// let manager = ComponentResourceManager::new::<SettingsPage>(store);
///
/// set_current_ui_locale(Locale::new("fr-FR"));
/// let mut save = Button::default();
/// manager.apply_resources(&mut save, "save").unwrap();
/// assert_eq!(save.text, "Enregistrer");
/// ```
#[derive(Debug, Clone)]
pub struct ComponentResourceManager {
    owner: OwnerId,
    resolver: ResourceResolver,
    caches: Arc<ResourceCaches>,
    locale: Arc<dyn LocaleProvider>,
}

impl ComponentResourceManager {
    /// Creates a manager for owner `O` using the global caches and the
    /// thread UI locale.
    #[must_use]
    pub fn new<O: ?Sized + 'static>(store: impl ResourceStore + 'static) -> Self {
        Self::builder::<O>(store).build()
    }

    /// Starts building a manager for owner `O`.
    #[must_use]
    pub fn builder<O: ?Sized + 'static>(
        store: impl ResourceStore + 'static,
    ) -> ComponentResourceManagerBuilder {
        ComponentResourceManagerBuilder {
            owner: OwnerId::of::<O>(),
            store: Arc::new(store),
            caches: None,
            locale: None,
            neutral: None,
        }
    }

    /// Returns the owner whose resources this manager applies.
    #[must_use]
    pub fn owner(&self) -> OwnerId {
        self.owner
    }

    /// Returns the caches this manager uses.
    #[must_use]
    pub fn caches(&self) -> &Arc<ResourceCaches> {
        &self.caches
    }

    /// Returns the resolver this manager compiles from.
    #[must_use]
    pub fn resolver(&self) -> &ResourceResolver {
        &self.resolver
    }

    /// Returns the locale the next call would use.
    #[must_use]
    pub fn current_locale(&self) -> Locale {
        self.locale.current_locale()
    }

    /// Applies the resources named `object_name` to `target`.
    ///
    /// An empty `object_name` stands for a missing name and is rejected,
    /// even though keys such as `".Text"` have an empty object part. Such
    /// keys are never applied.
    ///
    /// # Errors
    ///
    /// - [`ApplyError::InvalidArgument`] if `object_name` is empty
    /// - [`ApplyError::Resource`] if the store fails while compiling
    /// - [`ApplyError::Attribute`] or [`ApplyError::Clone`] if a step fails;
    ///   earlier steps stay applied
    pub fn apply_resources<T: Attributes>(
        &self,
        target: &mut T,
        object_name: &str,
    ) -> Result<(), ApplyError> {
        self.apply_resources_dyn(target, object_name)
    }

    /// Applies the resources named `object_name` to a type-erased target.
    ///
    /// Plans are keyed by the target's runtime type, so this shares plans
    /// with [`apply_resources`](Self::apply_resources).
    ///
    /// # Errors
    ///
    /// See [`apply_resources`](Self::apply_resources).
    pub fn apply_resources_dyn(
        &self,
        target: &mut dyn Attributes,
        object_name: &str,
    ) -> Result<(), ApplyError> {
        if object_name.is_empty() {
            return Err(ApplyError::InvalidArgument("object name must not be empty"));
        }

        let locale = self.locale.current_locale();
        let scope = PlanScope::new(self.owner, target.target_type());
        let plan = self
            .caches
            .plans()
            .get_or_try_compile(scope, object_name, || self.compile(&*target, object_name, locale))?;

        plan.execute(target)
    }

    fn compile(
        &self,
        target: &dyn Attributes,
        object_name: &str,
        locale: Locale,
    ) -> Result<CompiledAssignment, ApplyError> {
        let resources = self.resolver.resolve(&locale)?;
        let plan = CompiledAssignment::compile(
            target,
            object_name,
            &resources,
            locale,
            self.caches.deep_clone(),
        );

        tracing::debug!(
            owner = self.owner.type_name(),
            target = %plan.target_type(),
            object = object_name,
            locale = %plan.locale(),
            steps = plan.len(),
            "compiled resource assignment"
        );
        Ok(plan)
    }

    /// Returns the resource named `name`.
    ///
    /// The first request for a name looks it up for the current locale and
    /// caches the result, including the null value for absent resources.
    /// Later requests return the cached value without reading the store.
    ///
    /// An empty `name` stands for a missing name and is rejected, even if
    /// the store holds an entry under the empty key.
    ///
    /// # Errors
    ///
    /// - [`ApplyError::InvalidArgument`] if `name` is empty
    /// - [`ApplyError::Resource`] if the store fails on the first request
    pub fn get_object(&self, name: &str) -> Result<ResourceValue, ApplyError> {
        if name.is_empty() {
            return Err(ApplyError::InvalidArgument("resource name must not be empty"));
        }

        self.caches.objects().get_or_try_insert_with(self.owner, name, || {
            let locale = self.locale.current_locale();
            Ok(self.resolver.lookup(&locale, name)?)
        })
    }

    /// Returns the resource named `name` if it is a string.
    ///
    /// Absent resources and resources of other types yield `None`.
    ///
    /// # Errors
    ///
    /// See [`get_object`](Self::get_object).
    pub fn get_string(&self, name: &str) -> Result<Option<String>, ApplyError> {
        Ok(self.get_object(name)?.downcast_ref::<String>().cloned())
    }

    /// Registers `T` for deep cloning in this manager's caches.
    ///
    /// Values of type `T` are copied before every assignment in plans
    /// compiled afterwards. Returns `false` if `T` was already registered.
    pub fn register_type_for_deep_clone<T: DeepClone + Send + Sync + 'static>(&self) -> bool {
        self.caches.deep_clone().register::<T>()
    }
}

/// Builder for [`ComponentResourceManager`].
pub struct ComponentResourceManagerBuilder {
    owner: OwnerId,
    store: Arc<dyn ResourceStore>,
    caches: Option<Arc<ResourceCaches>>,
    locale: Option<Arc<dyn LocaleProvider>>,
    neutral: Option<Locale>,
}

impl core::fmt::Debug for ComponentResourceManagerBuilder {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("ComponentResourceManagerBuilder")
            .field("owner", &self.owner)
            .field("caches", &self.caches)
            .field("locale", &self.locale)
            .field("neutral", &self.neutral)
            .finish_non_exhaustive()
    }
}

impl ComponentResourceManagerBuilder {
    /// Uses `caches` instead of the global caches.
    #[must_use]
    pub fn with_caches(mut self, caches: Arc<ResourceCaches>) -> Self {
        self.caches = Some(caches);
        self
    }

    /// Reads the current locale from `provider` instead of the thread UI
    /// locale.
    #[must_use]
    pub fn with_locale_provider(mut self, provider: impl LocaleProvider + 'static) -> Self {
        self.locale = Some(Arc::new(provider));
        self
    }

    /// Overrides the neutral resources locale declared by the store.
    #[must_use]
    pub fn with_neutral_locale(mut self, locale: Locale) -> Self {
        self.neutral = Some(locale);
        self
    }

    /// Builds the manager.
    #[must_use]
    pub fn build(self) -> ComponentResourceManager {
        let mut resolver = ResourceResolver::new(self.store);
        if let Some(neutral) = self.neutral {
            resolver = resolver.with_neutral_locale(Some(neutral));
        }

        ComponentResourceManager {
            owner: self.owner,
            resolver,
            caches: self.caches.unwrap_or_else(ResourceCaches::global),
            locale: self.locale.unwrap_or_else(|| Arc::new(ThreadUiLocale)),
        }
    }
}
