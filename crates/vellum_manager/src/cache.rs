//! Process-lifetime caches.
//!
//! [`ResourceCaches`] groups the compiled plan cache, the resource object
//! cache and the deep-clone registry. A process-wide instance is available
//! through [`ResourceCaches::global`]; tests and embedders can create
//! isolated instances with [`ResourceCaches::new`].
//!
//! All caches are append-only. An entry, once stored, is never replaced,
//! mutated or evicted. Concurrent first use of a key may compute the entry
//! more than once, but only the first stored entry is ever returned.

use crate::compiler::CompiledAssignment;
use crate::deep_clone::DeepCloneRegistry;
use hashbrown::HashMap;
use parking_lot::RwLock;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, LazyLock};
use vellum_resources::{OwnerId, ResourceValue, ValueType};

static GLOBAL: LazyLock<Arc<ResourceCaches>> = LazyLock::new(|| Arc::new(ResourceCaches::new()));

// ─────────────────────────────────────────────────────────────────────────────
// Plans
// ─────────────────────────────────────────────────────────────────────────────

/// Partition of the plan cache: one owner's resources applied to one target
/// type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PlanScope {
    owner: OwnerId,
    target: ValueType,
}

impl PlanScope {
    /// Creates a scope.
    #[must_use]
    pub fn new(owner: OwnerId, target: ValueType) -> Self {
        Self { owner, target }
    }

    /// Returns the owner whose resources are applied.
    #[must_use]
    pub fn owner(&self) -> OwnerId {
        self.owner
    }

    /// Returns the runtime type of the targets.
    #[must_use]
    pub fn target(&self) -> ValueType {
        self.target
    }
}

/// Cache of compiled assignments keyed by scope and object name.
#[derive(Debug, Default)]
pub struct AssignmentCache {
    plans: RwLock<HashMap<PlanScope, HashMap<String, Arc<CompiledAssignment>>>>,
    hits: AtomicU64,
    misses: AtomicU64,
}

impl AssignmentCache {
    /// Creates an empty cache.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the plan stored for `object_name` in `scope`.
    #[must_use]
    pub fn get(&self, scope: &PlanScope, object_name: &str) -> Option<Arc<CompiledAssignment>> {
        self.plans
            .read()
            .get(scope)
            .and_then(|plans| plans.get(object_name))
            .cloned()
    }

    /// Returns the stored plan, compiling and storing one on a miss.
    ///
    /// `compile` runs without holding the cache lock. If another thread
    /// stores a plan for the same key first, that plan is returned and the
    /// one just compiled is dropped.
    ///
    /// # Errors
    ///
    /// Returns the error of `compile`; nothing is stored in that case.
    pub fn get_or_try_compile<E>(
        &self,
        scope: PlanScope,
        object_name: &str,
        compile: impl FnOnce() -> Result<CompiledAssignment, E>,
    ) -> Result<Arc<CompiledAssignment>, E> {
        if let Some(plan) = self.get(&scope, object_name) {
            self.hits.fetch_add(1, Ordering::Relaxed);
            tracing::trace!(
                owner = scope.owner.type_name(),
                target = %scope.target,
                object = object_name,
                "assignment cache hit"
            );
            return Ok(plan);
        }

        self.misses.fetch_add(1, Ordering::Relaxed);
        let compiled = Arc::new(compile()?);

        let mut plans = self.plans.write();
        let stored = plans
            .entry(scope)
            .or_default()
            .entry_ref(object_name)
            .or_insert(compiled);
        Ok(Arc::clone(stored))
    }

    /// Returns the number of stored plans.
    #[must_use]
    pub fn len(&self) -> usize {
        self.plans.read().values().map(HashMap::len).sum()
    }

    /// Returns `true` if no plan is stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the number of lookups answered from the cache.
    #[must_use]
    pub fn hits(&self) -> u64 {
        self.hits.load(Ordering::Relaxed)
    }

    /// Returns the number of lookups that required a compilation.
    #[must_use]
    pub fn misses(&self) -> u64 {
        self.misses.load(Ordering::Relaxed)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Objects
// ─────────────────────────────────────────────────────────────────────────────

/// Cache of retrieved resource objects keyed by owner and resource name.
///
/// Absent resources are cached as the null value.
#[derive(Debug, Default)]
pub struct ObjectCache {
    objects: RwLock<HashMap<OwnerId, HashMap<String, ResourceValue>>>,
}

impl ObjectCache {
    /// Creates an empty cache.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the cached value of `name`, if it was retrieved before.
    #[must_use]
    pub fn get(&self, owner: OwnerId, name: &str) -> Option<ResourceValue> {
        self.objects
            .read()
            .get(&owner)
            .and_then(|objects| objects.get(name))
            .cloned()
    }

    /// Returns the cached value, retrieving and storing it on a miss.
    ///
    /// # Errors
    ///
    /// Returns the error of `retrieve`; nothing is stored in that case.
    pub fn get_or_try_insert_with<E>(
        &self,
        owner: OwnerId,
        name: &str,
        retrieve: impl FnOnce() -> Result<ResourceValue, E>,
    ) -> Result<ResourceValue, E> {
        if let Some(value) = self.get(owner, name) {
            return Ok(value);
        }

        let value = retrieve()?;
        tracing::debug!(
            owner = owner.type_name(),
            name,
            found = !value.is_null(),
            "cached resource object"
        );

        let mut objects = self.objects.write();
        let stored = objects
            .entry(owner)
            .or_default()
            .entry_ref(name)
            .or_insert(value);
        Ok(stored.clone())
    }

    /// Returns the number of cached objects.
    #[must_use]
    pub fn len(&self) -> usize {
        self.objects.read().values().map(HashMap::len).sum()
    }

    /// Returns `true` if nothing is cached.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Scope
// ─────────────────────────────────────────────────────────────────────────────

/// Snapshot of cache counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheStats {
    /// Applications served by an already compiled plan.
    pub plan_hits: u64,
    /// Applications that compiled a plan.
    pub plan_misses: u64,
    /// Plans currently stored.
    pub compiled_plans: usize,
    /// Resource objects currently stored, including absent ones.
    pub cached_objects: usize,
}

/// The caches shared by resource managers.
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use vellum_manager::ResourceCaches;
///
/// let isolated = Arc::new(ResourceCaches::new());
/// assert_eq!(isolated.stats().compiled_plans, 0);
///
/// assert!(Arc::ptr_eq(&ResourceCaches::global(), &ResourceCaches::global()));
/// ```
#[derive(Debug, Default)]
pub struct ResourceCaches {
    plans: AssignmentCache,
    objects: ObjectCache,
    deep_clone: DeepCloneRegistry,
}

impl ResourceCaches {
    /// Creates an empty, isolated set of caches.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the process-wide caches.
    #[must_use]
    pub fn global() -> Arc<Self> {
        Arc::clone(&GLOBAL)
    }

    /// Returns the compiled plan cache.
    #[must_use]
    pub fn plans(&self) -> &AssignmentCache {
        &self.plans
    }

    /// Returns the resource object cache.
    #[must_use]
    pub fn objects(&self) -> &ObjectCache {
        &self.objects
    }

    /// Returns the deep-clone registry.
    #[must_use]
    pub fn deep_clone(&self) -> &DeepCloneRegistry {
        &self.deep_clone
    }

    /// Returns current counters.
    #[must_use]
    pub fn stats(&self) -> CacheStats {
        CacheStats {
            plan_hits: self.plans.hits(),
            plan_misses: self.plans.misses(),
            compiled_plans: self.plans.len(),
            cached_objects: self.objects.len(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::convert::Infallible;
    use std::sync::Barrier;
    use std::sync::atomic::AtomicUsize;
    use vellum_attributes::{AttributeSet, Attributes};
    use vellum_resources::{EffectiveResourceMap, Locale};

    struct Owner;
    struct Target;

    impl Attributes for Target {
        fn attribute_set(&self) -> AttributeSet {
            AttributeSet::default()
        }
    }

    fn scope() -> PlanScope {
        PlanScope::new(OwnerId::of::<Owner>(), ValueType::of::<Target>())
    }

    fn empty_plan(name: &str) -> CompiledAssignment {
        CompiledAssignment::compile(
            &Target,
            name,
            &EffectiveResourceMap::new(),
            Locale::invariant(),
            &DeepCloneRegistry::new(),
        )
    }

    #[test]
    fn compiles_once_per_key() {
        let cache = AssignmentCache::new();
        let compiled = AtomicUsize::new(0);
        let compile = || {
            compiled.fetch_add(1, Ordering::SeqCst);
            Ok::<_, Infallible>(empty_plan("a"))
        };

        let first = cache.get_or_try_compile(scope(), "a", compile).unwrap();
        let second = cache.get_or_try_compile(scope(), "a", compile).unwrap();

        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(compiled.load(Ordering::SeqCst), 1);
        assert_eq!((cache.hits(), cache.misses()), (1, 1));
    }

    #[test]
    fn failed_compile_is_not_stored() {
        let cache = AssignmentCache::new();
        let result = cache.get_or_try_compile(scope(), "a", || Err("store offline"));
        assert_eq!(result.unwrap_err(), "store offline");
        assert!(cache.is_empty());
    }

    #[test]
    fn object_names_are_case_sensitive_keys() {
        let cache = AssignmentCache::new();
        cache
            .get_or_try_compile(scope(), "a", || Ok::<_, Infallible>(empty_plan("a")))
            .unwrap();
        assert!(cache.get(&scope(), "A").is_none());
        assert!(cache.get(&scope(), "a").is_some());
    }

    #[test]
    fn concurrent_first_use_converges_on_one_plan() {
        const THREADS: usize = 8;
        let cache = AssignmentCache::new();
        let barrier = Barrier::new(THREADS);

        let plans: Vec<_> = std::thread::scope(|s| {
            let handles: Vec<_> = (0..THREADS)
                .map(|_| {
                    s.spawn(|| {
                        barrier.wait();
                        cache
                            .get_or_try_compile(scope(), "shared", || {
                                Ok::<_, Infallible>(empty_plan("shared"))
                            })
                            .unwrap()
                    })
                })
                .collect();
            handles.into_iter().map(|h| h.join().unwrap()).collect()
        });

        assert_eq!(cache.len(), 1);
        let stored = cache.get(&scope(), "shared").unwrap();
        assert!(plans.iter().all(|plan| Arc::ptr_eq(plan, &stored)));
        assert_eq!(cache.hits() + cache.misses(), THREADS as u64);
    }

    #[test]
    fn object_cache_stores_absent_values() {
        let cache = ObjectCache::new();
        let owner = OwnerId::of::<Owner>();
        let retrieved = AtomicUsize::new(0);
        let retrieve = || {
            retrieved.fetch_add(1, Ordering::SeqCst);
            Ok::<_, Infallible>(ResourceValue::null())
        };

        assert!(cache.get_or_try_insert_with(owner, "missing", retrieve).unwrap().is_null());
        assert!(cache.get_or_try_insert_with(owner, "missing", retrieve).unwrap().is_null());
        assert_eq!(retrieved.load(Ordering::SeqCst), 1);
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn stats_reflect_all_caches() {
        let caches = ResourceCaches::new();
        caches
            .plans()
            .get_or_try_compile(scope(), "a", || Ok::<_, Infallible>(empty_plan("a")))
            .unwrap();
        caches
            .objects()
            .get_or_try_insert_with(OwnerId::of::<Owner>(), "x", || {
                Ok::<_, Infallible>(ResourceValue::new(1_i32))
            })
            .unwrap();

        assert_eq!(
            caches.stats(),
            CacheStats {
                plan_hits: 0,
                plan_misses: 1,
                compiled_plans: 1,
                cached_objects: 1,
            }
        );
    }
}
