//! The store handle and its registries.

use std::{
    any::{TypeId, type_name},
    collections::BTreeMap,
    fmt,
    sync::{
        Arc,
        atomic::{AtomicU64, Ordering},
    },
};

use parking_lot::{Mutex, RwLock};
use tracing::{debug, trace, warn};

use crate::{
    Action, BoundSelector, Feature, MiddlewareEntry, MiddlewareId, MountContext, MountGuard,
    Reducer, SliceDescriptor, SliceHandle, StoreError,
    middleware::{Chain, run_chain},
    selector::SelectorRegistry,
    slice::SliceEntry,
};

/// Identifier returned by [`Store::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

/// A state-change observer.
type Subscriber = Arc<dyn Fn(&Store) + Send + Sync>;

/// Shared store internals.
#[derive(Default)]
struct Inner {
    /// Slice registry, keyed by slice name.
    slices: RwLock<BTreeMap<String, SliceEntry>>,
    /// Selector registry.
    selectors: RwLock<SelectorRegistry>,
    /// Middleware registry.
    chain: Mutex<Chain>,
    /// Change observers.
    subscribers: Mutex<Vec<(SubscriptionId, Subscriber)>>,
    /// Subscription id source.
    next_subscription: AtomicU64,
}

/// Handle to the application store.
///
/// Create one at startup and hand out clones; every clone refers to the same
/// registries, so observers holding an older clone keep seeing new slices and
/// middleware. Locks are never held while middleware or subscribers run, so
/// both may dispatch. Selectors run under the slice read lock and must not
/// call back into the store.
#[derive(Clone, Default)]
pub struct Store {
    /// Shared internals.
    inner: Arc<Inner>,
}

impl fmt::Debug for Store {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Store")
            .field("slices", &self.slice_names())
            .field("middleware", &self.middleware_ids())
            .finish()
    }
}

impl Store {
    /// Create an empty store. It is dispatchable immediately.
    pub fn new() -> Self {
        Self::default()
    }

    /// True when both handles refer to the same store.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }

    // ===== SLICES =====

    /// Register a slice if its name is free.
    ///
    /// Re-registering with the same reducer is a no-op that keeps the current
    /// state. A different reducer (or state type) under a taken name is
    /// rejected with [`StoreError::Conflict`] and the original stays active.
    pub fn register_slice<S, R>(
        &self,
        desc: SliceDescriptor<S, R>,
    ) -> Result<SliceHandle<S>, StoreError>
    where
        S: Send + Sync + 'static,
        R: Reducer<S>,
    {
        let mut slices = self.inner.slices.write();
        if let Some(existing) = slices.get(desc.name()) {
            if existing.matches::<S, R>(&desc.reducer) {
                trace!(slice = desc.name(), "slice already registered");
                return Ok(SliceHandle::new(desc.name()));
            }
            let err = StoreError::Conflict {
                name: desc.name().to_string(),
                existing: existing.reducer_name,
                attempted: type_name::<R>(),
            };
            warn!(slice = desc.name(), "{}", err);
            return Err(err);
        }
        let (name, entry) = SliceEntry::from_descriptor(desc);
        debug!(slice = %name, reducer = entry.reducer_name, "slice registered");
        let handle = SliceHandle::new(name.as_str());
        slices.insert(name, entry);
        Ok(handle)
    }

    /// True when a slice named `name` is registered.
    pub fn has_slice(&self, name: &str) -> bool {
        self.inner.slices.read().contains_key(name)
    }

    /// Registered slice names, sorted.
    pub fn slice_names(&self) -> Vec<String> {
        self.inner.slices.read().keys().cloned().collect()
    }

    /// Clone of the state of slice `name`, if registered with state type `S`.
    pub fn state_of<S: Clone + 'static>(&self, name: &str) -> Option<S> {
        self.select_slice(name, S::clone)
    }

    /// Apply `f` to the state of slice `name`.
    ///
    /// `None` when the slice is not registered yet or holds a different type.
    pub fn select_slice<S: 'static, T>(&self, name: &str, f: impl FnOnce(&S) -> T) -> Option<T> {
        let slices = self.inner.slices.read();
        slices.get(name)?.state::<S>().map(f)
    }

    /// Bind `f` to slice `name`, returning a reusable reader.
    ///
    /// The slice does not need to exist yet; reads yield `None` until it does.
    pub fn select_from_slice<S, T, F>(&self, name: &str, f: F) -> BoundSelector<S, T>
    where
        S: 'static,
        F: Fn(&S) -> T + Send + Sync + 'static,
    {
        BoundSelector::new(self.clone(), name, Arc::new(f))
    }

    // ===== SELECTORS =====

    /// Bind a named selector for `slice`. Last write wins.
    pub fn register_selector<S, T, F>(&self, slice: &str, name: &str, f: F)
    where
        S: 'static,
        T: 'static,
        F: Fn(&S) -> T + Send + Sync + 'static,
    {
        let replaced = self.inner.selectors.write().bind(slice, name, f);
        debug!(slice, selector = name, replaced, "selector bound");
    }

    /// Evaluate a named selector.
    ///
    /// `None` when the slice or selector is unknown, or when `T` is not the
    /// selector's output type.
    pub fn select_named<T: 'static>(&self, slice: &str, name: &str) -> Option<T> {
        let entry = self.inner.selectors.read().get(slice, name)?;
        if entry.output != TypeId::of::<T>() {
            debug!(slice, selector = name, "selector output type mismatch");
            return None;
        }
        let out = {
            let slices = self.inner.slices.read();
            entry.func.select(slices.get(slice)?.state.as_ref())?
        };
        out.downcast::<T>().ok().map(|b| *b)
    }

    /// Names of selectors bound for `slice`, sorted.
    pub fn selector_names(&self, slice: &str) -> Vec<String> {
        self.inner.selectors.read().names(slice)
    }

    // ===== MIDDLEWARE =====

    /// Install a middleware entry. An existing id is replaced in place and
    /// gains another registration; see [`Store::unregister_middleware`].
    ///
    /// Returns true when the id was not installed before.
    pub fn register_middleware(&self, entry: MiddlewareEntry) -> bool {
        let id = entry.id().clone();
        let added = self.inner.chain.lock().insert(entry);
        debug!(middleware = %id, added, "middleware registered");
        added
    }

    /// Release one registration of a middleware entry. The entry stays
    /// installed while other registrations of the same id are outstanding.
    ///
    /// Returns true when the entry left the chain.
    pub(crate) fn release_middleware(&self, id: &MiddlewareId) -> bool {
        let removed = self.inner.chain.lock().release(id);
        if removed {
            debug!(middleware = %id, "middleware removed");
        } else {
            trace!(middleware = %id, "middleware hold released");
        }
        removed
    }

    /// Remove a middleware entry outright, whatever registered it. Unknown
    /// ids are ignored.
    ///
    /// Returns true when an entry was removed.
    pub fn unregister_middleware(&self, id: &MiddlewareId) -> bool {
        let removed = self.inner.chain.lock().remove(id);
        if removed {
            debug!(middleware = %id, "middleware removed");
        } else {
            trace!(middleware = %id, "remove of unknown middleware ignored");
        }
        removed
    }

    /// Installed middleware ids in execution order.
    pub fn middleware_ids(&self) -> Vec<MiddlewareId> {
        self.inner.chain.lock().ids()
    }

    // ===== DISPATCH =====

    /// Dispatch `action` through the current middleware chain to the reducers.
    pub fn dispatch(&self, action: Action) {
        let links = self.inner.chain.lock().snapshot();
        trace!(action = %action.kind, middleware = links.len(), "dispatch");
        run_chain(self, &links, action);
    }

    /// Run every reducer against `action`, then notify subscribers.
    pub(crate) fn apply(&self, action: &Action) {
        {
            let mut slices = self.inner.slices.write();
            for entry in slices.values_mut() {
                entry.reduce(action);
            }
        }
        let subscribers: Vec<Subscriber> = self
            .inner
            .subscribers
            .lock()
            .iter()
            .map(|(_, s)| s.clone())
            .collect();
        for s in subscribers {
            s(self);
        }
    }

    /// Observe every action that reaches the reducers.
    pub fn subscribe(&self, f: impl Fn(&Self) + Send + Sync + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.inner.next_subscription.fetch_add(1, Ordering::Relaxed));
        self.inner.subscribers.lock().push((id, Arc::new(f)));
        id
    }

    /// Remove an observer. Unknown ids are ignored.
    pub fn unsubscribe(&self, id: SubscriptionId) {
        self.inner.subscribers.lock().retain(|(sid, _)| *sid != id);
    }

    // ===== FEATURES =====

    /// Mount `feature`: run its registrations and return a guard that removes
    /// its middleware on unmount. Slices survive unmount.
    ///
    /// If the feature fails to mount, middleware it registered so far is
    /// removed before the error is returned.
    pub fn mount(&self, feature: &dyn Feature) -> Result<MountGuard, StoreError> {
        let mut ctx = MountContext::new(self, feature.name());
        match feature.mount(&mut ctx) {
            Ok(()) => {
                debug!(feature = feature.name(), "feature mounted");
                Ok(ctx.into_guard())
            }
            Err(err) => {
                warn!(feature = feature.name(), "feature mount failed: {}", err);
                ctx.into_guard().unmount();
                Err(err)
            }
        }
    }
}
