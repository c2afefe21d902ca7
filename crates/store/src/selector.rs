//! Selector registry and bound selectors.

use std::{
    any::{Any, TypeId},
    collections::HashMap,
    fmt,
    marker::PhantomData,
    sync::Arc,
};

use crate::Store;

/// Object-safe view of a typed selector function.
pub(crate) trait ErasedSelector: Send + Sync {
    /// Evaluate against a slice state; `None` when the state type does not match.
    fn select(&self, state: &(dyn Any + Send + Sync)) -> Option<Box<dyn Any>>;
}

/// Adapter binding a selector function to its input type.
struct TypedSelector<S, T, F> {
    /// The selector function.
    f: F,
    /// Marker for input and output types.
    _types: PhantomData<fn(&S) -> T>,
}

impl<S, T, F> ErasedSelector for TypedSelector<S, T, F>
where
    S: 'static,
    T: 'static,
    F: Fn(&S) -> T + Send + Sync,
{
    fn select(&self, state: &(dyn Any + Send + Sync)) -> Option<Box<dyn Any>> {
        let s = state.downcast_ref::<S>()?;
        Some(Box::new((self.f)(s)))
    }
}

/// A registered named selector.
#[derive(Clone)]
pub(crate) struct SelectorEntry {
    /// Output type identity, checked before downcasting.
    pub(crate) output: TypeId,
    /// Type-erased selector.
    pub(crate) func: Arc<dyn ErasedSelector>,
}

/// Named selectors keyed by slice, then by selector name.
///
/// Bindings may precede the slice they read. Rebinding a name replaces the
/// previous function.
#[derive(Default)]
pub(crate) struct SelectorRegistry {
    /// Selector table.
    by_slice: HashMap<String, HashMap<String, SelectorEntry>>,
}

impl SelectorRegistry {
    /// Bind `name` for `slice`; returns true if a previous binding was replaced.
    pub(crate) fn bind<S, T, F>(&mut self, slice: &str, name: &str, f: F) -> bool
    where
        S: 'static,
        T: 'static,
        F: Fn(&S) -> T + Send + Sync + 'static,
    {
        let entry = SelectorEntry {
            output: TypeId::of::<T>(),
            func: Arc::new(TypedSelector {
                f,
                _types: PhantomData,
            }),
        };
        self.by_slice
            .entry(slice.to_string())
            .or_default()
            .insert(name.to_string(), entry)
            .is_some()
    }

    /// Look up a binding.
    pub(crate) fn get(&self, slice: &str, name: &str) -> Option<SelectorEntry> {
        self.by_slice.get(slice)?.get(name).cloned()
    }

    /// Selector names bound for `slice`, sorted.
    pub(crate) fn names(&self, slice: &str) -> Vec<String> {
        let mut names: Vec<String> = self
            .by_slice
            .get(slice)
            .map(|m| m.keys().cloned().collect())
            .unwrap_or_default();
        names.sort();
        names
    }
}

/// A selector bound to a store and a slice name.
///
/// Reading before the slice is registered yields `None`, which callers treat
/// as "data not ready".
pub struct BoundSelector<S, T> {
    /// Store the selector reads from.
    store: Store,
    /// Slice key.
    slice: Arc<str>,
    /// Selector function.
    f: Arc<dyn Fn(&S) -> T + Send + Sync>,
}

impl<S, T> Clone for BoundSelector<S, T> {
    fn clone(&self) -> Self {
        Self {
            store: self.store.clone(),
            slice: self.slice.clone(),
            f: self.f.clone(),
        }
    }
}

impl<S, T> fmt::Debug for BoundSelector<S, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BoundSelector")
            .field("slice", &self.slice)
            .finish_non_exhaustive()
    }
}

impl<S: 'static, T> BoundSelector<S, T> {
    /// Bind `f` to `slice` in `store`.
    pub(crate) fn new(store: Store, slice: &str, f: Arc<dyn Fn(&S) -> T + Send + Sync>) -> Self {
        Self {
            store,
            slice: Arc::from(slice),
            f,
        }
    }

    /// Evaluate against the slice's current state.
    pub fn get(&self) -> Option<T> {
        self.store.select_slice(&self.slice, |s: &S| (self.f)(s))
    }

    /// Slice this selector reads.
    pub fn slice(&self) -> &str {
        &self.slice
    }
}
