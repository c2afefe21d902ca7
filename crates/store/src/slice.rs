//! Slice descriptors, reducer identity and typed slice handles.

use std::{
    any::{Any, TypeId, type_name},
    fmt,
    marker::PhantomData,
    mem,
    sync::Arc,
};

use crate::{Action, Store};

/// A state-transition function for a slice of type `S`.
///
/// Implemented for any `Fn(&mut S, &Action)`. Registering the same reducer
/// twice is a no-op, registering a different one under the same name is a
/// conflict. What counts as "the same" depends on the reducer's shape:
///
/// - function items and closures: the concrete type;
/// - `fn` pointers: the function address;
/// - `&'static dyn Fn` references: the referent's address;
/// - `Box<dyn Fn>`: never the same as anything already registered, since a
///   fresh box cannot be told apart from a different function.
pub trait Reducer<S>: Send + Sync + 'static {
    /// Apply `action` to `state` in place.
    fn reduce(&self, state: &mut S, action: &Action);
}

impl<S, F> Reducer<S> for F
where
    F: Fn(&mut S, &Action) + Send + Sync + 'static,
{
    fn reduce(&self, state: &mut S, action: &Action) {
        self(state, action);
    }
}

/// Everything needed to register a slice: its name, initial state and reducer.
pub struct SliceDescriptor<S, R> {
    /// Unique slice key.
    pub(crate) name: String,
    /// State installed on first registration.
    pub(crate) initial: S,
    /// Reducer bound to the name on first registration.
    pub(crate) reducer: R,
}

impl<S, R> SliceDescriptor<S, R>
where
    S: Send + Sync + 'static,
    R: Reducer<S>,
{
    /// Describe a slice named `name`.
    pub fn new(name: impl Into<String>, initial: S, reducer: R) -> Self {
        Self {
            name: name.into(),
            initial,
            reducer,
        }
    }

    /// Slice key.
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl<S, R> fmt::Debug for SliceDescriptor<S, R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SliceDescriptor")
            .field("name", &self.name)
            .field("state", &type_name::<S>())
            .field("reducer", &type_name::<R>())
            .finish()
    }
}

/// A reducer erased to a function pointer.
type FnReducer<S> = fn(&mut S, &Action);
/// A boxed reducer trait object.
type BoxedReducer<S> = Box<dyn Fn(&mut S, &Action) + Send + Sync>;
/// A borrowed reducer trait object.
type RefReducer<S> = &'static (dyn Fn(&mut S, &Action) + Send + Sync);

/// Identity of a registered reducer value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ReducerKey {
    /// Function items and closures: the type alone identifies the code.
    Type(TypeId),
    /// Function pointers, by address.
    FnPtr(usize),
    /// Borrowed trait objects, by referent address.
    Ref(usize),
    /// Boxed or zero-sized trait objects; equal to nothing.
    Opaque,
}

impl ReducerKey {
    /// Identity of `reducer`.
    pub(crate) fn of<S: 'static, R: Reducer<S>>(reducer: &R) -> Self {
        let any: &dyn Any = reducer;
        if let Some(f) = any.downcast_ref::<FnReducer<S>>() {
            return Self::FnPtr(*f as usize);
        }
        if any.is::<BoxedReducer<S>>() {
            return Self::Opaque;
        }
        if let Some(r) = any.downcast_ref::<RefReducer<S>>() {
            if mem::size_of_val(*r) == 0 {
                return Self::Opaque;
            }
            let ptr: *const (dyn Fn(&mut S, &Action) + Send + Sync) = *r;
            return Self::Ref(ptr.cast::<()>() as usize);
        }
        Self::Type(TypeId::of::<R>())
    }

    /// True when both keys name the same reducer.
    fn same(self, other: Self) -> bool {
        self != Self::Opaque && self == other
    }
}

/// Object-safe view of a typed reducer.
pub(crate) trait ErasedReducer: Send + Sync {
    /// Downcast `state` and apply the reducer; mismatched state is left untouched.
    fn reduce(&self, state: &mut (dyn Any + Send + Sync), action: &Action);
}

/// Adapter binding a reducer to its state type.
struct Typed<S, R> {
    /// The wrapped reducer.
    reducer: R,
    /// Marker for the state type.
    _state: PhantomData<fn(&mut S)>,
}

impl<S, R> ErasedReducer for Typed<S, R>
where
    S: 'static,
    R: Reducer<S>,
{
    fn reduce(&self, state: &mut (dyn Any + Send + Sync), action: &Action) {
        if let Some(s) = state.downcast_mut::<S>() {
            self.reducer.reduce(s, action);
        }
    }
}

/// A registered slice as held by the store.
pub(crate) struct SliceEntry {
    /// Identity of the reducer bound at first registration.
    pub(crate) reducer_key: ReducerKey,
    /// Identity of the state type.
    pub(crate) state_id: TypeId,
    /// Reducer type name, for conflict reports.
    pub(crate) reducer_name: &'static str,
    /// Type-erased reducer.
    pub(crate) reducer: Box<dyn ErasedReducer>,
    /// Current state.
    pub(crate) state: Box<dyn Any + Send + Sync>,
}

impl SliceEntry {
    /// Build an entry from a descriptor, returning the slice name alongside.
    pub(crate) fn from_descriptor<S, R>(desc: SliceDescriptor<S, R>) -> (String, Self)
    where
        S: Send + Sync + 'static,
        R: Reducer<S>,
    {
        let entry = Self {
            reducer_key: ReducerKey::of::<S, R>(&desc.reducer),
            state_id: TypeId::of::<S>(),
            reducer_name: type_name::<R>(),
            reducer: Box::new(Typed {
                reducer: desc.reducer,
                _state: PhantomData,
            }),
            state: Box::new(desc.initial),
        };
        (desc.name, entry)
    }

    /// True when `reducer` over `S` is the reducer this entry was registered with.
    pub(crate) fn matches<S: 'static, R: Reducer<S>>(&self, reducer: &R) -> bool {
        self.state_id == TypeId::of::<S>()
            && self.reducer_key.same(ReducerKey::of::<S, R>(reducer))
    }

    /// Run the reducer against the stored state.
    pub(crate) fn reduce(&mut self, action: &Action) {
        self.reducer.reduce(self.state.as_mut(), action);
    }

    /// Borrow the state as `S` if the types line up.
    pub(crate) fn state<S: 'static>(&self) -> Option<&S> {
        self.state.downcast_ref::<S>()
    }
}

/// Typed accessor for one slice, returned from registration.
///
/// Handles are plain keys: they stay valid across remounts and read through
/// whichever store they are given.
pub struct SliceHandle<S> {
    /// Slice key.
    name: Arc<str>,
    /// Marker for the state type.
    _state: PhantomData<fn() -> S>,
}

impl<S> Clone for SliceHandle<S> {
    fn clone(&self) -> Self {
        Self {
            name: self.name.clone(),
            _state: PhantomData,
        }
    }
}

impl<S> fmt::Debug for SliceHandle<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("SliceHandle").field(&self.name).finish()
    }
}

impl<S: Send + Sync + 'static> SliceHandle<S> {
    /// Create a handle for a slice that may not be registered yet.
    pub fn new(name: impl Into<Arc<str>>) -> Self {
        Self {
            name: name.into(),
            _state: PhantomData,
        }
    }

    /// Slice key.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Clone of the current state, or `None` while the slice is not registered.
    pub fn state(&self, store: &Store) -> Option<S>
    where
        S: Clone,
    {
        store.select_slice(&self.name, S::clone)
    }

    /// Apply `f` to the current state.
    pub fn select<T>(&self, store: &Store, f: impl FnOnce(&S) -> T) -> Option<T> {
        store.select_slice(&self.name, f)
    }

    /// Bind a named selector for this slice in the store's selector registry.
    pub fn selector<T, F>(&self, store: &Store, name: &str, f: F)
    where
        T: 'static,
        F: Fn(&S) -> T + Send + Sync + 'static,
    {
        store.register_selector(&self.name, name, f);
    }
}
