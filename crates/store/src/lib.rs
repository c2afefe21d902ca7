//! Runtime-extensible state store for the admin shell.
//!
//! Features are loaded on demand, so the store exists (and accepts dispatches)
//! before the full set of slices is known. Slices, named selectors and
//! middleware are attached and detached at runtime through the [`Store`]
//! handle; the handle's identity never changes.
//!
//! - [`Store::register_slice`] is idempotent for an identical reducer and
//!   reports [`StoreError::Conflict`] for a different one.
//! - Selectors against unregistered slices yield `None`.
//! - Middleware changes take effect from the next dispatched action.

mod action;
mod error;
mod feature;
mod middleware;
mod selector;
mod slice;
mod store;

pub use action::Action;
pub use error::StoreError;
pub use feature::{Feature, MountContext, MountGuard};
pub use middleware::{Context, Middleware, MiddlewareEntry, MiddlewareId, Next, Priority};
pub use selector::BoundSelector;
pub use slice::{Reducer, SliceDescriptor, SliceHandle};
pub use store::{Store, SubscriptionId};
