//! Feature mount lifecycle.
//!
//! Mount triggers registration, unmount removes the feature's middleware.
//! Slices (and their state) are kept across unmount so a feature that comes
//! back later picks up where it left off.

use std::mem;

use tracing::debug;

use crate::{MiddlewareEntry, MiddlewareId, Reducer, SliceDescriptor, SliceHandle, Store, StoreError};

/// A UI feature that contributes slices, selectors and middleware.
pub trait Feature: Send + Sync {
    /// Stable feature name, used in logs.
    fn name(&self) -> &str;

    /// Register everything the feature needs. Called once per mount; must be
    /// safe to call again on remount.
    fn mount(&self, ctx: &mut MountContext<'_>) -> Result<(), StoreError>;
}

/// Registration surface handed to [`Feature::mount`].
///
/// Middleware registered here is tracked and removed when the returned
/// [`MountGuard`] is unmounted.
pub struct MountContext<'a> {
    /// Target store.
    store: &'a Store,
    /// Feature being mounted.
    feature: String,
    /// Middleware ids registered during this mount, one per registration.
    middleware: Vec<MiddlewareId>,
}

impl<'a> MountContext<'a> {
    /// Start a mount of `feature` on `store`.
    pub(crate) fn new(store: &'a Store, feature: &str) -> Self {
        Self {
            store,
            feature: feature.to_string(),
            middleware: Vec::new(),
        }
    }

    /// The target store.
    pub fn store(&self) -> &'a Store {
        self.store
    }

    /// Register a slice; see [`Store::register_slice`].
    pub fn register_slice<S, R>(
        &mut self,
        desc: SliceDescriptor<S, R>,
    ) -> Result<SliceHandle<S>, StoreError>
    where
        S: Send + Sync + 'static,
        R: Reducer<S>,
    {
        self.store.register_slice(desc)
    }

    /// Bind a named selector; see [`Store::register_selector`].
    pub fn register_selector<S, T, F>(&mut self, slice: &str, name: &str, f: F)
    where
        S: 'static,
        T: 'static,
        F: Fn(&S) -> T + Send + Sync + 'static,
    {
        self.store.register_selector(slice, name, f);
    }

    /// Install middleware owned by this mount.
    ///
    /// Each registration is released separately on unmount, so an id shared
    /// with another live mount stays installed until that mount goes too.
    pub fn register_middleware(&mut self, entry: MiddlewareEntry) {
        let id = entry.id().clone();
        self.store.register_middleware(entry);
        self.middleware.push(id);
    }

    /// Finish the mount.
    pub(crate) fn into_guard(self) -> MountGuard {
        MountGuard {
            store: self.store.clone(),
            feature: self.feature,
            middleware: self.middleware,
        }
    }
}

/// Keeps a feature mounted; unmounting (or dropping) removes its middleware.
#[must_use = "dropping the guard unmounts the feature"]
#[derive(Debug)]
pub struct MountGuard {
    /// Store the feature is mounted on.
    store: Store,
    /// Feature name.
    feature: String,
    /// Middleware to remove on unmount.
    middleware: Vec<MiddlewareId>,
}

impl MountGuard {
    /// Name of the mounted feature.
    pub fn feature(&self) -> &str {
        &self.feature
    }

    /// Middleware registrations held by this mount.
    pub fn middleware(&self) -> &[MiddlewareId] {
        &self.middleware
    }

    /// Unmount now.
    pub fn unmount(mut self) {
        self.release();
    }

    /// Release this mount's middleware registrations. Idempotent.
    fn release(&mut self) {
        for id in mem::take(&mut self.middleware) {
            self.store.release_middleware(&id);
        }
        debug!(feature = %self.feature, "feature unmounted");
    }
}

impl Drop for MountGuard {
    fn drop(&mut self) {
        if !self.middleware.is_empty() {
            self.release();
        }
    }
}
