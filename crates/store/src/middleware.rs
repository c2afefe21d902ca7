//! Middleware chain.
//!
//! The chain is copy-on-write: a dispatch snapshots the current `Arc` and runs
//! to completion against it, so registrations made while an action is in
//! flight apply from the next dispatch on.

use std::{fmt, sync::Arc};

use crate::{Action, Store};

/// Execution tier. Entries run tier by tier (`High` first), in insertion
/// order within a tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub enum Priority {
    /// Runs before everything else (e.g. logging, auth guards).
    High,
    /// Default tier for feature side-effect handlers.
    #[default]
    Normal,
    /// Runs last, immediately before the reducers.
    Low,
}

/// Identifier of a middleware entry.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MiddlewareId(String);

impl MiddlewareId {
    /// Wrap a string identifier.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Borrow the identifier.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for MiddlewareId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for MiddlewareId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for MiddlewareId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// Per-dispatch context handed to middleware.
pub struct Context<'a> {
    /// The store the action was dispatched on.
    store: &'a Store,
}

impl<'a> Context<'a> {
    /// Borrow the store, e.g. to read state or dispatch follow-up actions.
    pub fn store(&self) -> &'a Store {
        self.store
    }
}

/// Continuation for the rest of the chain.
///
/// Consumed by [`Next::run`], so a middleware can forward an action at most
/// once. Dropping it without running swallows the action.
pub struct Next<'a> {
    /// Entries still to run.
    rest: &'a [Link],
    /// Shared dispatch context.
    ctx: &'a Context<'a>,
}

impl Next<'_> {
    /// Forward `action` to the next middleware, or to the reducers at the end.
    pub fn run(self, action: Action) {
        match self.rest.split_first() {
            Some((head, tail)) => head.handler.handle(
                self.ctx,
                action,
                Next {
                    rest: tail,
                    ctx: self.ctx,
                },
            ),
            None => self.ctx.store.apply(&action),
        }
    }
}

/// A function interposed on every dispatched action.
pub trait Middleware: Send + Sync + 'static {
    /// Handle `action`; call `next.run(..)` to let it continue.
    fn handle(&self, ctx: &Context<'_>, action: Action, next: Next<'_>);
}

/// Closure-backed middleware.
struct FnMiddleware<F>(F);

impl<F> Middleware for FnMiddleware<F>
where
    F: Fn(&Context<'_>, Action, Next<'_>) + Send + Sync + 'static,
{
    fn handle(&self, ctx: &Context<'_>, action: Action, next: Next<'_>) {
        (self.0)(ctx, action, next);
    }
}

/// A middleware registration request.
pub struct MiddlewareEntry {
    /// Identifier used for removal.
    pub(crate) id: MiddlewareId,
    /// Execution tier.
    pub(crate) priority: Priority,
    /// The handler.
    pub(crate) handler: Arc<dyn Middleware>,
}

impl fmt::Debug for MiddlewareEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MiddlewareEntry")
            .field("id", &self.id)
            .field("priority", &self.priority)
            .finish_non_exhaustive()
    }
}

impl MiddlewareEntry {
    /// Build an entry from a closure at [`Priority::Normal`].
    pub fn new<F>(id: impl Into<MiddlewareId>, f: F) -> Self
    where
        F: Fn(&Context<'_>, Action, Next<'_>) + Send + Sync + 'static,
    {
        Self::from_handler(id, FnMiddleware(f))
    }

    /// Build an entry from a [`Middleware`] implementation.
    pub fn from_handler(id: impl Into<MiddlewareId>, handler: impl Middleware) -> Self {
        Self {
            id: id.into(),
            priority: Priority::Normal,
            handler: Arc::new(handler),
        }
    }

    /// Set the execution tier.
    #[must_use]
    pub fn priority(mut self, priority: Priority) -> Self {
        self.priority = priority;
        self
    }

    /// Entry identifier.
    pub fn id(&self) -> &MiddlewareId {
        &self.id
    }
}

/// An installed chain element.
#[derive(Clone)]
pub(crate) struct Link {
    /// Entry identifier.
    pub(crate) id: MiddlewareId,
    /// Execution tier.
    pub(crate) priority: Priority,
    /// Insertion sequence, the tie-breaker within a tier.
    pub(crate) seq: u64,
    /// Outstanding registrations of this id; the entry leaves the chain when
    /// the last one is released.
    pub(crate) holds: usize,
    /// The handler.
    pub(crate) handler: Arc<dyn Middleware>,
}

/// The installed chain plus the insertion counter.
#[derive(Default)]
pub(crate) struct Chain {
    /// Current snapshot; replaced wholesale on every change.
    links: Arc<Vec<Link>>,
    /// Next insertion sequence number.
    next_seq: u64,
}

impl Chain {
    /// Snapshot for one dispatch.
    pub(crate) fn snapshot(&self) -> Arc<Vec<Link>> {
        self.links.clone()
    }

    /// Insert or replace an entry and take one hold on its id. Replacement
    /// keeps the original position. Returns true when the id was new.
    pub(crate) fn insert(&mut self, entry: MiddlewareEntry) -> bool {
        let mut links: Vec<Link> = self.links.as_ref().clone();
        let added = match links.iter_mut().find(|l| l.id == entry.id) {
            Some(existing) => {
                existing.handler = entry.handler;
                existing.priority = entry.priority;
                existing.holds += 1;
                false
            }
            None => {
                links.push(Link {
                    id: entry.id,
                    priority: entry.priority,
                    seq: self.next_seq,
                    holds: 1,
                    handler: entry.handler,
                });
                self.next_seq += 1;
                true
            }
        };
        links.sort_by_key(|l| (l.priority, l.seq));
        self.links = Arc::new(links);
        added
    }

    /// Remove an entry by id; unknown ids are ignored. Returns true if removed.
    pub(crate) fn remove(&mut self, id: &MiddlewareId) -> bool {
        if !self.links.iter().any(|l| &l.id == id) {
            return false;
        }
        let links: Vec<Link> = self
            .links
            .iter()
            .filter(|l| &l.id != id)
            .cloned()
            .collect();
        self.links = Arc::new(links);
        true
    }

    /// Drop one hold on `id`, removing the entry when none remain.
    ///
    /// Returns true when the entry left the chain.
    pub(crate) fn release(&mut self, id: &MiddlewareId) -> bool {
        let Some(link) = self.links.iter().find(|l| &l.id == id) else {
            return false;
        };
        if link.holds <= 1 {
            return self.remove(id);
        }
        let mut links: Vec<Link> = self.links.as_ref().clone();
        for l in links.iter_mut().filter(|l| &l.id == id) {
            l.holds -= 1;
        }
        self.links = Arc::new(links);
        false
    }

    /// Installed ids in execution order.
    pub(crate) fn ids(&self) -> Vec<MiddlewareId> {
        self.links.iter().map(|l| l.id.clone()).collect()
    }
}

/// Run `action` through `links`, ending in the store's reducers.
pub(crate) fn run_chain(store: &Store, links: &[Link], action: Action) {
    let ctx = Context { store };
    Next {
        rest: links,
        ctx: &ctx,
    }
    .run(action);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn noop(id: &str) -> MiddlewareEntry {
        MiddlewareEntry::new(id, |_ctx, action, next| next.run(action))
    }

    #[test]
    fn ordering_by_tier_then_insertion() {
        let mut chain = Chain::default();
        chain.insert(noop("a"));
        chain.insert(noop("b").priority(Priority::Low));
        chain.insert(noop("c").priority(Priority::High));
        chain.insert(noop("d"));
        let ids: Vec<String> = chain.ids().iter().map(|i| i.to_string()).collect();
        assert_eq!(ids, vec!["c", "a", "d", "b"]);
    }

    #[test]
    fn replace_keeps_position() {
        let mut chain = Chain::default();
        assert!(chain.insert(noop("a")));
        assert!(chain.insert(noop("b")));
        assert!(!chain.insert(noop("a")));
        let ids: Vec<String> = chain.ids().iter().map(|i| i.to_string()).collect();
        assert_eq!(ids, vec!["a", "b"]);
    }

    #[test]
    fn release_waits_for_last_hold() {
        let mut chain = Chain::default();
        assert!(chain.insert(noop("a")));
        assert!(!chain.insert(noop("a")));
        assert!(!chain.release(&MiddlewareId::new("a")));
        assert_eq!(chain.ids().len(), 1);
        assert!(chain.release(&MiddlewareId::new("a")));
        assert!(chain.ids().is_empty());
        assert!(!chain.release(&MiddlewareId::new("a")));

        chain.insert(noop("b"));
        chain.insert(noop("b"));
        assert!(chain.remove(&MiddlewareId::new("b")));
        assert!(chain.ids().is_empty());
    }

    #[test]
    fn snapshot_is_unaffected_by_later_changes() {
        let mut chain = Chain::default();
        chain.insert(noop("a"));
        let snap = chain.snapshot();
        chain.insert(noop("b"));
        assert!(chain.remove(&MiddlewareId::new("a")));
        assert_eq!(snap.len(), 1);
        assert_eq!(snap[0].id.as_str(), "a");
        assert!(!chain.remove(&MiddlewareId::new("missing")));
    }
}
