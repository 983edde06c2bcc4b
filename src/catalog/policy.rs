//! Conflict resolution for name collisions between archived and override
//! entries.
//!
//! The catalog never decides a collision itself. When an `Archived` insert
//! lands on a name already held by an `Override` entry (the late-archive
//! ordering), it asks the installed [`ConflictPolicy`] and acts on the
//! returned [`Resolution`]. Policies are free to carry state across calls,
//! hence `&mut self` on [`ConflictPolicy::resolve`].

use super::entry::Entry;

/// A policy's answer to one collision.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    /// Keep the entry already in the catalog; the incoming one is discarded.
    KeepCurrent,
    /// Replace the current entry with the incoming one, in the same catalog
    /// slot.
    OverwriteWithIncoming,
    /// Stop. The insert takes no effect, and a batch insert stops feeding
    /// further entries.
    Abort,
}

/// Decides collisions between an incoming `Archived` entry and the `Override`
/// entry currently holding its name.
///
/// The call is synchronous and may block, e.g. on a modal dialog awaiting
/// the user. A policy must not call back into the catalog that invoked it;
/// `Catalog::insert` holds the exclusive borrow for the duration of the
/// call, so the public API already rules this out.
///
/// Closures of the right shape work directly:
///
/// ```
/// use biffcat::{Catalog, Entry, Resolution};
///
/// let mut kept = 0u32;
/// let catalog = Catalog::with_policy(move |_incoming: &Entry, _current: &Entry| {
///     kept += 1;
///     Resolution::KeepCurrent
/// });
/// # let _ = catalog;
/// ```
pub trait ConflictPolicy {
    fn resolve(&mut self, incoming: &Entry, current: &Entry) -> Resolution;
}

impl<F> ConflictPolicy for F
where
    F: FnMut(&Entry, &Entry) -> Resolution,
{
    fn resolve(&mut self, incoming: &Entry, current: &Entry) -> Resolution {
        self(incoming, current)
    }
}

/// Keeps whatever the catalog already holds. The default policy.
#[derive(Debug, Clone, Copy, Default)]
pub struct AlwaysKeep;

impl ConflictPolicy for AlwaysKeep {
    fn resolve(&mut self, _incoming: &Entry, _current: &Entry) -> Resolution {
        Resolution::KeepCurrent
    }
}

/// Always lets the incoming entry win.
#[derive(Debug, Clone, Copy, Default)]
pub struct AlwaysOverwrite;

impl ConflictPolicy for AlwaysOverwrite {
    fn resolve(&mut self, _incoming: &Entry, _current: &Entry) -> Resolution {
        Resolution::OverwriteWithIncoming
    }
}

/// Cancels on the first collision. Useful for callers that treat any
/// archive/override overlap as fatal.
#[derive(Debug, Clone, Copy, Default)]
pub struct AlwaysAbort;

impl ConflictPolicy for AlwaysAbort {
    fn resolve(&mut self, _incoming: &Entry, _current: &Entry) -> Resolution {
        Resolution::Abort
    }
}
