//! Entry catalog - provenance-aware reconciliation of named entries.
//!
//! This module holds the working set of entries destined for an assembled
//! archive, fed from three sources: enumeration of the sealed archive
//! (`Archived`), a directory of on-disk replacements (`Override`), and
//! entries created from scratch (`New`).
//!
//! # Overview
//!
//! The catalog guarantees:
//! - At most one visible non-`New` entry per case-insensitive name
//! - An override shadows its archived counterpart instead of dropping it
//! - Removing an override restores the shadowed archived entry
//! - `Archived`-vs-`Override` collisions are settled by a caller-supplied
//!   [`ConflictPolicy`]
//!
//! # Architecture
//!
//! ```text
//! archive enumeration ──┐
//! override directory  ──┼──▶ Catalog::insert
//! fresh entries (New) ──┘         │
//!                                 ▼
//!                  case-insensitive name reconciliation
//!                                 │
//!               ┌─────────────────┼─────────────────┐
//!               ▼                 ▼                 ▼
//!         visible set        shadow store      ConflictPolicy
//!         (catalog order)    (one per name)    (collision verdicts)
//! ```
//!
//! Entries are handed out as `Arc<Entry>`; views and host applications hold
//! clones without owning catalog state.

mod entry;
mod policy;

pub use entry::{Entry, IconHandle, Provenance};
pub use policy::{AlwaysAbort, AlwaysKeep, AlwaysOverwrite, ConflictPolicy, Resolution};

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{debug, instrument, warn};

use crate::error::{CatalogError, Result};

/// What a single [`Catalog::insert`] did.
///
/// `Rejected` and `Cancelled` are ordinary outcomes of conflict resolution,
/// not errors; the catalog is in a consistent documented state after every
/// variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsertOutcome {
    /// The entry is now visible in the catalog.
    Inserted,
    /// The conflict policy kept the current entry; the incoming one was
    /// discarded.
    Rejected,
    /// The conflict policy aborted; the incoming entry was discarded and a
    /// batch insert stops here.
    Cancelled,
}

impl InsertOutcome {
    pub fn is_inserted(self) -> bool {
        matches!(self, InsertOutcome::Inserted)
    }
}

/// Tally of a [`Catalog::insert_all`] run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BatchOutcome {
    /// Entries now visible.
    pub inserted: usize,
    /// Entries discarded by `KeepCurrent` verdicts.
    pub rejected: usize,
    /// True when a policy `Abort` stopped the batch before the iterator was
    /// exhausted.
    pub cancelled: bool,
}

/// Visible per-provenance counts plus the shadow store size.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogStats {
    pub archived: usize,
    pub overrides: usize,
    pub new: usize,
    pub shadowed: usize,
}

/// The reconciled working set of entries.
///
/// Visible entries keep catalog order (insertion order, with conflict
/// replacements and shadow restoration swapping in place). The shadow store
/// keeps at most one displaced archived entry per normalized name.
///
/// All operations are synchronous; `insert` may block for as long as the
/// installed [`ConflictPolicy`] does.
pub struct Catalog {
    visible: Vec<Arc<Entry>>,
    shadowed: HashMap<String, Arc<Entry>>,
    revision: u64,
    policy: Box<dyn ConflictPolicy>,
}

impl Catalog {
    /// An empty catalog with the [`AlwaysKeep`] policy.
    pub fn new() -> Self {
        Self::with_policy(AlwaysKeep)
    }

    /// An empty catalog with the given conflict policy.
    pub fn with_policy(policy: impl ConflictPolicy + 'static) -> Self {
        Self {
            visible: Vec::new(),
            shadowed: HashMap::new(),
            revision: 0,
            policy: Box::new(policy),
        }
    }

    /// Replaces the conflict policy for subsequent inserts.
    pub fn set_policy(&mut self, policy: impl ConflictPolicy + 'static) {
        self.policy = Box::new(policy);
    }

    /// Inserts one entry, reconciling it against the visible set.
    ///
    /// - `New` entries append unconditionally and never collide.
    /// - A non-`New` entry with an unclaimed name appends.
    /// - An `Override` landing on a claimed name displaces the current
    ///   holder into the shadow store and takes its position.
    /// - An `Archived` landing on a name held by an `Override` is settled by
    ///   the conflict policy.
    /// - An `Archived` landing on a name held by another `Archived` is an
    ///   error: archive enumeration double-reported the name.
    #[instrument(
        name = "catalog_insert",
        skip(self, entry),
        fields(name = %entry.name(), provenance = %entry.provenance())
    )]
    pub fn insert(&mut self, entry: Entry) -> Result<InsertOutcome> {
        if entry.provenance() == Provenance::New {
            self.visible.push(Arc::new(entry));
            self.revision += 1;
            debug!("appended new entry");
            return Ok(InsertOutcome::Inserted);
        }

        let Some(slot) = self.claimed_slot(entry.normalized_name()) else {
            self.visible.push(Arc::new(entry));
            self.revision += 1;
            debug!("appended entry under an unclaimed name");
            return Ok(InsertOutcome::Inserted);
        };

        if entry.provenance() == Provenance::Override {
            let displaced = Arc::clone(&self.visible[slot]);
            if displaced.provenance() == Provenance::Override {
                warn!(
                    "override displaced another override; the override source double-reported this name"
                );
            }
            if let Some(prior) = self
                .shadowed
                .insert(displaced.normalized_name().to_string(), displaced)
            {
                debug!(prior = %prior.name(), "replaced an older entry in the shadow store");
            }
            self.visible[slot] = Arc::new(entry);
            self.revision += 1;
            debug!("override shadowed the current holder of its name");
            return Ok(InsertOutcome::Inserted);
        }

        // Incoming is Archived from here on.
        let current = &self.visible[slot];
        if current.provenance() == Provenance::Archived {
            return Err(CatalogError::DuplicateArchivedEntry {
                name: entry.name().to_string(),
            });
        }

        match self.policy.resolve(&entry, &self.visible[slot]) {
            Resolution::KeepCurrent => {
                debug!("policy kept the current override");
                Ok(InsertOutcome::Rejected)
            }
            Resolution::OverwriteWithIncoming => {
                self.visible[slot] = Arc::new(entry);
                self.revision += 1;
                debug!("policy replaced the current override");
                Ok(InsertOutcome::Inserted)
            }
            Resolution::Abort => {
                debug!("policy cancelled the insert");
                Ok(InsertOutcome::Cancelled)
            }
        }
    }

    /// Inserts entries in order until the iterator is exhausted or a policy
    /// `Abort` cancels the batch.
    ///
    /// A [`CatalogError`] propagates immediately; entries inserted before it
    /// stay in the catalog.
    pub fn insert_all(
        &mut self,
        entries: impl IntoIterator<Item = Entry>,
    ) -> Result<BatchOutcome> {
        let mut outcome = BatchOutcome::default();
        for entry in entries {
            match self.insert(entry)? {
                InsertOutcome::Inserted => outcome.inserted += 1,
                InsertOutcome::Rejected => outcome.rejected += 1,
                InsertOutcome::Cancelled => {
                    outcome.cancelled = true;
                    break;
                }
            }
        }
        Ok(outcome)
    }

    /// Removes a visible entry, identified by the inserted instance.
    ///
    /// Removing an `Override` whose name has a shadowed entry restores that
    /// entry to the override's position. Removing an entry that is not in
    /// the catalog (already removed, or never inserted) is a no-op returning
    /// `None`; removal is idempotent.
    pub fn remove(&mut self, entry: &Arc<Entry>) -> Option<Arc<Entry>> {
        let slot = self
            .visible
            .iter()
            .position(|current| Arc::ptr_eq(current, entry))?;

        let removed = if self.visible[slot].provenance() == Provenance::Override {
            match self.shadowed.remove(self.visible[slot].normalized_name()) {
                Some(restored) => {
                    debug!(name = %restored.name(), "restored shadowed entry");
                    std::mem::replace(&mut self.visible[slot], restored)
                }
                None => self.visible.remove(slot),
            }
        } else {
            self.visible.remove(slot)
        };
        self.revision += 1;
        debug!(name = %removed.name(), provenance = %removed.provenance(), "removed entry");
        Some(removed)
    }

    /// Drops every visible and shadowed entry.
    pub fn clear(&mut self) {
        self.visible.clear();
        self.shadowed.clear();
        self.revision += 1;
        debug!("catalog cleared");
    }

    /// Visible entries in catalog order.
    pub fn iter(&self) -> impl Iterator<Item = &Arc<Entry>> {
        self.visible.iter()
    }

    /// Visible entries of one provenance, in catalog order.
    pub fn of_provenance(&self, kind: Provenance) -> impl Iterator<Item = &Arc<Entry>> {
        self.visible
            .iter()
            .filter(move |entry| entry.provenance() == kind)
    }

    /// The visible non-`New` entry holding this name, matched
    /// case-insensitively.
    pub fn find_named(&self, name: &str) -> Option<&Arc<Entry>> {
        let slot = self.claimed_slot(&name.to_lowercase())?;
        Some(&self.visible[slot])
    }

    /// The shadowed entry for this name, if an override displaced one.
    pub fn shadowed(&self, name: &str) -> Option<&Arc<Entry>> {
        self.shadowed.get(&name.to_lowercase())
    }

    /// Number of entries in the shadow store.
    pub fn shadowed_len(&self) -> usize {
        self.shadowed.len()
    }

    /// Number of visible entries.
    pub fn len(&self) -> usize {
        self.visible.len()
    }

    pub fn is_empty(&self) -> bool {
        self.visible.is_empty()
    }

    pub fn stats(&self) -> CatalogStats {
        let mut stats = CatalogStats {
            shadowed: self.shadowed.len(),
            ..CatalogStats::default()
        };
        for entry in &self.visible {
            match entry.provenance() {
                Provenance::Archived => stats.archived += 1,
                Provenance::Override => stats.overrides += 1,
                Provenance::New => stats.new += 1,
            }
        }
        stats
    }

    /// Monotonic revision counter, bumped by every effective mutation.
    ///
    /// `Rejected` and `Cancelled` inserts, errors, and no-op removals leave
    /// it unchanged, so views can use it as a staleness token.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Position of the visible non-`New` entry claiming this normalized
    /// name. `New` entries never claim a name.
    fn claimed_slot(&self, key: &str) -> Option<usize> {
        self.visible.iter().position(|current| {
            current.provenance() != Provenance::New && current.normalized_name() == key
        })
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Catalog {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Catalog")
            .field("visible", &self.visible)
            .field("shadowed", &self.shadowed)
            .field("revision", &self.revision)
            .finish_non_exhaustive()
    }
}
