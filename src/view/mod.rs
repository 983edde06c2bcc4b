//! Display projection - a filterable, sortable window over the catalog.
//!
//! [`CatalogView`] does not own entries. It holds [`ViewSettings`] (which
//! provenance kinds to show, sort key, direction) and a cached projection of
//! `Arc` clones. [`CatalogView::project`] recomputes the projection;
//! [`CatalogView::row`] and [`CatalogView::row_count`] answer from the cache
//! in O(1) and never recompute behind the caller's back. Display adapters
//! call [`CatalogView::is_stale`] after mutating the catalog or the settings
//! to know when a reprojection is due.

use std::collections::HashSet;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::catalog::{Catalog, Entry, Provenance};

/// Column the projection is sorted by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortKey {
    /// Group by provenance rank: `Archived < New < Override`.
    Provenance,
    /// Lexicographic on the extension, case-sensitive.
    Extension,
    /// Lexicographic on the full display name, case-sensitive.
    #[default]
    Name,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    Ascending,
    /// Reverses the comparator verdict, not the sorted rows, so equal-key
    /// runs keep catalog order in both directions.
    Descending,
}

/// The view's explicit configuration. Serializable so host applications can
/// persist display state between sessions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewSettings {
    pub visible_kinds: HashSet<Provenance>,
    pub sort_key: SortKey,
    pub direction: SortDirection,
}

impl Default for ViewSettings {
    fn default() -> Self {
        Self {
            visible_kinds: HashSet::from([
                Provenance::Archived,
                Provenance::Override,
                Provenance::New,
            ]),
            sort_key: SortKey::default(),
            direction: SortDirection::default(),
        }
    }
}

/// Cached filtered/sorted projection of a [`Catalog`].
#[derive(Debug)]
pub struct CatalogView {
    settings: ViewSettings,
    rows: Vec<Arc<Entry>>,
    projected_revision: u64,
    stale: bool,
}

impl CatalogView {
    /// A view with default settings: all kinds visible, sorted by name
    /// ascending. The first projection is always due.
    pub fn new() -> Self {
        Self::with_settings(ViewSettings::default())
    }

    pub fn with_settings(settings: ViewSettings) -> Self {
        Self {
            settings,
            rows: Vec::new(),
            projected_revision: 0,
            stale: true,
        }
    }

    /// Recomputes the projection from the catalog's visible entries.
    ///
    /// Filters by the enabled provenance kinds, then stable-sorts by the
    /// active key so equal keys keep catalog order. O(n log n); this is the
    /// only operation that recomputes rows.
    pub fn project(&mut self, catalog: &Catalog) -> &[Arc<Entry>] {
        let kinds = &self.settings.visible_kinds;
        self.rows.clear();
        self.rows.extend(
            catalog
                .iter()
                .filter(|entry| kinds.contains(&entry.provenance()))
                .cloned(),
        );

        let key = self.settings.sort_key;
        let direction = self.settings.direction;
        self.rows.sort_by(|a, b| {
            let verdict = match key {
                SortKey::Provenance => a
                    .provenance()
                    .display_rank()
                    .cmp(&b.provenance().display_rank()),
                SortKey::Extension => a.extension().cmp(b.extension()),
                SortKey::Name => a.name().cmp(b.name()),
            };
            match direction {
                SortDirection::Ascending => verdict,
                SortDirection::Descending => verdict.reverse(),
            }
        });

        self.projected_revision = catalog.revision();
        self.stale = false;
        debug!(rows = self.rows.len(), revision = self.projected_revision, "projection recomputed");
        &self.rows
    }

    /// The i-th row of the most recent projection. O(1); `None` when out of
    /// range.
    pub fn row(&self, index: usize) -> Option<&Arc<Entry>> {
        self.rows.get(index)
    }

    /// Length of the most recent projection. O(1).
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// The whole cached projection in display order.
    pub fn rows(&self) -> &[Arc<Entry>] {
        &self.rows
    }

    /// Enables or disables one provenance kind. Marks the projection stale;
    /// never touches the catalog.
    pub fn set_visible(&mut self, kind: Provenance, visible: bool) {
        let changed = if visible {
            self.settings.visible_kinds.insert(kind)
        } else {
            self.settings.visible_kinds.remove(&kind)
        };
        if changed {
            self.stale = true;
        }
    }

    pub fn is_visible(&self, kind: Provenance) -> bool {
        self.settings.visible_kinds.contains(&kind)
    }

    /// Changes the sort column and direction. Marks the projection stale;
    /// never touches the catalog.
    pub fn set_sort(&mut self, key: SortKey, direction: SortDirection) {
        if self.settings.sort_key != key || self.settings.direction != direction {
            self.settings.sort_key = key;
            self.settings.direction = direction;
            self.stale = true;
        }
    }

    pub fn sort_key(&self) -> SortKey {
        self.settings.sort_key
    }

    pub fn direction(&self) -> SortDirection {
        self.settings.direction
    }

    /// True when the cached projection no longer reflects the catalog or the
    /// settings and [`CatalogView::project`] should be called again.
    pub fn is_stale(&self, catalog: &Catalog) -> bool {
        self.stale || self.projected_revision != catalog.revision()
    }

    pub fn settings(&self) -> &ViewSettings {
        &self.settings
    }

    pub fn set_settings(&mut self, settings: ViewSettings) {
        self.settings = settings;
        self.stale = true;
    }
}

impl Default for CatalogView {
    fn default() -> Self {
        Self::new()
    }
}
