//! Provenance-aware entry catalog for assembling BIFF-style archives.

pub mod catalog;
pub mod error;
pub mod view;

pub use catalog::{
    AlwaysAbort, AlwaysKeep, AlwaysOverwrite, BatchOutcome, Catalog, CatalogStats, ConflictPolicy,
    Entry, IconHandle, InsertOutcome, Provenance, Resolution,
};
pub use error::{CatalogError, Result};
pub use view::{CatalogView, SortDirection, SortKey, ViewSettings};
