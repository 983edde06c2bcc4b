//! Catalog error types.
//!
//! Policy rejections and cancellations are *outcomes* of an insert, not
//! errors; see [`InsertOutcome`](crate::catalog::InsertOutcome). The only
//! error the catalog itself raises signals a bug in the data source feeding
//! it.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CatalogError {
    /// Two `Archived` entries were inserted for the same case-insensitive
    /// name without going through override reconciliation. Archive
    /// enumeration should never double-report a name, so this points at the
    /// caller's data source rather than at catalog state.
    #[error("archived entry {name:?} was already inserted; archive enumeration double-reported it")]
    DuplicateArchivedEntry { name: String },
}

pub type Result<T> = std::result::Result<T, CatalogError>;
