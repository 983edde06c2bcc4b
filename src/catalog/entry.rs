//! Entry identity - [`Entry`], [`Provenance`], and [`IconHandle`].

use std::fmt;

use serde::{Deserialize, Serialize};

/// Where an entry's content currently lives.
///
/// Attached to an [`Entry`] at construction and never mutated afterwards; a
/// change of provenance is modeled as removing one entry and inserting a
/// fresh one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Provenance {
    /// Content resides only in the original sealed archive.
    Archived,
    /// Content supersedes an archived entry of the same name.
    Override,
    /// Content has no archived counterpart and is being added for the first
    /// time. `New` entries never participate in name reconciliation.
    New,
}

impl Provenance {
    /// Grouping rank used by provenance sorting: `Archived < New < Override`.
    ///
    /// This is display grouping only; it carries no precedence between
    /// sources.
    pub fn display_rank(self) -> u8 {
        match self {
            Provenance::Archived => 0,
            Provenance::New => 1,
            Provenance::Override => 2,
        }
    }
}

impl fmt::Display for Provenance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Provenance::Archived => "archived",
            Provenance::Override => "override",
            Provenance::New => "new",
        };
        f.write_str(label)
    }
}

/// Opaque display token minted by the presentation layer.
///
/// The catalog stores and returns the token untouched; mapping it back to an
/// icon (or any other display resource) is the caller's business.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct IconHandle(pub u64);

/// A named resource entry destined for the assembled archive.
///
/// Identity is fixed at construction: the display name, the lowercased key
/// derived from it for case-insensitive dedup, the extension (text after the
/// final `.`, case preserved for display sorting), the provenance, and the
/// caller's icon handle. Entries are deliberately not `Clone`: the catalog
/// identifies an entry by the inserted instance, and a fresh `Entry::new`
/// is the way to model any change.
#[derive(Debug)]
pub struct Entry {
    name: String,
    normalized: String,
    extension: String,
    provenance: Provenance,
    icon: IconHandle,
}

impl Entry {
    pub fn new(name: impl Into<String>, provenance: Provenance, icon: IconHandle) -> Self {
        let name = name.into();
        let normalized = name.to_lowercase();
        let extension = match name.rsplit_once('.') {
            Some((_, ext)) => ext.to_string(),
            None => String::new(),
        };
        Self {
            name,
            normalized,
            extension,
            provenance,
            icon,
        }
    }

    /// The display name, exactly as supplied by the caller.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The lowercased name used as the case-insensitive dedup key.
    pub fn normalized_name(&self) -> &str {
        &self.normalized
    }

    /// Text after the final `.` of the name; empty when the name has none.
    pub fn extension(&self) -> &str {
        &self.extension
    }

    pub fn provenance(&self) -> Provenance {
        self.provenance
    }

    pub fn icon(&self) -> IconHandle {
        self.icon
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extension_derivation() {
        let entry = Entry::new("SW1H01.ITM", Provenance::Archived, IconHandle::default());
        assert_eq!(entry.extension(), "ITM");

        let entry = Entry::new("readme", Provenance::New, IconHandle::default());
        assert_eq!(entry.extension(), "");

        let entry = Entry::new("a.b.cre", Provenance::Archived, IconHandle::default());
        assert_eq!(entry.extension(), "cre");
    }

    #[test]
    fn test_normalized_name_lowercases() {
        let entry = Entry::new("AR0602.WED", Provenance::Archived, IconHandle::default());
        assert_eq!(entry.name(), "AR0602.WED");
        assert_eq!(entry.normalized_name(), "ar0602.wed");
    }

    #[test]
    fn test_display_rank_grouping() {
        assert!(Provenance::Archived.display_rank() < Provenance::New.display_rank());
        assert!(Provenance::New.display_rank() < Provenance::Override.display_rank());
    }

    #[test]
    fn test_provenance_display_labels() {
        assert_eq!(Provenance::Archived.to_string(), "archived");
        assert_eq!(Provenance::Override.to_string(), "override");
        assert_eq!(Provenance::New.to_string(), "new");
    }
}
