/*!
 * Drive Entry
 * The metadata record returned by listing and info calls
 */

use super::kind::{classify, EntryKind};
use super::metadata::Metadata;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

/// Metadata record for one file or folder
///
/// Built fresh on every call; it reflects the filesystem at that instant only.
/// `children` is present only for folders of a nested listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Entry {
    pub name: String,
    pub id: String,
    pub size: u64,
    #[serde(with = "time::serde::timestamp")]
    pub modified_at: OffsetDateTime,
    pub kind: EntryKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub children: Option<Vec<Entry>>,
}

impl Entry {
    /// Build an entry from host metadata; folders are tagged, files classified
    pub fn from_metadata(name: String, id: String, md: &Metadata) -> Self {
        let kind = if md.is_dir() {
            EntryKind::Folder
        } else {
            classify(&name)
        };

        Self {
            name,
            id,
            size: md.size,
            modified_at: OffsetDateTime::from(md.modified),
            kind,
            children: None,
        }
    }

    #[inline]
    #[must_use]
    pub const fn is_folder(&self) -> bool {
        self.kind.is_folder()
    }
}
