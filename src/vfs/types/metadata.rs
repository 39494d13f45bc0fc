/*!
 * VFS Metadata
 * The subset of host metadata a drive entry is built from
 */

use super::file_type::FileType;
use std::fs;
use std::time::SystemTime;

/// Host metadata snapshot taken at call time
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Metadata {
    pub file_type: FileType,
    pub size: u64,
    pub modified: SystemTime,
}

impl Metadata {
    #[inline]
    #[must_use]
    pub const fn is_dir(&self) -> bool {
        matches!(self.file_type, FileType::Directory)
    }

    #[inline]
    #[must_use]
    pub const fn is_file(&self) -> bool {
        matches!(self.file_type, FileType::File)
    }

    #[inline]
    #[must_use]
    pub const fn is_symlink(&self) -> bool {
        matches!(self.file_type, FileType::Symlink)
    }
}

impl From<&fs::Metadata> for Metadata {
    fn from(md: &fs::Metadata) -> Self {
        Self {
            file_type: md.file_type().into(),
            size: md.len(),
            modified: md.modified().unwrap_or(SystemTime::UNIX_EPOCH),
        }
    }
}
