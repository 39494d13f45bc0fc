/*!
 * VFS Types
 * Shared types for drive entries and host metadata
 */

mod entry;
mod file_type;
mod kind;
mod metadata;

pub use entry::Entry;
pub use file_type::FileType;
pub use kind::{classify, EntryKind};
pub use metadata::Metadata;
