/*!
 * Virtual File System Module
 * Path resolution, host filesystem access and entry metadata
 */

pub mod local;
pub mod naming;
pub mod paths;
pub mod types;

// Re-exports
pub use local::{LocalFs, SpaceInfo};
pub use naming::resolve_name;
pub use paths::{id_name, normalize_id, PathResolver};
pub use types::{classify, Entry, EntryKind, FileType, Metadata};
