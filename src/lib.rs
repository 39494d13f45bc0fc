/*!
 * Local Drive Library
 * Sandboxed access to one host directory through virtual ids
 *
 * Every call goes through the same pipeline: the virtual id is resolved
 * against the drive root, the policy chain authorizes the operation, and
 * only then is the host filesystem touched.
 */

pub mod core;
pub mod drive;
pub mod listing;
pub mod monitoring;
pub mod permissions;
pub mod vfs;

// Re-exports
pub use crate::core::{DriveConfig, DriveError, DriveResult, OperationConfig};
pub use crate::drive::{Drive, DriveStats, ReadStream};
pub use crate::listing::{ListConfig, ListingEngine};
pub use crate::permissions::{Operation, Policy, PolicyKind};
pub use crate::vfs::{Entry, EntryKind, PathResolver};
