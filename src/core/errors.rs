/*!
 * Error Types
 * Centralized error handling with thiserror, miette, and serde support
 */

use miette::Diagnostic;
use serde::{Deserialize, Serialize};
use std::io;
use thiserror::Error;

/// Drive operation result
///
/// # Must Use
/// Drive operations can fail and must be handled to prevent data loss
#[must_use = "drive operations can fail and must be handled"]
pub type DriveResult<T> = Result<T, DriveError>;

/// Errors surfaced by every drive operation
///
/// Policy and path violations are always reported before the host
/// filesystem is touched. Host failures are reported as-is.
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Diagnostic)]
#[serde(tag = "error", content = "details", rename_all = "snake_case")]
pub enum DriveError {
    #[error("Invalid root folder: {0}")]
    #[diagnostic(
        code(drive::invalid_root),
        help("The root must be an absolute path from the drive root, e.g. /srv/files or C:\\files.")
    )]
    InvalidRoot(String),

    #[error("Access denied: {0}")]
    #[diagnostic(
        code(drive::access_denied),
        help("The path is outside the drive root or the configured policy forbids this operation.")
    )]
    AccessDenied(String),

    #[error("Not found: {0}")]
    #[diagnostic(code(drive::not_found))]
    NotFound(String),

    #[error("Already exists: {0}")]
    #[diagnostic(
        code(drive::already_exists),
        help("Pass an operation config with prevent_name_collision to pick a free name.")
    )]
    AlreadyExists(String),

    #[error("Not a directory: {0}")]
    #[diagnostic(code(drive::not_a_directory))]
    NotADirectory(String),

    #[error("Invalid name: {0}")]
    #[diagnostic(
        code(drive::invalid_name),
        help("Names must be a single path component without separators, '.' or '..'.")
    )]
    InvalidName(String),

    #[error("Invalid target: {0}")]
    #[diagnostic(code(drive::invalid_target))]
    InvalidTarget(String),

    #[error("I/O error: {0}")]
    #[diagnostic(code(drive::io))]
    Io(String),
}

impl DriveError {
    /// Map a host I/O error onto a drive error, keeping the operation context
    pub fn from_io(e: io::Error, context: impl Into<String>) -> Self {
        let context = context.into();
        match e.kind() {
            io::ErrorKind::NotFound => DriveError::NotFound(context),
            io::ErrorKind::AlreadyExists => DriveError::AlreadyExists(context),
            _ => DriveError::Io(format!("{}: {}", context, e)),
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, DriveError::NotFound(_))
    }
}
