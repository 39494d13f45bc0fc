/*!
 * Core Module
 * Error handling and configuration shared by every subsystem
 */

pub mod config;
pub mod errors;

// Re-export for convenience
pub use config::{DriveConfig, OperationConfig};
pub use errors::{DriveError, DriveResult};
