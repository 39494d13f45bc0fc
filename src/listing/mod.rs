/*!
 * Listing Module
 * Recursive directory walking with filters and deterministic ordering
 *
 * ## Usage
 * ```ignore
 * use local_drive::listing::{filters, ListConfig};
 *
 * let config = ListConfig::new()
 *     .sub_folders(true)
 *     .nested(true)
 *     .or_exclude(filters::name_in([".git", ".DS_Store"]));
 * let tree = drive.list("/", &config).await?;
 * ```
 */

mod config;
mod engine;
pub mod filters;

pub use config::{EntryFilter, ListConfig};
pub use engine::{sort_entries, ListingEngine};
