/*!
 * Listing Filters
 * Ready-made entry predicates for include/exclude
 */

use super::config::EntryFilter;
use crate::vfs::{Entry, EntryKind};
use std::sync::Arc;

/// Matches entries whose name is exactly one of `names`
pub fn name_in<I, S>(names: I) -> EntryFilter
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let names: ahash::HashSet<String> = names.into_iter().map(Into::into).collect();
    Arc::new(move |e: &Entry| names.contains(&e.name))
}

/// Matches entries whose name contains `query`, ignoring case
pub fn name_contains(query: &str) -> EntryFilter {
    let needle = query.to_lowercase();
    Arc::new(move |e: &Entry| e.name.to_lowercase().contains(&needle))
}

/// Matches files whose last extension is one of `extensions` (no leading dot)
pub fn extension_in<I, S>(extensions: I) -> EntryFilter
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let extensions: ahash::HashSet<String> = extensions
        .into_iter()
        .map(|s| s.as_ref().trim_start_matches('.').to_ascii_lowercase())
        .collect();
    Arc::new(move |e: &Entry| {
        !e.is_folder()
            && e
                .name
                .rsplit_once('.')
                .is_some_and(|(_, ext)| extensions.contains(&ext.to_ascii_lowercase()))
    })
}

/// Matches entries of one kind
pub fn kind_is(kind: EntryKind) -> EntryFilter {
    Arc::new(move |e: &Entry| e.kind == kind)
}
