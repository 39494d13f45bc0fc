/*!
 * Listing Configuration
 * Options controlling recursion, shape and filtering of listings
 */

use crate::vfs::Entry;
use std::fmt;
use std::sync::Arc;

/// Predicate over a candidate entry
pub type EntryFilter = Arc<dyn Fn(&Entry) -> bool + Send + Sync>;

/// Listing options
///
/// An entry is kept when it is not excluded and, if `include` is set, it
/// matches `include`. Excluded folders are not descended into.
#[derive(Clone, Default)]
pub struct ListConfig {
    /// Omit non-folder entries (folders are still traversed)
    pub skip_files: bool,
    /// Recurse into child folders
    pub sub_folders: bool,
    /// Attach recursive results as `children` instead of flattening
    pub nested: bool,
    pub include: Option<EntryFilter>,
    pub exclude: Option<EntryFilter>,
}

impl ListConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn skip_files(mut self, skip: bool) -> Self {
        self.skip_files = skip;
        self
    }

    pub fn sub_folders(mut self, recurse: bool) -> Self {
        self.sub_folders = recurse;
        self
    }

    pub fn nested(mut self, nested: bool) -> Self {
        self.nested = nested;
        self
    }

    /// Replace the include predicate
    pub fn include<F>(mut self, filter: F) -> Self
    where
        F: Fn(&Entry) -> bool + Send + Sync + 'static,
    {
        self.include = Some(Arc::new(filter));
        self
    }

    /// Replace the exclude predicate
    pub fn exclude<F>(mut self, filter: F) -> Self
    where
        F: Fn(&Entry) -> bool + Send + Sync + 'static,
    {
        self.exclude = Some(Arc::new(filter));
        self
    }

    /// Narrow the include predicate: both the existing one and `filter` must match
    pub fn and_include(mut self, filter: EntryFilter) -> Self {
        self.include = Some(match self.include.take() {
            Some(current) => Arc::new(move |e: &Entry| current(e) && filter(e)) as EntryFilter,
            None => filter,
        });
        self
    }

    /// Widen the exclude predicate: matching either one excludes
    pub fn or_exclude(mut self, filter: EntryFilter) -> Self {
        self.exclude = Some(match self.exclude.take() {
            Some(current) => Arc::new(move |e: &Entry| current(e) || filter(e)) as EntryFilter,
            None => filter,
        });
        self
    }

    #[inline]
    pub(crate) fn is_excluded(&self, entry: &Entry) -> bool {
        self.exclude.as_ref().is_some_and(|f| f(entry))
    }

    #[inline]
    pub(crate) fn is_included(&self, entry: &Entry) -> bool {
        self.include.as_ref().map_or(true, |f| f(entry))
    }
}

impl fmt::Debug for ListConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ListConfig")
            .field("skip_files", &self.skip_files)
            .field("sub_folders", &self.sub_folders)
            .field("nested", &self.nested)
            .field("include", &self.include.is_some())
            .field("exclude", &self.exclude.is_some())
            .finish()
    }
}
