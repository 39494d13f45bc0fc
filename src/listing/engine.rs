/*!
 * Listing Engine
 * Depth-first directory walk producing ordered entry sequences
 */

use std::path::{Path, PathBuf};

use futures::future::BoxFuture;
use tracing::trace;

use super::config::ListConfig;
use crate::core::{DriveError, DriveResult};
use crate::vfs::{Entry, LocalFs, PathResolver};

/// Walks host directories and builds entries
///
/// Symlinks are reported but never descended into. Read errors anywhere in
/// the walk abort the listing; nothing is silently skipped.
#[derive(Debug, Clone, Copy)]
pub struct ListingEngine<'a> {
    fs: &'a LocalFs,
    resolver: &'a PathResolver,
}

impl<'a> ListingEngine<'a> {
    pub fn new(fs: &'a LocalFs, resolver: &'a PathResolver) -> Self {
        Self { fs, resolver }
    }

    /// List `dir`, which must already be authorized for reading
    ///
    /// Each sequence is sorted once by whoever owns it: every nested
    /// `children` list, and in flat mode the whole accumulated result.
    pub async fn list(&self, dir: &Path, config: &ListConfig) -> DriveResult<Vec<Entry>> {
        let mut entries = self.walk(dir.to_path_buf(), config).await?;
        sort_entries(&mut entries);
        Ok(entries)
    }

    fn walk<'b>(
        &'b self,
        dir: PathBuf,
        config: &'b ListConfig,
    ) -> BoxFuture<'b, DriveResult<Vec<Entry>>> {
        Box::pin(async move {
            let dir_id = self.resolver.to_id(&dir)?;
            let names = self
                .fs
                .read_dir(&dir)
                .await
                .map_err(|e| DriveError::from_io(e, format!("list {}", dir_id)))?;
            trace!(id = %dir_id, count = names.len(), "Read directory");

            let mut out = Vec::with_capacity(names.len());
            for name in names {
                if name == "." || name == ".." {
                    continue;
                }

                let path = dir.join(&name);
                let id = self.resolver.to_id(&path)?;
                let md = self
                    .fs
                    .stat(&path)
                    .await
                    .map_err(|e| DriveError::from_io(e, format!("stat {}", id)))?;
                let mut entry = Entry::from_metadata(name, id, &md);

                if config.is_excluded(&entry) {
                    continue;
                }

                if md.is_dir() {
                    if config.sub_folders {
                        let mut children = self.walk(path, config).await?;
                        if config.nested {
                            sort_entries(&mut children);
                            entry.children = Some(children);
                        } else {
                            out.append(&mut children);
                        }
                    }
                } else if config.skip_files {
                    continue;
                }

                if !config.is_included(&entry) {
                    continue;
                }
                out.push(entry);
            }

            Ok(out)
        })
    }
}

/// Folders first, then case-insensitive name order, exact name as tie-break
pub fn sort_entries(entries: &mut [Entry]) {
    entries.sort_by_cached_key(|e| (!e.is_folder(), e.name.to_uppercase(), e.name.clone()));
}
