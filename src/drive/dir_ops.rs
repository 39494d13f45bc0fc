/*!
 * Directory Operations
 * Listing, search and tree-level copy/move
 */

use std::path::PathBuf;

use tracing::instrument;

use super::{Drive, Resolved};
use crate::core::{DriveError, DriveResult, OperationConfig};
use crate::listing::{filters, ListConfig, ListingEngine};
use crate::permissions::Operation;
use crate::vfs::{Entry, Metadata};

impl Drive {
    /// List the folder `id`
    ///
    /// Names configured as hidden are excluded on top of `config.exclude`.
    #[instrument(level = "debug", skip(self, config))]
    pub async fn list(&self, id: &str, config: &ListConfig) -> DriveResult<Vec<Entry>> {
        let resolved = self.authorize(id, Operation::Read).await?;
        self.trace_op("list", &resolved.id);

        let md = self
            .fs
            .stat(&resolved.host)
            .await
            .map_err(|e| DriveError::from_io(e, format!("list {}", resolved.id)))?;
        if !md.is_dir() {
            return Err(DriveError::NotADirectory(resolved.id));
        }

        let engine = ListingEngine::new(&self.fs, &self.resolver);
        match &self.hidden {
            Some(hidden) => {
                let config = config.clone().or_exclude(hidden.clone());
                engine.list(&resolved.host, &config).await
            }
            None => engine.list(&resolved.host, config).await,
        }
    }

    /// `list` narrowed to names containing `query`, ignoring case
    #[instrument(level = "debug", skip(self, config))]
    pub async fn search(
        &self,
        id: &str,
        query: &str,
        config: &ListConfig,
    ) -> DriveResult<Vec<Entry>> {
        if query.is_empty() {
            return self.list(id, config).await;
        }
        self.trace_op("search", query);
        let config = config.clone().and_include(filters::name_contains(query));
        self.list(id, &config).await
    }

    /// Copy `source` to `target`, returning the new id
    ///
    /// Existing files at the final path are overwritten unless `config` asks
    /// for a free name.
    #[instrument(level = "debug", skip(self, config))]
    pub async fn copy(
        &self,
        source: &str,
        target: &str,
        config: &OperationConfig,
    ) -> DriveResult<String> {
        let src = self.authorize(source, Operation::Read).await?;
        let md = self.stat_source(&src, "copy").await?;

        let (dest, dest_id) = self.transfer_target(&src, &md, target, config).await?;
        if dest == src.host {
            return Err(DriveError::InvalidTarget(format!(
                "{} cannot be copied onto itself",
                src.id
            )));
        }

        self.fs
            .copy(&src.lexical, &dest)
            .await
            .map_err(|e| DriveError::from_io(e, format!("copy {} to {}", src.id, dest_id)))?;
        self.trace_op("copy", &format!("{} -> {}", src.id, dest_id));

        Ok(dest_id)
    }

    /// Move `source` to `target`, returning the new id
    ///
    /// Unlike `copy`, an existing entry at the final path is never replaced.
    #[instrument(level = "debug", skip(self, config))]
    pub async fn move_to(
        &self,
        source: &str,
        target: &str,
        config: &OperationConfig,
    ) -> DriveResult<String> {
        let src = self.authorize(source, Operation::Read).await?;
        self.check(&src.host, Operation::Write, &src.id)?;
        self.check(&src.lexical, Operation::Write, &src.id)?;
        if self.resolver.is_root(&src.lexical) || self.resolver.is_root(&src.host) {
            return Err(DriveError::InvalidTarget("cannot move the root".into()));
        }
        let md = self.stat_source(&src, "move").await?;

        let (dest, dest_id) = self.transfer_target(&src, &md, target, config).await?;
        if dest == src.host || dest == src.lexical {
            return Err(DriveError::InvalidTarget(format!(
                "{} is already at {}",
                src.id, dest_id
            )));
        }
        let taken = self
            .fs
            .exists(&dest)
            .await
            .map_err(|e| DriveError::from_io(e, format!("move {} to {}", src.id, dest_id)))?;
        if taken {
            return Err(DriveError::AlreadyExists(dest_id));
        }

        self.fs
            .rename(&src.lexical, &dest)
            .await
            .map_err(|e| DriveError::from_io(e, format!("move {} to {}", src.id, dest_id)))?;
        self.trace_op("move", &format!("{} -> {}", src.id, dest_id));

        Ok(dest_id)
    }

    async fn stat_source(&self, src: &Resolved, operation: &str) -> DriveResult<Metadata> {
        self.fs
            .stat(&src.lexical)
            .await
            .map_err(|e| DriveError::from_io(e, format!("{} {}", operation, src.id)))
    }

    /// Final host path and id for a copy or move of `src` to `target`
    ///
    /// An existing folder, or any id ending in `/`, receives the entry under
    /// the source name. Any other `target` is the new path itself. Both the
    /// destination and the final path must be writable; the returned host
    /// path is resolved through any symlink already sitting there.
    async fn transfer_target(
        &self,
        src: &Resolved,
        md: &Metadata,
        target: &str,
        config: &OperationConfig,
    ) -> DriveResult<(PathBuf, String)> {
        let dest = self.authorize(target, Operation::Write).await?;
        let existing = match self.fs.stat(&dest.host).await {
            Ok(dest_md) => Some(dest_md),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => None,
            Err(e) => return Err(DriveError::from_io(e, format!("stat {}", dest.id))),
        };

        let into_folder = target.ends_with('/') || existing.is_some_and(|m| m.is_dir());
        let mut path = if into_folder {
            let name = src
                .name()
                .ok_or_else(|| DriveError::InvalidTarget("the root has no name".into()))?;
            dest.host.join(name)
        } else {
            if md.is_dir() && existing.is_some() {
                return Err(DriveError::NotADirectory(dest.id));
            }
            dest.host
        };

        if config.prevent_name_collision {
            path = self.avoid_collision(&path, md.is_dir()).await?;
        }
        let path_id = self.id_of(&path)?;
        self.check(&path, Operation::Write, &path_id)?;
        let path = self.confine(&path, &path_id).await?;

        if md.is_dir() && path != src.host && path.starts_with(&src.host) {
            return Err(DriveError::InvalidTarget(format!(
                "{} cannot be placed inside itself",
                src.id
            )));
        }

        Ok((path, path_id))
    }
}
