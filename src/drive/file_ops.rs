/*!
 * File Operations
 * Reading, writing, creating and removing entries
 */

use tokio::io::AsyncRead;
use tracing::{info, instrument};

use super::{validate_name, Drive, ReadStream};
use crate::core::{DriveError, DriveResult, OperationConfig};
use crate::permissions::Operation;

impl Drive {
    /// Open a file for streaming reads
    #[instrument(level = "debug", skip(self))]
    pub async fn read(&self, id: &str) -> DriveResult<ReadStream> {
        let resolved = self.authorize(id, Operation::Read).await?;
        self.trace_op("read", &resolved.id);

        let md = self
            .fs
            .stat(&resolved.host)
            .await
            .map_err(|e| DriveError::from_io(e, format!("read {}", resolved.id)))?;
        if md.is_dir() {
            return Err(DriveError::InvalidTarget(format!(
                "{} is a folder",
                resolved.id
            )));
        }

        self.fs
            .open_read(&resolved.host)
            .await
            .map_err(|e| DriveError::from_io(e, format!("read {}", resolved.id)))
    }

    /// Stream `data` into a file, returning the id actually written
    ///
    /// Missing parent folders are created. An existing file is truncated
    /// unless `config` asks for a free name instead.
    #[instrument(level = "debug", skip(self, data, config))]
    pub async fn write<R>(
        &self,
        id: &str,
        data: &mut R,
        config: &OperationConfig,
    ) -> DriveResult<String>
    where
        R: AsyncRead + Unpin + Send + ?Sized,
    {
        let resolved = self.authorize(id, Operation::Write).await?;
        if self.resolver.is_root(&resolved.host) {
            return Err(DriveError::InvalidTarget("cannot write to the root".into()));
        }

        let mut target = resolved.host;
        let mut target_id = resolved.id;
        if config.prevent_name_collision {
            target = self.avoid_collision(&target, false).await?;
            target_id = self.id_of(&target)?;
            self.check(&target, Operation::Write, &target_id)?;
            target = self.confine(&target, &target_id).await?;
        }

        let written = self
            .fs
            .write_stream(&target, data)
            .await
            .map_err(|e| DriveError::from_io(e, format!("write {}", target_id)))?;
        self.trace_op("write", &target_id);
        info!(id = %target_id, bytes = written, "File written");

        Ok(target_id)
    }

    /// Create an empty file or a folder named `name` under `parent`
    #[instrument(level = "debug", skip(self, config))]
    pub async fn make(
        &self,
        parent: &str,
        name: &str,
        is_folder: bool,
        config: &OperationConfig,
    ) -> DriveResult<String> {
        validate_name(name)?;
        let folder = self.authorize(parent, Operation::Write).await?;

        let mut target = folder.host.join(name);
        if config.prevent_name_collision {
            target = self.avoid_collision(&target, is_folder).await?;
        }
        let target_id = self.id_of(&target)?;
        self.check(&target, Operation::Write, &target_id)?;
        let target = self.confine(&target, &target_id).await?;

        let created = if is_folder {
            self.fs.ensure_dir(&target).await
        } else {
            self.fs.create_empty(&target).await
        };
        created.map_err(|e| DriveError::from_io(e, format!("make {}", target_id)))?;
        self.trace_op("make", &target_id);

        Ok(target_id)
    }

    /// Create a folder and any missing parents
    ///
    /// An existing folder is kept as is unless `config` asks for a free name.
    #[instrument(level = "debug", skip(self, config))]
    pub async fn mkdir(&self, id: &str, config: &OperationConfig) -> DriveResult<String> {
        let resolved = self.authorize(id, Operation::Write).await?;

        let mut target = resolved.host;
        let mut target_id = resolved.id;
        if config.prevent_name_collision && !self.resolver.is_root(&target) {
            target = self.avoid_collision(&target, true).await?;
            target_id = self.id_of(&target)?;
            self.check(&target, Operation::Write, &target_id)?;
            target = self.confine(&target, &target_id).await?;
        }

        self.fs
            .ensure_dir(&target)
            .await
            .map_err(|e| DriveError::from_io(e, format!("mkdir {}", target_id)))?;
        self.trace_op("mkdir", &target_id);

        Ok(target_id)
    }

    /// Delete a file, link or folder tree; removing a missing entry succeeds
    #[instrument(level = "debug", skip(self))]
    pub async fn remove(&self, id: &str) -> DriveResult<()> {
        let resolved = self.authorize(id, Operation::Write).await?;
        if self.resolver.is_root(&resolved.lexical) || self.resolver.is_root(&resolved.host) {
            return Err(DriveError::InvalidTarget("cannot remove the root".into()));
        }

        self.fs
            .remove(&resolved.lexical)
            .await
            .map_err(|e| DriveError::from_io(e, format!("remove {}", resolved.id)))?;
        self.trace_op("remove", &resolved.id);

        Ok(())
    }
}
