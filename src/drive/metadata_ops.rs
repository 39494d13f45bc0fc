/*!
 * Metadata Operations
 * Entry info, existence checks and space usage
 */

use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use super::Drive;
use crate::core::{DriveError, DriveResult};
use crate::permissions::Operation;
use crate::vfs::{id_name, Entry, SpaceInfo};

/// Space usage of the filesystem holding the drive root, in bytes
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DriveStats {
    pub used: u64,
    pub free: u64,
}

impl From<SpaceInfo> for DriveStats {
    fn from(space: SpaceInfo) -> Self {
        Self {
            used: space.used,
            free: space.free,
        }
    }
}

impl Drive {
    /// Describe one entry without following a final symlink
    #[instrument(level = "debug", skip(self))]
    pub async fn info(&self, id: &str) -> DriveResult<Entry> {
        let resolved = self.authorize(id, Operation::Read).await?;
        self.trace_op("info", &resolved.id);

        let md = self
            .fs
            .stat(&resolved.lexical)
            .await
            .map_err(|e| DriveError::from_io(e, format!("info {}", resolved.id)))?;

        let name = match id_name(&resolved.id) {
            Some(name) => name.to_string(),
            None => self
                .root()
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default(),
        };
        Ok(Entry::from_metadata(name, resolved.id, &md))
    }

    #[instrument(level = "debug", skip(self))]
    pub async fn exists(&self, id: &str) -> DriveResult<bool> {
        let resolved = self.authorize(id, Operation::Read).await?;
        self.trace_op("exists", &resolved.id);

        match self.fs.stat(&resolved.lexical).await {
            Ok(_) => Ok(true),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(DriveError::from_io(e, format!("exists {}", resolved.id))),
        }
    }

    /// Best-effort space report; zeros when the host cannot tell
    #[instrument(level = "debug", skip(self))]
    pub async fn stats(&self) -> DriveResult<DriveStats> {
        let root = self.authorize("/", Operation::Read).await?;
        self.trace_op("stats", &root.id);

        match self.fs.space(&root.host) {
            Ok(space) => Ok(space.into()),
            Err(e) => {
                debug!(error = %e, "Space information unavailable");
                Ok(DriveStats::default())
            }
        }
    }
}
