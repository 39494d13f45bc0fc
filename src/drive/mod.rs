/*!
 * Drive Facade
 * Authorize-then-act access to one sandboxed host directory
 *
 * Every public operation resolves its virtual ids, checks the policy chain
 * and only then touches the host filesystem. The chain always starts with a
 * `ForceRootPolicy` for the drive root.
 */

mod dir_ops;
mod file_ops;
mod metadata_ops;

use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::core::{DriveConfig, DriveError, DriveResult};
use crate::listing::{filters, EntryFilter};
use crate::permissions::{CombinedPolicy, ForceRootPolicy, Operation, Policy};
use crate::vfs::{id_name, normalize_id, resolve_name, LocalFs, PathResolver};

pub use metadata_ops::DriveStats;

/// Byte stream returned by `Drive::read`
pub type ReadStream = tokio::fs::File;

/// Sandboxed drive over one host directory
#[derive(Clone)]
pub struct Drive {
    resolver: PathResolver,
    policy: CombinedPolicy,
    fs: LocalFs,
    config: DriveConfig,
    hidden: Option<EntryFilter>,
}

impl fmt::Debug for Drive {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Drive")
            .field("root", &self.resolver.root())
            .field("policy", &self.policy)
            .field("config", &self.config)
            .finish()
    }
}

/// A virtual id together with the host paths it was authorized as
///
/// `lexical` names the entry itself (a symlink stays a symlink), `host` is
/// where it resolves to. Both passed the policy chain.
#[derive(Debug, Clone)]
pub(crate) struct Resolved {
    pub id: String,
    pub lexical: PathBuf,
    pub host: PathBuf,
}

impl Resolved {
    /// Basename taken from the virtual id, so symlinked sources keep their name
    pub fn name(&self) -> Option<&str> {
        id_name(&self.id)
    }
}

impl Drive {
    /// Drive with no restriction beyond the root
    pub fn new<P: AsRef<Path>>(root: P) -> DriveResult<Self> {
        Self::with_options(root, None, DriveConfig::default())
    }

    /// Drive restricted by `policy` in addition to the root
    pub fn with_policy<P: AsRef<Path>>(root: P, policy: Arc<dyn Policy>) -> DriveResult<Self> {
        Self::with_options(root, Some(policy), DriveConfig::default())
    }

    pub fn with_options<P: AsRef<Path>>(
        root: P,
        policy: Option<Arc<dyn Policy>>,
        config: DriveConfig,
    ) -> DriveResult<Self> {
        let resolver = PathResolver::new(root)?;

        let mut chain: Vec<Arc<dyn Policy>> =
            vec![Arc::new(ForceRootPolicy::new(resolver.root()))];
        chain.extend(policy);

        let hidden = if config.hidden.is_empty() {
            None
        } else {
            Some(filters::name_in(config.hidden.iter().cloned()))
        };

        info!(
            root = %resolver.root().display(),
            policies = chain.len(),
            verbose = config.verbose,
            "Drive initialized"
        );

        Ok(Self {
            resolver,
            policy: CombinedPolicy::new(chain),
            fs: LocalFs::new(),
            config,
            hidden,
        })
    }

    pub fn root(&self) -> &Path {
        self.resolver.root()
    }

    pub fn config(&self) -> &DriveConfig {
        &self.config
    }

    pub fn policy(&self) -> &CombinedPolicy {
        &self.policy
    }

    /// Resolve an id and authorize `operation` on it
    ///
    /// The lexical path is checked before any host call, then the path is
    /// resolved through existing symlinks and checked again, so links that
    /// point outside the root are denied too.
    pub(crate) async fn authorize(&self, id: &str, operation: Operation) -> DriveResult<Resolved> {
        let lexical = self.resolver.to_host(id);
        let id = normalize_id(id);
        self.check(&lexical, operation, &id)?;

        let host = self
            .fs
            .realpath_lenient(&lexical)
            .await
            .map_err(|e| DriveError::from_io(e, format!("resolve {}", id)))?;
        if host != lexical {
            self.check(&host, operation, &id)?;
        }

        Ok(Resolved { id, lexical, host })
    }

    /// Check `operation` on an already resolved host path
    pub(crate) fn check(&self, host: &Path, operation: Operation, id: &str) -> DriveResult<()> {
        if self.policy.comply(host, operation) {
            return Ok(());
        }
        warn!(
            id = %id,
            operation = %operation,
            denied_by = self.policy.denied_by(host, operation).unwrap_or("unknown"),
            "Access denied"
        );
        Err(DriveError::AccessDenied(format!("{} {}", operation, id)))
    }

    /// Resolve a final write path through symlinks and check it again
    ///
    /// Create, copy and truncate calls follow a link at the last component,
    /// so the path they would touch must pass the chain too.
    pub(crate) async fn confine(&self, path: &Path, id: &str) -> DriveResult<PathBuf> {
        let real = self
            .fs
            .realpath_lenient(path)
            .await
            .map_err(|e| DriveError::from_io(e, format!("resolve {}", id)))?;
        if real != path {
            self.check(&real, Operation::Write, id)?;
        }
        Ok(real)
    }

    /// Virtual id of a host path that has passed the policy checks
    pub(crate) fn id_of(&self, host: &Path) -> DriveResult<String> {
        self.resolver.to_id(host)
    }

    /// Rename the last component of `target` so it does not collide
    ///
    /// A missing parent directory has no entries, so nothing collides.
    pub(crate) async fn avoid_collision(
        &self,
        target: &Path,
        is_folder: bool,
    ) -> DriveResult<PathBuf> {
        let (Some(parent), Some(name)) = (target.parent(), target.file_name()) else {
            return Ok(target.to_path_buf());
        };
        if self.resolver.is_root(target) {
            return Ok(target.to_path_buf());
        }

        let desired = name.to_string_lossy();
        let existing: ahash::HashSet<String> = match self.fs.read_dir(parent).await {
            Ok(names) => names.into_iter().collect(),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => ahash::HashSet::default(),
            Err(e) => {
                let parent_id = self.id_of(parent)?;
                return Err(DriveError::from_io(e, format!("list {}", parent_id)));
            }
        };

        let free = resolve_name(&existing, &desired, is_folder);
        if free != desired {
            debug!(desired = %desired, chosen = %free, "Avoided name collision");
        }
        Ok(parent.join(free))
    }

    /// Operation trace; raised to `info` when the drive is verbose
    pub(crate) fn trace_op(&self, operation: &'static str, detail: &str) {
        if self.config.verbose {
            info!(operation, detail, "Drive operation");
        } else {
            debug!(operation, detail, "Drive operation");
        }
    }
}

/// Validate a caller-supplied entry name: one plain path component
pub(crate) fn validate_name(name: &str) -> DriveResult<()> {
    if name.is_empty() || name == "." || name == ".." {
        return Err(DriveError::InvalidName(format!("'{}'", name)));
    }
    if name.contains('/') || name.contains('\\') || name.contains('\0') {
        return Err(DriveError::InvalidName(format!(
            "'{}' contains a path separator or null byte",
            name
        )));
    }
    Ok(())
}
