/*!
 * Local Filesystem Backend
 * Wraps tokio::fs for host filesystem access
 */

use std::ffi::OsString;
use std::io;
use std::path::{Path, PathBuf};

use tokio::fs;
use tokio::io::{AsyncRead, AsyncWriteExt};
use tracing::debug;

use super::types::Metadata;

/// Symlink hops followed before giving up, as the kernel's ELOOP limit
const MAX_LINK_HOPS: usize = 40;

/// Free and used bytes of the filesystem holding a path
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct SpaceInfo {
    pub used: u64,
    pub free: u64,
}

/// Host filesystem provider
///
/// Takes absolute host paths that the caller has already authorized and
/// reports plain `io::Error`s; mapping those onto drive errors (with virtual
/// ids in the message) is the caller's job.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalFs;

impl LocalFs {
    pub fn new() -> Self {
        Self
    }

    /// lstat: symlinks are described, not followed
    pub async fn stat(&self, path: &Path) -> io::Result<Metadata> {
        let md = fs::symlink_metadata(path).await?;
        Ok(Metadata::from(&md))
    }

    /// Names of the direct children of a directory, in host order
    pub async fn read_dir(&self, path: &Path) -> io::Result<Vec<String>> {
        let mut dir = fs::read_dir(path).await?;
        let mut names = Vec::new();
        while let Some(entry) = dir.next_entry().await? {
            match entry.file_name().into_string() {
                Ok(name) => names.push(name),
                Err(raw) => debug!(name = ?raw, "Skipping entry with non UTF-8 name"),
            }
        }
        Ok(names)
    }

    pub async fn open_read(&self, path: &Path) -> io::Result<fs::File> {
        fs::File::open(path).await
    }

    /// Stream `data` into `path`, creating parent directories and truncating
    pub async fn write_stream<R>(&self, path: &Path, data: &mut R) -> io::Result<u64>
    where
        R: AsyncRead + Unpin + Send + ?Sized,
    {
        self.ensure_parent(path).await?;
        let mut file = fs::File::create(path).await?;
        let written = tokio::io::copy(data, &mut file).await?;
        file.flush().await?;
        Ok(written)
    }

    /// Create (or truncate) an empty file
    pub async fn create_empty(&self, path: &Path) -> io::Result<()> {
        self.ensure_parent(path).await?;
        fs::write(path, b"").await
    }

    /// Create a directory and all missing parents
    pub async fn ensure_dir(&self, path: &Path) -> io::Result<()> {
        fs::create_dir_all(path).await
    }

    pub async fn exists(&self, path: &Path) -> io::Result<bool> {
        fs::try_exists(path).await
    }

    /// Copy a file, symlink or whole directory tree; existing files are overwritten
    pub async fn copy(&self, from: &Path, to: &Path) -> io::Result<()> {
        self.ensure_parent(to).await?;
        let md = self.stat(from).await?;
        if !md.is_dir() {
            return self.copy_node(from, to, md.is_symlink()).await;
        }

        // Explicit work stack instead of recursion, deep trees stay bounded
        let mut pending = vec![(from.to_path_buf(), to.to_path_buf())];
        while let Some((src, dst)) = pending.pop() {
            fs::create_dir_all(&dst).await?;
            let mut dir = fs::read_dir(&src).await?;
            while let Some(entry) = dir.next_entry().await? {
                let file_type = entry.file_type().await?;
                let target = dst.join(entry.file_name());
                if file_type.is_dir() {
                    pending.push((entry.path(), target));
                } else {
                    self.copy_node(&entry.path(), &target, file_type.is_symlink())
                        .await?;
                }
            }
        }
        Ok(())
    }

    /// Rename, falling back to copy + remove across devices
    pub async fn rename(&self, from: &Path, to: &Path) -> io::Result<()> {
        self.ensure_parent(to).await?;
        match fs::rename(from, to).await {
            Ok(()) => Ok(()),
            Err(e) if is_cross_device(&e) => {
                debug!(from = %from.display(), to = %to.display(), "Cross-device move, copying");
                self.copy(from, to).await?;
                self.remove(from).await
            }
            Err(e) => Err(e),
        }
    }

    /// Remove a file, symlink or directory tree; a missing path is not an error
    pub async fn remove(&self, path: &Path) -> io::Result<()> {
        let md = match self.stat(path).await {
            Ok(md) => md,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(()),
            Err(e) => return Err(e),
        };
        if md.is_dir() {
            fs::remove_dir_all(path).await
        } else {
            fs::remove_file(path).await
        }
    }

    /// Canonical path of an existing entry
    pub async fn realpath(&self, path: &Path) -> io::Result<PathBuf> {
        fs::canonicalize(path).await
    }

    /// Canonicalize the deepest existing ancestor and re-attach the rest
    ///
    /// Works for paths that do not exist yet (write and mkdir targets). The
    /// input must already be lexically clean. A dangling symlink on the way
    /// is replaced by its target, so the result names the path a create
    /// call would actually touch.
    pub async fn realpath_lenient(&self, path: &Path) -> io::Result<PathBuf> {
        let mut existing = path.to_path_buf();
        let mut missing: Vec<OsString> = Vec::new();
        let mut hops = 0usize;

        loop {
            match fs::canonicalize(&existing).await {
                Ok(mut canonical) => {
                    for name in missing.iter().rev() {
                        canonical.push(name);
                    }
                    return Ok(canonical);
                }
                Err(e) if e.kind() == io::ErrorKind::NotFound => {
                    if let Some(target) = self.dangling_target(&existing).await? {
                        hops += 1;
                        if hops > MAX_LINK_HOPS {
                            return Err(io::Error::new(
                                io::ErrorKind::Other,
                                "too many levels of symbolic links",
                            ));
                        }
                        existing = target;
                        continue;
                    }
                    match (existing.file_name(), existing.parent()) {
                        (Some(name), Some(parent)) => {
                            missing.push(name.to_os_string());
                            existing = parent.to_path_buf();
                        }
                        _ => return Ok(path.to_path_buf()),
                    }
                }
                Err(e) => return Err(e),
            }
        }
    }

    /// Where a dangling symlink at `path` points, `None` if `path` is no link
    async fn dangling_target(&self, path: &Path) -> io::Result<Option<PathBuf>> {
        match fs::symlink_metadata(path).await {
            Ok(md) if md.file_type().is_symlink() => {}
            Ok(_) => return Ok(None),
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e),
        }

        let link = fs::read_link(path).await?;
        let base = match path.parent() {
            Some(parent) => fs::canonicalize(parent).await?,
            None => PathBuf::new(),
        };
        Ok(Some(path_clean::clean(base.join(link))))
    }

    /// Best-effort space report for the filesystem holding `path`
    #[cfg(unix)]
    #[allow(clippy::unnecessary_cast)]
    pub fn space(&self, path: &Path) -> io::Result<SpaceInfo> {
        let st = nix::sys::statvfs::statvfs(path).map_err(io::Error::from)?;
        let fragment = st.fragment_size() as u64;
        let total = st.blocks() as u64 * fragment;
        let free = st.blocks_available() as u64 * fragment;
        let used = total.saturating_sub(st.blocks_free() as u64 * fragment);
        Ok(SpaceInfo { used, free })
    }

    #[cfg(not(unix))]
    pub fn space(&self, _path: &Path) -> io::Result<SpaceInfo> {
        Ok(SpaceInfo::default())
    }

    async fn ensure_parent(&self, path: &Path) -> io::Result<()> {
        match path.parent() {
            Some(parent) => fs::create_dir_all(parent).await,
            None => Ok(()),
        }
    }

    async fn copy_node(&self, from: &Path, to: &Path, is_symlink: bool) -> io::Result<()> {
        #[cfg(unix)]
        if is_symlink {
            let target = fs::read_link(from).await?;
            if let Err(e) = fs::remove_file(to).await {
                if e.kind() != io::ErrorKind::NotFound {
                    return Err(e);
                }
            }
            return fs::symlink(target, to).await;
        }

        #[cfg(not(unix))]
        let _ = is_symlink;

        fs::copy(from, to).await.map(|_| ())
    }
}

#[cfg(unix)]
fn is_cross_device(e: &io::Error) -> bool {
    e.raw_os_error() == Some(nix::errno::Errno::EXDEV as i32)
}

#[cfg(not(unix))]
fn is_cross_device(_e: &io::Error) -> bool {
    false
}
