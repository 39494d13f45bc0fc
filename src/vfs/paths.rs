/*!
 * Path Resolution
 * Conversion between virtual ids and host paths under a fixed root
 */

use crate::core::{DriveError, DriveResult};
use std::path::{Component, Path, PathBuf};

/// Maps virtual ids (`/sub/a.txt`) onto host paths under one root and back
///
/// The resolver is purely lexical: it never touches the filesystem after
/// construction. Whether a produced path is inside the root is the job of
/// `ForceRootPolicy`; `to_host` deliberately lets `..` climb above the root so
/// that such ids are denied rather than silently clamped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathResolver {
    root: PathBuf,
}

impl PathResolver {
    /// Validate and normalize the drive root
    ///
    /// The root must be absolute (`/...` or `C:\...`). A trailing separator is
    /// dropped and `.`/`..` are collapsed; an existing root is additionally
    /// resolved through symlinks so canonical child paths share its prefix.
    pub fn new<P: AsRef<Path>>(root: P) -> DriveResult<Self> {
        let root = root.as_ref();
        if root.as_os_str().is_empty() {
            return Err(DriveError::InvalidRoot("root path is empty".into()));
        }
        if !root.is_absolute() {
            return Err(DriveError::InvalidRoot(format!(
                "expected a full path from the drive root, got {}",
                root.display()
            )));
        }

        let cleaned = PathBuf::from(path_clean::clean(root));
        let root = std::fs::canonicalize(&cleaned).unwrap_or(cleaned);
        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Join a virtual id onto the root and collapse `.`/`..` lexically
    pub fn to_host(&self, id: &str) -> PathBuf {
        let mut path = self.root.clone();
        for segment in id.split('/').filter(|s| !s.is_empty()) {
            path.push(segment);
        }
        PathBuf::from(path_clean::clean(&path))
    }

    /// Strip the root from a host path, producing a `/`-separated id
    pub fn to_id(&self, host: &Path) -> DriveResult<String> {
        let relative = host
            .strip_prefix(&self.root)
            .map_err(|_| DriveError::AccessDenied("path is outside of the drive root".into()))?;

        let mut id = String::with_capacity(relative.as_os_str().len() + 1);
        for component in relative.components() {
            match component {
                Component::Normal(name) => {
                    let name = name.to_str().ok_or_else(|| {
                        DriveError::InvalidName(format!(
                            "invalid UTF-8 in {}",
                            name.to_string_lossy()
                        ))
                    })?;
                    id.push('/');
                    id.push_str(name);
                }
                Component::CurDir => {}
                _ => {
                    return Err(DriveError::AccessDenied(
                        "path is outside of the drive root".into(),
                    ))
                }
            }
        }

        if id.is_empty() {
            id.push('/');
        }
        Ok(id)
    }

    pub fn is_root(&self, host: &Path) -> bool {
        host == self.root
    }
}

/// Normal form of a virtual id: leading `/`, no empty, `.` or `..` segments
///
/// `..` at the top is dropped, so this is only the inverse of
/// `to_id(to_host(id))` for ids that stay inside the root.
pub fn normalize_id(id: &str) -> String {
    let mut parts: Vec<&str> = Vec::new();
    for segment in id.split('/') {
        match segment {
            "" | "." => {}
            ".." => {
                parts.pop();
            }
            name => parts.push(name),
        }
    }
    format!("/{}", parts.join("/"))
}

/// Last segment of a virtual id, `None` for the root
pub fn id_name(id: &str) -> Option<&str> {
    id.rsplit('/').find(|s| !s.is_empty())
}
