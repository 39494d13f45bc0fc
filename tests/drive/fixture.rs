/*!
 * Sandbox Fixture
 * Temporary drive root shared by the drive tests
 */

use local_drive::{Drive, Entry};
use std::path::Path;
use tempfile::TempDir;

/// Build the standard sandbox:
///
/// ```text
/// sub/deep/deep.doc   "test"
/// sub/c.jpg
/// a.txt
/// b.txt
/// ```
pub fn sandbox() -> TempDir {
    let temp = TempDir::new().unwrap();
    let root = temp.path();
    std::fs::create_dir_all(root.join("sub/deep")).unwrap();
    std::fs::write(root.join("sub/deep/deep.doc"), b"test").unwrap();
    std::fs::write(root.join("sub/c.jpg"), b"jpg").unwrap();
    std::fs::write(root.join("a.txt"), b"a").unwrap();
    std::fs::write(root.join("b.txt"), b"b").unwrap();
    temp
}

pub fn drive() -> (TempDir, Drive) {
    let temp = sandbox();
    let drive = Drive::new(temp.path()).unwrap();
    (temp, drive)
}

pub fn names(entries: &[Entry]) -> Vec<&str> {
    entries.iter().map(|e| e.name.as_str()).collect()
}

pub fn ids(entries: &[Entry]) -> Vec<&str> {
    entries.iter().map(|e| e.id.as_str()).collect()
}

/// Shape of a listing without ids, timestamps or folder sizes
pub fn shape(entries: &[Entry]) -> Vec<(String, Option<u64>, Option<Vec<String>>)> {
    entries
        .iter()
        .map(|e| {
            (
                e.name.clone(),
                (!e.is_folder()).then_some(e.size),
                e.children
                    .as_ref()
                    .map(|c| c.iter().map(|e| e.name.clone()).collect()),
            )
        })
        .collect()
}

pub fn host_exists(root: &Path, relative: &str) -> bool {
    root.join(relative).exists()
}
