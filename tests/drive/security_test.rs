/*!
 * Security Tests
 * Root confinement and policy enforcement
 */

use crate::fixture::{drive, host_exists, names, sandbox};
use local_drive::permissions::{AllowPolicy, DenyPolicy, ReadOnlyPolicy};
use local_drive::{Drive, DriveError, ListConfig, Operation, OperationConfig, Policy};
use pretty_assertions::assert_eq;
use std::path::Path;
use std::sync::Arc;

fn denied<T: std::fmt::Debug>(result: Result<T, DriveError>) -> bool {
    matches!(result, Err(DriveError::AccessDenied(_)))
}

#[derive(Debug)]
struct NoSecrets;

impl Policy for NoSecrets {
    fn comply(&self, path: &Path, _operation: Operation) -> bool {
        !path.to_string_lossy().contains("secret")
    }

    fn name(&self) -> &str {
        "no_secrets"
    }
}

#[tokio::test]
async fn test_parent_escape_denied_for_every_operation() {
    let temp = sandbox();
    let drive = Drive::with_policy(temp.path(), Arc::new(AllowPolicy)).unwrap();
    let list = ListConfig::new();
    let config = OperationConfig::default();
    let escape = "../../etc";

    assert!(denied(drive.list(escape, &list).await));
    assert!(denied(drive.list("../", &list).await));
    assert!(denied(drive.search(escape, "passwd", &list).await));
    assert!(denied(drive.info(escape).await));
    assert!(denied(drive.exists(escape).await));
    assert!(denied(drive.read("../../etc/passwd").await));
    assert!(denied(drive.write("../escape.txt", &mut &b"x"[..], &config).await));
    assert!(denied(drive.mkdir("../escape", &config).await));
    assert!(denied(drive.make(escape, "x", false, &config).await));
    assert!(denied(drive.copy(escape, "/", &config).await));
    assert!(denied(drive.copy("/a.txt", "../", &config).await));
    assert!(denied(drive.move_to("/a.txt", "../", &config).await));
    assert!(denied(drive.move_to(escape, "/", &config).await));
    assert!(denied(drive.remove("../").await));

    let outside = temp.path().parent().unwrap();
    assert!(!outside.join("escape.txt").exists());
    assert!(!outside.join("escape").exists());
    assert!(host_exists(temp.path(), "a.txt"));
}

#[tokio::test]
async fn test_inner_parent_segments_stay_allowed() {
    let (_temp, drive) = drive();
    assert!(drive.exists("/sub/../a.txt").await.unwrap());
    assert_eq!(drive.info("sub/deep/..").await.unwrap().id, "/sub");
}

#[tokio::test]
async fn test_relative_root_is_rejected() {
    assert!(matches!(Drive::new("./data"), Err(DriveError::InvalidRoot(_))));
    assert!(matches!(Drive::new(""), Err(DriveError::InvalidRoot(_))));
}

#[tokio::test]
async fn test_root_is_normalized() {
    let temp = sandbox();
    let root = format!("{}/sub/../", temp.path().display());
    let drive = Drive::new(root).unwrap();

    assert!(drive.exists("sub").await.unwrap());
    assert_eq!(drive.root(), temp.path().canonicalize().unwrap());
}

#[tokio::test]
async fn test_read_only_policy() {
    let temp = sandbox();
    let drive = Drive::with_policy(temp.path(), Arc::new(ReadOnlyPolicy)).unwrap();
    let config = OperationConfig::default();

    assert_eq!(
        names(&drive.list("/", &ListConfig::new()).await.unwrap()),
        vec!["sub", "a.txt", "b.txt"]
    );
    assert!(drive.read("/a.txt").await.is_ok());

    assert!(denied(drive.write("/new.txt", &mut &b"x"[..], &config).await));
    assert!(denied(drive.mkdir("/new", &config).await));
    assert!(denied(drive.make("/", "new", true, &config).await));
    assert!(denied(drive.copy("/a.txt", "/sub", &config).await));
    assert!(denied(drive.move_to("/a.txt", "/sub", &config).await));
    assert!(denied(drive.remove("/a.txt").await));

    assert!(!host_exists(temp.path(), "new.txt"));
    assert!(!host_exists(temp.path(), "new"));
    assert!(!host_exists(temp.path(), "sub/a.txt"));
    assert!(host_exists(temp.path(), "a.txt"));
}

#[tokio::test]
async fn test_deny_policy() {
    let temp = sandbox();
    let drive = Drive::with_policy(temp.path(), Arc::new(DenyPolicy)).unwrap();

    assert!(denied(drive.list("/", &ListConfig::new()).await));
    assert!(denied(drive.exists("/a.txt").await));
    assert!(denied(drive.stats().await));
}

#[tokio::test]
async fn test_custom_policy() {
    let temp = sandbox();
    std::fs::write(temp.path().join("secret.txt"), b"s").unwrap();
    let drive = Drive::with_policy(temp.path(), Arc::new(NoSecrets)).unwrap();

    assert!(denied(drive.info("/secret.txt").await));
    assert!(denied(drive.copy("/a.txt", "/secret.txt", &OperationConfig::default()).await));
    assert!(drive.info("/a.txt").await.is_ok());
    assert_eq!(
        drive.policy().denied_by(&drive.root().join("secret.txt"), Operation::Read),
        Some("no_secrets")
    );
}

#[cfg(unix)]
#[tokio::test]
async fn test_symlink_escape_is_denied() {
    let temp = sandbox();
    let outside = tempfile::TempDir::new().unwrap();
    std::fs::write(outside.path().join("x.txt"), b"outside").unwrap();
    std::os::unix::fs::symlink(outside.path(), temp.path().join("link")).unwrap();

    let drive = Drive::new(temp.path()).unwrap();
    let config = OperationConfig::default();

    assert!(denied(drive.read("/link/x.txt").await));
    assert!(denied(drive.list("/link", &ListConfig::new()).await));
    assert!(denied(drive.write("/link/new.txt", &mut &b"x"[..], &config).await));
    assert!(denied(drive.remove("/link").await));
    assert!(!outside.path().join("new.txt").exists());

    // the link itself is listed, never followed
    let data = drive
        .list("/", &ListConfig::new().sub_folders(true))
        .await
        .unwrap();
    assert!(data.iter().any(|e| e.id == "/link" && !e.is_folder()));
    assert!(data.iter().all(|e| !e.id.starts_with("/link/")));
}

#[cfg(unix)]
#[tokio::test]
async fn test_final_component_link_is_not_written_through() {
    let temp = sandbox();
    let outside = tempfile::TempDir::new().unwrap();
    let victim = outside.path().join("victim.txt");
    std::fs::write(&victim, b"outside").unwrap();
    std::os::unix::fs::symlink(&victim, temp.path().join("out")).unwrap();
    std::os::unix::fs::symlink(&victim, temp.path().join("c.jpg")).unwrap();

    let drive = Drive::new(temp.path()).unwrap();
    let config = OperationConfig::default();

    assert!(denied(drive.make("/", "out", false, &config).await));
    assert!(denied(drive.copy("/sub/c.jpg", "/", &config).await));
    assert!(denied(drive.copy("/a.txt", "/out", &config).await));
    assert!(denied(drive.move_to("/a.txt", "/out", &config).await));
    assert!(denied(drive.write("/out", &mut &b"x"[..], &config).await));

    assert_eq!(std::fs::read(&victim).unwrap(), b"outside");
    assert!(host_exists(temp.path(), "a.txt"));
    assert!(host_exists(temp.path(), "sub/c.jpg"));
}

#[cfg(unix)]
#[tokio::test]
async fn test_dangling_link_is_not_created_through() {
    let temp = sandbox();
    let outside = tempfile::TempDir::new().unwrap();
    let planted = outside.path().join("planted.txt");
    std::os::unix::fs::symlink(&planted, temp.path().join("dang")).unwrap();
    std::os::unix::fs::symlink(outside.path().join("newdir"), temp.path().join("ddir")).unwrap();

    let drive = Drive::new(temp.path()).unwrap();
    let config = OperationConfig::default();

    assert!(denied(drive.write("/dang", &mut &b"x"[..], &config).await));
    assert!(denied(drive.make("/", "dang", false, &config).await));
    assert!(denied(drive.make("/", "dang", true, &config).await));
    assert!(denied(drive.mkdir("/dang", &config).await));
    assert!(denied(drive.copy("/a.txt", "/dang", &config).await));
    assert!(denied(drive.move_to("/a.txt", "/dang", &config).await));
    assert!(denied(drive.write("/ddir/x.txt", &mut &b"x"[..], &config).await));
    assert!(denied(drive.mkdir("/ddir/inner", &config).await));

    assert!(!planted.exists());
    assert!(!outside.path().join("newdir").exists());
    assert!(host_exists(temp.path(), "a.txt"));
}

#[cfg(unix)]
#[tokio::test]
async fn test_links_inside_the_root_are_followed() {
    let temp = sandbox();
    std::os::unix::fs::symlink(temp.path().join("b.txt"), temp.path().join("to_b")).unwrap();
    std::os::unix::fs::symlink(temp.path().join("sub/new.txt"), temp.path().join("to_new"))
        .unwrap();

    let drive = Drive::new(temp.path()).unwrap();
    let config = OperationConfig::default();

    drive.copy("/a.txt", "/to_b", &config).await.unwrap();
    assert_eq!(std::fs::read(temp.path().join("b.txt")).unwrap(), b"a");

    drive.write("/to_new", &mut &b"new"[..], &config).await.unwrap();
    assert_eq!(std::fs::read(temp.path().join("sub/new.txt")).unwrap(), b"new");
}

#[tokio::test]
async fn test_denial_serializes() {
    let (_temp, drive) = drive();
    let err = drive.info("../../etc").await.unwrap_err();

    let json = serde_json::to_value(&err).unwrap();
    assert_eq!(json["error"], "access_denied");
    assert_eq!(json["details"], "read /etc");
}
