/*!
 * Operation Tests
 * Read, write, copy, move and remove through the drive facade
 */

use crate::fixture::{drive, host_exists, names, shape};
use local_drive::{DriveError, EntryKind, ListConfig, OperationConfig};
use pretty_assertions::assert_eq;
use tokio::io::AsyncReadExt;

fn recursive() -> ListConfig {
    ListConfig::new().sub_folders(true).nested(true)
}

#[tokio::test]
async fn test_exists() {
    let (_temp, drive) = drive();
    assert!(drive.exists("/sub").await.unwrap());
    assert!(!drive.exists("/sub2").await.unwrap());
}

#[tokio::test]
async fn test_info() {
    let (_temp, drive) = drive();

    let info = drive.info("/sub").await.unwrap();
    assert_eq!(info.name, "sub");
    assert_eq!(info.kind, EntryKind::Folder);

    let info = drive.info("/a.txt").await.unwrap();
    assert_eq!(info.name, "a.txt");
    assert_eq!(info.kind, EntryKind::Text);
    assert_eq!(info.size, 1);
}

#[tokio::test]
async fn test_mkdir() {
    let (temp, drive) = drive();
    let config = OperationConfig::default();

    let id = drive.mkdir("/alfa/123/a", &config).await.unwrap();
    assert_eq!(id, "/alfa/123/a");
    assert!(drive.exists("/alfa/123/a").await.unwrap());

    // existing folders are kept
    assert_eq!(drive.mkdir("/alfa", &config).await.unwrap(), "/alfa");
    assert_eq!(
        drive
            .mkdir("/alfa", &OperationConfig::prevent_collision())
            .await
            .unwrap(),
        "/alfa(1)"
    );

    drive.remove("/alfa").await.unwrap();
    assert!(!host_exists(temp.path(), "alfa"));
}

#[tokio::test]
async fn test_copy_file() {
    let (temp, drive) = drive();
    let config = OperationConfig::default();

    let id = drive
        .copy("/sub/deep/deep.doc", "/sub/deep/copy.doc", &config)
        .await
        .unwrap();
    assert_eq!(id, "/sub/deep/copy.doc");
    assert!(host_exists(temp.path(), "sub/deep/copy.doc"));

    let id = drive.copy("/sub/deep/deep.doc", "/sub", &config).await.unwrap();
    assert_eq!(id, "/sub/deep.doc");
    std::fs::remove_file(temp.path().join("sub/deep.doc")).unwrap();

    let id = drive.copy("/sub/deep/deep.doc", "/sub/", &config).await.unwrap();
    assert_eq!(id, "/sub/deep.doc");
    assert_eq!(
        std::fs::read_to_string(temp.path().join("sub/deep.doc")).unwrap(),
        "test"
    );
    assert!(host_exists(temp.path(), "sub/deep/deep.doc"));
}

#[tokio::test]
async fn test_copy_with_collision_avoidance() {
    let (_temp, drive) = drive();
    let config = OperationConfig::prevent_collision();

    let first = drive.copy("/a.txt", "/", &config).await.unwrap();
    let second = drive.copy("/a.txt", "/", &config).await.unwrap();
    assert_eq!(first, "/a(1).txt");
    assert_eq!(second, "/a(2).txt");
}

#[tokio::test]
async fn test_copy_folder() {
    let (_temp, drive) = drive();
    let config = OperationConfig::default();

    assert_eq!(drive.copy("/sub", "/sub2", &config).await.unwrap(), "/sub2");
    let original = drive.list("/sub", &recursive()).await.unwrap();
    let copied = drive.list("/sub2", &recursive()).await.unwrap();
    assert_eq!(shape(&original), shape(&copied));

    assert_eq!(
        drive.copy("/sub", "/sub2/", &config).await.unwrap(),
        "/sub2/sub"
    );
    let nested = drive.list("/sub2/sub", &recursive()).await.unwrap();
    assert_eq!(shape(&original), shape(&nested));
}

#[tokio::test]
async fn test_move_file() {
    let (temp, drive) = drive();
    let id = drive
        .move_to(
            "/sub/deep/deep.doc",
            "/sub/deep/copy.doc",
            &OperationConfig::default(),
        )
        .await
        .unwrap();

    assert_eq!(id, "/sub/deep/copy.doc");
    assert!(!host_exists(temp.path(), "sub/deep/deep.doc"));
    assert!(host_exists(temp.path(), "sub/deep/copy.doc"));
}

#[tokio::test]
async fn test_move_folder() {
    let (temp, drive) = drive();
    let config = OperationConfig::default();
    let original = drive.list("/sub", &recursive()).await.unwrap();

    drive.copy("/sub", "/sub3", &config).await.unwrap();
    assert_eq!(drive.move_to("/sub3", "/sub2", &config).await.unwrap(), "/sub2");
    let moved = drive.list("/sub2", &recursive()).await.unwrap();
    assert_eq!(shape(&original), shape(&moved));
    assert!(!host_exists(temp.path(), "sub3"));

    assert_eq!(
        drive.move_to("/sub2", "/sub/deep", &config).await.unwrap(),
        "/sub/deep/sub2"
    );
    let nested = drive.list("/sub/deep/sub2", &recursive()).await.unwrap();
    assert_eq!(shape(&original), shape(&nested));
    assert!(!host_exists(temp.path(), "sub2"));
}

#[tokio::test]
async fn test_move_root_is_invalid() {
    let (_temp, drive) = drive();
    assert!(matches!(
        drive.move_to("/", "/sub", &OperationConfig::default()).await,
        Err(DriveError::InvalidTarget(_))
    ));
}

#[tokio::test]
async fn test_remove() {
    let (temp, drive) = drive();
    std::fs::write(temp.path().join("sub/deep/copy.doc"), b"test").unwrap();

    drive.remove("/sub/deep/copy.doc").await.unwrap();
    assert!(!host_exists(temp.path(), "sub/deep/copy.doc"));
    assert!(!drive.exists("/sub/deep/copy.doc").await.unwrap());

    drive.remove("/sub").await.unwrap();
    assert!(!drive.exists("/sub").await.unwrap());
    assert_eq!(
        names(&drive.list("/", &ListConfig::new()).await.unwrap()),
        vec!["a.txt", "b.txt"]
    );
}

#[tokio::test]
async fn test_read() {
    let (_temp, drive) = drive();
    let mut stream = drive.read("/sub/deep/deep.doc").await.unwrap();
    let mut text = String::new();
    stream.read_to_string(&mut text).await.unwrap();
    assert_eq!(text, "test");
}

#[tokio::test]
async fn test_write_from_read_stream() {
    let (temp, drive) = drive();
    let mut data = drive.read("/sub/deep/deep.doc").await.unwrap();

    let id = drive
        .write("/sub/deep/copy.doc", &mut data, &OperationConfig::default())
        .await
        .unwrap();
    assert_eq!(id, "/sub/deep/copy.doc");
    assert_eq!(
        std::fs::read_to_string(temp.path().join("sub/deep/copy.doc")).unwrap(),
        "test"
    );
}

#[tokio::test]
async fn test_write_root_is_invalid() {
    let (_temp, drive) = drive();
    assert!(matches!(
        drive
            .write("/", &mut &b"x"[..], &OperationConfig::default())
            .await,
        Err(DriveError::InvalidTarget(_))
    ));
}

#[tokio::test]
async fn test_make() {
    let (temp, drive) = drive();
    let config = OperationConfig::prevent_collision();

    assert_eq!(drive.make("/sub", "c.jpg", false, &config).await.unwrap(), "/sub/c(1).jpg");
    assert_eq!(drive.make("/sub", "deep", true, &config).await.unwrap(), "/sub/deep(1)");
    assert_eq!(
        std::fs::metadata(temp.path().join("sub/c(1).jpg")).unwrap().len(),
        0
    );
    assert!(temp.path().join("sub/deep(1)").is_dir());
}

#[tokio::test]
async fn test_stats_is_best_effort() {
    let (_temp, drive) = drive();
    let stats = drive.stats().await.unwrap();
    let json = serde_json::to_value(stats).unwrap();
    assert!(json["used"].is_u64());
    assert!(json["free"].is_u64());
}
