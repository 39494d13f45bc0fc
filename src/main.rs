/*!
 * Drive Binary
 * Opens a drive from the environment and prints a listing as JSON
 */

use anyhow::{anyhow, Context, Result};
use local_drive::monitoring::init_tracing;
use local_drive::{Drive, DriveConfig, ListConfig, PolicyKind};
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();

    let root = std::env::var("DRIVE_ROOT").context("DRIVE_ROOT must name the drive root")?;
    let policy: PolicyKind = std::env::var("DRIVE_POLICY")
        .unwrap_or_default()
        .parse()
        .map_err(|e| anyhow!("invalid DRIVE_POLICY: {}", e))?;
    let config = DriveConfig::from_env();

    let drive = Drive::with_options(&root, Some(policy.into_policy()), config)
        .with_context(|| format!("failed to open drive at {}", root))?;
    info!(root = %drive.root().display(), policy = %policy, "Drive ready");

    let stats = drive.stats().await?;
    info!(used = stats.used, free = stats.free, "Drive space");

    let id = std::env::var("DRIVE_LIST").unwrap_or_else(|_| "/".to_string());
    let recursive = std::env::var("DRIVE_RECURSIVE")
        .map(|v| v == "1" || v.eq_ignore_ascii_case("true"))
        .unwrap_or(false);
    let listing = drive
        .list(&id, &ListConfig::new().sub_folders(recursive).nested(recursive))
        .await
        .with_context(|| format!("failed to list {}", id))?;

    println!("{}", serde_json::to_string_pretty(&listing)?);
    Ok(())
}
