//! `pln watch`: re-run the build sequence when block sources change.
//!
//! A change, add, or removal of any `*.toml` under the blocks directory
//! triggers the same walk-export-sync sequence as `pln build` -- repeated
//! idempotent invocations, no new logic. Detection is a simple mtime
//! poll; the workspace carries no file-notification dependency.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime};

use plinth_config::PlinthConfig;

use crate::cli::{BuildArgs, GlobalFlags};
use crate::commands::build::{BuildPaths, run_export, run_sync};

/// Handle `pln watch`. Runs until interrupted.
pub async fn handle(
    args: &BuildArgs,
    flags: &GlobalFlags,
    config: &PlinthConfig,
) -> anyhow::Result<()> {
    let paths = BuildPaths::resolve(args, config);
    let interval = Duration::from_millis(config.build.watch_poll_ms);

    let mut snapshot = scan(&paths.blocks_dir);
    rebuild(&paths, flags, config).await;

    if !flags.quiet {
        println!("Watching {} for block changes", paths.blocks_dir.display());
    }

    loop {
        tokio::time::sleep(interval).await;
        let next = scan(&paths.blocks_dir);
        if next != snapshot {
            tracing::info!(path = %paths.blocks_dir.display(), "block sources changed; rebuilding");
            snapshot = next;
            rebuild(&paths, flags, config).await;
        }
    }
}

async fn rebuild(paths: &BuildPaths, flags: &GlobalFlags, config: &PlinthConfig) {
    match run_export(paths, flags) {
        Ok(document) => run_sync(&document, paths, flags, config).await,
        Err(error) => tracing::warn!(%error, "rebuild failed; keeping previous export"),
    }
}

/// Path → mtime snapshot of the `*.toml` files in the blocks directory.
/// A missing directory is the empty snapshot, so creating it later
/// counts as a change.
fn scan(dir: &Path) -> BTreeMap<PathBuf, SystemTime> {
    let Ok(entries) = std::fs::read_dir(dir) else {
        return BTreeMap::new();
    };

    entries
        .filter_map(Result::ok)
        .filter(|entry| entry.path().extension().is_some_and(|ext| ext == "toml"))
        .filter_map(|entry| {
            let modified = entry.metadata().ok()?.modified().ok()?;
            Some((entry.path(), modified))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scan_tracks_adds_and_removals() {
        let dir = tempfile::tempdir().unwrap();
        assert!(scan(dir.path()).is_empty());

        let file = dir.path().join("hero.toml");
        std::fs::write(&file, "id = \"Hero\"").unwrap();
        std::fs::write(dir.path().join("notes.txt"), "ignored").unwrap();

        let snapshot = scan(dir.path());
        assert_eq!(snapshot.len(), 1);
        assert!(snapshot.contains_key(&file));

        std::fs::remove_file(&file).unwrap();
        assert!(scan(dir.path()).is_empty());
    }

    #[test]
    fn missing_directory_scans_empty() {
        assert!(scan(Path::new("/nonexistent/blocks")).is_empty());
    }
}
