//! `pln build`: walk block sources, export the catalog, sync the backend.
//!
//! The walk-export part always runs to completion; a sync failure is
//! reported but never fails the command, because the local export is
//! already authoritative.

use std::path::{Path, PathBuf};

use anyhow::Context;
use plinth_config::PlinthConfig;
use plinth_schema::source::LoadReport;
use plinth_schema::{CatalogDocument, SchemaCatalog, builtins, export, source};
use plinth_sync::{SyncClient, SyncReport, SyncState};

use crate::cli::{BuildArgs, GlobalFlags};

/// Resolved filesystem inputs for one build run.
pub(crate) struct BuildPaths {
    pub blocks_dir: PathBuf,
    pub out_file: PathBuf,
}

impl BuildPaths {
    pub fn resolve(args: &BuildArgs, config: &PlinthConfig) -> Self {
        Self {
            blocks_dir: args
                .blocks_dir
                .clone()
                .unwrap_or_else(|| PathBuf::from(&config.build.blocks_dir)),
            out_file: args
                .out
                .clone()
                .unwrap_or_else(|| PathBuf::from(&config.build.out_file)),
        }
    }

    /// Where the last-acknowledged document lives, next to the export.
    pub fn state_file(&self) -> PathBuf {
        self.out_file.with_extension("sync.json")
    }
}

/// Handle `pln build`.
pub async fn handle(
    args: &BuildArgs,
    flags: &GlobalFlags,
    config: &PlinthConfig,
) -> anyhow::Result<()> {
    let paths = BuildPaths::resolve(args, config);
    let document = run_export(&paths, flags)?;
    run_sync(&document, &paths, flags, config).await;
    Ok(())
}

/// The walk-and-export half, shared with `pln export` and `pln watch`.
pub(crate) fn run_export(paths: &BuildPaths, flags: &GlobalFlags) -> anyhow::Result<CatalogDocument> {
    let (catalog, report) = build_catalog(&paths.blocks_dir)?;
    let document = export(&catalog);
    write_document(&document, &paths.out_file)?;

    if !flags.quiet {
        println!(
            "Catalog written to {} ({} block types)",
            paths.out_file.display(),
            document.schemas.len()
        );
        for (path, reason) in &report.skipped {
            println!("  skipped {}: {reason}", path.display());
        }
    }

    Ok(document)
}

/// The sync half, shared with `pln watch`. Failures are reported, never
/// propagated.
pub(crate) async fn run_sync(
    document: &CatalogDocument,
    paths: &BuildPaths,
    flags: &GlobalFlags,
    config: &PlinthConfig,
) {
    let client = SyncClient::new(&config.sync.backend_url, config.sync.timeout());
    let state_file = paths.state_file();
    let mut state = SyncState::load(&state_file);

    let report = client.sync(document, &mut state).await;
    if let Err(error) = state.save(&state_file) {
        tracing::warn!(path = %state_file.display(), %error, "could not persist sync state");
    }

    print_sync_report(&report, flags);
}

/// Register builtins, then walk the blocks directory. A missing
/// directory just means an all-builtin catalog.
pub(crate) fn build_catalog(blocks_dir: &Path) -> anyhow::Result<(SchemaCatalog, LoadReport)> {
    let catalog = SchemaCatalog::new();
    builtins::register_builtins(&catalog).context("failed to register builtin block schemas")?;

    let report = if blocks_dir.is_dir() {
        source::load_dir(&catalog, blocks_dir).with_context(|| {
            format!("failed to walk block sources in {}", blocks_dir.display())
        })?
    } else {
        tracing::debug!(path = %blocks_dir.display(), "no blocks directory; using builtins only");
        LoadReport::default()
    };

    Ok((catalog, report))
}

pub(crate) fn write_document(document: &CatalogDocument, out_file: &Path) -> anyhow::Result<()> {
    if let Some(parent) = out_file.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("failed to create {}", parent.display()))?;
        }
    }
    std::fs::write(out_file, document.to_json()?)
        .with_context(|| format!("failed to write {}", out_file.display()))
}

pub(crate) fn print_sync_report(report: &SyncReport, flags: &GlobalFlags) {
    if flags.quiet {
        return;
    }
    println!(
        "Sync: {} updated, {} unchanged, {} failed",
        report.updated(),
        report.unchanged(),
        report.failed()
    );
    for (id, outcome) in &report.outcomes {
        if !matches!(outcome, plinth_sync::SyncOutcome::Unchanged) {
            println!("  {id}: {outcome}");
        }
    }
    if let Some(message) = &report.remote_message {
        println!("  backend: {message}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const HERO: &str = r#"
id = "Hero"
renderer = "hero"

[shape]
type = "object"

[shape.fields.title]
type = "string"
default = "Welcome"
"#;

    #[test]
    fn build_catalog_combines_builtins_and_sources() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("hero.toml"), HERO).unwrap();

        let (catalog, report) = build_catalog(dir.path()).unwrap();
        assert_eq!(report.registered, vec!["Hero".to_string()]);
        assert_eq!(
            catalog.ids(),
            vec![
                "Content".to_string(),
                "Hero".to_string(),
                "WelcomeBanner".to_string()
            ]
        );
    }

    #[test]
    fn missing_blocks_dir_falls_back_to_builtins() {
        let (catalog, report) = build_catalog(Path::new("/nonexistent/blocks")).unwrap();
        assert!(report.registered.is_empty());
        assert_eq!(catalog.ids().len(), 2);
    }

    #[test]
    fn write_document_creates_parent_dirs() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("storage").join("sections.json");

        let (catalog, _) = build_catalog(Path::new("/nonexistent")).unwrap();
        let document = export(&catalog);
        write_document(&document, &out).unwrap();

        let text = std::fs::read_to_string(&out).unwrap();
        let back = CatalogDocument::from_json(&text).unwrap();
        assert_eq!(back, document);
    }

    #[test]
    fn state_file_sits_next_to_the_export() {
        let paths = BuildPaths {
            blocks_dir: PathBuf::from("blocks"),
            out_file: PathBuf::from("storage/sections.json"),
        };
        assert_eq!(paths.state_file(), PathBuf::from("storage/sections.sync.json"));
    }
}
