//! `pln sync`: re-send the last exported catalog document.

use anyhow::Context;
use plinth_config::PlinthConfig;
use plinth_schema::CatalogDocument;

use crate::cli::{BuildArgs, GlobalFlags, SyncArgs};
use crate::commands::build::{BuildPaths, run_sync};

/// Handle `pln sync`.
pub async fn handle(
    args: &SyncArgs,
    flags: &GlobalFlags,
    config: &PlinthConfig,
) -> anyhow::Result<()> {
    let paths = BuildPaths::resolve(
        &BuildArgs {
            blocks_dir: None,
            out: args.file.clone(),
        },
        config,
    );

    let text = std::fs::read_to_string(&paths.out_file).with_context(|| {
        format!(
            "no catalog document at {} (run `pln export` first)",
            paths.out_file.display()
        )
    })?;
    let document = CatalogDocument::from_json(&text)?;

    run_sync(&document, &paths, flags, config).await;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn missing_document_is_a_hard_error() {
        let args = SyncArgs {
            file: Some(PathBuf::from("/nonexistent/sections.json")),
        };
        let flags = GlobalFlags {
            quiet: true,
            verbose: false,
        };
        let config = PlinthConfig::default();

        let result = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap()
            .block_on(handle(&args, &flags, &config));
        assert!(result.is_err());
    }
}
