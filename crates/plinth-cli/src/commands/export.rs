//! `pln export`: walk block sources and write the catalog document,
//! without touching the backend.

use plinth_config::PlinthConfig;
use plinth_schema::export;

use crate::cli::{ExportArgs, GlobalFlags};
use crate::commands::build::{BuildPaths, build_catalog, run_export};

/// Handle `pln export`.
pub fn handle(args: &ExportArgs, flags: &GlobalFlags, config: &PlinthConfig) -> anyhow::Result<()> {
    let paths = BuildPaths::resolve(&args.build, config);

    if args.stdout {
        let (catalog, _) = build_catalog(&paths.blocks_dir)?;
        println!("{}", export(&catalog).to_json()?);
        return Ok(());
    }

    run_export(&paths, flags)?;
    Ok(())
}
