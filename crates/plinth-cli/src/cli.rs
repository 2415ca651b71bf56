use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

/// Top-level CLI parser for the `pln` binary.
#[derive(Debug, Parser)]
#[command(name = "pln", version, about = "Plinth - block catalog build and sync")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Quiet mode (suppress non-essential output)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Verbose mode (debug logging)
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

impl Cli {
    /// Extract ergonomic global flags struct for command handlers.
    #[must_use]
    pub const fn global_flags(&self) -> GlobalFlags {
        GlobalFlags {
            quiet: self.quiet,
            verbose: self.verbose,
        }
    }
}

/// Global flags available before or after subcommands.
#[derive(Clone, Copy, Debug)]
pub struct GlobalFlags {
    pub quiet: bool,
    pub verbose: bool,
}

/// Top-level command tree.
#[derive(Clone, Debug, Subcommand)]
pub enum Commands {
    /// Walk block sources, export the catalog, and sync it to the backend.
    Build(BuildArgs),
    /// Walk block sources and write the catalog document without syncing.
    Export(ExportArgs),
    /// Re-send the last exported catalog document to the backend.
    Sync(SyncArgs),
    /// Re-run the build sequence whenever a block source changes.
    Watch(BuildArgs),
}

/// Arguments shared by `pln build` and `pln watch`.
#[derive(Clone, Debug, Args)]
pub struct BuildArgs {
    /// Directory of TOML block definitions (defaults to config).
    #[arg(long)]
    pub blocks_dir: Option<PathBuf>,

    /// Output path for the catalog document (defaults to config).
    #[arg(long)]
    pub out: Option<PathBuf>,
}

/// Arguments for `pln export`.
#[derive(Clone, Debug, Args)]
pub struct ExportArgs {
    #[command(flatten)]
    pub build: BuildArgs,

    /// Print the document to stdout instead of writing it.
    #[arg(long)]
    pub stdout: bool,
}

/// Arguments for `pln sync`.
#[derive(Clone, Debug, Args)]
pub struct SyncArgs {
    /// Catalog document to send (defaults to the configured out file).
    #[arg(long)]
    pub file: Option<PathBuf>,
}
