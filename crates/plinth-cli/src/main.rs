use anyhow::Context;
use clap::Parser;
use plinth_config::PlinthConfig;

mod cli;
mod commands;

#[tokio::main]
async fn main() {
    if let Err(error) = run().await {
        eprintln!("pln error: {error:#}");
        std::process::exit(1);
    }
}

async fn run() -> anyhow::Result<()> {
    let cli = cli::Cli::parse();
    init_tracing(cli.quiet, cli.verbose)?;

    let flags = cli.global_flags();
    let config = PlinthConfig::load_with_dotenv().context("failed to load configuration")?;

    match cli.command {
        cli::Commands::Build(args) => commands::build::handle(&args, &flags, &config).await,
        cli::Commands::Export(args) => commands::export::handle(&args, &flags, &config),
        cli::Commands::Sync(args) => commands::sync::handle(&args, &flags, &config).await,
        cli::Commands::Watch(args) => commands::watch::handle(&args, &flags, &config).await,
    }
}

fn init_tracing(quiet: bool, verbose: bool) -> anyhow::Result<()> {
    let level = if quiet {
        "error"
    } else if verbose {
        "debug"
    } else {
        "warn"
    };

    let filter = tracing_subscriber::EnvFilter::try_from_env("PLINTH_LOG")
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .try_init()
        .map_err(|error| anyhow::anyhow!("failed to initialize tracing subscriber: {error}"))?;

    Ok(())
}
