// src/main.rs — distill entry point

use clap::Parser;

use distill::cli::{run, Cli, Commands};
use distill::infra::config::Config;
use distill::infra::{logger, paths};
use distill::provider::resolver;

#[tokio::main]
async fn main() {
    // Initialize logging (respects RUST_LOG)
    logger::init_logging("warn");

    if let Err(e) = run_cli().await {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}

async fn run_cli() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Load config (falls back to defaults if no config.toml)
    let config = if let Some(ref path) = cli.config {
        Config::load_from(std::path::Path::new(path))?
    } else {
        Config::load()?
    };

    paths::ensure_dirs()?;

    // Subcommands that don't need a provider
    if let Some(Commands::Memory { clear }) = &cli.command {
        return distill::cli::memory::run_memory(&config, *clear);
    }

    // The two interactive prompts happen before the provider is touched.
    let (query, save_to_notepad) = run::gather_inputs(&cli)?;

    let provider = resolver::discover(&config.provider)?;
    tracing::debug!(provider = provider.name(), "provider resolved");

    run::run_session(
        &query,
        provider,
        &config,
        cli.iterations,
        cli.model.as_deref(),
        save_to_notepad,
        cli.quiet,
    )
    .await
}
