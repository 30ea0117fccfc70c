mod app;
mod cli;
mod config;
mod dialog;
mod table;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use cli::{Cli, Commands};
use config::WibConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::from_filename(".env.local").ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = WibConfig::load()?.with_env_overrides();

    match &cli.command {
        Commands::List { query } => app::list(&config, &cli.project, query.clone()).await?,
        Commands::Branch { ids, .. } => {
            let checkout = cli.command.checkout(config.checkout);
            let outcome = app::branch(&config, &cli.project, ids, checkout).await?;
            println!("{outcome}");
            if !outcome.is_success() {
                std::process::exit(1);
            }
        }
        Commands::ConfigPath => println!("{}", WibConfig::config_path()?.display()),
    }

    Ok(())
}
