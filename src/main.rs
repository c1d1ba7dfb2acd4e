//! Noteprompter CLI entry point.

use anyhow::Result;
use clap::Parser;

use noteprompter::cli::{self, Cli, Commands};
use noteprompter::{ConfigLoader, LoggerImpl};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    if let Err(err) = run(cli.command, cli.config, cli.json).await {
        cli::handle_error(err, cli.json);
    }
}

async fn run(command: Commands, config_path: Option<std::path::PathBuf>, json: bool) -> Result<()> {
    let config = match config_path {
        Some(path) => ConfigLoader::load_from_file(path)?,
        None => ConfigLoader::load()?,
    };
    let _logger = LoggerImpl::init(&config.logging)?;

    match command {
        Commands::Drill(args) => cli::commands::drill::execute(args, &config, json).await,
        Commands::Session(args) => cli::commands::session::execute(args, &config, json).await,
    }
}
