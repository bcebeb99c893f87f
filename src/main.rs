use anyhow::Result;
use clap::Parser;
use evently::cli::Cli;
use evently::commands;
use evently::config::Config;
use log::{debug, error};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };
    evently::init_logger(&config.logging.level);
    debug!("Loaded config: {:?}", config);

    if let Err(e) = commands::execute(cli, config).await {
        error!("{:#}", e);
        std::process::exit(1);
    }
    Ok(())
}
