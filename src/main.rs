use anyhow::Result;
use clap::Parser;

use server_room::cli::Cli;

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    let config = cli.resolve()?;
    log::info!(
        "Starting on {} in {:?} theme ({}x{})",
        config.section.label(),
        config.theme,
        config.window.width,
        config.window.height
    );

    server_room::app::run(config)
}
