use clap::Parser;

use mpusher::cli::{Cli, execute_command, init_logger_from_settings, load_and_merge_config};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let settings = load_and_merge_config(&cli)?;
    let log_level = init_logger_from_settings(&settings)?;

    tracing::debug!(command = ?cli.command, "Executing command");
    execute_command(&cli, settings, Some(log_level)).await
}
