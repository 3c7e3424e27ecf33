//! dcloud command-line client.
//!
//! `bootstrap` loads configuration, installs tracing and wires adapters;
//! `commands` maps each subcommand onto the dc-app client or a use case.

pub mod bootstrap;
pub mod cli;
pub mod commands;
pub mod output;

use anyhow::Result;
use clap::Parser;
use tracing::debug;

use crate::bootstrap::tracing::init_tracing_subscriber;
use crate::bootstrap::{load_config, wire_services};
use crate::cli::{Cli, Command};
use crate::commands::CommandContext;
use crate::output::Output;

pub async fn run() -> Result<()> {
    let cli = Cli::parse();
    init_tracing_subscriber(cli.verbose)?;

    let config = load_config(cli.config.as_deref())?;
    let output = Output::new(cli.json);
    debug!(command = ?cli.command, "Starting");

    // Config inspection must work even when the wallet cannot be loaded.
    if let Command::Config(command) = &cli.command {
        return commands::run_config(command, &config, output);
    }

    let services = wire_services(&config).await?;
    let ctx = CommandContext {
        config,
        services,
        output,
    };
    commands::execute(cli.command, &ctx).await
}
