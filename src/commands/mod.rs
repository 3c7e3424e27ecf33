//! Command handlers: each one is a linear consumer of the client or a use case.

mod address;
mod files;
mod storage;

use anyhow::Result;

use crate::bootstrap::config::render_config;
use crate::bootstrap::AppServices;
use crate::cli::{Command, ConfigCommand};
use crate::output::Output;
use dc_core::ClientConfig;

pub struct CommandContext {
    pub config: ClientConfig,
    pub services: AppServices,
    pub output: Output,
}

/// Commands that only need the loaded configuration.
pub fn run_config(command: &ConfigCommand, config: &ClientConfig, output: Output) -> Result<()> {
    match command {
        ConfigCommand::Show => {
            let rendered = render_config(config)?;
            output.emit(config, || rendered.trim_end().to_string())
        }
        ConfigCommand::Path => {
            let path = dc_infra::config::default_config_path();
            output.emit(&path, || match &path {
                Some(path) => path.display().to_string(),
                None => "No config directory on this platform".to_string(),
            })
        }
    }
}

pub async fn execute(command: Command, ctx: &CommandContext) -> Result<()> {
    match command {
        Command::Init => storage::init(ctx).await,
        Command::Info { owner } => storage::info(ctx, owner).await,
        Command::Upload(args) => files::upload(ctx, args).await,
        Command::Register(args) => files::register(ctx, args).await,
        Command::Ls { owner } => files::list_owned(ctx, owner).await,
        Command::Browse => files::browse(ctx).await,
        Command::Show { owner, hash } => files::show(ctx, &owner, &hash).await,
        Command::Share { hash } => files::set_sharing(ctx, &hash, true).await,
        Command::Unshare { hash } => files::set_sharing(ctx, &hash, false).await,
        Command::Rm { hash } => files::remove(ctx, &hash).await,
        Command::Download {
            owner,
            hash,
            output,
        } => files::download(ctx, &owner, &hash, output).await,
        Command::Address(command) => address::run(ctx, command),
        Command::Config(command) => run_config(&command, &ctx.config, ctx.output),
    }
}
