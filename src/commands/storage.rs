use anyhow::Result;
use dc_app::usecases::{EnsureStorage, StorageOverview, StorageStatus};
use dc_core::display::format_file_size;
use dc_core::Address;

use super::CommandContext;
use crate::output::{files_table, summary_line};

pub async fn init(ctx: &CommandContext) -> Result<()> {
    let status = EnsureStorage::new(ctx.services.client.clone()).execute().await?;
    ctx.output.emit(&status, || match status {
        StorageStatus::Initialized(address) => format!("Storage initialized at {address}"),
        StorageStatus::AlreadyInitialized(address) => {
            format!("Storage already initialized at {address}")
        }
    })
}

pub async fn info(ctx: &CommandContext, owner: Option<Address>) -> Result<()> {
    let owner = match owner {
        Some(owner) => owner,
        None => ctx.services.client.current_identity()?,
    };
    let report = StorageOverview::new(ctx.services.client.clone())
        .execute(&owner)
        .await?;

    ctx.output.emit(&report, || match &report.storage {
        None => format!(
            "Storage for {} is not initialized (would live at {}). Run `dcloud init`.",
            report.owner, report.storage_address
        ),
        Some(storage) => format!(
            "owner:    {}\nstorage:  {}\nfiles:    {}\nused:     {}\n\n{}\n\n{}",
            report.owner,
            report.storage_address,
            storage.total_files,
            format_file_size(storage.total_storage_used),
            files_table(&report.files),
            summary_line(&report.summary),
        ),
    })
}
