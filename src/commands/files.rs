use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use dc_app::usecases::{BrowsePublicFiles, ContentSource, DownloadFile, UploadFile, UploadFileInput};
use dc_app::UploadRequest;
use dc_core::display::format_file_size;
use dc_core::{Address, FileHash};
use serde_json::json;
use tracing::info;

use super::CommandContext;
use crate::cli::{RegisterArgs, UploadArgs};
use crate::output::{file_detail, files_table, summary_line};

pub async fn upload(ctx: &CommandContext, args: UploadArgs) -> Result<()> {
    let file_name = match args.name {
        Some(name) => name,
        None => args
            .path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .context("Path has no file name; pass --name")?,
    };

    let source = match args.cid {
        Some(content_address) => {
            let metadata = tokio::fs::metadata(&args.path)
                .await
                .with_context(|| format!("Failed to stat {}", args.path.display()))?;
            ContentSource::Existing {
                content_address,
                file_size: metadata.len(),
            }
        }
        None => ContentSource::Bytes(
            tokio::fs::read(&args.path)
                .await
                .with_context(|| format!("Failed to read {}", args.path.display()))?,
        ),
    };

    let services = &ctx.services;
    let uploaded = UploadFile::from_ports(
        services.client.clone(),
        services.content.clone(),
        services.hasher.clone(),
        services.clock.clone(),
    )
    .execute(UploadFileInput {
        file_name,
        source,
        file_hash: args.hash,
        encryption_key: args.key,
        is_public: args.public,
    })
    .await?;

    ctx.output.emit(&uploaded, || {
        format!(
            "Uploaded {} ({})\nhash:     {}\naddress:  {}\ncontent:  {}",
            uploaded.content_address,
            format_file_size(uploaded.file_size),
            uploaded.file_hash,
            uploaded.file_address,
            uploaded.locator,
        )
    })
}

pub async fn register(ctx: &CommandContext, args: RegisterArgs) -> Result<()> {
    let file_hash = args.hash.clone();
    let address = ctx
        .services
        .client
        .upload_file(UploadRequest {
            file_hash: args.hash,
            file_name: args.name,
            file_size: args.size,
            content_address: args.cid,
            encryption_key: args.key,
        })
        .await?;

    let document = json!({ "fileHash": file_hash, "fileAddress": address });
    ctx.output
        .emit(&document, || format!("Registered {file_hash} at {address}"))
}

pub async fn list_owned(ctx: &CommandContext, owner: Option<Address>) -> Result<()> {
    let client = &ctx.services.client;
    let owner = match owner {
        Some(owner) => owner,
        None => client.current_identity()?,
    };
    let files = client.list_owned_files(&owner).await?;
    ctx.output.emit(&files, || files_table(&files))
}

pub async fn browse(ctx: &CommandContext) -> Result<()> {
    let catalogue = BrowsePublicFiles::new(ctx.services.client.clone())
        .execute()
        .await?;
    ctx.output.emit(&catalogue, || {
        format!(
            "{}\n\n{}",
            files_table(&catalogue.files),
            summary_line(&catalogue.summary)
        )
    })
}

pub async fn show(ctx: &CommandContext, owner: &Address, hash: &FileHash) -> Result<()> {
    let entry = ctx.services.client.get_file(owner, hash).await?;
    let locator = ctx.services.content.locator(&entry.record.content_address);
    ctx.output.emit(&entry, || file_detail(&entry, &locator))
}

pub async fn set_sharing(ctx: &CommandContext, hash: &FileHash, is_public: bool) -> Result<()> {
    let signature = ctx.services.client.set_sharing(hash, is_public).await?;
    let visibility = if is_public { "public" } else { "private" };
    let document = json!({ "fileHash": hash, "isPublic": is_public, "signature": signature });
    ctx.output
        .emit(&document, || format!("{hash} is now {visibility}"))
}

pub async fn remove(ctx: &CommandContext, hash: &FileHash) -> Result<()> {
    let signature = ctx.services.client.delete_file(hash).await?;
    let document = json!({ "fileHash": hash, "signature": signature });
    ctx.output.emit(&document, || format!("Deleted {hash}"))
}

pub async fn download(
    ctx: &CommandContext,
    owner: &Address,
    hash: &FileHash,
    output: Option<PathBuf>,
) -> Result<()> {
    let downloaded = DownloadFile::from_ports(ctx.services.client.clone(), ctx.services.content.clone())
        .execute(owner, hash)
        .await?;

    let destination = match output {
        Some(path) => path,
        None => {
            let name = PathBuf::from(&downloaded.entry.record.file_name);
            match name.file_name() {
                Some(file_name) => PathBuf::from(file_name),
                None => bail!("Stored file name is not a valid path; pass --output"),
            }
        }
    };
    tokio::fs::write(&destination, &downloaded.bytes)
        .await
        .with_context(|| format!("Failed to write {}", destination.display()))?;
    info!(path = %destination.display(), bytes = downloaded.bytes.len(), "File saved");

    let document = json!({
        "path": destination,
        "size": downloaded.bytes.len(),
        "accessRecorded": downloaded.access_recorded,
        "file": downloaded.entry,
    });
    ctx.output.emit(&document, || {
        let note = if downloaded.access_recorded {
            ""
        } else {
            " (download not recorded)"
        };
        format!(
            "Saved {} ({}){note}",
            destination.display(),
            format_file_size(downloaded.bytes.len() as u64)
        )
    })
}
