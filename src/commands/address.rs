use anyhow::Result;
use serde_json::json;

use super::CommandContext;
use crate::cli::AddressCommand;

pub fn run(ctx: &CommandContext, command: AddressCommand) -> Result<()> {
    let client = &ctx.services.client;
    let (owner, address) = match &command {
        AddressCommand::Storage { owner } => {
            let owner = match owner {
                Some(owner) => *owner,
                None => client.current_identity()?,
            };
            (owner, client.derive_storage_address(&owner)?)
        }
        AddressCommand::File { owner, hash } => (*owner, client.derive_file_address(owner, hash)?),
    };

    let document = json!({ "owner": owner, "address": address, "programId": client.program_id() });
    ctx.output.emit(&document, || address.to_string())
}
