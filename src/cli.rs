//! Command-line surface.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use dc_core::{Address, ContentAddress, FileHash};

#[derive(Debug, Parser)]
#[command(name = "dcloud", version, about = "Decentralized file storage on Solana + IPFS")]
pub struct Cli {
    /// Config file (defaults to <config_dir>/dcloud/config.toml when present)
    #[arg(long, global = true, env = "DCLOUD_CONFIG")]
    pub config: Option<PathBuf>,

    /// Print machine-readable JSON instead of text
    #[arg(long, global = true)]
    pub json: bool,

    /// Debug logging for dcloud crates (RUST_LOG overrides)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Create the wallet's storage record if it does not exist yet
    Init,
    /// Storage dashboard: counters, files and totals
    Info {
        /// Owner to inspect (defaults to the wallet)
        owner: Option<Address>,
    },
    /// Place a local file's content and register it
    Upload(UploadArgs),
    /// Register metadata for content that is already placed
    Register(RegisterArgs),
    /// List an owner's files, newest first
    Ls {
        owner: Option<Address>,
    },
    /// List every public file, newest first
    Browse,
    /// Show one file record
    Show { owner: Address, hash: FileHash },
    /// Make one of your files public
    Share { hash: FileHash },
    /// Make one of your files private
    Unshare { hash: FileHash },
    /// Delete one of your files
    Rm { hash: FileHash },
    /// Retrieve a file's content, recording the download
    Download {
        owner: Address,
        hash: FileHash,
        /// Destination path (defaults to the stored file name)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Derive record addresses without touching the network
    #[command(subcommand)]
    Address(AddressCommand),
    /// Inspect configuration
    #[command(subcommand)]
    Config(ConfigCommand),
}

#[derive(Debug, Args)]
pub struct UploadArgs {
    pub path: PathBuf,
    /// Use content already placed under this CID instead of uploading the bytes
    #[arg(long)]
    pub cid: Option<ContentAddress>,
    /// File hash to register under (generated when omitted)
    #[arg(long)]
    pub hash: Option<FileHash>,
    /// Stored file name (defaults to the path's file name)
    #[arg(long)]
    pub name: Option<String>,
    /// Encryption key recorded alongside the file
    #[arg(long)]
    pub key: Option<String>,
    /// Make the file public after registering it
    #[arg(long)]
    pub public: bool,
}

#[derive(Debug, Args)]
pub struct RegisterArgs {
    #[arg(long)]
    pub hash: FileHash,
    #[arg(long)]
    pub name: String,
    /// File size in bytes
    #[arg(long)]
    pub size: u64,
    #[arg(long)]
    pub cid: ContentAddress,
    #[arg(long)]
    pub key: Option<String>,
}

#[derive(Debug, Subcommand)]
pub enum AddressCommand {
    /// Storage record address of an owner (defaults to the wallet)
    Storage { owner: Option<Address> },
    /// File record address of `(owner, hash)`
    File { owner: Address, hash: FileHash },
}

#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Print the effective configuration as TOML
    Show,
    /// Print the default config file location
    Path,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_upload_flags_parse() {
        let cli = Cli::try_parse_from([
            "dcloud", "upload", "notes.txt", "--hash", "abc123", "--public", "--json",
        ])
        .unwrap();
        assert!(cli.json);
        match cli.command {
            Command::Upload(args) => {
                assert_eq!(args.path, PathBuf::from("notes.txt"));
                assert_eq!(args.hash.unwrap().as_str(), "abc123");
                assert!(args.public);
                assert!(args.cid.is_none());
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_addresses_are_validated_at_parse_time() {
        let result = Cli::try_parse_from(["dcloud", "ls", "not-an-address"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_file_hash_with_whitespace_is_rejected() {
        let owner = "2DWNrUtJXqnA9qu444yyACg2VXnXmEqwBPG7Q7cgM1NM";
        let result = Cli::try_parse_from(["dcloud", "show", owner, "has space"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_register_requires_all_fields() {
        let result = Cli::try_parse_from(["dcloud", "register", "--hash", "h", "--name", "n"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_address_subcommand() {
        let cli = Cli::try_parse_from(["dcloud", "address", "storage"]).unwrap();
        assert!(matches!(
            cli.command,
            Command::Address(AddressCommand::Storage { owner: None })
        ));
    }
}
