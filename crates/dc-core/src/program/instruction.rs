use serde::{Deserialize, Serialize};

use super::wire;
use super::{discriminator, SYSTEM_PROGRAM_ID};
use crate::ids::{Address, ContentAddress, FileHash};

/// One account referenced by a request, with its access flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountMeta {
    pub address: Address,
    pub is_signer: bool,
    pub is_writable: bool,
}

impl AccountMeta {
    pub fn signer(address: Address) -> Self {
        Self {
            address,
            is_signer: true,
            is_writable: true,
        }
    }

    pub fn writable(address: Address) -> Self {
        Self {
            address,
            is_signer: false,
            is_writable: true,
        }
    }

    pub fn readonly(address: Address) -> Self {
        Self {
            address,
            is_signer: false,
            is_writable: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadFileArgs {
    pub file_hash: FileHash,
    pub file_name: String,
    pub file_size: u64,
    pub content_address: ContentAddress,
    pub encryption_key: Option<String>,
}

/// Instructions understood by the storage program, with their arguments.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProgramInstruction {
    InitializeStorage,
    UploadFile(UploadFileArgs),
    DownloadFile { file_hash: FileHash },
    DeleteFile,
    ShareFile { is_public: bool },
}

impl ProgramInstruction {
    pub fn name(&self) -> &'static str {
        match self {
            ProgramInstruction::InitializeStorage => "initialize_storage",
            ProgramInstruction::UploadFile(_) => "upload_file",
            ProgramInstruction::DownloadFile { .. } => "download_file",
            ProgramInstruction::DeleteFile => "delete_file",
            ProgramInstruction::ShareFile { .. } => "share_file",
        }
    }

    /// Instruction data: `sha256("global:<name>")[..8]` followed by the arguments.
    pub fn data(&self) -> Vec<u8> {
        let mut out = discriminator("global", self.name()).to_vec();
        match self {
            ProgramInstruction::InitializeStorage | ProgramInstruction::DeleteFile => {}
            ProgramInstruction::UploadFile(args) => {
                wire::put_string(&mut out, args.file_hash.as_str());
                wire::put_string(&mut out, &args.file_name);
                out.extend_from_slice(&args.file_size.to_le_bytes());
                wire::put_string(&mut out, args.content_address.as_str());
                wire::put_option_string(&mut out, args.encryption_key.as_deref());
            }
            ProgramInstruction::DownloadFile { file_hash } => {
                wire::put_string(&mut out, file_hash.as_str());
            }
            ProgramInstruction::ShareFile { is_public } => {
                wire::put_bool(&mut out, *is_public);
            }
        }
        out
    }
}

/// A fully addressed request, ready to be signed and sent by a wallet.
///
/// Account order is part of the program interface: the user (signer) always
/// comes first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgramRequest {
    pub program_id: Address,
    pub instruction: ProgramInstruction,
    pub accounts: Vec<AccountMeta>,
}

impl ProgramRequest {
    pub fn initialize_storage(program_id: Address, user: Address, storage: Address) -> Self {
        Self {
            program_id,
            instruction: ProgramInstruction::InitializeStorage,
            accounts: vec![
                AccountMeta::signer(user),
                AccountMeta::writable(storage),
                AccountMeta::readonly(SYSTEM_PROGRAM_ID),
            ],
        }
    }

    pub fn upload_file(
        program_id: Address,
        user: Address,
        storage: Address,
        file: Address,
        args: UploadFileArgs,
    ) -> Self {
        Self {
            program_id,
            instruction: ProgramInstruction::UploadFile(args),
            accounts: vec![
                AccountMeta::signer(user),
                AccountMeta::writable(storage),
                AccountMeta::writable(file),
                AccountMeta::readonly(SYSTEM_PROGRAM_ID),
            ],
        }
    }

    pub fn download_file(program_id: Address, user: Address, file: Address, file_hash: FileHash) -> Self {
        Self {
            program_id,
            instruction: ProgramInstruction::DownloadFile { file_hash },
            accounts: vec![AccountMeta::signer(user), AccountMeta::writable(file)],
        }
    }

    pub fn delete_file(program_id: Address, user: Address, storage: Address, file: Address) -> Self {
        Self {
            program_id,
            instruction: ProgramInstruction::DeleteFile,
            accounts: vec![
                AccountMeta::signer(user),
                AccountMeta::writable(storage),
                AccountMeta::writable(file),
            ],
        }
    }

    pub fn share_file(program_id: Address, user: Address, file: Address, is_public: bool) -> Self {
        Self {
            program_id,
            instruction: ProgramInstruction::ShareFile { is_public },
            accounts: vec![AccountMeta::signer(user), AccountMeta::writable(file)],
        }
    }

    /// The signing user: the first account of every request.
    pub fn user(&self) -> Option<&Address> {
        self.accounts
            .first()
            .filter(|meta| meta.is_signer)
            .map(|meta| &meta.address)
    }

    pub fn account(&self, index: usize) -> Option<&Address> {
        self.accounts.get(index).map(|meta| &meta.address)
    }

    pub fn data(&self) -> Vec<u8> {
        self.instruction.data()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initialize_data_is_bare_discriminator() {
        let data = ProgramInstruction::InitializeStorage.data();
        assert_eq!(data, discriminator("global", "initialize_storage").to_vec());
    }

    #[test]
    fn test_upload_data_encodes_arguments_in_order() {
        let instruction = ProgramInstruction::UploadFile(UploadFileArgs {
            file_hash: FileHash::new("abc").unwrap(),
            file_name: "a.txt".into(),
            file_size: 2048,
            content_address: ContentAddress::from("Qm1"),
            encryption_key: None,
        });
        let data = instruction.data();
        let mut expected = discriminator("global", "upload_file").to_vec();
        expected.extend_from_slice(&3u32.to_le_bytes());
        expected.extend_from_slice(b"abc");
        expected.extend_from_slice(&5u32.to_le_bytes());
        expected.extend_from_slice(b"a.txt");
        expected.extend_from_slice(&2048u64.to_le_bytes());
        expected.extend_from_slice(&3u32.to_le_bytes());
        expected.extend_from_slice(b"Qm1");
        expected.push(0);
        assert_eq!(data, expected);
    }

    #[test]
    fn test_share_data_is_single_bool_byte() {
        let data = ProgramInstruction::ShareFile { is_public: true }.data();
        assert_eq!(data.len(), 9);
        assert_eq!(data[8], 1);
    }

    #[test]
    fn test_user_is_first_signer() {
        let user = Address::new([1u8; 32]);
        let request = ProgramRequest::share_file(Address::new([2u8; 32]), user, Address::new([3u8; 32]), false);
        assert_eq!(request.user(), Some(&user));
        assert_eq!(request.account(1), Some(&Address::new([3u8; 32])));
    }

    #[test]
    fn test_allocating_requests_reference_system_program() {
        let request = ProgramRequest::initialize_storage(
            Address::new([2u8; 32]),
            Address::new([1u8; 32]),
            Address::new([4u8; 32]),
        );
        let last = request.accounts.last().unwrap();
        assert_eq!(last.address, SYSTEM_PROGRAM_ID);
        assert!(!last.is_writable);
    }
}
