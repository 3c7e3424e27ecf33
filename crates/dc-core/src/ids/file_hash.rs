use std::fmt::{Display, Formatter};
use std::str::FromStr;

use serde_with::{DeserializeFromStr, SerializeDisplay};
use thiserror::Error;

/// Number of leading bytes of a file hash that feed the file address seed.
///
/// Shared with the on-chain program: both sides must truncate identically or
/// they derive different addresses for the same record.
pub const FILE_HASH_SEED_LEN: usize = 32;

/// Client-chosen identity tag of a file record, unique per owner.
///
/// Restricted to printable ASCII so that truncating to [`FILE_HASH_SEED_LEN`]
/// bytes never splits a character and equals a character-based truncation.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, SerializeDisplay, DeserializeFromStr)]
pub struct FileHash(String);

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FileHashError {
    #[error("file hash is empty")]
    Empty,

    #[error("file hash contains non-printable or non-ASCII character {0:?}")]
    InvalidCharacter(char),
}

impl FileHash {
    pub fn new(value: impl Into<String>) -> Result<Self, FileHashError> {
        let value = value.into();
        if value.is_empty() {
            return Err(FileHashError::Empty);
        }
        if let Some(c) = value.chars().find(|c| !c.is_ascii_graphic()) {
            return Err(FileHashError::InvalidCharacter(c));
        }
        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }

    /// Bytes used as the file address seed: the first [`FILE_HASH_SEED_LEN`] bytes.
    pub fn seed(&self) -> &[u8] {
        let bytes = self.0.as_bytes();
        &bytes[..bytes.len().min(FILE_HASH_SEED_LEN)]
    }
}

impl FromStr for FileHash {
    type Err = FileHashError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl Display for FileHash {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for FileHash {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
