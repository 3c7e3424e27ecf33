use thiserror::Error;

use crate::addressing::AddressingError;
use crate::ids::Address;
use crate::program::layout::LayoutError;
use crate::program::ProgramErrorCode;

/// Failure taxonomy of every call that crosses into the storage program.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ChainError {
    /// The queried record does not exist.
    #[error("record not found: {0}")]
    NotFound(Address),

    /// A create request collided with an existing record.
    #[error("record already exists: {0}")]
    AlreadyExists(String),

    /// Required context was missing; no remote call was made.
    #[error("precondition failed: {0}")]
    PreconditionFailed(String),

    /// The program rejected the request with one of its own error codes.
    #[error("program rejected request: {0}")]
    Rejected(ProgramErrorCode),

    /// Any other transport or program failure, verbatim.
    #[error("remote failure: {0}")]
    Remote(String),
}

const CUSTOM_ERROR_MARKER: &str = "custom program error: 0x";

impl ChainError {
    pub fn precondition(detail: impl Into<String>) -> Self {
        ChainError::PreconditionFailed(detail.into())
    }

    pub fn remote(detail: impl Into<String>) -> Self {
        ChainError::Remote(detail.into())
    }

    /// Classifies a failure reported by the cluster from its detail text.
    ///
    /// Account creation over an existing address fails inside the system
    /// program ("already in use", custom error `0x0`); the storage program's own
    /// errors start at 6000.
    pub fn from_remote_detail(detail: &str) -> Self {
        if detail.contains("already in use") {
            return ChainError::AlreadyExists(detail.to_string());
        }
        match custom_error_code(detail) {
            Some(0) => ChainError::AlreadyExists(detail.to_string()),
            Some(code) => match ProgramErrorCode::from_code(code) {
                Some(program_error) => ChainError::Rejected(program_error),
                None => ChainError::Remote(detail.to_string()),
            },
            None => ChainError::Remote(detail.to_string()),
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, ChainError::NotFound(_))
    }

    pub fn is_already_exists(&self) -> bool {
        matches!(self, ChainError::AlreadyExists(_))
    }
}

fn custom_error_code(detail: &str) -> Option<u32> {
    let start = detail.find(CUSTOM_ERROR_MARKER)? + CUSTOM_ERROR_MARKER.len();
    let digits: String = detail[start..]
        .chars()
        .take_while(|c| c.is_ascii_hexdigit())
        .collect();
    u32::from_str_radix(&digits, 16).ok()
}

impl From<AddressingError> for ChainError {
    fn from(err: AddressingError) -> Self {
        ChainError::PreconditionFailed(format!("address derivation failed: {err}"))
    }
}

impl From<LayoutError> for ChainError {
    fn from(err: LayoutError) -> Self {
        ChainError::Remote(format!("undecodable account data: {err}"))
    }
}
