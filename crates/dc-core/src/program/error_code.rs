use thiserror::Error;

/// Custom errors raised by the storage program.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Error)]
pub enum ProgramErrorCode {
    #[error("file hash too long")]
    FileHashTooLong,

    #[error("file name too long")]
    FileNameTooLong,

    #[error("IPFS hash too long")]
    IpfsHashTooLong,

    #[error("invalid file size")]
    InvalidFileSize,

    #[error("unauthorized access")]
    UnauthorizedAccess,
}

impl ProgramErrorCode {
    const BASE: u32 = 6000;

    const ALL: [ProgramErrorCode; 5] = [
        ProgramErrorCode::FileHashTooLong,
        ProgramErrorCode::FileNameTooLong,
        ProgramErrorCode::IpfsHashTooLong,
        ProgramErrorCode::InvalidFileSize,
        ProgramErrorCode::UnauthorizedAccess,
    ];

    pub fn code(self) -> u32 {
        Self::BASE + self as u32
    }

    pub fn from_code(code: u32) -> Option<Self> {
        let index = code.checked_sub(Self::BASE)? as usize;
        Self::ALL.get(index).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codes_match_program_numbering() {
        assert_eq!(ProgramErrorCode::FileHashTooLong.code(), 6000);
        assert_eq!(ProgramErrorCode::UnauthorizedAccess.code(), 6004);
    }

    #[test]
    fn test_from_code_round_trips_and_rejects_unknown() {
        for code in ProgramErrorCode::ALL {
            assert_eq!(ProgramErrorCode::from_code(code.code()), Some(code));
        }
        assert_eq!(ProgramErrorCode::from_code(5999), None);
        assert_eq!(ProgramErrorCode::from_code(6005), None);
    }
}
