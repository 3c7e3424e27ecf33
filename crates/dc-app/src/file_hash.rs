use dc_core::ids::{FileHash, FileHashError};

/// Hex digits of the content digest kept in a generated file hash.
pub const DIGEST_PREFIX_LEN: usize = 24;
/// Trailing digits of the millisecond timestamp appended to the digest prefix.
pub const TIMESTAMP_SUFFIX_LEN: usize = 8;

/// Builds a per-upload file hash: content digest prefix plus a time suffix.
///
/// The suffix makes re-uploads of identical content distinct records. The
/// result is exactly 32 characters for a full hex digest, so it fits the
/// address seed without truncation.
pub fn unique_file_hash(digest_hex: &str, now_ms: i64) -> Result<FileHash, FileHashError> {
    let prefix: String = digest_hex.chars().take(DIGEST_PREFIX_LEN).collect();
    let millis = now_ms.unsigned_abs().to_string();
    let suffix = &millis[millis.len().saturating_sub(TIMESTAMP_SUFFIX_LEN)..];
    FileHash::new(format!("{prefix}{suffix}"))
}
