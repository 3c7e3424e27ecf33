//! Text and JSON rendering of command results.

use std::fmt::Write as _;

use anyhow::Result;
use chrono::DateTime;
use dc_core::display::{format_file_size, short_address};
use dc_core::records::FileSummary;
use dc_core::FileEntry;
use serde::Serialize;

/// Where command results go: JSON documents or human text, always on stdout.
#[derive(Debug, Clone, Copy)]
pub struct Output {
    json: bool,
}

impl Output {
    pub fn new(json: bool) -> Self {
        Self { json }
    }

    pub fn emit<T: Serialize>(&self, value: &T, text: impl FnOnce() -> String) -> Result<()> {
        if self.json {
            println!("{}", serde_json::to_string_pretty(value)?);
        } else {
            println!("{}", text());
        }
        Ok(())
    }
}

/// `2023-11-14 22:13:20 UTC`; out-of-range values print raw.
pub fn format_timestamp(unix_seconds: i64) -> String {
    DateTime::from_timestamp(unix_seconds, 0)
        .map(|at| at.format("%Y-%m-%d %H:%M:%S UTC").to_string())
        .unwrap_or_else(|| unix_seconds.to_string())
}

pub fn files_table(files: &[FileEntry]) -> String {
    if files.is_empty() {
        return "No files.".to_string();
    }

    let mut out = String::new();
    let _ = writeln!(
        out,
        "{:<32}  {:>10}  {:<7}  {:>9}  {:<23}  NAME",
        "HASH", "SIZE", "VISIBLE", "DOWNLOADS", "UPLOADED"
    );
    for entry in files {
        let record = &entry.record;
        let _ = writeln!(
            out,
            "{:<32}  {:>10}  {:<7}  {:>9}  {:<23}  {}",
            record.file_hash,
            format_file_size(record.file_size),
            if record.is_public { "public" } else { "private" },
            record.access_count,
            format_timestamp(record.upload_timestamp),
            record.file_name,
        );
    }
    out.trim_end().to_string()
}

pub fn summary_line(summary: &FileSummary) -> String {
    format!(
        "{} files, {} total, {} public, {} downloads",
        summary.file_count,
        format_file_size(summary.total_size),
        summary.public_count,
        summary.total_downloads
    )
}

pub fn file_detail(entry: &FileEntry, locator: &str) -> String {
    let record = &entry.record;
    let mut out = String::new();
    let _ = writeln!(out, "name:        {}", record.file_name);
    let _ = writeln!(out, "hash:        {}", record.file_hash);
    let _ = writeln!(out, "address:     {}", entry.address);
    let _ = writeln!(out, "owner:       {}", short_address(&record.owner, 6));
    let _ = writeln!(out, "size:        {}", format_file_size(record.file_size));
    let _ = writeln!(out, "visibility:  {}", if record.is_public { "public" } else { "private" });
    let _ = writeln!(out, "downloads:   {}", record.access_count);
    let _ = writeln!(out, "uploaded:    {}", format_timestamp(record.upload_timestamp));
    let _ = writeln!(out, "encrypted:   {}", if record.encryption_key.is_some() { "yes" } else { "no" });
    let _ = write!(out, "content:     {locator}");
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use dc_core::{Address, ContentAddress, FileRecord};

    fn entry() -> FileEntry {
        FileEntry::new(
            Address::new([5u8; 32]),
            FileRecord {
                owner: Address::new([1u8; 32]),
                file_hash: "abc123".into(),
                file_name: "report.pdf".into(),
                file_size: 2048,
                content_address: ContentAddress::from("bafyabc"),
                encryption_key: None,
                upload_timestamp: 1_700_000_000,
                is_public: true,
                access_count: 4,
                bump: 255,
            },
        )
    }

    #[test]
    fn test_format_timestamp() {
        assert_eq!(format_timestamp(1_700_000_000), "2023-11-14 22:13:20 UTC");
        assert_eq!(format_timestamp(i64::MAX), i64::MAX.to_string());
    }

    #[test]
    fn test_files_table_rows() {
        let table = files_table(&[entry()]);
        let lines: Vec<&str> = table.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("HASH"));
        assert!(lines[1].contains("2 KB"));
        assert!(lines[1].contains("public"));
        assert!(lines[1].ends_with("report.pdf"));
    }

    #[test]
    fn test_empty_table() {
        assert_eq!(files_table(&[]), "No files.");
    }

    #[test]
    fn test_summary_line() {
        let summary = FileSummary::from_entries(&[entry()]);
        assert_eq!(summary_line(&summary), "1 files, 2 KB total, 1 public, 4 downloads");
    }

    #[test]
    fn test_file_detail_includes_locator() {
        let detail = file_detail(&entry(), "https://ipfs.io/ipfs/bafyabc");
        assert!(detail.contains("visibility:  public"));
        assert!(detail.ends_with("https://ipfs.io/ipfs/bafyabc"));
    }
}
