use serde::{Deserialize, Serialize};

use super::FileEntry;

/// Aggregate figures over a list of files, as shown on dashboards.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileSummary {
    pub file_count: usize,
    pub total_size: u64,
    pub public_count: usize,
    pub total_downloads: u64,
}

impl FileSummary {
    pub fn from_entries(entries: &[FileEntry]) -> Self {
        entries.iter().fold(Self::default(), |mut acc, entry| {
            acc.file_count += 1;
            acc.total_size = acc.total_size.saturating_add(entry.record.file_size);
            acc.total_downloads = acc
                .total_downloads
                .saturating_add(entry.record.access_count);
            if entry.record.is_public {
                acc.public_count += 1;
            }
            acc
        })
    }
}
