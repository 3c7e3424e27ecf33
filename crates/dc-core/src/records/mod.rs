//! Records owned by the storage program, as seen by the client.

mod file;
mod storage;
mod summary;

pub use file::{sort_newest_first, FileEntry, FileRecord};
pub use storage::StorageRecord;
pub use summary::FileSummary;
