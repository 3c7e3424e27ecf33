//! Use cases / 用例
//!
//! Each use case composes the [`StorageClient`](crate::StorageClient) with the
//! content store, hasher and clock it needs:
//!
//! ```text
//! EnsureStorage      → init
//! UploadFile         → hash → place / confirm → register → (share)
//! DownloadFile       → lookup → record access (best effort) → retrieve
//! StorageOverview    → dashboard for one owner
//! BrowsePublicFiles  → public catalogue
//! ```

pub mod browse_public_files;
pub mod download_file;
pub mod ensure_storage;
pub mod storage_overview;
pub mod upload_file;

pub use browse_public_files::{BrowsePublicFiles, PublicCatalogue};
pub use download_file::{DownloadFile, DownloadedFile};
pub use ensure_storage::{EnsureStorage, StorageStatus};
pub use storage_overview::{StorageOverview, StorageOverviewReport};
pub use upload_file::{ContentSource, UploadFile, UploadFileInput, UploadedFile};
