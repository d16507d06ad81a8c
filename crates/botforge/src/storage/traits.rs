use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::StorageResult;

/// Storage trait for abstract file operations
///
/// Paths are relative to the storage root.
#[async_trait]
pub trait Storage: Send + Sync {
    /// Check if a path exists
    async fn exists(&self, path: &str) -> StorageResult<bool>;

    /// Read file contents
    async fn read(&self, path: &str) -> StorageResult<Vec<u8>>;

    /// Replace file contents; readers see either the old or the new content
    async fn write(&self, path: &str, content: &[u8]) -> StorageResult<()>;

    /// Delete a file or a whole directory tree
    async fn delete(&self, path: &str) -> StorageResult<()>;

    /// List direct children of a directory; directories end with `/`
    async fn list(&self, prefix: &str) -> StorageResult<Vec<String>>;

    /// Create directory
    async fn create_dir(&self, path: &str) -> StorageResult<()>;

    /// Get file metadata (size, modified time, etc.)
    async fn metadata(&self, path: &str) -> StorageResult<FileMetadata>;
}

/// File metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileMetadata {
    pub size: u64,
    pub modified: Option<chrono::DateTime<chrono::Utc>>,
    pub is_dir: bool,
}
