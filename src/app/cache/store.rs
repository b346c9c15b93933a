//! Filesystem cache store with atomic writes
//!
//! Files are written to a temporary sibling first and renamed into place, so
//! a reader never observes a partially written cache file.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::fs;
use tracing::{debug, error, info};

use crate::constants::cache::TEMP_FILE_SUFFIX;
use crate::errors::{CacheError, CacheResult};

use super::config::CacheConfig;
use super::path::PathResolver;
use super::CacheStore;

/// Cache store backed by a local directory
#[derive(Debug, Clone)]
pub struct FileCacheStore {
    cache_root: PathBuf,
}

impl FileCacheStore {
    /// Create a new cache store
    ///
    /// # Errors
    ///
    /// Returns `CacheError` if the cache directory cannot be created or is
    /// not a directory
    pub async fn new(config: CacheConfig) -> CacheResult<Self> {
        let cache_root = config.cache_root;

        if config.create_root {
            Self::ensure_directory_exists(&cache_root).await?;
        }

        if !fs::metadata(&cache_root)
            .await
            .map(|m| m.is_dir())
            .unwrap_or(false)
        {
            return Err(CacheError::DirectoryNotAccessible { path: cache_root });
        }

        info!("Initialized cache store with root: {}", cache_root.display());

        Ok(Self { cache_root })
    }

    /// Get the cache root directory
    pub fn cache_root(&self) -> &Path {
        &self.cache_root
    }

    /// Filesystem location of a cache path
    pub fn file_path(&self, cache_path: &str) -> CacheResult<PathBuf> {
        PathResolver::resolve(&self.cache_root, cache_path)
    }

    /// Ensure a directory exists, creating it if necessary
    async fn ensure_directory_exists(path: &Path) -> CacheResult<()> {
        if !path.exists() {
            fs::create_dir_all(path).await.map_err(|e| {
                error!("Failed to create cache directory: {}", e);
                CacheError::DirectoryNotAccessible {
                    path: path.to_path_buf(),
                }
            })?;
            debug!("Created cache directory: {}", path.display());
        }
        Ok(())
    }

    /// Save file content atomically using temp file + rename pattern
    async fn save_file_atomic(&self, content: &[u8], final_path: &Path) -> CacheResult<()> {
        let temp_path = final_path.with_extension(format!(
            "{}{}",
            final_path.extension().unwrap_or_default().to_string_lossy(),
            TEMP_FILE_SUFFIX
        ));

        if let Some(parent) = final_path.parent() {
            Self::ensure_directory_exists(parent).await?;
        }

        fs::write(&temp_path, content).await.map_err(|e| {
            error!("Failed to write temporary file: {}", e);
            CacheError::WriteFailed {
                path: temp_path.clone(),
                source: e,
            }
        })?;

        if let Err(e) = fs::rename(&temp_path, final_path).await {
            error!("Failed to rename temporary file: {}", e);
            let _ = fs::remove_file(&temp_path).await;
            return Err(CacheError::AtomicOperationFailed {
                temp_path,
                final_path: final_path.to_path_buf(),
            });
        }

        Ok(())
    }
}

#[async_trait]
impl CacheStore for FileCacheStore {
    async fn put(&self, path: &str, content: &[u8]) -> CacheResult<()> {
        let final_path = self.file_path(path)?;

        self.save_file_atomic(content, &final_path).await?;

        debug!(
            "Saved {} bytes to cache file: {}",
            content.len(),
            final_path.display()
        );
        Ok(())
    }
}
