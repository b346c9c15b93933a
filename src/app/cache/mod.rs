//! Cache storage for generated language files
//!
//! The batch workflows persist files through the [`CacheStore`] trait.
//! [`FileCacheStore`] is the filesystem implementation used by the CLI: it
//! resolves cache paths below `<root>/cache` and writes every file with the
//! temp-file + rename pattern.
//!
//! # Module Organization
//!
//! - [`config`] - Cache configuration
//! - [`path`] - Cache path generation and resolution
//! - [`store`] - Filesystem store with atomic writes
//!
//! # Examples
//!
//! ```rust,no_run
//! use language_batch::app::cache::{CacheConfig, CacheStore, FileCacheStore, translation_file_path};
//! use std::path::Path;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let store = FileCacheStore::new(CacheConfig::for_system_root(Path::new("/srv/app"))).await?;
//! store
//!     .put(&translation_file_path("portal", "en"), b"<?php return [];")
//!     .await?;
//! # Ok(())
//! # }
//! ```

use async_trait::async_trait;

use crate::errors::CacheResult;

pub mod config;
pub mod path;
pub mod store;

// Re-export main public API
pub use config::CacheConfig;
pub use path::{applet_file_path, translation_file_path, PathResolver};
pub use store::FileCacheStore;

/// Destination of generated cache files
///
/// `path` is absolute within an implicit cache root. `Ok` means the whole
/// content is in place; a failed write leaves no partial file behind.
#[async_trait]
pub trait CacheStore: Send + Sync {
    /// Store `content` at `path`, replacing any previous content
    async fn put(&self, path: &str, content: &[u8]) -> CacheResult<()>;
}
