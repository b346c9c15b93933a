//! Cache configuration types

use std::path::{Path, PathBuf};

use crate::constants::cache::CACHE_DIR_NAME;

/// Configuration for the filesystem cache store
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheConfig {
    /// Directory every cache path is resolved against
    pub cache_root: PathBuf,
    /// Create the cache root when it does not exist yet
    pub create_root: bool,
}

impl CacheConfig {
    /// Create a cache configuration with a custom cache root
    pub fn with_cache_root(cache_root: PathBuf) -> Self {
        Self {
            cache_root,
            create_root: true,
        }
    }

    /// Cache configuration for a system root (`<root>/cache`)
    pub fn for_system_root(root: &Path) -> Self {
        Self::with_cache_root(root.join(CACHE_DIR_NAME))
    }

    /// Enable or disable creating a missing cache root
    pub fn with_create_root(mut self, create_root: bool) -> Self {
        self.create_root = create_root;
        self
    }
}
