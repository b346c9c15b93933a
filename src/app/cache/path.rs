//! Cache path generation and resolution
//!
//! Cache paths are slash-separated and absolute within the cache root:
//! - Translation files: /{application}/{language}.php
//! - Applet language XMLs: /flash/lang_{language}.xml

use std::path::{Path, PathBuf};

use crate::constants::cache::APPLET_DIR_NAME;
use crate::errors::{CacheError, CacheResult};

/// Cache path of an application's translation file
pub fn translation_file_path(application: &str, language: &str) -> String {
    format!("/{}/{}.php", application, language)
}

/// Cache path of an applet language XML
pub fn applet_file_path(language: &str) -> String {
    format!("/{}/lang_{}.xml", APPLET_DIR_NAME, language)
}

/// Maps cache paths onto the filesystem
pub struct PathResolver;

impl PathResolver {
    /// Resolve a cache path below `cache_root`
    ///
    /// # Errors
    ///
    /// Returns `CacheError::InvalidPath` if the path is not absolute, names
    /// no file, or tries to leave the cache root.
    pub fn resolve(cache_root: &Path, cache_path: &str) -> CacheResult<PathBuf> {
        let invalid = |reason: &str| CacheError::InvalidPath {
            path: cache_path.to_string(),
            reason: reason.to_string(),
        };

        let relative = cache_path
            .strip_prefix('/')
            .ok_or_else(|| invalid("Cache paths must start with '/'"))?;

        let mut path = cache_root.to_path_buf();
        let mut segments = 0;

        for segment in relative.split('/').filter(|s| !s.is_empty()) {
            if segment == "." || segment == ".." {
                return Err(invalid("Relative segments are not allowed"));
            }
            if segment.contains('\\') || segment.contains('\0') {
                return Err(invalid("Segment contains a forbidden character"));
            }
            path.push(segment);
            segments += 1;
        }

        if segments == 0 || relative.ends_with('/') {
            return Err(invalid("Cache path does not name a file"));
        }

        Ok(path)
    }
}
