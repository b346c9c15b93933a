//! Application constants for Language Batch
//!
//! This module centralizes the constants used throughout the application,
//! organized by functional domain.

use std::time::Duration;

/// Language API selectors
pub mod api {
    /// System name passed to every API call
    pub const SYSTEM_NAME: &str = "system_api";

    /// Action namespace passed to every API call
    pub const ACTION_NAMESPACE: &str = "language_api";

    /// Remote system serving language resources
    pub const LANGUAGE_FILES_SYSTEM: &str = "LanguageFiles";

    /// Action returning the PHP translation file of one language
    pub const GET_LANGUAGE_FILE: &str = "getLanguageFile";

    /// Action returning the language codes available for an applet
    pub const GET_APPLET_LANGUAGES: &str = "getAppletLanguages";

    /// Action returning one applet language XML
    pub const GET_APPLET_LANGUAGE_FILE: &str = "getAppletLanguageFile";

    /// Status literal of a successful response
    pub const STATUS_OK: &str = "OK";
}

/// Environment variable names for configuration overrides
pub mod env {
    /// Overrides `api.base_url`
    pub const API_URL: &str = "LANGUAGE_BATCH_API_URL";

    /// Overrides `system.paths.root`
    pub const ROOT: &str = "LANGUAGE_BATCH_ROOT";
}

/// HTTP client configuration constants
pub mod http {
    use super::Duration;

    /// Default user agent for all HTTP requests
    pub const USER_AGENT: &str = concat!("Language-Batch/", env!("CARGO_PKG_VERSION"));

    /// Default language API location
    pub const DEFAULT_BASE_URL: &str = "http://localhost:8080/api";

    /// Default HTTP request timeout
    pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);

    /// Connection establishment timeout
    pub const CONNECT_TIMEOUT: Duration = Duration::from_secs(30);

    /// Connection pool idle timeout
    pub const POOL_IDLE_TIMEOUT: Duration = Duration::from_secs(90);

    /// Maximum idle connections per host in pool
    pub const POOL_MAX_PER_HOST: usize = 4;
}

/// Cache layout constants
pub mod cache {
    /// Directory under the system root that holds every generated file
    pub const CACHE_DIR_NAME: &str = "cache";

    /// Directory holding applet language XMLs
    pub const APPLET_DIR_NAME: &str = "flash";

    /// Temporary file suffix for atomic operations
    pub const TEMP_FILE_SUFFIX: &str = ".tmp";
}

/// Configuration file locations
pub mod config {
    /// Application directory name under the user config dir
    pub const APP_DIR_NAME: &str = "language-batch";

    /// Project-local configuration file name
    pub const LOCAL_FILE_NAME: &str = "language-batch.toml";

    /// Generic configuration file name
    pub const FILE_NAME: &str = "config.toml";
}

/// Logging constants
pub mod logging {
    /// Default log level
    pub const DEFAULT_LOG_LEVEL: &str = "warn";
}

// Re-export commonly used constants for convenience
pub use api::{ACTION_NAMESPACE, LANGUAGE_FILES_SYSTEM, SYSTEM_NAME};
pub use cache::{CACHE_DIR_NAME, TEMP_FILE_SUFFIX};
pub use http::USER_AGENT;
pub use env::{API_URL as ENV_API_URL, ROOT as ENV_ROOT};
