//! Configuration management for Language Batch
//!
//! This module provides configuration loading from TOML files with
//! environment variable overrides and zero-config defaults.
//!
//! ```toml
//! [system.translated_applications]
//! portal = ["en", "hu"]
//!
//! [system.paths]
//! root = "/srv/portal"
//!
//! [api]
//! base_url = "https://translations.example.com/api"
//! ```

use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use tracing::{debug, info};

use crate::app::{CacheConfig, ClientConfig};
use crate::constants::{config as files, env as env_vars, http, logging};
use crate::errors::{ConfigError, ConfigResult};

/// Unified application configuration for TOML serialization
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Translated applications and filesystem layout
    pub system: SystemConfig,
    /// Language API client settings
    pub api: ApiConfigToml,
    /// Logging configuration
    pub logging: LoggingConfig,
}

/// Settings read by the batch workflows
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SystemConfig {
    /// Applications and the languages each one is translated into
    pub translated_applications: TranslatedApplications,
    /// Filesystem locations
    pub paths: PathsConfig,
}

/// Filesystem locations
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PathsConfig {
    /// System root; generated files go to `<root>/cache`
    pub root: PathBuf,
}

impl Default for PathsConfig {
    fn default() -> Self {
        let root = dirs::data_local_dir()
            .map(|dir| dir.join(files::APP_DIR_NAME))
            .unwrap_or_else(|| PathBuf::from("/var/lib").join(files::APP_DIR_NAME));
        Self { root }
    }
}

/// An application and the languages it is translated into
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Application {
    /// Application identifier, also the cache directory name
    pub name: String,
    /// Language codes in configured order
    pub languages: Vec<String>,
}

/// Ordered application → languages table
///
/// Kept as a list so applications are processed in the order they appear in
/// the configuration file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TranslatedApplications(Vec<Application>);

impl TranslatedApplications {
    /// Create a table from applications in processing order
    pub fn new(applications: Vec<Application>) -> Self {
        Self(applications)
    }

    /// Iterate applications in configured order
    pub fn iter(&self) -> std::slice::Iter<'_, Application> {
        self.0.iter()
    }

    /// Number of applications
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether no application is configured
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Look up an application by name
    pub fn get(&self, name: &str) -> Option<&Application> {
        self.0.iter().find(|application| application.name == name)
    }

    /// Total number of translation files the table describes
    pub fn file_count(&self) -> usize {
        self.0.iter().map(|application| application.languages.len()).sum()
    }
}

impl<'a> IntoIterator for &'a TranslatedApplications {
    type Item = &'a Application;
    type IntoIter = std::slice::Iter<'a, Application>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<N, L> FromIterator<(N, L)> for TranslatedApplications
where
    N: Into<String>,
    L: IntoIterator,
    L::Item: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (N, L)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(name, languages)| Application {
                    name: name.into(),
                    languages: languages.into_iter().map(Into::into).collect(),
                })
                .collect(),
        )
    }
}

impl Serialize for TranslatedApplications {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for application in &self.0 {
            map.serialize_entry(&application.name, &application.languages)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for TranslatedApplications {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct TableVisitor;

        impl<'de> Visitor<'de> for TableVisitor {
            type Value = TranslatedApplications;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a table of application names to language lists")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
                let mut applications = Vec::with_capacity(access.size_hint().unwrap_or(0));
                while let Some((name, languages)) = access.next_entry::<String, Vec<String>>()? {
                    applications.push(Application { name, languages });
                }
                Ok(TranslatedApplications(applications))
            }
        }

        deserializer.deserialize_map(TableVisitor)
    }
}

/// TOML-friendly language API client configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfigToml {
    /// Base URL of the language API
    pub base_url: String,
    /// Request timeout in seconds
    pub request_timeout_secs: u64,
    /// Connect timeout in seconds
    pub connect_timeout_secs: u64,
    /// TCP nodelay setting
    pub tcp_nodelay: bool,
    /// Connection pool idle timeout in seconds (None = no timeout)
    pub pool_idle_timeout_secs: Option<u64>,
    /// Maximum idle connections per host
    pub pool_max_per_host: usize,
}

impl Default for ApiConfigToml {
    fn default() -> Self {
        Self {
            base_url: http::DEFAULT_BASE_URL.to_string(),
            request_timeout_secs: http::DEFAULT_TIMEOUT.as_secs(),
            connect_timeout_secs: http::CONNECT_TIMEOUT.as_secs(),
            tcp_nodelay: true,
            pool_idle_timeout_secs: Some(http::POOL_IDLE_TIMEOUT.as_secs()),
            pool_max_per_host: http::POOL_MAX_PER_HOST,
        }
    }
}

impl ApiConfigToml {
    /// Convert to runtime ClientConfig
    pub fn to_runtime_config(&self) -> ClientConfig {
        ClientConfig {
            base_url: self.base_url.clone(),
            request_timeout: Duration::from_secs(self.request_timeout_secs),
            connect_timeout: Duration::from_secs(self.connect_timeout_secs),
            tcp_nodelay: self.tcp_nodelay,
            pool_idle_timeout: self.pool_idle_timeout_secs.map(Duration::from_secs),
            pool_max_per_host: self.pool_max_per_host,
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Default log level for the application
    pub level: String,
}

impl LoggingConfig {
    /// Parsed log level
    pub fn level(&self) -> ConfigResult<tracing::Level> {
        self.level
            .trim()
            .parse::<tracing::Level>()
            .map_err(|e| ConfigError::InvalidValue {
                field: "logging.level".to_string(),
                value: self.level.clone(),
                reason: e.to_string(),
            })
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: logging::DEFAULT_LOG_LEVEL.to_string(),
        }
    }
}

impl AppConfig {
    /// Load configuration with multi-source precedence:
    /// 1. Default values
    /// 2. Config file (explicit, or the first one found)
    /// 3. Environment variables
    ///
    /// CLI overrides are applied by the caller.
    pub async fn load(config_file_override: Option<PathBuf>) -> ConfigResult<Self> {
        let mut config = Self::default();

        let config_path = match config_file_override {
            Some(path) => {
                if !path.exists() {
                    return Err(ConfigError::NotFound { path });
                }
                Some(path)
            }
            None => Self::find_config_file(),
        };

        if let Some(path) = config_path {
            config = Self::load_from_file(&path).await?;
        }

        config.apply_env_overrides(|name| std::env::var(name).ok());

        Ok(config)
    }

    /// Apply environment variable overrides using `lookup`
    pub fn apply_env_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(base_url) = lookup(env_vars::API_URL).filter(|v| !v.is_empty()) {
            debug!("Overriding API base URL from {}", env_vars::API_URL);
            self.api.base_url = base_url;
        }
        if let Some(root) = lookup(env_vars::ROOT).filter(|v| !v.is_empty()) {
            debug!("Overriding system root from {}", env_vars::ROOT);
            self.system.paths.root = PathBuf::from(root);
        }
    }

    /// Check the configuration before any work starts
    pub fn validate(&self) -> ConfigResult<()> {
        let client_config = self.api.to_runtime_config();
        client_config
            .parse_base_url()
            .map_err(|e| ConfigError::InvalidValue {
                field: "api.base_url".to_string(),
                value: self.api.base_url.clone(),
                reason: e.to_string(),
            })?;

        self.logging.level()?;

        if self.system.paths.root.as_os_str().is_empty() {
            return Err(ConfigError::MissingField {
                field: "system.paths.root".to_string(),
            });
        }
        if !self.system.paths.root.is_absolute() {
            return Err(ConfigError::InvalidValue {
                field: "system.paths.root".to_string(),
                value: self.system.paths.root.display().to_string(),
                reason: "The system root must be an absolute path".to_string(),
            });
        }

        for application in &self.system.translated_applications {
            if application.name.trim().is_empty() || application.name.contains('/') {
                return Err(ConfigError::InvalidValue {
                    field: "system.translated_applications".to_string(),
                    value: application.name.clone(),
                    reason: "Application names must be non-empty and contain no '/'".to_string(),
                });
            }
        }

        Ok(())
    }

    /// Cache configuration derived from the system root
    pub fn cache_config(&self) -> CacheConfig {
        CacheConfig::for_system_root(&self.system.paths.root)
    }

    /// Write a commented default configuration file
    ///
    /// Uses the user config location when `path` is `None`.
    pub async fn initialize(path: Option<PathBuf>, force: bool) -> ConfigResult<PathBuf> {
        let config_path = match path {
            Some(path) => path,
            None => Self::get_default_config_path()?,
        };

        if config_path.exists() && !force {
            return Err(ConfigError::AlreadyExists { path: config_path });
        }

        if let Some(parent) = config_path.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|source| ConfigError::Io {
                    path: parent.to_path_buf(),
                    source,
                })?;
        }

        tokio::fs::write(&config_path, Self::generate_default_config_content())
            .await
            .map_err(|source| ConfigError::Io {
                path: config_path.clone(),
                source,
            })?;

        info!("Created configuration file: {}", config_path.display());
        Ok(config_path)
    }

    /// Render the configuration as TOML
    pub fn to_toml_string(&self) -> ConfigResult<String> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::InvalidValue {
            field: "config".to_string(),
            value: String::new(),
            reason: e.to_string(),
        })
    }

    /// Find configuration file in standard locations
    fn find_config_file() -> Option<PathBuf> {
        let mut search_paths = vec![
            // Project-local config
            PathBuf::from(".").join(files::LOCAL_FILE_NAME),
            PathBuf::from(".").join(files::FILE_NAME),
        ];
        // User config
        if let Ok(path) = Self::get_default_config_path() {
            search_paths.push(path);
        }
        // System config (Unix only)
        #[cfg(unix)]
        search_paths.push(
            PathBuf::from("/etc")
                .join(files::APP_DIR_NAME)
                .join(files::FILE_NAME),
        );

        let found = search_paths.into_iter().find(|path| path.exists());
        match &found {
            Some(path) => debug!("Found config file: {}", path.display()),
            None => debug!("No config file found in standard locations"),
        }
        found
    }

    /// Get the default config file path for the current user
    fn get_default_config_path() -> ConfigResult<PathBuf> {
        Self::config_path_in(dirs::config_dir())
    }

    fn config_path_in(config_dir: Option<PathBuf>) -> ConfigResult<PathBuf> {
        let config_dir = config_dir.ok_or(ConfigError::NoConfigDirectory)?;
        Ok(config_dir.join(files::APP_DIR_NAME).join(files::FILE_NAME))
    }

    /// Load configuration from a TOML file
    async fn load_from_file(path: &Path) -> ConfigResult<Self> {
        let content = tokio::fs::read_to_string(path)
            .await
            .map_err(|source| ConfigError::Io {
                path: path.to_path_buf(),
                source,
            })?;

        let config: AppConfig = toml::from_str(&content)?;

        info!("Loaded configuration from: {}", path.display());
        Ok(config)
    }

    /// Generate default configuration content with helpful comments
    pub fn generate_default_config_content() -> String {
        let default_root = PathsConfig::default().root;

        format!(
            r#"# Language Batch Configuration
# You can customize any of these settings to suit your needs.

[system.translated_applications]
# application = ["language", ...]
# Applications and languages are processed in the order listed here.
portal = ["en", "hu"]

[system.paths]
# Generated files are written below <root>/cache
root = "{}"

[api]
# Language API location (overridden by {})
base_url = "{}"
request_timeout_secs = {}
connect_timeout_secs = {}
tcp_nodelay = true
pool_idle_timeout_secs = {}
pool_max_per_host = {}

[logging]
level = "{}"  # error, warn, info, debug, trace
"#,
            default_root.display().to_string().replace('\\', "\\\\"),
            env_vars::API_URL,
            http::DEFAULT_BASE_URL,
            http::DEFAULT_TIMEOUT.as_secs(),
            http::CONNECT_TIMEOUT.as_secs(),
            http::POOL_IDLE_TIMEOUT.as_secs(),
            http::POOL_MAX_PER_HOST,
            logging::DEFAULT_LOG_LEVEL,
        )
    }
}
