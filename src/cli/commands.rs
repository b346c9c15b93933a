//! Command handlers for Language Batch CLI
//!
//! This module implements the command handlers that coordinate between CLI
//! arguments and the batch workflows.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;

use tracing::{debug, info};

use crate::app::{FileCacheStore, HttpApiClient, LanguageBatch};
use crate::cli::{ConfigAction, ConfigArgs, GlobalArgs};
use crate::config::AppConfig;
use crate::errors::Result;

/// Handle the languages command
pub async fn handle_languages(global: &GlobalArgs) -> Result<()> {
    let start_time = Instant::now();
    let batch = build_batch(load_config(global).await?).await?;

    let written = batch.generate_language_files().await?;

    info!(
        "Language files completed: {} files in {:?}",
        written,
        start_time.elapsed()
    );
    Ok(())
}

/// Handle the applets command
pub async fn handle_applets(global: &GlobalArgs) -> Result<()> {
    let start_time = Instant::now();
    let batch = build_batch(load_config(global).await?).await?;

    let written = batch.generate_applet_language_xml_files().await?;

    info!(
        "Applet language XMLs completed: {} files in {:?}",
        written,
        start_time.elapsed()
    );
    Ok(())
}

/// Handle the all command
///
/// Applet XMLs are only generated once every translation file succeeded.
pub async fn handle_all(global: &GlobalArgs) -> Result<()> {
    let start_time = Instant::now();
    let batch = build_batch(load_config(global).await?).await?;

    let languages = batch.generate_language_files().await?;
    let applets = batch.generate_applet_language_xml_files().await?;

    info!(
        "Batch completed: {} language files and {} applet XMLs in {:?}",
        languages,
        applets,
        start_time.elapsed()
    );
    Ok(())
}

/// Handle configuration management
pub async fn handle_config(args: ConfigArgs, global: &GlobalArgs) -> Result<()> {
    match args.action {
        ConfigAction::Init { force, path } => handle_config_init(path, force).await,
        ConfigAction::Show => handle_config_show(global).await,
    }
}

async fn handle_config_init(path: Option<PathBuf>, force: bool) -> Result<()> {
    let written = AppConfig::initialize(path, force).await?;
    println!("Configuration written to {}", written.display());
    Ok(())
}

async fn handle_config_show(global: &GlobalArgs) -> Result<()> {
    let config = apply_cli_overrides(AppConfig::load(global.config.clone()).await?, global);
    print!("{}", config.to_toml_string()?);
    Ok(())
}

/// Load the configuration, apply CLI overrides and validate the result
pub async fn load_config(global: &GlobalArgs) -> Result<AppConfig> {
    let config = apply_cli_overrides(AppConfig::load(global.config.clone()).await?, global);
    config.validate()?;

    debug!(
        "Using system root {} with {} configured applications",
        config.system.paths.root.display(),
        config.system.translated_applications.len()
    );
    Ok(config)
}

fn apply_cli_overrides(mut config: AppConfig, global: &GlobalArgs) -> AppConfig {
    if let Some(root) = &global.root {
        config.system.paths.root = root.clone();
    }
    if let Some(api_url) = &global.api_url {
        config.api.base_url = api_url.clone();
    }
    config
}

/// Wire the HTTP client and filesystem cache into a batch
pub async fn build_batch(config: AppConfig) -> Result<LanguageBatch> {
    let api = HttpApiClient::new(&config.api.to_runtime_config())?;
    let cache = FileCacheStore::new(config.cache_config()).await?;

    Ok(LanguageBatch::new(
        Arc::new(api),
        Arc::new(cache),
        Arc::new(config.system),
    ))
}
