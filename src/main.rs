//! Language Batch CLI application
//!
//! Command-line interface for regenerating cached translation files and
//! applet language XMLs from the language API.

use std::error::Error as _;
use std::process;

use tracing::{error, info};
use tracing_subscriber::{fmt, EnvFilter};

use language_batch::cli::{handle_all, handle_applets, handle_config, handle_languages, Cli, Commands};
use language_batch::config::AppConfig;
use language_batch::errors::{AppError, Result};

#[tokio::main]
async fn main() {
    // Initialize program
    let result = run().await;

    // Handle any errors that occurred
    if let Err(e) = result {
        report_error(&e);
        process::exit(1);
    }
}

/// Main application logic
async fn run() -> Result<()> {
    // Load environment variables from .env file if it exists
    dotenv::dotenv().ok();

    let cli = Cli::parse_args();

    // Load failures are reported by the command itself
    let configured = AppConfig::load(cli.global.config.clone()).await.ok();
    init_logging(&cli, cli.effective_log_level(configured.as_ref().map(|c| &c.logging)));

    info!("Language Batch v{} starting", env!("CARGO_PKG_VERSION"));

    match cli.command {
        Commands::Languages => {
            info!("Executing languages command");
            handle_languages(&cli.global).await
        }
        Commands::Applets => {
            info!("Executing applets command");
            handle_applets(&cli.global).await
        }
        Commands::All => {
            info!("Executing all command");
            handle_all(&cli.global).await
        }
        Commands::Config(args) => {
            info!("Executing config command");
            handle_config(args, &cli.global).await
        }
    }
}

/// Print the error and its causes
fn report_error(e: &AppError) {
    error!("{} error: {}", e.category(), e);

    eprintln!("Error: {}", e);
    let mut source = e.source();
    while let Some(cause) = source {
        eprintln!("  caused by: {}", cause);
        source = cause.source();
    }
}

/// Initialize logging at `log_level`, still refined by `RUST_LOG`
fn init_logging(cli: &Cli, log_level: tracing::Level) {
    let mut filter = EnvFilter::from_default_env();
    if let Ok(directive) = format!("language_batch={}", log_level).parse() {
        filter = filter.add_directive(directive);
    }

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_level(cli.global.very_verbose) // Show levels only in very verbose mode
        .with_writer(std::io::stderr)
        .init();

    if cli.global.very_verbose {
        info!("Very verbose logging enabled");
    } else if cli.global.verbose {
        info!("Verbose logging enabled");
    }
}
