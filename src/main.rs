//! Xtream portal playlist generator
//!
//! Fetches the live channel catalog from one or more Xtream-style
//! portals and writes an M3U-family playlist per server, with optional
//! hosts-file reconciliation, name cleaning, and permission relaxation.

mod config;
mod error;
mod hosts;
mod playlist;
mod portal;
mod resolve;
mod runner;

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::AppConfig;
use crate::playlist::Dialect;
use crate::runner::{run_all, RunOptions};

/// Application version
const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Application name
const APP_NAME: &str = "xtream-m3u";

#[derive(Parser)]
#[command(name = "xtream-m3u")]
#[command(about = "Generates playlists from Xtream portals, with optional hosts file update, chmod, and name cleaning")]
struct Cli {
    /// Generate .m3u8 files (default is .m3u)
    #[arg(long, conflicts_with = "m3u8_plus")]
    m3u8: bool,

    /// Generate .m3u8_plus files
    #[arg(long)]
    m3u8_plus: bool,

    /// Resolve DNS and update the hosts override file
    #[arg(long)]
    dns: bool,

    /// chmod 777 the generated playlist files
    #[arg(long)]
    chmod: bool,

    /// Clean up stream names (removes tags, special chars)
    #[arg(long)]
    clean: bool,

    /// Path to the server configuration file
    #[arg(long, default_value = "config.toml")]
    config: String,
}

impl Cli {
    fn dialect(&self) -> Dialect {
        if self.m3u8_plus {
            Dialect::ExtendedPlus
        } else if self.m3u8 {
            Dialect::Extended
        } else {
            Dialect::Plain
        }
    }
}

#[tokio::main]
async fn main() {
    init_logging();

    let cli = Cli::parse();
    tracing::info!("{} v{} starting", APP_NAME, VERSION);

    let config = match AppConfig::from_file(&cli.config) {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("Failed to load config file {}: {}", cli.config, e);
            std::process::exit(1);
        }
    };
    if config.servers.is_empty() {
        tracing::warn!("No servers configured in {}. Nothing to do.", cli.config);
        return;
    }

    let options = RunOptions {
        dialect: cli.dialect(),
        update_hosts: cli.dns,
        relax_permissions: cli.chmod,
        clean_names: cli.clean,
    };

    // Best-effort batch: per-server failures are logged inside the
    // runner and never abort the remaining servers.
    run_all(&config, options).await;
}

/// Initialize logging with tracing
fn init_logging() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "xtream_m3u=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}
