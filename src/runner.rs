//! Per-server processing cycle
//!
//! Drives each configured server end to end: optional hosts
//! reconciliation, channel fetch, playlist rendering, persistence, and
//! optional permission relaxation. Servers run strictly in sequence
//! and one server's failure never stops the ones after it.

use std::path::PathBuf;

use crate::config::{AppConfig, ServerConfig};
use crate::error::Result;
use crate::hosts;
use crate::playlist::{persist_playlist, relax_permissions, render_playlist, Dialect};
use crate::portal::PortalClient;
use crate::resolve;

/// Run-wide switches, taken from the CLI
#[derive(Debug, Clone, Copy)]
pub struct RunOptions {
    pub dialect: Dialect,
    pub update_hosts: bool,
    pub relax_permissions: bool,
    pub clean_names: bool,
}

/// Process every configured server in order
pub async fn run_all(config: &AppConfig, options: RunOptions) {
    let client = match PortalClient::new() {
        Ok(client) => client,
        Err(e) => {
            tracing::error!("Failed to build HTTP client: {}", e);
            return;
        }
    };

    for server in &config.servers {
        tracing::info!(
            "--- [SERVER {:02}] Starting processing for {} ({}) ---",
            server.id,
            server.alias(),
            options.dialect.label()
        );
        log_options(&options);

        if let Err(e) = run_server(config, &client, server, options).await {
            tracing::error!("[SERVER {:02}] processing failed: {}", server.id, e);
        }

        tracing::info!("--- [SERVER {:02}] Processing complete ---", server.id);
    }
}

fn log_options(options: &RunOptions) {
    let state = |on: bool| if on { "Enabled" } else { "Disabled" };
    tracing::info!("Clean Name (--clean): {}", state(options.clean_names));
    tracing::info!("DNS/Hosts Update (--dns): {}", state(options.update_hosts));
    tracing::info!("File Chmod (--chmod): {}", state(options.relax_permissions));
}

async fn run_server(
    config: &AppConfig,
    client: &PortalClient,
    server: &ServerConfig,
    options: RunOptions,
) -> Result<()> {
    let alias = server.alias();

    if options.update_hosts {
        let ips = resolve::resolve_host_ips(alias).await;
        if ips.is_empty() {
            tracing::warn!("No IPs found for {}. Hosts file will not be updated.", alias);
        } else if let Err(e) = hosts::update_hosts_file(&config.hosts_file, alias, &ips) {
            // Reported, but playlist generation still runs for this server.
            tracing::error!("Hosts update for {} failed: {}", alias, e);
        }
    }

    let records = match client.fetch_live_streams(server).await {
        Ok(records) => records,
        Err(e) => {
            tracing::error!("API access to {} failed: {}", server.host_url, e);
            Vec::new()
        }
    };
    if records.is_empty() {
        tracing::warn!("Server {:02} did not return any stream data.", server.id);
        return Ok(());
    }

    let rendered = render_playlist(
        &records,
        options.dialect,
        &server.playlist_base_url(),
        options.clean_names,
    );
    let path = playlist_path(config, server, options.dialect);
    persist_playlist(&path, &rendered)?;
    tracing::info!(
        "{} file {} written with {} entries.",
        options.dialect.label(),
        path.display(),
        rendered.entries
    );

    if options.relax_permissions {
        match relax_permissions(&path) {
            Ok(()) => tracing::info!("Permissions for {} set to 777.", path.display()),
            Err(e) => tracing::error!("chmod for {} failed: {}", path.display(), e),
        }
    } else {
        tracing::info!("Skipping permissions change (chmod) for {}.", path.display());
    }

    Ok(())
}

fn playlist_path(config: &AppConfig, server: &ServerConfig, dialect: Dialect) -> PathBuf {
    PathBuf::from(format!(
        "{}{:02}{}",
        config.playlist_base,
        server.id,
        dialect.extension()
    ))
}
