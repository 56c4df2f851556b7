//! Multi-server configuration
//!
//! Loads the upstream server list and output paths from a TOML file.

use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::error::{Result, XtreamError};

/// One configured upstream portal
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Numeric server identity, used in the playlist file name
    pub id: u32,

    /// Portal base URL, including scheme (e.g. `http://portal.example.com`)
    pub host_url: String,

    /// Portal account name
    pub username: String,

    /// Portal account password
    pub password: String,
}

impl ServerConfig {
    /// Hostname of the portal, with the URL scheme stripped
    pub fn alias(&self) -> &str {
        self.host_url
            .trim_start_matches("https://")
            .trim_start_matches("http://")
    }

    /// Base URL for playable stream links: `{host_url}/{username}/{password}`
    pub fn playlist_base_url(&self) -> String {
        format!("{}/{}/{}", self.host_url, self.username, self.password)
    }
}

/// Application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Playlist path prefix; extended with the server id and file extension
    #[serde(default = "default_playlist_base")]
    pub playlist_base: String,

    /// Hosts override file kept in sync with DNS when requested
    #[serde(default = "default_hosts_file")]
    pub hosts_file: PathBuf,

    /// Configured upstream servers, processed in order
    #[serde(default)]
    pub servers: Vec<ServerConfig>,
}

fn default_playlist_base() -> String {
    "/opt/xtream_playlist_".to_string()
}

fn default_hosts_file() -> PathBuf {
    PathBuf::from("/etc/hosts")
}

impl AppConfig {
    /// Load configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content =
            std::fs::read_to_string(path.as_ref()).map_err(|source| XtreamError::File {
                path: path.as_ref().to_path_buf(),
                source,
            })?;
        let config: AppConfig =
            toml::from_str(&content).map_err(|e| XtreamError::Config(e.to_string()))?;
        Ok(config)
    }
}
