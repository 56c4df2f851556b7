//! Channel-source collaborator
//!
//! Fetches the live channel catalog from an Xtream-style portal
//! (`player_api.php`) as JSON. Portals are inconsistent about field
//! types, so numeric fields accept both JSON numbers and numeric
//! strings, and missing fields default to empty/false.

use serde::{Deserialize, Deserializer};
use serde_json::Value;
use std::time::Duration;

use crate::config::ServerConfig;
use crate::error::Result;

/// Browser User-Agent; some portals reject unknown clients
const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 Chrome/117.0.0.0 Safari/537.36";

/// Fixed request timeout; a slow portal is treated as failed, not retried
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// One channel as reported by the portal
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ChannelRecord {
    /// Display name; may carry embedded routing tags and junk characters
    #[serde(default)]
    pub name: String,

    /// Stream identifier; a record without one is not playable
    #[serde(default, deserialize_with = "lenient_id")]
    pub stream_id: Option<u64>,

    /// Catch-up/archive availability flag
    #[serde(default, deserialize_with = "lenient_flag")]
    pub tv_archive: bool,

    /// Channel logo URL
    #[serde(default)]
    pub stream_icon: String,

    /// Category the portal groups this channel under
    #[serde(default)]
    pub category_name: String,
}

/// Accepts `123`, `"123"`, or anything else (treated as absent)
fn lenient_id<'de, D>(deserializer: D) -> std::result::Result<Option<u64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::Number(n)) => n.as_u64(),
        Some(Value::String(s)) => s.parse().ok(),
        _ => None,
    })
}

/// Accepts `1` or `"1"` as true; anything else is false
fn lenient_flag<'de, D>(deserializer: D) -> std::result::Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::Number(n)) => n.as_i64() == Some(1),
        Some(Value::String(s)) => s == "1",
        _ => false,
    })
}

/// HTTP client for portal API calls
pub struct PortalClient {
    http: reqwest::Client,
}

impl PortalClient {
    pub fn new() -> Result<Self> {
        let http = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(REQUEST_TIMEOUT)
            .build()?;
        Ok(Self { http })
    }

    /// Fetch the live channel list for one server
    pub async fn fetch_live_streams(&self, server: &ServerConfig) -> Result<Vec<ChannelRecord>> {
        let url = format!(
            "{}/player_api.php?username={}&password={}&action=get_live_streams",
            server.host_url, server.username, server.password
        );
        let response = self.http.get(&url).send().await?.error_for_status()?;
        let records = response.json::<Vec<ChannelRecord>>().await?;
        Ok(records)
    }
}
