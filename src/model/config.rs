use std::time::Duration;

use serde::{Deserialize, Serialize};

pub const DEFAULT_BASE_URL: &str = "http://localhost:5000";

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ClientConfig {
    pub version: u32,

    #[serde(default)]
    pub remote: Option<RemoteConfig>,

    #[serde(default)]
    pub browse: BrowseConfig,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            version: 1,
            remote: None,
            browse: BrowseConfig::default(),
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RemoteConfig {
    pub base_url: String,
}

impl Default for RemoteConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }
}

fn default_poll_interval_ms() -> u64 {
    5_000
}

fn default_notice_ttl_ms() -> u64 {
    3_000
}

fn default_deep_link_settle_ms() -> u64 {
    500
}

/// Timing knobs for the browsing session.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BrowseConfig {
    /// Catalog re-pull interval.
    #[serde(default = "default_poll_interval_ms")]
    pub poll_interval_ms: u64,

    /// How long a transient notification stays up.
    #[serde(default = "default_notice_ttl_ms")]
    pub notice_ttl_ms: u64,

    /// Delay between a deep-link target appearing and scrolling to it.
    #[serde(default = "default_deep_link_settle_ms")]
    pub deep_link_settle_ms: u64,
}

impl Default for BrowseConfig {
    fn default() -> Self {
        Self {
            poll_interval_ms: default_poll_interval_ms(),
            notice_ttl_ms: default_notice_ttl_ms(),
            deep_link_settle_ms: default_deep_link_settle_ms(),
        }
    }
}

impl BrowseConfig {
    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }

    pub fn notice_ttl(&self) -> Duration {
        Duration::from_millis(self.notice_ttl_ms)
    }

    pub fn deep_link_settle(&self) -> Duration {
        Duration::from_millis(self.deep_link_settle_ms)
    }
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct ClientState {
    pub version: u32,

    /// Bearer credential. Kept out of config.json.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
}
