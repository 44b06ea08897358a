//! Configuration structures and loading logic.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use directories::UserDirs;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Default REST endpoint of the collection API.
pub const DEFAULT_API_BASE: &str = "https://api.flickr.com/services/rest";

/// Main configuration structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub account: AccountConfig,

    #[serde(default)]
    pub options: OptionsConfig,
}

/// Account credentials configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AccountConfig {
    /// Application key sent with every API call.
    #[serde(default)]
    pub api_key: String,

    /// Access token obtained from the authorization handshake.
    #[serde(default)]
    pub token: String,

    /// Secret paired with the access token.
    #[serde(default)]
    pub token_secret: String,

    /// Owner of the albums. Discovered through the login check when unset.
    #[serde(default)]
    pub user_id: Option<String>,
}

/// Backup options configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OptionsConfig {
    /// Root directory holding one subdirectory per album.
    #[serde(default)]
    pub backup_directory: Option<PathBuf>,

    /// Page of albums to back up (1-based).
    #[serde(default = "default_page")]
    pub page: u32,

    /// Number of albums per page, i.e. per run.
    #[serde(default = "default_albums_per_run")]
    pub albums_per_run: u32,

    /// Download attempts per item before it is recorded as failed.
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,

    /// Pause between download attempts in milliseconds (0 retries immediately).
    #[serde(default)]
    pub retry_delay_ms: u64,

    /// Upper bound on item downloads running at the same time.
    #[serde(default = "default_max_concurrent_downloads")]
    pub max_concurrent_downloads: usize,

    /// Timeout of a single HTTP request in seconds.
    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,

    /// Retries performed by the HTTP layer itself for each request.
    #[serde(default = "default_transport_retries")]
    pub transport_retries: u32,

    /// Base delay of the HTTP layer's exponential backoff in milliseconds.
    #[serde(default = "default_transport_backoff")]
    pub transport_backoff_ms: u64,

    /// Cancel whatever is still running after this many seconds.
    #[serde(default)]
    pub run_deadline_secs: Option<u64>,

    /// Whether to print a line for every processed item.
    #[serde(default = "default_true")]
    pub show_progress: bool,

    /// REST endpoint of the collection API.
    #[serde(default = "default_api_base")]
    pub api_base: String,
}

impl Default for OptionsConfig {
    fn default() -> Self {
        Self {
            backup_directory: None,
            page: default_page(),
            albums_per_run: default_albums_per_run(),
            max_attempts: default_max_attempts(),
            retry_delay_ms: 0,
            max_concurrent_downloads: default_max_concurrent_downloads(),
            request_timeout_secs: default_request_timeout(),
            transport_retries: default_transport_retries(),
            transport_backoff_ms: default_transport_backoff(),
            run_deadline_secs: None,
            show_progress: true,
            api_base: default_api_base(),
        }
    }
}

fn default_page() -> u32 {
    1
}

fn default_albums_per_run() -> u32 {
    10
}

fn default_max_attempts() -> u32 {
    5
}

fn default_max_concurrent_downloads() -> usize {
    8
}

fn default_request_timeout() -> u64 {
    8 * 60
}

fn default_transport_retries() -> u32 {
    5
}

fn default_transport_backoff() -> u64 {
    1000
}

fn default_true() -> bool {
    true
}

fn default_api_base() -> String {
    DEFAULT_API_BASE.to_string()
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                Error::Config(format!(
                    "Configuration file not found: {}. Create one from config.example.toml",
                    path.display()
                ))
            } else {
                Error::Io(e)
            }
        })?;

        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    /// Save configuration to a TOML file.
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| Error::Config(format!("Failed to serialize config: {}", e)))?;
        fs::write(path, content)?;
        Ok(())
    }

    /// Get the effective backup root.
    ///
    /// Falls back to `<Pictures>/album-backup`, then `./backup`.
    pub fn backup_directory(&self) -> PathBuf {
        self.options.backup_directory.clone().unwrap_or_else(|| {
            UserDirs::new()
                .and_then(|dirs| dirs.picture_dir().map(|p| p.join("album-backup")))
                .unwrap_or_else(|| PathBuf::from("backup"))
        })
    }

    /// Per-request HTTP timeout.
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.options.request_timeout_secs)
    }

    /// Pause between item download attempts.
    pub fn retry_delay(&self) -> Duration {
        Duration::from_millis(self.options.retry_delay_ms)
    }

    /// Global run deadline, if configured.
    pub fn run_deadline(&self) -> Option<Duration> {
        self.options.run_deadline_secs.map(Duration::from_secs)
    }
}
