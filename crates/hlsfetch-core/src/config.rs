use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::PathBuf;
use std::time::Duration;

use crate::downloader::DEFAULT_CONCURRENCY;
use crate::retry::RetryPolicy;
use crate::scheduler::DEFAULT_MANIFEST;

/// Retry policy parameters (optional section in config.toml).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RetryConfig {
    /// Maximum number of attempts per segment (including the first).
    /// Missing or 0 means retry until the segment succeeds.
    #[serde(default)]
    pub max_attempts: Option<u32>,
    /// Base delay in seconds for exponential backoff (e.g. 0.25 = 250ms).
    pub base_delay_secs: f64,
    /// Maximum backoff delay in seconds.
    pub max_delay_secs: u64,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: None,
            base_delay_secs: 0.25,
            max_delay_secs: 30,
        }
    }
}

impl RetryConfig {
    /// Negative or NaN base delays become zero; anything above `max_delay_secs`
    /// (including infinity) is clamped to it.
    pub fn to_policy(&self) -> RetryPolicy {
        let max_delay = Duration::from_secs(self.max_delay_secs);
        let base_delay = if self.base_delay_secs.is_nan() || self.base_delay_secs <= 0.0 {
            Duration::ZERO
        } else {
            Duration::try_from_secs_f64(self.base_delay_secs)
                .unwrap_or(max_delay)
                .min(max_delay)
        };
        RetryPolicy {
            max_attempts: self.max_attempts.filter(|n| *n > 0),
            base_delay,
            max_delay,
        }
    }
}

/// HTTP timeouts for segment GETs (optional `[http]` section).
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct HttpConfig {
    pub connect_timeout_secs: u64,
    /// Abort a transfer whose throughput stays under `low_speed_limit_bytes` for this long.
    pub low_speed_time_secs: u64,
    pub low_speed_limit_bytes: u32,
    /// Hard wall-clock limit for one segment GET.
    pub timeout_secs: u64,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            connect_timeout_secs: 30,
            low_speed_time_secs: 60,
            low_speed_limit_bytes: 1024,
            timeout_secs: 600,
        }
    }
}

/// Global configuration loaded from `~/.config/hlsfetch/config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HlsfetchConfig {
    /// Number of segments fetched concurrently.
    pub concurrency: usize,
    /// File name of the ffmpeg concat list, written inside the temp folder.
    pub manifest_name: String,
    /// Program invoked for the final concatenation step.
    pub ffmpeg_path: String,
    /// Optional User-Agent sent with every segment GET.
    #[serde(default)]
    pub user_agent: Option<String>,
    /// Extra request headers sent with every segment GET.
    #[serde(default)]
    pub headers: BTreeMap<String, String>,
    /// Optional retry policy; if missing, segments are retried until they succeed.
    #[serde(default)]
    pub retry: Option<RetryConfig>,
    #[serde(default)]
    pub http: Option<HttpConfig>,
}

impl Default for HlsfetchConfig {
    fn default() -> Self {
        Self {
            concurrency: DEFAULT_CONCURRENCY,
            manifest_name: DEFAULT_MANIFEST.to_string(),
            ffmpeg_path: "ffmpeg".to_string(),
            user_agent: None,
            headers: BTreeMap::new(),
            retry: None,
            http: None,
        }
    }
}

impl HlsfetchConfig {
    /// Retry policy from the `[retry]` section, or the unlimited default.
    pub fn retry_policy(&self) -> RetryPolicy {
        self.retry.clone().unwrap_or_default().to_policy()
    }
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("hlsfetch")?;
    Ok(xdg_dirs.place_config_file("config.toml")?)
}

/// Load configuration from disk, creating a default file if none exists.
pub fn load_or_init() -> Result<HlsfetchConfig> {
    let path = config_path()?;
    if !path.exists() {
        let default_cfg = HlsfetchConfig::default();
        let toml = toml::to_string_pretty(&default_cfg)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, toml)?;
        tracing::info!("created default config at {}", path.display());
        return Ok(default_cfg);
    }

    let data = fs::read_to_string(&path)?;
    let cfg: HlsfetchConfig = toml::from_str(&data)?;
    Ok(cfg)
}
