// Runtime configuration. Everything is read from the environment once at
// startup and then passed explicitly to the components that need it.

use std::path::PathBuf;
use std::time::Duration;

use crate::error::{Error, Result};

pub const ACCESS_KEY_VAR: &str = "UNSPLASH_ACCESS_KEY";
pub const API_URL_VAR: &str = "PHOTOFETCH_API_URL";
pub const OUTPUT_DIR_VAR: &str = "PHOTOFETCH_OUTPUT_DIR";
pub const CONCURRENCY_VAR: &str = "PHOTOFETCH_CONCURRENCY";
pub const TIMEOUT_VAR: &str = "PHOTOFETCH_TIMEOUT_SECS";

pub const DEFAULT_API_URL: &str = "https://api.unsplash.com";
pub const DEFAULT_OUTPUT_DIR: &str = "downloads";
pub const DEFAULT_CONCURRENCY: usize = 8;
pub const MAX_CONCURRENCY: usize = 20;

#[derive(Clone)]
pub struct Config {
    pub access_key: String,
    pub api_url: String,
    /// Base directory; each search gets its own subfolder below it.
    pub output_dir: PathBuf,
    /// Upper bound on simultaneous downloads.
    pub concurrency: usize,
    /// `None` means requests never time out.
    pub timeout: Option<Duration>,
}

// Hand-written so the access key never ends up in logs.
impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("access_key", &"<redacted>")
            .field("api_url", &self.api_url)
            .field("output_dir", &self.output_dir)
            .field("concurrency", &self.concurrency)
            .field("timeout", &self.timeout)
            .finish()
    }
}

impl Config {
    /// Build the configuration from the process environment.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build the configuration from an arbitrary key lookup. Only the access
    /// key is mandatory; everything else falls back to a default.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let access_key = lookup(ACCESS_KEY_VAR)
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .ok_or_else(|| Error::Config(format!("{ACCESS_KEY_VAR} is not set")))?;

        let api_url = lookup(API_URL_VAR)
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_API_URL.into())
            .trim_end_matches('/')
            .to_string();

        let output_dir = lookup(OUTPUT_DIR_VAR)
            .filter(|v| !v.trim().is_empty())
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT_DIR));

        let concurrency = match lookup(CONCURRENCY_VAR) {
            Some(raw) => raw
                .trim()
                .parse::<usize>()
                .map_err(|_| Error::Config(format!("{CONCURRENCY_VAR} must be a number, got {raw:?}")))?
                .clamp(1, MAX_CONCURRENCY),
            None => DEFAULT_CONCURRENCY,
        };

        let timeout = match lookup(TIMEOUT_VAR) {
            Some(raw) => {
                let secs = raw.trim().parse::<u64>().map_err(|_| {
                    Error::Config(format!("{TIMEOUT_VAR} must be a number of seconds, got {raw:?}"))
                })?;
                Some(Duration::from_secs(secs))
            }
            None => None,
        };

        Ok(Config {
            access_key,
            api_url,
            output_dir,
            concurrency,
            timeout,
        })
    }
}
