use anyhow::Context;
use serde::Deserialize;
use std::fs;
use std::path::Path;
use std::time::Duration;

const DEFAULT_CONFIG_PATH: &str = "config.toml";

#[derive(Debug, Deserialize, Clone, Default)]
pub struct Config {
    #[serde(default)]
    pub source: SourceConfig,
    #[serde(default)]
    pub retry: RetryConfig,
    #[serde(default)]
    pub cache: CacheConfig,
    #[serde(default)]
    pub server: ServerConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct SourceConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_chain")]
    pub chain: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct RetryConfig {
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,
    #[serde(default = "default_backoff_ms")]
    pub backoff_ms: u64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct CacheConfig {
    #[serde(default = "default_ttl_secs")]
    pub ttl_secs: u64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_base_url() -> String { "https://api.dexscreener.com/latest/dex/pairs".to_string() }
fn default_chain() -> String { "base".to_string() }
fn default_timeout_secs() -> u64 { 10 }
fn default_max_retries() -> u32 { 2 }
fn default_backoff_ms() -> u64 { 1000 }
fn default_ttl_secs() -> u64 { 60 }
fn default_host() -> String { "127.0.0.1".to_string() }
fn default_port() -> u16 { 8080 }

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            chain: default_chain(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_retries: default_max_retries(),
            backoff_ms: default_backoff_ms(),
        }
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self { ttl_secs: default_ttl_secs() }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

impl SourceConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl RetryConfig {
    pub fn backoff(&self) -> Duration {
        Duration::from_millis(self.backoff_ms)
    }
}

impl CacheConfig {
    pub fn ttl(&self) -> Duration {
        Duration::from_secs(self.ttl_secs)
    }
}

impl Config {
    /// Explicit path must exist; otherwise `./config.toml` is used when present,
    /// falling back to built-in defaults.
    pub fn load(path: Option<&Path>) -> anyhow::Result<Self> {
        match path {
            Some(path) => Self::from_file(path),
            None => {
                let default_path = Path::new(DEFAULT_CONFIG_PATH);
                if default_path.exists() {
                    Self::from_file(default_path)
                } else {
                    tracing::debug!("No {} found, using defaults", DEFAULT_CONFIG_PATH);
                    Ok(Self::default())
                }
            }
        }
    }

    pub fn from_file(path: &Path) -> anyhow::Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        Self::from_toml(&content).with_context(|| format!("parsing config {}", path.display()))
    }

    pub fn from_toml(content: &str) -> anyhow::Result<Self> {
        Ok(toml::from_str(content)?)
    }
}
