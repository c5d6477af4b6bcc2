//! Server configuration, read from the environment

use anyhow::{Context, Result};
use config::builder::DefaultState;
use config::{ConfigBuilder, Environment, Map};
use serde::Deserialize;
use std::net::SocketAddr;

pub const DEFAULT_PORT: u16 = 5000;
pub const DEFAULT_REDIS_URL: &str = "redis://localhost:6379";
pub const DEFAULT_REDIS_KEY: &str = "strings";

/// Environment variables the server reads. Anything else is ignored, so a
/// stray `HOST` or `PATH` in the process environment cannot leak in.
const ENV_KEYS: [&str; 5] = ["PORT", "BIND_HOST", "STORE_BACKEND", "REDIS_URL", "REDIS_KEY"];

/// Which `EntryStore` backs the API
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StoreBackend {
    Memory,
    Redis,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub bind_host: String,
    pub port: u16,
    pub store_backend: StoreBackend,
    pub redis_url: String,
    pub redis_key: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        // vars() panics on non-UTF-8 entries; skip those instead.
        Self::from_vars(std::env::vars_os().filter_map(|(name, value)| {
            Some((name.into_string().ok()?, value.into_string().ok()?))
        }))
    }

    /// Build from `(name, value)` pairs, keeping only [`ENV_KEYS`].
    pub fn from_vars<I>(vars: I) -> Result<Self>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let known: Map<String, String> = vars
            .into_iter()
            .filter(|(name, _)| ENV_KEYS.contains(&name.as_str()))
            .collect();
        Self::from_builder(
            config::Config::builder()
                .add_source(Environment::default().source(Some(known)).try_parsing(true)),
        )
    }

    fn from_builder(builder: ConfigBuilder<DefaultState>) -> Result<Self> {
        builder
            .set_default("bind_host", "0.0.0.0")?
            .set_default("port", i64::from(DEFAULT_PORT))?
            .set_default("store_backend", "memory")?
            .set_default("redis_url", DEFAULT_REDIS_URL)?
            .set_default("redis_key", DEFAULT_REDIS_KEY)?
            .build()
            .context("Failed to read configuration")?
            .try_deserialize()
            .context("Invalid configuration")
    }

    pub fn bind_address(&self) -> Result<SocketAddr> {
        format!("{}:{}", self.bind_host, self.port)
            .parse()
            .with_context(|| format!("Invalid bind address {}:{}", self.bind_host, self.port))
    }
}
