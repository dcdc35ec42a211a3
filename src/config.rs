//! Configuration layer — CLI/env via `clap`, optional TOML override file.
//!
//! Priority (highest to lowest), same order the teacher daemon documents in
//! its own `config/mod.rs`: CLI/env > TOML file > built-in default.

use serde::Deserialize;
use std::net::IpAddr;
use std::path::Path;
use tracing::{error, warn};

const DEFAULT_RATE_LIMIT_PER_MIN: u32 = 5;
const DEFAULT_CACHE_TTL_SECS: u64 = 3600;
const DEFAULT_IMAGE_LIMIT: usize = 3;
const DEFAULT_MAX_CONNECTIONS_PER_HOST: usize = 8;

/// Optional `{--config}` TOML file. Every field is an override.
#[derive(Deserialize, Default)]
struct TomlOverrides {
    rate_limit_per_minute: Option<u32>,
    cache_ttl_secs: Option<u64>,
    image_limit: Option<usize>,
    max_connections_per_host: Option<usize>,
    worker_pool_size: Option<usize>,
}

fn load_toml(path: &Path) -> Option<TomlOverrides> {
    let contents = std::fs::read_to_string(path).ok()?;
    match toml::from_str::<TomlOverrides>(&contents) {
        Ok(cfg) => Some(cfg),
        Err(e) => {
            error!(path = %path.display(), err = %e, "failed to parse config file — using defaults/CLI only");
            None
        }
    }
}

/// Resolved configuration for `scrape-frontend`.
#[derive(Debug, Clone)]
pub struct FrontendConfig {
    pub listen_ip: IpAddr,
    pub listen_port: u16,
    pub proc_ip: IpAddr,
    pub proc_port: u16,
    pub max_connections_per_host: usize,
    pub rate_limit_per_minute: u32,
    pub cache_ttl_secs: u64,
    pub image_limit: usize,
}

impl FrontendConfig {
    #[allow(clippy::too_many_arguments)]
    pub fn resolve(
        listen_ip: IpAddr,
        listen_port: u16,
        proc_ip: IpAddr,
        proc_port: u16,
        workers: Option<usize>,
        rate_limit: Option<u32>,
        cache_ttl: Option<u64>,
        config_path: Option<&Path>,
    ) -> Self {
        let overrides = config_path.and_then(load_toml).unwrap_or_default();
        Self {
            listen_ip,
            listen_port,
            proc_ip,
            proc_port,
            max_connections_per_host: workers
                .or(overrides.max_connections_per_host)
                .unwrap_or(DEFAULT_MAX_CONNECTIONS_PER_HOST),
            rate_limit_per_minute: rate_limit
                .or(overrides.rate_limit_per_minute)
                .unwrap_or(DEFAULT_RATE_LIMIT_PER_MIN),
            cache_ttl_secs: cache_ttl
                .or(overrides.cache_ttl_secs)
                .unwrap_or(DEFAULT_CACHE_TTL_SECS),
            image_limit: overrides.image_limit.unwrap_or(DEFAULT_IMAGE_LIMIT),
        }
    }
}

/// Resolved configuration for `processing-server`.
#[derive(Debug, Clone)]
pub struct ProcessingConfig {
    pub listen_ip: IpAddr,
    pub listen_port: u16,
    pub worker_pool_size: usize,
}

impl ProcessingConfig {
    pub fn resolve(
        listen_ip: IpAddr,
        listen_port: u16,
        processes: Option<usize>,
        config_path: Option<&Path>,
    ) -> Self {
        let overrides = config_path.and_then(load_toml).unwrap_or_default();
        let size = processes
            .filter(|n| *n > 0)
            .or(overrides.worker_pool_size)
            .unwrap_or_else(default_pool_size);
        if size == 0 {
            warn!("resolved worker pool size of 0 — forcing 1");
        }
        Self {
            listen_ip,
            listen_port,
            worker_pool_size: size.max(1),
        }
    }
}

fn default_pool_size() -> usize {
    std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1)
        .max(1)
}
