use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::PathBuf;

use thiserror::Error;

const DEFAULT_DATABASE_URL: &str = "sqlite://rotation.db";
const DEFAULT_PORT: u16 = 3001;
const DEFAULT_MAX_CONNECTIONS: u32 = 5;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Invalid {name}: {value}")]
    Invalid { name: &'static str, value: String },
}

/// Runtime configuration, read from the environment
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub database_url: String,
    pub max_connections: u32,
    pub bind_addr: SocketAddr,
    /// Directory with a prebuilt UI bundle, served for non-API paths
    pub static_dir: Option<PathBuf>,
}

impl Config {
    /// Reads `DATABASE_URL`, `DATABASE_MAX_CONNECTIONS`, `HOST`, `PORT` and `STATIC_DIR`
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Builds a config from an arbitrary variable source
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let database_url = lookup("DATABASE_URL").unwrap_or_else(|| {
            tracing::warn!("DATABASE_URL not set, using default");
            DEFAULT_DATABASE_URL.to_string()
        });
        let max_connections = parse_or(&lookup, "DATABASE_MAX_CONNECTIONS", DEFAULT_MAX_CONNECTIONS)?;
        let host: IpAddr = parse_or(&lookup, "HOST", IpAddr::V4(Ipv4Addr::UNSPECIFIED))?;
        let port = parse_or(&lookup, "PORT", DEFAULT_PORT)?;
        let static_dir = lookup("STATIC_DIR")
            .filter(|dir| !dir.is_empty())
            .map(PathBuf::from);

        Ok(Self {
            database_url,
            max_connections,
            bind_addr: SocketAddr::new(host, port),
            static_dir,
        })
    }
}

fn parse_or<F, T>(lookup: &F, name: &'static str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
{
    match lookup(name) {
        Some(value) => value
            .parse()
            .map_err(|_| ConfigError::Invalid { name, value }),
        None => Ok(default),
    }
}
