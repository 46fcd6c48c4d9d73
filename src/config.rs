use std::{
    env,
    net::{IpAddr, Ipv4Addr, SocketAddr},
    str::FromStr,
    time::Duration,
};

use phonenumber::country;

use crate::errors::StartupError;

const DEFAULT_BIND_ADDR: SocketAddr = SocketAddr::new(IpAddr::V4(Ipv4Addr::UNSPECIFIED), 5000);
const DEFAULT_PHONE_REGION: &str = "SE";
const DEFAULT_MAX_CONNECTIONS: u32 = 10;
const DEFAULT_EXPIRY_SWEEP_SECS: u64 = 60;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageBackend {
    Postgres,
    Memory,
}

impl FromStr for StorageBackend {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "postgres" | "postgresql" => Ok(StorageBackend::Postgres),
            "memory" => Ok(StorageBackend::Memory),
            _ => Err(()),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub storage_backend: StorageBackend,
    pub database_url: Option<String>,
    pub database_max_connections: u32,
    pub bind_addr: SocketAddr,
    pub phone_region: country::Id,
    pub expiry_sweep_interval: Duration,
}

impl Config {
    /// Reads the process environment. Call `dotenvy::dotenv()` first to pick up `.env`.
    pub fn from_env() -> Result<Self, StartupError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, StartupError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let storage_backend = parse_or("STORAGE_BACKEND", &lookup, StorageBackend::Postgres)?;

        let database_url = lookup("DATABASE_URL").filter(|url| !url.is_empty());
        if storage_backend == StorageBackend::Postgres && database_url.is_none() {
            return Err(StartupError::MissingVar("DATABASE_URL"));
        }

        let bind_addr = parse_or("BIND_ADDR", &lookup, DEFAULT_BIND_ADDR)?;

        let region = lookup("PHONE_REGION").unwrap_or_else(|| DEFAULT_PHONE_REGION.into());
        let phone_region = region
            .to_ascii_uppercase()
            .parse::<country::Id>()
            .map_err(|_| StartupError::InvalidVar { key: "PHONE_REGION", value: region })?;

        let database_max_connections =
            parse_or("DATABASE_MAX_CONNECTIONS", &lookup, DEFAULT_MAX_CONNECTIONS)?;
        let sweep_secs: u64 = parse_or("EXPIRY_SWEEP_SECS", &lookup, DEFAULT_EXPIRY_SWEEP_SECS)?;
        if sweep_secs == 0 {
            return Err(StartupError::InvalidVar {
                key: "EXPIRY_SWEEP_SECS",
                value: sweep_secs.to_string(),
            });
        }

        Ok(Self {
            storage_backend,
            database_url,
            database_max_connections,
            bind_addr,
            phone_region,
            expiry_sweep_interval: Duration::from_secs(sweep_secs),
        })
    }
}

fn parse_or<T, F>(key: &'static str, lookup: &F, default: T) -> Result<T, StartupError>
where
    T: FromStr,
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        Some(value) => value
            .trim()
            .parse()
            .map_err(|_| StartupError::InvalidVar { key, value }),
        None => Ok(default),
    }
}
