//! Runtime configuration from environment variables (`.env` honoured by the binary).

use crate::error::ConfigError;
use std::net::SocketAddr;

pub const DEFAULT_BIND_ADDR: &str = "127.0.0.1:3000";
/// Request bodies above this size are rejected before reaching the handlers.
pub const DEFAULT_BODY_LIMIT: usize = 64 * 1024;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StoreBackend {
    DynamoDb,
    Memory,
}

#[derive(Clone, Debug)]
pub struct Config {
    pub backend: StoreBackend,
    /// Required for the DynamoDB backend.
    pub table_name: Option<String>,
    pub bind_addr: SocketAddr,
    /// Caps items per scan page; the store's own limit applies when unset.
    pub scan_page_size: Option<u32>,
    /// Host used in `next_page` links instead of the request's `Host` header.
    pub public_host: Option<String>,
    pub body_limit: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            backend: StoreBackend::Memory,
            table_name: None,
            bind_addr: DEFAULT_BIND_ADDR
                .parse()
                .unwrap_or_else(|_| SocketAddr::from(([127, 0, 0, 1], 3000))),
            scan_page_size: None,
            public_host: None,
            body_limit: DEFAULT_BODY_LIMIT,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build from any variable source; `from_env` passes the process environment.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |name: &str| lookup(name).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let store = var("STORE").map(|v| v.to_ascii_lowercase());
        let backend = match store.as_deref() {
            None | Some("dynamodb") => StoreBackend::DynamoDb,
            Some("memory") => StoreBackend::Memory,
            Some(other) => {
                return Err(ConfigError::Invalid {
                    name: "STORE",
                    reason: format!("unknown backend '{}', expected dynamodb or memory", other),
                })
            }
        };
        let table_name = var("TABLE_NAME");
        if backend == StoreBackend::DynamoDb && table_name.is_none() {
            return Err(ConfigError::Missing("TABLE_NAME"));
        }
        let bind_addr: SocketAddr = var("BIND_ADDR")
            .unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string())
            .parse()
            .map_err(|e: std::net::AddrParseError| ConfigError::Invalid {
                name: "BIND_ADDR",
                reason: e.to_string(),
            })?;
        let scan_page_size = match var("SCAN_PAGE_SIZE") {
            None => None,
            Some(raw) => match raw.parse::<u32>() {
                Ok(n) if n > 0 => Some(n),
                _ => {
                    return Err(ConfigError::Invalid {
                        name: "SCAN_PAGE_SIZE",
                        reason: format!("expected a positive integer, got '{}'", raw),
                    })
                }
            },
        };
        Ok(Self {
            backend,
            table_name,
            bind_addr,
            scan_page_size,
            public_host: var("PUBLIC_HOST"),
            body_limit: DEFAULT_BODY_LIMIT,
        })
    }
}
