// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # Runtime Configuration
//!
//! Configuration is loaded from the environment once at startup and passed
//! to the router through [`AppState`](crate::state::AppState). Handlers never
//! read the environment themselves.
//!
//! ## Environment Variables
//!
//! | Variable | Description | Default |
//! |----------|-------------|---------|
//! | `DB_SECRET_ARN` | Identifier (ARN or name) of the secret to serve | Required |
//! | `HOST` | Server bind address | `0.0.0.0` |
//! | `PORT` | Server bind port | `3000` |
//! | `SECRET_FETCH_TIMEOUT_SECS` | Timeout for one Secrets Manager call | `10` |
//! | `SECRETS_MANAGER_REGION` | Region override for the Secrets Manager client | AWS default chain, then `us-east-1` |
//! | `SECRETS_MANAGER_ENDPOINT` | Endpoint URL override (e.g. LocalStack) | None |
//! | `LOG_FORMAT` | Logging format (`json` or `pretty`) | `pretty` |
//! | `RUST_LOG` | Log level filter | `info,tower_http=debug` |

use std::net::{IpAddr, SocketAddr};
use std::time::Duration;

/// Environment variable holding the identifier of the secret to serve.
pub const SECRET_ID_ENV: &str = "DB_SECRET_ARN";

/// Environment variable for the bind address.
pub const HOST_ENV: &str = "HOST";

/// Environment variable for the bind port.
pub const PORT_ENV: &str = "PORT";

/// Environment variable for the outbound call timeout, in whole seconds.
pub const FETCH_TIMEOUT_ENV: &str = "SECRET_FETCH_TIMEOUT_SECS";

/// Environment variable overriding the Secrets Manager region.
pub const REGION_ENV: &str = "SECRETS_MANAGER_REGION";

/// Environment variable overriding the Secrets Manager endpoint URL.
pub const ENDPOINT_ENV: &str = "SECRETS_MANAGER_ENDPOINT";

/// Environment variable selecting the log output format.
pub const LOG_FORMAT_ENV: &str = "LOG_FORMAT";

pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_FETCH_TIMEOUT: Duration = Duration::from_secs(10);

/// Region used when neither the override nor the AWS default chain yields one.
pub const FALLBACK_REGION: &str = "us-east-1";

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{0} must be set to the identifier of the secret to serve")]
    MissingSecretId(&'static str),

    #[error("HOST is not a valid IP address: {0}")]
    InvalidHost(String),
}

/// Process-wide configuration. Read-only after startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub host: IpAddr,
    pub port: u16,
    pub secret_id: String,
    pub fetch_timeout: Duration,
    pub region: Option<String>,
    pub endpoint_url: Option<String>,
}

impl Config {
    /// Load configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary key lookup.
    ///
    /// Blank values are treated as unset. `PORT` and
    /// `SECRET_FETCH_TIMEOUT_SECS` fall back to their defaults when they do
    /// not parse; only a missing secret identifier or an unusable host is
    /// fatal.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let secret_id = get(SECRET_ID_ENV).ok_or(ConfigError::MissingSecretId(SECRET_ID_ENV))?;

        let host_raw = get(HOST_ENV).unwrap_or_else(|| DEFAULT_HOST.to_string());
        let host: IpAddr = host_raw
            .parse()
            .map_err(|_| ConfigError::InvalidHost(host_raw.clone()))?;

        let port = get(PORT_ENV)
            .and_then(|v| v.parse::<u16>().ok())
            .unwrap_or(DEFAULT_PORT);

        let fetch_timeout = get(FETCH_TIMEOUT_ENV)
            .and_then(|v| v.parse::<u64>().ok())
            .filter(|secs| *secs > 0)
            .map(Duration::from_secs)
            .unwrap_or(DEFAULT_FETCH_TIMEOUT);

        Ok(Self {
            host,
            port,
            secret_id,
            fetch_timeout,
            region: get(REGION_ENV),
            endpoint_url: get(ENDPOINT_ENV),
        })
    }

    pub fn bind_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}
