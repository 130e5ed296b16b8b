// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # Runtime Configuration
//!
//! Environment variable names, defaults, and the parsed [`ServerConfig`].
//! Configuration is loaded from the environment once at startup.
//!
//! ## Environment Variables
//!
//! | Variable | Description | Default |
//! |----------|-------------|---------|
//! | `HOST` | Server bind address | `0.0.0.0` |
//! | `PORT` | Server bind port | `8080` |
//! | `DATA_DIR` | Root directory of the document store | `./data` |
//! | `JWT_SECRET` | HMAC secret for API tokens | Required |
//! | `TOKEN_TTL_HOURS` | API token lifetime, at most 8760 | `168` |
//! | `STORE_TIMEOUT_MS` | Deadline for each store call | `5000` |
//! | `BCRYPT_COST` | bcrypt work factor for new passwords | `12` |
//! | `TLS_CERT_PATH` | PEM certificate; enables TLS with `TLS_KEY_PATH` | Unset |
//! | `TLS_KEY_PATH` | PEM private key | Unset |
//! | `SEED_ADMIN_EMAIL` | Admin account created at startup if missing | Unset |
//! | `SEED_ADMIN_PASSWORD` | Password for the seeded admin | Unset |
//! | `LOG_FORMAT` | Logging format (`json` or `pretty`) | `pretty` |
//! | `RUST_LOG` | Log level filter | `info,tower_http=debug` |

use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

use crate::auth::{password::DEFAULT_BCRYPT_COST, token::DEFAULT_TOKEN_TTL_HOURS};
use crate::storage::paths::DATA_ROOT;

pub const HOST_ENV: &str = "HOST";
pub const PORT_ENV: &str = "PORT";

/// Environment variable name for the document store root.
pub const DATA_DIR_ENV: &str = "DATA_DIR";

/// Environment variable name for the token signing secret.
///
/// There is no default: the server refuses to start without it.
pub const JWT_SECRET_ENV: &str = "JWT_SECRET";

pub const TOKEN_TTL_HOURS_ENV: &str = "TOKEN_TTL_HOURS";
pub const STORE_TIMEOUT_MS_ENV: &str = "STORE_TIMEOUT_MS";
pub const BCRYPT_COST_ENV: &str = "BCRYPT_COST";
pub const TLS_CERT_PATH_ENV: &str = "TLS_CERT_PATH";
pub const TLS_KEY_PATH_ENV: &str = "TLS_KEY_PATH";
pub const SEED_ADMIN_EMAIL_ENV: &str = "SEED_ADMIN_EMAIL";
pub const SEED_ADMIN_PASSWORD_ENV: &str = "SEED_ADMIN_PASSWORD";

/// Logging format selector (`json` or `pretty`).
pub const LOG_FORMAT_ENV: &str = "LOG_FORMAT";

pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 8080;
pub const DEFAULT_STORE_TIMEOUT_MS: u64 = 5000;

/// Longest accepted token lifetime (one year).
pub const MAX_TOKEN_TTL_HOURS: i64 = 24 * 365;
pub const DEFAULT_LOG_FILTER: &str = "info,tower_http=debug";

/// Configuration errors detected at startup.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),
    #[error("{name} has invalid value {value:?}")]
    Invalid { name: &'static str, value: String },
    #[error("TLS_CERT_PATH and TLS_KEY_PATH must be set together")]
    PartialTls,
}

/// TLS certificate and key locations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TlsPaths {
    pub cert: PathBuf,
    pub key: PathBuf,
}

/// Seed admin credentials.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeedAdmin {
    pub email: String,
    pub password: String,
}

/// Parsed server configuration.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub addr: SocketAddr,
    pub data_dir: PathBuf,
    pub jwt_secret: String,
    pub token_ttl: chrono::Duration,
    pub store_timeout: Duration,
    pub bcrypt_cost: u32,
    pub tls: Option<TlsPaths>,
    pub seed_admin: Option<SeedAdmin>,
}

impl ServerConfig {
    /// Load from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load from an arbitrary variable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let var = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        let host: IpAddr = parse_or(&var, HOST_ENV, DEFAULT_HOST.parse().ok())?;
        let port: u16 = parse_or(&var, PORT_ENV, Some(DEFAULT_PORT))?;

        let jwt_secret = var(JWT_SECRET_ENV).ok_or(ConfigError::Missing(JWT_SECRET_ENV))?;

        let ttl_hours: i64 = parse_or(&var, TOKEN_TTL_HOURS_ENV, Some(DEFAULT_TOKEN_TTL_HOURS))?;
        let token_ttl = Some(ttl_hours)
            .filter(|h| (1..=MAX_TOKEN_TTL_HOURS).contains(h))
            .and_then(chrono::Duration::try_hours)
            .ok_or_else(|| ConfigError::Invalid {
                name: TOKEN_TTL_HOURS_ENV,
                value: ttl_hours.to_string(),
            })?;

        let timeout_ms: u64 = parse_or(&var, STORE_TIMEOUT_MS_ENV, Some(DEFAULT_STORE_TIMEOUT_MS))?;
        if timeout_ms == 0 {
            return Err(ConfigError::Invalid {
                name: STORE_TIMEOUT_MS_ENV,
                value: "0".to_string(),
            });
        }

        let bcrypt_cost: u32 = parse_or(&var, BCRYPT_COST_ENV, Some(DEFAULT_BCRYPT_COST))?;
        if !(4..=31).contains(&bcrypt_cost) {
            return Err(ConfigError::Invalid {
                name: BCRYPT_COST_ENV,
                value: bcrypt_cost.to_string(),
            });
        }

        let tls = match (var(TLS_CERT_PATH_ENV), var(TLS_KEY_PATH_ENV)) {
            (Some(cert), Some(key)) => Some(TlsPaths {
                cert: cert.into(),
                key: key.into(),
            }),
            (None, None) => None,
            _ => return Err(ConfigError::PartialTls),
        };

        let seed_admin = match (var(SEED_ADMIN_EMAIL_ENV), var(SEED_ADMIN_PASSWORD_ENV)) {
            (Some(email), Some(password)) => Some(SeedAdmin { email, password }),
            (None, None) => None,
            (Some(_), None) => return Err(ConfigError::Missing(SEED_ADMIN_PASSWORD_ENV)),
            (None, Some(_)) => return Err(ConfigError::Missing(SEED_ADMIN_EMAIL_ENV)),
        };

        Ok(Self {
            addr: SocketAddr::new(host, port),
            data_dir: var(DATA_DIR_ENV).unwrap_or_else(|| DATA_ROOT.to_string()).into(),
            jwt_secret,
            token_ttl,
            store_timeout: Duration::from_millis(timeout_ms),
            bcrypt_cost,
            tls,
            seed_admin,
        })
    }
}

fn parse_or<T: std::str::FromStr>(
    var: &impl Fn(&str) -> Option<String>,
    name: &'static str,
    default: Option<T>,
) -> Result<T, ConfigError> {
    match var(name) {
        Some(raw) => raw.trim().parse().map_err(|_| ConfigError::Invalid { name, value: raw }),
        None => default.ok_or(ConfigError::Missing(name)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config(vars: &[(&str, &str)]) -> Result<ServerConfig, ConfigError> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        ServerConfig::from_lookup(|name| map.get(name).cloned())
    }

    #[test]
    fn defaults_apply() {
        let cfg = config(&[(JWT_SECRET_ENV, "s3cret")]).unwrap();
        assert_eq!(cfg.addr, "0.0.0.0:8080".parse().unwrap());
        assert_eq!(cfg.data_dir, PathBuf::from("./data"));
        assert_eq!(cfg.token_ttl, chrono::Duration::hours(168));
        assert_eq!(cfg.store_timeout, Duration::from_millis(5000));
        assert_eq!(cfg.bcrypt_cost, 12);
        assert!(cfg.tls.is_none());
        assert!(cfg.seed_admin.is_none());
    }

    #[test]
    fn secret_is_required() {
        assert_eq!(
            config(&[]).unwrap_err(),
            ConfigError::Missing(JWT_SECRET_ENV)
        );
        assert_eq!(
            config(&[(JWT_SECRET_ENV, "   ")]).unwrap_err(),
            ConfigError::Missing(JWT_SECRET_ENV)
        );
    }

    #[test]
    fn overrides_are_parsed() {
        let cfg = config(&[
            (JWT_SECRET_ENV, "s3cret"),
            (HOST_ENV, "127.0.0.1"),
            (PORT_ENV, "3000"),
            (DATA_DIR_ENV, "/var/lib/hotel"),
            (TOKEN_TTL_HOURS_ENV, "2"),
            (STORE_TIMEOUT_MS_ENV, "250"),
            (BCRYPT_COST_ENV, "10"),
        ])
        .unwrap();
        assert_eq!(cfg.addr, "127.0.0.1:3000".parse().unwrap());
        assert_eq!(cfg.data_dir, PathBuf::from("/var/lib/hotel"));
        assert_eq!(cfg.token_ttl, chrono::Duration::hours(2));
        assert_eq!(cfg.store_timeout, Duration::from_millis(250));
        assert_eq!(cfg.bcrypt_cost, 10);
    }

    #[test]
    fn invalid_values_are_reported() {
        assert!(matches!(
            config(&[(JWT_SECRET_ENV, "s"), (PORT_ENV, "eighty")]),
            Err(ConfigError::Invalid { name: PORT_ENV, .. })
        ));
        assert!(matches!(
            config(&[(JWT_SECRET_ENV, "s"), (BCRYPT_COST_ENV, "2")]),
            Err(ConfigError::Invalid { name: BCRYPT_COST_ENV, .. })
        ));
        assert!(matches!(
            config(&[(JWT_SECRET_ENV, "s"), (STORE_TIMEOUT_MS_ENV, "0")]),
            Err(ConfigError::Invalid { .. })
        ));
    }

    #[test]
    fn token_ttl_outside_bounds_is_rejected() {
        for raw in ["0", "-5", "8761", "2500000000", "9000000000000"] {
            assert_eq!(
                config(&[(JWT_SECRET_ENV, "s"), (TOKEN_TTL_HOURS_ENV, raw)]).unwrap_err(),
                ConfigError::Invalid {
                    name: TOKEN_TTL_HOURS_ENV,
                    value: raw.to_string(),
                }
            );
        }

        let cfg = config(&[(JWT_SECRET_ENV, "s"), (TOKEN_TTL_HOURS_ENV, "8760")]).unwrap();
        assert_eq!(cfg.token_ttl, chrono::Duration::hours(MAX_TOKEN_TTL_HOURS));
    }

    #[test]
    fn tls_and_seed_must_be_complete() {
        assert_eq!(
            config(&[(JWT_SECRET_ENV, "s"), (TLS_CERT_PATH_ENV, "/cert.pem")]).unwrap_err(),
            ConfigError::PartialTls
        );
        assert_eq!(
            config(&[(JWT_SECRET_ENV, "s"), (SEED_ADMIN_EMAIL_ENV, "a@b.io")]).unwrap_err(),
            ConfigError::Missing(SEED_ADMIN_PASSWORD_ENV)
        );

        let cfg = config(&[
            (JWT_SECRET_ENV, "s"),
            (TLS_CERT_PATH_ENV, "/cert.pem"),
            (TLS_KEY_PATH_ENV, "/key.pem"),
            (SEED_ADMIN_EMAIL_ENV, "admin@hotel.io"),
            (SEED_ADMIN_PASSWORD_ENV, "adminpass"),
        ])
        .unwrap();
        assert_eq!(cfg.tls.unwrap().cert, PathBuf::from("/cert.pem"));
        assert_eq!(cfg.seed_admin.unwrap().email, "admin@hotel.io");
    }
}
