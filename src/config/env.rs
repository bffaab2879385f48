//! Process configuration read from the environment once at startup.
//!
//! | Env var                   | Default          |
//! |---------------------------|------------------|
//! | `DB_HOST`                 | required         |
//! | `DB_PORT`                 | required         |
//! | `DB_DIALECT`              | required         |
//! | `DB_USER`                 | required         |
//! | `DB_PASSWORD`             | required (may be empty) |
//! | `DB_NAME`                 | required         |
//! | `DB_SCHEMA`               | `public`         |
//! | `DB_MAX_CONNECTIONS`      | `5`              |
//! | `DB_CONNECT_TIMEOUT_SECS` | `5`              |
//! | `BIND_ADDR`               | `0.0.0.0:3000`   |
//! | `REQUEST_TIMEOUT_SECS`    | `30`             |
//! | `JWT_SECRET`              | unset            |

use crate::error::ConfigError;
use std::fmt;
use std::net::SocketAddr;
use std::str::FromStr;
use std::time::Duration;

pub const DEFAULT_SCHEMA: &str = "public";
const DEFAULT_BIND_ADDR: &str = "0.0.0.0:3000";
const DEFAULT_BODY_LIMIT: usize = 1024 * 1024;

/// SQL dialect of the relational store.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Dialect {
    Postgres,
}

impl FromStr for Dialect {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "postgres" | "postgresql" => Ok(Dialect::Postgres),
            other => Err(ConfigError::InvalidVar {
                var: "DB_DIALECT",
                reason: format!("unsupported dialect '{}' (expected postgres)", other),
            }),
        }
    }
}

#[derive(Clone)]
pub struct DbConfig {
    pub host: String,
    pub port: u16,
    pub dialect: Dialect,
    pub user: String,
    pub password: String,
    pub name: String,
    /// Namespace every entity table lives in.
    pub schema: String,
    pub max_connections: u32,
    pub connect_timeout: Duration,
}

impl fmt::Debug for DbConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DbConfig")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("dialect", &self.dialect)
            .field("user", &self.user)
            .field("password", &"<redacted>")
            .field("name", &self.name)
            .field("schema", &self.schema)
            .field("max_connections", &self.max_connections)
            .field("connect_timeout", &self.connect_timeout)
            .finish()
    }
}

#[derive(Clone, Debug)]
pub struct ServerConfig {
    pub bind_addr: SocketAddr,
    /// Deadline applied to every request at the transport layer.
    pub request_timeout: Duration,
    pub body_limit: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        ServerConfig {
            bind_addr: SocketAddr::from(([0, 0, 0, 0], 3000)),
            request_timeout: Duration::from_secs(30),
            body_limit: DEFAULT_BODY_LIMIT,
        }
    }
}

#[derive(Clone, Default)]
pub struct AuthConfig {
    /// HS256 secret for token validation. Validation is disabled when unset.
    pub jwt_secret: Option<String>,
}

impl fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthConfig")
            .field("jwt_secret", &self.jwt_secret.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub db: DbConfig,
    pub server: ServerConfig,
    pub auth: AuthConfig,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build config from any key lookup. Missing required values and unparsable values are errors.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let db = DbConfig {
            host: required(&lookup, "DB_HOST")?,
            port: parse_required(&lookup, "DB_PORT")?,
            dialect: required(&lookup, "DB_DIALECT")?.parse()?,
            user: required(&lookup, "DB_USER")?,
            password: lookup("DB_PASSWORD").ok_or(ConfigError::MissingVar("DB_PASSWORD"))?,
            name: required(&lookup, "DB_NAME")?,
            schema: optional(&lookup, "DB_SCHEMA").unwrap_or_else(|| DEFAULT_SCHEMA.to_string()),
            max_connections: positive(&lookup, "DB_MAX_CONNECTIONS", 5)?,
            connect_timeout: Duration::from_secs(positive(&lookup, "DB_CONNECT_TIMEOUT_SECS", 5)?),
        };
        let bind_addr = optional(&lookup, "BIND_ADDR").unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string());
        let server = ServerConfig {
            bind_addr: bind_addr.parse().map_err(|e| ConfigError::InvalidVar {
                var: "BIND_ADDR",
                reason: format!("{}", e),
            })?,
            request_timeout: Duration::from_secs(positive(&lookup, "REQUEST_TIMEOUT_SECS", 30)?),
            body_limit: DEFAULT_BODY_LIMIT,
        };
        let auth = AuthConfig {
            jwt_secret: optional(&lookup, "JWT_SECRET"),
        };
        Ok(AppConfig { db, server, auth })
    }
}

/// Present and non-blank, trimmed.
fn optional<F: Fn(&str) -> Option<String>>(lookup: &F, var: &str) -> Option<String> {
    lookup(var).map(|v| v.trim().to_string()).filter(|v| !v.is_empty())
}

fn required<F: Fn(&str) -> Option<String>>(lookup: &F, var: &'static str) -> Result<String, ConfigError> {
    optional(lookup, var).ok_or(ConfigError::MissingVar(var))
}

fn parse_required<F, T>(lookup: &F, var: &'static str) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: fmt::Display,
{
    let raw = required(lookup, var)?;
    raw.parse().map_err(|e: T::Err| ConfigError::InvalidVar {
        var,
        reason: format!("'{}': {}", raw, e),
    })
}

fn positive<F, T>(lookup: &F, var: &'static str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr + PartialOrd + Default,
    T::Err: fmt::Display,
{
    let value = match optional(lookup, var) {
        Some(_) => parse_required(lookup, var)?,
        None => default,
    };
    if value <= T::default() {
        return Err(ConfigError::InvalidVar {
            var,
            reason: "must be greater than zero".into(),
        });
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn base() -> HashMap<&'static str, &'static str> {
        HashMap::from([
            ("DB_HOST", "localhost"),
            ("DB_PORT", "5432"),
            ("DB_DIALECT", "postgres"),
            ("DB_USER", "admin"),
            ("DB_PASSWORD", "secret"),
            ("DB_NAME", "offices"),
        ])
    }

    fn load(vars: &HashMap<&'static str, &'static str>) -> Result<AppConfig, ConfigError> {
        AppConfig::from_lookup(|k| vars.get(k).map(|v| v.to_string()))
    }

    #[test]
    fn loads_required_vars_with_defaults() {
        let config = load(&base()).unwrap();
        assert_eq!(config.db.host, "localhost");
        assert_eq!(config.db.port, 5432);
        assert_eq!(config.db.dialect, Dialect::Postgres);
        assert_eq!(config.db.schema, "public");
        assert_eq!(config.db.max_connections, 5);
        assert_eq!(config.server.bind_addr.port(), 3000);
        assert_eq!(config.server.request_timeout, Duration::from_secs(30));
        assert!(config.auth.jwt_secret.is_none());
    }

    #[test]
    fn every_required_var_is_fatal_when_missing() {
        for var in ["DB_HOST", "DB_PORT", "DB_DIALECT", "DB_USER", "DB_PASSWORD", "DB_NAME"] {
            let mut vars = base();
            vars.remove(var);
            match load(&vars) {
                Err(ConfigError::MissingVar(missing)) => assert_eq!(missing, var),
                other => panic!("expected missing {var}, got {other:?}"),
            }
        }
    }

    #[test]
    fn blank_host_counts_as_missing() {
        let mut vars = base();
        vars.insert("DB_HOST", "   ");
        assert!(matches!(load(&vars), Err(ConfigError::MissingVar("DB_HOST"))));
    }

    #[test]
    fn empty_password_is_accepted() {
        let mut vars = base();
        vars.insert("DB_PASSWORD", "");
        assert_eq!(load(&vars).unwrap().db.password, "");
    }

    #[test]
    fn invalid_port_is_rejected() {
        let mut vars = base();
        vars.insert("DB_PORT", "70000");
        assert!(matches!(
            load(&vars),
            Err(ConfigError::InvalidVar { var: "DB_PORT", .. })
        ));
    }

    #[test]
    fn unsupported_dialect_is_rejected() {
        let mut vars = base();
        vars.insert("DB_DIALECT", "mysql");
        let err = load(&vars).unwrap_err();
        assert!(err.to_string().contains("mysql"), "{err}");
    }

    #[test]
    fn postgresql_alias_is_accepted() {
        let mut vars = base();
        vars.insert("DB_DIALECT", "PostgreSQL");
        assert_eq!(load(&vars).unwrap().db.dialect, Dialect::Postgres);
    }

    #[test]
    fn zero_pool_size_is_rejected() {
        let mut vars = base();
        vars.insert("DB_MAX_CONNECTIONS", "0");
        assert!(matches!(
            load(&vars),
            Err(ConfigError::InvalidVar { var: "DB_MAX_CONNECTIONS", .. })
        ));
    }

    #[test]
    fn optional_overrides_are_read() {
        let mut vars = base();
        vars.insert("DB_SCHEMA", "admin");
        vars.insert("BIND_ADDR", "127.0.0.1:8080");
        vars.insert("REQUEST_TIMEOUT_SECS", "5");
        vars.insert("JWT_SECRET", "s3cret");
        let config = load(&vars).unwrap();
        assert_eq!(config.db.schema, "admin");
        assert_eq!(config.server.bind_addr.to_string(), "127.0.0.1:8080");
        assert_eq!(config.server.request_timeout, Duration::from_secs(5));
        assert_eq!(config.auth.jwt_secret.as_deref(), Some("s3cret"));
    }

    #[test]
    fn debug_output_hides_secrets() {
        let mut vars = base();
        vars.insert("JWT_SECRET", "s3cret");
        let config = load(&vars).unwrap();
        let printed = format!("{:?}", config);
        assert!(!printed.contains("secret\""), "{printed}");
        assert!(!printed.contains("s3cret"), "{printed}");
    }
}
