// src/config/settings.rs

use std::{env, fmt, time::Duration};

use dotenv::dotenv;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{var} must be a valid {expected}, got {value:?}")]
    Invalid {
        var: &'static str,
        expected: &'static str,
        value: String,
    },
    #[error("{0} must not be empty")]
    Empty(&'static str),
}

#[derive(Clone)]
pub struct DbSettings {
    pub host: String,
    pub port: u16,
    pub user: String,
    pub password: String,
    pub database: String,
    pub max_connections: u32,
    pub acquire_timeout: Duration,
}

// password stays out of logs
impl fmt::Debug for DbSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DbSettings")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("user", &self.user)
            .field("password", &"<redacted>")
            .field("database", &self.database)
            .field("max_connections", &self.max_connections)
            .field("acquire_timeout", &self.acquire_timeout)
            .finish()
    }
}

#[derive(Debug, Clone)]
pub struct Settings {
    pub server_host: String,
    pub server_port: u16,
    pub db: DbSettings,
}

impl Settings {
    /// Loads `.env` (if any) and reads the process environment.
    pub fn new() -> Result<Self, ConfigError> {
        dotenv().ok(); // loads `.env` file automatically

        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds settings from an arbitrary variable source. Unset variables
    /// fall back to the defaults the service has always shipped with.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());

        let server_host = non_empty("SERVER_HOST", var("SERVER_HOST", "0.0.0.0"))?;
        let server_port = port("SERVER_PORT", var("SERVER_PORT", "8000"))?;

        let db = DbSettings {
            host: non_empty("DB_HOST", var("DB_HOST", "db"))?,
            port: port("DB_PORT", var("DB_PORT", "3306"))?,
            user: non_empty("DB_USER", var("DB_USER", "app"))?,
            password: var("DB_PASSWORD", "apppass"),
            database: non_empty("DB_NAME", var("DB_NAME", "appdb"))?,
            max_connections: positive("DB_MAX_CONNECTIONS", var("DB_MAX_CONNECTIONS", "10"))?,
            acquire_timeout: Duration::from_secs(u64::from(positive(
                "DB_ACQUIRE_TIMEOUT_SECS",
                var("DB_ACQUIRE_TIMEOUT_SECS", "10"),
            )?)),
        };

        Ok(Self {
            server_host,
            server_port,
            db,
        })
    }
}

fn non_empty(var: &'static str, value: String) -> Result<String, ConfigError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ConfigError::Empty(var));
    }
    Ok(trimmed.to_string())
}

fn port(var: &'static str, value: String) -> Result<u16, ConfigError> {
    match value.trim().parse::<u16>() {
        Ok(p) if p != 0 => Ok(p),
        _ => Err(ConfigError::Invalid {
            var,
            expected: "port (1-65535)",
            value,
        }),
    }
}

fn positive(var: &'static str, value: String) -> Result<u32, ConfigError> {
    match value.trim().parse::<u32>() {
        Ok(n) if n > 0 => Ok(n),
        _ => Err(ConfigError::Invalid {
            var,
            expected: "positive integer",
            value,
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn load(vars: &[(&str, &str)]) -> Result<Settings, ConfigError> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Settings::from_lookup(|k| map.get(k).cloned())
    }

    #[test]
    fn defaults_match_shipped_literals() {
        let s = load(&[]).unwrap();
        assert_eq!(s.server_host, "0.0.0.0");
        assert_eq!(s.server_port, 8000);
        assert_eq!(s.db.host, "db");
        assert_eq!(s.db.port, 3306);
        assert_eq!(s.db.user, "app");
        assert_eq!(s.db.password, "apppass");
        assert_eq!(s.db.database, "appdb");
        assert_eq!(s.db.max_connections, 10);
        assert_eq!(s.db.acquire_timeout, Duration::from_secs(10));
    }

    #[test]
    fn overrides_are_honoured() {
        let s = load(&[
            ("SERVER_PORT", "9090"),
            ("DB_HOST", " mysql.internal "),
            ("DB_NAME", "users_db"),
            ("DB_MAX_CONNECTIONS", "3"),
            ("DB_ACQUIRE_TIMEOUT_SECS", "2"),
        ])
        .unwrap();
        assert_eq!(s.server_port, 9090);
        assert_eq!(s.db.host, "mysql.internal");
        assert_eq!(s.db.database, "users_db");
        assert_eq!(s.db.max_connections, 3);
        assert_eq!(s.db.acquire_timeout, Duration::from_secs(2));
    }

    #[test]
    fn empty_password_is_allowed() {
        let s = load(&[("DB_PASSWORD", "")]).unwrap();
        assert!(s.db.password.is_empty());
    }

    #[test]
    fn rejects_bad_port() {
        let err = load(&[("SERVER_PORT", "eighty")]).unwrap_err();
        assert_eq!(
            err,
            ConfigError::Invalid {
                var: "SERVER_PORT",
                expected: "port (1-65535)",
                value: "eighty".into(),
            }
        );
        assert!(load(&[("DB_PORT", "0")]).is_err());
        assert!(load(&[("SERVER_PORT", "70000")]).is_err());
    }

    #[test]
    fn rejects_empty_host_and_zero_pool() {
        assert_eq!(load(&[("DB_HOST", "  ")]).unwrap_err(), ConfigError::Empty("DB_HOST"));
        assert!(matches!(
            load(&[("DB_MAX_CONNECTIONS", "0")]),
            Err(ConfigError::Invalid { var: "DB_MAX_CONNECTIONS", .. })
        ));
    }

    #[test]
    fn debug_redacts_password() {
        let s = load(&[("DB_PASSWORD", "hunter2")]).unwrap();
        let dbg = format!("{:?}", s);
        assert!(!dbg.contains("hunter2"));
        assert!(dbg.contains("<redacted>"));
    }
}
