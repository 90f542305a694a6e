use std::collections::HashMap;
use std::path::PathBuf;
use std::time::Duration;

use tracing::warn;

/// Process run mode.
///
/// Development enables verbose diagnostics: debug logging, request
/// tracing and error details on 500 pages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunMode {
    Development,
    Production,
}

impl RunMode {
    /// Anything other than `production` selects development.
    pub fn parse(s: &str) -> Self {
        if s.trim().eq_ignore_ascii_case("production") {
            Self::Production
        } else {
            Self::Development
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Development => "development",
            Self::Production => "production",
        }
    }

    pub fn is_development(&self) -> bool {
        matches!(self, Self::Development)
    }
}

/// Where the task documents live.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreLocation {
    /// redb database file.
    File(PathBuf),
    /// Volatile in-process store, lost on exit.
    Memory,
}

impl StoreLocation {
    pub fn parse(s: &str) -> Self {
        if s == "memory" {
            Self::Memory
        } else {
            Self::File(PathBuf::from(s))
        }
    }
}

impl std::fmt::Display for StoreLocation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::File(path) => write!(f, "{}", path.display()),
            Self::Memory => f.write_str("memory"),
        }
    }
}

pub const ENV_STORE: &str = "TODO_STORE";
pub const ENV_RUN_MODE: &str = "TODO_ENV";
pub const ENV_HOST: &str = "HOST";
pub const ENV_PORT: &str = "PORT";
pub const ENV_STORE_TIMEOUT_MS: &str = "TODO_STORE_TIMEOUT_MS";

const DEFAULT_STORE: &str = "data/todo.redb";
const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 5000;
const DEFAULT_STORE_TIMEOUT_MS: u64 = 5000;

/// Runtime configuration of the server.
///
/// Built from environment variables; the binary lets CLI flags
/// override individual fields afterwards.
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    /// Document store location.
    pub store: StoreLocation,

    /// Development or production behaviour.
    pub run_mode: RunMode,

    /// Listen host.
    pub host: String,

    /// Listen port.
    pub port: u16,

    /// Upper bound on opening the store at startup.
    pub connect_timeout: Duration,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            store: StoreLocation::parse(DEFAULT_STORE),
            run_mode: RunMode::Development,
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            connect_timeout: Duration::from_millis(DEFAULT_STORE_TIMEOUT_MS),
        }
    }
}

impl ServiceConfig {
    /// Read configuration from the process environment.
    pub fn from_env() -> Self {
        Self::from_env_map(&std::env::vars().collect())
    }

    /// Read configuration from an explicit variable map.
    ///
    /// Unparseable numbers fall back to their defaults with a warning.
    pub fn from_env_map(vars: &HashMap<String, String>) -> Self {
        let mut config = ServiceConfig::default();

        if let Some(val) = vars.get(ENV_STORE).filter(|v| !v.is_empty()) {
            config.store = StoreLocation::parse(val);
        }
        if let Some(val) = vars.get(ENV_RUN_MODE) {
            config.run_mode = RunMode::parse(val);
        }
        if let Some(val) = vars.get(ENV_HOST).filter(|v| !v.is_empty()) {
            config.host = val.clone();
        }
        if let Some(val) = vars.get(ENV_PORT) {
            match val.trim().parse::<u16>() {
                Ok(port) => config.port = port,
                Err(_) => warn!("ignoring invalid {ENV_PORT}={val:?}, using {DEFAULT_PORT}"),
            }
        }
        if let Some(val) = vars.get(ENV_STORE_TIMEOUT_MS) {
            match val.trim().parse::<u64>() {
                Ok(ms) => config.connect_timeout = Duration::from_millis(ms),
                Err(_) => warn!(
                    "ignoring invalid {ENV_STORE_TIMEOUT_MS}={val:?}, using {DEFAULT_STORE_TIMEOUT_MS}"
                ),
            }
        }

        config
    }

    /// `host:port` string for the listener.
    pub fn listen_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vars(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_defaults() {
        let config = ServiceConfig::from_env_map(&HashMap::new());
        assert_eq!(config.store, StoreLocation::File(PathBuf::from("data/todo.redb")));
        assert_eq!(config.run_mode, RunMode::Development);
        assert_eq!(config.port, 5000);
        assert_eq!(config.listen_addr(), "0.0.0.0:5000");
        assert_eq!(config.connect_timeout, Duration::from_secs(5));
    }

    #[test]
    fn test_from_env_map() {
        let config = ServiceConfig::from_env_map(&vars(&[
            ("TODO_STORE", "/var/lib/todo/todo.redb"),
            ("TODO_ENV", "production"),
            ("HOST", "127.0.0.1"),
            ("PORT", "9090"),
            ("TODO_STORE_TIMEOUT_MS", "250"),
        ]));
        assert_eq!(
            config.store,
            StoreLocation::File(PathBuf::from("/var/lib/todo/todo.redb"))
        );
        assert_eq!(config.run_mode, RunMode::Production);
        assert_eq!(config.listen_addr(), "127.0.0.1:9090");
        assert_eq!(config.connect_timeout, Duration::from_millis(250));
    }

    #[test]
    fn test_invalid_port_falls_back() {
        let config = ServiceConfig::from_env_map(&vars(&[("PORT", "eighty")]));
        assert_eq!(config.port, 5000);
    }

    #[test]
    fn test_memory_store() {
        let config = ServiceConfig::from_env_map(&vars(&[("TODO_STORE", "memory")]));
        assert_eq!(config.store, StoreLocation::Memory);
        assert_eq!(config.store.to_string(), "memory");
    }

    #[test]
    fn test_run_mode_parse() {
        assert_eq!(RunMode::parse("production"), RunMode::Production);
        assert_eq!(RunMode::parse("PRODUCTION"), RunMode::Production);
        assert_eq!(RunMode::parse("development"), RunMode::Development);
        assert_eq!(RunMode::parse("staging"), RunMode::Development);
        assert!(RunMode::Development.is_development());
        assert!(!RunMode::Production.is_development());
    }
}
