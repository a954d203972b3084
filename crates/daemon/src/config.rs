//! Daemon configuration from `ALUNOMETA_*` environment variables.

use alunometa_api_rest::ServerConfig;
use anyhow::{anyhow, Context, Result};
use std::path::{Path, PathBuf};
use std::str::FromStr;

const DEFAULT_DB_PATH: &str = "~/.alunometa/alunometa.db";
const DEFAULT_APP_NAME: &str = "alunometaApp";
const DEFAULT_MAX_CONNECTIONS: u32 = 10;
const MEMORY_DB: &str = ":memory:";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Pretty,
    Json,
}

impl FromStr for LogFormat {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "pretty" => Ok(LogFormat::Pretty),
            "json" => Ok(LogFormat::Json),
            other => Err(anyhow!("unknown log format '{}' (expected pretty or json)", other)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// SQLite file path, or `:memory:`
    pub db_path: String,
    pub db_max_connections: u32,
    pub server: ServerConfig,
    /// Prefix of the alert headers and message keys
    pub app_name: String,
    pub log_format: LogFormat,
    /// Directory for daily-rolling JSON log files
    pub log_dir: Option<PathBuf>,
}

fn parse_var<T>(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|e| anyhow!("{}", e))
            .with_context(|| format!("invalid value for {}: '{}'", key, raw)),
        None => Ok(default),
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build the configuration from any variable source
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let db_path = lookup("ALUNOMETA_DB_PATH").unwrap_or_else(|| DEFAULT_DB_PATH.to_string());
        let defaults = ServerConfig::default();

        Ok(Self {
            db_path: shellexpand::tilde(&db_path).into_owned(),
            db_max_connections: parse_var(&lookup, "ALUNOMETA_DB_MAX_CONNECTIONS", DEFAULT_MAX_CONNECTIONS)?,
            server: ServerConfig {
                host: lookup("ALUNOMETA_HOST").unwrap_or(defaults.host),
                port: parse_var(&lookup, "ALUNOMETA_PORT", defaults.port)?,
            },
            app_name: lookup("ALUNOMETA_APP_NAME").unwrap_or_else(|| DEFAULT_APP_NAME.to_string()),
            log_format: parse_var(&lookup, "ALUNOMETA_LOG_FORMAT", LogFormat::Pretty)?,
            log_dir: lookup("ALUNOMETA_LOG_DIR").map(|dir| PathBuf::from(shellexpand::tilde(&dir).into_owned())),
        })
    }

    pub fn is_memory_db(&self) -> bool {
        self.db_path == MEMORY_DB
    }

    pub fn database_url(&self) -> String {
        if self.is_memory_db() {
            "sqlite::memory:".to_string()
        } else {
            format!("sqlite://{}", self.db_path)
        }
    }

    /// Directory that must exist before the database file can be created
    pub fn db_dir(&self) -> Option<&Path> {
        if self.is_memory_db() {
            return None;
        }
        Path::new(&self.db_path)
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config(vars: &[(&str, &str)]) -> Result<Config> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = config(&[]).unwrap();
        assert!(config.db_path.ends_with(".alunometa/alunometa.db"));
        assert!(!config.db_path.starts_with('~'));
        assert_eq!(config.server, ServerConfig::default());
        assert_eq!(config.app_name, "alunometaApp");
        assert_eq!(config.db_max_connections, 10);
        assert_eq!(config.log_format, LogFormat::Pretty);
        assert!(config.log_dir.is_none());
    }

    #[test]
    fn test_overrides() {
        let config = config(&[
            ("ALUNOMETA_DB_PATH", ":memory:"),
            ("ALUNOMETA_PORT", "9000"),
            ("ALUNOMETA_HOST", "0.0.0.0"),
            ("ALUNOMETA_LOG_FORMAT", "json"),
        ])
        .unwrap();

        assert_eq!(config.database_url(), "sqlite::memory:");
        assert!(config.db_dir().is_none());
        assert_eq!(config.server.addr(), "0.0.0.0:9000");
        assert_eq!(config.log_format, LogFormat::Json);
    }

    #[test]
    fn test_invalid_numbers_are_errors() {
        let err = config(&[("ALUNOMETA_PORT", "eighty")]).unwrap_err();
        assert!(format!("{:#}", err).contains("ALUNOMETA_PORT"));

        assert!(config(&[("ALUNOMETA_DB_MAX_CONNECTIONS", "-1")]).is_err());
        assert!(config(&[("ALUNOMETA_LOG_FORMAT", "xml")]).is_err());
    }

    #[test]
    fn test_file_database_url() {
        let config = config(&[("ALUNOMETA_DB_PATH", "/tmp/alunometa/test.db")]).unwrap();
        assert_eq!(config.database_url(), "sqlite:///tmp/alunometa/test.db");
        assert_eq!(config.db_dir(), Some(Path::new("/tmp/alunometa")));
    }
}
