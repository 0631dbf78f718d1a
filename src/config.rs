//! Runtime configuration from `.env` and the process environment.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("FYYUR_PORT must be a port number, got '{0}'")]
    InvalidPort(String),
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database_path: PathBuf,
    pub host: String,
    pub port: u16,
    pub log_filter: String,
}

fn app_data_dir() -> PathBuf {
    let base = dirs::data_dir().unwrap_or_else(|| PathBuf::from("."));
    base.join("com.fyyur.listings")
}

impl AppConfig {
    /// Read `.env` (if any) and then the environment.
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary variable source; blank values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let port = match var("FYYUR_PORT") {
            Some(raw) => raw
                .trim()
                .parse::<u16>()
                .map_err(|_| ConfigError::InvalidPort(raw))?,
            None => 5000,
        };

        Ok(Self {
            database_path: var("FYYUR_DATABASE_PATH")
                .map(PathBuf::from)
                .unwrap_or_else(|| app_data_dir().join("fyyur.db")),
            host: var("FYYUR_HOST").unwrap_or_else(|| "127.0.0.1".to_string()),
            port,
            log_filter: var("RUST_LOG").unwrap_or_else(|| "info".to_string()),
        })
    }

    pub fn bind_addr(&self) -> (String, u16) {
        (self.host.clone(), self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_apply_when_unset() {
        let cfg = AppConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(cfg.host, "127.0.0.1");
        assert_eq!(cfg.port, 5000);
        assert_eq!(cfg.log_filter, "info");
        assert!(cfg.database_path.ends_with("com.fyyur.listings/fyyur.db"));
    }

    #[test]
    fn overrides_are_read() {
        let cfg = AppConfig::from_lookup(lookup(&[
            ("FYYUR_DATABASE_PATH", "/tmp/x.db"),
            ("FYYUR_HOST", "0.0.0.0"),
            ("FYYUR_PORT", "8080"),
            ("RUST_LOG", "debug"),
        ]))
        .unwrap();
        assert_eq!(cfg.database_path, PathBuf::from("/tmp/x.db"));
        assert_eq!(cfg.bind_addr(), ("0.0.0.0".to_string(), 8080));
        assert_eq!(cfg.log_filter, "debug");
    }

    #[test]
    fn blank_values_fall_back_to_defaults() {
        let cfg = AppConfig::from_lookup(lookup(&[("FYYUR_PORT", "  ")])).unwrap();
        assert_eq!(cfg.port, 5000);
    }

    #[test]
    fn bad_port_is_rejected() {
        let err = AppConfig::from_lookup(lookup(&[("FYYUR_PORT", "eighty")])).unwrap_err();
        assert!(err.to_string().contains("eighty"));
    }
}
