use std::num::ParseIntError;
use thiserror::Error;

pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 3030;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("PORT must be a number between 0 and 65535, got {value:?}")]
    InvalidPort {
        value: String,
        #[source]
        source: ParseIntError,
    },
    #[error("HOST must not be empty")]
    EmptyHost,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_owned(),
            port: DEFAULT_PORT,
        }
    }
}

impl ServerConfig {
    /// Reads `HOST` and `PORT`, falling back to the defaults when unset.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();
        if let Some(host) = lookup("HOST") {
            let host = host.trim();
            if host.is_empty() {
                return Err(ConfigError::EmptyHost);
            }
            config.host = host.to_owned();
        }
        if let Some(port) = lookup("PORT") {
            config.port = port
                .trim()
                .parse()
                .map_err(|source| ConfigError::InvalidPort {
                    value: port.clone(),
                    source,
                })?;
        }
        Ok(config)
    }

    pub fn bind_address(&self) -> (String, u16) {
        (self.host.clone(), self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_owned(), (*v).to_owned()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn it_uses_defaults_when_unset() {
        let config = ServerConfig::from_lookup(lookup(&[])).expect("");
        assert_eq!(config, ServerConfig::default());
        assert_eq!(config.bind_address(), ("0.0.0.0".to_owned(), 3030));
    }

    #[test]
    fn it_reads_port_and_host() {
        let config =
            ServerConfig::from_lookup(lookup(&[("PORT", "8080"), ("HOST", "127.0.0.1")]))
                .expect("");
        assert_eq!(config.port, 8080);
        assert_eq!(config.host, "127.0.0.1");
    }

    #[test]
    fn it_rejects_invalid_port() {
        match ServerConfig::from_lookup(lookup(&[("PORT", "http")])) {
            Err(ConfigError::InvalidPort { value, .. }) => assert_eq!(value, "http"),
            other => panic!("unexpected {:?}", other),
        }
        assert!(ServerConfig::from_lookup(lookup(&[("PORT", "70000")])).is_err());
    }

    #[test]
    fn it_rejects_empty_host() {
        assert!(matches!(
            ServerConfig::from_lookup(lookup(&[("HOST", " ")])),
            Err(ConfigError::EmptyHost)
        ));
    }
}
