//! Configuration module for cvault-server.
//!
//! Settings are merged from the TOML file, the process environment and CLI
//! arguments, in increasing order of precedence. The signing key only ever
//! comes from the environment.

pub mod file;

use crate::config::file::FileConfig;
use alloy::primitives::Address;
use cvault_core::config::{LedgerConfig, ServerConfig};
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;
use url::Url;

const DEFAULT_LISTEN: SocketAddr = SocketAddr::new(IpAddr::V4(Ipv4Addr::UNSPECIFIED), 4000);
const DEFAULT_CONFIRMATIONS: u64 = 1;

/// Errors that can occur during configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    IoError(#[from] std::io::Error),

    #[error("failed to parse config file: {0}")]
    ParseError(#[from] toml::de::Error),

    #[error("{0} environment variable not set")]
    MissingEnv(&'static str),

    #[error("{setting} is not set (config key `{key}` or environment variable {env})")]
    MissingSetting {
        setting: &'static str,
        key: &'static str,
        env: &'static str,
    },

    #[error("invalid value for {field}: {reason}")]
    InvalidValue { field: &'static str, reason: String },

    #[error("validation error: {0}")]
    ValidationError(String),
}

/// Loaded configuration result containing all parts.
#[derive(Debug)]
pub struct LoadedConfig {
    pub server: ServerConfig,
    pub ledger: LedgerConfig,
}

/// Configuration loader that handles the complete loading process.
pub struct ConfigLoader {
    config_path: PathBuf,
    listen_override: Option<SocketAddr>,
}

impl ConfigLoader {
    /// Create a new config loader.
    pub fn new(config_path: impl AsRef<Path>, listen_override: Option<SocketAddr>) -> Self {
        Self {
            config_path: config_path.as_ref().to_path_buf(),
            listen_override,
        }
    }

    /// Load the configuration using the process environment.
    pub fn load(&self) -> Result<LoadedConfig, ConfigError> {
        self.load_with_env(|name| std::env::var(name).ok())
    }

    /// Load the configuration, reading environment variables through `env`.
    ///
    /// A missing config file is not an error; every setting then comes from
    /// the environment or its default.
    pub fn load_with_env(
        &self,
        env: impl Fn(&str) -> Option<String>,
    ) -> Result<LoadedConfig, ConfigError> {
        let file_config = self.read_file()?;
        let env = |name: &str| env(name).filter(|value| !value.trim().is_empty());

        let mut listen = file_config.server.listen.unwrap_or(DEFAULT_LISTEN);
        if let Some(port) = env("PORT") {
            let port: u16 = port.trim().parse().map_err(|e| ConfigError::InvalidValue {
                field: "PORT",
                reason: format!("{e}"),
            })?;
            listen = SocketAddr::new(IpAddr::V4(Ipv4Addr::UNSPECIFIED), port);
        }
        if let Some(override_addr) = self.listen_override {
            listen = override_addr;
        }

        let rpc_url = required(
            env("ARBITRUM_RPC").or(file_config.ledger.rpc_url),
            "RPC endpoint",
            "ledger.rpc_url",
            "ARBITRUM_RPC",
        )?;
        let rpc_url: Url = rpc_url.trim().parse().map_err(|e| ConfigError::InvalidValue {
            field: "rpc_url",
            reason: format!("{e}"),
        })?;

        let usdx_address = parse_address(
            required(
                env("USDX_ADDRESS").or(file_config.ledger.usdx_address),
                "USDx address",
                "ledger.usdx_address",
                "USDX_ADDRESS",
            )?,
            "usdx_address",
        )?;
        let vault_address = parse_address(
            required(
                env("VAULT_ADDRESS").or(file_config.ledger.vault_address),
                "vault address",
                "ledger.vault_address",
                "VAULT_ADDRESS",
            )?,
            "vault_address",
        )?;

        let private_key = env("PRIVATE_KEY").ok_or(ConfigError::MissingEnv("PRIVATE_KEY"))?;

        let confirmations = file_config
            .ledger
            .confirmations
            .unwrap_or(DEFAULT_CONFIRMATIONS);
        if confirmations == 0 {
            return Err(ConfigError::ValidationError(
                "ledger.confirmations must be at least 1".to_string(),
            ));
        }

        Ok(LoadedConfig {
            server: ServerConfig {
                listen,
                allowed_origins: file_config.server.allowed_origins,
            },
            ledger: LedgerConfig {
                rpc_url,
                private_key: private_key.trim().to_string(),
                usdx_address,
                vault_address,
                confirmations,
                confirmation_timeout: file_config
                    .ledger
                    .confirmation_timeout_secs
                    .map(Duration::from_secs),
            },
        })
    }

    fn read_file(&self) -> Result<FileConfig, ConfigError> {
        match std::fs::read_to_string(&self.config_path) {
            Ok(content) => Ok(toml::from_str(&content)?),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(path = ?self.config_path, "No config file, using environment only");
                Ok(FileConfig::default())
            }
            Err(e) => Err(e.into()),
        }
    }
}

fn required(
    value: Option<String>,
    setting: &'static str,
    key: &'static str,
    env: &'static str,
) -> Result<String, ConfigError> {
    value.ok_or(ConfigError::MissingSetting { setting, key, env })
}

fn parse_address(value: String, field: &'static str) -> Result<Address, ConfigError> {
    value
        .trim()
        .parse()
        .map_err(|e| ConfigError::InvalidValue {
            field,
            reason: format!("{e}"),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    const USDX: &str = "0x5FbDB2315678afecb367f032d93F642f64180aa3";
    const VAULT: &str = "0xe7f1725E7734CE288F8367e1Bb143E90bb3F0512";

    fn env_of(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    fn full_env() -> Vec<(&'static str, &'static str)> {
        vec![
            ("ARBITRUM_RPC", "http://localhost:8545"),
            ("USDX_ADDRESS", USDX),
            ("VAULT_ADDRESS", VAULT),
            ("PRIVATE_KEY", "0xac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80"),
        ]
    }

    fn write_config(name: &str, content: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!("cvault-{}-{name}.toml", std::process::id()));
        std::fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn test_environment_only_with_defaults() {
        let loader = ConfigLoader::new("/nonexistent/cvault-config.toml", None);

        let config = loader.load_with_env(env_of(&full_env())).unwrap();

        assert_eq!(config.server.listen, "0.0.0.0:4000".parse().unwrap());
        assert!(config.server.allowed_origins.is_empty());
        assert_eq!(config.ledger.usdx_address, USDX.parse::<Address>().unwrap());
        assert_eq!(config.ledger.vault_address, VAULT.parse::<Address>().unwrap());
        assert_eq!(config.ledger.confirmations, 1);
        assert!(config.ledger.confirmation_timeout.is_none());
    }

    #[test]
    fn test_port_env_and_cli_override() {
        let mut pairs = full_env();
        pairs.push(("PORT", "5000"));

        let loader = ConfigLoader::new("/nonexistent/cvault-config.toml", None);
        let config = loader.load_with_env(env_of(&pairs)).unwrap();
        assert_eq!(config.server.listen, "0.0.0.0:5000".parse().unwrap());

        let cli: SocketAddr = "127.0.0.1:6000".parse().unwrap();
        let loader = ConfigLoader::new("/nonexistent/cvault-config.toml", Some(cli));
        let config = loader.load_with_env(env_of(&pairs)).unwrap();
        assert_eq!(config.server.listen, cli);
    }

    #[test]
    fn test_env_takes_precedence_over_file() {
        let path = write_config(
            "precedence",
            r#"
[server]
listen = "127.0.0.1:3000"
allowed_origins = ["https://treasury.example.com"]

[ledger]
rpc_url = "http://file-node:8545"
usdx_address = "0x0000000000000000000000000000000000000001"
vault_address = "0x0000000000000000000000000000000000000002"
confirmations = 3
confirmation_timeout_secs = 60
"#,
        );
        let loader = ConfigLoader::new(&path, None);

        let config = loader
            .load_with_env(env_of(&[
                ("ARBITRUM_RPC", "http://env-node:8545"),
                ("PRIVATE_KEY", "0x01"),
            ]))
            .unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(config.server.listen.port(), 3000);
        assert_eq!(config.server.allowed_origins, vec!["https://treasury.example.com"]);
        assert_eq!(config.ledger.rpc_url.as_str(), "http://env-node:8545/");
        assert_eq!(
            config.ledger.usdx_address,
            "0x0000000000000000000000000000000000000001"
                .parse::<Address>()
                .unwrap()
        );
        assert_eq!(config.ledger.confirmations, 3);
        assert_eq!(config.ledger.confirmation_timeout, Some(Duration::from_secs(60)));
    }

    #[test]
    fn test_missing_private_key() {
        let pairs: Vec<_> = full_env()
            .into_iter()
            .filter(|(k, _)| *k != "PRIVATE_KEY")
            .collect();
        let loader = ConfigLoader::new("/nonexistent/cvault-config.toml", None);

        let err = loader.load_with_env(env_of(&pairs)).unwrap_err();

        assert!(matches!(err, ConfigError::MissingEnv("PRIVATE_KEY")));
    }

    #[test]
    fn test_missing_vault_address() {
        let pairs: Vec<_> = full_env()
            .into_iter()
            .filter(|(k, _)| *k != "VAULT_ADDRESS")
            .collect();
        let loader = ConfigLoader::new("/nonexistent/cvault-config.toml", None);

        let err = loader.load_with_env(env_of(&pairs)).unwrap_err();

        assert!(matches!(
            err,
            ConfigError::MissingSetting {
                env: "VAULT_ADDRESS",
                ..
            }
        ));
    }

    #[test]
    fn test_invalid_values_are_reported() {
        let loader = ConfigLoader::new("/nonexistent/cvault-config.toml", None);

        let mut pairs = full_env();
        pairs.push(("PORT", "eighty"));
        let err = loader.load_with_env(env_of(&pairs)).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { field: "PORT", .. }));

        let mut pairs = full_env();
        pairs.retain(|(k, _)| *k != "USDX_ADDRESS");
        pairs.push(("USDX_ADDRESS", "not-an-address"));
        let err = loader.load_with_env(env_of(&pairs)).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::InvalidValue {
                field: "usdx_address",
                ..
            }
        ));
    }

    #[test]
    fn test_zero_confirmations_is_rejected() {
        let path = write_config("zero-confirmations", "[ledger]\nconfirmations = 0\n");
        let loader = ConfigLoader::new(&path, None);

        let err = loader.load_with_env(env_of(&full_env())).unwrap_err();
        std::fs::remove_file(&path).ok();

        assert!(matches!(err, ConfigError::ValidationError(_)));
    }
}
