//! TOML file configuration structures.
//!
//! These structs directly map to the `cvault-config.toml` file format.
//! Every key is optional here; required settings may come from the
//! environment instead and are checked by the loader.

use serde::{Deserialize, Serialize};
use std::net::SocketAddr;

/// Root configuration structure as read from the TOML file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    pub server: ServerConfig,
    pub ledger: LedgerConfig,
}

/// Server configuration section.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// The address and port to listen on (e.g., "0.0.0.0:4000").
    pub listen: Option<SocketAddr>,
    /// Origins allowed by CORS. Empty means any origin.
    pub allowed_origins: Vec<String>,
}

/// Ledger connection section.
///
/// There is no signing key here. It is only read from `PRIVATE_KEY`, and a
/// `private_key` entry fails to parse.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LedgerConfig {
    /// JSON-RPC endpoint of the Arbitrum node.
    pub rpc_url: Option<String>,
    pub usdx_address: Option<String>,
    pub vault_address: Option<String>,
    /// Blocks to wait for before a transaction counts as confirmed.
    pub confirmations: Option<u64>,
    pub confirmation_timeout_secs: Option<u64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_config_parsing() {
        let toml_str = r#"
[server]
listen = "127.0.0.1:3000"
allowed_origins = ["https://treasury.example.com"]

[ledger]
rpc_url = "https://arb1.arbitrum.io/rpc"
usdx_address = "0x5FbDB2315678afecb367f032d93F642f64180aa3"
vault_address = "0xe7f1725E7734CE288F8367e1Bb143E90bb3F0512"
confirmations = 2
confirmation_timeout_secs = 120
"#;
        let config: FileConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.server.listen.unwrap().port(), 3000);
        assert_eq!(config.server.allowed_origins.len(), 1);
        assert_eq!(config.ledger.confirmations, Some(2));
        assert_eq!(config.ledger.confirmation_timeout_secs, Some(120));
    }

    #[test]
    fn test_empty_file_is_all_defaults() {
        let config: FileConfig = toml::from_str("").unwrap();
        assert!(config.server.listen.is_none());
        assert!(config.server.allowed_origins.is_empty());
        assert!(config.ledger.rpc_url.is_none());
    }

    #[test]
    fn test_private_key_is_not_accepted_from_file() {
        let toml_str = r#"
[ledger]
private_key = "0x01"
"#;
        assert!(toml::from_str::<FileConfig>(toml_str).is_err());
    }
}
