//! Ledger connection configuration.

use alloy::primitives::Address;
use std::fmt;
use std::time::Duration;
use url::Url;

/// Everything needed to reach and sign for the contracts.
#[derive(Clone)]
pub struct LedgerConfig {
    /// JSON-RPC endpoint of the network.
    pub rpc_url: Url,
    /// Hex-encoded private key of the relay wallet.
    pub private_key: String,
    /// Address of the USDx token contract.
    pub usdx_address: Address,
    /// Address of the corporate vault contract.
    pub vault_address: Address,
    /// Confirmations required before a transaction counts as confirmed.
    pub confirmations: u64,
    /// Upper bound on waiting for a confirmation. `None` waits forever.
    pub confirmation_timeout: Option<Duration>,
}

impl fmt::Debug for LedgerConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LedgerConfig")
            .field("rpc_url", &self.rpc_url.as_str())
            .field("private_key", &"<redacted>")
            .field("usdx_address", &self.usdx_address)
            .field("vault_address", &self.vault_address)
            .field("confirmations", &self.confirmations)
            .field("confirmation_timeout", &self.confirmation_timeout)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_debug_redacts_private_key() {
        let config = LedgerConfig {
            rpc_url: "http://localhost:8545".parse().unwrap(),
            private_key: "0xdeadbeef".to_string(),
            usdx_address: Address::ZERO,
            vault_address: Address::ZERO,
            confirmations: 1,
            confirmation_timeout: None,
        };
        let rendered = format!("{config:?}");
        assert!(!rendered.contains("deadbeef"));
        assert!(rendered.contains("<redacted>"));
    }
}
