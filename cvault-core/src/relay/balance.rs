use kanau::processor::Processor;

use super::{RelayError, RelayProcessor};
use crate::units::{USDX_DECIMALS, format_units};

/// Query the USDx balance held by the relay wallet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GetVaultBalance;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VaultBalance {
    /// Contract balance rendered at 6 decimals.
    pub balance: String,
}

impl Processor<GetVaultBalance> for RelayProcessor {
    type Output = VaultBalance;
    type Error = RelayError;
    #[tracing::instrument(skip_all, err, name = "Relay:GetVaultBalance")]
    async fn process(&self, _query: GetVaultBalance) -> Result<VaultBalance, RelayError> {
        let owner = self.ledger.signer_address();
        let raw = self.ledger.balance_of(owner).await?;
        Ok(VaultBalance {
            balance: format_units(raw, USDX_DECIMALS),
        })
    }
}
