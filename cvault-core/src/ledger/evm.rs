//! [`Ledger`] over an EVM JSON-RPC endpoint.
//!
//! Transactions are signed locally with the relay wallet's key and sent
//! through a provider with the recommended fillers (nonce, gas, chain id),
//! so each write is a single `eth_sendRawTransaction`.

use std::str::FromStr;
use std::time::Duration;

use alloy::network::{EthereumWallet, ReceiptResponse};
use alloy::primitives::{Address, U256};
use alloy::providers::{DynProvider, PendingTransactionBuilder, Provider, ProviderBuilder};
use alloy::signers::local::PrivateKeySigner;
use async_trait::async_trait;
use thiserror::Error;
use tracing::debug;

use super::contracts::{CorporateVault, USDx};
use super::{Confirmation, Ledger, LedgerError, PendingTransaction};
use crate::config::LedgerConfig;

/// Errors that can occur while setting up an [`EvmLedger`].
#[derive(Debug, Error)]
pub enum EvmLedgerError {
    #[error("invalid private key: {0}")]
    InvalidPrivateKey(#[from] alloy::signers::local::LocalSignerError),
}

/// Ledger backed by the USDx and CorporateVault contracts on an EVM chain.
pub struct EvmLedger {
    provider: DynProvider,
    signer_address: Address,
    usdx: USDx::USDxInstance<DynProvider>,
    vault: CorporateVault::CorporateVaultInstance<DynProvider>,
    confirmations: u64,
    confirmation_timeout: Option<Duration>,
}

impl EvmLedger {
    /// Build the signer and provider described by `config`.
    ///
    /// No network round trip happens here; the first contract call is the
    /// first request to the RPC endpoint.
    pub fn connect(config: &LedgerConfig) -> Result<Self, EvmLedgerError> {
        let signer = PrivateKeySigner::from_str(config.private_key.trim())?;
        let signer_address = signer.address();

        let provider = ProviderBuilder::new()
            .wallet(EthereumWallet::from(signer))
            .connect_http(config.rpc_url.clone())
            .erased();

        Ok(Self {
            usdx: USDx::new(config.usdx_address, provider.clone()),
            vault: CorporateVault::new(config.vault_address, provider.clone()),
            provider,
            signer_address,
            confirmations: config.confirmations,
            confirmation_timeout: config.confirmation_timeout,
        })
    }
}

fn parse_recipients(recipients: &[String]) -> Result<Vec<Address>, LedgerError> {
    recipients
        .iter()
        .map(|recipient| {
            Address::from_str(recipient.trim()).map_err(|_| LedgerError::InvalidAddress {
                value: recipient.clone(),
            })
        })
        .collect()
}

fn parse_payment_id(payment_id: &str) -> Result<U256, LedgerError> {
    U256::from_str(payment_id.trim()).map_err(|_| LedgerError::InvalidPaymentId {
        value: payment_id.to_owned(),
    })
}

#[async_trait]
impl Ledger for EvmLedger {
    fn signer_address(&self) -> Address {
        self.signer_address
    }

    fn vault_address(&self) -> Address {
        *self.vault.address()
    }

    async fn balance_of(&self, owner: Address) -> Result<U256, LedgerError> {
        let balance = self.usdx.balanceOf(owner).call().await?;
        Ok(balance)
    }

    async fn mint(&self, to: Address, amount: U256) -> Result<PendingTransaction, LedgerError> {
        let pending = self.usdx.mint(to, amount).send().await?;
        debug!(tx_hash = %pending.tx_hash(), "USDx.mint sent");
        Ok(PendingTransaction {
            tx_hash: *pending.tx_hash(),
        })
    }

    async fn approve(
        &self,
        spender: Address,
        amount: U256,
    ) -> Result<PendingTransaction, LedgerError> {
        let pending = self.usdx.approve(spender, amount).send().await?;
        debug!(tx_hash = %pending.tx_hash(), "USDx.approve sent");
        Ok(PendingTransaction {
            tx_hash: *pending.tx_hash(),
        })
    }

    async fn deposit(&self, amount: U256) -> Result<PendingTransaction, LedgerError> {
        let pending = self.vault.depositUSDx(amount).send().await?;
        debug!(tx_hash = %pending.tx_hash(), "CorporateVault.depositUSDx sent");
        Ok(PendingTransaction {
            tx_hash: *pending.tx_hash(),
        })
    }

    async fn submit_batch_payment(
        &self,
        recipients: &[String],
        amounts: &[U256],
    ) -> Result<PendingTransaction, LedgerError> {
        let recipients = parse_recipients(recipients)?;
        let pending = self
            .vault
            .submitBatchPayment(recipients, amounts.to_vec())
            .send()
            .await?;
        debug!(tx_hash = %pending.tx_hash(), "CorporateVault.submitBatchPayment sent");
        Ok(PendingTransaction {
            tx_hash: *pending.tx_hash(),
        })
    }

    async fn approve_payment(&self, payment_id: &str) -> Result<PendingTransaction, LedgerError> {
        let payment_id = parse_payment_id(payment_id)?;
        let pending = self.vault.approvePayment(payment_id).send().await?;
        debug!(tx_hash = %pending.tx_hash(), "CorporateVault.approvePayment sent");
        Ok(PendingTransaction {
            tx_hash: *pending.tx_hash(),
        })
    }

    async fn wait(&self, pending: PendingTransaction) -> Result<Confirmation, LedgerError> {
        let receipt = PendingTransactionBuilder::new(self.provider.root().clone(), pending.tx_hash)
            .with_required_confirmations(self.confirmations)
            .with_timeout(self.confirmation_timeout)
            .get_receipt()
            .await?;

        if !ReceiptResponse::status(&receipt) {
            return Err(LedgerError::Reverted {
                tx_hash: pending.tx_hash,
            });
        }

        Ok(Confirmation {
            tx_hash: pending.tx_hash,
            block_number: ReceiptResponse::block_number(&receipt),
        })
    }
}
