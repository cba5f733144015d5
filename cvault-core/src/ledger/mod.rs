//! The external ledger the relay forwards to.
//!
//! [`Ledger`] abstracts the two contracts the relay talks to (the USDx
//! token and the corporate vault) behind submit-then-wait operations:
//! every write returns a [`PendingTransaction`] as soon as the node has
//! accepted it, and [`Ledger::wait`] resolves once it is confirmed.

pub mod contracts;
pub mod evm;
#[cfg(any(test, feature = "test-util"))]
pub mod testing;

use alloy::primitives::{Address, TxHash, U256};
use async_trait::async_trait;
use thiserror::Error;

pub use evm::EvmLedger;

/// Errors returned by a [`Ledger`].
///
/// The `Display` output is what the relay hands back to HTTP callers, so
/// downstream messages (including revert reasons) are kept verbatim.
#[derive(Debug, Error)]
pub enum LedgerError {
    /// The contract call failed before a hash was obtained (transport error,
    /// revert during gas estimation, insufficient funds, ...).
    #[error(transparent)]
    Contract(#[from] alloy::contract::Error),

    /// Watching a submitted transaction failed or timed out.
    #[error(transparent)]
    Confirmation(#[from] alloy::providers::PendingTransactionError),

    /// The transaction was mined but its execution reverted.
    #[error("transaction {tx_hash} reverted")]
    Reverted { tx_hash: TxHash },

    /// A recipient could not be encoded as an address.
    #[error("invalid address: {value:?}")]
    InvalidAddress { value: String },

    /// A payment identifier could not be encoded as a uint256.
    #[error("invalid paymentId: {value:?}")]
    InvalidPaymentId { value: String },

    /// Scripted failures from in-memory ledgers.
    #[cfg(any(test, feature = "test-util"))]
    #[error("{0}")]
    Rejected(String),
}

/// A transaction accepted by the node but not yet confirmed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PendingTransaction {
    pub tx_hash: TxHash,
}

/// A confirmed, successfully executed transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Confirmation {
    pub tx_hash: TxHash,
    pub block_number: Option<u64>,
}

/// Contract operations the relay needs, in submit-then-wait form.
#[async_trait]
pub trait Ledger: Send + Sync {
    /// Address of the wallet signing every transaction.
    fn signer_address(&self) -> Address;

    /// Address of the vault contract.
    fn vault_address(&self) -> Address;

    /// USDx balance of `owner`.
    async fn balance_of(&self, owner: Address) -> Result<U256, LedgerError>;

    /// Mint `amount` USDx to `to`.
    async fn mint(&self, to: Address, amount: U256) -> Result<PendingTransaction, LedgerError>;

    /// Allow `spender` to transfer `amount` USDx from the signer.
    async fn approve(
        &self,
        spender: Address,
        amount: U256,
    ) -> Result<PendingTransaction, LedgerError>;

    /// Deposit `amount` USDx from the signer into the vault.
    async fn deposit(&self, amount: U256) -> Result<PendingTransaction, LedgerError>;

    /// Submit one batch payment. `recipients` and `amounts` are index-aligned.
    async fn submit_batch_payment(
        &self,
        recipients: &[String],
        amounts: &[U256],
    ) -> Result<PendingTransaction, LedgerError>;

    /// Approve the pending vault payment identified by `payment_id`.
    async fn approve_payment(&self, payment_id: &str) -> Result<PendingTransaction, LedgerError>;

    /// Wait until `pending` is confirmed. A reverted receipt is an error.
    async fn wait(&self, pending: PendingTransaction) -> Result<Confirmation, LedgerError>;
}
