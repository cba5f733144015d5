//! Relay operations.
//!
//! Each HTTP operation is a command struct processed by [`RelayProcessor`]
//! through [`kanau::processor::Processor`]:
//!
//! - [`GetVaultBalance`]    – USDx balance of the relay wallet
//! - [`DepositUsdx`]        – mint, approve and deposit into the vault
//! - [`SubmitBatchPayment`] – one batch payment submission
//! - [`ApprovePayment`]     – approve a pending vault payment
//!
//! Inputs are validated before the ledger is touched. Every ledger write is
//! waited on before the next one is sent.

mod approve_payment;
mod balance;
mod batch_payment;
mod deposit;

pub use approve_payment::ApprovePayment;
pub use balance::{GetVaultBalance, VaultBalance};
pub use batch_payment::SubmitBatchPayment;
pub use deposit::DepositUsdx;

use std::sync::Arc;

use alloy::primitives::TxHash;
use thiserror::Error;
use tracing::info;

use crate::ledger::{Confirmation, Ledger, LedgerError, PendingTransaction};
use crate::units::UnitsError;

/// Errors returned by relay operations.
///
/// The `Display` output is the `error` string returned to HTTP callers.
#[derive(Debug, Error)]
pub enum RelayError {
    #[error("Invalid deposit amount")]
    InvalidDepositAmount,

    #[error("Missing recipients or amounts")]
    MissingBatchFields,

    #[error("Recipients and amounts mismatch")]
    BatchLengthMismatch,

    #[error("Invalid payment amount at index {index}")]
    InvalidPaymentAmount { index: usize },

    #[error("Missing paymentId")]
    MissingPaymentId,

    #[error(transparent)]
    Units(#[from] UnitsError),

    #[error(transparent)]
    Ledger(#[from] LedgerError),
}

/// A confirmed transaction plus the message shown to the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmittedTransaction {
    pub tx_hash: TxHash,
    pub message: String,
}

/// Runs relay commands against a [`Ledger`].
///
/// Cheap to clone; the ledger is shared behind an `Arc`.
#[derive(Clone)]
pub struct RelayProcessor {
    pub ledger: Arc<dyn Ledger>,
}

impl RelayProcessor {
    pub fn new(ledger: Arc<dyn Ledger>) -> Self {
        Self { ledger }
    }

    /// Wait for `pending` and log its confirmation.
    async fn confirm(
        &self,
        operation: &'static str,
        pending: PendingTransaction,
    ) -> Result<Confirmation, LedgerError> {
        info!(operation, tx_hash = %pending.tx_hash, "Transaction submitted");
        let confirmation = self.ledger.wait(pending).await?;
        info!(
            operation,
            tx_hash = %confirmation.tx_hash,
            block_number = ?confirmation.block_number,
            "Transaction confirmed"
        );
        Ok(confirmation)
    }
}
