//! In-memory [`Ledger`] for tests.
//!
//! [`RecordingLedger`] records every call in order and hands out
//! sequential transaction hashes (`1`, `2`, ... left-padded to 32 bytes).
//! Individual operations can be scripted to fail either when submitted or
//! when waited on.

use std::collections::HashMap;
use std::sync::Mutex;

use alloy::primitives::{Address, TxHash, U256};
use async_trait::async_trait;

use super::{Confirmation, Ledger, LedgerError, PendingTransaction};

/// Contract operations a [`RecordingLedger`] can be told to fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    BalanceOf,
    Mint,
    Approve,
    Deposit,
    SubmitBatchPayment,
    ApprovePayment,
}

/// One recorded call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LedgerCall {
    BalanceOf {
        owner: Address,
    },
    Mint {
        to: Address,
        amount: U256,
    },
    Approve {
        spender: Address,
        amount: U256,
    },
    Deposit {
        amount: U256,
    },
    SubmitBatchPayment {
        recipients: Vec<String>,
        amounts: Vec<U256>,
    },
    ApprovePayment {
        payment_id: String,
    },
    Wait {
        tx_hash: TxHash,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Stage {
    Submission,
    Confirmation,
}

#[derive(Default)]
struct State {
    calls: Vec<LedgerCall>,
    balance: U256,
    sent: u64,
    operations: HashMap<TxHash, Operation>,
    failures: HashMap<Operation, (Stage, String)>,
}

pub struct RecordingLedger {
    signer: Address,
    vault: Address,
    state: Mutex<State>,
}

impl Default for RecordingLedger {
    fn default() -> Self {
        Self::new()
    }
}

impl RecordingLedger {
    pub const SIGNER: Address = Address::new([0xaa; 20]);
    pub const VAULT: Address = Address::new([0xbb; 20]);

    pub fn new() -> Self {
        Self {
            signer: Self::SIGNER,
            vault: Self::VAULT,
            state: Mutex::new(State::default()),
        }
    }

    /// The hash handed out for the `n`-th submitted transaction (1-based).
    pub fn tx_hash(n: u64) -> TxHash {
        TxHash::left_padding_from(&n.to_be_bytes())
    }

    /// Set the balance reported for the signer.
    pub fn with_balance(self, balance: U256) -> Self {
        self.lock().balance = balance;
        self
    }

    /// Make `operation` fail when it is submitted.
    pub fn fail_on_submit(self, operation: Operation, reason: impl Into<String>) -> Self {
        self.lock()
            .failures
            .insert(operation, (Stage::Submission, reason.into()));
        self
    }

    /// Make `operation` be accepted but fail when waited on.
    pub fn fail_on_confirm(self, operation: Operation, reason: impl Into<String>) -> Self {
        self.lock()
            .failures
            .insert(operation, (Stage::Confirmation, reason.into()));
        self
    }

    /// Every call made so far, in order.
    pub fn calls(&self) -> Vec<LedgerCall> {
        self.lock().calls.clone()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, State> {
        // A panic while holding the lock only happens inside a failing test.
        match self.state.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }

    fn submit(
        &self,
        operation: Operation,
        call: LedgerCall,
    ) -> Result<PendingTransaction, LedgerError> {
        let mut state = self.lock();
        state.calls.push(call);
        if let Some((Stage::Submission, reason)) = state.failures.get(&operation) {
            return Err(LedgerError::Rejected(reason.clone()));
        }
        state.sent += 1;
        let tx_hash = Self::tx_hash(state.sent);
        state.operations.insert(tx_hash, operation);
        Ok(PendingTransaction { tx_hash })
    }
}

#[async_trait]
impl Ledger for RecordingLedger {
    fn signer_address(&self) -> Address {
        self.signer
    }

    fn vault_address(&self) -> Address {
        self.vault
    }

    async fn balance_of(&self, owner: Address) -> Result<U256, LedgerError> {
        let mut state = self.lock();
        state.calls.push(LedgerCall::BalanceOf { owner });
        if let Some((_, reason)) = state.failures.get(&Operation::BalanceOf) {
            return Err(LedgerError::Rejected(reason.clone()));
        }
        if owner == self.signer {
            Ok(state.balance)
        } else {
            Ok(U256::ZERO)
        }
    }

    async fn mint(&self, to: Address, amount: U256) -> Result<PendingTransaction, LedgerError> {
        self.submit(Operation::Mint, LedgerCall::Mint { to, amount })
    }

    async fn approve(
        &self,
        spender: Address,
        amount: U256,
    ) -> Result<PendingTransaction, LedgerError> {
        self.submit(Operation::Approve, LedgerCall::Approve { spender, amount })
    }

    async fn deposit(&self, amount: U256) -> Result<PendingTransaction, LedgerError> {
        self.submit(Operation::Deposit, LedgerCall::Deposit { amount })
    }

    async fn submit_batch_payment(
        &self,
        recipients: &[String],
        amounts: &[U256],
    ) -> Result<PendingTransaction, LedgerError> {
        self.submit(
            Operation::SubmitBatchPayment,
            LedgerCall::SubmitBatchPayment {
                recipients: recipients.to_vec(),
                amounts: amounts.to_vec(),
            },
        )
    }

    async fn approve_payment(&self, payment_id: &str) -> Result<PendingTransaction, LedgerError> {
        self.submit(
            Operation::ApprovePayment,
            LedgerCall::ApprovePayment {
                payment_id: payment_id.to_owned(),
            },
        )
    }

    async fn wait(&self, pending: PendingTransaction) -> Result<Confirmation, LedgerError> {
        let mut state = self.lock();
        state.calls.push(LedgerCall::Wait {
            tx_hash: pending.tx_hash,
        });
        let failure = state
            .operations
            .get(&pending.tx_hash)
            .and_then(|operation| state.failures.get(operation));
        if let Some((Stage::Confirmation, reason)) = failure {
            return Err(LedgerError::Rejected(reason.clone()));
        }
        Ok(Confirmation {
            tx_hash: pending.tx_hash,
            block_number: Some(state.sent),
        })
    }
}
