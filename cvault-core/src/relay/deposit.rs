use alloy::primitives::{TxHash, U256};
use kanau::processor::Processor;
use tracing::warn;

use super::{RelayError, RelayProcessor, SubmittedTransaction};
use crate::ledger::Confirmation;
use crate::units::{USDX_DECIMALS, UnitsError, parse_units};

/// Mint `amount` USDx to the relay wallet, approve the vault for it and
/// deposit it into the vault.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DepositUsdx {
    /// Amount as supplied by the caller, e.g. `"100"` or `"0.5"`.
    pub amount: Option<String>,
}

/// The three transactions of a deposit, in order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DepositStep {
    Mint,
    Approve,
    Deposit,
}

impl DepositStep {
    const ORDER: [DepositStep; 3] = [DepositStep::Mint, DepositStep::Approve, DepositStep::Deposit];
}

/// Validate and scale a deposit amount.
///
/// Anything that is not a strictly positive number is an invalid deposit
/// amount; a positive number that does not fit the 6-decimal scale keeps
/// its conversion error.
fn parse_deposit_amount(amount: Option<&str>) -> Result<U256, RelayError> {
    let Some(text) = amount.filter(|text| !text.trim().is_empty()) else {
        return Err(RelayError::InvalidDepositAmount);
    };
    match parse_units(text, USDX_DECIMALS) {
        Ok(value) if value.is_zero() => Err(RelayError::InvalidDepositAmount),
        Ok(value) => Ok(value),
        Err(UnitsError::InvalidNumber(_) | UnitsError::Negative(_)) => {
            Err(RelayError::InvalidDepositAmount)
        }
        Err(e) => Err(e.into()),
    }
}

impl RelayProcessor {
    /// Run the mint → approve → deposit chain, pushing every confirmed step
    /// onto `confirmed`.
    async fn deposit_chain(
        &self,
        amount: U256,
        confirmed: &mut Vec<(DepositStep, TxHash)>,
    ) -> Result<Confirmation, RelayError> {
        let signer = self.ledger.signer_address();
        let vault = self.ledger.vault_address();

        let pending = self.ledger.mint(signer, amount).await?;
        let mint = self.confirm("USDx.mint", pending).await?;
        confirmed.push((DepositStep::Mint, mint.tx_hash));

        let pending = self.ledger.approve(vault, amount).await?;
        let approve = self.confirm("USDx.approve", pending).await?;
        confirmed.push((DepositStep::Approve, approve.tx_hash));

        let pending = self.ledger.deposit(amount).await?;
        let deposit = self.confirm("CorporateVault.depositUSDx", pending).await?;
        confirmed.push((DepositStep::Deposit, deposit.tx_hash));

        Ok(deposit)
    }
}

impl Processor<DepositUsdx> for RelayProcessor {
    type Output = SubmittedTransaction;
    type Error = RelayError;
    #[tracing::instrument(skip_all, err, name = "Relay:DepositUsdx", fields(amount = ?command.amount))]
    async fn process(&self, command: DepositUsdx) -> Result<SubmittedTransaction, RelayError> {
        let amount = parse_deposit_amount(command.amount.as_deref())?;

        let mut confirmed = Vec::with_capacity(DepositStep::ORDER.len());
        match self.deposit_chain(amount, &mut confirmed).await {
            Ok(deposit) => Ok(SubmittedTransaction {
                tx_hash: deposit.tx_hash,
                message: format!(
                    "{} USDx deposited successfully into the vault!",
                    command.amount.unwrap_or_default()
                ),
            }),
            Err(e) => {
                // Earlier steps stay on-chain; nothing is rolled back.
                if !confirmed.is_empty() {
                    warn!(
                        failed_step = ?DepositStep::ORDER.get(confirmed.len()),
                        confirmed = ?confirmed,
                        error = %e,
                        "Deposit aborted after earlier steps were confirmed"
                    );
                }
                Err(e)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ledger::testing::{LedgerCall, Operation, RecordingLedger};
    use std::sync::Arc;

    fn deposit(amount: &str) -> DepositUsdx {
        DepositUsdx {
            amount: Some(amount.to_string()),
        }
    }

    #[tokio::test]
    async fn test_deposit_runs_three_confirmed_steps_in_order() {
        let ledger = Arc::new(RecordingLedger::new());
        let relay = RelayProcessor::new(ledger.clone());

        let result = relay.process(deposit("100")).await.unwrap();

        let amount = U256::from(100_000_000u64);
        assert_eq!(result.tx_hash, RecordingLedger::tx_hash(3));
        assert_eq!(
            result.message,
            "100 USDx deposited successfully into the vault!"
        );
        assert_eq!(
            ledger.calls(),
            vec![
                LedgerCall::Mint {
                    to: RecordingLedger::SIGNER,
                    amount
                },
                LedgerCall::Wait {
                    tx_hash: RecordingLedger::tx_hash(1)
                },
                LedgerCall::Approve {
                    spender: RecordingLedger::VAULT,
                    amount
                },
                LedgerCall::Wait {
                    tx_hash: RecordingLedger::tx_hash(2)
                },
                LedgerCall::Deposit { amount },
                LedgerCall::Wait {
                    tx_hash: RecordingLedger::tx_hash(3)
                },
            ]
        );
    }

    #[tokio::test]
    async fn test_invalid_amounts_never_reach_the_ledger() {
        let ledger = Arc::new(RecordingLedger::new());
        let relay = RelayProcessor::new(ledger.clone());

        for amount in [None, Some(""), Some("0"), Some("0.000"), Some("-5"), Some("abc")] {
            let command = DepositUsdx {
                amount: amount.map(str::to_string),
            };
            let err = relay.process(command).await.unwrap_err();
            assert!(
                matches!(err, RelayError::InvalidDepositAmount),
                "amount {amount:?} gave {err:?}"
            );
            assert_eq!(err.to_string(), "Invalid deposit amount");
        }
        assert!(ledger.calls().is_empty());
    }

    #[tokio::test]
    async fn test_amount_beyond_scale_is_rejected_before_minting() {
        let ledger = Arc::new(RecordingLedger::new());
        let relay = RelayProcessor::new(ledger.clone());

        let err = relay.process(deposit("1.0000001")).await.unwrap_err();

        assert!(matches!(
            err,
            RelayError::Units(UnitsError::TooManyDecimals { .. })
        ));
        assert!(ledger.calls().is_empty());
    }

    #[tokio::test]
    async fn test_failed_approve_stops_the_chain() {
        let ledger = Arc::new(
            RecordingLedger::new()
                .fail_on_submit(Operation::Approve, "execution reverted: not owner"),
        );
        let relay = RelayProcessor::new(ledger.clone());

        let err = relay.process(deposit("5")).await.unwrap_err();

        assert_eq!(err.to_string(), "execution reverted: not owner");
        let calls = ledger.calls();
        assert_eq!(calls.len(), 3, "mint, wait, approve: {calls:?}");
        assert!(
            !calls
                .iter()
                .any(|call| matches!(call, LedgerCall::Deposit { .. }))
        );
    }

    #[tokio::test]
    async fn test_unconfirmed_mint_stops_the_chain() {
        let ledger = Arc::new(
            RecordingLedger::new().fail_on_confirm(Operation::Mint, "transaction reverted"),
        );
        let relay = RelayProcessor::new(ledger.clone());

        let err = relay.process(deposit("5")).await.unwrap_err();

        assert_eq!(err.to_string(), "transaction reverted");
        assert_eq!(ledger.calls().len(), 2);
    }

    #[test]
    fn test_parse_deposit_amount() {
        assert_eq!(
            parse_deposit_amount(Some("0.5")).unwrap(),
            U256::from(500_000u64)
        );
        assert_eq!(
            parse_deposit_amount(Some(" 12 ")).unwrap(),
            U256::from(12_000_000u64)
        );
        assert!(matches!(
            parse_deposit_amount(Some("   ")),
            Err(RelayError::InvalidDepositAmount)
        ));
    }
}
