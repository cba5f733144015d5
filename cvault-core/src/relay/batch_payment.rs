use alloy::primitives::U256;
use kanau::processor::Processor;

use super::{RelayError, RelayProcessor, SubmittedTransaction};
use crate::units::{USDX_DECIMALS, parse_units};

/// Submit one batch payment to the vault.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmitBatchPayment {
    pub recipients: Option<Vec<String>>,
    /// Decimal amounts, index-aligned with `recipients`.
    pub amounts: Option<Vec<String>>,
}

fn scale_amounts(amounts: &[String]) -> Result<Vec<U256>, RelayError> {
    amounts
        .iter()
        .enumerate()
        .map(|(index, amount)| {
            let value = parse_units(amount, USDX_DECIMALS)?;
            if value.is_zero() {
                return Err(RelayError::InvalidPaymentAmount { index });
            }
            Ok(value)
        })
        .collect()
}

impl Processor<SubmitBatchPayment> for RelayProcessor {
    type Output = SubmittedTransaction;
    type Error = RelayError;
    #[tracing::instrument(
        skip_all,
        err,
        name = "Relay:SubmitBatchPayment",
        fields(payments = command.recipients.as_ref().map(Vec::len))
    )]
    async fn process(
        &self,
        command: SubmitBatchPayment,
    ) -> Result<SubmittedTransaction, RelayError> {
        let (Some(recipients), Some(amounts)) = (command.recipients, command.amounts) else {
            return Err(RelayError::MissingBatchFields);
        };
        if recipients.len() != amounts.len() {
            return Err(RelayError::BatchLengthMismatch);
        }
        if recipients.is_empty() {
            return Err(RelayError::MissingBatchFields);
        }

        let amounts = scale_amounts(&amounts)?;

        let pending = self.ledger.submit_batch_payment(&recipients, &amounts).await?;
        let confirmation = self
            .confirm("CorporateVault.submitBatchPayment", pending)
            .await?;

        Ok(SubmittedTransaction {
            tx_hash: confirmation.tx_hash,
            message: "Batch payment submitted!".to_string(),
        })
    }
}
