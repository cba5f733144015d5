use kanau::processor::Processor;

use super::{RelayError, RelayProcessor, SubmittedTransaction};

/// Approve a pending vault payment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApprovePayment {
    /// The identifier as the caller rendered it. `None` only when the field
    /// was absent; `"0"` and `"null"` are forwarded as-is.
    pub payment_id: Option<String>,
}

impl Processor<ApprovePayment> for RelayProcessor {
    type Output = SubmittedTransaction;
    type Error = RelayError;
    #[tracing::instrument(skip_all, err, name = "Relay:ApprovePayment", fields(payment_id = ?command.payment_id))]
    async fn process(&self, command: ApprovePayment) -> Result<SubmittedTransaction, RelayError> {
        let payment_id = command.payment_id.ok_or(RelayError::MissingPaymentId)?;

        let pending = self.ledger.approve_payment(&payment_id).await?;
        let confirmation = self.confirm("CorporateVault.approvePayment", pending).await?;

        Ok(SubmittedTransaction {
            tx_hash: confirmation.tx_hash,
            message: format!("Payment {payment_id} approved!"),
        })
    }
}
