//! Request and response bodies of the relay's HTTP API.
//!
//! Every request field is optional at the wire level: the relay reports a
//! missing field through its own error message rather than a rejection from
//! the JSON layer.

use serde::{Deserialize, Deserializer, Serialize};

use super::inputs::{AmountInput, PaymentIdInput};

/// `POST /deposit-usdx` body.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DepositRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub amount: Option<AmountInput>,
}

/// `POST /submit-batch-payment` body.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchPaymentRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recipients: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub amounts: Option<Vec<AmountInput>>,
}

/// `POST /approve-payment` body.
///
/// An absent `paymentId` and an explicit `null` are different: only the
/// former is `None`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApprovePaymentRequest {
    #[serde(
        default,
        deserialize_with = "deserialize_present",
        skip_serializing_if = "Option::is_none"
    )]
    pub payment_id: Option<PaymentIdInput>,
}

fn deserialize_present<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    T::deserialize(deserializer).map(Some)
}

/// `GET /vault-balance` response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BalanceResponse {
    /// USDx balance of the relay wallet, as a decimal string.
    pub balance: String,
}

/// Response of every endpoint that submits a transaction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionResponse {
    /// Hash of the confirmed transaction (for deposits, the final step).
    pub tx_hash: String,
    pub message: String,
}

/// Body of every failed request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// `GET /health` response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_approve_payment_distinguishes_absent_and_null() {
        let absent: ApprovePaymentRequest = serde_json::from_str("{}").unwrap();
        let null: ApprovePaymentRequest = serde_json::from_str(r#"{"paymentId":null}"#).unwrap();
        let zero: ApprovePaymentRequest = serde_json::from_str(r#"{"paymentId":0}"#).unwrap();

        assert_eq!(absent.payment_id, None);
        assert_eq!(null.payment_id, Some(PaymentIdInput(serde_json::Value::Null)));
        assert_eq!(zero.payment_id, Some(PaymentIdInput::from(0)));
    }

    #[test]
    fn test_batch_payment_request_parsing() {
        let body = r#"{"recipients":["0xA","0xB"],"amounts":["10",20]}"#;
        let request: BatchPaymentRequest = serde_json::from_str(body).unwrap();
        let amounts: Vec<String> = request
            .amounts
            .unwrap()
            .iter()
            .map(ToString::to_string)
            .collect();
        assert_eq!(request.recipients.unwrap(), vec!["0xA", "0xB"]);
        assert_eq!(amounts, vec!["10", "20"]);
    }

    #[test]
    fn test_transaction_response_uses_camel_case() {
        let response = TransactionResponse {
            tx_hash: "0xabc".to_string(),
            message: "Batch payment submitted!".to_string(),
        };
        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["txHash"], "0xabc");
        assert_eq!(json["message"], "Batch payment submitted!");
    }
}
