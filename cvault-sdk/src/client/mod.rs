//! HTTP client for the relay API.
//!
//! Gated behind the `client` cargo feature so downstream crates that only
//! need the shared types do not pull in `reqwest`.

use reqwest::{Client, StatusCode};
use rust_decimal::Decimal;
use serde::Serialize;
use serde::de::DeserializeOwned;
use url::Url;

use crate::objects::{
    AmountInput, ApprovePaymentRequest, BalanceResponse, BatchPaymentRequest, DepositRequest,
    ErrorResponse, HealthResponse, PaymentIdInput, TransactionResponse,
};

/// Errors produced by [`RelayClient`].
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// Transport-level failure (DNS, TLS, connection reset, …).
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    /// The relay reported a failure in its `{ error }` body.
    #[error("relay error: status {status}, error: {error}")]
    Relay { status: StatusCode, error: String },

    /// The server returned a non-2xx status code with an unexpected body.
    #[error("api error: status {status}, body: {body}")]
    Api { status: StatusCode, body: String },

    /// Response body could not be deserialized.
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    /// The base URL could not be joined with the endpoint path.
    #[error("invalid url: {0}")]
    Url(#[from] url::ParseError),
}

/// Typed HTTP client for the relay.
#[derive(Debug, Clone)]
pub struct RelayClient {
    http: Client,
    base_url: Url,
}

impl RelayClient {
    /// Create a new `RelayClient` for the relay rooted at `base_url`.
    pub fn new(base_url: Url) -> Self {
        Self {
            http: Client::new(),
            base_url,
        }
    }

    /// Replace the default `reqwest::Client` with a custom one (e.g. to
    /// configure timeouts or a proxy).
    pub fn with_http_client(mut self, client: Client) -> Self {
        self.http = client;
        self
    }

    /// `GET /health`
    pub async fn health(&self) -> Result<HealthResponse, ClientError> {
        let url = self.base_url.join("/health")?;
        let resp = self.http.get(url).send().await?;
        parse_response(resp).await
    }

    /// `GET /vault-balance` – USDx balance of the relay wallet.
    pub async fn vault_balance(&self) -> Result<BalanceResponse, ClientError> {
        let url = self.base_url.join("/vault-balance")?;
        let resp = self.http.get(url).send().await?;
        parse_response(resp).await
    }

    /// `POST /deposit-usdx` – mint, approve and deposit `amount` USDx.
    pub async fn deposit_usdx(&self, amount: Decimal) -> Result<TransactionResponse, ClientError> {
        let body = DepositRequest {
            amount: Some(amount.into()),
        };
        self.post("/deposit-usdx", &body).await
    }

    /// `POST /submit-batch-payment` – one payment per `(recipient, amount)`.
    pub async fn submit_batch_payment(
        &self,
        payments: &[(String, Decimal)],
    ) -> Result<TransactionResponse, ClientError> {
        let (recipients, amounts): (Vec<String>, Vec<AmountInput>) = payments
            .iter()
            .map(|(recipient, amount)| (recipient.clone(), AmountInput::from(*amount)))
            .unzip();
        let body = BatchPaymentRequest {
            recipients: Some(recipients),
            amounts: Some(amounts),
        };
        self.post("/submit-batch-payment", &body).await
    }

    /// `POST /approve-payment`
    pub async fn approve_payment(
        &self,
        payment_id: u64,
    ) -> Result<TransactionResponse, ClientError> {
        let body = ApprovePaymentRequest {
            payment_id: Some(PaymentIdInput::from(payment_id)),
        };
        self.post("/approve-payment", &body).await
    }

    async fn post<B: Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ClientError> {
        let url = self.base_url.join(path)?;
        let resp = self.http.post(url).json(body).send().await?;
        parse_response(resp).await
    }
}

async fn parse_response<T: DeserializeOwned>(resp: reqwest::Response) -> Result<T, ClientError> {
    let status = resp.status();
    if !status.is_success() {
        let body = resp.text().await.unwrap_or_default();
        return Err(match serde_json::from_str::<ErrorResponse>(&body) {
            Ok(ErrorResponse { error }) => ClientError::Relay { status, error },
            Err(_) => ClientError::Api { status, body },
        });
    }
    let bytes = resp.bytes().await?;
    serde_json::from_slice(&bytes).map_err(ClientError::Json)
}
