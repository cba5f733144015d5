//! Relay API handlers.
//!
//! Every endpoint forwards to one relay command. Any failure, whether a
//! rejected input or a failed contract call, is answered with
//! `500 { "error": message }`.
//!
//! # Endpoints
//!
//! - `GET  /vault-balance`        – USDx balance of the relay wallet
//! - `POST /deposit-usdx`         – mint, approve and deposit USDx into the vault
//! - `POST /submit-batch-payment` – submit a batch payment
//! - `POST /approve-payment`      – approve a pending payment

use axum::{
    Json, Router,
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
};
use cvault_core::relay::{RelayError, SubmittedTransaction};
use cvault_sdk::objects::{ErrorResponse, TransactionResponse};

use crate::state::AppState;

mod approve_payment;
mod batch_payment;
mod deposit;
mod extractors;
mod vault_balance;

/// Build the relay API router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/vault-balance", get(vault_balance::vault_balance))
        .route("/deposit-usdx", post(deposit::deposit_usdx))
        .route(
            "/submit-batch-payment",
            post(batch_payment::submit_batch_payment),
        )
        .route("/approve-payment", post(approve_payment::approve_payment))
}

/// Convert a confirmed relay transaction into its API response.
fn to_response(submitted: SubmittedTransaction) -> TransactionResponse {
    TransactionResponse {
        tx_hash: submitted.tx_hash.to_string(),
        message: submitted.message,
    }
}

// ---------------------------------------------------------------------------
// Error handling
// ---------------------------------------------------------------------------

/// Errors that can occur in relay API handlers.
#[derive(Debug)]
pub(crate) enum ApiError {
    /// The relay command failed (validation or ledger).
    Relay(RelayError),
    /// The request body was not valid JSON for the endpoint.
    MalformedBody(String),
}

impl From<RelayError> for ApiError {
    fn from(e: RelayError) -> Self {
        ApiError::Relay(e)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let error = match self {
            ApiError::Relay(e) => {
                tracing::error!(error = %e, "Relay request failed");
                e.to_string()
            }
            ApiError::MalformedBody(message) => {
                tracing::warn!(error = %message, "Malformed request body");
                message
            }
        };
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorResponse { error }),
        )
            .into_response()
    }
}
