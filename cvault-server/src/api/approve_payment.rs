use axum::{Json, extract::State, response::IntoResponse};
use cvault_core::relay::ApprovePayment;
use cvault_sdk::objects::ApprovePaymentRequest;
use kanau::processor::Processor;

use super::extractors::RelayJson;
use super::{ApiError, to_response};
use crate::state::AppState;

/// `POST /approve-payment` - approve a pending vault payment.
///
/// The identifier is forwarded as rendered; the ledger rejects anything
/// that is not an unsigned integer.
pub(super) async fn approve_payment(
    state: State<AppState>,
    RelayJson(body): RelayJson<ApprovePaymentRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let command = ApprovePayment {
        payment_id: body.payment_id.map(|id| id.to_string()),
    };
    let submitted = state.relay.process(command).await?;
    Ok(Json(to_response(submitted)))
}
