use axum::{Json, extract::State, response::IntoResponse};
use cvault_core::relay::SubmitBatchPayment;
use cvault_sdk::objects::BatchPaymentRequest;
use kanau::processor::Processor;

use super::extractors::RelayJson;
use super::{ApiError, to_response};
use crate::state::AppState;

/// `POST /submit-batch-payment`
pub(super) async fn submit_batch_payment(
    state: State<AppState>,
    RelayJson(body): RelayJson<BatchPaymentRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let command = SubmitBatchPayment {
        recipients: body.recipients,
        amounts: body
            .amounts
            .map(|amounts| amounts.iter().map(ToString::to_string).collect()),
    };
    let submitted = state.relay.process(command).await?;
    Ok(Json(to_response(submitted)))
}
