use axum::{Json, extract::State, response::IntoResponse};
use cvault_core::relay::DepositUsdx;
use cvault_sdk::objects::DepositRequest;
use kanau::processor::Processor;

use super::extractors::RelayJson;
use super::{ApiError, to_response};
use crate::state::AppState;

/// `POST /deposit-usdx` - mint, approve and deposit USDx.
///
/// Responds with the hash of the final deposit transaction once all three
/// steps are confirmed.
pub(super) async fn deposit_usdx(
    state: State<AppState>,
    RelayJson(body): RelayJson<DepositRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let command = DepositUsdx {
        amount: body.amount.map(|amount| amount.to_string()),
    };
    let submitted = state.relay.process(command).await?;
    Ok(Json(to_response(submitted)))
}
