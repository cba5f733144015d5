use axum::{Json, extract::State, response::IntoResponse};
use cvault_core::relay::GetVaultBalance;
use cvault_sdk::objects::BalanceResponse;
use kanau::processor::Processor;

use super::ApiError;
use crate::state::AppState;

/// `GET /vault-balance` - USDx balance of the relay wallet.
pub(super) async fn vault_balance(
    state: State<AppState>,
) -> Result<impl IntoResponse, ApiError> {
    let balance = state.relay.process(GetVaultBalance).await?;
    Ok(Json(BalanceResponse {
        balance: balance.balance,
    }))
}
