//! Point balance, transfer and history handlers.
//!
//! - GET /points/balance - Caller's code and balance
//! - POST /points/transfer - Move points to another user
//! - GET /points/history - Caller's most recent transfers

use axum::{Extension, Json, extract::State};

use crate::{
    error::AppError,
    extract::AppJson,
    middleware::auth::AuthContext,
    models::{
        account::BalanceResponse,
        transfer::{TransferHistoryResponse, TransferRequest, TransferResponse},
    },
    services::{account_directory, history_service, transfer_service},
    state::AppState,
};

/// Get the caller's point balance.
///
/// # Response (200)
///
/// ```json
/// { "code": "LBK000001", "balance": 700, "first_name": "Ada", "last_name": "Lovelace" }
/// ```
pub async fn get_balance(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
) -> Result<Json<BalanceResponse>, AppError> {
    let account = account_directory::resolve_by_id(&state.pool, auth.account_id).await?;

    Ok(Json(account.into()))
}

/// Transfer points to another user.
///
/// # Request Body
///
/// ```json
/// { "to_code": "LBK000042", "amount": 300, "message": "lunch" }
/// ```
///
/// # Atomicity
///
/// Both balances and the ledger row are written in a single database
/// transaction. Either all succeed or none do.
///
/// # Response
///
/// - **Success (200 OK)**: Transfer receipt
/// - **Error (400)**: Bad amount, insufficient balance, or self-transfer
/// - **Error (404)**: Recipient not found
/// - **Error (500)**: Storage failure (nothing was applied)
pub async fn transfer_points(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    AppJson(request): AppJson<TransferRequest>,
) -> Result<Json<TransferResponse>, AppError> {
    let receipt = transfer_service::execute_transfer(
        &state.pool,
        auth.account_id,
        &request.to_code,
        request.amount,
        request.message,
    )
    .await?;

    Ok(Json(receipt.into()))
}

/// List the caller's transfers, sent and received, newest first (max 50).
pub async fn get_history(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
) -> Result<Json<TransferHistoryResponse>, AppError> {
    let entries = history_service::list_transfers(&state.pool, auth.account_id).await?;

    Ok(Json(entries.into()))
}
