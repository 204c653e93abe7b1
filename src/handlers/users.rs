//! Profile and directory handlers.
//!
//! - GET /me - Authenticated account profile
//! - GET /users/search?code=... - Public lookup by code

use axum::{Extension, Json, extract::State};

use crate::{
    error::AppError,
    extract::AppQuery,
    middleware::auth::AuthContext,
    models::account::{AccountResponse, SearchQuery, UserSummary},
    services::account_directory,
    state::AppState,
};

/// Get the caller's own profile.
///
/// # Response
///
/// - **Success (200 OK)**: Account profile, without the password hash
/// - **Error (404)**: The account behind the token no longer exists
pub async fn get_me(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
) -> Result<Json<AccountResponse>, AppError> {
    let account = account_directory::resolve_by_id(&state.pool, auth.account_id).await?;

    Ok(Json(account.into()))
}

/// Look up another user by public code.
///
/// # Endpoint
///
/// `GET /users/search?code=LBK000042`
///
/// # Response
///
/// ```json
/// { "code": "LBK000042", "first_name": "Alan", "last_name": "Turing" }
/// ```
///
/// - **Error (400)**: `code` missing or blank
/// - **Error (404)**: No account with that code
pub async fn search_user(
    State(state): State<AppState>,
    AppQuery(query): AppQuery<SearchQuery>,
) -> Result<Json<UserSummary>, AppError> {
    let code = query
        .code
        .as_deref()
        .map(str::trim)
        .filter(|c| !c.is_empty())
        .ok_or_else(|| AppError::validation("code query parameter is required"))?;

    let account = account_directory::resolve_by_code(&state.pool, code).await?;

    Ok(Json(account.into()))
}
