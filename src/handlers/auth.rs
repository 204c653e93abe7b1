//! Registration and login handlers.
//!
//! - POST /register - Create an account and issue a token
//! - POST /login - Check credentials and issue a token

use axum::{Json, extract::State, http::StatusCode};

use crate::{
    error::AppError,
    extract::AppJson,
    models::account::{AuthResponse, LoginRequest, RegisterRequest},
    services::account_service,
    state::AppState,
};

/// Register a new account.
///
/// # Endpoint
///
/// `POST /register`
///
/// # Request Body
///
/// ```json
/// {
///   "email": "ada@example.com",
///   "password": "hunter22",
///   "first_name": "Ada",
///   "last_name": "Lovelace",
///   "phone_number": "0812345678",
///   "dob": "1990-12-10"
/// }
/// ```
///
/// # Response
///
/// - **Success (201 Created)**: `{ "token": "...", "user": { ... "balance": 1000 } }`
/// - **Error (400)**: Missing field, bad date, or email already registered
/// - **Error (500)**: Database error
pub async fn register(
    State(state): State<AppState>,
    AppJson(request): AppJson<RegisterRequest>,
) -> Result<(StatusCode, Json<AuthResponse>), AppError> {
    let account = account_service::register(&state.pool, request).await?;
    let token = state.tokens.issue(&account)?;

    Ok((
        StatusCode::CREATED,
        Json(AuthResponse {
            token,
            user: account.into(),
        }),
    ))
}

/// Log in with email and password.
///
/// # Endpoint
///
/// `POST /login`
///
/// # Response
///
/// - **Success (200 OK)**: `{ "token": "...", "user": { ... } }`
/// - **Error (401)**: Unknown email or wrong password (same message for both)
pub async fn login(
    State(state): State<AppState>,
    AppJson(request): AppJson<LoginRequest>,
) -> Result<Json<AuthResponse>, AppError> {
    let account = account_service::authenticate(&state.pool, request).await?;
    let token = state.tokens.issue(&account)?;

    Ok(Json(AuthResponse {
        token,
        user: account.into(),
    }))
}
