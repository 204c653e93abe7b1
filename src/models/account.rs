//! Account data models and API request/response types.
//!
//! This module defines:
//! - `Account`: Database entity representing a registered user and their balance
//! - `RegisterRequest` / `LoginRequest`: Request bodies for the auth endpoints
//! - `AccountResponse` and friends: Response bodies returned to clients

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Represents an account record from the database.
///
/// # Database Table
///
/// Maps to the `accounts` table. Each account:
/// - Is addressed internally by `id` and publicly by `code`
/// - Holds an integer point balance that never goes below zero
///
/// Not `Serialize`: the password hash must never reach a response body.
/// Handlers convert into one of the response DTOs below.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct Account {
    /// Internal identifier
    pub id: i64,

    /// Login email, unique and stored lowercased
    pub email: String,

    /// Argon2 PHC string
    pub password_hash: String,

    pub first_name: String,

    pub last_name: String,

    pub phone_number: Option<String>,

    /// Date of birth
    pub dob: Option<NaiveDate>,

    /// Public code used to address transfers (e.g. `LBK000042`)
    pub code: String,

    /// Current point balance
    ///
    /// Must be >= 0 (enforced by database CHECK constraint).
    pub balance: i64,

    pub created_at: DateTime<Utc>,

    /// Timestamp of last balance update
    pub updated_at: DateTime<Utc>,
}

/// Request body for `POST /register`.
///
/// # JSON Example
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
/// # Validation
///
/// - `email`, `first_name`, `last_name`: required, non-blank
/// - `password`: required, at least 6 characters
/// - `dob`: optional, `YYYY-MM-DD`
#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    #[serde(default)]
    pub email: String,

    #[serde(default)]
    pub password: String,

    #[serde(default)]
    pub first_name: String,

    #[serde(default)]
    pub last_name: String,

    pub phone_number: Option<String>,

    pub dob: Option<String>,
}

/// Request body for `POST /login`.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub email: String,

    #[serde(default)]
    pub password: String,
}

/// Response body for account endpoints (`/me`, and nested in auth responses).
///
/// # JSON Example
///
/// ```json
/// {
///   "id": 1,
///   "email": "ada@example.com",
///   "first_name": "Ada",
///   "last_name": "Lovelace",
///   "phone_number": "0812345678",
///   "dob": "1990-12-10",
///   "code": "LBK000042",
///   "balance": 1000,
///   "created_at": "2025-12-20T10:00:00Z",
///   "updated_at": "2025-12-20T10:00:00Z"
/// }
/// ```
#[derive(Debug, Serialize, Deserialize)]
pub struct AccountResponse {
    pub id: i64,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub phone_number: Option<String>,
    pub dob: Option<NaiveDate>,
    pub code: String,
    pub balance: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Convert database Account to API AccountResponse.
///
/// This transformation removes the `password_hash` field.
impl From<Account> for AccountResponse {
    fn from(account: Account) -> Self {
        Self {
            id: account.id,
            email: account.email,
            first_name: account.first_name,
            last_name: account.last_name,
            phone_number: account.phone_number,
            dob: account.dob,
            code: account.code,
            balance: account.balance,
            created_at: account.created_at,
            updated_at: account.updated_at,
        }
    }
}

/// Response body for `POST /register` and `POST /login`.
#[derive(Debug, Serialize, Deserialize)]
pub struct AuthResponse {
    /// Bearer token for subsequent requests
    pub token: String,

    pub user: AccountResponse,
}

/// Response body for `GET /points/balance`.
#[derive(Debug, Serialize, Deserialize)]
pub struct BalanceResponse {
    pub code: String,
    pub balance: i64,
    pub first_name: String,
    pub last_name: String,
}

impl From<Account> for BalanceResponse {
    fn from(account: Account) -> Self {
        Self {
            code: account.code,
            balance: account.balance,
            first_name: account.first_name,
            last_name: account.last_name,
        }
    }
}

/// Query string for `GET /users/search`.
#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    pub code: Option<String>,
}

/// Public view of another account: code and names only.
///
/// Used by `GET /users/search` and as the party summary inside transfer responses.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct UserSummary {
    pub code: String,
    pub first_name: String,
    pub last_name: String,
}

impl From<&Account> for UserSummary {
    fn from(account: &Account) -> Self {
        Self {
            code: account.code.clone(),
            first_name: account.first_name.clone(),
            last_name: account.last_name.clone(),
        }
    }
}

impl From<Account> for UserSummary {
    fn from(account: Account) -> Self {
        Self {
            code: account.code,
            first_name: account.first_name,
            last_name: account.last_name,
        }
    }
}
