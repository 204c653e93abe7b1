//! Account lookups by internal id or public code.
//!
//! Every function is generic over the executor, so the same query runs on
//! the pool for plain reads and on `&mut *tx` inside the transfer
//! transaction, where it observes the transaction's own view of the rows.

use sqlx::{Executor, Sqlite};

use crate::{error::AppError, models::account::Account};

pub async fn find_by_id<'e, E>(executor: E, id: i64) -> Result<Option<Account>, sqlx::Error>
where
    E: Executor<'e, Database = Sqlite>,
{
    sqlx::query_as::<_, Account>("SELECT * FROM accounts WHERE id = ?")
        .bind(id)
        .fetch_optional(executor)
        .await
}

/// Exact match on the public code, ignoring surrounding whitespace.
pub async fn find_by_code<'e, E>(executor: E, code: &str) -> Result<Option<Account>, sqlx::Error>
where
    E: Executor<'e, Database = Sqlite>,
{
    sqlx::query_as::<_, Account>("SELECT * FROM accounts WHERE code = ?")
        .bind(code.trim())
        .fetch_optional(executor)
        .await
}

pub async fn find_by_email<'e, E>(executor: E, email: &str) -> Result<Option<Account>, sqlx::Error>
where
    E: Executor<'e, Database = Sqlite>,
{
    sqlx::query_as::<_, Account>("SELECT * FROM accounts WHERE email = ?")
        .bind(email)
        .fetch_optional(executor)
        .await
}

/// Like [`find_by_id`], failing with `AccountNotFound` when absent.
pub async fn resolve_by_id<'e, E>(executor: E, id: i64) -> Result<Account, AppError>
where
    E: Executor<'e, Database = Sqlite>,
{
    find_by_id(executor, id)
        .await?
        .ok_or(AppError::AccountNotFound)
}

/// Like [`find_by_code`], failing with `AccountNotFound` when absent.
pub async fn resolve_by_code<'e, E>(executor: E, code: &str) -> Result<Account, AppError>
where
    E: Executor<'e, Database = Sqlite>,
{
    find_by_code(executor, code)
        .await?
        .ok_or(AppError::AccountNotFound)
}
