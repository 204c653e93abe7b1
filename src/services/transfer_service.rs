//! Transfer service - Core business logic for point transfers.
//!
//! This service handles:
//! - Validation of the transfer request
//! - Atomic debit/credit of both accounts
//! - Appending the immutable ledger row
//! - Database transaction management
//!
//! # Atomicity Guarantees
//!
//! Every step runs inside one SQLite transaction opened with
//! `BEGIN IMMEDIATE`, which takes the database write lock up front. The
//! balance that is checked is therefore the balance that is updated: no
//! other writer can commit between the read and the write. Any failure
//! rolls the whole transaction back.

use chrono::Utc;

use crate::{
    db::DbPool,
    error::AppError,
    models::{
        account::Account,
        transfer::{TransferReceipt, TransferRecord, TransferStatus},
    },
    services::account_directory,
};

/// Upper bound on the optional transfer message, in characters.
pub const MAX_MESSAGE_LEN: usize = 255;

/// Transfer points from one account to another, addressed by public code.
///
/// # Process
///
/// 1. Validate amount, code and message (no storage access)
/// 2. Start an immediate (write-locked) database transaction
/// 3. Resolve the source by id and the destination by code
/// 4. Reject self-transfer and insufficient balance
/// 5. Debit source, credit destination, record transfer
/// 6. Commit (or rollback on error)
///
/// # Arguments
///
/// * `pool` - Database connection pool
/// * `source_account_id` - Authenticated caller's account
/// * `destination_code` - Public code of the recipient
/// * `amount` - Points to move (must be positive)
/// * `message` - Optional note stored on the ledger row
///
/// # Errors
///
/// - `Validation`: Amount is zero or negative, code blank, or message too long
/// - `AccountNotFound`: Source account doesn't exist
/// - `RecipientNotFound`: No account has `destination_code`
/// - `SelfTransfer`: Source and destination are the same account
/// - `InsufficientBalance`: Source balance is lower than `amount`
/// - `Database`: Database error occurred (transaction rolled back)
pub async fn execute_transfer(
    pool: &DbPool,
    source_account_id: i64,
    destination_code: &str,
    amount: i64,
    message: Option<String>,
) -> Result<TransferReceipt, AppError> {
    if amount <= 0 {
        return Err(AppError::validation("amount must be a positive integer"));
    }
    if destination_code.trim().is_empty() {
        return Err(AppError::validation("to_code is required"));
    }

    let message = normalize_message(message)?;

    // Write lock is held from here until commit or rollback
    let mut tx = pool.begin_with("BEGIN IMMEDIATE").await?;

    let Some(from) = account_directory::find_by_id(&mut *tx, source_account_id).await? else {
        tx.rollback().await?;
        return Err(AppError::AccountNotFound);
    };

    let Some(to) = account_directory::find_by_code(&mut *tx, destination_code).await? else {
        tx.rollback().await?;
        return Err(AppError::RecipientNotFound);
    };

    if from.id == to.id {
        tx.rollback().await?;
        return Err(AppError::SelfTransfer);
    }

    if from.balance < amount {
        tx.rollback().await?;
        tracing::debug!(
            account_id = from.id,
            balance = from.balance,
            amount,
            "transfer rejected: insufficient balance"
        );
        return Err(AppError::InsufficientBalance);
    }

    let now = Utc::now();

    // Balance guard in the WHERE clause; zero rows means the debit would overdraw
    let debited = sqlx::query(
        "UPDATE accounts SET balance = balance - ?, updated_at = ? WHERE id = ? AND balance >= ?",
    )
    .bind(amount)
    .bind(now)
    .bind(from.id)
    .bind(amount)
    .execute(&mut *tx)
    .await?
    .rows_affected();

    if debited == 0 {
        tx.rollback().await?;
        return Err(AppError::InsufficientBalance);
    }

    let credited =
        sqlx::query("UPDATE accounts SET balance = balance + ?, updated_at = ? WHERE id = ?")
            .bind(amount)
            .bind(now)
            .bind(to.id)
            .execute(&mut *tx)
            .await?
            .rows_affected();

    if credited == 0 {
        tx.rollback().await?;
        return Err(AppError::RecipientNotFound);
    }

    let record = sqlx::query_as::<_, TransferRecord>(
        r#"
        INSERT INTO transfers (from_account_id, to_account_id, amount, message, status, created_at)
        VALUES (?, ?, ?, ?, ?, ?)
        RETURNING *
        "#,
    )
    .bind(from.id)
    .bind(to.id)
    .bind(amount)
    .bind(message)
    .bind(TransferStatus::Completed.as_str())
    .bind(now)
    .fetch_one(&mut *tx)
    .await?;

    // Commit ALL changes atomically
    // If this fails, everything rolls back
    tx.commit().await?;

    tracing::info!(
        transfer_id = record.id,
        from = %from.code,
        to = %to.code,
        amount,
        "transfer completed"
    );

    // Snapshots reflect the committed balances
    let from = Account {
        balance: from.balance - amount,
        updated_at: now,
        ..from
    };
    let to = Account {
        balance: to.balance + amount,
        updated_at: now,
        ..to
    };

    Ok(TransferReceipt { record, from, to })
}

/// Trim the message; blank becomes `None`, overlong is rejected.
fn normalize_message(message: Option<String>) -> Result<Option<String>, AppError> {
    let Some(message) = message else {
        return Ok(None);
    };

    let trimmed = message.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    if trimmed.chars().count() > MAX_MESSAGE_LEN {
        return Err(AppError::validation(format!(
            "message must be at most {MAX_MESSAGE_LEN} characters"
        )));
    }

    Ok(Some(trimmed.to_string()))
}
