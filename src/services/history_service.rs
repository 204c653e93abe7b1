//! Transfer history - read-only view over the ledger.

use crate::{db::DbPool, error::AppError, models::transfer::TransferEntry};

/// Maximum number of transfers returned by [`list_transfers`].
pub const HISTORY_LIMIT: i64 = 50;

/// List transfers sent or received by `account_id`, newest first.
///
/// Each entry carries the public code and names of both parties. At most
/// [`HISTORY_LIMIT`] rows are returned; ties on `created_at` are broken by
/// the higher (later) id first.
pub async fn list_transfers(pool: &DbPool, account_id: i64) -> Result<Vec<TransferEntry>, AppError> {
    let entries = sqlx::query_as::<_, TransferEntry>(
        r#"
        SELECT t.id, t.from_account_id, t.to_account_id, t.amount, t.message, t.status, t.created_at,
               src.code AS from_code, src.first_name AS from_first_name, src.last_name AS from_last_name,
               dst.code AS to_code, dst.first_name AS to_first_name, dst.last_name AS to_last_name
        FROM transfers t
        JOIN accounts src ON src.id = t.from_account_id
        JOIN accounts dst ON dst.id = t.to_account_id
        WHERE t.from_account_id = ? OR t.to_account_id = ?
        ORDER BY t.created_at DESC, t.id DESC
        LIMIT ?
        "#,
    )
    .bind(account_id)
    .bind(account_id)
    .bind(HISTORY_LIMIT)
    .fetch_all(pool)
    .await?;

    Ok(entries)
}
