//! Transfer data models and API request/response types.
//!
//! This module defines:
//! - `TransferRecord`: Database entity, one immutable row per completed transfer
//! - `TransferEntry`: A record joined with both parties, as read by the history query
//! - `TransferRequest`: Request body for `POST /points/transfer`
//! - `TransferResponse` / `TransferHistoryResponse`: Response bodies

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::account::{Account, UserSummary};

/// Lifecycle state of a transfer.
///
/// Only `Completed` is ever written. `Pending` and `Failed` are reserved
/// values that the `transfers.status` column already accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransferStatus {
    Completed,
    Pending,
    Failed,
}

impl TransferStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            TransferStatus::Completed => "completed",
            TransferStatus::Pending => "pending",
            TransferStatus::Failed => "failed",
        }
    }
}

/// Represents a transfer record from the database.
///
/// # Database Table
///
/// Maps to the `transfers` table. Rows are inserted exactly once per
/// successful transfer and never updated or deleted: this table is the
/// audit trail.
#[derive(Debug, Clone, sqlx::FromRow, Serialize, Deserialize)]
pub struct TransferRecord {
    pub id: i64,

    /// Account that was debited
    pub from_account_id: i64,

    /// Account that was credited
    pub to_account_id: i64,

    /// Points moved, always positive (enforced by CHECK constraint)
    pub amount: i64,

    pub message: Option<String>,

    /// See [`TransferStatus`]
    pub status: String,

    pub created_at: DateTime<Utc>,
}

/// A transfer joined with the public details of both parties.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct TransferEntry {
    #[sqlx(flatten)]
    pub record: TransferRecord,

    pub from_code: String,
    pub from_first_name: String,
    pub from_last_name: String,

    pub to_code: String,
    pub to_first_name: String,
    pub to_last_name: String,
}

/// Outcome of a successful transfer: the new ledger row and both account
/// snapshots as read inside the transaction.
#[derive(Debug, Clone)]
pub struct TransferReceipt {
    pub record: TransferRecord,
    pub from: Account,
    pub to: Account,
}

/// Request to transfer points to another user.
///
/// # JSON Example
///
/// ```json
/// {
///   "to_code": "LBK000042",
///   "amount": 300,
///   "message": "lunch"
/// }
/// ```
///
/// The source account is always the authenticated caller; it is never
/// taken from the body.
#[derive(Debug, Deserialize)]
pub struct TransferRequest {
    /// Public code of the recipient
    #[serde(default)]
    pub to_code: String,

    /// Points to move, must be positive
    pub amount: i64,

    pub message: Option<String>,
}

/// Response returned by `POST /points/transfer`.
///
/// # JSON Example
///
/// ```json
/// {
///   "transfer_id": 7,
///   "message": "Transfer completed successfully",
///   "from_user": { "code": "LBK000001", "first_name": "Ada", "last_name": "Lovelace" },
///   "to_user": { "code": "LBK000042", "first_name": "Alan", "last_name": "Turing" },
///   "amount": 300,
///   "status": "completed"
/// }
/// ```
#[derive(Debug, Serialize, Deserialize)]
pub struct TransferResponse {
    pub transfer_id: i64,
    pub message: String,
    pub from_user: UserSummary,
    pub to_user: UserSummary,
    pub amount: i64,
    pub status: String,
}

impl From<TransferReceipt> for TransferResponse {
    fn from(receipt: TransferReceipt) -> Self {
        Self {
            transfer_id: receipt.record.id,
            message: "Transfer completed successfully".to_string(),
            from_user: receipt.from.into(),
            to_user: receipt.to.into(),
            amount: receipt.record.amount,
            status: receipt.record.status,
        }
    }
}

/// One row of `GET /points/history`.
#[derive(Debug, Serialize, Deserialize)]
pub struct TransferHistoryItem {
    pub id: i64,
    pub from_user: UserSummary,
    pub to_user: UserSummary,
    pub amount: i64,
    pub message: Option<String>,
    pub status: String,
    pub created_at: DateTime<Utc>,
}

impl From<TransferEntry> for TransferHistoryItem {
    fn from(entry: TransferEntry) -> Self {
        Self {
            id: entry.record.id,
            from_user: UserSummary {
                code: entry.from_code,
                first_name: entry.from_first_name,
                last_name: entry.from_last_name,
            },
            to_user: UserSummary {
                code: entry.to_code,
                first_name: entry.to_first_name,
                last_name: entry.to_last_name,
            },
            amount: entry.record.amount,
            message: entry.record.message,
            status: entry.record.status,
            created_at: entry.record.created_at,
        }
    }
}

/// Response body for `GET /points/history`.
#[derive(Debug, Serialize, Deserialize)]
pub struct TransferHistoryResponse {
    pub transfers: Vec<TransferHistoryItem>,
    pub count: usize,
}

impl From<Vec<TransferEntry>> for TransferHistoryResponse {
    fn from(entries: Vec<TransferEntry>) -> Self {
        let transfers: Vec<TransferHistoryItem> = entries.into_iter().map(Into::into).collect();
        Self {
            count: transfers.len(),
            transfers,
        }
    }
}
