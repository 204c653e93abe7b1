//! Data models representing database entities and API payloads.

/// Account entity, auth and profile payloads
pub mod account;
/// Transfer ledger entity and transfer payloads
pub mod transfer;
