//! Business logic services.
//!
//! Services contain core business logic separated from HTTP handlers.
//! They handle database transactions, validation, and complex operations.

pub mod account_directory;
pub mod account_service;
pub mod history_service;
pub mod password;
pub mod token_service;
pub mod transfer_service;
