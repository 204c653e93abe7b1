//! Account service - registration and credential checks.
//!
//! This service handles:
//! - Input validation for new accounts
//! - Public code allocation (`LBK` + six digits, unique)
//! - Password hashing and verification
//! - The starting point balance

use chrono::{NaiveDate, Utc};
use rand::Rng;

use crate::{
    db::DbPool,
    error::AppError,
    models::account::{Account, LoginRequest, RegisterRequest},
    services::{account_directory, password},
};

/// Points credited to every new account.
pub const STARTING_BALANCE: i64 = 1000;

/// Minimum password length accepted at registration.
pub const MIN_PASSWORD_LEN: usize = 6;

/// How many random codes to try before giving up on a registration.
const CODE_ALLOCATION_ATTEMPTS: usize = 8;

/// Random public code, e.g. `LBK004217`.
pub fn generate_code() -> String {
    let n: u32 = rand::rng().random_range(0..1_000_000);
    format!("LBK{n:06}")
}

/// Register a new account.
///
/// # Process
///
/// 1. Validate and normalize input (email lowercased, names trimmed)
/// 2. Reject an email that is already registered
/// 3. Hash the password
/// 4. Insert with a fresh public code, retrying on code collision
///
/// # Errors
///
/// - `Validation`: Missing field, short password, bad date of birth
/// - `EmailTaken`: Email is already registered
/// - `Internal`: Hashing failed or no free code was found
/// - `Database`: Database error occurred
pub async fn register(pool: &DbPool, request: RegisterRequest) -> Result<Account, AppError> {
    let email = request.email.trim().to_lowercase();
    let first_name = request.first_name.trim().to_string();
    let last_name = request.last_name.trim().to_string();

    if email.is_empty()
        || request.password.is_empty()
        || first_name.is_empty()
        || last_name.is_empty()
    {
        return Err(AppError::validation(
            "email, password, first_name, and last_name are required",
        ));
    }
    if !email.contains('@') {
        return Err(AppError::validation("email is not valid"));
    }
    if request.password.chars().count() < MIN_PASSWORD_LEN {
        return Err(AppError::validation(format!(
            "password must be at least {MIN_PASSWORD_LEN} characters"
        )));
    }

    let dob = parse_dob(request.dob.as_deref())?;
    let phone_number = request
        .phone_number
        .map(|p| p.trim().to_string())
        .filter(|p| !p.is_empty());

    if account_directory::find_by_email(pool, &email).await?.is_some() {
        return Err(AppError::EmailTaken);
    }

    let password_hash = password::hash_password(&request.password)?;

    for _ in 0..CODE_ALLOCATION_ATTEMPTS {
        let code = generate_code();
        let now = Utc::now();

        let inserted = sqlx::query_as::<_, Account>(
            r#"
            INSERT INTO accounts (email, password_hash, first_name, last_name, phone_number, dob, code, balance, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            RETURNING *
            "#,
        )
        .bind(&email)
        .bind(&password_hash)
        .bind(&first_name)
        .bind(&last_name)
        .bind(&phone_number)
        .bind(dob)
        .bind(&code)
        .bind(STARTING_BALANCE)
        .bind(now)
        .bind(now)
        .fetch_one(pool)
        .await;

        match inserted {
            Ok(account) => {
                tracing::info!(account_id = account.id, code = %account.code, "account registered");
                return Ok(account);
            }
            Err(sqlx::Error::Database(db_err)) if db_err.is_unique_violation() => {
                // A concurrent registration may have taken the email after the pre-check
                if db_err.message().contains("accounts.email") {
                    return Err(AppError::EmailTaken);
                }
                tracing::debug!(%code, "public code collision, retrying");
            }
            Err(err) => return Err(err.into()),
        }
    }

    Err(AppError::Internal(
        "could not allocate a unique public code".to_string(),
    ))
}

/// Check an email/password pair.
///
/// Unknown email and wrong password fail identically with
/// `InvalidCredentials`.
pub async fn authenticate(pool: &DbPool, request: LoginRequest) -> Result<Account, AppError> {
    let email = request.email.trim().to_lowercase();
    if email.is_empty() || request.password.is_empty() {
        return Err(AppError::validation("email and password are required"));
    }

    let Some(account) = account_directory::find_by_email(pool, &email).await? else {
        return Err(AppError::InvalidCredentials);
    };

    if !password::verify_password(&request.password, &account.password_hash) {
        return Err(AppError::InvalidCredentials);
    }

    Ok(account)
}

fn parse_dob(dob: Option<&str>) -> Result<Option<NaiveDate>, AppError> {
    match dob.map(str::trim) {
        None | Some("") => Ok(None),
        Some(raw) => NaiveDate::parse_from_str(raw, "%Y-%m-%d")
            .map(Some)
            .map_err(|_| AppError::validation("invalid date format, use YYYY-MM-DD")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::test_pool;

    fn request(email: &str) -> RegisterRequest {
        RegisterRequest {
            email: email.to_string(),
            password: "hunter22".to_string(),
            first_name: "Ada".to_string(),
            last_name: "Lovelace".to_string(),
            phone_number: Some("0812345678".to_string()),
            dob: Some("1990-12-10".to_string()),
        }
    }

    fn login(email: &str, password: &str) -> LoginRequest {
        LoginRequest {
            email: email.to_string(),
            password: password.to_string(),
        }
    }

    #[test]
    fn generated_codes_have_expected_shape() {
        for _ in 0..100 {
            let code = generate_code();
            assert_eq!(code.len(), 9);
            assert!(code.starts_with("LBK"));
            assert!(code[3..].chars().all(|c| c.is_ascii_digit()));
        }
    }

    #[test]
    fn dob_parsing() {
        assert_eq!(parse_dob(None).unwrap(), None);
        assert_eq!(parse_dob(Some("")).unwrap(), None);
        assert_eq!(
            parse_dob(Some("1990-12-10")).unwrap(),
            NaiveDate::from_ymd_opt(1990, 12, 10)
        );
        assert!(matches!(parse_dob(Some("10/12/1990")), Err(AppError::Validation(_))));
    }

    #[tokio::test]
    async fn registration_grants_starting_balance_and_code() {
        let (_dir, pool) = test_pool().await;

        let account = register(&pool, request("Ada@Example.com")).await.unwrap();

        assert_eq!(account.email, "ada@example.com");
        assert_eq!(account.balance, STARTING_BALANCE);
        assert!(account.code.starts_with("LBK"));
        assert_eq!(account.dob, NaiveDate::from_ymd_opt(1990, 12, 10));
        assert_eq!(account.phone_number.as_deref(), Some("0812345678"));
        assert_ne!(account.password_hash, "hunter22");
    }

    #[tokio::test]
    async fn duplicate_email_is_rejected() {
        let (_dir, pool) = test_pool().await;
        register(&pool, request("ada@example.com")).await.unwrap();

        let err = register(&pool, request("ADA@example.com")).await.unwrap_err();
        assert!(matches!(err, AppError::EmailTaken));
    }

    #[tokio::test]
    async fn missing_fields_and_short_password_are_rejected() {
        let (_dir, pool) = test_pool().await;

        let mut missing = request("ada@example.com");
        missing.last_name = "  ".to_string();
        assert!(matches!(
            register(&pool, missing).await,
            Err(AppError::Validation(_))
        ));

        let mut short = request("ada@example.com");
        short.password = "12345".to_string();
        assert!(matches!(
            register(&pool, short).await,
            Err(AppError::Validation(_))
        ));
    }

    #[tokio::test]
    async fn login_failures_are_indistinguishable() {
        let (_dir, pool) = test_pool().await;
        register(&pool, request("ada@example.com")).await.unwrap();

        let wrong_password = authenticate(&pool, login("ada@example.com", "nope-nope"))
            .await
            .unwrap_err();
        let unknown_email = authenticate(&pool, login("bob@example.com", "hunter22"))
            .await
            .unwrap_err();

        assert!(matches!(wrong_password, AppError::InvalidCredentials));
        assert!(matches!(unknown_email, AppError::InvalidCredentials));
        assert_eq!(wrong_password.to_string(), unknown_email.to_string());
    }

    #[tokio::test]
    async fn login_succeeds_with_correct_password() {
        let (_dir, pool) = test_pool().await;
        let registered = register(&pool, request("ada@example.com")).await.unwrap();

        let account = authenticate(&pool, login(" ADA@example.com ", "hunter22"))
            .await
            .unwrap();
        assert_eq!(account.id, registered.id);
    }
}
