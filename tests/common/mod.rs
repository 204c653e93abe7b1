use axum::{
    Router,
    body::{Body, to_bytes},
    http::{Request, StatusCode, header},
};
use chrono::Duration;
use points_ledger_server::{
    db::{self, DbPool},
    router,
    services::token_service::TokenKeys,
    state::AppState,
};
use serde_json::{Value, json};
use tempfile::TempDir;
use tower::ServiceExt;

pub const SECRET: &str = "integration-test-secret";

/// Router over a fresh migrated database. Keep the `TempDir` alive for the test.
pub struct TestApp {
    pub router: Router,
    pub pool: DbPool,
    _dir: TempDir,
}

impl TestApp {
    pub async fn new() -> Self {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("api.db");
        let pool = db::create_pool(path.to_str().unwrap(), 5).await.unwrap();
        db::run_migrations(&pool).await.unwrap();

        let state = AppState::new(pool.clone(), TokenKeys::new(SECRET, Duration::hours(24)));
        Self {
            router: router(state),
            pool,
            _dir: dir,
        }
    }

    pub async fn send(&self, request: Request<Body>) -> (StatusCode, Value) {
        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, body)
    }

    pub async fn get(&self, uri: &str, token: Option<&str>) -> (StatusCode, Value) {
        let mut builder = Request::builder().method("GET").uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
        }
        self.send(builder.body(Body::empty()).unwrap()).await
    }

    pub async fn post(&self, uri: &str, token: Option<&str>, body: Value) -> (StatusCode, Value) {
        let mut builder = Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json");
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
        }
        self.send(builder.body(Body::from(body.to_string())).unwrap())
            .await
    }

    /// Register a user and return `(token, code)`.
    pub async fn register(&self, email: &str, first_name: &str) -> (String, String) {
        let (status, body) = self
            .post(
                "/register",
                None,
                json!({
                    "email": email,
                    "password": "hunter22",
                    "first_name": first_name,
                    "last_name": "Tester",
                }),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED, "{body}");

        (
            body["token"].as_str().unwrap().to_string(),
            body["user"]["code"].as_str().unwrap().to_string(),
        )
    }

    /// Force an account's public code, for tests that need a known value.
    pub async fn set_code(&self, old: &str, new: &str) {
        sqlx::query("UPDATE accounts SET code = ? WHERE code = ?")
            .bind(new)
            .bind(old)
            .execute(&self.pool)
            .await
            .unwrap();
    }
}
