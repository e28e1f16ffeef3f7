// tests/common/mod.rs

use std::sync::Arc;
use std::sync::atomic::{AtomicU32, Ordering};

use assessly::config::Config;
use assessly::routes;
use assessly::services::{completion::SqlCompletionService, notify::LogNotifier};
use assessly::state::AppState;
use sqlx::SqlitePool;
use sqlx::sqlite::SqlitePoolOptions;

pub struct TestApp {
    pub address: String,
    pub pool: SqlitePool,
}

/// Spawns the app on a random port against a fresh per-test SQLite database.
pub async fn spawn_app() -> TestApp {
    static COUNTER: AtomicU32 = AtomicU32::new(0);
    let id = COUNTER.fetch_add(1, Ordering::SeqCst);
    let path =
        std::env::temp_dir().join(format!("assessly_test_{}_{}.db", std::process::id(), id));
    // Clean up leftover file from previous runs
    let _ = std::fs::remove_file(&path);
    let database_url = format!("sqlite:{}?mode=rwc", path.display());

    let pool = SqlitePoolOptions::new()
        .max_connections(5)
        .connect(&database_url)
        .await
        .expect("Failed to create test database");

    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .expect("Failed to migrate test database");

    let config = Config {
        database_url,
        jwt_secret: "test_secret_for_integration_tests".to_string(),
        jwt_expiration: 600, // 10 minutes for tests
        rust_log: "error".to_string(),
        pass_threshold: 70,
    };

    let state = AppState {
        pool: pool.clone(),
        config,
        completion: Arc::new(SqlCompletionService::new(pool.clone())),
        notifier: Arc::new(LogNotifier),
    };

    let app = routes::create_router(state);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind random port");

    let port = listener.local_addr().unwrap().port();
    let address = format!("http://127.0.0.1:{}", port);

    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    TestApp { address, pool }
}

/// Registers a fresh user and logs them in. Returns (token, user_id).
pub async fn register_and_login(client: &reqwest::Client, address: &str) -> (String, i64) {
    // Truncate UUID to keep the username well under the length limit
    let username = format!("u_{}", &uuid::Uuid::new_v4().to_string()[..8]);
    let password = "password123";

    let register_resp = client
        .post(format!("{}/api/auth/register", address))
        .json(&serde_json::json!({
            "username": username,
            "password": password
        }))
        .send()
        .await
        .expect("Register failed")
        .json::<serde_json::Value>()
        .await
        .expect("Failed to parse register json");

    let user_id = register_resp["id"].as_i64().expect("User id not found");

    let login_resp = client
        .post(format!("{}/api/auth/login", address))
        .json(&serde_json::json!({
            "username": username,
            "password": password
        }))
        .send()
        .await
        .expect("Login failed")
        .json::<serde_json::Value>()
        .await
        .expect("Failed to parse login json");

    let token = login_resp["token"].as_str().expect("Token not found");

    (token.to_string(), user_id)
}

/// A two-question assessment: multiple-choice {a,b} and {c}, 50 points each.
pub fn two_multiple_questions() -> serde_json::Value {
    serde_json::json!([
        {
            "prompt": "Pick both correct options",
            "kind": "multiple",
            "options": [
                {"id": "a", "text": "Option A"},
                {"id": "b", "text": "Option B"},
                {"id": "c", "text": "Option C"}
            ],
            "answer_key": ["a", "b"],
            "points": 50
        },
        {
            "prompt": "Pick the correct option",
            "kind": "multiple",
            "options": [
                {"id": "a", "text": "Option A"},
                {"id": "c", "text": "Option C"}
            ],
            "answer_key": ["c"],
            "points": 50
        }
    ])
}

/// Creates an assessment and returns its id.
pub async fn create_assessment(
    client: &reqwest::Client,
    address: &str,
    token: &str,
    body: serde_json::Value,
) -> i64 {
    let resp = client
        .post(format!("{}/api/assessments", address))
        .header("Authorization", format!("Bearer {}", token))
        .json(&body)
        .send()
        .await
        .expect("Create assessment failed");

    assert_eq!(resp.status().as_u16(), 201, "create assessment should succeed");
    let body: serde_json::Value = resp.json().await.unwrap();
    body["id"].as_i64().expect("Assessment id not found")
}
