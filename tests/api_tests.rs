// tests/api_tests.rs

use std::sync::{
    Arc,
    atomic::{AtomicBool, Ordering},
};

use async_trait::async_trait;
use kit_quiz::{
    config::{Config, parse_schools},
    error::AppError,
    models::{
        catalog::{Kit, Level},
        question::{NewQuestion, Question},
        result::{NewResult, TestResult},
        timing::{TestTiming, TimingKey},
    },
    routes,
    state::AppState,
    store::{MemoryStore, QuizStore, SqliteStore},
    utils::hash::hash_password,
};
use serde_json::{Value, json};
use sqlx::sqlite::SqlitePoolOptions;

const ADMIN_PASSWORD: &str = "test_admin_password";

fn test_config() -> Config {
    Config {
        database_url: None,
        jwt_secret: "test_secret_for_integration_tests".to_string(),
        jwt_expiration: 600,
        admin_password: ADMIN_PASSWORD.to_string(),
        schools: parse_schools("School X,School Y"),
        default_test_minutes: 15,
        bind_addr: "127.0.0.1:0".parse().unwrap(),
        rust_log: "error".to_string(),
    }
}

/// In-memory SQLite with migrations applied. One connection so every
/// query sees the same database.
async fn sqlite_store() -> Arc<dyn QuizStore> {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .expect("Failed to open in-memory SQLite");

    let store = SqliteStore::new(pool);
    store.migrate().await.expect("Failed to migrate database");
    Arc::new(store)
}

/// Spawns the app on a random port and returns its base URL.
async fn spawn_app(store: Arc<dyn QuizStore>) -> String {
    let config = test_config();
    let hash = hash_password(&config.admin_password).unwrap();
    let app = routes::create_router(AppState::new(store, config, hash));

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind random port");
    let port = listener.local_addr().unwrap().port();

    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    format!("http://127.0.0.1:{}", port)
}

async fn admin_token(client: &reqwest::Client, address: &str) -> String {
    let resp: Value = client
        .post(format!("{}/api/auth/login", address))
        .json(&json!({ "password": ADMIN_PASSWORD }))
        .send()
        .await
        .expect("Login failed")
        .json()
        .await
        .unwrap();

    resp["token"].as_str().expect("Token not found").to_string()
}

async fn add_question(client: &reqwest::Client, address: &str, token: &str, answer: &str) -> i64 {
    let resp = client
        .post(format!("{}/api/admin/questions", address))
        .bearer_auth(token)
        .json(&json!({
            "kit": "eduplay",
            "level": "junior",
            "prompt": format!("Pick {}", answer),
            "options": ["A", "B", "C"],
            "correct_answer": answer,
        }))
        .send()
        .await
        .unwrap();

    assert_eq!(resp.status().as_u16(), 201);
    resp.json::<Value>().await.unwrap()["id"].as_i64().unwrap()
}

async fn start(client: &reqwest::Client, address: &str, teacher: &str, school: &str) -> reqwest::Response {
    client
        .post(format!("{}/api/test/start", address))
        .json(&json!({
            "teacher_name": teacher,
            "school": school,
            "kit": "eduplay",
            "level": "junior",
        }))
        .send()
        .await
        .unwrap()
}

async fn submit(client: &reqwest::Client, address: &str, token: &str, answers: Value) -> reqwest::Response {
    client
        .post(format!("{}/api/test/submit", address))
        .header("x-session-token", token)
        .json(&json!({ "answers": answers }))
        .send()
        .await
        .unwrap()
}

#[tokio::test]
async fn unknown_path_404() {
    let address = spawn_app(Arc::new(MemoryStore::new())).await;

    let response = reqwest::get(format!("{}/random_path_that_does_not_exist", address))
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status().as_u16(), 404);
}

#[tokio::test]
async fn full_test_flow_on_sqlite() {
    let address = spawn_app(sqlite_store().await).await;
    let client = reqwest::Client::new();
    let token = admin_token(&client, &address).await;

    add_question(&client, &address, &token, "A").await;
    add_question(&client, &address, &token, "B").await;

    // Start: answer keys stripped, default time.
    let started = start(&client, &address, "Asha", "School X").await;
    assert_eq!(started.status().as_u16(), 200);
    let header_token = started
        .headers()
        .get("x-session-token")
        .unwrap()
        .to_str()
        .unwrap()
        .to_string();
    let body: Value = started.json().await.unwrap();
    assert_eq!(body["total"], 2);
    assert_eq!(body["test_time"], 15);
    assert_eq!(body["session_token"], header_token.as_str());
    assert!(body["questions"][0].get("correct_answer").is_none());
    assert_eq!(body["questions"][0]["options"], json!(["A", "B", "C"]));

    // Submit: one right, one wrong.
    let submitted = submit(&client, &address, &header_token, json!(["A", "C"])).await;
    assert_eq!(submitted.status().as_u16(), 200);
    let result: Value = submitted.json().await.unwrap();
    assert_eq!(result["score"], 1);
    assert_eq!(result["total"], 2);
    assert_eq!(result["percentage"], 50.0);
    assert!(result["result_id"].as_i64().unwrap() >= 1);

    // The session is spent.
    let again = submit(&client, &address, &header_token, json!(["A", "B"])).await;
    assert_eq!(again.status().as_u16(), 409);

    // Leaderboard shows the attempt without answers.
    let board: Vec<Value> = client
        .get(format!("{}/api/leaderboard", address))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(board.len(), 1);
    assert_eq!(board[0]["teacher_name"], "Asha");
    assert!(board[0].get("answers").is_none());
}

#[tokio::test]
async fn submit_without_start_is_rejected() {
    let address = spawn_app(Arc::new(MemoryStore::new())).await;
    let client = reqwest::Client::new();

    let no_header = client
        .post(format!("{}/api/test/submit", address))
        .json(&json!({ "answers": ["A"] }))
        .send()
        .await
        .unwrap();
    assert_eq!(no_header.status().as_u16(), 409);

    let unknown = submit(&client, &address, "6a1f0c0e-8c8a-4d43-9b0c-6f3a3c8e2f11", json!(["A"])).await;
    assert_eq!(unknown.status().as_u16(), 409);
}

#[tokio::test]
async fn start_with_empty_bank_scores_zero() {
    let address = spawn_app(sqlite_store().await).await;
    let client = reqwest::Client::new();

    let body: Value = start(&client, &address, "Ravi", "School Y").await.json().await.unwrap();
    assert_eq!(body["total"], 0);

    let token = body["session_token"].as_str().unwrap();
    let result: Value = submit(&client, &address, token, json!(["A"])).await.json().await.unwrap();
    assert_eq!(result["total"], 0);
    assert_eq!(result["percentage"], 0.0);
}

#[tokio::test]
async fn start_validates_input() {
    let address = spawn_app(Arc::new(MemoryStore::new())).await;
    let client = reqwest::Client::new();

    let bad_school = start(&client, &address, "Asha", "Nowhere High").await;
    assert_eq!(bad_school.status().as_u16(), 400);

    let bad_kit = client
        .post(format!("{}/api/test/start", address))
        .json(&json!({
            "teacher_name": "Asha",
            "school": "School X",
            "kit": "lego",
            "level": "junior",
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(bad_kit.status().as_u16(), 400);

    let empty_name = start(&client, &address, "", "School X").await;
    assert_eq!(empty_name.status().as_u16(), 400);
}

#[tokio::test]
async fn restart_under_same_token_replaces_session() {
    let store: Arc<dyn QuizStore> = Arc::new(MemoryStore::new());
    let address = spawn_app(store).await;
    let client = reqwest::Client::new();
    let admin = admin_token(&client, &address).await;
    add_question(&client, &address, &admin, "A").await;

    let first: Value = start(&client, &address, "Asha", "School X").await.json().await.unwrap();
    let token = first["session_token"].as_str().unwrap().to_string();

    let second: Value = client
        .post(format!("{}/api/test/start", address))
        .header("x-session-token", &token)
        .json(&json!({
            "teacher_name": "Asha",
            "school": "School Y",
            "kit": "eduplay",
            "level": "junior",
        }))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(second["session_token"], token.as_str());

    submit(&client, &address, &token, json!(["A"])).await;

    let board: Vec<Value> = client
        .get(format!("{}/api/leaderboard", address))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(board.len(), 1);
    assert_eq!(board[0]["school"], "School Y");
}

/// Memory store whose next result write fails once `fail_next_write` is set.
#[derive(Default)]
struct FlakyStore {
    inner: MemoryStore,
    fail_next_write: AtomicBool,
}

#[async_trait]
impl QuizStore for FlakyStore {
    async fn add_question(&self, question: NewQuestion) -> Result<Question, AppError> {
        self.inner.add_question(question).await
    }

    async fn delete_question(&self, id: i64) -> Result<bool, AppError> {
        self.inner.delete_question(id).await
    }

    async fn list_questions(&self, kit: Kit, level: Level) -> Result<Vec<Question>, AppError> {
        self.inner.list_questions(kit, level).await
    }

    async fn all_questions(&self) -> Result<Vec<Question>, AppError> {
        self.inner.all_questions().await
    }

    async fn reset_questions(&self, kit: Kit, level: Level) -> Result<u64, AppError> {
        self.inner.reset_questions(kit, level).await
    }

    async fn get_timing(&self, key: &TimingKey) -> Result<Option<i64>, AppError> {
        self.inner.get_timing(key).await
    }

    async fn set_timing(&self, timing: TestTiming) -> Result<(), AppError> {
        self.inner.set_timing(timing).await
    }

    async fn list_timings(&self) -> Result<Vec<TestTiming>, AppError> {
        self.inner.list_timings().await
    }

    async fn append_result(&self, result: NewResult) -> Result<TestResult, AppError> {
        if self.fail_next_write.swap(false, Ordering::SeqCst) {
            return Err(AppError::InternalServerError("disk full".to_string()));
        }
        self.inner.append_result(result).await
    }

    async fn list_results(&self) -> Result<Vec<TestResult>, AppError> {
        self.inner.list_results().await
    }

    async fn clear_results(&self) -> Result<u64, AppError> {
        self.inner.clear_results().await
    }
}

#[tokio::test]
async fn failed_result_write_keeps_session_open() {
    let store = Arc::new(FlakyStore::default());
    store
        .add_question(NewQuestion {
            kit: Kit::Eduplay,
            level: Level::Junior,
            prompt: "Pick A".to_string(),
            options: vec!["A".to_string(), "B".to_string()],
            correct_answer: "A".to_string(),
        })
        .await
        .unwrap();
    let address = spawn_app(store.clone()).await;
    let client = reqwest::Client::new();

    let body: Value = start(&client, &address, "Asha", "School X").await.json().await.unwrap();
    let token = body["session_token"].as_str().unwrap().to_string();

    store.fail_next_write.store(true, Ordering::SeqCst);
    let failed = submit(&client, &address, &token, json!(["A"])).await;
    assert_eq!(failed.status().as_u16(), 500);

    let retried = submit(&client, &address, &token, json!(["A"])).await;
    assert_eq!(retried.status().as_u16(), 200);
    let result: Value = retried.json().await.unwrap();
    assert_eq!(result["percentage"], 100.0);

    let spent = submit(&client, &address, &token, json!(["A"])).await;
    assert_eq!(spent.status().as_u16(), 409);
}
