#![allow(dead_code)]

use std::str::FromStr;
use std::sync::Arc;

use async_trait::async_trait;
use axum::{
    body::{to_bytes, Body},
    http::{header, Method, Request, StatusCode},
    Router,
};
use serde_json::Value;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;
use tower::ServiceExt;
use trivia_api::db::queries::questions::create_question;
use trivia_api::db::{
    run_migrations, Category, NewQuestion, Question, SqliteStore, StoreError, StoreResult,
    TriviaStore,
};
use trivia_api::pagination::{Page, PageSize};
use trivia_api::server::{build_app, cors_layer, AppState};

pub const GEOGRAPHY: i64 = 3;
pub const SCIENCE: i64 = 1;

/// In-memory database with migrations applied. A single connection keeps the
/// database alive for the whole test.
pub async fn test_pool() -> SqlitePool {
    let options = SqliteConnectOptions::from_str("sqlite::memory:")
        .expect("valid url")
        .foreign_keys(true);
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect_with(options)
        .await
        .expect("failed to open in-memory database");
    run_migrations(&pool).await.expect("migrations failed");
    pool
}

pub fn app_with(store: Arc<dyn TriviaStore>) -> Router {
    let state = AppState::new(store, PageSize::default());
    build_app(state, cors_layer(&[]).expect("cors layer"))
}

pub async fn app() -> (Router, SqlitePool) {
    let pool = test_pool().await;
    (app_with(Arc::new(SqliteStore::new(pool.clone()))), pool)
}

pub async fn insert_question(pool: &SqlitePool, text: &str, category: i64) -> i64 {
    let question = NewQuestion {
        question: text.to_owned(),
        answer: format!("answer to {text}"),
        category,
        difficulty: 2,
    };
    create_question(pool, &question)
        .await
        .expect("insert question")
}

pub async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let mut req = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(json) => {
            req = req.header(header::CONTENT_TYPE, "application/json");
            Body::from(json.to_string())
        }
        None => Body::empty(),
    };
    let response = app
        .clone()
        .oneshot(req.body(body).expect("request build should succeed"))
        .await
        .expect("router should respond");
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body should be readable");
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).expect("body should be JSON")
    };
    (status, json)
}

pub fn ids(body: &Value) -> Vec<i64> {
    body["questions"]
        .as_array()
        .expect("questions array")
        .iter()
        .map(|q| q["id"].as_i64().expect("question id"))
        .collect()
}

fn broken() -> StoreError {
    StoreError::Database(sqlx::Error::PoolTimedOut)
}

/// Reads succeed with fixed data, every write and search fails.
pub struct BrokenStore;

#[async_trait]
impl TriviaStore for BrokenStore {
    async fn categories(&self) -> StoreResult<Vec<Category>> {
        Ok(vec![])
    }

    async fn category(&self, id: i64) -> StoreResult<Option<Category>> {
        Ok(Some(Category {
            id,
            kind: "Science".into(),
        }))
    }

    async fn count_questions(&self) -> StoreResult<i64> {
        Ok(0)
    }

    async fn questions_page(&self, _page: Page) -> StoreResult<Vec<Question>> {
        Ok(vec![])
    }

    async fn all_questions(&self) -> StoreResult<Vec<Question>> {
        Err(broken())
    }

    async fn question(&self, id: i64) -> StoreResult<Option<Question>> {
        Ok(Some(Question {
            id,
            question: "Still here?".into(),
            answer: "Yes".into(),
            category: SCIENCE,
            difficulty: 1,
        }))
    }

    async fn questions_in_category(&self, _category: i64) -> StoreResult<Vec<Question>> {
        Ok(vec![])
    }

    async fn create_question(&self, _question: &NewQuestion) -> StoreResult<i64> {
        Err(broken())
    }

    async fn delete_question(&self, _id: i64) -> StoreResult<bool> {
        Err(broken())
    }

    async fn search_questions(&self, _term: &str) -> StoreResult<Vec<Question>> {
        Err(broken())
    }

    async fn ping(&self) -> StoreResult<()> {
        Err(broken())
    }
}
