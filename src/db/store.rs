//! Storage seam between the HTTP handlers and the database.

use async_trait::async_trait;
use sqlx::SqlitePool;

use super::queries::{categories, questions};
use super::{Category, NewQuestion, Question};
use crate::pagination::Page;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Everything the handlers need from persistence.
#[async_trait]
pub trait TriviaStore: Send + Sync {
    /// All categories, ascending id.
    async fn categories(&self) -> StoreResult<Vec<Category>>;

    async fn category(&self, id: i64) -> StoreResult<Option<Category>>;

    async fn count_questions(&self) -> StoreResult<i64>;

    /// One page of the id-ordered question list.
    async fn questions_page(&self, page: Page) -> StoreResult<Vec<Question>>;

    async fn all_questions(&self) -> StoreResult<Vec<Question>>;

    async fn question(&self, id: i64) -> StoreResult<Option<Question>>;

    async fn questions_in_category(&self, category: i64) -> StoreResult<Vec<Question>>;

    /// Returns the id of the stored question.
    async fn create_question(&self, question: &NewQuestion) -> StoreResult<i64>;

    /// `false` when no question had this id.
    async fn delete_question(&self, id: i64) -> StoreResult<bool>;

    async fn search_questions(&self, term: &str) -> StoreResult<Vec<Question>>;

    async fn ping(&self) -> StoreResult<()>;
}

#[derive(Clone)]
pub struct SqliteStore {
    pool: SqlitePool,
}

impl SqliteStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

#[async_trait]
impl TriviaStore for SqliteStore {
    async fn categories(&self) -> StoreResult<Vec<Category>> {
        Ok(categories::get_all_categories(&self.pool).await?)
    }

    async fn category(&self, id: i64) -> StoreResult<Option<Category>> {
        Ok(categories::get_category(&self.pool, id).await?)
    }

    async fn count_questions(&self) -> StoreResult<i64> {
        Ok(questions::count_questions(&self.pool).await?)
    }

    async fn questions_page(&self, page: Page) -> StoreResult<Vec<Question>> {
        Ok(questions::get_questions_page(&self.pool, page).await?)
    }

    async fn all_questions(&self) -> StoreResult<Vec<Question>> {
        Ok(questions::get_all_questions(&self.pool).await?)
    }

    async fn question(&self, id: i64) -> StoreResult<Option<Question>> {
        Ok(questions::get_question(&self.pool, id).await?)
    }

    async fn questions_in_category(&self, category: i64) -> StoreResult<Vec<Question>> {
        Ok(questions::get_questions_for_category(&self.pool, category).await?)
    }

    async fn create_question(&self, question: &NewQuestion) -> StoreResult<i64> {
        Ok(questions::create_question(&self.pool, question).await?)
    }

    async fn delete_question(&self, id: i64) -> StoreResult<bool> {
        Ok(questions::delete_question(&self.pool, id).await? > 0)
    }

    async fn search_questions(&self, term: &str) -> StoreResult<Vec<Question>> {
        Ok(questions::search_questions(&self.pool, term).await?)
    }

    async fn ping(&self) -> StoreResult<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}
