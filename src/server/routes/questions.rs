use std::sync::Arc;

use axum::{
    extract::State,
    routing::{delete, get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_aux::field_attributes::deserialize_option_number_from_string;

use super::{category_map, CategoryMap};
use crate::db::{NewQuestion, Question, TriviaStore};
use crate::pagination::{Page, PageSize};
use crate::server::app::AppState;
use crate::server::errors::{ApiError, ApiResponse};
use crate::server::extractors::{ValidJson, ValidPath, ValidQuery};
use crate::telemetry::QUESTION_MUTATIONS;
use crate::validation::{in_range, required_text, ValidationError};

pub const MIN_DIFFICULTY: i64 = 1;
pub const MAX_DIFFICULTY: i64 = 5;

#[derive(Deserialize)]
struct PageQuery {
    page: Option<i64>,
}

// The browser form posts category and difficulty as strings
#[derive(Deserialize)]
struct QuestionBody {
    #[serde(default)]
    question: Option<String>,
    #[serde(default)]
    answer: Option<String>,
    #[serde(default, deserialize_with = "deserialize_option_number_from_string")]
    category: Option<i64>,
    #[serde(default, deserialize_with = "deserialize_option_number_from_string")]
    difficulty: Option<i64>,
}

impl QuestionBody {
    /// Field checks that need no store access.
    fn validate(self) -> Result<NewQuestion, ValidationError> {
        Ok(NewQuestion {
            question: required_text("question", self.question)?,
            answer: required_text("answer", self.answer)?,
            category: self
                .category
                .ok_or(ValidationError::Missing { field: "category" })?,
            difficulty: in_range("difficulty", self.difficulty, MIN_DIFFICULTY, MAX_DIFFICULTY)?,
        })
    }
}

#[derive(Deserialize)]
struct SearchBody {
    #[serde(rename = "searchTerm", default)]
    search_term: Option<String>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct QuestionsPage {
    questions: Vec<Question>,
    total_questions: i64,
    categories: CategoryMap,
    current_category: Option<String>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SearchResults {
    questions: Vec<Question>,
    total_questions: usize,
}

#[derive(Serialize)]
struct Created {
    success: bool,
    created: i64,
}

#[derive(Serialize)]
struct Deleted {
    success: bool,
    deleted: i64,
}

async fn list_questions(
    State(store): State<Arc<dyn TriviaStore>>,
    State(page_size): State<PageSize>,
    ValidQuery(query): ValidQuery<PageQuery>,
) -> ApiResponse<Json<QuestionsPage>> {
    let page = match query.page {
        Some(number) => Page::new(number, page_size)?,
        None => Page::first(page_size),
    };
    let total_questions = store.count_questions().await?;
    let questions = store.questions_page(page).await?;
    // An empty table still has a first page
    if questions.is_empty() && page.number() > 1 {
        return Err(ApiError::not_found("page", page.number()));
    }
    let categories = store.categories().await?;
    Ok(Json(QuestionsPage {
        questions,
        total_questions,
        categories: category_map(categories),
        current_category: None,
    }))
}

async fn create_question(
    State(store): State<Arc<dyn TriviaStore>>,
    ValidJson(body): ValidJson<QuestionBody>,
) -> ApiResponse<Json<Created>> {
    let question = body.validate()?;
    if store
        .category(question.category)
        .await
        .map_err(ApiError::Unprocessable)?
        .is_none()
    {
        return Err(ValidationError::UnknownCategory(question.category).into());
    }
    let id = store
        .create_question(&question)
        .await
        .map_err(ApiError::Unprocessable)?;

    QUESTION_MUTATIONS.with_label_values(&["create"]).inc();
    tracing::info!(id, category = question.category, "Question created");
    Ok(Json(Created {
        success: true,
        created: id,
    }))
}

async fn delete_question(
    State(store): State<Arc<dyn TriviaStore>>,
    ValidPath(id): ValidPath<i64>,
) -> ApiResponse<Json<Deleted>> {
    if store.question(id).await?.is_none() {
        return Err(ApiError::not_found("question", id));
    }
    let removed = store
        .delete_question(id)
        .await
        .map_err(ApiError::Unprocessable)?;
    // Lost a race with another delete
    if !removed {
        return Err(ApiError::not_found("question", id));
    }

    QUESTION_MUTATIONS.with_label_values(&["delete"]).inc();
    tracing::info!(id, "Question deleted");
    Ok(Json(Deleted {
        success: true,
        deleted: id,
    }))
}

async fn search_questions(
    State(store): State<Arc<dyn TriviaStore>>,
    ValidJson(body): ValidJson<SearchBody>,
) -> ApiResponse<Json<SearchResults>> {
    // The term is matched as sent, surrounding whitespace included
    let term = body.search_term.unwrap_or_default();
    let questions = if term.is_empty() {
        vec![]
    } else {
        store
            .search_questions(&term)
            .await
            .map_err(ApiError::Unprocessable)?
    };
    tracing::debug!(%term, matches = questions.len(), "Search");
    Ok(Json(SearchResults {
        total_questions: questions.len(),
        questions,
    }))
}

pub fn questions_router() -> Router<AppState> {
    Router::new()
        .route("/questions", get(list_questions).post(create_question))
        .route("/questions/search", post(search_questions))
        .route("/questions/{id}", delete(delete_question))
}
