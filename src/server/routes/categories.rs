use std::sync::Arc;

use axum::{extract::State, routing::get, Json, Router};
use serde::Serialize;

use super::{category_map, CategoryMap};
use crate::db::{Question, TriviaStore};
use crate::server::app::AppState;
use crate::server::errors::{ApiError, ApiResponse};
use crate::server::extractors::ValidPath;

#[derive(Serialize)]
struct CategoriesBody {
    categories: CategoryMap,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct CategoryQuestionsBody {
    questions: Vec<Question>,
    total_questions: usize,
    current_category: String,
}

async fn get_categories(
    State(store): State<Arc<dyn TriviaStore>>,
) -> ApiResponse<Json<CategoriesBody>> {
    let categories = store.categories().await?;
    Ok(Json(CategoriesBody {
        categories: category_map(categories),
    }))
}

async fn get_category_questions(
    State(store): State<Arc<dyn TriviaStore>>,
    ValidPath(id): ValidPath<i64>,
) -> ApiResponse<Json<CategoryQuestionsBody>> {
    let category = store
        .category(id)
        .await?
        .ok_or_else(|| ApiError::not_found("category", id))?;
    let questions = store.questions_in_category(id).await?;
    Ok(Json(CategoryQuestionsBody {
        total_questions: questions.len(),
        questions,
        current_category: category.kind,
    }))
}

pub fn category_router() -> Router<AppState> {
    Router::new()
        .route("/categories", get(get_categories))
        .route("/categories/{id}/questions", get(get_category_questions))
}
