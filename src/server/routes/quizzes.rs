use std::collections::HashSet;
use std::sync::Arc;

use axum::{extract::State, routing::post, Json, Router};
use serde::{Deserialize, Serialize};
use serde_aux::field_attributes::deserialize_number_from_string;

use crate::db::{Question, TriviaStore};
use crate::quiz::{draw_question, QuizDraw, QuizScope};
use crate::server::app::AppState;
use crate::server::errors::{ApiError, ApiResponse};
use crate::server::extractors::ValidJson;
use crate::telemetry::QUIZ_DRAWS;

#[derive(Deserialize)]
struct QuizRequest {
    #[serde(default)]
    quiz_category: Option<QuizCategory>,
    #[serde(default)]
    previous_questions: Option<Vec<i64>>,
}

// Clients also send the category `type`, which is ignored
#[derive(Deserialize)]
struct QuizCategory {
    #[serde(deserialize_with = "deserialize_number_from_string")]
    id: i64,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct QuizResponse {
    success: bool,
    question: Option<Question>,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    force_end: bool,
}

impl From<QuizDraw> for QuizResponse {
    fn from(draw: QuizDraw) -> Self {
        match draw {
            QuizDraw::Next(question) => Self {
                success: true,
                question: Some(question),
                force_end: false,
            },
            QuizDraw::Exhausted => Self {
                success: true,
                question: None,
                force_end: true,
            },
        }
    }
}

async fn next_question(
    State(store): State<Arc<dyn TriviaStore>>,
    ValidJson(request): ValidJson<QuizRequest>,
) -> ApiResponse<Json<QuizResponse>> {
    let scope = QuizScope::from_category_id(request.quiz_category.map(|c| c.id));
    let candidates = match scope {
        QuizScope::All => store.all_questions().await?,
        QuizScope::Category(id) => {
            if store.category(id).await?.is_none() {
                return Err(ApiError::not_found("category", id));
            }
            store.questions_in_category(id).await?
        }
    };
    let asked: HashSet<i64> = request
        .previous_questions
        .unwrap_or_default()
        .into_iter()
        .collect();

    let draw = draw_question(candidates, &asked, &mut rand::thread_rng());
    let outcome = match &draw {
        QuizDraw::Next(_) => "question",
        QuizDraw::Exhausted => "exhausted",
    };
    QUIZ_DRAWS
        .with_label_values(&[scope.label().as_str(), outcome])
        .inc();
    tracing::debug!(scope = ?scope, asked = asked.len(), outcome, "Quiz draw");
    Ok(Json(draw.into()))
}

pub fn quizzes_router() -> Router<AppState> {
    Router::new().route("/quizzes", post(next_question))
}
