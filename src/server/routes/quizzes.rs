use std::collections::HashSet;

use axum::{
    extract::{rejection::JsonRejection, State},
    routing::post,
    Json, Router,
};
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;

use crate::db::queries::questions;
use crate::db::Question;
use crate::server::{app::AppState, error::ApiError};
use crate::telemetry::QUIZ_QUESTION_CNTR;

#[derive(Deserialize)]
struct QuizCategory {
    #[serde(rename = "type")]
    label: String,
    id: Option<i64>,
}

#[derive(Deserialize)]
struct QuizRequest {
    category: Option<QuizCategory>,
    questions: Option<Vec<i64>>,
}

#[derive(Serialize)]
struct QuizResponse {
    success: bool,
    question: Option<Question>,
}

// The stock quiz UI sends type "click" when the player picks "All"; accept
// the spelled-out variant too.
fn spans_all_categories(label: &str) -> bool {
    matches!(label, "click" | "all")
}

/// `POST /quizzes`: one random question the player has not seen yet, or
/// `null` once the pool is exhausted. Exhaustion is a success, not a fault.
async fn next_question(
    State(pool): State<SqlitePool>,
    body: Result<Json<QuizRequest>, JsonRejection>,
) -> Result<Json<QuizResponse>, ApiError> {
    let Json(body) = body.map_err(|_| ApiError::BadRequest)?;
    let (Some(category), Some(asked)) = (body.category, body.questions) else {
        return Err(ApiError::Unprocessable);
    };

    let candidates = if spans_all_categories(&category.label) {
        questions::get_questions(&pool).await?
    } else {
        let id = category.id.ok_or(ApiError::Unprocessable)?;
        questions::get_questions_for_category(&pool, id).await?
    };

    let asked: HashSet<i64> = asked.into_iter().collect();
    let fresh: Vec<Question> = candidates
        .into_iter()
        .filter(|q| !asked.contains(&q.id))
        .collect();

    let question = fresh.choose(&mut rand::thread_rng()).cloned();
    if question.is_some() {
        let label: &str = if spans_all_categories(&category.label) {
            "all"
        } else {
            category.label.as_str()
        };
        QUIZ_QUESTION_CNTR.with_label_values(&[label]).inc();
    }

    Ok(Json(QuizResponse {
        success: true,
        question,
    }))
}

pub fn quiz_router(state: AppState) -> Router {
    Router::new()
        .route("/quizzes", post(next_question))
        .with_state(state)
}
