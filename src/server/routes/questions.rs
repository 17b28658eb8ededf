use std::collections::BTreeMap;

use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Path, Query, State,
    },
    routing::{delete, get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;

use crate::db::queries::{categories, questions};
use crate::db::Question;
use crate::server::{app::AppState, error::ApiError};

use super::category_label_map;

const QUESTIONS_PER_PAGE: usize = 10;

#[derive(Deserialize)]
struct PageParams {
    page: Option<String>,
}

#[derive(Deserialize)]
struct NewQuestion {
    question: Option<String>,
    answer: Option<String>,
    difficulty: Option<i64>,
    category: Option<i64>,
}

#[derive(Deserialize)]
struct SearchRequest {
    #[serde(rename = "searchTerm")]
    search_term: Option<String>,
}

#[derive(Serialize)]
struct QuestionPage {
    success: bool,
    questions: Vec<Question>,
    total_questions: usize,
    categories: BTreeMap<String, String>,
    current_category: String,
}

#[derive(Serialize)]
struct SearchResults {
    success: bool,
    questions: Vec<Question>,
    total_questions: usize,
    current_category: Option<String>,
}

#[derive(Serialize)]
struct Created {
    success: bool,
    created: i64,
}

#[derive(Serialize)]
struct Deleted {
    success: bool,
}

/// `GET /questions?page=N`: a fixed ten-question window over the full set.
async fn list_questions(
    State(pool): State<SqlitePool>,
    Query(params): Query<PageParams>,
) -> Result<Json<QuestionPage>, ApiError> {
    let page = params
        .page
        .as_deref()
        .and_then(|raw| raw.parse::<usize>().ok())
        .filter(|page| *page >= 1)
        .ok_or(ApiError::BadRequest)?;

    let all = questions::get_questions(&pool).await?;
    let labels = category_label_map(categories::get_categories(&pool).await?);

    let window: Vec<Question> = all
        .iter()
        .skip((page - 1).saturating_mul(QUESTIONS_PER_PAGE))
        .take(QUESTIONS_PER_PAGE)
        .cloned()
        .collect();
    if window.is_empty() {
        return Err(ApiError::NotFound);
    }

    // The page's "current category" is whatever the first question on it
    // belongs to; clients rely on this.
    let current_category = labels
        .get(&window[0].category.to_string())
        .cloned()
        .ok_or_else(|| {
            ApiError::Internal(format!(
                "question {} references a missing category",
                window[0].id
            ))
        })?;

    Ok(Json(QuestionPage {
        success: true,
        total_questions: all.len(),
        questions: window,
        categories: labels,
        current_category,
    }))
}

/// `POST /questions`. All four fields are required and the category must
/// exist; anything less is a content error.
async fn create_question(
    State(pool): State<SqlitePool>,
    body: Result<Json<NewQuestion>, JsonRejection>,
) -> Result<Json<Created>, ApiError> {
    let Json(body) = body.map_err(|_| ApiError::BadRequest)?;
    let (Some(question), Some(answer), Some(difficulty), Some(category)) =
        (body.question, body.answer, body.difficulty, body.category)
    else {
        return Err(ApiError::Unprocessable);
    };

    if categories::get_category(&pool, category).await?.is_none() {
        return Err(ApiError::Unprocessable);
    }

    let id = questions::create_question(&pool, &question, &answer, category, difficulty).await?;
    Ok(Json(Created {
        success: true,
        created: id,
    }))
}

/// `DELETE /questions/{id}`. Deleting something that is not there is a
/// content error, not a missing route.
async fn delete_question(
    State(pool): State<SqlitePool>,
    path: Result<Path<i64>, PathRejection>,
) -> Result<Json<Deleted>, ApiError> {
    let Path(id) = path.map_err(|_| ApiError::Unprocessable)?;
    if questions::get_question_by_id(&pool, id).await?.is_none() {
        return Err(ApiError::Unprocessable);
    }
    questions::delete_question(&pool, id).await?;
    Ok(Json(Deleted { success: true }))
}

/// `POST /questions/search`: case-insensitive substring match on the
/// question text. An absent or empty term is a malformed request.
async fn search_questions(
    State(pool): State<SqlitePool>,
    body: Result<Json<SearchRequest>, JsonRejection>,
) -> Result<Json<SearchResults>, ApiError> {
    let Json(body) = body.map_err(|_| ApiError::BadRequest)?;
    let term = body
        .search_term
        .filter(|term| !term.is_empty())
        .ok_or(ApiError::BadRequest)?;

    let matches = questions::search_questions(&pool, &term).await?;
    if matches.is_empty() {
        return Err(ApiError::NotFound);
    }
    Ok(Json(SearchResults {
        success: true,
        total_questions: matches.len(),
        questions: matches,
        current_category: None,
    }))
}

pub fn questions_router(state: AppState) -> Router {
    Router::new()
        .route("/questions", get(list_questions).post(create_question))
        .route("/questions/{id}", delete(delete_question))
        .route("/questions/search", post(search_questions))
        .with_state(state)
}
