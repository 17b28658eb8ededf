use std::collections::BTreeMap;

use axum::{
    extract::{rejection::PathRejection, Path, State},
    routing::get,
    Json, Router,
};
use serde::Serialize;
use sqlx::SqlitePool;

use crate::db::queries::{categories, questions};
use crate::db::Question;
use crate::server::{app::AppState, error::ApiError};

use super::category_label_map;

#[derive(Serialize)]
struct CategoriesResponse {
    success: bool,
    categories: BTreeMap<String, String>,
}

#[derive(Serialize)]
struct CategoryQuestions {
    success: bool,
    questions: Vec<Question>,
    total_questions: usize,
    current_category: String,
}

async fn list_categories(
    State(pool): State<SqlitePool>,
) -> Result<Json<CategoriesResponse>, ApiError> {
    let all = categories::get_categories(&pool).await?;
    if all.is_empty() {
        return Err(ApiError::NotFound);
    }
    Ok(Json(CategoriesResponse {
        success: true,
        categories: category_label_map(all),
    }))
}

/// `GET /categories/{id}/questions`. A path segment that does not name a
/// category behaves like any other unknown route.
async fn questions_for_category(
    State(pool): State<SqlitePool>,
    path: Result<Path<i64>, PathRejection>,
) -> Result<Json<CategoryQuestions>, ApiError> {
    let Path(category_id) = path.map_err(|_| ApiError::NotFound)?;
    let Some(category) = categories::get_category(&pool, category_id).await? else {
        return Err(ApiError::NotFound);
    };
    let matches = questions::get_questions_for_category(&pool, category_id).await?;
    if matches.is_empty() {
        return Err(ApiError::NotFound);
    }
    Ok(Json(CategoryQuestions {
        success: true,
        total_questions: matches.len(),
        questions: matches,
        current_category: category.label,
    }))
}

pub fn category_router(state: AppState) -> Router {
    Router::new()
        .route("/categories", get(list_categories))
        .route("/categories/{id}/questions", get(questions_for_category))
        .with_state(state)
}
