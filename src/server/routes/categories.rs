use std::collections::BTreeMap;

use axum::{
    extract::{Path, Query, State},
    routing::get,
    Json, Router,
};
use serde::Serialize;
use sqlx::SqlitePool;

use crate::{
    db::{
        queries::{
            categories::{get_all_categories, get_category},
            questions,
        },
        Question,
    },
    server::{app::AppState, error::ApiError},
};

use super::{ApiResponse, PageQuery};

#[derive(Serialize)]
struct CategoriesResponse {
    success: bool,
    categories: BTreeMap<i64, String>,
    total_categories: usize,
}

#[derive(Serialize)]
struct CategoryQuestionsResponse {
    success: bool,
    questions: Vec<Question>,
    total_questions: i64,
    current_category: String,
}

async fn list_categories(State(pool): State<SqlitePool>) -> ApiResponse<Json<CategoriesResponse>> {
    let categories = get_all_categories(&pool).await?;
    let total_categories = categories.len();
    let categories = categories.into_iter().map(|c| (c.id, c.kind)).collect();
    Ok(Json(CategoriesResponse {
        success: true,
        categories,
        total_categories,
    }))
}

/// Paginated questions for one category. The total reported here is the
/// filtered count; an empty category is not an error on the first page.
async fn questions_by_category(
    State(pool): State<SqlitePool>,
    Path(id): Path<i64>,
    Query(query): Query<PageQuery>,
) -> ApiResponse<Json<CategoryQuestionsResponse>> {
    let page = query.page()?;
    let category = get_category(&pool, id).await?;
    let questions = questions::get_questions_page(&pool, page, Some(id)).await?;
    if questions.is_empty() && page > 1 {
        return Err(ApiError::NotFound);
    }
    let total_questions = questions::count_questions(&pool, Some(id)).await?;
    Ok(Json(CategoryQuestionsResponse {
        success: true,
        questions,
        total_questions,
        current_category: category.kind,
    }))
}

pub fn category_router(state: AppState) -> Router {
    Router::new()
        .route("/categories", get(list_categories))
        .route("/categories/{id}/questions", get(questions_by_category))
        .with_state(state)
}
