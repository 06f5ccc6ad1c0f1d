use std::collections::BTreeMap;

use axum::{
    extract::{Path, Query, State},
    routing::{delete, get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_aux::field_attributes::deserialize_option_number_from_string;
use sqlx::SqlitePool;

use crate::{
    db::{
        queries::{categories, questions},
        Question,
    },
    server::{app::AppState, error::ApiError},
};

use super::{ApiResponse, PageQuery};

#[derive(Deserialize)]
struct NewQuestion {
    question: Option<String>,
    answer: Option<String>,
    // Clients send these as either numbers or numeric strings.
    #[serde(default, deserialize_with = "deserialize_option_number_from_string")]
    category: Option<i64>,
    #[serde(default, deserialize_with = "deserialize_option_number_from_string")]
    difficulty: Option<i64>,
}

#[derive(Deserialize)]
struct SearchBody {
    #[serde(rename = "searchTerm", default)]
    search_term: String,
}

#[derive(Serialize)]
struct QuestionListResponse {
    success: bool,
    questions: Vec<Question>,
    total_questions: i64,
    categories: BTreeMap<i64, String>,
}

#[derive(Serialize)]
struct CreatedResponse {
    success: bool,
    created: i64,
    questions: Vec<Question>,
    total_questions: i64,
}

#[derive(Serialize)]
struct DeletedResponse {
    success: bool,
    deleted: i64,
}

#[derive(Serialize)]
struct SearchResponse {
    success: bool,
    questions: Vec<Question>,
    total_questions: usize,
}

/// Paginated listing over every category. The total is the grand total and
/// a page past the end of the listing is a 404.
async fn list_questions(
    State(pool): State<SqlitePool>,
    Query(query): Query<PageQuery>,
) -> ApiResponse<Json<QuestionListResponse>> {
    let page = query.page()?;
    let questions = questions::get_questions_page(&pool, page, None).await?;
    if questions.is_empty() {
        return Err(ApiError::NotFound);
    }
    let total_questions = questions::count_questions(&pool, None).await?;
    let categories = categories::get_all_categories(&pool)
        .await?
        .into_iter()
        .map(|c| (c.id, c.kind))
        .collect();
    Ok(Json(QuestionListResponse {
        success: true,
        questions,
        total_questions,
        categories,
    }))
}

fn required_text(field: Option<String>, name: &str) -> Result<String, ApiError> {
    field
        .filter(|value| !value.trim().is_empty())
        .ok_or_else(|| ApiError::BadRequest(format!("missing required field: {name}")))
}

async fn create_question(
    State(pool): State<SqlitePool>,
    Json(body): Json<NewQuestion>,
) -> ApiResponse<Json<CreatedResponse>> {
    let question = required_text(body.question, "question")?;
    let answer = required_text(body.answer, "answer")?;
    let category = body
        .category
        .ok_or_else(|| ApiError::BadRequest("missing required field: category".to_owned()))?;
    let difficulty = body
        .difficulty
        .ok_or_else(|| ApiError::BadRequest("missing required field: difficulty".to_owned()))?;

    if !categories::category_exists(&pool, category).await? {
        return Err(ApiError::Unprocessable(format!(
            "category {category} does not exist"
        )));
    }

    let created = questions::create_question(&pool, &question, &answer, category, difficulty).await?;
    tracing::info!("Created question {created} in category {category}");

    let questions = questions::get_questions_page(&pool, 1, None).await?;
    let total_questions = questions::count_questions(&pool, None).await?;
    Ok(Json(CreatedResponse {
        success: true,
        created,
        questions,
        total_questions,
    }))
}

async fn delete_question(
    State(pool): State<SqlitePool>,
    Path(id): Path<i64>,
) -> ApiResponse<Json<DeletedResponse>> {
    let removed = questions::delete_question(&pool, id).await?;
    if removed == 0 {
        return Err(ApiError::NotFound);
    }
    tracing::info!("Deleted question {id}");
    Ok(Json(DeletedResponse {
        success: true,
        deleted: id,
    }))
}

/// Case-insensitive substring search over question text. A blank term
/// matches every question.
async fn search_questions(
    State(pool): State<SqlitePool>,
    Json(body): Json<SearchBody>,
) -> ApiResponse<Json<SearchResponse>> {
    let questions = questions::search_questions(&pool, body.search_term.trim()).await?;
    Ok(Json(SearchResponse {
        success: true,
        total_questions: questions.len(),
        questions,
    }))
}

pub fn questions_router(state: AppState) -> Router {
    Router::new()
        .route("/questions", get(list_questions).post(create_question))
        .route("/questions/{id}", delete(delete_question))
        .route("/search-questions", post(search_questions))
        .with_state(state)
}
