use axum::{extract::State, routing::post, Json, Router};
use rand::seq::IteratorRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};
use serde_aux::field_attributes::deserialize_number_from_string;
use sqlx::SqlitePool;

use crate::{
    db::{queries::questions, Question},
    server::app::AppState,
    telemetry::QUIZ_QUESTION_CNTR,
};

use super::ApiResponse;

/// Conventional category id meaning "all categories".
const ALL_CATEGORIES: i64 = 0;

#[derive(Deserialize)]
struct QuizBody {
    #[serde(default)]
    previous_questions: Vec<i64>,
    quiz_category: Option<QuizCategory>,
}

#[derive(Deserialize)]
struct QuizCategory {
    #[serde(deserialize_with = "deserialize_number_from_string")]
    id: i64,
}

#[derive(Serialize)]
struct QuizResponse {
    success: bool,
    /// `null` once the category is exhausted.
    question: Option<Question>,
}

/// Uniform pick among the candidates the caller has not seen yet. `None`
/// means the pool is exhausted, which is a valid terminal result.
fn choose_next(
    candidates: Vec<Question>,
    previous: &[i64],
    rng: &mut impl Rng,
) -> Option<Question> {
    candidates
        .into_iter()
        .filter(|q| !previous.contains(&q.id))
        .choose(rng)
}

async fn next_question(
    State(pool): State<SqlitePool>,
    Json(body): Json<QuizBody>,
) -> ApiResponse<Json<QuizResponse>> {
    let category = body
        .quiz_category
        .map(|c| c.id)
        .filter(|id| *id != ALL_CATEGORIES);
    let candidates = questions::get_questions_for_category(&pool, category).await?;
    let question = choose_next(candidates, &body.previous_questions, &mut rand::rng());
    if let Some(q) = &question {
        QUIZ_QUESTION_CNTR
            .with_label_values(&[q.category.to_string().as_str()])
            .inc();
    }
    Ok(Json(QuizResponse {
        success: true,
        question,
    }))
}

pub fn quizzes_router(state: AppState) -> Router {
    Router::new()
        .route("/quizzes", post(next_question))
        .with_state(state)
}
