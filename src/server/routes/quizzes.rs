use axum::{extract::State, routing::post, Json, Router};
use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;

use crate::{
    db::queries::questions::{get_all_questions, get_questions_for_category},
    server::{
        app::AppState,
        extractors::ApiJson,
        quiz::{select_unseen, NextQuestion, QuizCategory},
    },
};

use super::ApiResponse;

#[derive(Deserialize)]
struct QuizBody {
    #[serde(default)]
    previous_questions: Vec<i64>,
    quiz_category: QuizCategory,
}

#[derive(Serialize)]
struct QuizQuestion {
    success: bool,
    question: NextQuestion,
}

// no existence check on the category: an unknown one simply has no questions left
async fn next_question(
    State(pool): State<SqlitePool>,
    ApiJson(body): ApiJson<QuizBody>,
) -> ApiResponse<QuizQuestion> {
    let candidates = match body.quiz_category {
        QuizCategory::All => get_all_questions(&pool).await?,
        QuizCategory::Category(id) => get_questions_for_category(&pool, id).await?,
    };
    let question = select_unseen(&candidates, &body.previous_questions, &mut rand::thread_rng());
    tracing::debug!(
        asked = body.previous_questions.len(),
        candidates = candidates.len(),
        "Picked next quiz question"
    );

    Ok(Json(QuizQuestion {
        success: true,
        question,
    }))
}

pub fn quizzes_router(state: AppState) -> Router {
    Router::new()
        .route("/quizzes", post(next_question))
        .with_state(state)
}
