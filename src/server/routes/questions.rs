use std::collections::BTreeMap;

use axum::{
    extract::State,
    routing::{delete, get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_aux::field_attributes::deserialize_option_number_from_string;
use sqlx::SqlitePool;

use crate::{
    db::{
        queries::{
            categories::get_category_types,
            questions::{self, get_all_questions, get_question, search_questions},
        },
        NewQuestion, Question,
    },
    server::{
        app::AppState,
        error::{ApiError, OrApiError},
        extractors::{ApiJson, ApiPath, ApiQuery},
        pagination::{paginate, PageQuery},
    },
};

use super::ApiResponse;

#[derive(Deserialize)]
struct NewQuestionBody {
    #[serde(default)]
    question: Option<String>,
    #[serde(default)]
    answer: Option<String>,
    #[serde(default, deserialize_with = "deserialize_option_number_from_string")]
    category: Option<i64>,
    #[serde(default, deserialize_with = "deserialize_option_number_from_string")]
    difficulty: Option<i64>,
}

impl From<NewQuestionBody> for NewQuestion {
    fn from(body: NewQuestionBody) -> Self {
        NewQuestion {
            question: body.question,
            answer: body.answer,
            difficulty: body.difficulty,
            category: body.category,
        }
    }
}

#[derive(Deserialize)]
struct SearchBody {
    #[serde(default, rename = "searchTerm")]
    search_term: Option<String>,
}

#[derive(Serialize)]
struct QuestionsPage {
    success: bool,
    questions: Vec<Question>,
    total_questions: usize,
    current_category: Option<i64>,
    categories: BTreeMap<i64, String>,
}

#[derive(Serialize)]
struct SearchPage {
    success: bool,
    questions: Vec<Question>,
    total_questions: usize,
    current_category: Option<i64>,
}

#[derive(Serialize)]
struct Deleted {
    success: bool,
    deleted: i64,
    questions: Vec<Question>,
    total_questions: usize,
}

#[derive(Serialize)]
struct Created {
    success: bool,
    created: i64,
    questions: Vec<Question>,
    total_questions: usize,
}

async fn list_questions(
    State(pool): State<SqlitePool>,
    ApiQuery(PageQuery { page }): ApiQuery<PageQuery>,
) -> ApiResponse<QuestionsPage> {
    let questions = get_all_questions(&pool).await?;
    let current = paginate(&questions, page);
    let categories = get_category_types(&pool).await?;

    if current.is_empty() {
        return Err(ApiError::NotFound);
    }

    Ok(Json(QuestionsPage {
        success: true,
        questions: current.to_vec(),
        total_questions: questions.len(),
        current_category: None,
        categories,
    }))
}

async fn delete_question(
    State(pool): State<SqlitePool>,
    ApiPath(id): ApiPath<i64>,
    ApiQuery(PageQuery { page }): ApiQuery<PageQuery>,
) -> ApiResponse<Deleted> {
    get_question(&pool, id)
        .await
        .or_api_error(ApiError::Unprocessable)?
        .ok_or(ApiError::Unprocessable)?;

    questions::delete_question(&pool, id)
        .await
        .or_api_error(ApiError::Unprocessable)?;
    tracing::info!("Deleted question {id}");

    let remaining = get_all_questions(&pool)
        .await
        .or_api_error(ApiError::Unprocessable)?;
    Ok(Json(Deleted {
        success: true,
        deleted: id,
        questions: paginate(&remaining, page).to_vec(),
        total_questions: remaining.len(),
    }))
}

async fn create_question(
    State(pool): State<SqlitePool>,
    ApiQuery(PageQuery { page }): ApiQuery<PageQuery>,
    ApiJson(body): ApiJson<NewQuestionBody>,
) -> ApiResponse<Created> {
    let id = questions::create_question(&pool, &body.into())
        .await
        .or_api_error(ApiError::Unprocessable)?;
    tracing::info!("Created question {id}");

    let all = get_all_questions(&pool)
        .await
        .or_api_error(ApiError::Unprocessable)?;
    Ok(Json(Created {
        success: true,
        created: id,
        questions: paginate(&all, page).to_vec(),
        total_questions: all.len(),
    }))
}

async fn search(
    State(pool): State<SqlitePool>,
    ApiQuery(PageQuery { page }): ApiQuery<PageQuery>,
    ApiJson(body): ApiJson<SearchBody>,
) -> ApiResponse<SearchPage> {
    // clients have always received a server error when the term is left out
    let Some(term) = body.search_term else {
        tracing::error!("Search request without searchTerm");
        return Err(ApiError::Internal);
    };
    let found = search_questions(&pool, &term).await?;
    Ok(Json(SearchPage {
        success: true,
        questions: paginate(&found, page).to_vec(),
        total_questions: found.len(),
        current_category: None,
    }))
}

pub fn questions_router(state: AppState) -> Router {
    Router::new()
        .route("/questions", get(list_questions).post(create_question))
        .route("/questions/{id}", delete(delete_question))
        .route("/questions/search", post(search))
        .with_state(state)
}
