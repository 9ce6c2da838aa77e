use std::collections::BTreeMap;

use axum::{extract::State, routing::get, Json, Router};
use serde::Serialize;
use sqlx::SqlitePool;

use crate::{
    db::{
        queries::{
            categories::{get_category, get_category_types},
            questions::get_questions_for_category,
        },
        Question,
    },
    server::{
        app::AppState,
        error::{ApiError, OrApiError},
        extractors::{ApiPath, ApiQuery},
        pagination::{paginate, PageQuery},
    },
};

use super::ApiResponse;

#[derive(Serialize)]
struct CategoriesPage {
    success: bool,
    categories: BTreeMap<i64, String>,
    total_categories: usize,
}

#[derive(Serialize)]
struct CategoryQuestionsPage {
    success: bool,
    questions: Vec<Question>,
    total_questions: usize,
    current_category: i64,
}

async fn get_categories(State(pool): State<SqlitePool>) -> ApiResponse<CategoriesPage> {
    // listing failures have always been reported as 405, clients rely on it
    let categories = get_category_types(&pool)
        .await
        .or_api_error(ApiError::MethodNotAllowed)?;
    Ok(Json(CategoriesPage {
        success: true,
        total_categories: categories.len(),
        categories,
    }))
}

async fn category_questions(
    State(pool): State<SqlitePool>,
    ApiPath(id): ApiPath<i64>,
    ApiQuery(PageQuery { page }): ApiQuery<PageQuery>,
) -> ApiResponse<CategoryQuestionsPage> {
    get_category(&pool, id).await?.ok_or(ApiError::NotFound)?;

    let questions = get_questions_for_category(&pool, id)
        .await
        .or_api_error(ApiError::Unprocessable)?;
    let current = paginate(&questions, page).to_vec();

    // counts the returned page, not every question in the category
    Ok(Json(CategoryQuestionsPage {
        success: true,
        total_questions: current.len(),
        questions: current,
        current_category: id,
    }))
}

pub fn category_router(state: AppState) -> Router {
    Router::new()
        .route("/categories", get(get_categories))
        .route("/categories/{id}/questions", get(category_questions))
        .with_state(state)
}
