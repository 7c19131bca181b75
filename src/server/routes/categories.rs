use axum::{
    extract::State,
    routing::get,
    Json, Router,
};
use serde::Serialize;
use sqlx::SqlitePool;

use crate::{
    db::queries::{
        categories::{get_all_categories, get_category},
        questions::get_questions_for_category,
    },
    pagination::{paginate, QUESTIONS_PER_PAGE},
    server::{
        app::AppState,
        error::{ApiError, StoreResultExt},
    },
};

use super::{
    category_map, ApiPath, ApiQuery, ApiResponse, CategoryMap, PageQuery, QuestionsPage,
};

#[derive(Serialize)]
struct CategoriesBody {
    success: bool,
    categories: CategoryMap,
}

async fn get_categories(State(pool): State<SqlitePool>) -> ApiResponse<Json<CategoriesBody>> {
    let categories = get_all_categories(&pool).await.or_bad_request()?;
    if categories.is_empty() {
        return Err(ApiError::NotFound);
    }

    Ok(Json(CategoriesBody {
        success: true,
        categories: category_map(categories),
    }))
}

async fn questions_for_category(
    State(pool): State<SqlitePool>,
    ApiPath(id): ApiPath<i64>,
    ApiQuery(PageQuery { page }): ApiQuery<PageQuery>,
) -> ApiResponse<Json<QuestionsPage>> {
    let category = get_category(&pool, id)
        .await
        .or_bad_request()?
        .ok_or(ApiError::NotFound)?;
    let questions = get_questions_for_category(&pool, id)
        .await
        .or_bad_request()?;

    Ok(Json(QuestionsPage {
        success: true,
        questions: paginate(&questions, page, QUESTIONS_PER_PAGE).to_vec(),
        total_questions: questions.len(),
        categories: None,
        current_category: Some(category.kind),
    }))
}

pub fn category_router(state: AppState) -> Router {
    Router::new()
        .route("/categories", get(get_categories))
        .route("/categories/{id}/questions", get(questions_for_category))
        .with_state(state)
}
