use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    routing::{delete, get, post},
    Json, Router,
};
use serde::Deserialize;
use sqlx::SqlitePool;

use crate::{
    db::{
        queries::{categories::get_all_categories, questions},
        NewQuestion,
    },
    pagination::{paginate, QUESTIONS_PER_PAGE},
    server::{
        app::AppState,
        deserializers::LenientI64,
        error::{ApiError, StoreResultExt},
    },
};

use super::{
    category_map, ApiJson, ApiPath, ApiQuery, ApiResponse, PageQuery, QuestionsPage,
};

#[derive(Deserialize)]
struct NewQuestionBody {
    question: Option<String>,
    answer: Option<String>,
    difficulty: Option<LenientI64>,
    category: Option<LenientI64>,
}

impl NewQuestionBody {
    fn into_new_question(self) -> Option<NewQuestion> {
        Some(NewQuestion {
            question: self.question?,
            answer: self.answer?,
            difficulty: self.difficulty?.0,
            category: self.category?.0,
        })
    }
}

#[derive(Deserialize)]
struct SearchBody {
    #[serde(rename = "searchTerm")]
    search_term: Option<String>,
}

async fn list_questions(
    State(pool): State<SqlitePool>,
    ApiQuery(PageQuery { page }): ApiQuery<PageQuery>,
) -> ApiResponse<Json<QuestionsPage>> {
    let all = questions::get_all_questions(&pool).await.or_internal()?;
    let current = paginate(&all, page, QUESTIONS_PER_PAGE);
    if current.is_empty() {
        return Err(ApiError::NotFound);
    }
    let categories = get_all_categories(&pool).await.or_internal()?;

    Ok(Json(QuestionsPage {
        success: true,
        questions: current.to_vec(),
        total_questions: all.len(),
        categories: Some(category_map(categories)),
        current_category: None,
    }))
}

async fn create_question(
    State(pool): State<SqlitePool>,
    body: Result<Json<NewQuestionBody>, JsonRejection>,
) -> ApiResponse<StatusCode> {
    // an absent or unreadable body is missing every required field
    let Json(body) = body.map_err(|rejection| {
        tracing::debug!("Rejected new question body: {rejection}");
        ApiError::Unprocessable
    })?;
    let new_question = body.into_new_question().ok_or(ApiError::Unprocessable)?;
    let id = questions::create_question(&pool, new_question)
        .await
        .or_internal()?;
    tracing::info!("Created question {id}");
    Ok(StatusCode::CREATED)
}

async fn delete_question(
    State(pool): State<SqlitePool>,
    ApiPath(id): ApiPath<i64>,
) -> ApiResponse<StatusCode> {
    if !questions::delete_question(&pool, id).await.or_internal()? {
        return Err(ApiError::NotFound);
    }
    tracing::info!("Deleted question {id}");
    Ok(StatusCode::NO_CONTENT)
}

async fn search_questions(
    State(pool): State<SqlitePool>,
    ApiQuery(PageQuery { page }): ApiQuery<PageQuery>,
    ApiJson(body): ApiJson<SearchBody>,
) -> ApiResponse<Json<QuestionsPage>> {
    let term = body.search_term.ok_or(ApiError::Unprocessable)?;
    let matches = questions::search_questions(&pool, &term)
        .await
        .or_bad_request()?;

    Ok(Json(QuestionsPage {
        success: true,
        questions: paginate(&matches, page, QUESTIONS_PER_PAGE).to_vec(),
        total_questions: matches.len(),
        categories: None,
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
