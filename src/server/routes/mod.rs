mod categories;
mod questions;
mod quizzes;

pub use categories::category_router;
pub use questions::questions_router;
pub use quizzes::quizzes_router;

use std::collections::BTreeMap;

use axum::extract::{FromRequest, FromRequestParts};
use serde::{Deserialize, Serialize};

use crate::db::{Category, Question};
use crate::server::deserializers::{deserialize_page, first_page};
use crate::server::error::ApiError;

pub type ApiResponse<T> = Result<T, ApiError>;

/// `axum::Json` whose rejections render as [`ApiError`].
#[derive(FromRequest)]
#[from_request(via(axum::Json), rejection(ApiError))]
pub struct ApiJson<T>(pub T);

/// `axum::extract::Path` whose rejections render as [`ApiError`].
#[derive(FromRequestParts)]
#[from_request(via(axum::extract::Path), rejection(ApiError))]
pub struct ApiPath<T>(pub T);

/// `axum::extract::Query` whose rejections render as [`ApiError`].
#[derive(FromRequestParts)]
#[from_request(via(axum::extract::Query), rejection(ApiError))]
pub struct ApiQuery<T>(pub T);

#[derive(Deserialize)]
pub struct PageQuery {
    #[serde(default = "first_page", deserialize_with = "deserialize_page")]
    pub page: u32,
}

/// `{"1": "Science", "2": "Art"}`, keyed and ordered by category id.
pub type CategoryMap = BTreeMap<i64, String>;

pub fn category_map(categories: Vec<Category>) -> CategoryMap {
    categories.into_iter().map(|c| (c.id, c.kind)).collect()
}

#[derive(Serialize)]
pub struct QuestionsPage {
    pub success: bool,
    pub questions: Vec<Question>,
    pub total_questions: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub categories: Option<CategoryMap>,
    pub current_category: Option<String>,
}

#[cfg(test)]
pub(crate) mod test_support {
    use axum::{
        body::Body,
        http::{Request, StatusCode},
        Router,
    };
    use serde_json::Value;
    use sqlx::SqlitePool;
    use tower::ServiceExt;

    use crate::db::queries::{categories::import_categories, questions::create_question};
    use crate::db::{Category, NewQuestion};
    use crate::server::app::build_router;

    pub async fn send(
        app: &Router,
        method: &str,
        uri: &str,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let builder = Request::builder().method(method).uri(uri);
        let request = match body {
            Some(body) => builder
                .header("content-type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let json = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, json)
    }

    pub fn app(pool: &SqlitePool) -> Router {
        build_router(pool.clone())
    }

    pub async fn seed_categories(pool: &SqlitePool) {
        import_categories(
            pool,
            vec![
                Category {
                    id: 1,
                    kind: "Science".to_owned(),
                },
                Category {
                    id: 2,
                    kind: "Art".to_owned(),
                },
            ],
        )
        .await
        .unwrap();
    }

    pub async fn add_question(pool: &SqlitePool, text: &str, category: i64) -> i64 {
        create_question(
            pool,
            NewQuestion {
                question: text.to_owned(),
                answer: format!("answer to {text}"),
                category,
                difficulty: 2,
            },
        )
        .await
        .unwrap()
    }
}
