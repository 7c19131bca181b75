use std::collections::HashSet;

use axum::{
    extract::{rejection::JsonRejection, State},
    routing::post,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;

use crate::{
    db::{queries::questions, Question},
    quiz::{pick_question, QuizScope},
    server::{
        app::AppState,
        deserializers::LenientI64,
        error::{ApiError, StoreResultExt},
    },
    telemetry::{QUIZZES_EXHAUSTED, QUIZ_QUESTIONS_SERVED},
};

use super::ApiResponse;

#[derive(Deserialize)]
struct QuizCategory {
    id: Option<LenientI64>,
}

#[derive(Deserialize)]
struct QuizRequest {
    previous_questions: Option<Vec<i64>>,
    quiz_category: Option<QuizCategory>,
}

#[derive(Serialize)]
struct QuizResponse {
    success: bool,
    // absent once every question in scope has been seen
    #[serde(skip_serializing_if = "Option::is_none")]
    question: Option<Question>,
}

async fn next_question(
    State(pool): State<SqlitePool>,
    body: Result<Json<QuizRequest>, JsonRejection>,
) -> ApiResponse<Json<QuizResponse>> {
    // every unusable quiz body is a bad request, wrongly typed fields included
    let Json(body) = body.map_err(|rejection| {
        tracing::debug!("Rejected quiz body: {rejection}");
        ApiError::BadRequest
    })?;
    let (Some(previous), Some(QuizCategory { id: Some(category) })) =
        (body.previous_questions, body.quiz_category)
    else {
        return Err(ApiError::BadRequest);
    };

    let scope = QuizScope::from_category_id(category.0);
    let candidates = match scope {
        QuizScope::All => questions::get_all_questions(&pool).await,
        QuizScope::Category(id) => questions::get_questions_for_category(&pool, id).await,
    }
    .or_bad_request()?;

    let previous: HashSet<i64> = previous.into_iter().collect();
    let question = pick_question(candidates, scope, &previous, &mut rand::thread_rng());
    match &question {
        Some(q) => {
            QUIZ_QUESTIONS_SERVED.with_label_values(&[scope.label()]).inc();
            tracing::debug!("Quiz {scope:?} served question {}", q.id);
        }
        None => {
            QUIZZES_EXHAUSTED.inc();
            tracing::debug!("Quiz {scope:?} exhausted after {} questions", previous.len());
        }
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

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use axum::http::StatusCode;
    use serde_json::{json, Value};

    use crate::db::test_pool;
    use crate::server::routes::test_support::{add_question, app, seed_categories, send};

    async fn quiz(app: &axum::Router, body: Value) -> (StatusCode, Value) {
        send(app, "POST", "/quizzes", Some(body)).await
    }

    #[tokio::test]
    async fn all_categories_draws_from_every_question() {
        let pool = test_pool().await;
        seed_categories(&pool).await;
        let mut all = HashSet::new();
        for n in 0..5 {
            all.insert(add_question(&pool, &format!("q{n}"), 1 + n % 2).await);
        }
        let app = app(&pool);

        let mut seen = HashSet::new();
        for _ in 0..200 {
            let (status, body) = quiz(
                &app,
                json!({"previous_questions": [], "quiz_category": {"type": "click", "id": 0}}),
            )
            .await;
            assert_eq!(status, StatusCode::OK);
            assert_eq!(body["success"], true);
            let id = body["question"]["id"].as_i64().unwrap();
            assert!(all.contains(&id));
            seen.insert(id);
        }
        assert_eq!(seen, all);
    }

    #[tokio::test]
    async fn skips_previous_questions_within_category() {
        let pool = test_pool().await;
        seed_categories(&pool).await;
        let a = add_question(&pool, "science a", 1).await;
        let b = add_question(&pool, "science b", 1).await;
        add_question(&pool, "art", 2).await;
        let app = app(&pool);

        for _ in 0..20 {
            let (status, body) = quiz(
                &app,
                json!({"previous_questions": [a], "quiz_category": {"type": "Science", "id": "1"}}),
            )
            .await;
            assert_eq!(status, StatusCode::OK);
            assert_eq!(body["question"]["id"], b);
        }
    }

    #[tokio::test]
    async fn exhausted_quiz_has_no_question() {
        let pool = test_pool().await;
        seed_categories(&pool).await;
        let a = add_question(&pool, "science a", 1).await;
        let b = add_question(&pool, "science b", 1).await;
        let app = app(&pool);

        let (status, body) = quiz(
            &app,
            json!({"previous_questions": [a, b], "quiz_category": {"id": 1}}),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({"success": true}));

        let (status, body) = quiz(
            &app,
            json!({"previous_questions": [], "quiz_category": {"id": 2}}),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({"success": true}));
    }

    #[tokio::test]
    async fn missing_body_is_bad_request() {
        let pool = test_pool().await;

        let (status, body) = send(&app(&pool), "POST", "/quizzes", None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["message"], "bad request");
    }

    #[tokio::test]
    async fn missing_fields_are_bad_requests() {
        let pool = test_pool().await;
        let app = app(&pool);

        for body in [
            json!({"quiz_category": {"id": 0}}),
            json!({"previous_questions": []}),
            json!({"previous_questions": [], "quiz_category": {}}),
            json!({"previous_questions": null, "quiz_category": {"id": 0}}),
            json!({"previous_questions": "x", "quiz_category": {"id": 0}}),
            json!({"previous_questions": [], "quiz_category": {"id": "all"}}),
            json!({"previous_questions": [], "quiz_category": 0}),
        ] {
            let (status, response) = quiz(&app, body).await;
            assert_eq!(status, StatusCode::BAD_REQUEST);
            assert_eq!(
                response,
                json!({"success": false, "error": 400, "message": "bad request"})
            );
        }
    }
}
