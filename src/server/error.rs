use axum::{
    extract::rejection::{JsonRejection, PathRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// Every failure a handler can report. The display text is the `message`
/// field of the error body.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiError {
    #[error("bad request")]
    BadRequest,
    #[error("resource not found")]
    NotFound,
    #[error("unprocessable")]
    Unprocessable,
    #[error("Internal server error")]
    Internal,
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::BadRequest => StatusCode::BAD_REQUEST,
            ApiError::NotFound => StatusCode::NOT_FOUND,
            ApiError::Unprocessable => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = Json(json!({
            "success": false,
            "error": status.as_u16(),
            "message": self.to_string(),
        }));
        (status, body).into_response()
    }
}

// Valid JSON of the wrong shape is unprocessable, anything else never made it to a body
impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        tracing::debug!("Rejected JSON body: {rejection}");
        match rejection {
            JsonRejection::JsonDataError(_) => ApiError::Unprocessable,
            _ => ApiError::BadRequest,
        }
    }
}

// Mirrors integer-only path segments: `/questions/abc` is not a resource
impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        tracing::debug!("Rejected path: {rejection}");
        ApiError::NotFound
    }
}

// Page numbers never fail to parse, so only a malformed query string lands here
impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        tracing::debug!("Rejected query string: {rejection}");
        ApiError::BadRequest
    }
}

/// Translates store failures into the error kind a given endpoint reports.
pub trait StoreResultExt<T> {
    fn or_bad_request(self) -> Result<T, ApiError>;
    fn or_internal(self) -> Result<T, ApiError>;
}

impl<T> StoreResultExt<T> for sqlx::Result<T> {
    fn or_bad_request(self) -> Result<T, ApiError> {
        self.map_err(|e| {
            tracing::error!("Database error: {e}");
            ApiError::BadRequest
        })
    }

    fn or_internal(self) -> Result<T, ApiError> {
        self.map_err(|e| {
            tracing::error!("Database error: {e}");
            ApiError::Internal
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn body_of(error: ApiError) -> (StatusCode, serde_json::Value) {
        let response = error.into_response();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn renders_error_body() {
        let cases = [
            (ApiError::BadRequest, 400, "bad request"),
            (ApiError::NotFound, 404, "resource not found"),
            (ApiError::Unprocessable, 422, "unprocessable"),
            (ApiError::Internal, 500, "Internal server error"),
        ];
        for (error, code, message) in cases {
            let (status, body) = body_of(error).await;
            assert_eq!(status.as_u16(), code);
            assert_eq!(
                body,
                json!({"success": false, "error": code, "message": message})
            );
        }
    }

    #[test]
    fn store_errors_translate_per_endpoint() {
        let failed: sqlx::Result<()> = Err(sqlx::Error::PoolClosed);
        assert_eq!(failed.or_bad_request(), Err(ApiError::BadRequest));

        let failed: sqlx::Result<()> = Err(sqlx::Error::PoolTimedOut);
        assert_eq!(failed.or_internal(), Err(ApiError::Internal));
    }
}
