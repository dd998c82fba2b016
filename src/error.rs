use actix_web::{HttpRequest, HttpResponse, ResponseError, http::StatusCode, web};
use derive_more::Display;
use serde::Serialize;
use tracing::error;
use utoipa::ToSchema;

pub type ApiResult<T> = Result<T, ApiError>;

/// Every failure a handler can surface. The body is always `{"detail": "..."}`.
#[derive(Debug, Display)]
pub enum ApiError {
    /// Malformed field content: bad email syntax, bad date filter.
    #[display(fmt = "{}", _0)]
    Validation(String),

    /// Uniqueness violation.
    #[display(fmt = "{}", _0)]
    Conflict(String),

    #[display(fmt = "{}", _0)]
    NotFound(String),

    /// Request shape rejected before reaching the handler.
    #[display(fmt = "{}", _0)]
    Unprocessable(String),

    #[display(fmt = "Internal server error")]
    Internal(sqlx::Error),
}

/// Error payload shared by every endpoint
#[derive(Serialize, ToSchema)]
pub struct ErrorBody {
    #[schema(example = "Employee not found")]
    pub detail: String,
}

impl ApiError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn conflict(msg: impl Into<String>) -> Self {
        Self::Conflict(msg.into())
    }

    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    pub fn employee_not_found() -> Self {
        Self::not_found("Employee not found")
    }
}

impl std::error::Error for ApiError {}

impl From<sqlx::Error> for ApiError {
    fn from(e: sqlx::Error) -> Self {
        error!(error = %e, "Database error");
        Self::Internal(e)
    }
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) | ApiError::Conflict(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Unprocessable(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(ErrorBody {
            detail: self.to_string(),
        })
    }
}

// -------------------- extractor errors --------------------

/// Routes JSON, query and path extractor failures through [`ApiError`].
pub fn configure_extractors(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::JsonConfig::default().error_handler(|err, _req: &HttpRequest| {
        ApiError::Unprocessable(err.to_string()).into()
    }))
    .app_data(web::QueryConfig::default().error_handler(|err, _req: &HttpRequest| {
        ApiError::Unprocessable(err.to_string()).into()
    }))
    .app_data(web::PathConfig::default().error_handler(|err, _req: &HttpRequest| {
        ApiError::Unprocessable(err.to_string()).into()
    }));
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::body::to_bytes;
    use serde_json::json;

    #[actix_web::test]
    async fn maps_taxonomy_to_status_codes() {
        assert_eq!(
            ApiError::validation("Invalid email format").status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApiError::conflict("Employee ID already exists").status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(ApiError::employee_not_found().status_code(), StatusCode::NOT_FOUND);
        assert_eq!(
            ApiError::Unprocessable("missing field".into()).status_code(),
            StatusCode::UNPROCESSABLE_ENTITY
        );
    }

    #[actix_web::test]
    async fn internal_errors_are_masked() {
        let resp = ApiError::from(sqlx::Error::RowNotFound).error_response();
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let body = to_bytes(resp.into_body()).await.unwrap();
        let value: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(value, json!({ "detail": "Internal server error" }));
    }
}
