use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use contracts::shared::response::ApiResponse;
use sea_orm::DbErr;
use thiserror::Error;

/// Service-wide error taxonomy. Repositories classify storage errors;
/// everything above them propagates these variants unchanged.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    Conflict(String),

    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    InvalidConfiguration(String),

    #[error("{0}")]
    InvalidUpstreamData(String),

    #[error("Storage error: {0}")]
    Storage(String),
}

impl AppError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Conflict(_) => StatusCode::CONFLICT,
            AppError::Validation(_)
            | AppError::InvalidConfiguration(_)
            | AppError::InvalidUpstreamData(_) => StatusCode::BAD_REQUEST,
            AppError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<DbErr> for AppError {
    fn from(err: DbErr) -> Self {
        AppError::Storage(err.to_string())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = Json(ApiResponse::<()>::error(self.to_string()));
        (status, body).into_response()
    }
}

/// True when the driver reports a unique-constraint violation.
/// Covers the sqlite message and error codes plus the postgres sqlstate.
pub fn is_unique_violation(err: &DbErr) -> bool {
    let text = err.to_string().to_lowercase();
    text.contains("unique constraint")
        || text.contains("code: 2067")
        || text.contains("code: 1555")
        || text.contains("23505")
}

/// Classify a write-path storage error: a recognized unique violation is a
/// Conflict, anything else is a storage failure.
pub fn classify_write_err(err: DbErr, conflict_message: &str) -> AppError {
    if is_unique_violation(&err) {
        tracing::warn!("Unique constraint violation: {}", err);
        AppError::Conflict(conflict_message.to_string())
    } else {
        tracing::error!("Storage error: {}", err);
        AppError::Storage(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unique_violations_are_recognized() {
        let err = DbErr::Custom("UNIQUE constraint failed: products.product_id".into());
        assert!(is_unique_violation(&err));

        let err = DbErr::Custom("error code 23505: duplicate key value".into());
        assert!(is_unique_violation(&err));

        let err = DbErr::Custom("database is locked".into());
        assert!(!is_unique_violation(&err));
    }

    #[test]
    fn classification_maps_unique_violation_to_conflict() {
        let err = DbErr::Custom("UNIQUE constraint failed: products.name".into());
        let classified = classify_write_err(err, "Product already exists");
        assert!(matches!(classified, AppError::Conflict(_)));
        assert_eq!(classified.status_code(), StatusCode::CONFLICT);

        let err = DbErr::Custom("connection refused".into());
        let classified = classify_write_err(err, "Product already exists");
        assert!(matches!(classified, AppError::Storage(_)));
        assert_eq!(classified.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
