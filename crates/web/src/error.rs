use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use importer::ImporterError;
use serde_json::json;
use std::fmt;
use storage::error::StorageError;

/// Web layer errors
#[derive(Debug)]
pub enum WebError {
    Storage(StorageError),
    Import(ImporterError),
    BadRequest(String),
    Unauthorized,
    ServerMisconfigured(String),
}

impl fmt::Display for WebError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Storage(e) => write!(f, "Storage error: {}", e),
            Self::Import(e) => write!(f, "Import error: {}", e),
            Self::BadRequest(msg) => write!(f, "Bad request: {}", msg),
            Self::Unauthorized => write!(f, "Unauthorized"),
            Self::ServerMisconfigured(msg) => write!(f, "Server misconfigured: {}", msg),
        }
    }
}

impl IntoResponse for WebError {
    fn into_response(self) -> Response {
        let (status_code, body) = match &self {
            Self::Storage(StorageError::ConstraintViolation(msg)) => (
                StatusCode::CONFLICT,
                json!({ "ok": false, "error": msg }),
            ),
            Self::Storage(e) => {
                tracing::error!("Storage error: {:?}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({ "ok": false, "error": "An internal error occurred" }),
                )
            }
            Self::Import(e) => (
                StatusCode::BAD_REQUEST,
                json!({ "ok": false, "error": e.to_string() }),
            ),
            Self::BadRequest(msg) => (
                StatusCode::BAD_REQUEST,
                json!({ "ok": false, "error": msg }),
            ),
            Self::Unauthorized => return StatusCode::UNAUTHORIZED.into_response(),
            Self::ServerMisconfigured(msg) => {
                tracing::error!("Server misconfigured: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({ "ok": false, "error": msg }),
                )
            }
        };

        (status_code, Json(body)).into_response()
    }
}

impl From<StorageError> for WebError {
    fn from(error: StorageError) -> Self {
        Self::Storage(error)
    }
}

impl From<ImporterError> for WebError {
    fn from(error: ImporterError) -> Self {
        match error {
            ImporterError::StorageError(e) => Self::Storage(e),
            e => Self::Import(e),
        }
    }
}

pub type WebResult<T> = Result<T, WebError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_import_errors_are_bad_requests() {
        for error in [
            ImporterError::EmptyInput,
            ImporterError::InvalidHeader,
            ImporterError::NoRows,
            ImporterError::DuplicateUsername("a".to_string()),
        ] {
            let response = WebError::from(error).into_response();
            assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        }
    }

    #[test]
    fn test_storage_errors_from_importer_keep_storage_status() {
        let error = ImporterError::StorageError(StorageError::ConstraintViolation(
            "duplicate username".to_string(),
        ));
        let response = WebError::from(error).into_response();
        assert_eq!(response.status(), StatusCode::CONFLICT);
    }

    #[test]
    fn test_unauthorized_and_misconfigured() {
        let response = WebError::Unauthorized.into_response();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

        let response = WebError::ServerMisconfigured("no key".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
