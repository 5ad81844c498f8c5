/// Server error types
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use cadence_core::CadenceError;
use serde_json::json;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, ServerError>;

#[derive(Debug, Error)]
pub enum ServerError {
    #[error("Authentication failed: {0}")]
    Auth(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    /// Catalog failure; `message` is what the client sees
    #[error("{message}: {source}")]
    Upstream {
        message: String,
        #[source]
        source: CadenceError,
    },

    #[error("Internal server error: {0}")]
    Internal(String),

    #[error("Database error: {0}")]
    Database(CadenceError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JWT error: {0}")]
    Jwt(#[from] jsonwebtoken::errors::Error),
}

impl ServerError {
    /// Wrap a catalog failure behind a user-facing message
    pub fn upstream(message: impl Into<String>) -> impl FnOnce(CadenceError) -> Self {
        let message = message.into();
        move |source| Self::Upstream { message, source }
    }
}

impl From<CadenceError> for ServerError {
    fn from(err: CadenceError) -> Self {
        match err {
            CadenceError::NotFound { entity, id } => {
                ServerError::NotFound(format!("{} not found: {}", entity, id))
            }
            CadenceError::PermissionDenied(msg) => ServerError::Forbidden(msg),
            CadenceError::InvalidInput(msg) => ServerError::BadRequest(msg),
            CadenceError::Duplicate(msg) => ServerError::Conflict(msg),
            other => ServerError::Database(other),
        }
    }
}

impl From<cadence_storage::StorageError> for ServerError {
    fn from(err: cadence_storage::StorageError) -> Self {
        ServerError::Database(err.into())
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            ServerError::Auth(msg) => (StatusCode::UNAUTHORIZED, msg),
            ServerError::Forbidden(msg) => (StatusCode::FORBIDDEN, msg),
            ServerError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            ServerError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            ServerError::Conflict(msg) => (StatusCode::CONFLICT, msg),
            ServerError::Upstream { message, source } => {
                tracing::error!(error = %source, "{}", message);
                (StatusCode::INTERNAL_SERVER_ERROR, message)
            }
            ServerError::Database(ref e) => {
                tracing::error!("Database error: {:?}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Database error".to_string(),
                )
            }
            ServerError::Config(ref msg) => {
                tracing::error!("Config error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Configuration error".to_string(),
                )
            }
            ServerError::Internal(ref msg) => {
                tracing::error!("Internal error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }
            ServerError::Io(ref e) => {
                tracing::error!("IO error: {:?}", e);
                (StatusCode::INTERNAL_SERVER_ERROR, "IO error".to_string())
            }
            ServerError::Jwt(ref e) => {
                tracing::warn!("JWT error: {:?}", e);
                (StatusCode::UNAUTHORIZED, "Invalid token".to_string())
            }
        };

        let body = Json(json!({
            "error": error_message,
        }));

        (status, body).into_response()
    }
}
