use axum::{Json, http::StatusCode, response::IntoResponse};
use serde::Serialize;
use sqlx::Error as SqlxError;
use std::path::PathBuf;
use thiserror::Error as ThisError;
use tracing::error;

#[derive(Debug, ThisError)]
pub enum BankdexError {
    #[error("Bank not found")]
    BankNotFound,

    #[error("Branch not found")]
    BranchNotFound,

    #[error("source file not found at {}", .0.display())]
    MissingSource(PathBuf),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Database error: {0}")]
    DatabaseError(#[from] SqlxError),
}

impl IntoResponse for BankdexError {
    fn into_response(self) -> axum::response::Response {
        let (status, error_body) = match self {
            BankdexError::BankNotFound | BankdexError::BranchNotFound => {
                let body = ApiErrorBody {
                    code: "NOT_FOUND".to_string(),
                    message: self.to_string(),
                };
                (StatusCode::NOT_FOUND, body)
            }
            other => {
                error!(error = %other, "request failed");
                let body = ApiErrorBody {
                    code: "INTERNAL_ERROR".to_string(),
                    message: "An internal server error occurred.".to_string(),
                };
                (StatusCode::INTERNAL_SERVER_ERROR, body)
            }
        };
        (status, Json(ApiErrorResponse { error: error_body })).into_response()
    }
}

/// Standardized API error response body
#[derive(Serialize)]
pub struct ApiErrorBody {
    pub code: String,
    pub message: String,
}

#[derive(Serialize)]
pub struct ApiErrorResponse {
    pub error: ApiErrorBody,
}
