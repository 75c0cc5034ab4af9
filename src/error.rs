// error.rs
use askama::Template;
use axum::response::{Html, IntoResponse, Response};
use http::StatusCode;
use thiserror::Error;

use crate::views::NotFoundTemplate;

pub type AppResult<T> = Result<T, AppError>;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Question not found: {0}")]
    QuestionNotFound(String),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    #[error("Template error: {0}")]
    Template(#[from] askama::Error),
}

impl AppError {
    pub fn not_found(id: impl ToString) -> Self {
        Self::QuestionNotFound(id.to_string())
    }

    pub const fn status_code(&self) -> StatusCode {
        match self {
            Self::QuestionNotFound(_) => StatusCode::NOT_FOUND,
            Self::Database(_) | Self::Migration(_) | Self::Template(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    fn log(&self) {
        if self.status_code().is_server_error() {
            tracing::error!(error = %self, "Server error occurred");
        } else {
            tracing::debug!(error = %self, "Client error occurred");
        }
    }

    /// JSON flavour of the response, used by the API routes.
    pub fn into_json_response(self) -> Response {
        self.log();
        let status = self.status_code();
        let body = axum::Json(serde_json::json!({
            "error": {
                "status": status.as_u16(),
                "message": self.to_string(),
            }
        }));
        (status, body).into_response()
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        self.log();

        match self.status_code() {
            StatusCode::NOT_FOUND => match NotFoundTemplate.render() {
                Ok(page) => (StatusCode::NOT_FOUND, Html(page)).into_response(),
                Err(e) => {
                    tracing::error!(error = %e, "Failed to render not found page");
                    StatusCode::NOT_FOUND.into_response()
                }
            },
            status => (status, "Internal Server Error").into_response(),
        }
    }
}
