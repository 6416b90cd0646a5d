use axum::{
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Username already taken")]
    DuplicateUsername,

    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Login required")]
    Unauthorized,

    #[error("{0}")]
    Validation(String),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Session error: {0}")]
    Session(#[from] tower_sessions::session::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            // Route guards bounce anonymous users back to the login page.
            AppError::Unauthorized => Redirect::to("/login").into_response(),
            AppError::DuplicateUsername | AppError::InvalidCredentials => {
                (StatusCode::BAD_REQUEST, self.to_string()).into_response()
            }
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, msg).into_response(),
            AppError::Database(e) => {
                tracing::error!("database failure: {e}");
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal error".to_string()).into_response()
            }
            AppError::Session(e) => {
                tracing::error!("session failure: {e}");
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal error".to_string()).into_response()
            }
        }
    }
}
