use crate::render;
use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("{0}")]
    Database(#[from] database::DbError),
}

/// Converts our custom `AppError` into an HTML error page.
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match &self {
            AppError::Database(db_err) => {
                tracing::error!(error = ?db_err, "Database error.");
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        (status, Html(render::error_page(&self.to_string()))).into_response()
    }
}
