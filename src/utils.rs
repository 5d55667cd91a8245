use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};

/// Logs an unexpected failure and answers with a bare 500.
pub fn e500<T>(e: T) -> Response
where
    T: std::fmt::Debug + std::fmt::Display + 'static,
{
    tracing::error!(exception.details = ?e, exception.message = %e, "Unexpected error");
    StatusCode::INTERNAL_SERVER_ERROR.into_response()
}
