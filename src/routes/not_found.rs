use axum::{http::StatusCode, response::Response};
use serde_json::json;

use super::render_page;

/// Catch-all for unknown paths and unsupported methods.
pub async fn not_found() -> Response {
    render_page(
        StatusCode::NOT_FOUND,
        include_str!("./not_found/404.html"),
        &json!({"title": "404"}),
    )
}
