use axum::{http::StatusCode, response::Response};
use serde_json::json;

use super::render_page;

pub async fn home() -> Response {
    render_page(
        StatusCode::OK,
        include_str!("./home/home.html"),
        &json!({"title": "Home"}),
    )
}
