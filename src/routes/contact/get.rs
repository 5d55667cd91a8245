use axum::{extract::State, http::StatusCode, response::Response};

use super::page::ContactPage;
use crate::startup::AppState;

pub async fn contact_form(State(state): State<AppState>) -> Response {
    ContactPage::blank(&state.recaptcha_site_key).render(StatusCode::OK)
}
