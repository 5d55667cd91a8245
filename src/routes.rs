mod contact;
mod health_check;
mod home;
mod not_found;

pub use contact::*;
pub use health_check::*;
pub use home::*;
pub use not_found::*;

use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};

use crate::utils::e500;

/// Renders a compiled-in handlebars template. Interpolated values are HTML-escaped.
fn render_page<T>(status: StatusCode, template: &str, data: &T) -> Response
where
    T: serde::Serialize,
{
    let reg = handlebars::Handlebars::new();
    match reg.render_template(template, data) {
        Ok(html) => (status, Html::from(html)).into_response(),
        Err(e) => e500(e),
    }
}

fn error_chain_fmt(
    e: &impl std::error::Error,
    f: &mut std::fmt::Formatter<'_>,
) -> std::fmt::Result {
    writeln!(f, "{}\n", e)?;
    let mut current = e.source();
    while let Some(cause) = current {
        writeln!(f, "Caused by:\n\t{}", cause)?;
        current = cause.source();
    }
    Ok(())
}
