use axum::{http::StatusCode, response::Response};

use crate::domain::{FormErrors, SubmissionInput};
use crate::routes::render_page;

const SERVICE_OPTIONS: [&str; 4] = [
    "Colour consultation",
    "Interior painting",
    "Exterior painting",
    "Colour matching",
];

const SUCCESS_MESSAGE: &str = "Form submitted successfully!";

/// Everything the contact template needs for one render.
#[derive(serde::Serialize)]
pub struct ContactPage<'a> {
    title: &'static str,
    errors: FormErrors,
    form: FormEcho,
    services: Vec<ServiceOption>,
    success_message: Option<&'static str>,
    recaptcha_site_key: &'a str,
}

/// Submitted values written back into the inputs.
#[derive(serde::Serialize, Default)]
struct FormEcho {
    first_name: String,
    last_name: String,
    email: String,
    phone: String,
    referral: String,
    message: String,
    newsletter: bool,
}

#[derive(serde::Serialize)]
struct ServiceOption {
    name: &'static str,
    checked: bool,
}

impl<'a> ContactPage<'a> {
    pub fn blank(recaptcha_site_key: &'a str) -> Self {
        Self {
            title: "Contact Us",
            errors: FormErrors::default(),
            form: FormEcho::default(),
            services: service_options(&[]),
            success_message: None,
            recaptcha_site_key,
        }
    }

    /// A fresh form with the acknowledgment shown.
    pub fn submitted(recaptcha_site_key: &'a str) -> Self {
        Self {
            success_message: Some(SUCCESS_MESSAGE),
            ..Self::blank(recaptcha_site_key)
        }
    }

    /// The form as the user sent it, with the reasons it was turned down.
    pub fn rejected(
        errors: FormErrors,
        input: &SubmissionInput,
        recaptcha_site_key: &'a str,
    ) -> Self {
        let echo = |value: &Option<String>| value.as_deref().unwrap_or_default().trim().to_string();
        Self {
            errors,
            form: FormEcho {
                first_name: echo(&input.first_name),
                last_name: echo(&input.last_name),
                email: echo(&input.email),
                phone: echo(&input.phone),
                referral: echo(&input.referral),
                message: echo(&input.message),
                newsletter: input.wants_newsletter(),
            },
            services: service_options(&input.services()),
            ..Self::blank(recaptcha_site_key)
        }
    }

    pub fn render(&self, status: StatusCode) -> Response {
        render_page(status, include_str!("./contact.html"), self)
    }
}

fn service_options(selected: &[String]) -> Vec<ServiceOption> {
    SERVICE_OPTIONS
        .iter()
        .map(|&name| ServiceOption {
            name,
            checked: selected.iter().any(|s| s == name),
        })
        .collect()
}
