use axum::{extract::State, http::StatusCode, response::Response};
use axum_extra::extract::{Form, FormRejection};

use super::page::ContactPage;
use crate::{
    domain::{ContactSubmission, EmailMessage, FormErrors, SubmissionInput, SubscriptionRequest},
    mailing_list_client::SubscriptionOutcome,
    recaptcha_client::VerificationFailure,
    routes::error_chain_fmt,
    startup::AppState,
};

#[derive(thiserror::Error)]
pub enum ContactError {
    #[error("The submission was rejected: {0}")]
    Rejected(FormErrors),
    #[error("Failed to send the notification email")]
    NotificationFailed(#[source] reqwest::Error),
}

impl std::fmt::Debug for ContactError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        error_chain_fmt(self, f)
    }
}

impl ContactError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::Rejected(_) => StatusCode::BAD_REQUEST,
            Self::NotificationFailed(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// What the user is shown. Provider details stay in the logs.
    pub fn into_form_errors(self) -> FormErrors {
        match self {
            Self::Rejected(errors) => errors,
            Self::NotificationFailed(_) => {
                FormErrors::single("notification", "Failed to send email. Try again later.")
            }
        }
    }
}

#[tracing::instrument(
    name = "Handling a contact form submission",
    skip(state, form),
    fields(
        contact_email = tracing::field::Empty,
        subscription = tracing::field::Empty
    )
)]
pub async fn submit_contact_form(
    State(state): State<AppState>,
    form: Result<Form<SubmissionInput>, FormRejection>,
) -> Response {
    let input = match form {
        Ok(Form(input)) => input,
        Err(rejection) => {
            tracing::warn!(
                error.message = %rejection,
                "The contact form submission could not be read"
            );
            let errors = FormErrors::single(
                "form",
                "We could not read your submission. Please try again.",
            );
            let input = SubmissionInput::default();
            return ContactPage::rejected(errors, &input, &state.recaptcha_site_key)
                .render(StatusCode::BAD_REQUEST);
        }
    };
    match process_submission(&state, &input).await {
        Ok(subscription) => {
            tracing::Span::current().record("subscription", subscription.as_str());
            ContactPage::submitted(&state.recaptcha_site_key).render(StatusCode::OK)
        }
        Err(e) => {
            match &e {
                ContactError::Rejected(errors) => {
                    tracing::info!(%errors, "Contact form submission was rejected");
                }
                ContactError::NotificationFailed(_) => {
                    tracing::error!(exception.details = ?e, exception.message = %e);
                }
            }
            let status = e.status();
            ContactPage::rejected(e.into_form_errors(), &input, &state.recaptcha_site_key)
                .render(status)
        }
    }
}

/// Validate, verify, notify, then subscribe. Stops at the first failing step; the
/// subscription step cannot fail the request.
pub async fn process_submission(
    state: &AppState,
    input: &SubmissionInput,
) -> Result<SubscriptionOutcome, ContactError> {
    let submission = ContactSubmission::parse(input).map_err(|mut errors| {
        // Reported alongside the field errors, but without calling the provider.
        if input.recaptcha_token().is_none() {
            errors.insert(
                "recaptcha",
                VerificationFailure::MissingToken.user_message(),
            );
        }
        ContactError::Rejected(errors)
    })?;
    tracing::Span::current().record(
        "contact_email",
        tracing::field::display(&submission.email),
    );

    let verification = state
        .recaptcha_client
        .verify(input.recaptcha_token())
        .await;
    if !verification.passed {
        let reason = verification
            .reason
            .unwrap_or(VerificationFailure::Rejected);
        return Err(ContactError::Rejected(FormErrors::single(
            "recaptcha",
            reason.user_message(),
        )));
    }

    let message = EmailMessage::contact_notification(&submission, &state.operator);
    state
        .email_client
        .send_email(&message)
        .await
        .map_err(ContactError::NotificationFailed)?;

    Ok(subscribe(state, &submission).await)
}

async fn subscribe(state: &AppState, submission: &ContactSubmission) -> SubscriptionOutcome {
    let Some(request) = SubscriptionRequest::for_submission(submission) else {
        return SubscriptionOutcome::NotRequested;
    };
    match state.mailing_list_client.subscribe(&request).await {
        Ok(()) => SubscriptionOutcome::Subscribed,
        Err(e) => {
            tracing::warn!(
                error.cause_chain = ?e,
                error.message = %e,
                "Failed to subscribe the contact to the mailing list"
            );
            SubscriptionOutcome::Failed(e)
        }
    }
}
