use reqwest::Client;
use secrecy::{ExposeSecret, Secret};

use crate::domain::{EmailMessage, Mailbox};

/// Client for the Brevo transactional email API.
pub struct EmailClient {
    http_client: Client,
    base_url: String,
    api_key: Secret<String>,
}

impl EmailClient {
    pub fn new(
        base_url: String,
        api_key: Secret<String>,
        timeout: std::time::Duration,
    ) -> Result<Self, reqwest::Error> {
        let http_client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            http_client,
            base_url,
            api_key,
        })
    }

    /// One delivery attempt. Any non-2xx answer is an error.
    #[tracing::instrument(
        name = "Sending a transactional email",
        skip(self, message),
        fields(subject = %message.subject)
    )]
    pub async fn send_email(&self, message: &EmailMessage) -> Result<(), reqwest::Error> {
        let url = format!("{}/v3/smtp/email", self.base_url);
        let request_body = SendEmailRequest {
            sender: Contact::from(&message.sender),
            to: vec![Contact::from(&message.recipient)],
            subject: &message.subject,
            html_content: &message.html_content,
            text_content: &message.text_content,
        };
        self.http_client
            .post(&url)
            .header("api-key", self.api_key.expose_secret())
            .json(&request_body)
            .send()
            .await?
            .error_for_status()?;
        Ok(())
    }
}

#[derive(serde::Serialize)]
#[serde(rename_all = "camelCase")]
struct SendEmailRequest<'a> {
    sender: Contact<'a>,
    to: Vec<Contact<'a>>,
    subject: &'a str,
    html_content: &'a str,
    text_content: &'a str,
}

#[derive(serde::Serialize)]
struct Contact<'a> {
    email: &'a str,
    name: &'a str,
}

impl<'a> From<&'a Mailbox> for Contact<'a> {
    fn from(mailbox: &'a Mailbox) -> Self {
        Self {
            email: mailbox.email.as_ref(),
            name: &mailbox.name,
        }
    }
}
