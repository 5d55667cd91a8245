use reqwest::{header, Client};
use secrecy::{ExposeSecret, Secret};

use crate::domain::{SubscriptionRequest, SubscriptionStatus};

#[derive(thiserror::Error, Debug)]
pub enum SubscriptionError {
    #[error("The mailing list provider rejected the contact: {0}")]
    Rejected(String),
    #[error("Failed to call the mailing list provider")]
    Request(#[from] reqwest::Error),
}

/// Result of the newsletter step. Kept apart from the request's `Result` so that a
/// failure here is recorded but never turned into an error response.
#[derive(Debug)]
pub enum SubscriptionOutcome {
    NotRequested,
    Subscribed,
    Failed(SubscriptionError),
}

impl SubscriptionOutcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::NotRequested => "not_requested",
            Self::Subscribed => "subscribed",
            Self::Failed(_) => "failed",
        }
    }
}

/// Client for the Mailchimp batch list-members endpoint.
pub struct MailingListClient {
    http_client: Client,
    base_url: String,
    list_id: String,
    api_key: Secret<String>,
}

impl MailingListClient {
    pub fn new(
        base_url: String,
        list_id: String,
        api_key: Secret<String>,
        timeout: std::time::Duration,
    ) -> Result<Self, reqwest::Error> {
        let http_client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            http_client,
            base_url,
            list_id,
            api_key,
        })
    }

    /// Adds the contact to the list, or updates it if it is already there.
    #[tracing::instrument(
        name = "Subscribing a contact to the mailing list",
        skip(self, request),
        fields(list_id = %self.list_id)
    )]
    pub async fn subscribe(&self, request: &SubscriptionRequest) -> Result<(), SubscriptionError> {
        let url = format!("{}/3.0/lists/{}", self.base_url, self.list_id);
        let body = BatchSubscribeRequest {
            members: vec![Member {
                email_address: request.email.as_ref(),
                status: request.status,
                merge_fields: MergeFields {
                    first_name: &request.first_name,
                    last_name: &request.last_name,
                },
            }],
            update_existing: true,
        };
        let response = self
            .http_client
            .post(&url)
            .header(
                header::AUTHORIZATION,
                format!("apikey {}", self.api_key.expose_secret()),
            )
            .json(&body)
            .send()
            .await?
            .error_for_status()?
            .json::<BatchSubscribeResponse>()
            .await?;

        match response.errors.into_iter().next() {
            None => Ok(()),
            Some(e) => Err(SubscriptionError::Rejected(e.error)),
        }
    }
}

#[derive(serde::Serialize)]
struct BatchSubscribeRequest<'a> {
    members: Vec<Member<'a>>,
    update_existing: bool,
}

#[derive(serde::Serialize)]
struct Member<'a> {
    email_address: &'a str,
    status: SubscriptionStatus,
    merge_fields: MergeFields<'a>,
}

#[derive(serde::Serialize)]
struct MergeFields<'a> {
    #[serde(rename = "FNAME")]
    first_name: &'a str,
    #[serde(rename = "LNAME")]
    last_name: &'a str,
}

#[derive(serde::Deserialize)]
struct BatchSubscribeResponse {
    #[serde(default)]
    errors: Vec<MemberError>,
}

#[derive(serde::Deserialize)]
struct MemberError {
    error: String,
}
