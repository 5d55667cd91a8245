use super::{ContactEmail, ContactSubmission};

#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SubscriptionStatus {
    Subscribed,
}

/// A mailing-list upsert for someone who ticked the newsletter box.
#[derive(Debug, Clone)]
pub struct SubscriptionRequest {
    pub email: ContactEmail,
    pub first_name: String,
    pub last_name: String,
    pub status: SubscriptionStatus,
}

impl SubscriptionRequest {
    /// `None` unless the submitter opted in.
    pub fn for_submission(submission: &ContactSubmission) -> Option<Self> {
        submission.newsletter.then(|| Self {
            email: submission.email.clone(),
            first_name: submission.first_name.to_string(),
            last_name: submission.last_name.to_string(),
            status: SubscriptionStatus::Subscribed,
        })
    }
}
