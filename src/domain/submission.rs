use super::{ContactEmail, ContactMessage, FormErrors, PersonName};

/// The contact form as posted. Absent keys are `None`; nothing is defaulted here.
///
/// A scalar key sent more than once keeps its last value, as with a hidden
/// `newsletter` field followed by the checkbox of the same name.
#[derive(serde::Deserialize, Debug, Clone, Default)]
pub struct SubmissionInput {
    #[serde(default, deserialize_with = "last_value")]
    pub first_name: Option<String>,
    #[serde(default, deserialize_with = "last_value")]
    pub last_name: Option<String>,
    #[serde(default, deserialize_with = "last_value")]
    pub email: Option<String>,
    #[serde(default, deserialize_with = "last_value")]
    pub phone: Option<String>,
    #[serde(default, deserialize_with = "last_value")]
    pub newsletter: Option<String>,
    #[serde(default)]
    pub service: Vec<String>,
    #[serde(default, deserialize_with = "last_value")]
    pub referral: Option<String>,
    #[serde(default, deserialize_with = "last_value")]
    pub message: Option<String>,
    #[serde(default, deserialize_with = "last_value")]
    pub recaptcha_token: Option<String>,
}

fn last_value<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let values: Vec<String> = serde::Deserialize::deserialize(deserializer)?;
    Ok(values.into_iter().last())
}

impl SubmissionInput {
    pub fn wants_newsletter(&self) -> bool {
        self.newsletter
            .as_deref()
            .is_some_and(|value| !value.trim().is_empty())
    }

    pub fn recaptcha_token(&self) -> Option<&str> {
        self.recaptcha_token
            .as_deref()
            .map(str::trim)
            .filter(|token| !token.is_empty())
    }

    pub fn services(&self) -> Vec<String> {
        self.service
            .iter()
            .map(|s| s.trim())
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect()
    }
}

/// A submission whose required fields passed validation.
#[derive(Debug, Clone)]
pub struct ContactSubmission {
    pub first_name: PersonName,
    pub last_name: PersonName,
    pub email: ContactEmail,
    pub phone: Option<String>,
    pub newsletter: bool,
    pub services: Vec<String>,
    pub referral: Option<String>,
    pub message: ContactMessage,
}

impl ContactSubmission {
    pub fn parse(input: &SubmissionInput) -> Result<ContactSubmission, FormErrors> {
        let mut errors = FormErrors::default();
        let first_name = errors.record(
            "first_name",
            PersonName::parse_first(input.first_name.as_deref().unwrap_or_default()),
        );
        let last_name = errors.record(
            "last_name",
            PersonName::parse_last(input.last_name.as_deref().unwrap_or_default()),
        );
        let email = errors.record(
            "email",
            ContactEmail::parse(input.email.as_deref().unwrap_or_default()),
        );
        let message = errors.record(
            "message",
            ContactMessage::parse(input.message.as_deref().unwrap_or_default()),
        );

        match (first_name, last_name, email, message) {
            (Some(first_name), Some(last_name), Some(email), Some(message)) => Ok(Self {
                first_name,
                last_name,
                email,
                phone: optional(&input.phone),
                newsletter: input.wants_newsletter(),
                services: input.services(),
                referral: optional(&input.referral),
                message,
            }),
            _ => Err(errors),
        }
    }

    pub fn phone_or_default(&self) -> &str {
        self.phone.as_deref().unwrap_or("Not provided")
    }

    pub fn referral_or_default(&self) -> &str {
        self.referral.as_deref().unwrap_or("Not specified")
    }

    pub fn services_summary(&self) -> String {
        if self.services.is_empty() {
            "None".to_string()
        } else {
            self.services.join(", ")
        }
    }
}

fn optional(value: &Option<String>) -> Option<String> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}
