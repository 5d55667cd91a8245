use super::html;

/// The free-text body of a contact submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactMessage(String);

impl ContactMessage {
    pub fn parse(s: &str) -> Result<ContactMessage, String> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err("Message is required".to_string());
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn html(&self) -> String {
        html::escape(&self.0)
    }
}

impl AsRef<str> for ContactMessage {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
