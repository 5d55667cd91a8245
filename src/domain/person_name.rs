use unicode_segmentation::UnicodeSegmentation;

use super::html;

/// A trimmed first or last name that passed the length rules.
///
/// The raw text is kept; [`PersonName::html`] gives the escaped form for HTML bodies.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersonName(String);

impl PersonName {
    pub fn parse_first(s: &str) -> Result<PersonName, String> {
        Self::parse(s, "First name", 3)
    }

    pub fn parse_last(s: &str) -> Result<PersonName, String> {
        Self::parse(s, "Last name", 2)
    }

    fn parse(s: &str, label: &str, min_length: usize) -> Result<PersonName, String> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(format!("{label} is required"));
        }
        // Measured on the escaped text, so `&` counts as five characters.
        let escaped = html::escape(trimmed);
        if escaped.graphemes(true).count() < min_length {
            return Err(format!(
                "{label} must be at least {min_length} characters long"
            ));
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn html(&self) -> String {
        html::escape(&self.0)
    }
}

impl AsRef<str> for PersonName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for PersonName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}
