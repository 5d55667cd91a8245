use validator::ValidateEmail;

/// A normalised, syntactically valid email address.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactEmail(String);

impl ContactEmail {
    pub fn parse(s: &str) -> Result<ContactEmail, String> {
        match normalize(s.trim()) {
            Some(normalized) if normalized.validate_email() => Ok(Self(normalized)),
            _ => Err("Email is not valid".to_string()),
        }
    }
}

/// Lower-cases the address and strips provider-specific aliases so that
/// `John.Doe+news@googlemail.com` and `johndoe@gmail.com` end up identical.
///
/// `None` when nothing is left of the local part once the alias is removed.
fn normalize(s: &str) -> Option<String> {
    let lowered = s.to_lowercase();
    let Some((local, domain)) = lowered.rsplit_once('@') else {
        return Some(lowered);
    };

    let (local, domain) = match domain {
        "gmail.com" | "googlemail.com" => {
            (before_first(local, '+').replace('.', ""), "gmail.com")
        }
        "outlook.com" | "hotmail.com" | "live.com" | "icloud.com" | "me.com" => {
            (before_first(local, '+').to_string(), domain)
        }
        // Only the last `-` component is a tag: `a-b-c` becomes `a-b`.
        "yahoo.com" | "ymail.com" | "rocketmail.com" => {
            (before_last(local, '-').to_string(), domain)
        }
        _ => (local.to_string(), domain),
    };
    if local.is_empty() {
        return None;
    }
    Some(format!("{local}@{domain}"))
}

fn before_first(local: &str, separator: char) -> &str {
    local.split_once(separator).map_or(local, |(head, _)| head)
}

fn before_last(local: &str, separator: char) -> &str {
    local.rsplit_once(separator).map_or(local, |(head, _)| head)
}

impl AsRef<str> for ContactEmail {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<ContactEmail> for String {
    fn from(val: ContactEmail) -> Self {
        val.0
    }
}

impl std::fmt::Display for ContactEmail {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}
