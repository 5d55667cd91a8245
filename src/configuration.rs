use std::str::FromStr;

use secrecy::Secret;
use serde_aux::field_attributes::deserialize_number_from_string;

use crate::domain::{ContactEmail, Mailbox};
use crate::email_client::EmailClient;
use crate::mailing_list_client::MailingListClient;
use crate::recaptcha_client::RecaptchaClient;

#[derive(serde::Deserialize, Clone)]
pub struct Settings {
    pub application: ApplicationSettings,
    pub email_client: EmailClientSettings,
    pub recaptcha: RecaptchaSettings,
    pub mailing_list: MailingListSettings,
}

#[derive(serde::Deserialize, Clone)]
pub struct ApplicationSettings {
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub port: u16,
    pub host: String,
    pub static_dir: String,
}

#[derive(serde::Deserialize, Clone)]
pub struct EmailClientSettings {
    pub base_url: String,
    pub sender_email: String,
    pub sender_name: String,
    pub api_key: Secret<String>,
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub timeout_milliseconds: u64,
}

impl EmailClientSettings {
    /// The operator mailbox, used both as sender and as recipient of notifications.
    pub fn operator(&self) -> Result<Mailbox, String> {
        let email = ContactEmail::parse(&self.sender_email)?;
        Ok(Mailbox::new(email, self.sender_name.clone()))
    }

    pub fn timeout(&self) -> std::time::Duration {
        std::time::Duration::from_millis(self.timeout_milliseconds)
    }

    pub fn client(self) -> Result<EmailClient, reqwest::Error> {
        let timeout = self.timeout();
        EmailClient::new(self.base_url, self.api_key, timeout)
    }
}

#[derive(serde::Deserialize, Clone)]
pub struct RecaptchaSettings {
    pub base_url: String,
    pub site_key: String,
    pub secret_key: Secret<String>,
    pub score_threshold: f64,
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub timeout_milliseconds: u64,
}

impl RecaptchaSettings {
    pub fn timeout(&self) -> std::time::Duration {
        std::time::Duration::from_millis(self.timeout_milliseconds)
    }

    pub fn client(self) -> Result<RecaptchaClient, reqwest::Error> {
        let timeout = self.timeout();
        RecaptchaClient::new(
            self.base_url,
            self.secret_key,
            self.score_threshold,
            timeout,
        )
    }
}

#[derive(serde::Deserialize, Clone)]
pub struct MailingListSettings {
    pub base_url: String,
    pub api_key: Secret<String>,
    pub list_id: String,
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub timeout_milliseconds: u64,
}

impl MailingListSettings {
    pub fn timeout(&self) -> std::time::Duration {
        std::time::Duration::from_millis(self.timeout_milliseconds)
    }

    pub fn client(self) -> Result<MailingListClient, reqwest::Error> {
        let timeout = self.timeout();
        MailingListClient::new(self.base_url, self.list_id, self.api_key, timeout)
    }
}

/// The possible runtime environment for our application.
#[derive(Debug, PartialEq, strum::EnumString, strum::AsRefStr)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Environment {
    Local,
    Production,
}

pub fn get_configuration() -> Result<Settings, config::ConfigError> {
    let base_path = std::env::current_dir().map_err(|e| {
        config::ConfigError::Message(format!("Failed to determine the current directory: {e}"))
    })?;
    let configuration_directory = base_path.join("configuration");

    let environment = std::env::var("APP_ENVIRONMENT").unwrap_or_else(|_| "local".into());
    let environment = Environment::from_str(&environment).map_err(|_| {
        config::ConfigError::Message(format!(
            "{environment} is not a supported environment. Use either `local` or `production`."
        ))
    })?;
    let environment_filename = format!("{}.yaml", environment.as_ref());

    let settings = config::Config::builder()
        .add_source(config::File::from(configuration_directory.join("base.yaml")))
        .add_source(config::File::from(
            configuration_directory.join(environment_filename),
        ))
        // E.g. `APP_RECAPTCHA__SECRET_KEY=...` sets `Settings.recaptcha.secret_key`
        .add_source(
            config::Environment::with_prefix("APP")
                .prefix_separator("_")
                .separator("__"),
        )
        .build()?;
    settings.try_deserialize::<Settings>()
}
