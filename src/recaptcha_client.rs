use reqwest::Client;
use secrecy::{ExposeSecret, Secret};

/// Why a submission did not pass bot verification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum VerificationFailure {
    #[error("no verification token was submitted")]
    MissingToken,
    #[error("the verification provider rejected the token")]
    Rejected,
    #[error("the verification score is below the threshold")]
    LowScore,
    #[error("the verification provider could not be reached")]
    Unavailable,
}

impl VerificationFailure {
    pub fn user_message(&self) -> &'static str {
        match self {
            Self::MissingToken | Self::Unavailable => "reCAPTCHA verification failed",
            Self::Rejected | Self::LowScore => "Suspicious activity detected. Please try again.",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct VerificationOutcome {
    pub passed: bool,
    pub score: Option<f64>,
    pub reason: Option<VerificationFailure>,
}

impl VerificationOutcome {
    fn passed(score: f64) -> Self {
        Self {
            passed: true,
            score: Some(score),
            reason: None,
        }
    }

    fn failed(reason: VerificationFailure, score: Option<f64>) -> Self {
        Self {
            passed: false,
            score,
            reason: Some(reason),
        }
    }
}

/// Client for the reCAPTCHA v3 `siteverify` endpoint. Fails closed.
pub struct RecaptchaClient {
    http_client: Client,
    base_url: String,
    secret_key: Secret<String>,
    score_threshold: f64,
}

impl RecaptchaClient {
    pub fn new(
        base_url: String,
        secret_key: Secret<String>,
        score_threshold: f64,
        timeout: std::time::Duration,
    ) -> Result<Self, reqwest::Error> {
        let http_client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            http_client,
            base_url,
            secret_key,
            score_threshold,
        })
    }

    #[tracing::instrument(name = "Verifying the reCAPTCHA token", skip(self, token))]
    pub async fn verify(&self, token: Option<&str>) -> VerificationOutcome {
        let Some(token) = token.map(str::trim).filter(|t| !t.is_empty()) else {
            tracing::info!("No reCAPTCHA token was submitted");
            return VerificationOutcome::failed(VerificationFailure::MissingToken, None);
        };

        let response = match self.site_verify(token).await {
            Ok(response) => response,
            Err(e) => {
                tracing::error!(
                    error.cause_chain = ?e,
                    error.message = %e,
                    "Failed to reach the reCAPTCHA verification endpoint"
                );
                return VerificationOutcome::failed(VerificationFailure::Unavailable, None);
            }
        };

        tracing::info!(score = ?response.score, success = response.success, "reCAPTCHA score");
        if !response.success {
            tracing::warn!(error_codes = ?response.error_codes, "reCAPTCHA token was rejected");
            return VerificationOutcome::failed(VerificationFailure::Rejected, response.score);
        }
        match response.score {
            Some(score) if score >= self.score_threshold => VerificationOutcome::passed(score),
            score => VerificationOutcome::failed(VerificationFailure::LowScore, score),
        }
    }

    async fn site_verify(&self, token: &str) -> Result<SiteVerifyResponse, reqwest::Error> {
        let url = format!("{}/recaptcha/api/siteverify", self.base_url);
        self.http_client
            .post(&url)
            .query(&[
                ("secret", self.secret_key.expose_secret().as_str()),
                ("response", token),
            ])
            .send()
            .await?
            .error_for_status()?
            .json::<SiteVerifyResponse>()
            .await
    }
}

#[derive(serde::Deserialize, Debug)]
struct SiteVerifyResponse {
    success: bool,
    #[serde(default)]
    score: Option<f64>,
    #[serde(rename = "error-codes", default)]
    error_codes: Vec<String>,
}
