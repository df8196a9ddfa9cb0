//! Signup endpoint client

use async_trait::async_trait;
use std::time::Duration;

use super::error::ApiError;
use crate::config::ApiConfig;
use crate::signup::SignupFormData;

/// Longest response body kept in an error message
const MAX_ERROR_BODY: usize = 512;

/// Something that can register a new account
#[async_trait]
pub trait SignupApi: Send + Sync {
    /// Submit one registration. Any 2xx response is success.
    async fn register(&self, data: &SignupFormData) -> Result<(), ApiError>;
}

/// Posts registrations to the configured HTTP endpoint
pub struct HttpSignupClient {
    client: reqwest::Client,
    signup_url: String,
}

impl HttpSignupClient {
    pub fn new(config: &ApiConfig) -> Result<Self, ApiError> {
        let mut builder = reqwest::Client::builder().user_agent(config.user_agent.as_str());
        if config.timeout_secs > 0 {
            builder = builder.timeout(Duration::from_secs(config.timeout_secs));
        }
        let client = builder
            .build()
            .map_err(|e| ApiError::Client(e.to_string()))?;

        Ok(Self {
            client,
            signup_url: config.signup_url.clone(),
        })
    }

    /// Client for an explicit endpoint with otherwise default settings
    pub fn with_url(signup_url: impl Into<String>) -> Result<Self, ApiError> {
        let config = ApiConfig {
            signup_url: signup_url.into(),
            ..ApiConfig::default()
        };
        Self::new(&config)
    }

    pub fn signup_url(&self) -> &str {
        &self.signup_url
    }
}

#[async_trait]
impl SignupApi for HttpSignupClient {
    async fn register(&self, data: &SignupFormData) -> Result<(), ApiError> {
        tracing::debug!(url = %self.signup_url, role = %data.role, "Posting registration");

        let response = self
            .client
            .post(&self.signup_url)
            .header(reqwest::header::CONTENT_TYPE, "application/json")
            .json(data)
            .send()
            .await?;

        let status = response.status();
        if status.is_success() {
            return Ok(());
        }

        let mut body = response.text().await.unwrap_or_default();
        if body.len() > MAX_ERROR_BODY {
            let mut cut = MAX_ERROR_BODY;
            while !body.is_char_boundary(cut) {
                cut -= 1;
            }
            body.truncate(cut);
        }
        Err(ApiError::http(status.as_u16(), body))
    }
}
