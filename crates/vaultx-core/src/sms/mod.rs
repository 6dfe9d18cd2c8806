//! SMS phone verification client.
//!
//! Talks to the two backend endpoints:
//! - `POST /api/auth/sms/send` with `{ "phone_number" }`
//! - `POST /api/auth/sms/verify` with `{ "phone_number", "code" }`
//!
//! Both accept an optional bearer token. Failures carry a JSON `detail`.

mod error;

use std::time::Duration;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use url::Url;

pub use self::error::VerificationError;
use crate::config::Config;
use crate::phone::{PhoneCandidate, mask};

pub const SEND_PATH: &str = "/api/auth/sms/send";
pub const VERIFY_PATH: &str = "/api/auth/sms/verify";

/// User-Agent sent with every request.
pub const USER_AGENT: &str = concat!("vaultx/", env!("CARGO_PKG_VERSION"));

/// Result type for verification requests.
pub type VerificationResult<T> = std::result::Result<T, VerificationError>;

/// Rejects phone numbers with too few local digits.
///
/// # Errors
/// Returns [`VerificationError::Validation`] with `message` when the
/// candidate has fewer than `min_digits` local digits.
pub fn validate_phone(
    candidate: &PhoneCandidate,
    min_digits: usize,
    message: &str,
) -> VerificationResult<()> {
    if candidate.local_digits.len() < min_digits {
        return Err(VerificationError::Validation(message.to_string()));
    }
    Ok(())
}

/// Connection settings for [`VerificationClient`].
#[derive(Debug, Clone)]
pub struct SmsConfig {
    pub base_url: Url,
    pub token: Option<String>,
    pub timeout: Option<Duration>,
}

impl SmsConfig {
    /// Resolves the backend URL and timeout from config.
    ///
    /// # Errors
    /// Returns an error if the backend URL is invalid.
    pub fn from_config(config: &Config, token: Option<String>) -> Result<Self> {
        Ok(Self {
            base_url: config.effective_backend_url()?,
            token: token.filter(|t| !t.trim().is_empty()),
            timeout: config.request_timeout(),
        })
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url.as_str().trim_end_matches('/'), path)
    }
}

#[derive(Debug, Serialize)]
struct SendRequest<'a> {
    phone_number: &'a str,
}

#[derive(Debug, Serialize)]
struct VerifyRequest<'a> {
    phone_number: &'a str,
    code: &'a str,
}

/// Body of a successful send.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct SendReceipt {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub phone_number: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct VerifyResponse {
    #[serde(default)]
    verified: Option<bool>,
    #[serde(default)]
    message: Option<String>,
}

/// HTTP client for the SMS verification endpoints.
#[derive(Debug, Clone)]
pub struct VerificationClient {
    config: SmsConfig,
    http: reqwest::Client,
}

impl VerificationClient {
    /// Creates a client.
    ///
    /// # Errors
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(config: SmsConfig) -> Result<Self> {
        let mut builder = reqwest::Client::builder().user_agent(USER_AGENT);
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder.build().context("Failed to build HTTP client")?;
        Ok(Self { config, http })
    }

    pub fn base_url(&self) -> &Url {
        &self.config.base_url
    }

    /// Requests a code for `phone_number`.
    ///
    /// # Errors
    /// Returns a service error for non-2xx responses and a transport error
    /// when the request does not complete.
    pub async fn send_code(&self, phone_number: &str) -> VerificationResult<SendReceipt> {
        tracing::info!(phone = %mask(phone_number), "sending verification code");

        let body = self.post(SEND_PATH, &SendRequest { phone_number }).await?;

        // The body is informational; an empty or odd success body still counts.
        Ok(serde_json::from_str(&body).unwrap_or_default())
    }

    /// Submits `code` for `phone_number`.
    ///
    /// A 2xx body with `"verified": false` is treated as a rejection.
    ///
    /// # Errors
    /// Returns a service error when the backend rejects the code and a
    /// transport error when the request does not complete.
    pub async fn check_code(&self, phone_number: &str, code: &str) -> VerificationResult<()> {
        tracing::info!(phone = %mask(phone_number), "checking verification code");

        let body = self
            .post(VERIFY_PATH, &VerifyRequest { phone_number, code })
            .await?;

        let response: VerifyResponse = serde_json::from_str(&body).unwrap_or_default();
        if response.verified == Some(false) {
            tracing::warn!(phone = %mask(phone_number), "verification code rejected");
            return Err(VerificationError::Service {
                status: 200,
                detail: response.message,
            });
        }
        Ok(())
    }

    async fn post<T: Serialize + ?Sized>(
        &self,
        path: &str,
        payload: &T,
    ) -> VerificationResult<String> {
        let url = self.config.endpoint(path);
        let mut request = self.http.post(&url).json(payload);
        if let Some(token) = &self.config.token {
            request = request.bearer_auth(token);
        }

        let response = request.send().await.map_err(|e| {
            tracing::warn!(url = %url, error = %e, "request failed");
            VerificationError::transport(&e)
        })?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| VerificationError::transport(&e))?;

        if !status.is_success() {
            tracing::warn!(url = %url, status = status.as_u16(), "backend returned an error");
            return Err(VerificationError::from_response(status.as_u16(), &body));
        }

        tracing::debug!(url = %url, status = status.as_u16(), "request succeeded");
        Ok(body)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use wiremock::matchers::{body_json, header, header_exists, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;

    fn client_for(server: &MockServer, token: Option<&str>) -> VerificationClient {
        VerificationClient::new(SmsConfig {
            base_url: Url::parse(&server.uri()).unwrap(),
            token: token.map(str::to_string),
            timeout: Some(Duration::from_secs(5)),
        })
        .unwrap()
    }

    #[test]
    fn test_validate_phone_rejects_short_numbers() {
        let candidate = PhoneCandidate::new("+1", "555123");
        let err = validate_phone(&candidate, 7, "Please enter a valid phone number").unwrap_err();
        assert_eq!(
            err,
            VerificationError::Validation("Please enter a valid phone number".to_string())
        );

        let candidate = PhoneCandidate::new("+1", "5551234");
        assert!(validate_phone(&candidate, 7, "invalid").is_ok());
    }

    #[tokio::test]
    async fn test_send_code_posts_phone_with_bearer() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path(SEND_PATH))
            .and(header("authorization", "Bearer tok-123"))
            .and(body_json(json!({ "phone_number": "+15551234567" })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "success": true,
                "message": "sent",
                "phone_number": "+15551234567"
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&server, Some("tok-123"));
        let receipt = client.send_code("+15551234567").await.unwrap();
        assert_eq!(receipt.message.as_deref(), Some("sent"));
    }

    #[tokio::test]
    async fn test_send_code_without_token_omits_authorization() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path(SEND_PATH))
            .and(header_exists("authorization"))
            .respond_with(ResponseTemplate::new(401))
            .expect(0)
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path(SEND_PATH))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "success": true })))
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&server, None);
        assert!(client.send_code("+15551234567").await.is_ok());
    }

    #[tokio::test]
    async fn test_send_code_surfaces_detail() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path(SEND_PATH))
            .respond_with(
                ResponseTemplate::new(503)
                    .set_body_json(json!({ "detail": "SMS service not available" })),
            )
            .mount(&server)
            .await;

        let client = client_for(&server, None);
        let err = client.send_code("+15551234567").await.unwrap_err();
        assert_eq!(
            err,
            VerificationError::Service {
                status: 503,
                detail: Some("SMS service not available".to_string())
            }
        );
    }

    #[tokio::test]
    async fn test_check_code_posts_phone_and_code() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path(VERIFY_PATH))
            .and(body_json(json!({ "phone_number": "+447911123456", "code": "123456" })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "success": true,
                "verified": true
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&server, None);
        assert!(client.check_code("+447911123456", "123456").await.is_ok());
    }

    #[tokio::test]
    async fn test_check_code_unverified_body_is_rejection() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path(VERIFY_PATH))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "success": false,
                "verified": false,
                "message": "Invalid or expired SMS code"
            })))
            .mount(&server)
            .await;

        let client = client_for(&server, None);
        let err = client.check_code("+447911123456", "000000").await.unwrap_err();
        assert_eq!(
            err.user_message("fallback", "generic"),
            "Invalid or expired SMS code"
        );
    }

    #[tokio::test]
    async fn test_check_code_error_without_detail() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path(VERIFY_PATH))
            .respond_with(ResponseTemplate::new(400).set_body_string("bad"))
            .mount(&server)
            .await;

        let client = client_for(&server, None);
        let err = client.check_code("+447911123456", "000000").await.unwrap_err();
        assert_eq!(
            err.user_message("Invalid verification code", "generic"),
            "Invalid verification code"
        );
    }

    #[tokio::test]
    async fn test_unreachable_backend_is_transport_error() {
        let client = VerificationClient::new(SmsConfig {
            base_url: Url::parse("http://127.0.0.1:9").unwrap(),
            token: None,
            timeout: Some(Duration::from_secs(2)),
        })
        .unwrap();

        let err = client.send_code("+15551234567").await.unwrap_err();
        assert!(matches!(err, VerificationError::Transport(_)));
    }
}
