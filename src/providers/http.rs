use async_trait::async_trait;
use log::{debug, error};
use reqwest::Client;
use reqwest::StatusCode;
use reqwest::header::CONTENT_TYPE;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::errors::DetectorError;
use crate::providers::LanguageDetector;

/// Default request timeout for the detection endpoint
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Body returned by the detection endpoint
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LanguageResponse {
    /// Detected language tag
    pub lang: String,
}

/// Client for an HTTP language detection endpoint
///
/// The whole text is POSTed as `text/plain`; the endpoint must answer 200 with
/// `{"lang": "<tag>"}`. No retries are attempted.
#[derive(Debug, Clone)]
pub struct HttpLanguageDetector {
    /// Full URL of the detection endpoint
    endpoint: String,
    /// HTTP client for making requests
    client: Client,
    /// Request timeout in seconds
    timeout_secs: u64,
}

impl HttpLanguageDetector {
    /// Create a detector with the default 30 second timeout
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self::with_timeout(endpoint, DEFAULT_TIMEOUT_SECS)
    }

    /// Create a detector with a custom request timeout
    pub fn with_timeout(endpoint: impl Into<String>, timeout_secs: u64) -> Self {
        Self {
            endpoint: endpoint.into(),
            client: Client::builder()
                .timeout(Duration::from_secs(timeout_secs))
                .build()
                .unwrap_or_default(),
            timeout_secs,
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    fn map_send_error(&self, e: reqwest::Error) -> DetectorError {
        if e.is_timeout() {
            DetectorError::Timeout(self.timeout_secs)
        } else {
            DetectorError::RequestFailed(e.to_string())
        }
    }
}

#[async_trait]
impl LanguageDetector for HttpLanguageDetector {
    async fn detect_language(&self, text: &str) -> Result<String, DetectorError> {
        debug!("Sending {} bytes to language endpoint {}", text.len(), self.endpoint);

        let response = self
            .client
            .post(&self.endpoint)
            .header(CONTENT_TYPE, "text/plain")
            .body(text.to_string())
            .send()
            .await
            .map_err(|e| self.map_send_error(e))?;

        let status = response.status();
        if status != StatusCode::OK {
            let message = response.text().await.unwrap_or_default();
            error!("Language endpoint returned {}: {}", status, message.trim());
            return Err(DetectorError::ApiError {
                status_code: status.as_u16(),
                message,
            });
        }

        let parsed: LanguageResponse = response.json().await.map_err(|e| {
            if e.is_decode() {
                DetectorError::ParseError(e.to_string())
            } else {
                self.map_send_error(e)
            }
        })?;

        debug!("Language endpoint detected '{}'", parsed.lang);
        Ok(parsed.lang)
    }
}
