/*!
 * Mock language detector for testing.
 *
 * - `MockDetector::detecting(tag)` - Always answers with the given tag
 * - `MockDetector::failing()` - Always fails as if the endpoint were unreachable
 * - `MockDetector::rejecting(status)` - Always fails with a non-200 status
 * - `MockDetector::garbled()` - Always fails as if the body could not be decoded
 */

use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use crate::errors::DetectorError;
use crate::providers::LanguageDetector;

/// Behavior mode for the mock detector
#[derive(Debug, Clone, PartialEq)]
pub enum MockBehavior {
    /// Always succeeds with this language tag
    Detect(String),
    /// Always fails with a transport error
    Failing,
    /// Always fails with the given HTTP status
    Status(u16),
    /// Answers with a body that is not a language response
    Garbled,
}

/// Mock detector that records what it was asked
#[derive(Debug)]
pub struct MockDetector {
    /// Behavior mode
    behavior: MockBehavior,
    /// Number of calls made
    request_count: Arc<AtomicUsize>,
    /// Text of the last call
    last_text: Mutex<Option<String>>,
}

impl MockDetector {
    pub fn new(behavior: MockBehavior) -> Self {
        Self {
            behavior,
            request_count: Arc::new(AtomicUsize::new(0)),
            last_text: Mutex::new(None),
        }
    }

    /// Detector that always answers `tag`
    pub fn detecting(tag: impl Into<String>) -> Self {
        Self::new(MockBehavior::Detect(tag.into()))
    }

    pub fn failing() -> Self {
        Self::new(MockBehavior::Failing)
    }

    pub fn rejecting(status_code: u16) -> Self {
        Self::new(MockBehavior::Status(status_code))
    }

    pub fn garbled() -> Self {
        Self::new(MockBehavior::Garbled)
    }

    /// Number of detection requests received so far
    pub fn request_count(&self) -> usize {
        self.request_count.load(Ordering::SeqCst)
    }

    /// Text sent with the most recent request
    pub fn last_text(&self) -> Option<String> {
        self.last_text.lock().ok().and_then(|guard| guard.clone())
    }
}

#[async_trait]
impl LanguageDetector for MockDetector {
    async fn detect_language(&self, text: &str) -> Result<String, DetectorError> {
        self.request_count.fetch_add(1, Ordering::SeqCst);
        if let Ok(mut last) = self.last_text.lock() {
            *last = Some(text.to_string());
        }

        match &self.behavior {
            MockBehavior::Detect(tag) => Ok(tag.clone()),
            MockBehavior::Failing => Err(DetectorError::RequestFailed(
                "connection refused (mock)".to_string(),
            )),
            MockBehavior::Status(status_code) => Err(DetectorError::ApiError {
                status_code: *status_code,
                message: String::new(),
            }),
            MockBehavior::Garbled => Err(DetectorError::ParseError(
                "expected value at line 1 column 1".to_string(),
            )),
        }
    }
}
