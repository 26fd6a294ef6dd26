/*!
 * Language detection providers.
 *
 * The language check never talks to the network directly; it goes through the
 * `LanguageDetector` trait so that the orchestration can be exercised without a
 * live service:
 * - `http`: calls an external detection endpoint with reqwest
 * - `mock`: in-process detector with canned answers
 * - `mock_server`: axum router that imitates the external endpoint
 */

use async_trait::async_trait;
use std::fmt::Debug;

use crate::errors::DetectorError;

/// Capability to identify the language of a piece of text
///
/// Implementations return a BCP-47-like tag such as `en-US`. Any error is treated by
/// the caller as "language undetectable".
#[async_trait]
pub trait LanguageDetector: Send + Sync + Debug {
    /// Detect the language of `text`
    async fn detect_language(&self, text: &str) -> Result<String, DetectorError>;
}

pub mod http;
pub mod mock;
pub mod mock_server;

pub use http::HttpLanguageDetector;
pub use mock::MockDetector;
