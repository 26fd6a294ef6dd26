use anyhow::Result;
use log::{debug, info};
use std::io::Write;
use std::path::Path;
use std::sync::Arc;

use crate::app_config::Config;
use crate::errors::AppError;
use crate::file_utils::FileManager;
use crate::providers::{HttpLanguageDetector, LanguageDetector};
use crate::validation::{ValidationReport, ValidationRequest, ValidationService};

// @module: Application controller for caption validation

/// Main application controller: reads a caption file, validates it and prints failures
pub struct Controller {
    // @field: Orchestrator with its language detector
    service: ValidationService,
}

impl Controller {
    // @method: Create a controller talking to the configured HTTP endpoint
    pub fn with_config(config: Config) -> Result<Self, AppError> {
        config.validate()?;
        let detector = HttpLanguageDetector::with_timeout(
            config.language.endpoint.trim(),
            config.language.timeout_secs,
        );
        Ok(Self::with_detector(config, Arc::new(detector)))
    }

    /// Create a controller with any detector implementation
    pub fn with_detector(config: Config, detector: Arc<dyn LanguageDetector>) -> Self {
        let service = ValidationService::new(detector).with_sniff_prefix_len(config.sniff_prefix_bytes);
        Self { service }
    }

    /// Validate one caption file and write each failure as a JSON line to `out`.
    ///
    /// Fatal conditions (unreadable file, unsupported format) are returned before
    /// anything is written.
    pub async fn run<P: AsRef<Path>, W: Write>(
        &self,
        input_file: P,
        request: &ValidationRequest,
        out: &mut W,
    ) -> Result<ValidationReport> {
        let input_file = input_file.as_ref();
        info!("Validating captions in {}", input_file.display());

        let header = FileManager::read_header(input_file, self.service.sniff_prefix_len())?;
        let format = self.service.sniff(&header);
        if !format.is_supported() {
            return Err(AppError::UnsupportedFormat.into());
        }

        let content = FileManager::read_to_string(input_file)?;
        debug!("Read {} bytes of {} captions", content.len(), format);

        let report = self.service.validate_as(&content, format, request).await?;
        report.write_json_lines(out)?;
        Ok(report)
    }
}
