use std::time::Duration;

use serde::{
    Deserialize,
    Serialize,
};

use crate::config::ScraperConfig;
use crate::error::ScraperError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExtractionStatus {
    Success,
    Error,
}

impl ExtractionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ExtractionStatus::Success => "success",
            ExtractionStatus::Error => "error",
        }
    }
}

/// The uniform record every extractor produces, one per attempt.
///
/// Invariant: `Success` implies `count` is present and `error` absent;
/// `Error` implies the opposite. The constructors are the only way to
/// build one, so the invariant holds everywhere downstream.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractionResult {
    pub source_id: String,
    pub display_name: String,
    pub status: ExtractionStatus,
    pub count: Option<u32>,
    pub error: Option<String>,
    pub elapsed: Duration,
}

impl ExtractionResult {
    pub fn success(config: &ScraperConfig, count: u32, elapsed: Duration) -> Self {
        Self {
            source_id: config.source_id.clone(),
            display_name: config.display_name.clone(),
            status: ExtractionStatus::Success,
            count: Some(count),
            error: None,
            elapsed,
        }
    }

    pub fn failure(config: &ScraperConfig, error: &ScraperError, elapsed: Duration) -> Self {
        Self::failure_message(
            config.source_id.clone(),
            config.display_name.clone(),
            error.to_string(),
            elapsed,
        )
    }

    /// Synthetic error result for failures that happen outside a scraper,
    /// e.g. a panicking job caught at the runner boundary.
    pub fn failure_message(
        source_id: String, display_name: String, message: String, elapsed: Duration,
    ) -> Self {
        let message = if message.is_empty() {
            "unknown error".to_string()
        } else {
            message
        };

        Self {
            source_id,
            display_name,
            status: ExtractionStatus::Error,
            count: None,
            error: Some(message),
            elapsed,
        }
    }

    pub fn is_success(&self) -> bool {
        self.status == ExtractionStatus::Success
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> ScraperConfig {
        ScraperConfig::new("hse_финансы", "HSE - ОНЛАЙН Финансы", "HSE", "ОНЛАЙН Финансы")
    }

    #[test]
    fn test_success_carries_count_and_no_error() {
        let result = ExtractionResult::success(&config(), 37, Duration::from_millis(120));

        assert!(result.is_success());
        assert_eq!(result.count, Some(37));
        assert!(result.error.is_none());
    }

    #[test]
    fn test_failure_carries_message_and_no_count() {
        let result = ExtractionResult::failure(
            &config(),
            &ScraperError::CountColumnNotFound,
            Duration::from_millis(80),
        );

        assert!(!result.is_success());
        assert!(result.count.is_none());
        assert_eq!(result.error.as_deref(), Some("count column not found"));
    }

    #[test]
    fn test_empty_synthetic_message_is_replaced() {
        let result = ExtractionResult::failure_message(
            "hse_финансы".to_string(),
            "HSE - ОНЛАЙН Финансы".to_string(),
            String::new(),
            Duration::ZERO,
        );

        assert_eq!(result.error.as_deref(), Some("unknown error"));
    }
}
