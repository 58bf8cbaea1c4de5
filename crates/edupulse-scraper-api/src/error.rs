use thiserror::Error;

/// Scraper error types
#[derive(Error, Debug)]
pub enum ScraperError {
    #[error("network error: {0}")]
    Network(String),

    #[error("HTTP {status} for {url}")]
    Status { status: u16, url: String },

    #[error("download failed: {0}")]
    Download(String),

    #[error("document parse failed: {0}")]
    Parse(String),

    #[error("count column not found")]
    CountColumnNotFound,

    #[error("program not found: {0}")]
    ProgramNotFound(String),

    #[error("no ranking rows found")]
    NoRankingRows,

    #[error("position cell missing in last ranking row")]
    PositionCellMissing,

    #[error("invalid count value: {0}")]
    InvalidCount(String),

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("internal error: {0}")]
    Internal(String),
}

pub type ScraperResult<T> = Result<T, ScraperError>;

impl ScraperError {
    /// Transient failures are worth another attempt; everything else is
    /// either a permanent request error or a structural one.
    pub fn is_retryable(&self) -> bool {
        match self {
            ScraperError::Network(_) => true,
            ScraperError::Status { status, .. } => *status >= 500,
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_errors_are_not_retryable() {
        let err = ScraperError::Status {
            status: 404,
            url: "https://example.org/list".to_string(),
        };
        assert!(!err.is_retryable());
    }

    #[test]
    fn test_server_errors_and_network_errors_are_retryable() {
        let err = ScraperError::Status {
            status: 503,
            url: "https://example.org/list".to_string(),
        };
        assert!(err.is_retryable());
        assert!(ScraperError::Network("connection reset".to_string()).is_retryable());
    }

    #[test]
    fn test_structure_errors_are_not_retryable() {
        assert!(!ScraperError::CountColumnNotFound.is_retryable());
        assert!(!ScraperError::NoRankingRows.is_retryable());
    }
}
