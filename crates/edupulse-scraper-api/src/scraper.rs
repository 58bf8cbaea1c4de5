use async_trait::async_trait;

use crate::config::ScraperConfig;
use crate::error::ScraperResult;

/// Main scraper trait - every per-program extractor implements this.
///
/// A scraper converts one external document into one applicant count.
/// Wrapping the count into the uniform result record (status, elapsed
/// time, error message) is the runner's job, so implementations only
/// report what they found or which stage failed.
#[async_trait]
pub trait Scraper: Send + Sync {
    /// Code-declared configuration for this scraper.
    fn config(&self) -> &ScraperConfig;

    /// Fetch and extract the current applicant count.
    async fn scrape(&self) -> ScraperResult<u32>;

    /// Stable identifier, unique per program per institution.
    fn source_id(&self) -> &str {
        &self.config().source_id
    }

    fn display_name(&self) -> &str {
        &self.config().display_name
    }
}
