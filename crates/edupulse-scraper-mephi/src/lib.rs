//! MEPhI (National Research Nuclear University) applicant-count scraper.
//!
//! Each program publishes its own rating page; the last ranked position
//! on it is used as the applicant count.

pub mod extract;
pub mod programs;
pub mod scraper;

use std::sync::Arc;

use edupulse_scraper_api::{
    FetchClient,
    Scraper,
};

pub use crate::scraper::{
    MephiScraper,
    INSTITUTION,
};

/// One scraper per target program, sharing the injected fetch client.
pub fn scrapers(client: Arc<FetchClient>) -> Vec<Arc<dyn Scraper>> {
    let scrapers: Vec<Arc<dyn Scraper>> = programs::TARGET_PROGRAMS
        .iter()
        .map(|(name, url)| {
            Arc::new(MephiScraper::new(name, url, Arc::clone(&client))) as Arc<dyn Scraper>
        })
        .collect();

    tracing::info!(count = scrapers.len(), "Created MEPhI scrapers");
    scrapers
}
