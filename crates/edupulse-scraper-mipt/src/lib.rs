//! MIPT (Moscow Institute of Physics and Technology) applicant-count
//! scraper.
//!
//! Each program publishes an application-list page; the last listed row
//! number is used as the applicant count.

pub mod extract;
pub mod programs;
pub mod scraper;

use std::sync::Arc;

use edupulse_scraper_api::{
    FetchClient,
    Scraper,
};

pub use crate::scraper::{
    MiptScraper,
    INSTITUTION,
};

/// One scraper per target program, sharing the injected fetch client.
pub fn scrapers(client: Arc<FetchClient>) -> Vec<Arc<dyn Scraper>> {
    let scrapers: Vec<Arc<dyn Scraper>> = programs::TARGET_PROGRAMS
        .iter()
        .map(|(name, url)| {
            Arc::new(MiptScraper::new(name, url, Arc::clone(&client))) as Arc<dyn Scraper>
        })
        .collect();

    tracing::info!(count = scrapers.len(), "Created MIPT scrapers");
    scrapers
}
