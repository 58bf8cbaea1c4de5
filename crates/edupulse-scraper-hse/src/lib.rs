//! HSE (Higher School of Economics) applicant-count scraper.
//!
//! HSE publishes a single spreadsheet export covering every program;
//! each scraper instance locates its own program row inside it.

pub mod extract;
pub mod programs;
pub mod scraper;

use std::sync::Arc;

use edupulse_scraper_api::{
    FetchClient,
    Scraper,
};

pub use crate::scraper::{
    HseScraper,
    INSTITUTION,
    SANITY_CEILING,
};

/// One scraper per target program, sharing the injected fetch client.
pub fn scrapers(client: Arc<FetchClient>) -> Vec<Arc<dyn Scraper>> {
    let scrapers: Vec<Arc<dyn Scraper>> = programs::TARGET_PROGRAMS
        .iter()
        .map(|name| Arc::new(HseScraper::new(name, Arc::clone(&client))) as Arc<dyn Scraper>)
        .collect();

    tracing::info!(count = scrapers.len(), "Created HSE scrapers");
    scrapers
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn test_factory_covers_every_target_program() {
        let client = Arc::new(FetchClient::new().unwrap());
        let scrapers = scrapers(client);

        assert_eq!(scrapers.len(), programs::TARGET_PROGRAMS.len());

        let ids: HashSet<&str> = scrapers.iter().map(|s| s.source_id()).collect();
        assert_eq!(ids.len(), scrapers.len(), "identifiers must not collide");
    }
}
