use std::collections::HashMap;
use std::sync::Arc;

use crate::scraper::Scraper;

/// Scraper registry - holds every discovered scraper keyed by identifier.
pub struct ScraperRegistry {
    scrapers: HashMap<String, Arc<dyn Scraper>>,
}

impl ScraperRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        Self {
            scrapers: HashMap::new(),
        }
    }

    /// Register a scraper. Identifiers double as the persistence key, so
    /// a colliding registration is dropped and reported rather than
    /// silently replacing the first one.
    pub fn register(&mut self, scraper: Arc<dyn Scraper>) {
        let source_id = scraper.source_id().to_string();
        if self.scrapers.contains_key(&source_id) {
            tracing::warn!(source_id = %source_id, "Duplicate scraper identifier, keeping first");
            return;
        }
        self.scrapers.insert(source_id, scraper);
    }

    pub fn get(&self, source_id: &str) -> Option<Arc<dyn Scraper>> {
        self.scrapers.get(source_id).map(Arc::clone)
    }

    pub fn is_registered(&self, source_id: &str) -> bool {
        self.scrapers.contains_key(source_id)
    }

    /// All registered identifiers, sorted for stable reporting.
    pub fn source_ids(&self) -> Vec<String> {
        let mut ids: Vec<String> = self.scrapers.keys().cloned().collect();
        ids.sort();
        ids
    }

    pub fn all(&self) -> Vec<Arc<dyn Scraper>> {
        let mut scrapers: Vec<Arc<dyn Scraper>> = self.scrapers.values().map(Arc::clone).collect();
        scrapers.sort_by(|a, b| a.source_id().cmp(b.source_id()));
        scrapers
    }

    pub fn count(&self) -> usize {
        self.scrapers.len()
    }
}

impl Default for ScraperRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use async_trait::async_trait;

    use super::*;
    use crate::config::ScraperConfig;
    use crate::error::ScraperResult;

    struct FixedScraper {
        config: ScraperConfig,
        count: u32,
    }

    #[async_trait]
    impl Scraper for FixedScraper {
        fn config(&self) -> &ScraperConfig {
            &self.config
        }

        async fn scrape(&self) -> ScraperResult<u32> {
            Ok(self.count)
        }
    }

    fn fixed(id: &str, count: u32) -> Arc<dyn Scraper> {
        Arc::new(FixedScraper {
            config: ScraperConfig::new(id, format!("Test - {id}"), "TEST", id),
            count,
        })
    }

    #[test]
    fn test_registry_creation() {
        let registry = ScraperRegistry::new();
        assert_eq!(registry.count(), 0);
    }

    #[test]
    fn test_duplicate_identifier_keeps_first() {
        let mut registry = ScraperRegistry::new();
        registry.register(fixed("test_one", 1));
        registry.register(fixed("test_one", 2));

        assert_eq!(registry.count(), 1);
    }

    #[tokio::test]
    async fn test_get_returns_registered_scraper() {
        let mut registry = ScraperRegistry::new();
        registry.register(fixed("test_one", 7));

        let scraper = registry.get("test_one").unwrap();
        assert_eq!(scraper.scrape().await.unwrap(), 7);
        assert!(registry.get("test_two").is_none());
    }

    #[test]
    fn test_source_ids_are_sorted() {
        let mut registry = ScraperRegistry::new();
        registry.register(fixed("test_b", 1));
        registry.register(fixed("test_a", 1));

        assert_eq!(registry.source_ids(), vec!["test_a", "test_b"]);
    }
}
