use std::sync::Arc;

use async_trait::async_trait;
use edupulse_scraper_api::{
    ident,
    FetchClient,
    Scraper,
    ScraperConfig,
    ScraperError,
    ScraperResult,
};

use crate::extract;
use crate::programs::SLUGS;

pub const INSTITUTION: &str = "MEPhI";

/// Scrapes one program's rating page.
pub struct MephiScraper {
    config: ScraperConfig,
    client: Arc<FetchClient>,
}

impl MephiScraper {
    pub fn new(program_name: &str, url: &str, client: Arc<FetchClient>) -> Self {
        let config = ScraperConfig::new(
            source_id(program_name),
            format!("НИЯУ МИФИ - {program_name}"),
            INSTITUTION,
            program_name,
        )
        .with_url(url);

        Self { config, client }
    }
}

#[async_trait]
impl Scraper for MephiScraper {
    fn config(&self) -> &ScraperConfig {
        &self.config
    }

    async fn scrape(&self) -> ScraperResult<u32> {
        let program_name = &self.config.program_name;
        let url = self
            .config
            .url
            .as_deref()
            .ok_or_else(|| ScraperError::InvalidConfig("missing rating page URL".to_string()))?;

        tracing::info!(program = %program_name, "Starting MEPhI extraction");

        let html = self.client.get_text_with_browser_headers(url).await?;
        let count = extract::parse_ranking(&html)?;

        tracing::info!(program = %program_name, count, "MEPhI extraction complete");
        Ok(count)
    }
}

pub fn source_id(program_name: &str) -> String {
    ident::source_id("mephi", &ident::slug_with_table(program_name, &SLUGS))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_source_id_uses_transliteration_table() {
        assert_eq!(source_id("Кибербезопасность"), "mephi_cybersecurity");
        assert_eq!(
            source_id("Машинное обучение и анализ данных"),
            "mephi_machine_learning_data_analysis"
        );
    }

    #[test]
    fn test_unknown_program_falls_back_to_slug() {
        assert_eq!(source_id("Новая программа"), "mephi_новая_программа");
    }

    #[tokio::test]
    async fn test_missing_url_is_invalid_config() {
        let client = Arc::new(FetchClient::new().unwrap());
        let mut scraper = MephiScraper::new("Кибербезопасность", "https://example.org", client);
        scraper.config.url = None;

        assert!(matches!(
            scraper.scrape().await,
            Err(ScraperError::InvalidConfig(_))
        ));
    }
}
