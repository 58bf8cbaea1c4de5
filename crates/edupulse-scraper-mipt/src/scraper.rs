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

pub const INSTITUTION: &str = "MIPT";

/// Scrapes one program's application-list page.
pub struct MiptScraper {
    config: ScraperConfig,
    client: Arc<FetchClient>,
}

impl MiptScraper {
    pub fn new(program_name: &str, url: &str, client: Arc<FetchClient>) -> Self {
        let config = ScraperConfig::new(
            source_id(program_name),
            format!("МФТИ - {program_name}"),
            INSTITUTION,
            program_name,
        )
        .with_url(url);

        Self { config, client }
    }
}

#[async_trait]
impl Scraper for MiptScraper {
    fn config(&self) -> &ScraperConfig {
        &self.config
    }

    async fn scrape(&self) -> ScraperResult<u32> {
        let program_name = &self.config.program_name;
        let url = self
            .config
            .url
            .as_deref()
            .ok_or_else(|| ScraperError::InvalidConfig("missing list page URL".to_string()))?;

        tracing::info!(program = %program_name, "Starting MIPT extraction");

        let html = self.client.get_text_with_browser_headers(url).await?;
        let count = extract::parse_ranking(&html)?;

        tracing::info!(program = %program_name, count, "MIPT extraction complete");
        Ok(count)
    }
}

pub fn source_id(program_name: &str) -> String {
    ident::source_id("mipt", &ident::slug_with_table(program_name, &SLUGS))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_source_id_uses_transliteration_table() {
        assert_eq!(source_id("Науки о данных"), "mipt_data_science");
        assert_eq!(
            source_id("Modern Artificial Intelligence"),
            "mipt_modern_ai"
        );
    }

    #[test]
    fn test_unknown_program_falls_back_to_slug() {
        assert_eq!(
            source_id("Разработка AI-продукта"),
            "mipt_разработка_ai_продукта"
        );
    }

    #[test]
    fn test_display_name_uses_native_institution_name() {
        let client = Arc::new(FetchClient::new().unwrap());
        let scraper = MiptScraper::new("Науки о данных", "https://example.org", client);

        assert_eq!(scraper.display_name(), "МФТИ - Науки о данных");
        assert_eq!(scraper.config().institution, INSTITUTION);
    }
}
