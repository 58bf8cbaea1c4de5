use std::sync::Arc;

use async_trait::async_trait;
use edupulse_scraper_api::{
    FetchClient,
    Scraper,
    ScraperConfig,
    ScraperError,
    ScraperResult,
};

use crate::extract;
use crate::programs::EXPORT_URL;

pub const INSTITUTION: &str = "HSE";

/// Counts above this are logged as suspicious but still accepted.
pub const SANITY_CEILING: u32 = 10_000;

/// Scrapes one program's applicant count out of the shared HSE export.
pub struct HseScraper {
    config: ScraperConfig,
    client: Arc<FetchClient>,
}

impl HseScraper {
    pub fn new(program_name: &str, client: Arc<FetchClient>) -> Self {
        let config = ScraperConfig::new(
            source_id(program_name),
            format!("HSE - {program_name}"),
            INSTITUTION,
            program_name,
        )
        .with_url(EXPORT_URL);

        Self { config, client }
    }
}

#[async_trait]
impl Scraper for HseScraper {
    fn config(&self) -> &ScraperConfig {
        &self.config
    }

    async fn scrape(&self) -> ScraperResult<u32> {
        let program_name = &self.config.program_name;
        tracing::info!(program = %program_name, "Starting HSE extraction");

        let bytes = self.client.download_spreadsheet(EXPORT_URL).await?;
        let table = extract::parse_workbook(&bytes)?;

        let count_column =
            extract::find_count_column(&table.headers).ok_or(ScraperError::CountColumnNotFound)?;
        tracing::debug!(
            header = %table.headers[count_column],
            "Export format validated via count header"
        );

        let row = extract::find_program_row(&table, program_name)
            .ok_or_else(|| ScraperError::ProgramNotFound(program_name.clone()))?;

        let raw = table.rows[row.index]
            .get(extract::COUNT_COL)
            .cloned()
            .unwrap_or_default();
        let count = extract::sanitize_count(&raw);

        if count > SANITY_CEILING {
            tracing::warn!(program = %program_name, count, "Suspiciously high applicant count");
        }

        tracing::info!(program = %program_name, count, "HSE extraction complete");
        Ok(count)
    }
}

/// `hse_` + lowercased program name with underscores; the online-program
/// marker is dropped from the slug. Matches the identifiers historical
/// rows were written under.
pub fn source_id(program_name: &str) -> String {
    let slug = program_name
        .to_lowercase()
        .replace(' ', "_")
        .replace("онлайн_", "");
    format!("hse_{slug}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_source_id_strips_online_marker() {
        assert_eq!(
            source_id("ОНЛАЙН Аналитика больших данных"),
            "hse_аналитика_больших_данных"
        );
    }

    #[test]
    fn test_source_id_is_deterministic() {
        assert_eq!(source_id("ОНЛАЙН Финансы"), source_id("ОНЛАЙН Финансы"));
    }

    #[test]
    fn test_config_shape() {
        let client = Arc::new(FetchClient::new().unwrap());
        let scraper = HseScraper::new("ОНЛАЙН Финансы", client);

        assert_eq!(scraper.config().institution, INSTITUTION);
        assert_eq!(scraper.config().display_name, "HSE - ОНЛАЙН Финансы");
        assert_eq!(scraper.config().url.as_deref(), Some(EXPORT_URL));
    }
}
