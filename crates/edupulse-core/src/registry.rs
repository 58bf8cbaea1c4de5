//! Scraper discovery and config merge.
//!
//! Discovery is an explicit registration list: adding an institution
//! means adding its factory call here plus config rows in storage.

use std::collections::HashSet;
use std::sync::Arc;

use edupulse_scraper_api::{
    FetchClient,
    ScraperRegistry,
};

use crate::config::RunMode;
use crate::runner::ScraperJob;
use crate::storage::Store;

/// Register every institution's scrapers against the shared client.
pub fn create_scraper_registry(client: Arc<FetchClient>) -> ScraperRegistry {
    let mut registry = ScraperRegistry::new();

    for scraper in edupulse_scraper_hse::scrapers(Arc::clone(&client)) {
        registry.register(scraper);
    }
    for scraper in edupulse_scraper_mephi::scrapers(Arc::clone(&client)) {
        registry.register(scraper);
    }
    for scraper in edupulse_scraper_mipt::scrapers(client) {
        registry.register(scraper);
    }

    tracing::info!(count = registry.count(), "Discovered scrapers");
    registry
}

/// Jobs for the requested operating mode.
pub async fn load_jobs(
    registry: &ScraperRegistry, store: &dyn Store, mode: RunMode,
) -> Vec<ScraperJob> {
    match mode {
        RunMode::Enabled => load_enabled_jobs(registry, store).await,
        RunMode::All => load_all_jobs(registry),
    }
}

/// Intersect discovered scrapers with the persisted enable flags.
/// Persisted `name`/`enabled` win over the code-declared config;
/// identifiers must match exactly or the row is dropped with a warning.
pub async fn load_enabled_jobs(registry: &ScraperRegistry, store: &dyn Store) -> Vec<ScraperJob> {
    let persisted = store.enabled_configs().await;
    if persisted.is_empty() {
        tracing::warn!("No enabled scrapers found in persisted configuration");
        return Vec::new();
    }

    let mut jobs = Vec::new();
    let mut matched: HashSet<String> = HashSet::new();

    for row in persisted {
        match registry.get(&row.source_id) {
            Some(scraper) => {
                let mut config = scraper.config().clone();
                if !row.display_name.is_empty() {
                    config.display_name = row.display_name;
                }
                config.enabled = row.enabled;

                matched.insert(row.source_id);
                jobs.push(ScraperJob { scraper, config });
            }
            None => {
                tracing::warn!(
                    source_id = %row.source_id,
                    "Orphaned persisted config, no matching scraper"
                );
            }
        }
    }

    for source_id in registry.source_ids() {
        if !matched.contains(&source_id) {
            tracing::info!(
                source_id = %source_id,
                "Discovered scraper has no enabled config, excluded from run"
            );
        }
    }

    tracing::info!(jobs = jobs.len(), "Loaded enabled scrapers");
    jobs
}

/// Every discovered scraper with its code-declared config, ignoring
/// persisted state. Diagnostics only, not for production runs.
pub fn load_all_jobs(registry: &ScraperRegistry) -> Vec<ScraperJob> {
    let jobs: Vec<ScraperJob> = registry
        .all()
        .into_iter()
        .map(|scraper| ScraperJob {
            config: scraper.config().clone(),
            scraper,
        })
        .collect();

    tracing::info!(jobs = jobs.len(), "Loaded all discovered scrapers");
    jobs
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::PersistedScraperConfig;
    use crate::testing::{
        Behavior,
        MemoryStore,
        StubScraper,
    };

    fn registry_with(ids: &[&str]) -> ScraperRegistry {
        let mut registry = ScraperRegistry::new();
        for id in ids {
            registry.register(Arc::new(StubScraper::new(id, Behavior::Success(1))));
        }
        registry
    }

    fn persisted(id: &str, name: &str, enabled: bool) -> PersistedScraperConfig {
        PersistedScraperConfig {
            source_id: id.to_string(),
            display_name: name.to_string(),
            enabled,
        }
    }

    #[tokio::test]
    async fn test_enabled_mode_excludes_disabled_configs() {
        let registry = registry_with(&["test_a", "test_b"]);
        let store = MemoryStore::with_configs(vec![
            persisted("test_a", "Test - test_a", true),
            persisted("test_b", "Test - test_b", false),
        ]);

        let jobs = load_enabled_jobs(&registry, &store).await;
        assert_eq!(jobs.len(), 1);
        assert_eq!(jobs[0].config.source_id, "test_a");
    }

    #[tokio::test]
    async fn test_persisted_name_overrides_declared_name() {
        let registry = registry_with(&["test_a"]);
        let store = MemoryStore::with_configs(vec![persisted("test_a", "Custom name", true)]);

        let jobs = load_enabled_jobs(&registry, &store).await;
        assert_eq!(jobs[0].config.display_name, "Custom name");
        assert!(jobs[0].config.enabled);
    }

    #[tokio::test]
    async fn test_orphaned_config_is_dropped() {
        let registry = registry_with(&["test_a"]);
        let store = MemoryStore::with_configs(vec![
            persisted("test_a", "Test - test_a", true),
            persisted("test_gone", "Removed scraper", true),
        ]);

        let jobs = load_enabled_jobs(&registry, &store).await;
        assert_eq!(jobs.len(), 1);
        assert_eq!(jobs[0].config.source_id, "test_a");
    }

    #[tokio::test]
    async fn test_all_mode_ignores_persisted_configs() {
        let registry = registry_with(&["test_a", "test_b"]);
        let store = MemoryStore::with_configs(vec![persisted("test_a", "Test - test_a", true)]);

        let jobs = load_jobs(&registry, &store, RunMode::All).await;
        assert_eq!(jobs.len(), 2);
    }

    #[test]
    fn test_production_registry_has_unique_identifiers() {
        let client = Arc::new(FetchClient::new().unwrap());
        let registry = create_scraper_registry(client);

        // 23 HSE + 6 MEPhI + 7 MIPT
        assert_eq!(registry.count(), 36);
        assert!(registry.is_registered("mephi_cybersecurity"));
        assert!(registry.is_registered("mipt_data_science"));
        assert!(registry.is_registered("hse_финансы"));
    }
}
