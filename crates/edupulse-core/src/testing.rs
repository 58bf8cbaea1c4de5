//! Shared test doubles for runner and registry tests.

use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use chrono::NaiveDate;
use edupulse_scraper_api::{
    ExtractionResult,
    Scraper,
    ScraperConfig,
    ScraperError,
    ScraperResult,
};

use crate::storage::{
    PersistedScraperConfig,
    Store,
    StoredResult,
};

pub enum Behavior {
    Success(u32),
    Fail(&'static str),
    Panic(&'static str),
    Sleep(Duration),
}

pub struct StubScraper {
    config: ScraperConfig,
    behavior: Behavior,
}

impl StubScraper {
    pub fn new(source_id: &str, behavior: Behavior) -> Self {
        Self {
            config: ScraperConfig::new(
                source_id,
                format!("Test - {source_id}"),
                "TEST",
                source_id,
            ),
            behavior,
        }
    }

    pub fn success_result(source_id: &str, count: u32) -> ExtractionResult {
        let stub = Self::new(source_id, Behavior::Success(count));
        ExtractionResult::success(&stub.config, count, Duration::from_millis(1))
    }

    pub fn error_result(source_id: &str, message: &str) -> ExtractionResult {
        let stub = Self::new(source_id, Behavior::Success(0));
        ExtractionResult::failure(
            &stub.config,
            &ScraperError::Internal(message.to_string()),
            Duration::from_millis(1),
        )
    }
}

#[async_trait]
impl Scraper for StubScraper {
    fn config(&self) -> &ScraperConfig {
        &self.config
    }

    async fn scrape(&self) -> ScraperResult<u32> {
        match &self.behavior {
            Behavior::Success(count) => Ok(*count),
            Behavior::Fail(message) => Err(ScraperError::Internal((*message).to_string())),
            Behavior::Panic(message) => panic!("{}", message),
            Behavior::Sleep(duration) => {
                tokio::time::sleep(*duration).await;
                Ok(0)
            }
        }
    }
}

pub struct MemoryStore {
    saved: Mutex<Vec<ExtractionResult>>,
    configs: Mutex<Vec<PersistedScraperConfig>>,
    fail_saves: bool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            saved: Mutex::new(Vec::new()),
            configs: Mutex::new(Vec::new()),
            fail_saves: false,
        }
    }

    pub fn failing() -> Self {
        Self {
            fail_saves: true,
            ..Self::new()
        }
    }

    pub fn with_configs(configs: Vec<PersistedScraperConfig>) -> Self {
        let store = Self::new();
        *store.configs.lock().unwrap() = configs;
        store
    }

    pub fn saved(&self) -> Vec<ExtractionResult> {
        self.saved.lock().unwrap().clone()
    }
}

#[async_trait]
impl Store for MemoryStore {
    async fn save_result(&self, result: &ExtractionResult) -> bool {
        self.saved.lock().unwrap().push(result.clone());
        !self.fail_saves
    }

    async fn enabled_configs(&self) -> Vec<PersistedScraperConfig> {
        self.configs
            .lock()
            .unwrap()
            .iter()
            .filter(|c| c.enabled)
            .cloned()
            .collect()
    }

    async fn results_for_date(&self, _date: NaiveDate) -> Vec<StoredResult> {
        Vec::new()
    }
}
