//! Persistence for extraction results and scraper configuration.
//!
//! The runner talks to the [`Store`] trait; [`Storage`] implements it
//! over SQLite or Postgres chosen by connection-string scheme. Every
//! trait method translates failures into an empty/false return plus an
//! error log - a storage hiccup must never abort a scraping batch.

pub mod schema;

use std::str::FromStr;
use std::time::Duration;

use async_trait::async_trait;
use chrono::{
    NaiveDate,
    Utc,
};
use edupulse_scraper_api::{
    ExtractionResult,
    ScraperConfig,
};
use sqlx::postgres::{
    PgPool,
    PgPoolOptions,
};
use sqlx::sqlite::{
    SqliteConnectOptions,
    SqlitePoolOptions,
};
use sqlx::{
    Row as SqlxRow,
    SqlitePool,
};

/// Enable/disable override row from the `scrapers_config` table.
#[derive(Debug, Clone)]
pub struct PersistedScraperConfig {
    pub source_id: String,
    pub display_name: String,
    pub enabled: bool,
}

/// One persisted row of `applicant_counts`.
#[derive(Debug, Clone)]
pub struct StoredResult {
    pub id: i64,
    pub source_id: String,
    pub display_name: String,
    pub count: Option<i64>,
    pub status: String,
    pub error: Option<String>,
    pub date: NaiveDate,
    pub synced_to_sheets: bool,
}

/// Storage operations the runner and registry depend on.
#[async_trait]
pub trait Store: Send + Sync {
    /// Persist one result, replacing any existing row for the same
    /// `(source_id, date)`. Returns whether the write succeeded.
    async fn save_result(&self, result: &ExtractionResult) -> bool;

    /// All configs marked enabled; empty on query failure.
    async fn enabled_configs(&self) -> Vec<PersistedScraperConfig>;

    /// All results recorded for the given calendar date.
    async fn results_for_date(&self, date: NaiveDate) -> Vec<StoredResult>;
}

#[derive(Clone)]
pub enum DatabasePool {
    Sqlite(SqlitePool),
    Postgres(PgPool),
}

pub struct Storage {
    pool: DatabasePool,
}

impl Storage {
    /// Connect by URL scheme: `sqlite:` for local/test runs, anything
    /// else is treated as Postgres.
    pub async fn connect(database_url: &str) -> anyhow::Result<Self> {
        let pool = if database_url.starts_with("sqlite") {
            let options = SqliteConnectOptions::from_str(database_url)?
                .create_if_missing(true)
                .journal_mode(sqlx::sqlite::SqliteJournalMode::Wal)
                .busy_timeout(Duration::from_secs(5));

            let pool = SqlitePoolOptions::new()
                .max_connections(5)
                .acquire_timeout(Duration::from_secs(30))
                .connect_with(options)
                .await?;
            DatabasePool::Sqlite(pool)
        } else {
            let pool = PgPoolOptions::new()
                .max_connections(10)
                .acquire_timeout(Duration::from_secs(30))
                .connect(database_url)
                .await?;
            DatabasePool::Postgres(pool)
        };

        tracing::info!("Storage connected");
        Ok(Self { pool })
    }

    pub fn from_pool(pool: DatabasePool) -> Self {
        Self { pool }
    }

    pub async fn init_schema(&self) -> anyhow::Result<()> {
        schema::init(&self.pool).await
    }

    /// Insert config rows for newly discovered scrapers, leaving
    /// existing rows (and their enable flags) untouched. Returns the
    /// number of rows inserted.
    pub async fn seed_configs(&self, configs: &[ScraperConfig]) -> usize {
        let mut inserted = 0;

        for config in configs {
            let result = match &self.pool {
                DatabasePool::Sqlite(p) => {
                    sqlx::query(
                        "INSERT OR IGNORE INTO scrapers_config (scraper_id, name, enabled)
                         VALUES (?, ?, ?)",
                    )
                    .bind(&config.source_id)
                    .bind(&config.display_name)
                    .bind(config.enabled)
                    .execute(p)
                    .await
                    .map(|o| o.rows_affected())
                }
                DatabasePool::Postgres(p) => {
                    sqlx::query(
                        "INSERT INTO scrapers_config (scraper_id, name, enabled)
                         VALUES ($1, $2, $3)
                         ON CONFLICT (scraper_id) DO NOTHING",
                    )
                    .bind(&config.source_id)
                    .bind(&config.display_name)
                    .bind(config.enabled)
                    .execute(p)
                    .await
                    .map(|o| o.rows_affected())
                }
            };

            match result {
                Ok(rows_affected) => inserted += rows_affected as usize,
                Err(e) => {
                    tracing::error!(source_id = %config.source_id, error = %e, "Failed to seed config");
                }
            }
        }

        if inserted > 0 {
            tracing::info!(inserted, "Seeded scraper configs");
        }
        inserted
    }

    /// Flip one scraper's enable flag. Returns whether a row changed.
    pub async fn set_enabled(&self, source_id: &str, enabled: bool) -> bool {
        let result = match &self.pool {
            DatabasePool::Sqlite(p) => {
                sqlx::query("UPDATE scrapers_config SET enabled = ? WHERE scraper_id = ?")
                    .bind(enabled)
                    .bind(source_id)
                    .execute(p)
                    .await
                    .map(|o| o.rows_affected())
            }
            DatabasePool::Postgres(p) => {
                sqlx::query("UPDATE scrapers_config SET enabled = $1 WHERE scraper_id = $2")
                    .bind(enabled)
                    .bind(source_id)
                    .execute(p)
                    .await
                    .map(|o| o.rows_affected())
            }
        };

        match result {
            Ok(rows_affected) => rows_affected > 0,
            Err(e) => {
                tracing::error!(source_id = %source_id, error = %e, "Failed to update enable flag");
                false
            }
        }
    }

    /// Persist one result under an explicit date; used by backfill
    /// tooling and by [`Store::save_result`] with today's date.
    pub async fn save_result_for_date(&self, result: &ExtractionResult, date: NaiveDate) -> bool {
        match self.replace_result(result, date).await {
            Ok(()) => {
                tracing::info!(
                    source_id = %result.source_id,
                    count = result.count,
                    status = result.status.as_str(),
                    "Saved result"
                );
                true
            }
            Err(e) => {
                tracing::error!(source_id = %result.source_id, error = %e, "Failed to save result");
                false
            }
        }
    }

    /// Mark rows as mirrored to the spreadsheet. Returns the number of
    /// rows updated.
    pub async fn mark_synced(&self, ids: &[i64]) -> usize {
        let mut updated = 0;

        for id in ids {
            let result = match &self.pool {
                DatabasePool::Sqlite(p) => {
                    sqlx::query("UPDATE applicant_counts SET synced_to_sheets = TRUE WHERE id = ?")
                        .bind(id)
                        .execute(p)
                        .await
                        .map(|o| o.rows_affected())
                }
                DatabasePool::Postgres(p) => {
                    sqlx::query("UPDATE applicant_counts SET synced_to_sheets = TRUE WHERE id = $1")
                        .bind(id)
                        .execute(p)
                        .await
                        .map(|o| o.rows_affected())
                }
            };

            match result {
                Ok(rows_affected) => updated += rows_affected as usize,
                Err(e) => tracing::error!(id, error = %e, "Failed to mark row as synced"),
            }
        }

        updated
    }

    // Delete-then-insert keeps exactly one row per (scraper_id, date);
    // the transaction keeps a crash from losing the day's record.
    async fn replace_result(&self, result: &ExtractionResult, date: NaiveDate) -> anyhow::Result<()> {
        let count = result.count.map(|c| c as i64);

        match &self.pool {
            DatabasePool::Sqlite(p) => {
                let mut tx = p.begin().await?;
                sqlx::query("DELETE FROM applicant_counts WHERE scraper_id = ? AND date = ?")
                    .bind(&result.source_id)
                    .bind(date)
                    .execute(&mut *tx)
                    .await?;
                sqlx::query(
                    "INSERT INTO applicant_counts
                        (scraper_id, name, count, status, error, date, synced_to_sheets)
                     VALUES (?, ?, ?, ?, ?, ?, FALSE)",
                )
                .bind(&result.source_id)
                .bind(&result.display_name)
                .bind(count)
                .bind(result.status.as_str())
                .bind(&result.error)
                .bind(date)
                .execute(&mut *tx)
                .await?;
                tx.commit().await?;
            }
            DatabasePool::Postgres(p) => {
                let mut tx = p.begin().await?;
                sqlx::query("DELETE FROM applicant_counts WHERE scraper_id = $1 AND date = $2")
                    .bind(&result.source_id)
                    .bind(date)
                    .execute(&mut *tx)
                    .await?;
                sqlx::query(
                    "INSERT INTO applicant_counts
                        (scraper_id, name, count, status, error, date, synced_to_sheets)
                     VALUES ($1, $2, $3, $4, $5, $6, FALSE)",
                )
                .bind(&result.source_id)
                .bind(&result.display_name)
                .bind(count)
                .bind(result.status.as_str())
                .bind(&result.error)
                .bind(date)
                .execute(&mut *tx)
                .await?;
                tx.commit().await?;
            }
        }

        Ok(())
    }
}

#[async_trait]
impl Store for Storage {
    async fn save_result(&self, result: &ExtractionResult) -> bool {
        self.save_result_for_date(result, Utc::now().date_naive())
            .await
    }

    async fn enabled_configs(&self) -> Vec<PersistedScraperConfig> {
        let rows = match &self.pool {
            DatabasePool::Sqlite(p) => {
                sqlx::query(
                    "SELECT scraper_id, name, enabled FROM scrapers_config
                     WHERE enabled = TRUE ORDER BY scraper_id",
                )
                .fetch_all(p)
                .await
                .and_then(|rows| rows.iter().map(parse_config_row_sqlite).collect())
            }
            DatabasePool::Postgres(p) => {
                sqlx::query(
                    "SELECT scraper_id, name, enabled FROM scrapers_config
                     WHERE enabled = TRUE ORDER BY scraper_id",
                )
                .fetch_all(p)
                .await
                .and_then(|rows| rows.iter().map(parse_config_row_postgres).collect())
            }
        };

        match rows {
            Ok(configs) => configs,
            Err(e) => {
                tracing::error!(error = %e, "Failed to get enabled configs");
                Vec::new()
            }
        }
    }

    async fn results_for_date(&self, date: NaiveDate) -> Vec<StoredResult> {
        let rows = match &self.pool {
            DatabasePool::Sqlite(p) => {
                sqlx::query(
                    "SELECT id, scraper_id, name, count, status, error, date, synced_to_sheets
                     FROM applicant_counts WHERE date = ? ORDER BY scraper_id",
                )
                .bind(date)
                .fetch_all(p)
                .await
                .and_then(|rows| rows.iter().map(parse_result_row_sqlite).collect())
            }
            DatabasePool::Postgres(p) => {
                sqlx::query(
                    "SELECT id, scraper_id, name, count, status, error, date, synced_to_sheets
                     FROM applicant_counts WHERE date = $1 ORDER BY scraper_id",
                )
                .bind(date)
                .fetch_all(p)
                .await
                .and_then(|rows| rows.iter().map(parse_result_row_postgres).collect())
            }
        };

        match rows {
            Ok(results) => results,
            Err(e) => {
                tracing::error!(error = %e, date = %date, "Failed to get results for date");
                Vec::new()
            }
        }
    }
}

fn parse_config_row_sqlite(
    row: &sqlx::sqlite::SqliteRow,
) -> Result<PersistedScraperConfig, sqlx::Error> {
    Ok(PersistedScraperConfig {
        source_id: row.try_get(0)?,
        display_name: row.try_get(1)?,
        enabled: row.try_get(2)?,
    })
}

fn parse_config_row_postgres(
    row: &sqlx::postgres::PgRow,
) -> Result<PersistedScraperConfig, sqlx::Error> {
    Ok(PersistedScraperConfig {
        source_id: row.try_get(0)?,
        display_name: row.try_get(1)?,
        enabled: row.try_get(2)?,
    })
}

fn parse_result_row_sqlite(row: &sqlx::sqlite::SqliteRow) -> Result<StoredResult, sqlx::Error> {
    Ok(StoredResult {
        id: row.try_get(0)?,
        source_id: row.try_get(1)?,
        display_name: row.try_get(2)?,
        count: row.try_get(3)?,
        status: row.try_get(4)?,
        error: row.try_get(5)?,
        date: row.try_get(6)?,
        synced_to_sheets: row.try_get(7)?,
    })
}

fn parse_result_row_postgres(row: &sqlx::postgres::PgRow) -> Result<StoredResult, sqlx::Error> {
    Ok(StoredResult {
        id: row.try_get(0)?,
        source_id: row.try_get(1)?,
        display_name: row.try_get(2)?,
        count: row.try_get(3)?,
        status: row.try_get(4)?,
        error: row.try_get(5)?,
        date: row.try_get(6)?,
        synced_to_sheets: row.try_get(7)?,
    })
}

#[cfg(test)]
mod tests {
    use std::time::Duration as StdDuration;

    use edupulse_scraper_api::ScraperError;

    use super::*;

    async fn test_storage() -> (tempfile::TempDir, Storage) {
        let dir = tempfile::tempdir().unwrap();
        let url = format!("sqlite://{}", dir.path().join("edupulse.db").display());
        let storage = Storage::connect(&url).await.unwrap();
        storage.init_schema().await.unwrap();
        (dir, storage)
    }

    fn config(id: &str) -> ScraperConfig {
        ScraperConfig::new(id, format!("Test - {id}"), "TEST", id)
    }

    fn success(id: &str, count: u32) -> ExtractionResult {
        ExtractionResult::success(&config(id), count, StdDuration::from_millis(5))
    }

    #[tokio::test]
    async fn test_save_and_fetch_by_date() {
        let (_dir, storage) = test_storage().await;
        let date = NaiveDate::from_ymd_opt(2025, 7, 22).unwrap();

        assert!(storage.save_result_for_date(&success("test_a", 37), date).await);

        let results = storage.results_for_date(date).await;
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].source_id, "test_a");
        assert_eq!(results[0].count, Some(37));
        assert_eq!(results[0].status, "success");
        assert!(!results[0].synced_to_sheets);

        let other_day = NaiveDate::from_ymd_opt(2025, 7, 23).unwrap();
        assert!(storage.results_for_date(other_day).await.is_empty());
    }

    #[tokio::test]
    async fn test_same_day_save_replaces_previous_row() {
        let (_dir, storage) = test_storage().await;
        let date = NaiveDate::from_ymd_opt(2025, 7, 22).unwrap();

        assert!(storage.save_result_for_date(&success("test_a", 10), date).await);
        assert!(storage.save_result_for_date(&success("test_a", 11), date).await);

        let results = storage.results_for_date(date).await;
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].count, Some(11));
    }

    #[tokio::test]
    async fn test_error_result_has_no_count() {
        let (_dir, storage) = test_storage().await;
        let date = NaiveDate::from_ymd_opt(2025, 7, 22).unwrap();

        let result = ExtractionResult::failure(
            &config("test_a"),
            &ScraperError::NoRankingRows,
            StdDuration::from_millis(5),
        );
        assert!(storage.save_result_for_date(&result, date).await);

        let results = storage.results_for_date(date).await;
        assert_eq!(results[0].status, "error");
        assert_eq!(results[0].count, None);
        assert_eq!(results[0].error.as_deref(), Some("no ranking rows found"));
    }

    #[tokio::test]
    async fn test_seed_and_enabled_configs() {
        let (_dir, storage) = test_storage().await;

        let seeded = storage
            .seed_configs(&[config("test_a"), config("test_b")])
            .await;
        assert_eq!(seeded, 2);

        // Seeding again must not duplicate or reset anything.
        assert_eq!(storage.seed_configs(&[config("test_a")]).await, 0);

        assert!(storage.set_enabled("test_b", false).await);
        assert!(!storage.set_enabled("test_missing", false).await);

        let enabled = storage.enabled_configs().await;
        assert_eq!(enabled.len(), 1);
        assert_eq!(enabled[0].source_id, "test_a");
        assert!(enabled[0].enabled);
    }

    #[tokio::test]
    async fn test_mark_synced() {
        let (_dir, storage) = test_storage().await;
        let date = NaiveDate::from_ymd_opt(2025, 7, 22).unwrap();

        storage.save_result_for_date(&success("test_a", 1), date).await;
        storage.save_result_for_date(&success("test_b", 2), date).await;

        let ids: Vec<i64> = storage
            .results_for_date(date)
            .await
            .iter()
            .map(|r| r.id)
            .collect();
        assert_eq!(storage.mark_synced(&ids).await, 2);

        let results = storage.results_for_date(date).await;
        assert!(results.iter().all(|r| r.synced_to_sheets));
    }

    #[tokio::test]
    async fn test_save_result_uses_todays_date() {
        let (_dir, storage) = test_storage().await;

        assert!(Store::save_result(&storage, &success("test_a", 3)).await);

        let results = storage.results_for_date(Utc::now().date_naive()).await;
        assert_eq!(results.len(), 1);
    }
}
