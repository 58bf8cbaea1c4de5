//! Idempotent schema bootstrap, one DDL set per backend.

use super::DatabasePool;

const SQLITE_SCHEMA: [&str; 4] = [
    "CREATE TABLE IF NOT EXISTS scrapers_config (
        scraper_id TEXT PRIMARY KEY,
        name TEXT NOT NULL,
        enabled BOOLEAN NOT NULL DEFAULT TRUE
    )",
    "CREATE TABLE IF NOT EXISTS applicant_counts (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        scraper_id TEXT NOT NULL,
        name TEXT NOT NULL,
        count INTEGER,
        status TEXT NOT NULL,
        error TEXT,
        date DATE NOT NULL,
        synced_to_sheets BOOLEAN NOT NULL DEFAULT FALSE,
        created_at TEXT NOT NULL DEFAULT (datetime('now'))
    )",
    "CREATE INDEX IF NOT EXISTS idx_applicant_counts_scraper_date
        ON applicant_counts (scraper_id, date)",
    "CREATE INDEX IF NOT EXISTS idx_applicant_counts_date
        ON applicant_counts (date)",
];

const POSTGRES_SCHEMA: [&str; 4] = [
    "CREATE TABLE IF NOT EXISTS scrapers_config (
        scraper_id TEXT PRIMARY KEY,
        name TEXT NOT NULL,
        enabled BOOLEAN NOT NULL DEFAULT TRUE
    )",
    "CREATE TABLE IF NOT EXISTS applicant_counts (
        id BIGSERIAL PRIMARY KEY,
        scraper_id TEXT NOT NULL,
        name TEXT NOT NULL,
        count BIGINT,
        status TEXT NOT NULL,
        error TEXT,
        date DATE NOT NULL,
        synced_to_sheets BOOLEAN NOT NULL DEFAULT FALSE,
        created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
    )",
    "CREATE INDEX IF NOT EXISTS idx_applicant_counts_scraper_date
        ON applicant_counts (scraper_id, date)",
    "CREATE INDEX IF NOT EXISTS idx_applicant_counts_date
        ON applicant_counts (date)",
];

pub async fn init(pool: &DatabasePool) -> anyhow::Result<()> {
    match pool {
        DatabasePool::Sqlite(p) => {
            for statement in SQLITE_SCHEMA {
                sqlx::query(statement).execute(p).await?;
            }
        }
        DatabasePool::Postgres(p) => {
            for statement in POSTGRES_SCHEMA {
                sqlx::query(statement).execute(p).await?;
            }
        }
    }

    tracing::debug!("Database schema initialized");
    Ok(())
}
